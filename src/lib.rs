use {
    bitcoin::{
        Amount, Block, BlockHash, CompactTarget, OutPoint, ScriptBuf, Sequence, Transaction, TxIn,
        TxMerkleNode, TxOut, Txid, VarInt, Witness,
        block::Header,
        consensus::{self, Decodable, encode},
        hashes::{Hash, sha256d},
        locktime::absolute::LockTime,
        script::write_scriptint,
    },
    byteorder::{BigEndian, ByteOrder, LittleEndian},
    hex::FromHex,
    primitive_types::U256,
    rand::RngCore,
    serde::{Deserialize, Serialize, Serializer, de::Deserializer, ser::SerializeSeq},
    serde_with::{DeserializeFromStr, SerializeDisplay},
    snafu::{OptionExt, ResultExt, Snafu, ensure},
    std::{
        collections::BTreeMap,
        fmt,
        str::FromStr,
        sync::{
            Arc, LazyLock,
            atomic::{AtomicU64, Ordering},
        },
        time::{SystemTime, UNIX_EPOCH},
    },
    tracing::debug,
};

use error::*;

pub use {
    block::{BitcoinBlock, Generator},
    block_template::{BlockTemplate, TemplateTransaction},
    chain::Chain,
    coinbase_builder::CoinbaseBuilder,
    error::{Error, Result},
    extranonce::Extranonce,
    generator::WorkGenerator,
    job_id::JobId,
    merkle::{MerkleNode, fold_steps, merkle_steps},
    nbits::Nbits,
    nonce::Nonce,
    ntime::Ntime,
    payment::Payment,
    prevhash::PrevHash,
    version::Version,
    work::Work,
};

mod block;
mod block_template;
pub mod chain;
mod coinbase_builder;
mod error;
mod extranonce;
mod generator;
mod job_id;
mod merkle;
mod nbits;
mod nonce;
mod ntime;
mod payment;
mod prevhash;
mod version;
mod work;

pub const COIN_VALUE: u64 = 100_000_000;

/// Consensus limit on the coinbase scriptSig.
pub const MAX_COINBASE_SCRIPT_SIG_SIZE: usize = 100;

/// Largest payload that still encodes as a single-byte script push.
pub const MAX_ARBITRARY_PUSH_SIZE: usize = 75;
