use super::*;

/// Capability set of a per-job block instance. Chain-specific variants all
/// expose the same three submission-path operations plus protocol metadata.
pub trait Generator {
    /// Rebuilds the coinbase around `extranonce`, folds its digest up to the
    /// merkle root and serializes the 80-byte header, caching both for
    /// `sum`/`submit`. Deterministic for identical inputs.
    fn header(&mut self, extranonce: &Extranonce, nonce: Nonce) -> Result<String>;

    /// Proof-of-work value of the last generated header, digest bytes
    /// reversed into numeric big-endian order.
    fn sum(&self) -> Result<U256>;

    /// Full-block submission hex: header, transaction count, coinbase, then
    /// every template transaction, in consensus serialization.
    fn submit(&self) -> Result<String>;

    /// Position of the nonce within a `mining.submit` params array.
    fn nonce_submission_slot(&self) -> usize;

    /// Position of extranonce2 within a `mining.submit` params array, if the
    /// chain takes one.
    fn extranonce2_submission_slot(&self) -> Option<usize>;

    fn share_multiplier(&self) -> f64;
}

#[derive(Clone)]
pub struct BitcoinBlock {
    pub(crate) chain: Arc<dyn Chain>,
    pub(crate) template: Option<Arc<BlockTemplate>>,
    pub(crate) job_id: JobId,
    pub(crate) prevhash: PrevHash,
    pub(crate) coinb1: String,
    pub(crate) coinb2: String,
    pub(crate) merkle_steps: Vec<MerkleNode>,
    pub(crate) version: Version,
    pub(crate) nbits: Nbits,
    pub(crate) ntime: Ntime,
    pub(crate) extranonce_size: Option<usize>,
    pub(crate) sealed: Option<Sealed>,
}

/// Result of the last `header` call, overwritten per submission attempt.
#[derive(Clone, Debug)]
pub(crate) struct Sealed {
    pub(crate) coinbase_hex: String,
    pub(crate) header: Header,
    pub(crate) header_hex: String,
}

impl BitcoinBlock {
    /// Rebuilds a verification-only instance from a received descriptor, the
    /// way a proxy verifies upstream work. Without a template `submit` has no
    /// transaction set and fails `NotInitialized`.
    pub fn from_work(work: Work, chain_name: &str) -> Result<Self> {
        Ok(Self {
            chain: chain::lookup(chain_name)?,
            template: None,
            job_id: work.job_id,
            prevhash: work.prevhash,
            coinb1: work.coinb1,
            coinb2: work.coinb2,
            merkle_steps: work.merkle_steps,
            version: work.version,
            nbits: work.nbits,
            ntime: work.ntime,
            extranonce_size: None,
            sealed: None,
        })
    }

    pub fn job_id(&self) -> JobId {
        self.job_id
    }

    pub fn template(&self) -> Option<&Arc<BlockTemplate>> {
        self.template.as_ref()
    }

    pub fn header_hex(&self) -> Option<&str> {
        self.sealed.as_ref().map(|sealed| sealed.header_hex.as_str())
    }
}

impl fmt::Debug for BitcoinBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitcoinBlock")
            .field("chain", &self.chain.name())
            .field("job_id", &self.job_id)
            .field("prevhash", &self.prevhash)
            .finish_non_exhaustive()
    }
}

impl Generator for BitcoinBlock {
    fn header(&mut self, extranonce: &Extranonce, nonce: Nonce) -> Result<String> {
        if let Some(expected) = self.extranonce_size {
            ensure!(
                extranonce.len() == expected,
                ExtranonceLengthSnafu {
                    expected,
                    actual: extranonce.len()
                }
            );
        }

        let coinbase_hex = format!("{}{}{}", self.coinb1, extranonce, self.coinb2);

        let leaf = self
            .chain
            .coinbase_digest(&coinbase_hex)?
            .parse::<MerkleNode>()?;

        let merkle_root = fold_steps(leaf, &self.merkle_steps);

        let header = Header {
            version: self.version.into(),
            prev_blockhash: self.prevhash.into(),
            merkle_root: TxMerkleNode::from_byte_array(merkle_root.to_byte_array()),
            time: self.ntime.into(),
            bits: self.nbits.into(),
            nonce: nonce.into(),
        };

        let header_hex = hex::encode(consensus::serialize(&header));

        self.sealed = Some(Sealed {
            coinbase_hex,
            header,
            header_hex: header_hex.clone(),
        });

        Ok(header_hex)
    }

    fn sum(&self) -> Result<U256> {
        let sealed = self.sealed.as_ref().context(HeaderNotGeneratedSnafu)?;

        let digest = self.chain.header_digest(&sealed.header_hex)?;

        let mut bytes = hex::decode(&digest).context(InvalidInputEncodingSnafu)?;
        bytes.reverse();

        Ok(U256::from_big_endian(&bytes))
    }

    fn submit(&self) -> Result<String> {
        let sealed = self.sealed.as_ref().context(HeaderNotGeneratedSnafu)?;
        let template = self.template.as_ref().context(NotInitializedSnafu)?;

        let coinbase_bin =
            hex::decode(&sealed.coinbase_hex).expect("assembled coinbase is valid hex");
        let mut cursor = bitcoin::io::Cursor::new(&coinbase_bin);
        let coinbase = Transaction::consensus_decode_from_finite_reader(&mut cursor)
            .expect("assembled coinbase always decodes");

        let txdata = std::iter::once(coinbase)
            .chain(template.transactions.iter().map(|tx| tx.transaction.clone()))
            .collect();

        let block = Block {
            header: sealed.header,
            txdata,
        };

        Ok(hex::encode(consensus::serialize(&block)))
    }

    fn nonce_submission_slot(&self) -> usize {
        4
    }

    fn extranonce2_submission_slot(&self) -> Option<usize> {
        Some(2)
    }

    fn share_multiplier(&self) -> f64 {
        self.chain.share_multiplier()
    }
}
