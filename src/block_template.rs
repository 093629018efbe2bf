use super::*;

/// Immutable snapshot of upstream work, shaped like the fields of a
/// `getblocktemplate` response. Read-only for the lifetime of a job.
#[derive(Clone, PartialEq, Eq, Debug, Deserialize, Serialize)]
pub struct BlockTemplate {
    pub bits: Nbits,
    #[serde(rename = "previousblockhash")]
    pub previous_block_hash: BlockHash,
    #[serde(rename = "curtime")]
    pub current_time: u32,
    pub height: u64,
    #[serde(deserialize_with = "version_from_i32")]
    pub version: Version,
    #[serde(default)]
    pub transactions: Vec<TemplateTransaction>,
    #[serde(default)]
    pub default_witness_commitment: ScriptBuf,
    #[serde(
        rename = "coinbasevalue",
        with = "bitcoin::amount::serde::as_sat",
        default
    )]
    pub coinbase_value: Amount,
}

impl BlockTemplate {
    /// Sibling hashes for folding a coinbase digest up to the merkle root,
    /// computed once per job and reused across every submission.
    pub fn merkle_steps(&self) -> Vec<MerkleNode> {
        merkle_steps(self.transactions.iter().map(|tx| tx.txid).collect())
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Deserialize, Serialize)]
pub struct TemplateTransaction {
    pub txid: Txid,
    #[serde(
        rename = "data",
        serialize_with = "tx_to_hex",
        deserialize_with = "tx_from_hex"
    )]
    pub transaction: Transaction,
}

fn version_from_i32<'de, D>(d: D) -> Result<Version, D::Error>
where
    D: Deserializer<'de>,
{
    let x = i32::deserialize(d)?;
    Ok(Version::from(x))
}

fn tx_from_hex<'de, D>(d: D) -> Result<Transaction, D::Error>
where
    D: Deserializer<'de>,
{
    let s = <&str>::deserialize(d)?;
    encode::deserialize_hex(s).map_err(serde::de::Error::custom)
}

fn tx_to_hex<S>(tx: &Transaction, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&encode::serialize_hex(tx))
}
