use super::*;

/// Chain-specific hashing and share scaling. One instance per chain name,
/// shared read-only across every job created for that chain.
pub trait Chain: fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    /// Digest of a serialized coinbase transaction, hex in internal byte
    /// order so it can be folded straight into the merkle tree.
    fn coinbase_digest(&self, coinbase_hex: &str) -> Result<String>;

    /// Digest of the 80-byte header, hex in internal byte order.
    fn header_digest(&self, header_hex: &str) -> Result<String>;

    /// Scaling factor between the chain's proof-of-work target scale and the
    /// pool's share bookkeeping baseline.
    fn share_multiplier(&self) -> f64;

    /// Whether the chain rejects templates with no non-coinbase transactions.
    fn requires_transactions(&self) -> bool {
        false
    }
}

#[derive(Debug)]
struct DoubleSha256 {
    name: &'static str,
    share_multiplier: f64,
}

impl DoubleSha256 {
    fn digest(&self, input_hex: &str) -> Result<String> {
        let bytes = hex::decode(input_hex).context(InvalidInputEncodingSnafu)?;
        Ok(hex::encode(sha256d::Hash::hash(&bytes).to_byte_array()))
    }
}

impl Chain for DoubleSha256 {
    fn name(&self) -> &'static str {
        self.name
    }

    fn coinbase_digest(&self, coinbase_hex: &str) -> Result<String> {
        self.digest(coinbase_hex)
    }

    fn header_digest(&self, header_hex: &str) -> Result<String> {
        self.digest(header_hex)
    }

    fn share_multiplier(&self) -> f64 {
        self.share_multiplier
    }
}

static CHAINS: LazyLock<BTreeMap<&'static str, Arc<dyn Chain>>> = LazyLock::new(|| {
    let mut chains: BTreeMap<&'static str, Arc<dyn Chain>> = BTreeMap::new();

    for name in ["bitcoin", "testnet", "regtest"] {
        chains.insert(
            name,
            Arc::new(DoubleSha256 {
                name,
                share_multiplier: 1.0,
            }),
        );
    }

    chains
});

pub fn lookup(name: &str) -> Result<Arc<dyn Chain>> {
    CHAINS.get(name).cloned().context(UnknownChainSnafu { name })
}
