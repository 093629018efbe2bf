use super::*;

/// A merkle tree node in internal byte order, which is also how merkle
/// branches travel over the wire. Display-order hex would corrupt folding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, DeserializeFromStr, SerializeDisplay)]
pub struct MerkleNode([u8; 32]);

impl MerkleNode {
    pub fn from_byte_array(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn to_byte_array(self) -> [u8; 32] {
        self.0
    }
}

impl fmt::Display for MerkleNode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for MerkleNode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(<[u8; 32]>::from_hex(s).context(MalformedHashSnafu)?))
    }
}

impl From<Txid> for MerkleNode {
    fn from(txid: Txid) -> Self {
        Self(txid.to_byte_array())
    }
}

impl From<sha256d::Hash> for MerkleNode {
    fn from(hash: sha256d::Hash) -> Self {
        Self(hash.to_byte_array())
    }
}

fn combine(left: MerkleNode, right: MerkleNode) -> MerkleNode {
    let mut concat = Vec::with_capacity(64);
    concat.extend_from_slice(&left.0);
    concat.extend_from_slice(&right.0);
    sha256d::Hash::hash(&concat).into()
}

/// Minimal ordered sibling list needed to fold a yet-unknown coinbase hash up
/// to the merkle root, with the coinbase as the leftmost leaf. Standard rule:
/// pair left to right per level, duplicating an odd tail node.
pub fn merkle_steps(non_coinbase_txids: Vec<Txid>) -> Vec<MerkleNode> {
    if non_coinbase_txids.is_empty() {
        return Vec::new();
    }

    // The coinbase slot's value never influences the recorded siblings.
    let mut level = vec![MerkleNode::from_byte_array([0u8; 32])];
    level.extend(non_coinbase_txids.into_iter().map(MerkleNode::from));

    let mut steps = Vec::new();
    let mut path = 0usize;

    while level.len() > 1 {
        let sibling = level.get(path ^ 1).copied().unwrap_or(level[path]);
        steps.push(sibling);

        let mut next = Vec::with_capacity(level.len() / 2 + 1);
        for pair in level.chunks(2) {
            next.push(combine(pair[0], pair[pair.len() - 1]));
        }

        level = next;
        path /= 2;
    }

    steps
}

/// Folds a coinbase digest through precomputed steps, sibling always on the
/// right, reproducing the root of `[coinbase] + transactions`.
pub fn fold_steps(coinbase_digest: MerkleNode, steps: &[MerkleNode]) -> MerkleNode {
    steps
        .iter()
        .fold(coinbase_digest, |node, step| combine(node, *step))
}
