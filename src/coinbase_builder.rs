use super::*;

/// Builds the full coinbase transaction with a zeroed extranonce region and
/// splits the serialization around it, so prefix + extranonce + suffix always
/// reassemble into a valid transaction whatever the miner inserts.
#[derive(Clone)]
pub struct CoinbaseBuilder {
    arbitrary: Vec<u8>,
    height: u64,
    payout_script: ScriptBuf,
    reserved_extranonce_size: usize,
    value: Amount,
    witness_commitment: ScriptBuf,
}

impl CoinbaseBuilder {
    pub fn new(
        height: u64,
        value: Amount,
        payout_script: ScriptBuf,
        reserved_extranonce_size: usize,
    ) -> Self {
        Self {
            arbitrary: Vec::new(),
            height,
            payout_script,
            reserved_extranonce_size,
            value,
            witness_commitment: ScriptBuf::new(),
        }
    }

    pub fn with_arbitrary(mut self, arbitrary: Vec<u8>) -> Self {
        self.arbitrary = arbitrary;
        self
    }

    pub fn with_witness_commitment(mut self, witness_commitment: ScriptBuf) -> Self {
        self.witness_commitment = witness_commitment;
        self
    }

    pub fn build(self) -> Result<(Transaction, String, String)> {
        ensure!(
            self.arbitrary.len() <= MAX_ARBITRARY_PUSH_SIZE,
            OversizedPushSnafu {
                size: self.arbitrary.len()
            }
        );

        let mut buf: Vec<u8> = Vec::with_capacity(MAX_COINBASE_SCRIPT_SIG_SIZE);

        // BIP34 encode block height
        let mut minimally_encoded_serialized_cscript = [0u8; 8];
        let len = write_scriptint(
            &mut minimally_encoded_serialized_cscript,
            self.height.try_into().expect("height should always fit"),
        );
        buf.push(len as u8);
        buf.extend_from_slice(&minimally_encoded_serialized_cscript[..len]);

        let script_prefix_size = buf.len();

        buf.extend_from_slice(vec![0u8; self.reserved_extranonce_size].as_slice());

        // Pool arbitrary bytes trail the extranonce region as a single push,
        // the length header keeps the scriptSig parseable for any content.
        buf.push(self.arbitrary.len() as u8);
        buf.extend_from_slice(&self.arbitrary);

        let script_sig = ScriptBuf::from_bytes(buf);
        let script_sig_size = script_sig.len();

        ensure!(
            script_sig_size <= MAX_COINBASE_SCRIPT_SIG_SIZE,
            OversizedScriptSigSnafu {
                size: script_sig_size
            }
        );

        let mut output = vec![TxOut {
            value: self.value,
            script_pubkey: self.payout_script,
        }];

        if !self.witness_commitment.is_empty() {
            output.push(TxOut {
                value: Amount::ZERO,
                script_pubkey: self.witness_commitment,
            });
        }

        let coinbase = Transaction {
            version: bitcoin::transaction::Version::TWO,
            lock_time: LockTime::ZERO,
            input: vec![TxIn {
                previous_output: OutPoint::null(),
                script_sig,
                sequence: Sequence::MAX,
                witness: Witness::new(),
            }],
            output,
        };

        // offset = size of tx version
        //  + size of #inputs
        //  + size of coinbase outpoint
        //  + size of scriptSig length
        //  + size of the BIP34 height push
        let offset = 4
            + VarInt(coinbase.input.len().try_into().expect("single input"))
                .size()
            + 36
            + VarInt(script_sig_size.try_into().expect("script sig fits")).size()
            + script_prefix_size;

        let bin = consensus::serialize(&coinbase);
        let coinb1 = hex::encode(&bin[..offset]);
        let coinb2 = hex::encode(&bin[offset + self.reserved_extranonce_size..]);

        Ok((coinbase, coinb1, coinb2))
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        bitcoin::{Address, address::NetworkUnchecked},
        pretty_assertions::assert_eq as pretty_assert_eq,
    };

    fn payout_script() -> ScriptBuf {
        "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4"
            .parse::<Address<NetworkUnchecked>>()
            .unwrap()
            .assume_checked()
            .script_pubkey()
    }

    fn builder() -> CoinbaseBuilder {
        CoinbaseBuilder::new(
            800_000,
            Amount::from_sat(50 * COIN_VALUE),
            payout_script(),
            8,
        )
        .with_arbitrary(b"pool".to_vec())
    }

    #[test]
    fn split_reassembles_with_zero_extranonce() {
        let (tx, coinb1, coinb2) = builder().build().unwrap();

        let full = {
            let mut v = hex::decode(&coinb1).unwrap();
            v.extend_from_slice(&[0u8; 8]);
            v.extend_from_slice(&hex::decode(&coinb2).unwrap());
            v
        };

        pretty_assert_eq!(full, consensus::serialize(&tx));
    }

    #[test]
    fn split_allows_custom_extranonce() {
        let (tx, coinb1, coinb2) = builder().build().unwrap();

        let joined = {
            let mut v = hex::decode(&coinb1).unwrap();
            v.extend_from_slice(&[0x11u8; 8]);
            v.extend_from_slice(&hex::decode(&coinb2).unwrap());
            v
        };

        let original = consensus::serialize(&tx);
        assert_eq!(joined.len(), original.len());
        assert_ne!(joined, original);

        // Still a syntactically valid transaction with the same shape.
        let reassembled: Transaction = encode::deserialize_hex(&hex::encode(joined)).unwrap();
        assert_eq!(reassembled.input.len(), 1);
        assert_eq!(reassembled.output, tx.output);
    }

    #[test]
    fn deterministic_with_same_inputs() {
        let (tx1, coinb1_a, coinb2_a) = builder().build().unwrap();
        let (tx2, coinb1_b, coinb2_b) = builder().build().unwrap();

        assert_eq!(consensus::serialize(&tx1), consensus::serialize(&tx2));
        assert_eq!(coinb1_a, coinb1_b);
        assert_eq!(coinb2_a, coinb2_b);
    }

    #[test]
    fn arbitrary_rides_in_coinb2() {
        let (_tx, coinb1, coinb2) = builder().build().unwrap();

        let push_hex = hex::encode([b"pool".len() as u8]) + &hex::encode(b"pool");
        assert!(!coinb1.contains(&push_hex), "arbitrary must not be in coinb1");
        assert!(
            coinb2.starts_with(&push_hex),
            "coinb2 must open with the length-prefixed arbitrary bytes"
        );
    }

    #[test]
    fn coinb1_length_matches_offset_formula() {
        let (tx, coinb1, _coinb2) = builder().build().unwrap();

        let script_sig_size = tx.input[0].script_sig.len();

        let mut tmp = [0u8; 8];
        let height_len = write_scriptint(&mut tmp, 800_000);
        let script_prefix_size = 1 + height_len;

        let expected = 4
            + VarInt(1).size()
            + 36
            + VarInt(script_sig_size as u64).size()
            + script_prefix_size;

        assert_eq!(coinb1.len() / 2, expected);
    }

    #[test]
    fn script_sig_accounts_for_the_whole_extranonce_region() {
        let (tx, _, _) = builder().build().unwrap();

        // height push + reserved + arbitrary push
        let mut tmp = [0u8; 8];
        let height_len = write_scriptint(&mut tmp, 800_000);
        assert_eq!(
            tx.input[0].script_sig.len(),
            1 + height_len + 8 + 1 + b"pool".len()
        );
    }

    #[test]
    fn witness_commitment_adds_second_output() {
        let commitment = ScriptBuf::from_bytes(vec![0x6a, 0x24, 0xaa, 0x21, 0xa9, 0xed]);

        let (tx, _, _) = builder()
            .with_witness_commitment(commitment.clone())
            .build()
            .unwrap();

        assert_eq!(tx.output.len(), 2);
        assert_eq!(tx.output[1].value, Amount::ZERO);
        assert_eq!(tx.output[1].script_pubkey, commitment);

        let (without, _, _) = builder().build().unwrap();
        assert_eq!(without.output.len(), 1);
    }

    #[test]
    fn roundtrip_various_reserved_sizes() {
        for reserved in [0usize, 1, 4, 8, 16, 32] {
            let (tx, coinb1, coinb2) = CoinbaseBuilder::new(
                123_456,
                Amount::from_sat(25 * COIN_VALUE),
                payout_script(),
                reserved,
            )
            .with_arbitrary(b"|workgen|".to_vec())
            .build()
            .unwrap();

            let mut full = hex::decode(&coinb1).unwrap();
            full.extend_from_slice(&vec![0u8; reserved]);
            full.extend_from_slice(&hex::decode(&coinb2).unwrap());

            pretty_assert_eq!(full, consensus::serialize(&tx), "reserved = {reserved}");
        }
    }

    #[test]
    fn oversized_arbitrary_errors() {
        let err = builder()
            .with_arbitrary(vec![0xaa; MAX_ARBITRARY_PUSH_SIZE + 1])
            .build()
            .unwrap_err();

        assert!(matches!(err, Error::OversizedPush { size } if size == 76));
    }

    #[test]
    fn oversized_script_sig_errors() {
        let err = CoinbaseBuilder::new(
            800_000,
            Amount::from_sat(50 * COIN_VALUE),
            payout_script(),
            MAX_COINBASE_SCRIPT_SIG_SIZE,
        )
        .build()
        .unwrap_err();

        assert!(matches!(err, Error::OversizedScriptSig { .. }));
    }

    #[test]
    fn zero_height_encodes_as_empty_push() {
        let (tx, _, _) = CoinbaseBuilder::new(
            0,
            Amount::from_sat(50 * COIN_VALUE),
            payout_script(),
            4,
        )
        .build()
        .unwrap();

        assert_eq!(tx.input[0].script_sig.as_bytes()[0], 0);
    }
}
