use super::*;

/// Opaque record handed to the pool's persistence layer when a share pays
/// out. The core only produces these, it never touches storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub pool_id: String,
    pub coin: String,
    pub address: String,
    pub amount: f64,
    pub transaction_confirmation_data: String,
    pub created: u64,
}

impl Payment {
    pub fn new(
        pool_id: String,
        coin: String,
        address: String,
        amount: f64,
        transaction_confirmation_data: String,
    ) -> Self {
        Self {
            pool_id,
            coin,
            address,
            amount,
            transaction_confirmation_data,
            created: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_flat_record() {
        let payment = Payment {
            pool_id: "main".into(),
            coin: "bitcoin".into(),
            address: "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4".into(),
            amount: 0.0125,
            transaction_confirmation_data: "deadbeef".into(),
            created: 1234567890,
        };

        let value = serde_json::to_value(&payment).unwrap();
        assert_eq!(value["pool_id"], "main");
        assert_eq!(value["created"], 1234567890);
        assert_eq!(
            serde_json::from_value::<Payment>(value).unwrap(),
            payment
        );
    }

    #[test]
    fn new_stamps_creation_time() {
        let payment = Payment::new(
            "main".into(),
            "bitcoin".into(),
            "addr".into(),
            1.0,
            "".into(),
        );
        assert!(payment.created > 0);
    }
}
