use uuid::Uuid;

/// Short human-readable receipt reference, e.g. `3F92A1C4`.
///
/// Eight hex characters from a fresh v4 UUID. Collisions across the receipt
/// table are possible in principle; stored object keys use the full UUID so a
/// renumbered receipt never clobbers another document.
pub fn generate_receipt_number() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_number_shape() {
        let number = generate_receipt_number();
        assert_eq!(number.len(), 8);
        assert!(number
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
    }

    #[test]
    fn test_receipt_numbers_vary() {
        assert_ne!(generate_receipt_number(), generate_receipt_number());
    }
}
