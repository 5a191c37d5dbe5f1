use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::receiptmodel::ReceiptWithRelations;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct IssueReceiptDto {
    pub client_id: Uuid,
    pub property_id: Uuid,

    #[validate(range(min = 0.01, message = "Amount must be positive"))]
    pub amount: f64,

    pub issued_at: NaiveDate,

    #[validate(length(min = 2, message = "Company name is required"))]
    pub company_name: String,

    pub company_address: Option<String>,

    #[validate(url(message = "Enter a valid logo URL"))]
    pub logo_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReceiptListResponseDto {
    pub status: String,
    pub receipts: Vec<ReceiptWithRelations>,
    pub results: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_dto() -> IssueReceiptDto {
        IssueReceiptDto {
            client_id: Uuid::new_v4(),
            property_id: Uuid::new_v4(),
            amount: 50000.0,
            issued_at: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            company_name: "Dream Avenue Realty".to_string(),
            company_address: None,
            logo_url: None,
        }
    }

    #[test]
    fn accepts_positive_amount() {
        assert!(base_dto().validate().is_ok());
    }

    #[test]
    fn rejects_zero_amount() {
        let mut dto = base_dto();
        dto.amount = 0.0;
        assert!(dto.validate().is_err());
    }

    #[test]
    fn rejects_negative_amount() {
        let mut dto = base_dto();
        dto.amount = -25.0;
        assert!(dto.validate().is_err());
    }

    #[test]
    fn rejects_malformed_logo_url() {
        let mut dto = base_dto();
        dto.logo_url = Some("not a url".to_string());
        assert!(dto.validate().is_err());
    }
}
