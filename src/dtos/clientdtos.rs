use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::{clientmodel::Client, propertymodel::PropertyCategory};

// Shared phone check: accepts international formats with separators,
// six digits minimum.
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let phone_regex = regex::Regex::new(r"^\+?[0-9()\-\s]{6,20}$")
        .map_err(|_| ValidationError::new("invalid_phone_regex"))?;

    if !phone_regex.is_match(value) {
        let mut error = ValidationError::new("invalid_phone");
        error.message = Some(Cow::from("Enter a valid phone number"));
        return Err(error);
    }
    Ok(())
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct SaveClientDto {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,

    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Enter a valid email")
    )]
    pub email: String,

    #[validate(custom = "validate_phone")]
    pub phone: String,

    pub purchase_history: Option<String>,
    pub notes: Option<String>,
}

/// Partial update: absent fields keep their stored value. Clearing a
/// field to NULL through this route is not supported.
#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateClientDto {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: Option<String>,

    #[validate(email(message = "Enter a valid email"))]
    pub email: Option<String>,

    #[validate(custom = "validate_phone")]
    pub phone: Option<String>,

    pub purchase_history: Option<String>,
    pub notes: Option<String>,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct InquiryDto {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,

    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Enter a valid email")
    )]
    pub email: String,

    #[validate(custom = "validate_phone")]
    pub phone: String,

    pub property_type: PropertyCategory,

    #[validate(length(min = 10, message = "Message must be at least 10 characters"))]
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClientListResponseDto {
    pub status: String,
    pub clients: Vec<Client>,
    pub results: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClientResponseDto {
    pub status: String,
    pub data: Client,
}
