pub mod adminmodel;
pub mod clientmodel;
pub mod propertymodel;
pub mod receiptmodel;
pub mod tourmodel;
pub mod visitmodel;
