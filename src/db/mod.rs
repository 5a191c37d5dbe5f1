pub mod admindb;
pub mod clientdb;
pub mod db;
pub mod propertydb;
pub mod receiptdb;
pub mod tourdb;
pub mod visitdb;
