pub mod client_service;
pub mod error;
pub mod receipt_document;
pub mod receipt_service;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_support;
