pub mod auth;
pub mod clients;
pub mod inquiries;
pub mod overview;
pub mod properties;
pub mod receipts;
pub mod tours;
pub mod visits;
