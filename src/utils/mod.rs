pub mod currency;
pub mod password;
pub mod reference;
pub mod token;
