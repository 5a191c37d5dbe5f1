pub mod authdtos;
pub mod clientdtos;
pub mod propertydtos;
pub mod receiptdtos;
pub mod tourdtos;
pub mod visitdtos;
