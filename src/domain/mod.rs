//! Domain entities and value objects exposed by the dashboard service layer.

pub mod client;
pub mod missing_letter;
pub mod sales;
pub mod session;
pub mod types;
