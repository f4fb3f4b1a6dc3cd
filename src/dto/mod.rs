//! DTO modules that bridge the backend API with the domain layer.

pub mod api;
pub mod clients;
