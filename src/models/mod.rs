//! Application models that are not part of the domain.

pub mod config;
