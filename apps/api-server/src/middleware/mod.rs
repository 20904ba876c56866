//! Request-level middleware and error conversion.

pub mod error;
