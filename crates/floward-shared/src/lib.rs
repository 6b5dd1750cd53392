//! # Floward Shared
//!
//! Wire types for the authentication API.
//! Kept free of client logic so the backend can depend on the same shapes.

pub mod dto;
pub mod response;
pub mod routes;

pub use response::{EMAIL_ALREADY_REGISTERED, ErrorBody, ErrorDetail};
