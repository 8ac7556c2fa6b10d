//! # AppError
//!
//! Centralized error handling for Wishwall.
//! Every variant is a rejected wish; store failures travel as `anyhow`
//! through the `MessageStore` port.

use thiserror::Error;

/// Why a submitted wish was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// A field was absent or blank after trimming.
    #[error("name and message are required")]
    MissingFields,

    /// A field exceeds its character bound.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
}

/// A specialized Result type for Wishwall logic.
pub type Result<T> = std::result::Result<T, AppError>;
