//! ww-core/src/lib.rs
//!
//! The central domain logic and interface definitions for Wishwall.

pub mod error;
pub mod models;
pub mod traits;
pub mod wall;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use traits::*;
