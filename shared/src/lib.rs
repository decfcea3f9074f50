//! Shared types and models for the Stocktag inventory platform
//!
//! This crate contains the record shapes and their validation, shared between
//! the backend and the admin UI (via WASM).

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
