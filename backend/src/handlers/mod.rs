//! HTTP handlers for the Stocktag API

pub mod health;
pub mod print;
pub mod products;

pub use health::*;
pub use print::*;
pub use products::*;
