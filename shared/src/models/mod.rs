//! Domain models for inventory records and print requests

mod print_request;
mod product;

pub use print_request::*;
pub use product::*;
