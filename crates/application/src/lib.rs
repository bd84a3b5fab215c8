//! Application layer - Request decoding and query dispatch
//!
//! Turns raw path parameters into validated queries and routes each query to
//! the resolver port. Adapters in the infrastructure layer implement the port.

pub mod error;
pub mod ports;
pub mod request_decoder;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use request_decoder::{AboardQuery, LookupKey, PointQuery};
pub use services::*;
