//! Domain layer for the trainmap API
//!
//! Contains the transit entities returned by the resolver, the value objects
//! decoded from requests, and domain errors. No I/O happens here.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
