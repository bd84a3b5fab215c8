//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod resolver_adapter;

pub use resolver_adapter::ResolverAdapter;
