//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod resolver_port;

#[cfg(test)]
pub use resolver_port::MockResolverPort;
pub use resolver_port::ResolverPort;
