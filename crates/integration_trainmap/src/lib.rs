//! Trainmap resolver integration
//!
//! The resolver is the service that owns the GTFS dataset and computes
//! sightings. This crate speaks its HTTP protocol.
//!
//! # Architecture
//!
//! [`TrainmapClient`] defines the resolver operations and is implemented by
//! [`HttpTrainmapClient`].
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_trainmap::{HttpTrainmapClient, ResolverConfig, TrainmapClient};
//!
//! let config = ResolverConfig::default();
//! let client = HttpTrainmapClient::new(&config, Some("trainmap.db".to_string()))?;
//!
//! let feeds = client.get_feeds().await?;
//! ```

mod client;
mod config;
mod error;

pub use client::{DATASET_HEADER, HttpTrainmapClient, TrainmapClient};
pub use config::ResolverConfig;
pub use error::ResolverError;
