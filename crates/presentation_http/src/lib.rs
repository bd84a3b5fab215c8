//! Trainmap HTTP presentation layer
//!
//! JSON API over the sighting service, plus optional static frontend
//! serving.

pub mod envelope;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod shutdown;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
