//! Value Objects - Immutable, identity-less domain primitives

mod data_type;
mod date_window;
mod geo_point;

pub use data_type::DataType;
pub use date_window::{DateWindow, midnight_utc};
pub use geo_point::GeoPoint;
