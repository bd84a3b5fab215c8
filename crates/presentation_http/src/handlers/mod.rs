//! HTTP request handlers

pub mod aboard;
pub mod data;
pub mod health;
pub mod sights;
