//! DTRACK Protocol - Core
//!
//! Constants and error types shared by all layers. Always compiled,
//! independent of the `transport` and `client` features.

pub mod constants;
mod error;

pub use error::*;
