//! DTRACK Protocol - Data Model
//!
//! Immutable per-frame tracking entities:
//!
//! - [`Frame`]: one snapshot per received datagram
//! - [`Body`]: standard 6DOF rigid body
//! - [`Flystick`]: wand with buttons and analog controls
//! - [`Hand`] / [`Finger`]: fingertracking data
//! - [`MeasurementTool`]: body-shaped measurement device
//! - [`Rotation`] / [`Quat`]: orientation representations
//!
//! Entities are constructed by the [`crate::parser`] module and never
//! mutated afterwards.

mod body;
mod flystick;
mod frame;
mod hand;
mod rotation;

pub use body::{Body, MeasurementTool};
pub use flystick::Flystick;
pub use frame::{Frame, SplitTimestamp};
pub use hand::{finger_index, Finger, Hand, HandSide};
pub use rotation::{Quat, Rotation};
