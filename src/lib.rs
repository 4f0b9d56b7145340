//! # DTRACK Protocol
//!
//! Client-side implementation of the DTRACK ASCII UDP telemetry protocol
//! spoken by optical motion-tracking controllers. It provides:
//!
//! - **Parsing**: raw datagrams become one immutable [`Frame`] per
//!   packet, with 6DOF bodies, Flysticks, measurement tools and
//!   fingertracking hands
//! - **Robustness**: a malformed line is skipped and recorded, never
//!   poisoning the rest of the datagram
//! - **Transport**: a UDP data socket with timeout-bounded and
//!   close-aware receive, plus the feedback channel for haptic commands
//! - **Feedback**: encoders for tactile fingertracking and Flystick
//!   beep/vibration commands
//!
//! ## Feature Flags
//!
//! - `transport` (default): UDP transport layer (requires `tokio`)
//! - `client` (default): high-level [`DTrackClient`] API
//!
//! ## Modules
//!
//! - [`core`]: constants and error types (always included)
//! - [`model`]: immutable per-frame data model (always included)
//! - [`parser`]: tokenizer, entity parsers and frame assembler (always
//!   included)
//! - [`feedback`]: feedback command encoder (always included)
//! - [`transport`]: UDP sockets (requires `transport` feature)
//! - [`client`]: high-level client (requires `client` feature)
//!
//! ## Example Usage
//!
//! ```rust
//! use dtrack_protocol::parser::Parser;
//!
//! let mut parser = Parser::new();
//! let frame = parser.parse(
//!     "fr 562\r\n6d 1 [0 0.98][100.0 200.0 300.0][1 0 0 0 1 0 0 0 1]\r\n",
//! );
//!
//! let body = frame.body(0).expect("body 0 tracked");
//! assert_eq!(body.loc, [100.0, 200.0, 300.0]);
//! assert_eq!(body.quat().to_array(), [1.0, 0.0, 0.0, 0.0]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Core module (always included)
pub mod core;

// Data model (always included)
pub mod model;

// Parsing layer (always included)
pub mod parser;

// Feedback command encoder (always included)
pub mod feedback;

// Transport layer (feature-gated)
#[cfg(feature = "transport")]
#[cfg_attr(docsrs, doc(cfg(feature = "transport")))]
pub mod transport;

// Client API (feature-gated)
#[cfg(feature = "client")]
#[cfg_attr(docsrs, doc(cfg(feature = "client")))]
pub mod client;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::core::constants;
    pub use crate::core::{DTrackError, ParseError};
    pub use crate::model::{
        finger_index, Body, Finger, Flystick, Frame, Hand, HandSide, MeasurementTool, Quat,
        Rotation, SplitTimestamp,
    };
    pub use crate::parser::Parser;

    #[cfg(feature = "transport")]
    pub use crate::transport::{CloseHandle, DTrackSocket, Received};

    #[cfg(feature = "client")]
    pub use crate::client::DTrackClient;
}

// Re-export commonly used items at crate root
pub use self::core::{DTrackError, ParseError};
pub use model::{
    Body, Finger, Flystick, Frame, Hand, HandSide, MeasurementTool, Quat, Rotation, SplitTimestamp,
};
pub use parser::Parser;

#[cfg(feature = "transport")]
pub use self::core::TransportError;
#[cfg(feature = "transport")]
pub use transport::{CloseHandle, DTrackSocket, Received};

#[cfg(feature = "client")]
pub use client::DTrackClient;
