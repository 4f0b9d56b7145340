//! DTRACK Protocol - Parsing Layer
//!
//! Decodes the ASCII line grammar of DTRACK output datagrams:
//!
//! - [`tokenizer`]: whitespace tokens and bracketed sections
//! - per-line entity parsers for bodies, Flysticks, measurement tools,
//!   hands, timestamps and calibrated counts
//! - [`Parser`]: the frame assembler, the only stateful piece (carried
//!   calibrated counts)
//!
//! One datagram is one or more lines, each identified by its leading
//! prefix token. All parsing is pure; transport hands the assembler raw
//! datagram bytes.

mod body;
mod flystick;
mod frame;
mod hand;
mod scalar;
pub mod tokenizer;

pub use body::{parse_bodies, parse_measurement_tools};
pub use flystick::parse_flysticks;
pub use frame::Parser;
pub use hand::parse_hands;
pub use scalar::{
    parse_calibrated_count, parse_frame_counter, parse_timestamp, parse_timestamp_hires,
    HiresTimestamp,
};
