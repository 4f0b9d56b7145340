//! Protocol constants from the DTRACK ASCII output format.
//!
//! These values are fixed by the protocol and MUST NOT be changed.

// =============================================================================
// LINE PREFIXES (DTRACK ASCII output)
// =============================================================================

/// Frame counter line.
pub const PREFIX_FRAME_COUNTER: &str = "fr ";

/// Timestamp line (seconds as a single float).
pub const PREFIX_TIMESTAMP: &str = "ts ";

/// Timestamp line with second/microsecond split and latency.
pub const PREFIX_TIMESTAMP_HIRES: &str = "ts2 ";

/// Number of calibrated standard bodies.
pub const PREFIX_BODY_CAL: &str = "6dcal ";

/// Standard body array (6DOF).
pub const PREFIX_BODY: &str = "6d ";

/// Flystick array (6DOF + buttons + analogs).
pub const PREFIX_FLYSTICK: &str = "6df2 ";

/// Measurement tool array.
pub const PREFIX_MEASUREMENT_TOOL: &str = "6dmt2 ";

/// Number of calibrated fingertracking hands.
pub const PREFIX_HAND_CAL: &str = "glcal ";

/// Fingertracking hand array.
pub const PREFIX_HAND: &str = "gl ";

// =============================================================================
// GRAMMAR DELIMITERS
// =============================================================================

/// Separators between bracketed sections; the wire format is not consistent
/// about the space, both spellings occur.
pub const SECTION_SEPARATORS: [&str; 2] = ["][", "] ["];

/// Buttons are packed this many per integer token, LSB first.
pub const BUTTONS_PER_WORD: usize = 32;

// =============================================================================
// WELL-KNOWN PORTS AND PAYLOADS
// =============================================================================

/// UDP port on the controller that accepts feedback commands.
pub const FEEDBACK_PORT: u16 = 50110;

/// UDP sender port on the controller; target of the firewall keepalive.
pub const CONTROLLER_PORT: u16 = 50105;

/// Fixed 10-byte keepalive marker that opens a return path through
/// stateful firewalls. No response is expected.
pub const FIREWALL_KEEPALIVE: &[u8; 10] = b"dtrack-fw\0";

// =============================================================================
// DEFAULTS
// =============================================================================

/// Default receive/send timeout in microseconds.
pub const DEFAULT_TIMEOUT_US: u64 = 1_000_000;

/// Receive buffer size; a DTRACK datagram never exceeds one UDP payload.
pub const RECV_BUFFER_SIZE: usize = 65535;

/// Number of characters of a malformed line kept for diagnostics.
pub const ERROR_EXCERPT_LEN: usize = 6;
