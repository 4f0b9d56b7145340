//! DTRACK Protocol - Transport Layer
//!
//! UDP plumbing around the parser:
//!
//! - [`DTrackSocket`]: inbound data socket with timeout-bounded and
//!   unbounded receive, plus the lazily constructed feedback channel
//! - [`CloseHandle`]: closes a socket from another task
//! - [`Received`]: outcome of one receive call
//!
//! # Concurrency contract
//!
//! A socket supports at most one pending receive, enforced by `&mut
//! self`; drive it from a single dedicated task (or thread, with a
//! current-thread runtime). Closing while a receive is pending completes
//! that receive with [`Received::Closed`]. Parsed frames are immutable
//! and `Send + Sync`, so handing them to other tasks needs no locking.

mod socket;

pub use socket::{CloseHandle, DTrackSocket, Received};
