//! DTRACK Protocol - Client API
//!
//! [`DTrackClient`] ties the transport and the parser together: one call
//! receives a datagram and replaces the current frame, mirroring the
//! receive loop of the reference SDKs. Errors are surfaced through a
//! boolean success flag plus a last-error accessor rather than bubbling
//! out of the loop, so a receive loop stays a two-line body.

use tracing::debug;

use crate::core::TransportError;
use crate::model::Frame;
use crate::parser::Parser;
use crate::transport::{CloseHandle, DTrackSocket, Received};
use crate::{feedback, ParseError};

/// High-level DTRACK client: socket, parser and current frame.
///
/// Construction never fails: if the data socket cannot be bound (port
/// already in use), the client comes up with the data interface disabled
/// and every receive reports no data; the bind error is kept in
/// `last_error`. Listening on port 0 is the supported way to run a pure
/// parser instance.
#[derive(Debug)]
pub struct DTrackClient {
    socket: Option<DTrackSocket>,
    parser: Parser,
    port: u16,
    frame: Option<Frame>,
    raw: Option<String>,
    last_error: String,
}

impl DTrackClient {
    /// Create a client listening on the given UDP port.
    pub async fn new(port: u16) -> Self {
        let (socket, last_error) = match DTrackSocket::bind(port).await {
            Ok(socket) => (Some(socket), String::new()),
            Err(e) => (None, e.to_string()),
        };
        Self {
            socket,
            parser: Parser::new(),
            port,
            frame: None,
            raw: None,
            last_error,
        }
    }

    /// Whether the UDP socket is open to receive tracking data.
    ///
    /// Needed to receive DTRACK data, but no guarantee any controller is
    /// actually sending to this port.
    pub fn is_data_interface_valid(&self) -> bool {
        self.socket.as_ref().is_some_and(|s| s.is_open())
    }

    /// UDP port the client listens on.
    pub fn data_port(&self) -> u16 {
        self.port
    }

    /// Set the receive/send timeout in microseconds.
    pub fn set_timeout_us(&mut self, timeout_us: u64) {
        if let Some(socket) = &mut self.socket {
            socket.set_timeout_us(timeout_us);
        }
    }

    /// Handle for closing the client's socket from another task.
    pub fn close_handle(&self) -> Option<CloseHandle> {
        self.socket.as_ref().map(|s| s.close_handle())
    }

    /// Receive and process one tracking data packet.
    ///
    /// Waits until a datagram becomes available, but no longer than the
    /// configured timeout. On success the new frame replaces the
    /// previous one; on any failure (including timeout) the previous
    /// frame is discarded and `false` is returned. A timeout is silent;
    /// a closed socket additionally records the close in `last_error`.
    pub async fn receive(&mut self) -> bool {
        self.frame = None;
        self.raw = None;

        // Detach the datagram from the socket's receive buffer before
        // touching any other client state.
        let received: Result<Option<Vec<u8>>, TransportError> = match &mut self.socket {
            None => Ok(None),
            Some(socket) => match socket.recv_timeout().await {
                Ok(Received::Datagram(data)) => Ok(Some(data.to_vec())),
                Ok(Received::TimedOut) => Ok(None),
                // Close is a deliberate end of the transport, not "no
                // data yet"; callers see it in `last_error`.
                Ok(Received::Closed) => Err(TransportError::Closed),
                Err(e) => Err(e),
            },
        };

        let data = match received {
            Ok(Some(data)) => data,
            Ok(None) => return false,
            Err(e) => {
                self.last_error = e.to_string();
                return false;
            }
        };

        let text = match String::from_utf8(data) {
            Ok(text) => text,
            Err(_) => {
                self.last_error = ParseError::NotAscii.to_string();
                return false;
            }
        };

        let frame = self.parser.parse(&text);
        if let Some(err) = self.parser.errors().first() {
            self.last_error = err.to_string();
        }
        debug!(frame_counter = frame.frame_counter, "received frame");
        self.raw = Some(text);
        self.frame = Some(frame);
        true
    }

    /// Current frame of tracking data, if the last receive succeeded.
    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    /// Raw text of the most recently received datagram.
    pub fn raw_buffer(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// Parse errors recorded for the most recently received datagram.
    pub fn parse_errors(&self) -> &[ParseError] {
        self.parser.errors()
    }

    /// Last error message.
    pub fn last_error(&self) -> &str {
        &self.last_error
    }

    /// Open a UDP path through a stateful firewall towards the
    /// controller. Best effort; returns whether the keepalive was sent.
    pub async fn enable_stateful_firewall_connection(&mut self, host: &str) -> bool {
        let Some(socket) = &self.socket else {
            return false;
        };
        match socket.firewall_keepalive(host).await {
            Ok(()) => true,
            Err(e) => {
                self.last_error = e.to_string();
                false
            }
        }
    }

    /// Send tactile feedback to a fingertracking hand; one strength in
    /// `[0.0, 1.0]` per finger.
    pub async fn tactile_feedback(&mut self, hand_id: i32, strengths: &[f32]) -> bool {
        self.send_command(&feedback::tactile(hand_id, strengths))
            .await
    }

    /// Stop tactile feedback on every finger of a hand.
    pub async fn tactile_feedback_stop(&mut self, hand_id: i32, num_fingers: usize) -> bool {
        self.send_command(&feedback::tactile_stop(hand_id, num_fingers))
            .await
    }

    /// Let a Flystick beep.
    pub async fn flystick_beep(&mut self, id: i32, duration_ms: f32, frequency_hz: f32) -> bool {
        self.send_command(&feedback::flystick_beep(id, duration_ms, frequency_hz))
            .await
    }

    /// Let a Flystick vibrate with a device-defined pattern.
    pub async fn flystick_vibrate(&mut self, id: i32, pattern: u32) -> bool {
        self.send_command(&feedback::flystick_vibrate(id, pattern))
            .await
    }

    async fn send_command(&mut self, command: &[u8]) -> bool {
        let Some(socket) = &mut self.socket else {
            self.last_error = TransportError::Closed.to_string();
            return false;
        };
        match socket.send_feedback(command).await {
            Ok(()) => true,
            Err(e) => {
                self.last_error = e.to_string();
                false
            }
        }
    }
}
