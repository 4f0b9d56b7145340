//! UDP data socket and feedback channel.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::net::{lookup_host, UdpSocket};
use tokio::sync::Notify;
use tracing::{debug, warn};

use crate::core::constants::{
    CONTROLLER_PORT, DEFAULT_TIMEOUT_US, FEEDBACK_PORT, FIREWALL_KEEPALIVE, RECV_BUFFER_SIZE,
};
use crate::core::TransportError;

/// Outcome of one receive call.
#[derive(Debug, PartialEq, Eq)]
pub enum Received<'a> {
    /// One datagram arrived.
    Datagram(&'a [u8]),
    /// The configured timeout elapsed with no data. Not an error.
    TimedOut,
    /// The socket was closed (or never existed, for a port-0 instance).
    Closed,
}

/// Cloneable handle that closes a [`DTrackSocket`] from another task.
///
/// Closing wakes a pending receive, which then completes with
/// [`Received::Closed`] instead of blocking until its timeout.
#[derive(Debug, Clone)]
pub struct CloseHandle {
    closed: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl CloseHandle {
    /// Close the socket this handle belongs to.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        self.notify.notify_one();
    }
}

/// UDP transport for DTRACK tracking data.
///
/// Owns the inbound data socket and, once a sender has been seen, a
/// lazily constructed outbound socket for feedback commands. Neither
/// socket is safe for concurrent calls; at most one receive may be
/// pending at a time, which `&mut self` enforces.
#[derive(Debug)]
pub struct DTrackSocket {
    /// Inbound socket; `None` when the instance listens on port 0 and is
    /// a pure parser front.
    socket: Option<Arc<UdpSocket>>,
    recv_buffer: Vec<u8>,
    timeout: Duration,

    /// Most recent sender of tracking data; target host for feedback.
    peer: Option<SocketAddr>,
    /// Feedback socket, connected to `<peer ip>:50110`. Reset to `None`
    /// when construction fails, retried lazily on the next send.
    feedback: Option<UdpSocket>,

    closed: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl DTrackSocket {
    /// Bind the data socket to the given local port.
    ///
    /// Port 0 disables listening entirely; the instance then only serves
    /// as a feedback-less parser front and every receive reports
    /// [`Received::Closed`].
    pub async fn bind(port: u16) -> Result<Self, TransportError> {
        let socket = if port != 0 {
            let addr = SocketAddr::from(([0, 0, 0, 0], port));
            Some(Arc::new(
                UdpSocket::bind(addr).await.map_err(TransportError::Bind)?,
            ))
        } else {
            None
        };

        Ok(Self {
            socket,
            recv_buffer: vec![0u8; RECV_BUFFER_SIZE],
            timeout: Duration::from_micros(DEFAULT_TIMEOUT_US),
            peer: None,
            feedback: None,
            closed: Arc::new(AtomicBool::new(false)),
            notify: Arc::new(Notify::new()),
        })
    }

    /// Whether the inbound data socket exists and has not been closed.
    pub fn is_open(&self) -> bool {
        self.socket.is_some() && !self.closed.load(Ordering::SeqCst)
    }

    /// Local address of the data socket, if one exists.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.socket.as_ref()?.local_addr().ok()
    }

    /// Most recent sender of tracking data.
    pub fn peer(&self) -> Option<SocketAddr> {
        self.peer
    }

    /// Receive/send timeout in microseconds. Takes effect on the next
    /// call; there is no per-socket state to re-arm.
    pub fn set_timeout_us(&mut self, timeout_us: u64) {
        self.timeout = Duration::from_micros(timeout_us);
    }

    /// Handle for closing this socket from another task.
    pub fn close_handle(&self) -> CloseHandle {
        CloseHandle {
            closed: Arc::clone(&self.closed),
            notify: Arc::clone(&self.notify),
        }
    }

    /// Close the socket. A pending receive completes with
    /// [`Received::Closed`].
    pub fn close(&self) {
        self.close_handle().close();
    }

    /// Receive one datagram, waiting until data arrives or the socket is
    /// closed.
    pub async fn recv(&mut self) -> Result<Received<'_>, TransportError> {
        self.recv_inner(None).await
    }

    /// Receive one datagram, waiting no longer than the configured
    /// timeout.
    pub async fn recv_timeout(&mut self) -> Result<Received<'_>, TransportError> {
        self.recv_inner(Some(self.timeout)).await
    }

    async fn recv_inner(&mut self, timeout: Option<Duration>) -> Result<Received<'_>, TransportError> {
        if self.closed.load(Ordering::SeqCst) {
            return Ok(Received::Closed);
        }
        let Some(socket) = self.socket.as_ref().map(Arc::clone) else {
            return Ok(Received::Closed);
        };
        let notify = Arc::clone(&self.notify);

        let wait = async {
            tokio::select! {
                _ = notify.notified() => None,
                res = socket.recv_from(&mut self.recv_buffer) => Some(res),
            }
        };

        let outcome = match timeout {
            Some(bound) => match tokio::time::timeout(bound, wait).await {
                Ok(outcome) => outcome,
                Err(_) => return Ok(Received::TimedOut),
            },
            None => wait.await,
        };

        match outcome {
            None => Ok(Received::Closed),
            Some(Ok((len, from))) => {
                self.peer = Some(from);
                Ok(Received::Datagram(&self.recv_buffer[..len]))
            }
            Some(Err(e)) => Err(e.into()),
        }
    }

    /// Send an encoded feedback command to the controller.
    ///
    /// The feedback socket is constructed on first use, targeting the
    /// feedback port of the most recent sender, and reused afterwards. A
    /// failed send leaves the channel open for retry; a failed
    /// construction resets it so the next call retries from scratch.
    pub async fn send_feedback(&mut self, command: &[u8]) -> Result<(), TransportError> {
        let peer = self.peer.ok_or(TransportError::NoPeer)?;

        let socket = match &mut self.feedback {
            Some(socket) => socket,
            feedback => match Self::connect_feedback(peer).await {
                Ok(socket) => feedback.insert(socket),
                Err(e) => {
                    // Stays unconstructed; the next send retries from scratch.
                    warn!(%peer, "feedback channel construction failed");
                    return Err(TransportError::FeedbackSend(e));
                }
            },
        };
        match tokio::time::timeout(self.timeout, socket.send(command)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(TransportError::FeedbackSend(e)),
            Err(_) => Err(TransportError::FeedbackSend(std::io::Error::new(
                std::io::ErrorKind::TimedOut,
                "feedback send timed out",
            ))),
        }
    }

    async fn connect_feedback(peer: SocketAddr) -> std::io::Result<UdpSocket> {
        let socket = UdpSocket::bind(SocketAddr::from(([0, 0, 0, 0], 0))).await?;
        socket
            .connect(SocketAddr::new(peer.ip(), FEEDBACK_PORT))
            .await?;
        Ok(socket)
    }

    /// Send the firewall keepalive marker to the controller.
    ///
    /// Resolves `host`, picks an IPv4 address and transmits the fixed
    /// 10-byte marker to the controller's sender port from the data
    /// socket, so that stateful firewalls open a return path. Best
    /// effort; a failure disables nothing.
    pub async fn firewall_keepalive(&self, host: &str) -> Result<(), TransportError> {
        let Some(socket) = &self.socket else {
            return Err(TransportError::Closed);
        };

        let mut addrs = lookup_host((host, CONTROLLER_PORT))
            .await
            .map_err(|source| TransportError::Resolve {
                host: host.to_string(),
                source,
            })?;
        let target = addrs
            .find(|a| a.is_ipv4())
            .ok_or_else(|| TransportError::Resolve {
                host: host.to_string(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "no IPv4 address",
                ),
            })?;

        socket.send_to(FIREWALL_KEEPALIVE, target).await?;
        debug!(%target, "sent firewall keepalive");
        Ok(())
    }
}
