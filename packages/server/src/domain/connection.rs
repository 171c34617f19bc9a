//! Connection handle.

use std::fmt;

use tokio::sync::mpsc;
use uuid::Uuid;

/// Messages that may wait in one connection's outbound queue.
///
/// A connection whose queue is full when a message arrives is dropped.
pub const OUTBOUND_QUEUE_CAPACITY: usize = 256;

/// Outbound channel of one connection.
///
/// The UI layer owns the receiving half and forwards every message to the socket.
pub type ConnectionChannel = mpsc::Sender<String>;

/// Opaque identity of one client's duplex channel.
///
/// Two handles are equal only if they were produced by the same `generate` call,
/// never because two clients look alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Generate a fresh, unique connection handle
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
