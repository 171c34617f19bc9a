//! Connection registry.
//!
//! Connections are created by the UI layer (`ui/handler/websocket.rs`), which
//! hands the registry the sending half of each connection's outbound channel.
//! The registry owns membership and fan-out; the UI layer owns the socket.

mod connection_registry;

pub use connection_registry::{ConnectionRegistry, joined_notice, left_notice};
