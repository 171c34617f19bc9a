//! Lock-guarded set of live connections with atomic broadcast.

use std::collections::HashMap;

use tokio::sync::Mutex;

use crate::domain::{ConnectionChannel, ConnectionId};

/// Notice broadcast after a connection is registered
pub fn joined_notice(count: usize) -> String {
    format!("New user joined: {} users connected", count)
}

/// Notice broadcast after a connection is unregistered
pub fn left_notice(count: usize) -> String {
    format!("User left: {} users remaining", count)
}

/// Set of currently open connections.
///
/// Every mutation and every broadcast runs under the same lock, so a broadcast
/// reaches exactly the members present when it took the lock. Sends never wait
/// on a slow peer: a member whose bounded outbound queue is full or closed is
/// dropped and announced as having left.
///
/// ## 使用例
///
/// ```ignore
/// let registry = ConnectionRegistry::new();
/// let (tx, rx) = mpsc::channel(OUTBOUND_QUEUE_CAPACITY);
/// let id = ConnectionId::generate();
///
/// registry.register(id, tx).await;           // "New user joined: 1 users connected"
/// registry.broadcast("Received message: hi").await;
/// registry.unregister(&id).await;            // "User left: 0 users remaining"
/// ```
#[derive(Default)]
pub struct ConnectionRegistry {
    connections: Mutex<HashMap<ConnectionId, ConnectionChannel>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection and announce the new member count.
    ///
    /// Returns the member count after the insertion.
    pub async fn register(&self, id: ConnectionId, channel: ConnectionChannel) -> usize {
        let mut connections = self.connections.lock().await;

        if connections.insert(id, channel).is_some() {
            tracing::warn!("Connection '{}' was already registered, channel replaced", id);
        }
        let count = connections.len();
        tracing::debug!("Connection '{}' registered ({} connected)", id, count);

        deliver(&mut connections, &joined_notice(count));
        count
    }

    /// Remove a connection and announce the remaining member count.
    ///
    /// Removing a connection that is not registered does nothing and returns `None`.
    pub async fn unregister(&self, id: &ConnectionId) -> Option<usize> {
        let mut connections = self.connections.lock().await;

        if connections.remove(id).is_none() {
            tracing::debug!("Connection '{}' already unregistered, skipping", id);
            return None;
        }
        let count = connections.len();
        tracing::debug!("Connection '{}' unregistered ({} remaining)", id, count);

        deliver(&mut connections, &left_notice(count));
        Some(count)
    }

    /// Deliver `text` to every registered connection.
    ///
    /// Returns how many connections accepted the message.
    pub async fn broadcast(&self, text: &str) -> usize {
        let mut connections = self.connections.lock().await;
        if connections.is_empty() {
            return 0;
        }
        deliver(&mut connections, text)
    }

    /// Deliver `text` to a single connection only.
    ///
    /// Returns `false` if the connection is not registered or its queue is full or closed.
    pub async fn send_to(&self, id: &ConnectionId, text: &str) -> bool {
        let mut connections = self.connections.lock().await;

        let Some(channel) = connections.get(id) else {
            tracing::debug!("Connection '{}' not registered, reply dropped", id);
            return false;
        };
        let Err(e) = channel.try_send(text.to_string()) else {
            return true;
        };

        tracing::warn!("Failed to push reply to connection '{}', dropping it: {}", id, e);
        connections.remove(id);
        let count = connections.len();
        deliver(&mut connections, &left_notice(count));
        false
    }

    pub async fn len(&self) -> usize {
        self.connections.lock().await.len()
    }
}

/// Send `message` to all members; drop members whose queue is full or closed and
/// announce each drop to the rest. Returns the number of members reached by
/// `message` itself.
fn deliver(connections: &mut HashMap<ConnectionId, ConnectionChannel>, message: &str) -> usize {
    let (delivered, mut failed) = send_all(connections, message);

    // Each round removes at least one member, so this terminates.
    while !failed.is_empty() {
        let mut notices = Vec::with_capacity(failed.len());
        for id in failed.drain(..) {
            if connections.remove(&id).is_some() {
                tracing::warn!("Connection '{}' dropped after failed push", id);
                notices.push(left_notice(connections.len()));
            }
        }
        for notice in notices {
            let (_, more) = send_all(connections, &notice);
            failed.extend(more);
        }
    }

    delivered
}

fn send_all(
    connections: &HashMap<ConnectionId, ConnectionChannel>,
    message: &str,
) -> (usize, Vec<ConnectionId>) {
    let mut delivered = 0;
    let mut failed = Vec::new();

    for (id, channel) in connections {
        // ブロードキャストでは一部の送信失敗を許容
        match channel.try_send(message.to_string()) {
            Ok(()) => delivered += 1,
            Err(e) => {
                tracing::warn!("Failed to push message to connection '{}': {}", id, e);
                failed.push(*id);
            }
        }
    }

    (delivered, failed)
}
