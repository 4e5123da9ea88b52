/**
 * Subscription Registry and Broadcast Dispatcher
 *
 * The `Hub` tracks, per topic, the set of currently-connected listeners
 * and fans mutation events out to them. One `Hub` is constructed at
 * process start, stored in `AppState`, and cloned into every handler
 * that mutates the forum - there is no global singleton.
 *
 * # Listeners
 *
 * The hub never owns a socket. A listener is represented by the sender
 * half of an unbounded mpsc channel whose receiver lives inside that
 * connection's writer task (`session` module). Pushing a frame into the
 * channel is non-blocking, so a slow or stalled client can never hold
 * up a `publish` call or the registry lock; per-listener ordering is
 * the channel's FIFO order.
 *
 * # Locking
 *
 * A single process-wide `RwLock` guards the topic map. Every critical
 * section is a short map operation; delivery happens strictly after
 * the snapshot is taken and the lock released.
 */
use crate::backend::realtime::topic::Topic;
use crate::shared::event::WsEvent;
use axum::extract::ws::{Message, Utf8Bytes};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::mpsc;

/// Identifier handed out at registration, used to address one listener.
pub type ListenerId = u64;

/// The sender half of a connection's outbound frame queue.
///
/// The receiver half is owned by the connection's writer task; when
/// that task is gone, sends fail and the hub prunes the listener.
pub type ConnectionSender = mpsc::UnboundedSender<Message>;

/// The process-wide notification hub. Cheap to clone; share freely.
#[derive(Clone)]
pub struct Hub {
    inner: Arc<HubInner>,
}

struct HubInner {
    /// topic -> (listener id -> outbound queue), sets created lazily
    topics: RwLock<HashMap<Topic, HashMap<ListenerId, ConnectionSender>>>,
    /// Monotonic listener id allocator
    next_id: AtomicU64,
}

impl Hub {
    /// Create an empty hub.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(HubInner {
                topics: RwLock::new(HashMap::new()),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// Register a listener for `topic` and return its id.
    ///
    /// The topic's membership set is created on first registration.
    pub fn register(&self, topic: Topic, sender: ConnectionSender) -> ListenerId {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let mut topics = self
            .inner
            .topics
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let members = topics.entry(topic.clone()).or_default();
        members.insert(id, sender);
        tracing::info!(
            "[Hub] listener {} joined {} (now {})",
            id,
            topic,
            members.len()
        );
        id
    }

    /// Remove a listener from `topic`.
    ///
    /// Idempotent: unregistering an id that is absent (already pruned,
    /// never registered, unregistered twice) is a no-op.
    pub fn unregister(&self, topic: &Topic, id: ListenerId) {
        let mut topics = self
            .inner
            .topics
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(members) = topics.get_mut(topic) {
            if members.remove(&id).is_some() {
                tracing::info!(
                    "[Hub] listener {} left {} (remaining {})",
                    id,
                    topic,
                    members.len()
                );
            }
            if members.is_empty() {
                topics.remove(topic);
            }
        }
    }

    /// Snapshot the current membership of `topic`.
    ///
    /// An unknown topic yields an empty vec, never an error. The
    /// returned senders are clones; the lock is released before the
    /// caller touches any of them.
    pub fn members_of(&self, topic: &Topic) -> Vec<(ListenerId, ConnectionSender)> {
        let topics = self
            .inner
            .topics
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        topics
            .get(topic)
            .map(|members| {
                members
                    .iter()
                    .map(|(id, tx)| (*id, tx.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Deliver `event` to every current listener of `topic`.
    ///
    /// Fire-and-forget: serialization happens once, delivery to each
    /// listener is attempted independently, and a failed delivery tears
    /// down that one listener without affecting the rest. Never returns
    /// an error - the store already holds the authoritative state and
    /// notification is best-effort.
    pub fn publish(&self, topic: &Topic, event: &WsEvent) {
        let payload: Utf8Bytes = match serde_json::to_string(event) {
            Ok(text) => text.into(),
            Err(e) => {
                // Should not happen for well-formed events; drop this
                // publish only.
                tracing::error!("[Hub] failed to serialize event for {}: {}", topic, e);
                return;
            }
        };

        let members = self.members_of(topic);
        if members.is_empty() {
            tracing::trace!("[Hub] no listeners on {}, skipping publish", topic);
            return;
        }

        let mut dead = Vec::new();
        for (id, tx) in &members {
            // send() only fails when the connection's writer task is
            // gone, i.e. the client disconnected.
            if tx.send(Message::Text(payload.clone())).is_err() {
                dead.push(*id);
            }
        }

        tracing::debug!(
            "[Hub] published {:?} to {} ({} listeners, {} dead)",
            event.kind,
            topic,
            members.len(),
            dead.len()
        );

        for id in dead {
            tracing::warn!("[Hub] pruning dead listener {} on {}", id, topic);
            self.unregister(topic, id);
        }
    }
}

impl Default for Hub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::unbounded_channel;

    fn text_of(msg: Message) -> String {
        match msg {
            Message::Text(text) => text.as_str().to_string(),
            other => panic!("expected text frame, got {:?}", other),
        }
    }

    #[test]
    fn test_register_then_unregister_removes_member() {
        let hub = Hub::new();
        let topic = Topic::Thread(7);
        let (tx, _rx) = unbounded_channel();

        let id = hub.register(topic.clone(), tx);
        assert_eq!(hub.members_of(&topic).len(), 1);

        hub.unregister(&topic, id);
        assert!(hub.members_of(&topic).is_empty());
    }

    #[test]
    fn test_unregister_non_member_is_noop() {
        let hub = Hub::new();
        let topic = Topic::Board("b".to_string());

        // Unknown topic, then unknown id on a known topic.
        hub.unregister(&topic, 99);

        let (tx, _rx) = unbounded_channel();
        let id = hub.register(topic.clone(), tx);
        hub.unregister(&topic, id + 1);
        assert_eq!(hub.members_of(&topic).len(), 1);

        // Double unregister.
        hub.unregister(&topic, id);
        hub.unregister(&topic, id);
        assert!(hub.members_of(&topic).is_empty());
    }

    #[test]
    fn test_members_of_unknown_topic_is_empty() {
        let hub = Hub::new();
        assert!(hub.members_of(&Topic::Home).is_empty());
    }

    #[test]
    fn test_topics_are_isolated() {
        let hub = Hub::new();
        let (tx, _rx) = unbounded_channel();
        hub.register(Topic::Thread(1), tx);
        assert!(hub.members_of(&Topic::Thread(2)).is_empty());
        assert!(hub.members_of(&Topic::Board("1".to_string())).is_empty());
    }

    #[tokio::test]
    async fn test_publish_delivers_identical_payload_to_all() {
        let hub = Hub::new();
        let topic = Topic::Thread(7);
        let (tx_a, mut rx_a) = unbounded_channel();
        let (tx_b, mut rx_b) = unbounded_channel();
        hub.register(topic.clone(), tx_a);
        hub.register(topic.clone(), tx_b);

        hub.publish(&topic, &WsEvent::thread_updated(7, "b"));

        let a = text_of(rx_a.recv().await.unwrap());
        let b = text_of(rx_b.recv().await.unwrap());
        assert_eq!(a, b);
        let value: serde_json::Value = serde_json::from_str(&a).unwrap();
        assert_eq!(value["type"], "thread_updated");
    }

    #[tokio::test]
    async fn test_publish_to_empty_topic_is_noop() {
        let hub = Hub::new();
        // No listeners registered anywhere; must not panic or error.
        hub.publish(&Topic::Thread(1), &WsEvent::thread_updated(1, "b"));
    }

    #[tokio::test]
    async fn test_dead_listener_is_pruned_and_rest_still_receive() {
        let hub = Hub::new();
        let topic = Topic::Thread(7);
        let (tx_dead, rx_dead) = unbounded_channel();
        let (tx_live, mut rx_live) = unbounded_channel();
        hub.register(topic.clone(), tx_dead);
        hub.register(topic.clone(), tx_live);

        // Simulate a disconnected client: its writer task (receiver) is gone.
        drop(rx_dead);

        hub.publish(&topic, &WsEvent::thread_updated(7, "b"));

        assert!(rx_live.recv().await.is_some());
        assert_eq!(hub.members_of(&topic).len(), 1);
    }

    #[tokio::test]
    async fn test_per_listener_ordering_follows_publish_order() {
        let hub = Hub::new();
        let topic = Topic::Board("b".to_string());
        let (tx, mut rx) = unbounded_channel();
        hub.register(topic.clone(), tx);

        hub.publish(&topic, &WsEvent::new_thread(1, "b"));
        hub.publish(&topic, &WsEvent::thread_updated(1, "b"));
        hub.publish(&topic, &WsEvent::new_thread(2, "b"));

        let kinds: Vec<String> = [
            rx.recv().await.unwrap(),
            rx.recv().await.unwrap(),
            rx.recv().await.unwrap(),
        ]
        .into_iter()
        .map(|msg| {
            let value: serde_json::Value =
                serde_json::from_str(&text_of(msg)).unwrap();
            value["type"].as_str().unwrap().to_string()
        })
        .collect();
        assert_eq!(kinds, ["new_thread", "thread_updated", "new_thread"]);
    }
}
