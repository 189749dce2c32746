//! Topic-keyed broadcast hub.
//!
//! [`ChatHub`] keeps one `tokio::sync::broadcast` channel per topic. It is
//! shared via `Arc<ChatHub<T>>` across every WebSocket connection.

use std::collections::HashMap;

use tokio::sync::{broadcast, RwLock};

/// Default buffer capacity for each topic channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out hub with one channel per topic.
///
/// When a topic buffer is full the oldest messages are dropped and slow
/// receivers observe `RecvError::Lagged`.
pub struct ChatHub<T> {
    capacity: usize,
    topics: RwLock<HashMap<String, broadcast::Sender<T>>>,
}

impl<T: Clone + Send + 'static> ChatHub<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            topics: RwLock::new(HashMap::new()),
        }
    }

    /// Publish `message` on `topic`, returning how many receivers got it.
    ///
    /// Topics nobody subscribed to are ignored.
    pub async fn publish(&self, topic: &str, message: T) -> usize {
        let topics = self.topics.read().await;
        match topics.get(topic) {
            Some(sender) => sender.send(message).unwrap_or(0),
            None => 0,
        }
    }

    /// Subscribe to `topic`, creating its channel on first use.
    pub async fn subscribe(&self, topic: &str) -> broadcast::Receiver<T> {
        if let Some(sender) = self.topics.read().await.get(topic) {
            return sender.subscribe();
        }

        let mut topics = self.topics.write().await;
        topics
            .entry(topic.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .subscribe()
    }

    /// Drop channels that no longer have receivers. Returns how many were
    /// removed.
    pub async fn prune(&self) -> usize {
        let mut topics = self.topics.write().await;
        let before = topics.len();
        topics.retain(|_, sender| sender.receiver_count() > 0);
        let removed = before - topics.len();
        if removed > 0 {
            tracing::debug!(removed, remaining = topics.len(), "Pruned idle chat topics");
        }
        removed
    }

    /// Number of topics with a live channel.
    pub async fn topic_count(&self) -> usize {
        self.topics.read().await.len()
    }
}

impl<T: Clone + Send + 'static> Default for ChatHub<T> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_without_subscribers_is_dropped() {
        let hub: ChatHub<String> = ChatHub::default();
        assert_eq!(hub.publish("chat:user:1", "hi".into()).await, 0);
        assert_eq!(hub.topic_count().await, 0);
    }

    #[tokio::test]
    async fn subscribers_on_same_topic_all_receive() {
        let hub: ChatHub<String> = ChatHub::default();
        let mut a = hub.subscribe("chat:user:1").await;
        let mut b = hub.subscribe("chat:user:1").await;

        assert_eq!(hub.publish("chat:user:1", "hello".into()).await, 2);
        assert_eq!(a.recv().await.unwrap(), "hello");
        assert_eq!(b.recv().await.unwrap(), "hello");
        assert_eq!(hub.topic_count().await, 1);
    }

    #[tokio::test]
    async fn topics_are_isolated() {
        let hub: ChatHub<String> = ChatHub::default();
        let mut one = hub.subscribe("chat:user:1").await;
        let _two = hub.subscribe("chat:user:2").await;

        hub.publish("chat:user:2", "other".into()).await;
        hub.publish("chat:user:1", "mine".into()).await;

        assert_eq!(one.recv().await.unwrap(), "mine");
    }

    #[tokio::test]
    async fn messages_arrive_in_publish_order() {
        let hub: ChatHub<u32> = ChatHub::default();
        let mut rx = hub.subscribe("t").await;
        for i in 0..5 {
            hub.publish("t", i).await;
        }
        for i in 0..5 {
            assert_eq!(rx.recv().await.unwrap(), i);
        }
    }

    #[tokio::test]
    async fn slow_receiver_observes_lag() {
        let hub: ChatHub<u32> = ChatHub::new(2);
        let mut rx = hub.subscribe("t").await;
        for i in 0..4 {
            hub.publish("t", i).await;
        }
        assert!(matches!(
            rx.recv().await,
            Err(broadcast::error::RecvError::Lagged(2))
        ));
        assert_eq!(rx.recv().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn prune_drops_topics_without_receivers() {
        let hub: ChatHub<String> = ChatHub::default();
        let rx = hub.subscribe("gone").await;
        let _kept = hub.subscribe("kept").await;
        drop(rx);

        assert_eq!(hub.prune().await, 1);
        assert_eq!(hub.topic_count().await, 1);
        assert_eq!(hub.publish("gone", "x".into()).await, 0);
    }
}
