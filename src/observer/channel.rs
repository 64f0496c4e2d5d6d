// Named publish/subscribe channel with a typed payload.
// Every subscriber owns an unbounded queue. One subscriber sees messages in
// publish order; there is no ordering between subscribers, each processes its
// queue whenever it drains it, possibly on another thread.

use crossbeam::channel::{self, Receiver, Sender};
use std::fmt;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Receiving end handed out by [`Channel::subscribe`].
#[derive(Debug)]
pub struct Subscription<M> {
    id: SubscriptionId,
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Next queued message, without blocking.
    pub fn try_next(&self) -> Option<M> {
        self.receiver.try_recv().ok()
    }

    /// Blocks until a message arrives. `None` once the subscription was
    /// removed from its channel (or the channel dropped) and the queue is empty.
    pub fn recv(&self) -> Option<M> {
        self.receiver.recv().ok()
    }

    pub fn drain(&self) -> impl Iterator<Item = M> + '_ {
        self.receiver.try_iter()
    }

    pub fn pending(&self) -> usize {
        self.receiver.len()
    }
}

pub struct Channel<M> {
    name: String,
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Sender<M>)>,
}

impl<M: Clone> Channel<M> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            next_id: 0,
            subscribers: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn subscribe(&mut self) -> Subscription<M> {
        let (tx, rx) = channel::unbounded();
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, tx));
        debug!(channel = %self.name, %id, "subscribed");
        Subscription { id, receiver: rx }
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        match self.subscribers.iter().position(|(sub, _)| *sub == id) {
            Some(index) => {
                self.subscribers.remove(index);
                debug!(channel = %self.name, %id, "unsubscribed");
                true
            }
            None => false,
        }
    }

    /// Sends a copy of `message` to every subscriber and returns how many
    /// accepted it. Subscribers whose [`Subscription`] was dropped are pruned.
    pub fn publish(&mut self, message: M) -> usize {
        let before = self.subscribers.len();
        self.subscribers.retain(|(id, tx)| {
            trace!(%id, "publishing");
            tx.send(message.clone()).is_ok()
        });

        let pruned = before - self.subscribers.len();
        if pruned > 0 {
            debug!(channel = %self.name, pruned, "dropped closed subscribers");
        }
        self.subscribers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<M> fmt::Debug for Channel<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("name", &self.name)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_publish_reaches_every_subscriber() {
        let mut channel = Channel::new("numbers");
        let first = channel.subscribe();
        let second = channel.subscribe();

        assert_eq!(channel.publish(1), 2);
        assert_eq!(channel.publish(2), 2);

        assert_eq!(first.drain().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(second.drain().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let mut channel = Channel::new("numbers");
        let sub = channel.subscribe();
        channel.publish(1);

        assert!(channel.unsubscribe(sub.id()));
        assert!(!channel.unsubscribe(sub.id()));
        assert_eq!(channel.publish(2), 0);

        assert_eq!(sub.drain().collect::<Vec<_>>(), vec![1]);
        assert_eq!(sub.recv(), None);
    }

    #[test]
    fn test_dropped_subscription_is_pruned() {
        let mut channel = Channel::new("numbers");
        let kept = channel.subscribe();
        drop(channel.subscribe());

        assert_eq!(channel.subscriber_count(), 2);
        assert_eq!(channel.publish(7), 1);
        assert_eq!(channel.subscriber_count(), 1);
        assert_eq!(kept.try_next(), Some(7));
    }

    #[test]
    fn test_subscription_ids_are_unique() {
        let mut channel: Channel<u8> = Channel::new("ids");
        let a = channel.subscribe();
        let b = channel.subscribe();
        channel.unsubscribe(a.id());
        let c = channel.subscribe();

        assert_ne!(a.id(), b.id());
        assert_ne!(a.id(), c.id());
        assert_ne!(b.id(), c.id());
    }

    #[test]
    fn test_subscriber_on_other_thread() {
        let mut channel = Channel::new("threads");
        let sub = channel.subscribe();
        let pending_before = sub.pending();

        let handle = thread::spawn(move || {
            let mut seen = Vec::new();
            while let Some(value) = sub.recv() {
                seen.push(value);
            }
            seen
        });

        channel.publish("a");
        channel.publish("b");
        drop(channel);

        assert_eq!(pending_before, 0);
        assert_eq!(handle.join().unwrap(), vec!["a", "b"]);
    }
}
