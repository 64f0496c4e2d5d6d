// Observer via a broadcast channel: the subject only knows the channel,
// each display owns its subscription and pulls readings when pumped.

use super::channel::{Channel, Subscription, SubscriptionId};
use super::{CurrentConditionsDisplay, Observer, Reading};
use tracing::debug;

pub const DATA_UPDATED: &str = "weather.data-updated";

#[derive(Debug)]
pub struct BroadcastWeatherData {
    channel: Channel<Reading>,
    reading: Reading,
}

impl BroadcastWeatherData {
    pub fn new() -> Self {
        Self {
            channel: Channel::new(DATA_UPDATED),
            reading: Reading::default(),
        }
    }

    pub fn register(&mut self) -> Subscription<Reading> {
        self.channel.subscribe()
    }

    pub fn remove(&mut self, id: SubscriptionId) -> bool {
        self.channel.unsubscribe(id)
    }

    /// Stores the new measurement and publishes it. Returns the number of
    /// subscribers it was delivered to.
    pub fn setup(&mut self, reading: Reading) -> usize {
        self.reading = reading;
        self.notify_observers()
    }

    pub fn notify_observers(&mut self) -> usize {
        let delivered = self.channel.publish(self.reading);
        debug!(channel = DATA_UPDATED, delivered, "reading published");
        delivered
    }

    pub fn reading(&self) -> Reading {
        self.reading
    }

    pub fn observer_count(&self) -> usize {
        self.channel.subscriber_count()
    }

    pub fn channel_name(&self) -> &str {
        self.channel.name()
    }
}

impl Default for BroadcastWeatherData {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct ChannelDisplay {
    subscription: Subscription<Reading>,
    display: CurrentConditionsDisplay,
}

impl ChannelDisplay {
    pub fn attach(name: impl Into<String>, subject: &mut BroadcastWeatherData) -> Self {
        Self {
            subscription: subject.register(),
            display: CurrentConditionsDisplay::new(name),
        }
    }

    pub fn detach(&self, subject: &mut BroadcastWeatherData) -> bool {
        subject.remove(self.subscription.id())
    }

    pub fn id(&self) -> SubscriptionId {
        self.subscription.id()
    }

    /// Feeds every queued reading through [`Observer::update`].
    pub fn pump(&mut self) -> usize {
        let mut processed = 0;
        while let Some(reading) = self.subscription.try_next() {
            self.update(&reading);
            processed += 1;
        }
        processed
    }

    pub fn last_reading(&self) -> Option<Reading> {
        self.display.last_reading()
    }

    pub fn update_count(&self) -> usize {
        self.display.update_count()
    }

    pub fn display(&self) -> String {
        self.display.display()
    }
}

impl Observer for ChannelDisplay {
    fn update(&mut self, reading: &Reading) {
        self.display.update(reading);
    }
}
