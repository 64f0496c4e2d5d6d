// Observer Pattern - direct dispatch and broadcast channel
// WeatherData calls every registered observer in registration order;
// BroadcastWeatherData publishes a typed Reading that each subscriber drains.

pub mod broadcast;
pub mod channel;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, trace};

// ============================================================================
// Payload
// ============================================================================

/// One weather measurement. This is the whole payload of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Reading {
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
}

impl Reading {
    pub const fn new(temperature: f64, humidity: f64, pressure: f64) -> Self {
        Self {
            temperature,
            humidity,
            pressure,
        }
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "temperature = {:.1}, humidity = {:.1}, pressure = {:.1}",
            self.temperature, self.humidity, self.pressure
        )
    }
}

// ============================================================================
// Observer / Observable
// ============================================================================

pub trait Observer {
    fn update(&mut self, reading: &Reading);
}

/// Shared handle to a registered observer. Identity is the allocation.
pub type SharedObserver = Arc<Mutex<dyn Observer + Send>>;

pub trait Observable {
    fn register(&mut self, observer: SharedObserver);
    fn remove(&mut self, observer: &SharedObserver);
    fn notify_observers(&self);
}

/// True when both handles point at the same observer.
pub fn same_observer(a: &SharedObserver, b: &SharedObserver) -> bool {
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}

// A panicking observer must not stop delivery to the others.
fn lock_observer(observer: &SharedObserver) -> MutexGuard<'_, dyn Observer + Send + 'static> {
    observer.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Concrete Observable
// ============================================================================

#[derive(Default)]
pub struct WeatherData {
    observers: Vec<SharedObserver>,
    reading: Reading,
}

impl WeatherData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the new measurement and notifies every observer synchronously.
    pub fn setup(&mut self, reading: Reading) {
        self.reading = reading;
        self.notify_observers();
    }

    pub fn reading(&self) -> Reading {
        self.reading
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn is_registered(&self, observer: &SharedObserver) -> bool {
        self.observers.iter().any(|o| same_observer(o, observer))
    }
}

impl Observable for WeatherData {
    /// Appends without a duplicate check: a handle registered twice is
    /// notified twice per update.
    fn register(&mut self, observer: SharedObserver) {
        self.observers.push(observer);
        debug!(observers = self.observers.len(), "observer registered");
    }

    fn remove(&mut self, observer: &SharedObserver) {
        if let Some(index) = self.observers.iter().position(|o| same_observer(o, observer)) {
            self.observers.remove(index);
            debug!(observers = self.observers.len(), "observer removed");
        }
    }

    fn notify_observers(&self) {
        for (position, observer) in self.observers.iter().enumerate() {
            trace!(position, reading = %self.reading, "delivering update");
            lock_observer(observer).update(&self.reading);
        }
    }
}

impl fmt::Debug for WeatherData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherData")
            .field("observers", &self.observers.len())
            .field("reading", &self.reading)
            .finish()
    }
}

// ============================================================================
// Concrete Observer
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct CurrentConditionsDisplay {
    name: String,
    last: Option<Reading>,
    updates: usize,
}

impl CurrentConditionsDisplay {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            last: None,
            updates: 0,
        }
    }

    /// Creates a display and registers it with `subject` in one step.
    pub fn attach(
        name: impl Into<String>,
        subject: &mut WeatherData,
    ) -> Arc<Mutex<CurrentConditionsDisplay>> {
        let display = Arc::new(Mutex::new(Self::new(name)));
        subject.register(display.clone());
        display
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn last_reading(&self) -> Option<Reading> {
        self.last
    }

    pub fn update_count(&self) -> usize {
        self.updates
    }

    pub fn display(&self) -> String {
        match &self.last {
            Some(reading) => format!("[{}] {}", self.name, reading),
            None => format!("[{}] no data yet", self.name),
        }
    }
}

impl Observer for CurrentConditionsDisplay {
    fn update(&mut self, reading: &Reading) {
        self.last = Some(*reading);
        self.updates += 1;
        println!("{}", self.display());
    }
}

// ============================================================================
// Tests
// ============================================================================
