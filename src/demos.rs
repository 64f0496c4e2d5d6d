// Print-driven sample runs for every pattern in the catalog.
// Each run returns a summary so the narrative can be checked in tests.

use crate::config::{DemoConfig, FlyweightConfig, SingletonConfig};
use crate::flyweight::{CharacterCode, GlyphFactory};
use crate::observer::broadcast::{BroadcastWeatherData, ChannelDisplay};
use crate::observer::{CurrentConditionsDisplay, Reading, WeatherData};
use crate::singleton::SharedInstance;
use colored::Colorize;
use rayon::prelude::*;
use std::collections::HashSet;
use std::sync::{Arc, PoisonError};
use tracing::info;
use uuid::Uuid;

// ============================================================================
// Creational: Shared Instance
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingletonSummary {
    pub workers: usize,
    pub init_runs: usize,
    pub all_same_instance: bool,
}

/// Every worker asks `shared` for the glyph factory and uses it once.
pub fn run_singleton(
    config: &SingletonConfig,
    shared: &SharedInstance<GlyphFactory>,
) -> SingletonSummary {
    let handles: Vec<Arc<GlyphFactory>> = (0..config.workers)
        .into_par_iter()
        .map(|worker| {
            let factory = shared.get_or_init(|| {
                println!("Worker {worker}: creating the shared glyph factory");
                GlyphFactory::new()
            });
            let code = (worker % 3) as CharacterCode + 1;
            if let Some(glyph) = factory.get(code) {
                println!("Worker {worker}: got {}", glyph.symbol());
            }
            factory
        })
        .collect();

    let all_same_instance = handles.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1]));
    println!(
        "{} workers, initialiser ran {} time(s), same instance everywhere: {}",
        config.workers,
        shared.init_count(),
        all_same_instance
    );

    SingletonSummary {
        workers: config.workers,
        init_runs: shared.init_count(),
        all_same_instance,
    }
}

// ============================================================================
// Structural: Flyweight
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlyweightSummary {
    pub lookups: usize,
    pub found: usize,
    pub unique_ids: usize,
    pub cached: usize,
}

pub fn run_flyweight(config: &FlyweightConfig, factory: &GlyphFactory) -> FlyweightSummary {
    let mut ids: HashSet<Uuid> = HashSet::new();
    let mut lookups = 0;
    let mut found = 0;

    for _ in 0..config.rounds {
        for &code in &config.codes {
            lookups += 1;
            if let Some(glyph) = factory.get(code) {
                println!("{glyph}");
                ids.insert(glyph.id());
                found += 1;
            }
        }
    }

    println!("Unique identity tokens = {}", ids.len());
    FlyweightSummary {
        lookups,
        found,
        unique_ids: ids.len(),
        cached: factory.len(),
    }
}

// ============================================================================
// Behavioral: Observer
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ObserverSummary {
    pub direct_updates: usize,
    pub broadcast_updates: usize,
    pub last_reading: Option<Reading>,
}

pub fn run_observer(readings: &[Reading]) -> ObserverSummary {
    println!("{}", "--- Custom Observer ---".bold());
    let mut weather = WeatherData::new();
    let display = CurrentConditionsDisplay::attach("current", &mut weather);
    for reading in readings {
        weather.setup(*reading);
    }

    println!("{}", "--- Observer via Broadcast Channel ---".bold());
    let mut station = BroadcastWeatherData::new();
    let mut channel_display = ChannelDisplay::attach("broadcast", &mut station);
    let mut broadcast_updates = 0;
    for reading in readings {
        station.setup(*reading);
        broadcast_updates += channel_display.pump();
    }
    println!("Broadcast display after {broadcast_updates} update(s): {}", channel_display.display());

    let display = display.lock().unwrap_or_else(PoisonError::into_inner);
    println!("Display '{}' received {} update(s)", display.name(), display.update_count());
    ObserverSummary {
        direct_updates: display.update_count(),
        broadcast_updates,
        last_reading: display.last_reading(),
    }
}

// ============================================================================
// Runner
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSummary {
    pub singleton: SingletonSummary,
    pub flyweight: FlyweightSummary,
    pub observer: ObserverSummary,
}

fn group_banner(title: &str) {
    println!("{}", format!("========================= {title} =========================").cyan().bold());
}

fn pattern_banner(title: &str) {
    println!("{}", format!("-------------------- {title} --------------------").yellow());
}

/// Runs creational, structural then behavioral demos.
pub fn run_all(config: &DemoConfig) -> CatalogSummary {
    group_banner("CREATIONAL PATTERNS");
    pattern_banner("Singleton");
    let shared_factory = SharedInstance::new();
    let singleton = run_singleton(&config.singleton, &shared_factory);
    info!(init_runs = singleton.init_runs, "singleton demo finished");
    println!();

    group_banner("STRUCTURAL PATTERNS");
    pattern_banner("Flyweight");
    let flyweight = run_flyweight(&config.flyweight, &GlyphFactory::new());
    info!(unique = flyweight.unique_ids, lookups = flyweight.lookups, "flyweight demo finished");
    println!();

    group_banner("BEHAVIORAL PATTERNS");
    pattern_banner("Observer");
    let observer = run_observer(&config.observer.readings);
    info!(updates = observer.direct_updates, "observer demo finished");
    println!();

    CatalogSummary {
        singleton,
        flyweight,
        observer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flyweight_sample_run() {
        let factory = GlyphFactory::new();
        let summary = run_flyweight(&FlyweightConfig::default(), &factory);

        assert_eq!(summary.lookups, 50);
        assert_eq!(summary.found, 30);
        assert_eq!(summary.unique_ids, 3);
        assert_eq!(summary.cached, 3);
    }

    #[test]
    fn test_flyweight_three_gets_of_one_code() {
        let config = FlyweightConfig {
            rounds: 1,
            codes: vec![1, 1, 1, 2],
        };
        let summary = run_flyweight(&config, &GlyphFactory::new());
        assert_eq!(summary.unique_ids, 2);
        assert_eq!(summary.found, 4);
    }

    #[test]
    fn test_observer_sample_run() {
        let readings = DemoConfig::default().observer.readings;
        let summary = run_observer(&readings);

        assert_eq!(summary.direct_updates, 3);
        assert_eq!(summary.broadcast_updates, 3);
        assert_eq!(summary.last_reading, Some(Reading::new(21.0, 65.0, 760.0)));
    }

    #[test]
    fn test_singleton_sample_run() {
        let shared = SharedInstance::new();
        let summary = run_singleton(&SingletonConfig { workers: 5 }, &shared);

        assert_eq!(summary.init_runs, 1);
        assert!(summary.all_same_instance);
        assert_eq!(shared.get().map(|f| f.len()), Some(3));
    }

    #[test]
    fn test_run_all_defaults() {
        let summary = run_all(&DemoConfig::default());
        assert_eq!(summary.singleton.init_runs, 1);
        assert_eq!(summary.flyweight.unique_ids, 3);
        assert_eq!(summary.observer.direct_updates, 3);
    }
}
