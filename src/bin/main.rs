use design_patterns::{demos, telemetry, CatalogError, DemoConfig};
use std::env;
use tracing::info;

/// Runs every demo. Optional first argument: path to a `.toml` or `.json`
/// file with sample data.
fn main() -> Result<(), CatalogError> {
    telemetry::init_tracing();

    let config = match env::args().nth(1) {
        Some(path) => {
            info!(%path, "loading demo config");
            DemoConfig::from_file(&path)?
        }
        None => DemoConfig::default(),
    };
    config.validate()?;

    let summary = demos::run_all(&config);
    info!(
        glyphs = summary.flyweight.cached,
        observer_updates = summary.observer.direct_updates,
        "all demos finished"
    );
    Ok(())
}
