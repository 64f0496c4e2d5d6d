// Design Patterns Catalog
// Observer, Flyweight and shared-instance patterns with runnable demos.

pub mod config;
pub mod demos;
pub mod error;
pub mod flyweight;
pub mod observer;
pub mod singleton;
pub mod telemetry;

pub use config::DemoConfig;
pub use error::CatalogError;

pub mod examples {
    //! # Design Patterns Quick Reference
    //!
    //! ## Creational
    //! - Shared instance (one-time initialisation, passed explicitly)
    //!
    //! ## Structural
    //! - Flyweight (identity-sharing glyph factory)
    //!
    //! ## Behavioral
    //! - Observer (direct dispatch through trait objects)
    //! - Observer (broadcast channel with typed payload)
    //!
    //! Run every demo with:
    //! ```bash
    //! cargo run --bin design-patterns
    //! cargo run --bin design-patterns -- demo.toml
    //! ```
}
