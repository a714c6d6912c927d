//! # ordinal-config
//!
//! Layered configuration assembled from ordinal-ranked sources, with typed conversion
//! through priority-selected converters.
//!
//! ## Overview
//!
//! `ordinal-config` builds one immutable [`Config`](core::Config) out of:
//! - Explicitly added sources and converters
//! - Default sources: environment variables, system properties, and bundled
//!   `META-INF/microprofile-config.properties` files
//! - Sources, source providers and converters registered for discovery
//!
//! Every source carries an ordinal; when several sources define the same key the one
//! with the highest ordinal wins. Converters are kept one per target type, a newcomer
//! replacing the incumbent only with a strictly higher priority.
//!
//! ## Quick Start
//!
//! ```rust
//! use ordinal_config::prelude::*;
//! use ordinal_config::sources::MapConfigSource;
//!
//! # fn example() -> ordinal_config::error::Result<()> {
//! let config = Config::builder()
//!     .with_source(MapConfigSource::new("defaults").with_property("server.port", "8080"))
//!     .with_source(
//!         MapConfigSource::new("overrides")
//!             .with_ordinal(300)
//!             .with_property("server.port", "9090"),
//!     )
//!     .with_converter::<u16, _>(100, FromStrConverter::<u16>::new())
//!     .build()?;
//!
//! assert_eq!(config.value::<u16>("server.port")?, 9090);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Default ordinals
//!
//! | Source                       | Ordinal |
//! |------------------------------|---------|
//! | System properties            | 400     |
//! | Environment variables        | 300     |
//! | Properties / structured files| 100     |
//!
//! Any source may override its ordinal with a `config_ordinal` property.

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod context;
pub mod converter;
pub mod core;
pub mod discovery;
pub mod error;
pub mod sources;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::context::LoadContext;
    pub use crate::converter::{BoolConverter, Converter, DynConverter, FromStrConverter, TypedConverter};
    pub use crate::core::{Config, ConfigBuilder};
    pub use crate::error::{ConfigError, Result};
    pub use crate::sources::{ConfigSource, ConfigSourceProvider};
}
