//! Discovery of sources, source providers and converters.
//!
//! The builder never looks implementations up itself; it asks a [`Discovery`] strategy,
//! one query per capability. [`InventoryDiscovery`] answers from link-time registrations
//! made with the `inventory` crate, [`StaticDiscovery`] from an in-memory list.
//!
//! ## Registering a discoverable converter
//!
//! ```rust
//! use ordinal_config::converter::{DynConverter, FromStrConverter, TypedConverter};
//! use ordinal_config::discovery::ConverterRegistration;
//! use std::sync::Arc;
//!
//! fn port_converter() -> Arc<dyn DynConverter> {
//!     Arc::new(TypedConverter::new(FromStrConverter::<u16>::new()))
//! }
//!
//! inventory::submit! {
//!     ConverterRegistration::new("port", port_converter)
//! }
//! # fn main() {}
//! ```

mod link_time;
mod registry;

pub use link_time::{
    ConverterRegistration, InventoryDiscovery, ProviderRegistration, SourceRegistration,
};
pub use registry::StaticDiscovery;

use crate::context::LoadContext;
use crate::converter::DynConverter;
use crate::sources::{ConfigSource, ConfigSourceProvider};
use std::sync::Arc;

/// Looks up registered implementations of each pluggable capability.
///
/// Results are unordered; callers must not rely on the order implementations are
/// returned in.
pub trait Discovery: Send + Sync {
    /// Registered configuration sources.
    fn config_sources(&self, context: &LoadContext) -> Vec<Arc<dyn ConfigSource>>;

    /// Registered configuration source providers.
    fn config_source_providers(&self, context: &LoadContext) -> Vec<Arc<dyn ConfigSourceProvider>>;

    /// Registered converters.
    fn converters(&self, context: &LoadContext) -> Vec<Arc<dyn DynConverter>>;
}

impl<D: Discovery + ?Sized> Discovery for Arc<D> {
    fn config_sources(&self, context: &LoadContext) -> Vec<Arc<dyn ConfigSource>> {
        (**self).config_sources(context)
    }

    fn config_source_providers(&self, context: &LoadContext) -> Vec<Arc<dyn ConfigSourceProvider>> {
        (**self).config_source_providers(context)
    }

    fn converters(&self, context: &LoadContext) -> Vec<Arc<dyn DynConverter>> {
        (**self).converters(context)
    }
}
