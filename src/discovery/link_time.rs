//! Link-time registration through the `inventory` crate.

use super::Discovery;
use crate::context::LoadContext;
use crate::converter::DynConverter;
use crate::sources::{ConfigSource, ConfigSourceProvider};
use std::sync::Arc;

/// A discoverable configuration source.
pub struct SourceRegistration {
    /// Registration name, for diagnostics.
    pub name: &'static str,
    /// Creates a fresh instance on every discovery query.
    pub factory: fn() -> Arc<dyn ConfigSource>,
}

impl SourceRegistration {
    /// Create a registration; usable inside `inventory::submit!`.
    pub const fn new(name: &'static str, factory: fn() -> Arc<dyn ConfigSource>) -> Self {
        Self { name, factory }
    }
}

/// A discoverable configuration source provider.
pub struct ProviderRegistration {
    /// Registration name, for diagnostics.
    pub name: &'static str,
    /// Creates a fresh instance on every discovery query.
    pub factory: fn() -> Arc<dyn ConfigSourceProvider>,
}

impl ProviderRegistration {
    /// Create a registration; usable inside `inventory::submit!`.
    pub const fn new(name: &'static str, factory: fn() -> Arc<dyn ConfigSourceProvider>) -> Self {
        Self { name, factory }
    }
}

/// A discoverable converter.
pub struct ConverterRegistration {
    /// Registration name, for diagnostics.
    pub name: &'static str,
    /// Creates a fresh instance on every discovery query.
    pub factory: fn() -> Arc<dyn DynConverter>,
}

impl ConverterRegistration {
    /// Create a registration; usable inside `inventory::submit!`.
    pub const fn new(name: &'static str, factory: fn() -> Arc<dyn DynConverter>) -> Self {
        Self { name, factory }
    }
}

inventory::collect!(SourceRegistration);
inventory::collect!(ProviderRegistration);
inventory::collect!(ConverterRegistration);

/// Discovers everything submitted with `inventory::submit!` anywhere in the binary.
///
/// Registrations are global to the process, so the context is not consulted when
/// choosing them; it is handed on to the providers when they produce sources.
#[derive(Debug, Default, Clone, Copy)]
pub struct InventoryDiscovery;

impl Discovery for InventoryDiscovery {
    fn config_sources(&self, _context: &LoadContext) -> Vec<Arc<dyn ConfigSource>> {
        inventory::iter::<SourceRegistration>
            .into_iter()
            .map(|registration| {
                tracing::trace!(name = registration.name, "instantiating discovered source");
                (registration.factory)()
            })
            .collect()
    }

    fn config_source_providers(&self, _context: &LoadContext) -> Vec<Arc<dyn ConfigSourceProvider>> {
        inventory::iter::<ProviderRegistration>
            .into_iter()
            .map(|registration| {
                tracing::trace!(name = registration.name, "instantiating discovered provider");
                (registration.factory)()
            })
            .collect()
    }

    fn converters(&self, _context: &LoadContext) -> Vec<Arc<dyn DynConverter>> {
        inventory::iter::<ConverterRegistration>
            .into_iter()
            .map(|registration| {
                tracing::trace!(name = registration.name, "instantiating discovered converter");
                (registration.factory)()
            })
            .collect()
    }
}
