//! Configuration source implementations.

mod config_source;
mod env;
mod file;
mod map;
mod properties;
mod provider;
pub mod system;

pub use config_source::{CONFIG_ORDINAL, ConfigSource, ConfigSourceProvider, DEFAULT_ORDINAL};
pub use env::EnvConfigSource;
pub use file::FileConfigSource;
pub use map::MapConfigSource;
pub use properties::PropertiesConfigSource;
pub use provider::PropertiesConfigSourceProvider;
pub use system::SystemPropertySource;

pub(crate) use config_source::ordinal_or;
