//! Core configuration assembly types.

mod builder;
mod config;
mod converter_registry;
mod priority;
mod source_registry;

pub use builder::ConfigBuilder;
pub use config::Config;
pub use priority::DEFAULT_PRIORITY;
pub use source_registry::{
    META_INF_MICROPROFILE_CONFIG_PROPERTIES, WEB_INF_MICROPROFILE_CONFIG_PROPERTIES,
};
