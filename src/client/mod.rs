//! The centralconfig client and its builder.

mod builder;
mod config_client;
mod validation;

pub use builder::ConfigClientBuilder;
pub use config_client::ConfigClient;
pub use validation::Validate;

pub(crate) use validation::require;

#[cfg(feature = "settings")]
pub(crate) use validation::combine;
