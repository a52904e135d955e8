//! Client settings loaded from files and environment variables.

use crate::client::{ConfigClient, Validate, combine, require};
use crate::error::{ClientError, Result, ValidationError};
use config::{Config, Environment, File};
use reqwest::Url;
use serde::Deserialize;
use std::path::Path;

/// Default environment variable prefix.
///
/// `CENTRALCONFIG_SERVICE_URL`, `CENTRALCONFIG_APPLICATION` and
/// `CENTRALCONFIG_MACHINE` map onto the [`ClientSettings`] fields.
pub const ENV_PREFIX: &str = "CENTRALCONFIG";

/// Connection settings for a [`ConfigClient`].
///
/// # Examples
///
/// ```rust,no_run
/// use centralconfig_client::prelude::*;
///
/// # fn example() -> Result<()> {
/// // CENTRALCONFIG_SERVICE_URL=http://config.internal:3000
/// // CENTRALCONFIG_APPLICATION=billing
/// let settings = ClientSettings::from_env()?;
/// let client = ConfigClient::from_settings(&settings)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Absolute base URL of the service
    pub service_url: String,
    /// Application namespace
    pub application: String,
    /// Optional machine scope
    pub machine: Option<String>,
}

impl ClientSettings {
    /// Load settings from `CENTRALCONFIG_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns a settings error if the variables cannot be read.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with_prefix(ENV_PREFIX)
    }

    /// Load settings from environment variables with a custom prefix.
    ///
    /// # Arguments
    ///
    /// * `prefix` - Prefix for environment variables (e.g., "APP" for `APP_SERVICE_URL`)
    ///
    /// # Errors
    ///
    /// Returns a settings error if the variables cannot be read.
    pub fn from_env_with_prefix(prefix: &str) -> Result<Self> {
        Self::load(None, prefix)
    }

    /// Load settings from a YAML, TOML or JSON file.
    ///
    /// The format follows the file extension. `CENTRALCONFIG_*` environment
    /// variables override values from the file.
    ///
    /// # Errors
    ///
    /// Returns a settings error if the file is missing or cannot be parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::load(Some(path.as_ref()), ENV_PREFIX)
    }

    fn load(file: Option<&Path>, prefix: &str) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = file {
            builder = builder.add_source(File::from(path));
        }

        let config = builder
            .add_source(Environment::with_prefix(prefix).try_parsing(false))
            .build()
            .map_err(|e| ClientError::Settings(format!("Failed to read settings: {}", e)))?;

        config
            .try_deserialize::<Self>()
            .map_err(|e| ClientError::Settings(format!("Failed to deserialize settings: {}", e)))
    }
}

impl Validate for ClientSettings {
    fn validate(&self) -> std::result::Result<(), ValidationError> {
        let mut errors = Vec::new();

        if let Err(err) = require("service_url", &self.service_url) {
            errors.push(err);
        } else if let Err(reason) = check_base_url(&self.service_url) {
            errors.push(ValidationError::invalid_field("service_url", reason));
        }

        if let Err(err) = require("application", &self.application) {
            errors.push(err);
        }

        combine(errors)
    }
}

fn check_base_url(raw: &str) -> std::result::Result<(), String> {
    let url = Url::parse(raw).map_err(|e| format!("not an absolute URL ({})", e))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("unsupported scheme '{}'", other)),
    }
}

impl ConfigClient {
    /// Build a client from validated settings.
    ///
    /// # Errors
    ///
    /// - Configuration error if the settings are invalid
    /// - Transport error if the HTTP client cannot be constructed
    pub fn from_settings(settings: &ClientSettings) -> Result<Self> {
        settings.validate()?;

        let mut builder = ConfigClient::builder()
            .with_service_url(settings.service_url.as_str())
            .with_application(settings.application.as_str());

        if let Some(machine) = settings.machine.as_deref().filter(|m| !m.is_empty()) {
            builder = builder.with_machine(machine);
        }

        builder.build()
    }
}
