//! The centralconfig client.

use super::ConfigClientBuilder;
use super::validation::require;
use crate::error::{ClientError, Result};
use crate::machine::MachineNameProvider;
use crate::model::{ConfigItem, ConfigResponse, ConfigResponseApplications, ConfigResponseMultiple};
use crate::transport::Transport;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use tracing::instrument;

const GET_PATH: &str = "/config/get";
const GET_ALL_PATH: &str = "/config/getall";
const SET_PATH: &str = "/config/set";
const REMOVE_PATH: &str = "/config/remove";

/// Client for the centralconfig service.
///
/// Holds the service URL, the application namespace and an optional machine
/// scope. The client has no mutable state: every call builds its own request,
/// makes exactly one POST and returns. Clones share the transport.
///
/// Service-level outcomes (`status`/`message`) are returned inside the
/// envelope, not as errors. Check [`ConfigResponse::is_success`] yourself.
///
/// # Examples
///
/// ```rust,no_run
/// use centralconfig_client::prelude::*;
///
/// # async fn example() -> Result<()> {
/// let client = ConfigClient::builder()
///     .with_service_url("http://config.internal:3000")
///     .with_application("billing")
///     .build()?;
///
/// client.set(&ConfigItem::new("billing", "retry_limit", "5")).await?;
///
/// let response = client.get("retry_limit").await?;
/// if response.is_success() {
///     println!("retry_limit = {}", response.data.value);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ConfigClient {
    pub(super) service_url: String,
    pub(super) application: String,
    pub(super) machine: Option<String>,
    pub(super) machine_name: Option<Arc<dyn MachineNameProvider>>,
    pub(super) transport: Arc<dyn Transport>,
}

impl ConfigClient {
    /// Create a new builder for constructing a client.
    pub fn builder() -> ConfigClientBuilder {
        ConfigClientBuilder::new()
    }

    /// Create a client for `application` with the default HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the HTTP client cannot be constructed.
    pub fn new(service_url: impl Into<String>, application: impl Into<String>) -> Result<Self> {
        Self::builder()
            .with_service_url(service_url)
            .with_application(application)
            .build()
    }

    /// Base URL of the service, without a trailing slash.
    pub fn service_url(&self) -> &str {
        &self.service_url
    }

    /// Application namespace used by [`get`](Self::get).
    pub fn application(&self) -> &str {
        &self.application
    }

    /// Explicit machine scope, if one was set.
    pub fn machine(&self) -> Option<&str> {
        self.machine.as_deref()
    }

    /// A clone of this client scoped to another machine.
    pub fn scoped_to(&self, machine: impl Into<String>) -> Self {
        let mut client = self.clone();
        client.machine = Some(machine.into());
        client
    }

    /// Fetch one item of the client's application.
    ///
    /// The request is scoped to the client's machine, or to the name reported
    /// by its machine name provider. Whether the item exists is reported in
    /// the envelope's `status`.
    ///
    /// # Errors
    ///
    /// - Configuration error if `service_url` or `application` is empty
    /// - Transport error if the exchange fails
    /// - Decode error if the body is not a `ConfigResponse`
    #[instrument(level = "debug", skip(self), fields(application = %self.application))]
    pub async fn get(&self, name: &str) -> Result<ConfigResponse> {
        let url = self.endpoint(GET_PATH)?;
        require("application", &self.application)?;

        let request = ConfigItem {
            application: self.application.clone(),
            machine: self.resolve_machine(),
            name: name.to_string(),
            ..ConfigItem::default()
        };

        self.exchange(&url, encode(&request)?).await
    }

    /// Fetch one value as text, falling back to `default`.
    ///
    /// Any error, non-success status or empty value yields `default`.
    pub async fn get_string(&self, name: &str, default: &str) -> String {
        match self.get(name).await {
            Ok(response) if response.is_success() && !response.data.value.is_empty() => {
                response.data.value
            }
            Ok(response) => {
                tracing::debug!(name, status = response.status, "using default value");
                default.to_string()
            }
            Err(err) => {
                tracing::debug!(name, error = %err, "using default value");
                default.to_string()
            }
        }
    }

    /// Fetch every item of every application.
    ///
    /// This call is global: it sends neither the application nor the machine.
    ///
    /// # Errors
    ///
    /// - Configuration error if `service_url` is empty
    /// - Transport error if the exchange fails
    /// - Decode error if the body is not a `ConfigResponseMultiple`
    #[instrument(level = "debug", skip(self))]
    pub async fn get_all(&self) -> Result<ConfigResponseMultiple> {
        let url = self.endpoint(GET_ALL_PATH)?;
        self.exchange(&url, Vec::new()).await
    }

    /// Fetch every item of one application.
    ///
    /// Filters the result of [`get_all`](Self::get_all) on the client side;
    /// the service order is kept.
    ///
    /// # Errors
    ///
    /// Same as [`get_all`](Self::get_all).
    pub async fn get_all_for_application(&self, application: &str) -> Result<ConfigResponseMultiple> {
        let mut response = self.get_all().await?;
        response.data.retain(|item| item.application == application);
        Ok(response)
    }

    /// List the distinct application names known to the service, sorted.
    ///
    /// # Errors
    ///
    /// Same as [`get_all`](Self::get_all).
    pub async fn get_all_applications(&self) -> Result<ConfigResponseApplications> {
        let response = self.get_all().await?;
        let names: BTreeSet<String> = response.data.into_iter().map(|item| item.application).collect();

        Ok(ConfigResponseApplications {
            status: response.status,
            message: response.message,
            data: names.into_iter().collect(),
        })
    }

    /// Create or update an item.
    ///
    /// The full item is sent; the service keys the upsert on
    /// `(application, machine, name)`. `name` is not checked locally.
    ///
    /// # Errors
    ///
    /// - Configuration error if `service_url` or `item.application` is empty
    /// - Transport error if the exchange fails
    /// - Decode error if the body is not a `ConfigResponse`
    #[instrument(level = "debug", skip(self, item), fields(application = %item.application, name = %item.name))]
    pub async fn set(&self, item: &ConfigItem) -> Result<ConfigResponse> {
        let url = self.endpoint(SET_PATH)?;
        require("application", &item.application)?;

        self.exchange(&url, encode(item)?).await
    }

    /// Remove an item.
    ///
    /// Any well-formed envelope counts as success whatever its `status`, so
    /// removing an absent item is not an error. Use
    /// [`remove_with_response`](Self::remove_with_response) to see the status.
    ///
    /// # Errors
    ///
    /// - Configuration error if `service_url`, `item.application` or `item.name` is empty
    /// - Transport error if the exchange fails
    /// - Decode error if the body is not a `ConfigResponse`
    pub async fn remove(&self, item: &ConfigItem) -> Result<()> {
        let response = self.remove_with_response(item).await?;
        tracing::debug!(status = response.status, "remove acknowledged");
        Ok(())
    }

    /// Remove an item and return the service's envelope.
    ///
    /// # Errors
    ///
    /// Same as [`remove`](Self::remove).
    #[instrument(level = "debug", skip(self, item), fields(application = %item.application, name = %item.name))]
    pub async fn remove_with_response(&self, item: &ConfigItem) -> Result<ConfigResponse> {
        let url = self.endpoint(REMOVE_PATH)?;
        require("application", &item.application)?;
        require("name", &item.name)?;

        self.exchange(&url, encode(item)?).await
    }

    fn endpoint(&self, path: &str) -> Result<String> {
        require("service_url", &self.service_url)?;
        Ok(format!("{}{}", self.service_url, path))
    }

    fn resolve_machine(&self) -> Option<String> {
        if let Some(machine) = self.machine.as_deref().filter(|m| !m.is_empty()) {
            return Some(machine.to_string());
        }

        let provider = self.machine_name.as_ref()?;
        match provider.machine_name() {
            Ok(name) => {
                let name = name.trim();
                (!name.is_empty()).then(|| name.to_string())
            }
            Err(err) => {
                tracing::warn!(error = %err, "could not resolve machine name, sending unscoped request");
                None
            }
        }
    }

    async fn exchange<T>(&self, url: &str, body: Vec<u8>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        tracing::debug!(url, bytes = body.len(), "sending request");
        let response = self.transport.post_json(url, body).await?;
        serde_json::from_slice(&response.body)
            .map_err(|source| ClientError::decode(source, &response.body))
    }
}

impl fmt::Debug for ConfigClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigClient")
            .field("service_url", &self.service_url)
            .field("application", &self.application)
            .field("machine", &self.machine)
            .field("machine_detection", &self.machine_name.is_some())
            .finish_non_exhaustive()
    }
}

fn encode<T: Serialize>(request: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(request).map_err(ClientError::Encode)
}
