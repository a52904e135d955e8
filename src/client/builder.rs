//! Builder for constructing ConfigClient instances.

use super::ConfigClient;
use crate::error::Result;
use crate::machine::{MachineNameProvider, SystemHostname};
use crate::transport::{ReqwestTransport, Transport};
use std::sync::Arc;

/// Builder for constructing a [`ConfigClient`].
///
/// Fields are not validated here. An empty service URL or application is
/// reported as a configuration error by the first call that needs it.
///
/// # Examples
///
/// ```rust,no_run
/// use centralconfig_client::prelude::*;
///
/// # fn example() -> Result<()> {
/// let client = ConfigClient::builder()
///     .with_service_url("http://config.internal:3000/")
///     .with_application("billing")
///     .with_machine("web-01")
///     .build()?;
///
/// assert_eq!(client.service_url(), "http://config.internal:3000");
/// # Ok(())
/// # }
/// ```
pub struct ConfigClientBuilder {
    service_url: String,
    application: String,
    machine: Option<String>,
    machine_name: Option<Arc<dyn MachineNameProvider>>,
    transport: Option<Arc<dyn Transport>>,
}

impl ConfigClientBuilder {
    /// Create a new builder with default settings.
    ///
    /// Machine names are detected with [`SystemHostname`] unless a machine is
    /// set explicitly.
    pub fn new() -> Self {
        Self {
            service_url: String::new(),
            application: String::new(),
            machine: None,
            machine_name: Some(Arc::new(SystemHostname)),
            transport: None,
        }
    }

    /// Set the service base URL, e.g. `http://config.internal:3000`.
    ///
    /// A trailing `/` is stripped; operation paths such as `/config/get` are
    /// appended to what remains.
    pub fn with_service_url(mut self, url: impl Into<String>) -> Self {
        self.service_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the application namespace.
    pub fn with_application(mut self, application: impl Into<String>) -> Self {
        self.application = application.into();
        self
    }

    /// Scope lookups to one machine instead of the detected host name.
    pub fn with_machine(mut self, machine: impl Into<String>) -> Self {
        self.machine = Some(machine.into());
        self
    }

    /// Use a custom machine name provider.
    pub fn with_machine_name_provider(
        mut self,
        provider: impl MachineNameProvider + 'static,
    ) -> Self {
        self.machine_name = Some(Arc::new(provider));
        self
    }

    /// Never detect the machine name; unscoped lookups stay unscoped.
    pub fn without_machine_detection(mut self) -> Self {
        self.machine_name = None;
        self
    }

    /// Use a custom transport.
    pub fn with_transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Use a preconfigured `reqwest` client (timeouts, proxies, TLS).
    pub fn with_http_client(self, client: reqwest::Client) -> Self {
        self.with_transport(ReqwestTransport::with_client(client))
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns a transport error if no transport was given and the default
    /// HTTP client cannot be constructed.
    pub fn build(self) -> Result<ConfigClient> {
        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new()?),
        };

        Ok(ConfigClient {
            service_url: self.service_url,
            application: self.application,
            machine: self.machine,
            machine_name: self.machine_name,
            transport,
        })
    }
}

impl Default for ConfigClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
