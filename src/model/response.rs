//! Response envelopes returned by the service.
//!
//! Each endpoint has its own envelope type; the payload shape is fixed by the
//! endpoint rather than decided at decode time.

use super::ConfigItem;
use serde::{Deserialize, Deserializer, Serialize};

/// Envelope for single-item operations (`get`, `set`, `remove`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigResponse {
    /// HTTP-style status reported by the service
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: u16,
    /// Diagnostic text, empty on success
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    /// The item, zero-valued when not applicable
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: ConfigItem,
}

/// Envelope for collection operations (`get_all`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigResponseMultiple {
    /// HTTP-style status reported by the service
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: u16,
    /// Diagnostic text, empty on success
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    /// Items in the order the service returned them
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<ConfigItem>,
}

/// Envelope listing application names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigResponseApplications {
    /// HTTP-style status reported by the service
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: u16,
    /// Diagnostic text, empty on success
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    /// Distinct application names, sorted
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<String>,
}

macro_rules! status_helpers {
    ($($envelope:ty),*) => {
        $(
            impl $envelope {
                /// True when the service reported a 2xx status.
                pub fn is_success(&self) -> bool {
                    (200..300).contains(&self.status)
                }

                /// True when the service reported 404.
                pub fn is_not_found(&self) -> bool {
                    self.status == 404
                }
            }
        )*
    };
}

status_helpers!(ConfigResponse, ConfigResponseMultiple, ConfigResponseApplications);

/// Treat an explicit JSON `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
