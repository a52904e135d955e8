//! # centralconfig-client
//!
//! Client for the centralconfig service, a key/value configuration store
//! addressed by application name and optional machine name.
//!
//! ## Overview
//!
//! Every operation is one JSON-over-HTTP round trip:
//!
//! | Operation | Path | Returns |
//! |---|---|---|
//! | [`get`](client::ConfigClient::get) | `/config/get` | [`ConfigResponse`](model::ConfigResponse) |
//! | [`get_all`](client::ConfigClient::get_all) | `/config/getall` | [`ConfigResponseMultiple`](model::ConfigResponseMultiple) |
//! | [`set`](client::ConfigClient::set) | `/config/set` | [`ConfigResponse`](model::ConfigResponse) |
//! | [`remove`](client::ConfigClient::remove) | `/config/remove` | `()` |
//!
//! Missing fields fail before any request is sent. Transport and decode
//! failures are returned as [`ClientError`](error::ClientError). Outcomes the
//! service reports in the envelope's `status` are left for the caller to check.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use centralconfig_client::prelude::*;
//!
//! # async fn example() -> Result<()> {
//! let client = ConfigClient::new("http://config.internal:3000", "billing")?;
//!
//! client
//!     .set(&ConfigItem::new("billing", "retry_limit", "5").with_machine("web-01"))
//!     .await?;
//!
//! let response = client.scoped_to("web-01").get("retry_limit").await?;
//! assert!(response.is_success());
//! assert_eq!(response.data.value, "5");
//!
//! client.remove(&ConfigItem::new("billing", "retry_limit", "")).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `settings` (default): load [`ClientSettings`](settings::ClientSettings)
//!   from files and `CENTRALCONFIG_*` environment variables.

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod cancel;
pub mod client;
pub mod error;
pub mod machine;
pub mod model;
pub mod transport;

#[cfg(feature = "settings")]
pub mod settings;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::client::{ConfigClient, ConfigClientBuilder};
    pub use crate::error::{ClientError, Result, ValidationError};
    pub use crate::model::{ConfigItem, ConfigResponse, ConfigResponseMultiple};

    #[cfg(feature = "settings")]
    pub use crate::settings::ClientSettings;
}
