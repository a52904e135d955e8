//! Wire data model: configuration items and response envelopes.

mod item;
mod response;
pub mod schema;

pub use item::ConfigItem;
pub use response::{ConfigResponse, ConfigResponseApplications, ConfigResponseMultiple};
