//! The configuration item and its schema-driven JSON codec.

use super::schema::{CONFIG_ITEM_SCHEMA, ItemField};
use chrono::{DateTime, Datelike, SecondsFormat, Utc};
use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Timestamp the service sends for "never updated".
const ZERO_TIME: &str = "0001-01-01T00:00:00Z";

/// One configuration entry.
///
/// `(application, machine, name)` identifies at most one item on the service;
/// the client only supplies the tuple and never checks uniqueness.
///
/// # Examples
///
/// ```rust
/// use centralconfig_client::model::ConfigItem;
///
/// let item = ConfigItem::new("billing", "retry_limit", "5").with_machine("web-01");
/// let json = serde_json::to_string(&item).unwrap();
/// assert_eq!(
///     json,
///     r#"{"application":"billing","machine":"web-01","name":"retry_limit","value":"5"}"#
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigItem {
    /// Server-assigned identifier
    pub id: Option<i64>,
    /// Application namespace
    pub application: String,
    /// Host the item is scoped to, overriding the application-wide value
    pub machine: Option<String>,
    /// Configuration key
    pub name: String,
    /// Configuration value, always text
    pub value: String,
    /// Server-assigned update time, informational only
    pub last_updated: Option<DateTime<Utc>>,
}

impl ConfigItem {
    /// Create an application-wide item.
    pub fn new(
        application: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            application: application.into(),
            name: name.into(),
            value: value.into(),
            ..Self::default()
        }
    }

    /// Scope the item to one machine.
    pub fn with_machine(mut self, machine: impl Into<String>) -> Self {
        self.machine = Some(machine.into());
        self
    }

    fn wire_value(&self, field: ItemField) -> WireValue<'_> {
        match field {
            ItemField::Id => WireValue::Int(self.id.unwrap_or(0)),
            ItemField::Application => WireValue::Text(&self.application),
            ItemField::Machine => WireValue::Text(self.machine.as_deref().unwrap_or("")),
            ItemField::Name => WireValue::Text(&self.name),
            ItemField::Value => WireValue::Text(&self.value),
            ItemField::LastUpdated => WireValue::Time(self.last_updated),
        }
    }

    fn assign(&mut self, field: ItemField, raw: JsonValue) -> Result<(), String> {
        match field {
            ItemField::Id => {
                let id = raw
                    .as_i64()
                    .ok_or_else(|| format!("expected an integer id, found {}", raw))?;
                self.id = (id != 0).then_some(id);
            }
            ItemField::Application => self.application = expect_text(field, raw)?,
            ItemField::Machine => {
                let machine = expect_text(field, raw)?;
                self.machine = (!machine.is_empty()).then_some(machine);
            }
            ItemField::Name => self.name = expect_text(field, raw)?,
            ItemField::Value => self.value = expect_text(field, raw)?,
            ItemField::LastUpdated => {
                self.last_updated = parse_timestamp(&expect_text(field, raw)?)?;
            }
        }
        Ok(())
    }
}

fn expect_text(field: ItemField, raw: JsonValue) -> Result<String, String> {
    match raw {
        JsonValue::String(s) => Ok(s),
        other => Err(format!("expected a string for {:?}, found {}", field, other)),
    }
}

/// Parse an RFC 3339 timestamp; the zero time and the empty string mean "absent".
fn parse_timestamp(text: &str) -> Result<Option<DateTime<Utc>>, String> {
    if text.is_empty() {
        return Ok(None);
    }
    let parsed = DateTime::parse_from_rfc3339(text)
        .map_err(|e| format!("invalid timestamp '{}': {}", text, e))?
        .with_timezone(&Utc);
    Ok((parsed.year() > 1).then_some(parsed))
}

/// A field value as it is written to JSON.
enum WireValue<'a> {
    Int(i64),
    Text(&'a str),
    Time(Option<DateTime<Utc>>),
}

impl WireValue<'_> {
    fn is_empty(&self) -> bool {
        match self {
            Self::Int(n) => *n == 0,
            Self::Text(s) => s.is_empty(),
            Self::Time(t) => t.is_none(),
        }
    }
}

impl Serialize for WireValue<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Int(n) => serializer.serialize_i64(*n),
            Self::Text(s) => serializer.serialize_str(s),
            Self::Time(Some(t)) => {
                serializer.serialize_str(&t.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            Self::Time(None) => serializer.serialize_str(ZERO_TIME),
        }
    }
}

impl Serialize for ConfigItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let present: Vec<_> = CONFIG_ITEM_SCHEMA
            .iter()
            .map(|entry| (entry, self.wire_value(entry.field)))
            .filter(|(entry, value)| !(entry.omit_empty && value.is_empty()))
            .collect();

        let mut map = serializer.serialize_map(Some(present.len()))?;
        for (entry, value) in &present {
            map.serialize_entry(entry.wire_name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ConfigItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut fields = Map::<String, JsonValue>::deserialize(deserializer)?;
        let mut item = ConfigItem::default();

        for entry in CONFIG_ITEM_SCHEMA {
            match fields.remove(entry.wire_name) {
                None | Some(JsonValue::Null) => {}
                Some(raw) => item.assign(entry.field, raw).map_err(de::Error::custom)?,
            }
        }

        Ok(item)
    }
}
