//! Wire schema for [`ConfigItem`](super::ConfigItem).
//!
//! The JSON field names and omission rules live in one table so the wire
//! contract can be inspected and tested without going through a serializer.

/// A field of a configuration item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemField {
    /// Server-assigned numeric identifier
    Id,
    /// Application namespace
    Application,
    /// Optional machine scope
    Machine,
    /// Configuration key
    Name,
    /// Configuration value
    Value,
    /// Server-assigned update timestamp
    LastUpdated,
}

/// How one item field appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireField {
    /// The item field this entry describes
    pub field: ItemField,
    /// JSON key
    pub wire_name: &'static str,
    /// Leave the key out entirely when the value is empty/zero
    pub omit_empty: bool,
}

/// Serialization schema for `ConfigItem`, in wire order.
pub const CONFIG_ITEM_SCHEMA: &[WireField] = &[
    WireField {
        field: ItemField::Id,
        wire_name: "id",
        omit_empty: true,
    },
    WireField {
        field: ItemField::Application,
        wire_name: "application",
        omit_empty: false,
    },
    WireField {
        field: ItemField::Machine,
        wire_name: "machine",
        omit_empty: true,
    },
    WireField {
        field: ItemField::Name,
        wire_name: "name",
        omit_empty: false,
    },
    WireField {
        field: ItemField::Value,
        wire_name: "value",
        omit_empty: true,
    },
    WireField {
        field: ItemField::LastUpdated,
        wire_name: "updated",
        omit_empty: true,
    },
];

/// Look up the wire entry for a field.
pub fn wire_field(field: ItemField) -> &'static WireField {
    // indices follow the table order above
    let index = match field {
        ItemField::Id => 0,
        ItemField::Application => 1,
        ItemField::Machine => 2,
        ItemField::Name => 3,
        ItemField::Value => 4,
        ItemField::LastUpdated => 5,
    };
    &CONFIG_ITEM_SCHEMA[index]
}
