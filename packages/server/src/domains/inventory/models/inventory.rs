use std::fmt;

use crate::domains::inventory::data::InventoryData;

/// Id 0 means "not yet saved"; the repository assigns a real id on first save
pub const UNASSIGNED_ID: i64 = 0;

/// One inventory entry
#[derive(Debug, Clone)]
pub struct Inventory {
    pub id: i64,
    pub name: String,
    pub quantity: i64,
    pub status: String, // 'new', 'openBox', 'used', ... (free-form unless configured)
}

impl Inventory {
    /// New, unsaved inventory
    pub fn new(name: impl Into<String>, quantity: i64, status: impl Into<String>) -> Self {
        Self {
            id: UNASSIGNED_ID,
            name: name.into(),
            quantity,
            status: status.into(),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    pub fn is_saved(&self) -> bool {
        self.id != UNASSIGNED_ID
    }

    /// Plain transport form
    pub fn serialize(&self) -> InventoryData {
        InventoryData::from(self)
    }

    /// Value of one searchable attribute
    pub fn attribute(&self, attribute: InventoryAttribute) -> AttributeValue {
        match attribute {
            InventoryAttribute::Name => AttributeValue::Text(self.name.clone()),
            InventoryAttribute::Quantity => AttributeValue::Integer(self.quantity),
            InventoryAttribute::Status => AttributeValue::Text(self.status.clone()),
        }
    }
}

/// Records are the same record when their ids match
impl PartialEq for Inventory {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Inventory {}

impl From<InventoryData> for Inventory {
    fn from(data: InventoryData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            quantity: data.quantity,
            status: data.status,
        }
    }
}

/// Attributes that `find_by` can search on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryAttribute {
    Name,
    Quantity,
    Status,
}

impl fmt::Display for InventoryAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InventoryAttribute::Name => write!(f, "name"),
            InventoryAttribute::Quantity => write!(f, "quantity"),
            InventoryAttribute::Status => write!(f, "status"),
        }
    }
}

/// A search value: text or integer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    Text(String),
    Integer(i64),
}

impl AttributeValue {
    /// Text compares case-insensitively; anything else compares exactly.
    /// Text never matches an integer.
    pub fn matches(&self, other: &AttributeValue) -> bool {
        match (self, other) {
            (AttributeValue::Text(a), AttributeValue::Text(b)) => a.to_lowercase() == b.to_lowercase(),
            (a, b) => a == b,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Text(s) => write!(f, "{}", s),
            AttributeValue::Integer(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Integer(value)
    }
}
