//! Attribute values exposed by registered beans.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use super::ObjectName;

/// A single attribute value read from a bean.
///
/// Serialised untagged so JSON readers see plain values (`null`, `1.5`,
/// `"Isidoro"`, RFC 3339 dates, nested objects for composites).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Null,
    String(String),
    Boolean(bool),
    Long(i64),
    Float(f32),
    Double(f64),
    Date(DateTime<Utc>),
    Composite(BTreeMap<String, AttributeValue>),
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Long(value)
    }
}

impl From<f32> for AttributeValue {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<DateTime<Utc>> for AttributeValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for AttributeValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Failure to read an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributeError {
    /// The bean has no attribute with this name.
    #[error("Attribute not found: {0}")]
    NotFound(String),

    /// The attribute exists but its value cannot be produced.
    #[error("Attribute {attribute} is unreadable: {reason}")]
    Unreadable { attribute: String, reason: String },
}

/// Outcome of reading one attribute for a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeReading {
    Value(AttributeValue),
    Error(String),
}

impl From<Result<AttributeValue, AttributeError>> for AttributeReading {
    fn from(result: Result<AttributeValue, AttributeError>) -> Self {
        match result {
            Ok(value) => Self::Value(value),
            Err(e) => Self::Error(e.to_string()),
        }
    }
}

/// Point-in-time view of a registered bean and its attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BeanSnapshot {
    pub object_name: ObjectName,
    pub class_name: String,
    pub attributes: BTreeMap<String, AttributeReading>,
}
