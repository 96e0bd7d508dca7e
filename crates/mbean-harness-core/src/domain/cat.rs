//! Test beans ("cats") registered by the control service.
//!
//! Every kind derives its identifier from its own fields during
//! `pre_register`, ignoring any candidate name, so the same request body
//! always lands on the same identifier.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{AttributeError, AttributeValue, ObjectName, ObjectNameError};
use crate::ports::{MBeanRegistration, ManagedBean, RegistrationError};

/// Domain shared by every harness bean.
pub const TEST_DOMAIN: &str = "test";

/// `type` key of plain cats.
pub const CAT_TYPE: &str = "Cat";

const COMPOSITE_DATA_CAT_TYPE: &str = "CompositeDataCat";
const EXCEPTIONAL_CAT_TYPE: &str = "ExceptionalCat";

/// `test:type=<kind>,name=<name>`.
fn test_object_name(kind: &str, name: &str) -> Result<ObjectName, ObjectNameError> {
    ObjectName::from_properties(TEST_DOMAIN, [("type", kind), ("name", name)])
}

/// A numeric field that accepts integers and decimals alike.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumberValue {
    Long(i64),
    Double(f64),
}

impl From<NumberValue> for AttributeValue {
    fn from(value: NumberValue) -> Self {
        match value {
            NumberValue::Long(n) => Self::Long(n),
            NumberValue::Double(n) => Self::Double(n),
        }
    }
}

/// The basic test bean.
///
/// Decoded from request bodies such as `{"name":"Isidoro","doubleValue":1.2}`.
/// Only `name` is required; it must be a non-null string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cat {
    name: String,
    double_value: Option<f64>,
    float_value: Option<f32>,
    bool_value: Option<bool>,
    number_value: Option<NumberValue>,
    /// Milliseconds since the Unix epoch.
    date_value: Option<i64>,
}

impl Cat {
    const ATTRIBUTES: &'static [&'static str] = &[
        "Name",
        "DoubleValue",
        "FloatValue",
        "BoolValue",
        "NumberValue",
        "DateValue",
    ];

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            double_value: None,
            float_value: None,
            bool_value: None,
            number_value: None,
            date_value: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn double_value(&self) -> Option<f64> {
        self.double_value
    }

    pub const fn float_value(&self) -> Option<f32> {
        self.float_value
    }

    pub const fn bool_value(&self) -> Option<bool> {
        self.bool_value
    }

    pub const fn number_value(&self) -> Option<NumberValue> {
        self.number_value
    }

    pub fn date_value(&self) -> Option<DateTime<Utc>> {
        self.date_value.and_then(DateTime::from_timestamp_millis)
    }

    /// `test:type=Cat,name=<name>`.
    ///
    /// Fails when the name is empty or holds characters that are illegal in
    /// an unquoted object-name value.
    pub fn derive_identifier(&self) -> Result<ObjectName, ObjectNameError> {
        test_object_name(CAT_TYPE, &self.name)
    }
}

impl fmt::Display for Cat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cat{{name={}}}", self.name)
    }
}

impl MBeanRegistration for Cat {
    fn pre_register(&mut self, _candidate: Option<&ObjectName>) -> Result<ObjectName, RegistrationError> {
        Ok(self.derive_identifier()?)
    }

    fn post_register(&mut self, _registration_done: bool) {}

    fn pre_deregister(&mut self) -> Result<(), RegistrationError> {
        Ok(())
    }

    fn post_deregister(&mut self) {}
}

impl ManagedBean for Cat {
    fn class_name(&self) -> &str {
        CAT_TYPE
    }

    fn attribute_names(&self) -> &[&'static str] {
        Self::ATTRIBUTES
    }

    fn get_attribute(&self, attribute: &str) -> Result<AttributeValue, AttributeError> {
        match attribute {
            "Name" => Ok(self.name.as_str().into()),
            "DoubleValue" => Ok(self.double_value.into()),
            "FloatValue" => Ok(self.float_value.into()),
            "BoolValue" => Ok(self.bool_value.into()),
            "NumberValue" => Ok(self.number_value.into()),
            "DateValue" => Ok(self.date_value().into()),
            _ => Err(AttributeError::NotFound(attribute.to_string())),
        }
    }
}

/// A cat exposed as a single composite `CatInfo` attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeDataCat {
    cat: Cat,
}

impl CompositeDataCat {
    pub const fn new(cat: Cat) -> Self {
        Self { cat }
    }

    pub fn derive_identifier(&self) -> Result<ObjectName, ObjectNameError> {
        test_object_name(COMPOSITE_DATA_CAT_TYPE, &self.cat.name)
    }

    fn cat_info(&self) -> AttributeValue {
        let items = BTreeMap::from([
            ("name".to_string(), self.cat.name.as_str().into()),
            ("bool".to_string(), self.cat.bool_value.into()),
            ("double".to_string(), self.cat.double_value.into()),
            ("float".to_string(), self.cat.float_value.into()),
            ("number".to_string(), self.cat.number_value.into()),
        ]);
        AttributeValue::Composite(items)
    }
}

impl fmt::Display for CompositeDataCat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompositeDataCat{{name={}}}", self.cat.name)
    }
}

impl MBeanRegistration for CompositeDataCat {
    fn pre_register(&mut self, _candidate: Option<&ObjectName>) -> Result<ObjectName, RegistrationError> {
        Ok(self.derive_identifier()?)
    }

    fn post_register(&mut self, _registration_done: bool) {}

    fn pre_deregister(&mut self) -> Result<(), RegistrationError> {
        Ok(())
    }

    fn post_deregister(&mut self) {}
}

impl ManagedBean for CompositeDataCat {
    fn class_name(&self) -> &str {
        COMPOSITE_DATA_CAT_TYPE
    }

    fn attribute_names(&self) -> &[&'static str] {
        &["CatInfo"]
    }

    fn get_attribute(&self, attribute: &str) -> Result<AttributeValue, AttributeError> {
        match attribute {
            "CatInfo" => Ok(self.cat_info()),
            _ => Err(AttributeError::NotFound(attribute.to_string())),
        }
    }
}

/// A cat with one attribute whose value can never be read.
///
/// Lets the component under test exercise its per-attribute error path.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionalCat {
    name: String,
    double_value: Option<f64>,
}

impl ExceptionalCat {
    pub fn new(name: impl Into<String>, double_value: Option<f64>) -> Self {
        Self {
            name: name.into(),
            double_value,
        }
    }

    pub fn derive_identifier(&self) -> Result<ObjectName, ObjectNameError> {
        test_object_name(EXCEPTIONAL_CAT_TYPE, &self.name)
    }
}

impl fmt::Display for ExceptionalCat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExceptionalCat{{name={}}}", self.name)
    }
}

impl MBeanRegistration for ExceptionalCat {
    fn pre_register(&mut self, _candidate: Option<&ObjectName>) -> Result<ObjectName, RegistrationError> {
        Ok(self.derive_identifier()?)
    }

    fn post_register(&mut self, _registration_done: bool) {}

    fn pre_deregister(&mut self) -> Result<(), RegistrationError> {
        Ok(())
    }

    fn post_deregister(&mut self) {}
}

impl ManagedBean for ExceptionalCat {
    fn class_name(&self) -> &str {
        EXCEPTIONAL_CAT_TYPE
    }

    fn attribute_names(&self) -> &[&'static str] {
        &["DoubleValue", "NotSerializable"]
    }

    fn get_attribute(&self, attribute: &str) -> Result<AttributeValue, AttributeError> {
        match attribute {
            "DoubleValue" => Ok(self.double_value.into()),
            "NotSerializable" => Err(AttributeError::Unreadable {
                attribute: attribute.to_string(),
                reason: "value of type NotSerializable cannot be serialized".to_string(),
            }),
            _ => Err(AttributeError::NotFound(attribute.to_string())),
        }
    }
}

/// A cat registered under a caller-chosen object name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CustomCat {
    #[serde(rename = "mBeanName")]
    mbean_name: String,
    #[serde(flatten)]
    cat: Cat,
}

impl CustomCat {
    pub fn new(mbean_name: impl Into<String>, cat: Cat) -> Self {
        Self {
            mbean_name: mbean_name.into(),
            cat,
        }
    }

    pub fn derive_identifier(&self) -> Result<ObjectName, ObjectNameError> {
        ObjectName::parse(&self.mbean_name)
    }
}

impl fmt::Display for CustomCat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CustomCat{{mBeanName={}, name={}}}", self.mbean_name, self.cat.name)
    }
}

impl MBeanRegistration for CustomCat {
    fn pre_register(&mut self, _candidate: Option<&ObjectName>) -> Result<ObjectName, RegistrationError> {
        Ok(self.derive_identifier()?)
    }

    fn post_register(&mut self, _registration_done: bool) {}

    fn pre_deregister(&mut self) -> Result<(), RegistrationError> {
        Ok(())
    }

    fn post_deregister(&mut self) {}
}

impl ManagedBean for CustomCat {
    fn class_name(&self) -> &str {
        "CustomCat"
    }

    fn attribute_names(&self) -> &[&'static str] {
        self.cat.attribute_names()
    }

    fn get_attribute(&self, attribute: &str) -> Result<AttributeValue, AttributeError> {
        self.cat.get_attribute(attribute)
    }
}
