//! Domain types for the harness.
//!
//! Pure value types with no infrastructure dependencies.

pub mod attribute;
pub mod cat;
pub mod object_name;

pub use attribute::{AttributeError, AttributeReading, AttributeValue, BeanSnapshot};
pub use cat::{CAT_TYPE, Cat, CompositeDataCat, CustomCat, ExceptionalCat, NumberValue, TEST_DOMAIN};
pub use object_name::{ObjectName, ObjectNameError};
