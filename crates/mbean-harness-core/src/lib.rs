#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod ports;
pub mod registry;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    AttributeError, AttributeReading, AttributeValue, BeanSnapshot, CAT_TYPE, Cat,
    CompositeDataCat, CustomCat, ExceptionalCat, NumberValue, ObjectName, ObjectNameError, TEST_DOMAIN,
};
pub use ports::{
    CoreError, MBeanRegistration, MBeanServerPort, ManagedBean, RegistrationError, RegistryError,
};
pub use registry::InMemoryMBeanServer;
pub use services::{CatService, ClearSummary};
