//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from its host
//! runtime. They contain no implementation details and use only domain types.

pub mod mbean_server;
pub mod registration;

use thiserror::Error;

use crate::domain::ObjectNameError;

pub use mbean_server::MBeanServerPort;
pub use registration::{MBeanRegistration, ManagedBean, RegistrationError};

/// Domain-specific errors for registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The identifier is not a valid object name.
    #[error("Invalid object name: {0}")]
    InvalidName(#[from] ObjectNameError),

    /// Beans cannot be registered under a pattern.
    #[error("Pattern names cannot be registered: {0}")]
    PatternNotAllowed(String),

    /// A bean is already registered under this identifier.
    #[error("Instance already exists: {0}")]
    InstanceAlreadyExists(String),

    /// No bean is registered under this identifier.
    #[error("Instance not found: {0}")]
    InstanceNotFound(String),

    /// The bean's `pre_register` hook refused the registration.
    #[error("Registration vetoed: {0}")]
    RegistrationVetoed(String),

    /// The bean's `pre_deregister` hook refused the removal.
    #[error("Deregistration of {name} vetoed: {reason}")]
    DeregistrationVetoed { name: String, reason: String },
}

impl From<RegistrationError> for RegistryError {
    fn from(err: RegistrationError) -> Self {
        match err {
            RegistrationError::InvalidName(e) => Self::InvalidName(e),
            RegistrationError::Vetoed(reason) => Self::RegistrationVetoed(reason),
        }
    }
}

/// Core error type for semantic domain errors.
///
/// Adapters map this to their own error types (HTTP status codes, CLI exit
/// codes).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Registry operation failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Validation error (invalid input).
    #[error("Validation error: {0}")]
    Validation(String),
}
