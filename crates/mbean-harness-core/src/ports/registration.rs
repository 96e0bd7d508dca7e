//! Bean lifecycle callbacks.
//!
//! The registry drives every bean through these hooks. `pre_register` is
//! where a bean assigns its own identifier.

use thiserror::Error;

use crate::domain::{AttributeError, AttributeValue, ObjectName, ObjectNameError};

/// Failure raised by a bean from one of its lifecycle hooks.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// The bean could not derive a valid identifier.
    #[error(transparent)]
    InvalidName(#[from] ObjectNameError),

    /// The bean refused the transition.
    #[error("Vetoed: {0}")]
    Vetoed(String),
}

/// Lifecycle notifications a registry sends to a bean.
///
/// Call order for a successful registration is `pre_register` then
/// `post_register(true)`. A registration that fails after `pre_register`
/// returned a name calls `post_register(false)`. Removal calls
/// `pre_deregister`, and `post_deregister` only if the bean was removed.
pub trait MBeanRegistration {
    /// Decide the identifier the bean is registered under.
    ///
    /// `candidate` is the name the caller asked for, if any.
    fn pre_register(&mut self, candidate: Option<&ObjectName>) -> Result<ObjectName, RegistrationError>;

    fn post_register(&mut self, registration_done: bool);

    /// Returning an error keeps the bean registered.
    fn pre_deregister(&mut self) -> Result<(), RegistrationError>;

    fn post_deregister(&mut self);
}

/// A bean that can live in a registry and be introspected.
pub trait ManagedBean: MBeanRegistration + Send + Sync {
    /// Short type name reported in snapshots.
    fn class_name(&self) -> &str;

    /// Names accepted by [`ManagedBean::get_attribute`], in display order.
    fn attribute_names(&self) -> &[&'static str];

    fn get_attribute(&self, attribute: &str) -> Result<AttributeValue, AttributeError>;
}
