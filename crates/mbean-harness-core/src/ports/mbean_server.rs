//! Registry port definition.
//!
//! This is the whole contract the harness needs from a managed-object
//! server: register, query by pattern, deregister, and introspect.

use super::{ManagedBean, RegistryError};
use crate::domain::{BeanSnapshot, ObjectName};

/// A process-wide table of beans keyed by object name.
///
/// Implementations must keep identifiers unique and must make each
/// identifier's add/remove transition atomic. Operations never block on I/O.
pub trait MBeanServerPort: Send + Sync {
    /// Register a bean, returning the name it was registered under.
    ///
    /// The final name comes from the bean's `pre_register` hook, which
    /// receives `name` as its candidate. Pattern names are rejected and an
    /// existing registration is never replaced
    /// (`Err(RegistryError::InstanceAlreadyExists)`).
    fn register(
        &self,
        bean: Box<dyn ManagedBean>,
        name: Option<ObjectName>,
    ) -> Result<ObjectName, RegistryError>;

    /// Names selected by `pattern` (all names when `None`), sorted by
    /// canonical form.
    fn query_names(&self, pattern: Option<&ObjectName>) -> Vec<ObjectName>;

    /// Remove a bean.
    ///
    /// Returns `Err(RegistryError::InstanceNotFound)` if nothing is
    /// registered under `name`, and `Err(RegistryError::DeregistrationVetoed)`
    /// if the bean's `pre_deregister` hook refused.
    fn unregister(&self, name: &ObjectName) -> Result<(), RegistryError>;

    fn is_registered(&self, name: &ObjectName) -> bool;

    fn bean_count(&self) -> usize;

    /// Read every attribute of a registered bean.
    fn snapshot(&self, name: &ObjectName) -> Result<BeanSnapshot, RegistryError>;
}
