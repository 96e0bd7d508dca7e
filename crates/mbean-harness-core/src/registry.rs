//! In-memory registry implementation.
//!
//! Each identifier's slot is guarded by the map's shard lock for the whole
//! add or remove transition, including the lifecycle hooks that run during
//! it. Unrelated identifiers on other shards proceed in parallel.

use std::collections::BTreeMap;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use crate::domain::{AttributeReading, BeanSnapshot, ObjectName};
use crate::ports::{MBeanServerPort, ManagedBean, RegistrationError, RegistryError};

/// Process-wide bean table backed by a concurrent hash map.
#[derive(Default)]
pub struct InMemoryMBeanServer {
    beans: DashMap<ObjectName, Box<dyn ManagedBean>>,
}

impl InMemoryMBeanServer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MBeanServerPort for InMemoryMBeanServer {
    fn register(
        &self,
        mut bean: Box<dyn ManagedBean>,
        name: Option<ObjectName>,
    ) -> Result<ObjectName, RegistryError> {
        let object_name = bean.pre_register(name.as_ref())?;

        if object_name.is_pattern() {
            bean.post_register(false);
            return Err(RegistryError::PatternNotAllowed(object_name.to_string()));
        }

        match self.beans.entry(object_name.clone()) {
            Entry::Occupied(_) => {
                bean.post_register(false);
                Err(RegistryError::InstanceAlreadyExists(object_name.to_string()))
            }
            Entry::Vacant(slot) => {
                let mut registered = slot.insert(bean);
                registered.value_mut().post_register(true);
                debug!(name = %object_name, "registered bean");
                Ok(object_name)
            }
        }
    }

    fn query_names(&self, pattern: Option<&ObjectName>) -> Vec<ObjectName> {
        let mut names: Vec<ObjectName> = self
            .beans
            .iter()
            .map(|entry| entry.key().clone())
            .filter(|name| pattern.is_none_or(|p| p.matches(name)))
            .collect();
        names.sort();
        names
    }

    fn unregister(&self, name: &ObjectName) -> Result<(), RegistryError> {
        let mut veto: Option<RegistrationError> = None;

        let removed = self.beans.remove_if_mut(name, |_, bean| match bean.pre_deregister() {
            Ok(()) => true,
            Err(e) => {
                veto = Some(e);
                false
            }
        });

        match (removed, veto) {
            (Some((_, mut bean)), _) => {
                bean.post_deregister();
                debug!(%name, "unregistered bean");
                Ok(())
            }
            (None, Some(e)) => Err(RegistryError::DeregistrationVetoed {
                name: name.to_string(),
                reason: e.to_string(),
            }),
            (None, None) => Err(RegistryError::InstanceNotFound(name.to_string())),
        }
    }

    fn is_registered(&self, name: &ObjectName) -> bool {
        self.beans.contains_key(name)
    }

    fn bean_count(&self) -> usize {
        self.beans.len()
    }

    fn snapshot(&self, name: &ObjectName) -> Result<BeanSnapshot, RegistryError> {
        let entry = self
            .beans
            .get(name)
            .ok_or_else(|| RegistryError::InstanceNotFound(name.to_string()))?;
        let bean = entry.value();

        let attributes: BTreeMap<String, AttributeReading> = bean
            .attribute_names()
            .iter()
            .map(|attribute| {
                (
                    (*attribute).to_string(),
                    AttributeReading::from(bean.get_attribute(attribute)),
                )
            })
            .collect();

        Ok(BeanSnapshot {
            object_name: entry.key().clone(),
            class_name: bean.class_name().to_string(),
            attributes,
        })
    }
}
