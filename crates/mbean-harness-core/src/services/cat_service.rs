//! Cat service - the single entry point for registry access.
//!
//! Adapters (the HTTP control service) call this service; they never touch
//! the registry port directly.

use std::sync::Arc;

use tracing::{error, info};

use crate::domain::{
    BeanSnapshot, CAT_TYPE, Cat, CompositeDataCat, CustomCat, ExceptionalCat, ObjectName,
    TEST_DOMAIN,
};
use crate::ports::{CoreError, MBeanServerPort, ManagedBean, RegistryError};

/// Outcome of a clear request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClearSummary {
    /// Beans that were deregistered.
    pub removed: usize,
    /// Matching beans that could not be deregistered.
    pub failed: usize,
}

/// Registers and clears test cats on an injected registry.
pub struct CatService {
    server: Arc<dyn MBeanServerPort>,
}

impl CatService {
    pub fn new(server: Arc<dyn MBeanServerPort>) -> Self {
        Self { server }
    }

    /// Pattern selecting every plain cat: `test:type=Cat,name=*`.
    pub fn cat_pattern() -> Result<ObjectName, CoreError> {
        ObjectName::from_properties(TEST_DOMAIN, [("type", CAT_TYPE), ("name", "*")])
            .map_err(|e| CoreError::Validation(e.to_string()))
    }

    /// Register one cat under `test:type=Cat,name=<name>`.
    pub fn register_cat(&self, cat: Cat) -> Result<ObjectName, CoreError> {
        info!("registering {cat}");
        self.register_bean(Box::new(cat))
    }

    /// Register cats in order.
    ///
    /// Stops at the first failure; cats registered before it stay registered.
    pub fn register_cat_batch(&self, cats: Vec<Cat>) -> Result<Vec<ObjectName>, CoreError> {
        info!(count = cats.len(), "registering batch of cats");
        cats.into_iter().map(|cat| self.register_cat(cat)).collect()
    }

    pub fn register_composite_cat(&self, cat: Cat) -> Result<ObjectName, CoreError> {
        let composite = CompositeDataCat::new(cat);
        info!("registering {composite}");
        self.register_bean(Box::new(composite))
    }

    pub fn register_exceptional_cat(&self, cat: ExceptionalCat) -> Result<ObjectName, CoreError> {
        info!("registering {cat}");
        self.register_bean(Box::new(cat))
    }

    pub fn register_custom_cat(&self, cat: CustomCat) -> Result<ObjectName, CoreError> {
        info!("registering {cat}");
        self.register_bean(Box::new(cat))
    }

    /// Beans derive their own identifier in `pre_register`; no candidate is passed.
    fn register_bean(&self, bean: Box<dyn ManagedBean>) -> Result<ObjectName, CoreError> {
        self.server.register(bean, None).map_err(|e| match e {
            RegistryError::InvalidName(name_error) => CoreError::Validation(name_error.to_string()),
            other => other.into(),
        })
    }

    /// Deregister every plain cat.
    ///
    /// Best effort per entry: a failed removal is logged and counted, and
    /// the remaining entries are still processed. Cats registered after the
    /// enumeration are left alone.
    pub fn clear_cats(&self) -> Result<ClearSummary, CoreError> {
        let pattern = Self::cat_pattern()?;
        let mut summary = ClearSummary::default();

        for name in self.server.query_names(Some(&pattern)) {
            info!("unregistering {name}");
            match self.server.unregister(&name) {
                Ok(()) => summary.removed += 1,
                Err(e) => {
                    error!(%name, error = %e, "unregistering");
                    summary.failed += 1;
                }
            }
        }

        Ok(summary)
    }

    /// Snapshot every bean selected by `pattern`.
    ///
    /// Beans removed between the query and the snapshot are skipped.
    pub fn describe(&self, pattern: &str) -> Result<Vec<BeanSnapshot>, CoreError> {
        let pattern = ObjectName::parse(pattern).map_err(|e| CoreError::Validation(e.to_string()))?;

        let mut snapshots = Vec::new();
        for name in self.server.query_names(Some(&pattern)) {
            match self.server.snapshot(&name) {
                Ok(snapshot) => snapshots.push(snapshot),
                Err(RegistryError::InstanceNotFound(_)) => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(snapshots)
    }
}
