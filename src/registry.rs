//! Component registry
//!
//! Directory of live component instances keyed first by a registry key
//! (component category, e.g. `"controlPanel"`) and then by instance id.
//! The registry is an explicit context object owned by the exhibit and
//! shared as a [`RegistryHandle`]; nothing here is process-global.

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{PanelError, Result};

/// Shared, single-threaded handle to a registry
pub type RegistryHandle = Rc<RefCell<Registry>>;

/// Type-erased registered instance
pub type Component = Rc<dyn Any>;

#[derive(Default)]
struct Namespace {
    components: HashMap<String, Component>,
}

#[derive(Default)]
pub struct Registry {
    namespaces: HashMap<String, Namespace>,
    identifiers: HashMap<String, u64>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new shared handle around an empty registry
    pub fn handle() -> RegistryHandle {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn has_registry(&self, key: &str) -> bool {
        self.namespaces.contains_key(key)
    }

    /// Create the namespace for `key`; returns false if it already existed
    pub fn create_registry(&mut self, key: &str) -> bool {
        if self.has_registry(key) {
            return false;
        }
        tracing::debug!(key, "Created registry namespace");
        self.namespaces.insert(key.to_string(), Namespace::default());
        true
    }

    pub fn is_registered(&self, key: &str, id: &str) -> bool {
        self.namespaces
            .get(key)
            .is_some_and(|ns| ns.components.contains_key(id))
    }

    /// Register `component` under `key`/`id`.
    ///
    /// Fails when the namespace does not exist or the slot is taken.
    pub fn register(&mut self, key: &str, id: &str, component: Component) -> Result<()> {
        let ns = self
            .namespaces
            .get_mut(key)
            .ok_or_else(|| PanelError::UnknownRegistry(key.to_string()))?;
        if ns.components.contains_key(id) {
            return Err(PanelError::AlreadyRegistered {
                key: key.to_string(),
                id: id.to_string(),
            });
        }
        ns.components.insert(id.to_string(), component);
        tracing::debug!(key, id, "Registered component");
        Ok(())
    }

    /// Remove the component at `key`/`id`, returning it if it was present.
    ///
    /// Missing namespaces and ids are not errors.
    pub fn unregister(&mut self, key: &str, id: &str) -> Option<Component> {
        let removed = self.namespaces.get_mut(key)?.components.remove(id);
        if removed.is_some() {
            tracing::debug!(key, id, "Unregistered component");
        }
        removed
    }

    /// Type-erased lookup
    pub fn component(&self, key: &str, id: &str) -> Option<Component> {
        self.namespaces.get(key)?.components.get(id).cloned()
    }

    /// Typed lookup; `None` if absent or of another type
    pub fn get<T: 'static>(&self, key: &str, id: &str) -> Option<Rc<T>> {
        self.component(key, id)?.downcast::<T>().ok()
    }

    /// Number of components registered under `key`
    pub fn len(&self, key: &str) -> usize {
        self.namespaces
            .get(key)
            .map_or(0, |ns| ns.components.len())
    }

    pub fn is_empty(&self, key: &str) -> bool {
        self.len(key) == 0
    }

    /// Ids registered under `key`, sorted
    pub fn ids(&self, key: &str) -> Vec<String> {
        let mut ids: Vec<String> = self
            .namespaces
            .get(key)
            .map(|ns| ns.components.keys().cloned().collect())
            .unwrap_or_default();
        ids.sort();
        ids
    }

    /// Next identifier in the sequence for `key`.
    ///
    /// The counter is monotonic, so ids stay unique across unregistration.
    /// It does not require the namespace to exist.
    pub fn generate_identifier(&mut self, key: &str) -> String {
        let next = self.identifiers.entry(key.to_string()).or_insert(0);
        let id = *next;
        *next += 1;
        id.to_string()
    }
}
