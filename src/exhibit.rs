//! The framework instance a panel lives in
//!
//! An [`Exhibit`] owns the component registry, the named data collections,
//! the page document that delivers pointer events, and the browsing history.
//! It also runs the one-shot "register components" bootstrap through which
//! component modules create their registry namespaces.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::dom::Document;
use crate::registry::{Registry, RegistryHandle};

/// Id of the collection every exhibit starts with
pub const DEFAULT_COLLECTION_ID: &str = "default";

/// A named data collection a UI context is scoped to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    id: Rc<str>,
}

impl Collection {
    pub fn new(id: &str) -> Self {
        Self { id: Rc::from(id) }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Ordered state labels recorded as the user interacts with the exhibit
#[derive(Debug, Clone, Default)]
pub struct History {
    states: Rc<RefCell<Vec<String>>>,
}

impl History {
    pub fn push(&self, state: &str) {
        self.states.borrow_mut().push(state.to_string());
    }

    pub fn current(&self) -> Option<String> {
        self.states.borrow().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.states.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.states.borrow_mut().clear();
    }
}

type ComponentHook = Box<dyn FnOnce(&mut Registry)>;

pub struct Exhibit {
    registry: RegistryHandle,
    collections: RefCell<BTreeMap<String, Collection>>,
    document: Document,
    history: History,
    component_hooks: RefCell<Vec<ComponentHook>>,
    components_registered: Cell<bool>,
}

impl Exhibit {
    pub fn new() -> Rc<Self> {
        Self::with_document(Document::new())
    }

    pub fn with_document(document: Document) -> Rc<Self> {
        let mut collections = BTreeMap::new();
        collections.insert(
            DEFAULT_COLLECTION_ID.to_string(),
            Collection::new(DEFAULT_COLLECTION_ID),
        );
        Rc::new(Self {
            registry: Registry::handle(),
            collections: RefCell::new(collections),
            document,
            history: History::default(),
            component_hooks: RefCell::new(Vec::new()),
            components_registered: Cell::new(false),
        })
    }

    pub fn registry(&self) -> RegistryHandle {
        Rc::clone(&self.registry)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn default_collection(&self) -> Collection {
        Collection::new(DEFAULT_COLLECTION_ID)
    }

    pub fn collection(&self, id: &str) -> Option<Collection> {
        self.collections.borrow().get(id).cloned()
    }

    /// Add (or return the existing) collection named `id`
    pub fn add_collection(&self, id: &str) -> Collection {
        self.collections
            .borrow_mut()
            .entry(id.to_string())
            .or_insert_with(|| Collection::new(id))
            .clone()
    }

    /// Subscribe to the one-shot component bootstrap.
    ///
    /// Hooks added after the bootstrap fired run immediately.
    pub fn on_register_components(&self, hook: impl FnOnce(&mut Registry) + 'static) {
        if self.components_registered.get() {
            hook(&mut self.registry.borrow_mut());
        } else {
            self.component_hooks.borrow_mut().push(Box::new(hook));
        }
    }

    /// Fire the component bootstrap; returns false if it already fired
    pub fn register_components(&self) -> bool {
        if self.components_registered.replace(true) {
            return false;
        }
        let hooks = std::mem::take(&mut *self.component_hooks.borrow_mut());
        tracing::debug!(hooks = hooks.len(), "Registering components");
        let mut registry = self.registry.borrow_mut();
        for hook in hooks {
            hook(&mut registry);
        }
        true
    }

    pub fn components_registered(&self) -> bool {
        self.components_registered.get()
    }
}

impl fmt::Debug for Exhibit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Exhibit")
            .field("collections", &self.collections.borrow().keys())
            .field("history", &self.history.len())
            .field("components_registered", &self.components_registered.get())
            .finish()
    }
}
