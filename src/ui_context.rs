//! UI contexts
//!
//! A UI context scopes a component to a data collection within an exhibit.
//! Contexts form a chain: each one is created from a parent context plus the
//! component's own configuration, inheriting the parent's collection unless
//! the configuration names another one via `collectionID`.

use std::rc::Rc;

use serde_json::Value;

use crate::dom::Element;
use crate::error::{PanelError, Result};
use crate::exhibit::{Collection, Exhibit};

/// Configuration key / declarative attribute naming the collection
pub const COLLECTION_ID_KEY: &str = "collectionID";

#[derive(Debug, Clone)]
pub struct UiContext {
    exhibit: Rc<Exhibit>,
    collection: Collection,
    depth: usize,
    disposed: bool,
}

impl UiContext {
    /// Top-level context bound to the exhibit's default collection
    pub fn root(exhibit: Rc<Exhibit>) -> Self {
        let collection = exhibit.default_collection();
        Self {
            exhibit,
            collection,
            depth: 0,
            disposed: false,
        }
    }

    /// Child context from a structured configuration object
    pub fn create(configuration: &Value, parent: &UiContext) -> Result<Self> {
        let collection_id = configuration
            .get(COLLECTION_ID_KEY)
            .and_then(Value::as_str)
            .map(str::to_string);
        parent.child(collection_id)
    }

    /// Child context from declarative attributes on `element`
    pub fn create_from_dom(element: &Element, parent: &UiContext) -> Result<Self> {
        parent.child(element.ex_attribute(COLLECTION_ID_KEY))
    }

    fn child(&self, collection_id: Option<String>) -> Result<Self> {
        if self.disposed {
            return Err(PanelError::Disposed);
        }
        let collection = match collection_id {
            Some(id) => self
                .exhibit
                .collection(&id)
                .ok_or(PanelError::UnknownCollection(id))?,
            None => self.collection.clone(),
        };
        Ok(Self {
            exhibit: Rc::clone(&self.exhibit),
            collection,
            depth: self.depth + 1,
            disposed: false,
        })
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn exhibit(&self) -> &Rc<Exhibit> {
        &self.exhibit
    }

    /// Number of ancestors (0 for a root context)
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Mark the context as released; no further children can be created from it
    pub fn dispose(&mut self) {
        self.disposed = true;
    }
}
