//! Host element model
//!
//! A small retained tree standing in for the embedding page: elements carry
//! attributes, class tags, page-space bounds and an opacity with the last fade
//! transition applied to it. Pointer events are delivered by the host through
//! `Element::dispatch_pointer_enter` and `Document::dispatch_pointer_move`.
//!
//! Handles are cheap to clone and compare by identity (`ptr_eq`).

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::geometry::Rect;

/// Duration of a "fast" fade
pub const FADE_FAST: Duration = Duration::from_millis(200);

/// Near-instant fade used for the initial hide
pub const FADE_INSTANT: Duration = Duration::from_millis(1);

/// Prefix for HTML5-style declarative attributes (`data-ex-show-toolbox`)
pub const DATA_ATTRIBUTE_PREFIX: &str = "data-ex-";

/// Prefix for namespaced declarative attributes (`ex:showToolbox`)
pub const NAMESPACED_ATTRIBUTE_PREFIX: &str = "ex:";

/// Opacity transition last applied to an element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    pub from: f32,
    pub to: f32,
    pub duration: Duration,
}

/// Pointer position in page coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerEvent {
    pub page_x: f32,
    pub page_y: f32,
}

impl PointerEvent {
    pub fn new(page_x: f32, page_y: f32) -> Self {
        Self { page_x, page_y }
    }
}

/// Handle returned when installing a listener, used to detach it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        ListenerId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

type EnterHandler = Rc<dyn Fn(&Element, &PointerEvent)>;
type MoveHandler = Rc<dyn Fn(&PointerEvent)>;

struct ElementData {
    tag: String,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    bounds: Rect,
    opacity: f32,
    fade: Option<Fade>,
    children: Vec<Element>,
    enter_listeners: Vec<(ListenerId, EnterHandler)>,
}

/// Shared handle to an element of the host page
#[derive(Clone)]
pub struct Element(Rc<RefCell<ElementData>>);

/// Non-owning element reference for listeners that must not keep it alive
#[derive(Clone)]
pub struct WeakElement(Weak<RefCell<ElementData>>);

impl WeakElement {
    pub fn upgrade(&self) -> Option<Element> {
        self.0.upgrade().map(Element)
    }
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Element(Rc::new(RefCell::new(ElementData {
            tag: tag.to_string(),
            attributes: BTreeMap::new(),
            classes: Vec::new(),
            bounds: Rect::default(),
            opacity: 1.0,
            fade: None,
            children: Vec::new(),
            enter_listeners: Vec::new(),
        })))
    }

    /// Builder: set an attribute
    pub fn with_attribute(self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Builder: set page-space bounds
    pub fn with_bounds(self, bounds: Rect) -> Self {
        self.set_bounds(bounds);
        self
    }

    pub fn tag(&self) -> String {
        self.0.borrow().tag.clone()
    }

    /// Identity comparison
    pub fn ptr_eq(&self, other: &Element) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn downgrade(&self) -> WeakElement {
        WeakElement(Rc::downgrade(&self.0))
    }

    // === Attributes ===

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.0.borrow().attributes.get(name).cloned()
    }

    pub fn set_attribute(&self, name: &str, value: &str) {
        self.0
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    pub fn remove_attribute(&self, name: &str) -> Option<String> {
        self.0.borrow_mut().attributes.remove(name)
    }

    /// The `id` attribute, if present and non-empty
    pub fn id(&self) -> Option<String> {
        self.attribute("id").filter(|id| !id.is_empty())
    }

    /// Look up a declarative setting attribute by its camelCase name.
    ///
    /// `data-ex-<kebab-name>` wins over `ex:<name>`.
    pub fn ex_attribute(&self, name: &str) -> Option<String> {
        let data = self.0.borrow();
        data.attributes
            .get(&format!("{}{}", DATA_ATTRIBUTE_PREFIX, kebab_case(name)))
            .or_else(|| {
                data.attributes
                    .get(&format!("{}{}", NAMESPACED_ATTRIBUTE_PREFIX, name))
            })
            .cloned()
    }

    // === Class tags ===

    pub fn add_class(&self, class: &str) {
        let mut data = self.0.borrow_mut();
        if !data.classes.iter().any(|c| c == class) {
            data.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&self, class: &str) {
        self.0.borrow_mut().classes.retain(|c| c != class);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.iter().any(|c| c == class)
    }

    pub fn classes(&self) -> Vec<String> {
        self.0.borrow().classes.clone()
    }

    // === Layout ===

    /// Live page-space box (offset plus outer width/height)
    pub fn bounds(&self) -> Rect {
        self.0.borrow().bounds
    }

    pub fn set_bounds(&self, bounds: Rect) {
        self.0.borrow_mut().bounds = bounds;
    }

    // === Opacity ===

    /// Opacity the element settles at once its current fade completes
    pub fn opacity(&self) -> f32 {
        self.0.borrow().opacity
    }

    /// Last fade applied, if any
    pub fn fade(&self) -> Option<Fade> {
        self.0.borrow().fade
    }

    /// Animate opacity to `to` over `duration`
    pub fn fade_to(&self, duration: Duration, to: f32) {
        let mut data = self.0.borrow_mut();
        let to = to.clamp(0.0, 1.0);
        data.fade = Some(Fade {
            from: data.opacity,
            to,
            duration,
        });
        data.opacity = to;
    }

    /// Set opacity without a transition, discarding any recorded fade
    pub fn set_opacity(&self, opacity: f32) {
        let mut data = self.0.borrow_mut();
        data.opacity = opacity.clamp(0.0, 1.0);
        data.fade = None;
    }

    // === Children ===

    pub fn append_child(&self, child: Element) {
        self.0.borrow_mut().children.push(child);
    }

    pub fn children(&self) -> Vec<Element> {
        self.0.borrow().children.clone()
    }

    /// Keep only the children for which `keep` returns true
    pub fn retain_children(&self, mut keep: impl FnMut(&Element) -> bool) {
        self.0.borrow_mut().children.retain(|c| keep(c));
    }

    /// Children carrying the given class tag
    pub fn children_with_class(&self, class: &str) -> Vec<Element> {
        self.0
            .borrow()
            .children
            .iter()
            .filter(|c| c.has_class(class))
            .cloned()
            .collect()
    }

    // === Pointer enter ===

    pub fn on_pointer_enter(
        &self,
        handler: impl Fn(&Element, &PointerEvent) + 'static,
    ) -> ListenerId {
        let id = ListenerId::next();
        self.0
            .borrow_mut()
            .enter_listeners
            .push((id, Rc::new(handler)));
        id
    }

    /// Detach a pointer-enter listener; returns false if it was not installed
    pub fn remove_pointer_enter(&self, id: ListenerId) -> bool {
        let mut data = self.0.borrow_mut();
        let before = data.enter_listeners.len();
        data.enter_listeners.retain(|(lid, _)| *lid != id);
        data.enter_listeners.len() != before
    }

    pub fn pointer_enter_listener_count(&self) -> usize {
        self.0.borrow().enter_listeners.len()
    }

    /// Deliver a pointer-enter event to every listener on this element
    pub fn dispatch_pointer_enter(&self, event: &PointerEvent) {
        // Snapshot so handlers may mutate the element
        let handlers: Vec<EnterHandler> = self
            .0
            .borrow()
            .enter_listeners
            .iter()
            .map(|(_, h)| Rc::clone(h))
            .collect();
        for handler in handlers {
            handler(self, event);
        }
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0.borrow();
        f.debug_struct("Element")
            .field("tag", &data.tag)
            .field("attributes", &data.attributes)
            .field("classes", &data.classes)
            .field("bounds", &data.bounds)
            .field("opacity", &data.opacity)
            .field("children", &data.children.len())
            .finish()
    }
}

#[derive(Default)]
struct DocumentData {
    move_listeners: Vec<(ListenerId, MoveHandler)>,
}

/// The page-wide event target
#[derive(Clone, Default)]
pub struct Document(Rc<RefCell<DocumentData>>);

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_pointer_move(&self, handler: impl Fn(&PointerEvent) + 'static) -> ListenerId {
        let id = ListenerId::next();
        self.0
            .borrow_mut()
            .move_listeners
            .push((id, Rc::new(handler)));
        id
    }

    /// Detach a pointer-move listener; returns false if it was not installed
    pub fn remove_pointer_move(&self, id: ListenerId) -> bool {
        let mut data = self.0.borrow_mut();
        let before = data.move_listeners.len();
        data.move_listeners.retain(|(lid, _)| *lid != id);
        data.move_listeners.len() != before
    }

    pub fn pointer_move_listener_count(&self) -> usize {
        self.0.borrow().move_listeners.len()
    }

    /// Deliver a pointer-move event to every document listener
    pub fn dispatch_pointer_move(&self, event: &PointerEvent) {
        let handlers: Vec<MoveHandler> = self
            .0
            .borrow()
            .move_listeners
            .iter()
            .map(|(_, h)| Rc::clone(h))
            .collect();
        for handler in handlers {
            handler(event);
        }
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("move_listeners", &self.pointer_move_listener_count())
            .finish()
    }
}

/// `showToolbox` -> `show-toolbox`, `collectionID` -> `collection-id`
pub fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            if prev_lower {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
            prev_lower = false;
        } else {
            out.push(ch);
            prev_lower = ch.is_ascii_lowercase() || ch.is_ascii_digit();
        }
    }
    out
}
