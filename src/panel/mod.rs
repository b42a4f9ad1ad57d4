//! Control panel - a holding place for exhibit-wide controls
//!
//! The panel owns an ordered set of hosted widgets, registers itself in the
//! exhibit's component registry under `"controlPanel"`, and optionally hides
//! itself until the pointer hovers over it.
//!
//! ## Architecture
//!
//! - `ControlPanel`: lifecycle (create, register, initialize UI, dispose) and the widget collection
//! - `PanelLink`: cheap handle given to widgets and stored in the registry
//! - `PanelSettings`: typed view of the option table `CONTROL_PANEL_SETTINGS`
//! - `hover`: the reveal-on-hover state machine
//! - `Reconstruct`: hook run after every structural change to the widget collection

mod control_panel;
mod hover;
mod settings;

pub use control_panel::{install, ControlPanel, CONTROL_PANEL_CLASS, REGISTRY_KEY};
pub use hover::RevealState;
pub use settings::{
    PanelSettings, CONTROL_PANEL_SETTINGS, DEVELOPER_MODE, HOVER_REVEAL, SHOW_BOOKMARK,
    SHOW_TOOLBOX,
};

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::dom::Element;
use crate::widgets::{WidgetFactories, WidgetHandle};

/// State shared between a panel, its hover listeners and the links it hands out
#[derive(Debug)]
pub(crate) struct PanelState {
    id: String,
    alive: Cell<bool>,
    hovering: Cell<bool>,
    child_open: Cell<bool>,
    reveal: Cell<RevealState>,
}

impl PanelState {
    pub(crate) fn new(id: String) -> Self {
        Self {
            id,
            alive: Cell::new(true),
            hovering: Cell::new(false),
            child_open: Cell::new(false),
            reveal: Cell::new(RevealState::Revealed),
        }
    }
}

/// Handle through which widgets and registry lookups reach a panel.
///
/// Once the panel is disposed the link goes inert: `is_alive` is false and
/// child notifications are ignored.
#[derive(Clone)]
pub struct PanelLink {
    state: Rc<PanelState>,
}

impl PanelLink {
    pub fn id(&self) -> &str {
        &self.state.id
    }

    pub fn is_alive(&self) -> bool {
        self.state.alive.get()
    }

    /// A hosted widget opened a popover; suppresses hover-driven hiding
    pub fn child_opened(&self) {
        if self.is_alive() {
            self.state.child_open.set(true);
        }
    }

    pub fn child_closed(&self) {
        if self.is_alive() {
            self.state.child_open.set(false);
        }
    }

    pub fn is_child_open(&self) -> bool {
        self.state.child_open.get()
    }

    pub fn is_hovering(&self) -> bool {
        self.state.hovering.get()
    }

    pub fn reveal_state(&self) -> RevealState {
        self.state.reveal.get()
    }

    /// True if both links point at the same panel
    pub fn ptr_eq(&self, other: &PanelLink) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl fmt::Debug for PanelLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelLink")
            .field("id", &self.state.id)
            .field("alive", &self.state.alive.get())
            .finish()
    }
}

/// Hook invoked after every structural change to a panel's widgets.
///
/// The panel itself performs no layout; presentation layers plug in here.
pub trait Reconstruct {
    fn reconstruct(&mut self, container: Option<&Element>, widgets: &[WidgetHandle]);
}

/// Default strategy: do nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReconstruct;

impl Reconstruct for NoopReconstruct {
    fn reconstruct(&mut self, _container: Option<&Element>, _widgets: &[WidgetHandle]) {}
}

impl<F> Reconstruct for F
where
    F: FnMut(Option<&Element>, &[WidgetHandle]),
{
    fn reconstruct(&mut self, container: Option<&Element>, widgets: &[WidgetHandle]) {
        self(container, widgets)
    }
}

/// Collaborators injected at construction
pub struct PanelHooks {
    pub factories: WidgetFactories,
    pub reconstruct: Box<dyn Reconstruct>,
}

impl Default for PanelHooks {
    fn default() -> Self {
        Self {
            factories: WidgetFactories::default(),
            reconstruct: Box::new(NoopReconstruct),
        }
    }
}

impl PanelHooks {
    /// Builder: replace the reconstruct strategy
    pub fn with_reconstruct(mut self, reconstruct: impl Reconstruct + 'static) -> Self {
        self.reconstruct = Box::new(reconstruct);
        self
    }

    /// Builder: replace the widget factories
    pub fn with_factories(mut self, factories: WidgetFactories) -> Self {
        self.factories = factories;
        self
    }
}
