//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use control_panel::dom::Element;
use control_panel::geometry::Rect;
use control_panel::panel::{self, PanelHooks};
use control_panel::widgets::{PanelBound, Widget, WidgetHandle};
use control_panel::{Exhibit, PanelLink, UiContext};

/// Exhibit with the control panel namespace bootstrapped
pub fn ready_exhibit() -> Rc<Exhibit> {
    let exhibit = Exhibit::new();
    panel::install(&exhibit);
    exhibit.register_components();
    exhibit
}

/// Root UI context of a bootstrapped exhibit
pub fn ready_context() -> UiContext {
    UiContext::root(ready_exhibit())
}

/// Container at `{left:10, top:10, width:100, height:50}`
pub fn container() -> Element {
    Element::new("div").with_bounds(Rect::new(10.0, 10.0, 100.0, 50.0))
}

/// Hooks whose reconstruct strategy counts its invocations
pub fn counting_hooks() -> (PanelHooks, Rc<Cell<usize>>) {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let hooks = PanelHooks::default()
        .with_reconstruct(move |_: Option<&Element>, _: &[WidgetHandle]| {
            counter.set(counter.get() + 1)
        });
    (hooks, calls)
}

/// Widget without the panel-binding capability
pub struct PlainWidget;

impl Widget for PlainWidget {
    fn name(&self) -> &'static str {
        "plain"
    }
}

/// Widget recording the panel links it was bound to
#[derive(Default)]
pub struct RecordingWidget {
    pub bindings: Rc<RefCell<Vec<PanelLink>>>,
}

impl Widget for RecordingWidget {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn as_panel_bound(&mut self) -> Option<&mut dyn PanelBound> {
        Some(self)
    }
}

impl PanelBound for RecordingWidget {
    fn set_control_panel(&mut self, panel: PanelLink) {
        self.bindings.borrow_mut().push(panel);
    }
}
