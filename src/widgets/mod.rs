//! Widgets hosted by the control panel
//!
//! A widget is any [`Widget`] behind a shared [`WidgetHandle`]; the panel
//! compares handles by identity. Widgets that need to call back into the
//! panel (to keep it revealed while a popover is open) expose the optional
//! [`PanelBound`] capability, which the panel queries when the widget is added.
//!
//! ## Built-in widgets
//!
//! - **ToolboxWidget**: export menu popover, panel-bound
//! - **BookmarkWidget**: bookmark popover built from the current history state, panel-bound
//! - **ResetHistoryWidget**: clears the exhibit history, plain

mod bookmark;
mod reset_history;
mod toolbox;

pub use bookmark::BookmarkWidget;
pub use reset_history::ResetHistoryWidget;
pub use toolbox::ToolboxWidget;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::dom::Element;
use crate::error::Result;
use crate::panel::PanelLink;
use crate::ui_context::UiContext;

/// A pluggable UI unit hosted by a panel
pub trait Widget {
    /// Short type name, used for logging
    fn name(&self) -> &'static str;

    /// Capability query for widgets that bind to their panel
    fn as_panel_bound(&mut self) -> Option<&mut dyn PanelBound> {
        None
    }
}

/// Capability of widgets that keep a link back to their hosting panel
pub trait PanelBound {
    /// Called once, when the widget is added to a panel
    fn set_control_panel(&mut self, panel: PanelLink);

    /// Called when the panel stops hosting the widget.
    ///
    /// A widget with an open popover reports it closed before dropping the link.
    fn clear_control_panel(&mut self) {}
}

/// Shared widget handle; equality is identity
pub type WidgetHandle = Rc<RefCell<dyn Widget>>;

/// Wrap a widget in a new handle
pub fn widget_handle<W: Widget + 'static>(widget: W) -> WidgetHandle {
    Rc::new(RefCell::new(widget))
}

/// Identity comparison of two handles
pub fn same_widget(a: &WidgetHandle, b: &WidgetHandle) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

/// Builds a widget from its configuration, hosting element and UI context
pub type WidgetFactory = Box<dyn Fn(&Value, &Element, &UiContext) -> Result<WidgetHandle>>;

/// Factories for the widgets a panel creates during UI initialization
pub struct WidgetFactories {
    pub toolbox: WidgetFactory,
    pub bookmark: WidgetFactory,
    pub reset_history: WidgetFactory,
}

impl Default for WidgetFactories {
    fn default() -> Self {
        Self {
            toolbox: Box::new(ToolboxWidget::create),
            bookmark: Box::new(BookmarkWidget::create),
            reset_history: Box::new(ResetHistoryWidget::create),
        }
    }
}

impl fmt::Debug for WidgetFactories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetFactories").finish_non_exhaustive()
    }
}

/// Open/closed state of a widget popover, reported to the bound panel
#[derive(Debug, Default)]
struct Popover {
    open: bool,
    panel: Option<PanelLink>,
}

impl Popover {
    fn open(&mut self) {
        if self.open {
            return;
        }
        self.open = true;
        if let Some(panel) = &self.panel {
            panel.child_opened();
        }
    }

    fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        if let Some(panel) = &self.panel {
            panel.child_closed();
        }
    }

    /// Forget the bound panel, releasing its open-child hold first
    fn unbind(&mut self) {
        if let Some(panel) = self.panel.take() {
            if self.open {
                panel.child_closed();
            }
        }
    }
}

/// Append a button element tagged with `class` to `container`
fn append_button(container: &Element, class: &str, label: &str) -> Element {
    let button = Element::new("div").with_attribute("title", label);
    button.add_class(class);
    container.append_child(button.clone());
    button
}
