//! Reset-history widget (developer mode)

use serde_json::Value;

use super::{append_button, widget_handle, Widget, WidgetHandle};
use crate::dom::Element;
use crate::error::Result;
use crate::ui_context::UiContext;

pub const RESET_HISTORY_BUTTON_CLASS: &str = "exhibit-resetHistoryWidget-button";

#[derive(Debug)]
pub struct ResetHistoryWidget {
    ui_context: UiContext,
    button: Element,
}

impl ResetHistoryWidget {
    pub fn create(
        configuration: &Value,
        container: &Element,
        ui_context: &UiContext,
    ) -> Result<WidgetHandle> {
        Ok(widget_handle(Self::new(configuration, container, ui_context)?))
    }

    pub fn new(configuration: &Value, container: &Element, ui_context: &UiContext) -> Result<Self> {
        let ui_context = UiContext::create(configuration, ui_context)?;
        let button = append_button(container, RESET_HISTORY_BUTTON_CLASS, "Reset history");
        Ok(Self { ui_context, button })
    }

    pub fn button(&self) -> &Element {
        &self.button
    }

    /// Drop every recorded history state; returns how many were cleared
    pub fn reset(&self) -> usize {
        let history = self.ui_context.exhibit().history();
        let cleared = history.len();
        history.clear();
        tracing::info!(cleared, "Reset exhibit history");
        cleared
    }
}

impl Widget for ResetHistoryWidget {
    fn name(&self) -> &'static str {
        "reset-history"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exhibit::Exhibit;
    use serde_json::json;

    #[test]
    fn test_reset_clears_history() {
        let exhibit = Exhibit::new();
        exhibit.history().push("a");
        exhibit.history().push("b");
        let ctx = UiContext::root(exhibit.clone());
        let widget = ResetHistoryWidget::new(&json!({}), &Element::new("div"), &ctx).unwrap();

        assert_eq!(widget.reset(), 2);
        assert!(exhibit.history().is_empty());
    }

    #[test]
    fn test_is_not_panel_bound() {
        let ctx = UiContext::root(Exhibit::new());
        let handle = ResetHistoryWidget::create(&json!({}), &Element::new("div"), &ctx).unwrap();
        assert!(handle.borrow_mut().as_panel_bound().is_none());
        assert_eq!(handle.borrow().name(), "reset-history");
    }
}
