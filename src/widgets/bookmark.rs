//! Bookmark widget: popover with a link to the current exhibit state

use serde_json::Value;

use super::{append_button, widget_handle, PanelBound, Popover, Widget, WidgetHandle};
use crate::dom::Element;
use crate::error::Result;
use crate::panel::PanelLink;
use crate::ui_context::UiContext;

pub const BOOKMARK_BUTTON_CLASS: &str = "exhibit-bookmarkWidget-button";

/// Base used when the configuration does not name one
pub const DEFAULT_BOOKMARK_BASE: &str = "exhibit:";

#[derive(Debug)]
pub struct BookmarkWidget {
    ui_context: UiContext,
    button: Element,
    base: String,
    popup: Popover,
}

impl BookmarkWidget {
    pub fn create(
        configuration: &Value,
        container: &Element,
        ui_context: &UiContext,
    ) -> Result<WidgetHandle> {
        Ok(widget_handle(Self::new(configuration, container, ui_context)?))
    }

    pub fn new(configuration: &Value, container: &Element, ui_context: &UiContext) -> Result<Self> {
        let ui_context = UiContext::create(configuration, ui_context)?;
        let base = configuration
            .get("base")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_BOOKMARK_BASE)
            .to_string();
        let button = append_button(container, BOOKMARK_BUTTON_CLASS, "Bookmark this exhibit");
        Ok(Self {
            ui_context,
            button,
            base,
            popup: Popover::default(),
        })
    }

    pub fn button(&self) -> &Element {
        &self.button
    }

    /// Bookmark for the current history state; just the base when there is none
    pub fn generate_bookmark(&self) -> String {
        match self.ui_context.exhibit().history().current() {
            Some(state) => format!("{}#{}", self.base, state),
            None => self.base.clone(),
        }
    }

    /// Show the popover; returns the bookmark it displays
    pub fn open_popup(&mut self) -> String {
        self.popup.open();
        self.generate_bookmark()
    }

    pub fn close_popup(&mut self) {
        self.popup.close();
    }

    pub fn is_popup_open(&self) -> bool {
        self.popup.open
    }
}

impl Widget for BookmarkWidget {
    fn name(&self) -> &'static str {
        "bookmark"
    }

    fn as_panel_bound(&mut self) -> Option<&mut dyn PanelBound> {
        Some(self)
    }
}

impl PanelBound for BookmarkWidget {
    fn set_control_panel(&mut self, panel: PanelLink) {
        self.popup.panel = Some(panel);
    }

    fn clear_control_panel(&mut self) {
        self.popup.unbind();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exhibit::Exhibit;
    use serde_json::json;

    #[test]
    fn test_bookmark_tracks_history() {
        let exhibit = Exhibit::new();
        let ctx = UiContext::root(exhibit.clone());
        let container = Element::new("div");
        let widget =
            BookmarkWidget::new(&json!({"base": "https://example.org/"}), &container, &ctx)
                .unwrap();

        assert_eq!(widget.generate_bookmark(), "https://example.org/");
        exhibit.history().push("facet=type:Person");
        assert_eq!(
            widget.generate_bookmark(),
            "https://example.org/#facet=type:Person"
        );
    }

    #[test]
    fn test_popup_state() {
        let ctx = UiContext::root(Exhibit::new());
        let container = Element::new("div");
        let mut widget = BookmarkWidget::new(&json!({}), &container, &ctx).unwrap();
        assert_eq!(widget.open_popup(), DEFAULT_BOOKMARK_BASE);
        assert!(widget.is_popup_open());
        widget.close_popup();
        assert!(!widget.is_popup_open());
        assert_eq!(container.children_with_class(BOOKMARK_BUTTON_CLASS).len(), 1);
    }
}
