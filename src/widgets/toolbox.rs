//! Toolbox widget: export menu for the exhibit's data

use serde_json::Value;

use super::{append_button, widget_handle, PanelBound, Popover, Widget, WidgetHandle};
use crate::dom::Element;
use crate::error::Result;
use crate::panel::PanelLink;
use crate::ui_context::UiContext;

pub const TOOLBOX_BUTTON_CLASS: &str = "exhibit-toolboxWidget-button";

/// Formats offered by the export menu
pub const EXPORT_FORMATS: &[&str] = &[
    "RDF/XML",
    "Exhibit JSON",
    "Semantic wikitext",
    "TSV",
    "HTML",
];

#[derive(Debug)]
pub struct ToolboxWidget {
    ui_context: UiContext,
    button: Element,
    menu: Popover,
}

impl ToolboxWidget {
    pub fn create(
        configuration: &Value,
        container: &Element,
        ui_context: &UiContext,
    ) -> Result<WidgetHandle> {
        Ok(widget_handle(Self::new(configuration, container, ui_context)?))
    }

    pub fn new(configuration: &Value, container: &Element, ui_context: &UiContext) -> Result<Self> {
        let ui_context = UiContext::create(configuration, ui_context)?;
        let button = append_button(container, TOOLBOX_BUTTON_CLASS, "Export data");
        Ok(Self {
            ui_context,
            button,
            menu: Popover::default(),
        })
    }

    pub fn button(&self) -> &Element {
        &self.button
    }

    /// Collection whose items the menu exports
    pub fn collection_id(&self) -> &str {
        self.ui_context.collection().id()
    }

    pub fn open_menu(&mut self) -> &'static [&'static str] {
        self.menu.open();
        EXPORT_FORMATS
    }

    pub fn close_menu(&mut self) {
        self.menu.close();
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu.open
    }
}

impl Widget for ToolboxWidget {
    fn name(&self) -> &'static str {
        "toolbox"
    }

    fn as_panel_bound(&mut self) -> Option<&mut dyn PanelBound> {
        Some(self)
    }
}

impl PanelBound for ToolboxWidget {
    fn set_control_panel(&mut self, panel: PanelLink) {
        self.menu.panel = Some(panel);
    }

    fn clear_control_panel(&mut self) {
        self.menu.unbind();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exhibit::Exhibit;
    use serde_json::json;

    #[test]
    fn test_creates_button_in_container() {
        let container = Element::new("div");
        let ctx = UiContext::root(Exhibit::new());
        let widget = ToolboxWidget::new(&json!({}), &container, &ctx).unwrap();
        assert_eq!(container.children_with_class(TOOLBOX_BUTTON_CLASS).len(), 1);
        assert!(widget.button().ptr_eq(&container.children()[0]));
        assert_eq!(widget.collection_id(), "default");
    }

    #[test]
    fn test_menu_without_panel() {
        let container = Element::new("div");
        let ctx = UiContext::root(Exhibit::new());
        let mut widget = ToolboxWidget::new(&json!({}), &container, &ctx).unwrap();
        assert_eq!(widget.open_menu(), EXPORT_FORMATS);
        assert!(widget.is_menu_open());
        widget.close_menu();
        assert!(!widget.is_menu_open());
    }
}
