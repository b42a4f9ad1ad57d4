//! Control panel lifecycle and widget collection

use std::fmt;
use std::rc::Rc;

use serde_json::{json, Value};

use super::hover::HoverReveal;
use super::{
    NoopReconstruct, PanelHooks, PanelLink, PanelSettings, PanelState, Reconstruct, RevealState,
    CONTROL_PANEL_SETTINGS,
};
use crate::dom::Element;
use crate::error::{PanelError, Result};
use crate::exhibit::Exhibit;
use crate::registry::Registry;
use crate::settings::{
    collect_settings, collect_settings_from_dom, get_configuration_from_dom, Settings,
};
use crate::ui_context::UiContext;
use crate::widgets::{same_widget, WidgetFactories, WidgetHandle};

/// Registry namespace for control panels
pub const REGISTRY_KEY: &str = "controlPanel";

/// Class tag added to the container
pub const CONTROL_PANEL_CLASS: &str = "exhibit-controlPanel";

/// Create the control panel registry namespace if it does not exist yet
pub fn register_component(registry: &mut Registry) {
    if !registry.has_registry(REGISTRY_KEY) {
        registry.create_registry(REGISTRY_KEY);
    }
}

/// Subscribe the control panel to the exhibit's component bootstrap
pub fn install(exhibit: &Exhibit) {
    exhibit.on_register_components(register_component);
}

pub struct ControlPanel {
    id: String,
    container: Option<Element>,
    ui_context: Option<UiContext>,
    settings: Option<Settings>,
    panel_settings: Option<PanelSettings>,
    widgets: Vec<WidgetHandle>,
    registered: bool,
    state: Rc<PanelState>,
    hover: Option<HoverReveal>,
    strategy: Box<dyn Reconstruct>,
}

impl ControlPanel {
    /// Build a panel from a structured configuration object
    pub fn create(
        configuration: &Value,
        container: Element,
        ui_context: &UiContext,
    ) -> Result<Self> {
        Self::create_with(configuration, container, ui_context, PanelHooks::default())
    }

    pub fn create_with(
        configuration: &Value,
        container: Element,
        ui_context: &UiContext,
        hooks: PanelHooks,
    ) -> Result<Self> {
        let ui_context = UiContext::create(configuration, ui_context)?;
        let mut settings = Settings::new();
        collect_settings(configuration, &CONTROL_PANEL_SETTINGS, &mut settings);
        Self::assemble(container, ui_context, settings, hooks)
    }

    /// Build a panel from declarative markup.
    ///
    /// Without an explicit container the configuration element hosts the panel.
    pub fn create_from_dom(
        config_element: &Element,
        container: Option<Element>,
        ui_context: &UiContext,
    ) -> Result<Self> {
        Self::create_from_dom_with(config_element, container, ui_context, PanelHooks::default())
    }

    pub fn create_from_dom_with(
        config_element: &Element,
        container: Option<Element>,
        ui_context: &UiContext,
        hooks: PanelHooks,
    ) -> Result<Self> {
        let configuration = get_configuration_from_dom(config_element);
        let container = container.unwrap_or_else(|| config_element.clone());
        let ui_context = UiContext::create_from_dom(config_element, ui_context)?;
        let mut settings = Settings::new();
        // Blob, then configuration element attributes, then container attributes
        collect_settings(&configuration, &CONTROL_PANEL_SETTINGS, &mut settings);
        collect_settings_from_dom(config_element, &CONTROL_PANEL_SETTINGS, &mut settings);
        if !container.ptr_eq(config_element) {
            collect_settings_from_dom(&container, &CONTROL_PANEL_SETTINGS, &mut settings);
        }
        Self::assemble(container, ui_context, settings, hooks)
    }

    fn assemble(
        container: Element,
        ui_context: UiContext,
        settings: Settings,
        hooks: PanelHooks,
    ) -> Result<Self> {
        let id = Self::identifier_for(&container, &ui_context);
        let snapshot = ContainerSnapshot::take(&container);
        let panel_settings = PanelSettings::from_settings(&settings);
        let PanelHooks {
            factories,
            reconstruct,
        } = hooks;

        let mut panel = Self {
            state: Rc::new(PanelState::new(id.clone())),
            id,
            container: Some(container),
            ui_context: Some(ui_context),
            settings: Some(settings),
            panel_settings: Some(panel_settings),
            widgets: Vec::new(),
            registered: false,
            hover: None,
            strategy: reconstruct,
        };
        panel.register()?;
        if let Err(e) = panel.initialize_ui(&factories) {
            let container = panel.container.clone();
            panel.dispose();
            if let Some(container) = container {
                snapshot.restore(&container);
            }
            return Err(e);
        }
        tracing::info!(id = %panel.id, ?panel_settings, "Created control panel");
        Ok(panel)
    }

    /// The container's own id, or `controlPanel-<collection>-<n>`
    fn identifier_for(container: &Element, ui_context: &UiContext) -> String {
        container.id().unwrap_or_else(|| {
            let sequence = ui_context
                .exhibit()
                .registry()
                .borrow_mut()
                .generate_identifier(REGISTRY_KEY);
            format!(
                "{}-{}-{}",
                REGISTRY_KEY,
                ui_context.collection().id(),
                sequence
            )
        })
    }

    fn initialize_ui(&mut self, factories: &WidgetFactories) -> Result<()> {
        let container = self.container.clone().ok_or(PanelError::Disposed)?;
        let settings = self.panel_settings.unwrap_or_default();
        let empty = json!({});

        if settings.hover_reveal {
            let document = self.context()?.exhibit().document().clone();
            self.hover = Some(HoverReveal::install(&container, &document, &self.state));
        }
        if settings.show_toolbox {
            let widget = (factories.toolbox)(&empty, &container, self.context()?)?;
            self.add_widget(widget);
        }
        if settings.show_bookmark {
            let widget = (factories.bookmark)(&empty, &container, self.context()?)?;
            self.add_widget(widget);
        }
        if settings.developer_mode {
            let widget = (factories.reset_history)(&empty, &container, self.context()?)?;
            self.add_widget(widget);
        }
        container.add_class(CONTROL_PANEL_CLASS);
        self.reconstruct();
        Ok(())
    }

    fn context(&self) -> Result<&UiContext> {
        self.ui_context.as_ref().ok_or(PanelError::Disposed)
    }

    // === Registry membership ===

    /// Take the panel's slot in the registry; a no-op if already registered
    pub fn register(&mut self) -> Result<()> {
        let registry = self.context()?.exhibit().registry();
        let mut registry = registry.borrow_mut();
        if registry.is_registered(REGISTRY_KEY, &self.id) {
            let ours = registry
                .get::<PanelLink>(REGISTRY_KEY, &self.id)
                .is_some_and(|link| link.ptr_eq(&self.link()));
            if !ours {
                tracing::warn!(id = %self.id, "Control panel id already taken, not registering");
            }
            return Ok(());
        }
        registry.register(REGISTRY_KEY, &self.id, Rc::new(self.link()))?;
        self.registered = true;
        tracing::debug!(id = %self.id, "Registered control panel");
        Ok(())
    }

    /// Vacate the panel's registry slot; never fails
    pub fn unregister(&mut self) {
        if self.registered {
            if let Some(ctx) = &self.ui_context {
                ctx.exhibit()
                    .registry()
                    .borrow_mut()
                    .unregister(REGISTRY_KEY, &self.id);
                tracing::debug!(id = %self.id, "Unregistered control panel");
            }
        }
        self.registered = false;
    }

    /// Resolve a registered panel by id
    pub fn lookup(registry: &Registry, id: &str) -> Option<PanelLink> {
        registry
            .get::<PanelLink>(REGISTRY_KEY, id)
            .map(|link| PanelLink::clone(&link))
    }

    // === Accessors ===

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Hosting element; `None` once disposed
    pub fn container(&self) -> Option<&Element> {
        self.container.as_ref()
    }

    pub fn ui_context(&self) -> Option<&UiContext> {
        self.ui_context.as_ref()
    }

    /// Resolved option map; `None` once disposed
    pub fn settings(&self) -> Option<&Settings> {
        self.settings.as_ref()
    }

    pub fn panel_settings(&self) -> Option<PanelSettings> {
        self.panel_settings
    }

    pub fn widgets(&self) -> &[WidgetHandle] {
        &self.widgets
    }

    pub fn widget_count(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }

    pub fn is_hovering(&self) -> bool {
        self.state.hovering.get()
    }

    pub fn is_child_open(&self) -> bool {
        self.state.child_open.get()
    }

    pub fn reveal_state(&self) -> RevealState {
        self.state.reveal.get()
    }

    pub fn is_disposed(&self) -> bool {
        !self.state.alive.get()
    }

    /// Handle for widgets and other components to call back into the panel
    pub fn link(&self) -> PanelLink {
        PanelLink {
            state: Rc::clone(&self.state),
        }
    }

    // === Child notifications ===

    pub fn child_opened(&mut self) {
        self.link().child_opened();
    }

    pub fn child_closed(&mut self) {
        self.link().child_closed();
    }

    // === Widgets ===

    /// Append `widget`, binding it to this panel if it has the capability
    pub fn add_widget(&mut self, widget: WidgetHandle) {
        if self.is_disposed() {
            tracing::warn!(id = %self.id, "Ignoring widget added to a disposed panel");
            return;
        }
        self.widgets.push(Rc::clone(&widget));
        match widget.try_borrow_mut() {
            Ok(mut w) => {
                tracing::debug!(id = %self.id, widget = w.name(), "Added widget");
                if let Some(bound) = w.as_panel_bound() {
                    bound.set_control_panel(self.link());
                }
            }
            Err(_) => {
                tracing::warn!(id = %self.id, "Widget busy while being added, not bound");
            }
        }
        self.reconstruct();
    }

    /// Remove the first entry identical to `widget`.
    ///
    /// Returns the removed handle, or `None` if the widget was not hosted.
    /// Once no entry of the widget remains it is unbound from the panel.
    pub fn remove_widget(&mut self, widget: &WidgetHandle) -> Option<WidgetHandle> {
        let removed = self
            .widgets
            .iter()
            .position(|w| same_widget(w, widget))
            .map(|index| self.widgets.remove(index));
        if let Some(removed) = &removed {
            tracing::debug!(id = %self.id, "Removed widget");
            if !self.widgets.iter().any(|w| same_widget(w, removed)) {
                self.unbind(removed);
            }
        }
        self.reconstruct();
        removed
    }

    fn unbind(&self, widget: &WidgetHandle) {
        match widget.try_borrow_mut() {
            Ok(mut w) => {
                if let Some(bound) = w.as_panel_bound() {
                    bound.clear_control_panel();
                }
            }
            Err(_) => {
                tracing::warn!(id = %self.id, "Widget busy while being removed, not unbound");
            }
        }
    }

    /// Run the reconstruct strategy over the current widgets
    pub fn reconstruct(&mut self) {
        self.strategy
            .reconstruct(self.container.as_ref(), &self.widgets);
    }

    pub fn set_reconstruct_strategy(&mut self, strategy: impl Reconstruct + 'static) {
        self.strategy = Box::new(strategy);
    }

    // === Disposal ===

    /// Unregister, detach listeners and release everything the panel holds.
    ///
    /// The panel is inert afterwards; calling this again is a no-op.
    pub fn dispose(&mut self) {
        if self.is_disposed() {
            return;
        }
        self.unregister();
        self.state.alive.set(false);
        if let Some(hover) = self.hover.take() {
            hover.detach();
        }
        if let Some(mut ctx) = self.ui_context.take() {
            ctx.dispose();
        }
        self.container = None;
        self.widgets.clear();
        self.settings = None;
        self.panel_settings = None;
        self.strategy = Box::new(NoopReconstruct);
        tracing::info!(id = %self.id, "Disposed control panel");
    }
}

/// Container state to put back when UI initialization fails
struct ContainerSnapshot {
    children: Vec<Element>,
    opacity: f32,
}

impl ContainerSnapshot {
    fn take(container: &Element) -> Self {
        Self {
            children: container.children(),
            opacity: container.opacity(),
        }
    }

    fn restore(&self, container: &Element) {
        container.retain_children(|child| self.children.iter().any(|c| c.ptr_eq(child)));
        container.set_opacity(self.opacity);
    }
}

impl Drop for ControlPanel {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for ControlPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlPanel")
            .field("id", &self.id)
            .field("registered", &self.registered)
            .field("widgets", &self.widgets.len())
            .field("settings", &self.panel_settings)
            .field("reveal", &self.state.reveal.get())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
