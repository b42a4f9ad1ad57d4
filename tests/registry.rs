//! Registry membership and exhibit bootstrap

mod common;

use std::rc::Rc;

use control_panel::panel::{self, ControlPanel, REGISTRY_KEY};
use control_panel::registry::Registry;
use control_panel::{Exhibit, PanelError, PanelLink, UiContext};
use serde_json::json;

#[test]
fn test_namespace_created_by_bootstrap_only() {
    let exhibit = Exhibit::new();
    panel::install(&exhibit);
    assert!(!exhibit.registry().borrow().has_registry(REGISTRY_KEY));

    assert!(exhibit.register_components());
    assert!(exhibit.registry().borrow().has_registry(REGISTRY_KEY));

    // One-shot
    assert!(!exhibit.register_components());
}

#[test]
fn test_install_after_bootstrap_runs_immediately() {
    let exhibit = Exhibit::new();
    exhibit.register_components();
    panel::install(&exhibit);
    assert!(exhibit.registry().borrow().has_registry(REGISTRY_KEY));
}

#[test]
fn test_install_twice_keeps_registered_panels() {
    let exhibit = common::ready_exhibit();
    let ctx = UiContext::root(Rc::clone(&exhibit));
    let panel = ControlPanel::create(&json!({}), common::container(), &ctx).unwrap();

    panel::install(&exhibit);
    assert!(exhibit
        .registry()
        .borrow()
        .is_registered(REGISTRY_KEY, panel.id()));
}

#[test]
fn test_register_and_unregister() {
    let mut registry = Registry::new();
    assert_eq!(
        registry.register("facet", "a", Rc::new(1u8)),
        Err(PanelError::UnknownRegistry("facet".into()))
    );

    assert!(registry.create_registry("facet"));
    assert!(!registry.create_registry("facet"));
    registry.register("facet", "a", Rc::new(1u8)).unwrap();
    registry.register("facet", "b", Rc::new(2u8)).unwrap();
    assert_eq!(
        registry.register("facet", "a", Rc::new(3u8)),
        Err(PanelError::AlreadyRegistered {
            key: "facet".into(),
            id: "a".into(),
        })
    );
    assert_eq!(registry.ids("facet"), vec!["a", "b"]);

    assert!(registry.unregister("facet", "a").is_some());
    assert!(registry.unregister("facet", "a").is_none());
    assert!(registry.unregister("missing", "a").is_none());
    assert_eq!(registry.len("facet"), 1);
}

#[test]
fn test_typed_lookup() {
    let mut registry = Registry::new();
    registry.create_registry("facet");
    registry.register("facet", "a", Rc::new(7u32)).unwrap();

    assert_eq!(registry.get::<u32>("facet", "a").as_deref(), Some(&7));
    assert!(registry.get::<String>("facet", "a").is_none());
    assert!(registry.get::<PanelLink>("facet", "a").is_none());
}

#[test]
fn test_identifiers_never_reused() {
    let ctx = common::ready_context();
    let first = ControlPanel::create(&json!({}), common::container(), &ctx).unwrap();
    let first_id = first.id().to_string();
    drop(first);

    let second = ControlPanel::create(&json!({}), common::container(), &ctx).unwrap();
    assert_ne!(second.id(), first_id);
    assert_eq!(second.id(), "controlPanel-default-1");
}

#[test]
fn test_registry_holds_panel_link() {
    let ctx = common::ready_context();
    let panel = ControlPanel::create(&json!({}), common::container(), &ctx).unwrap();
    let registry = ctx.exhibit().registry();

    let stored = registry
        .borrow()
        .get::<PanelLink>(REGISTRY_KEY, panel.id())
        .unwrap();
    assert_eq!(stored.id(), panel.id());
    assert!(stored.ptr_eq(&panel.link()));
}
