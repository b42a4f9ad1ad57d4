use anyhow::Result;
use clap::Parser;

use control_panel::cli::CliArgs;
use control_panel::config::PanelConfig;
use control_panel::panel;
use control_panel::{ControlPanel, Element, Exhibit, PointerEvent, UiContext};

fn main() -> Result<()> {
    control_panel::tracing::init();

    let args = CliArgs::parse();
    let base = match &args.config {
        Some(path) => PanelConfig::load_from(path)?,
        None => PanelConfig::load(),
    };
    let configuration = args.configuration(&base);

    let exhibit = Exhibit::new();
    panel::install(&exhibit);
    exhibit.register_components();
    let root = UiContext::root(exhibit.clone());

    let container = Element::new("div").with_bounds(args.bounds);
    if let Some(id) = &args.id {
        container.set_attribute("id", id);
    }

    let mut panel = ControlPanel::create(&configuration, container.clone(), &root)?;
    let widgets: Vec<&'static str> = panel
        .widgets()
        .iter()
        .map(|widget| widget.borrow().name())
        .collect();
    println!("panel {}", panel.id());
    println!("widgets [{}]", widgets.join(", "));
    println!(
        "reveal {:?} opacity {}",
        panel.reveal_state(),
        container.opacity()
    );

    for (x, y) in &args.pointers {
        let event = PointerEvent::new(*x, *y);
        if !container.bounds().is_outside(*x, *y) {
            container.dispatch_pointer_enter(&event);
        }
        exhibit.document().dispatch_pointer_move(&event);
        println!(
            "pointer ({}, {}) -> {:?} opacity {}",
            x,
            y,
            panel.reveal_state(),
            container.opacity()
        );
    }

    panel.dispose();
    Ok(())
}
