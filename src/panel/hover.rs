//! Hover-reveal controller
//!
//! Two states layered over the container's opacity:
//!
//! - `Hidden` (initial): container transparent. A pointer entering the
//!   container reveals it.
//! - `Revealed`: container opaque. A pointer move anywhere in the document
//!   that lands strictly outside the container hides it again, unless a
//!   hosted widget reported an open popover.
//!
//! The bounding box is read from the container's live layout on every move.
//! Handlers check the panel's liveness flag and are detached on dispose.

use std::rc::Rc;

use super::PanelState;
use crate::dom::{Document, Element, ListenerId, PointerEvent, FADE_FAST, FADE_INSTANT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    Hidden,
    Revealed,
}

/// Installed listeners of a hover-revealed panel
#[derive(Debug)]
pub(crate) struct HoverReveal {
    container: Element,
    document: Document,
    enter: ListenerId,
    movement: ListenerId,
}

impl HoverReveal {
    /// Hide `container` and start tracking the pointer
    pub(crate) fn install(
        container: &Element,
        document: &Document,
        state: &Rc<PanelState>,
    ) -> Self {
        container.fade_to(FADE_INSTANT, 0.0);
        state.reveal.set(RevealState::Hidden);
        state.hovering.set(false);

        let enter_state = Rc::clone(state);
        let enter = container.on_pointer_enter(move |this, _| {
            pointer_entered(&enter_state, this);
        });

        let move_state = Rc::clone(state);
        let target = container.downgrade();
        let movement = document.on_pointer_move(move |event| {
            if let Some(container) = target.upgrade() {
                pointer_moved(&move_state, &container, event);
            }
        });

        Self {
            container: container.clone(),
            document: document.clone(),
            enter,
            movement,
        }
    }

    /// Remove both listeners
    pub(crate) fn detach(self) {
        self.container.remove_pointer_enter(self.enter);
        self.document.remove_pointer_move(self.movement);
    }
}

/// Returns true if the panel was revealed
pub(crate) fn pointer_entered(state: &PanelState, container: &Element) -> bool {
    if !state.alive.get() || state.reveal.get() != RevealState::Hidden {
        return false;
    }
    state.reveal.set(RevealState::Revealed);
    state.hovering.set(true);
    container.fade_to(FADE_FAST, 1.0);
    tracing::trace!(panel = %state.id, "Revealed");
    true
}

/// Returns true if the panel was hidden
pub(crate) fn pointer_moved(state: &PanelState, container: &Element, event: &PointerEvent) -> bool {
    if !state.alive.get()
        || state.reveal.get() != RevealState::Revealed
        || !state.hovering.get()
        || state.child_open.get()
    {
        return false;
    }
    if !container.bounds().is_outside(event.page_x, event.page_y) {
        return false;
    }
    state.reveal.set(RevealState::Hidden);
    state.hovering.set(false);
    container.fade_to(FADE_FAST, 0.0);
    tracing::trace!(panel = %state.id, "Hidden");
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    fn setup() -> (Rc<PanelState>, Element, Document, HoverReveal) {
        let state = Rc::new(PanelState::new("p".into()));
        let container = Element::new("div").with_bounds(Rect::new(10.0, 10.0, 100.0, 50.0));
        let document = Document::new();
        let hover = HoverReveal::install(&container, &document, &state);
        (state, container, document, hover)
    }

    #[test]
    fn test_install_hides_instantly() {
        let (state, container, _doc, _hover) = setup();
        assert_eq!(container.opacity(), 0.0);
        assert_eq!(container.fade().map(|f| f.duration), Some(FADE_INSTANT));
        assert_eq!(state.reveal.get(), RevealState::Hidden);
    }

    #[test]
    fn test_enter_then_leave() {
        let (state, container, doc, _hover) = setup();
        container.dispatch_pointer_enter(&PointerEvent::new(20.0, 20.0));
        assert_eq!(state.reveal.get(), RevealState::Revealed);
        assert!(state.hovering.get());
        assert_eq!(container.opacity(), 1.0);

        doc.dispatch_pointer_move(&PointerEvent::new(50.0, 30.0));
        assert_eq!(state.reveal.get(), RevealState::Revealed);

        doc.dispatch_pointer_move(&PointerEvent::new(200.0, 20.0));
        assert_eq!(state.reveal.get(), RevealState::Hidden);
        assert!(!state.hovering.get());
        assert_eq!(container.opacity(), 0.0);
        assert_eq!(container.fade().map(|f| f.duration), Some(FADE_FAST));
    }

    #[test]
    fn test_reenter_while_revealed_is_noop() {
        let (state, container, _doc, _hover) = setup();
        assert!(pointer_entered(&state, &container));
        assert!(!pointer_entered(&state, &container));
    }

    #[test]
    fn test_child_open_keeps_revealed() {
        let (state, container, doc, _hover) = setup();
        container.dispatch_pointer_enter(&PointerEvent::default());
        state.child_open.set(true);
        doc.dispatch_pointer_move(&PointerEvent::new(200.0, 20.0));
        assert_eq!(state.reveal.get(), RevealState::Revealed);
    }

    #[test]
    fn test_bounds_read_live() {
        let (state, container, doc, _hover) = setup();
        container.dispatch_pointer_enter(&PointerEvent::default());
        container.set_bounds(Rect::new(0.0, 0.0, 500.0, 500.0));
        doc.dispatch_pointer_move(&PointerEvent::new(200.0, 20.0));
        assert_eq!(state.reveal.get(), RevealState::Revealed);
    }

    #[test]
    fn test_detach_and_liveness() {
        let (state, container, doc, hover) = setup();
        hover.detach();
        assert_eq!(container.pointer_enter_listener_count(), 0);
        assert_eq!(doc.pointer_move_listener_count(), 0);

        state.alive.set(false);
        assert!(!pointer_entered(&state, &container));
    }
}
