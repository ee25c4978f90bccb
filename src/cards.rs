//! Tap-to-activate service cards.
//!
//! Touch and pen users have no hover, so a tap marks a card active instead. At most one card is
//! active at a time.

use std::cell::Cell;
use std::rc::Rc;

use log::debug;

use crate::config;
use crate::dom::{Document, EventKind, ListenTarget, PointerKind};

pub const ACTIVE_CLASS: &str = "is-active";

pub struct CardActivator<D: Document> {
    doc: Rc<D>,
    cards: Vec<D::Node>,
    active: Cell<Option<usize>>,
}

impl<D> CardActivator<D>
where
    D: Document + 'static,
{
    pub fn mount(doc: Rc<D>) -> Option<Rc<Self>> {
        let cards = doc.query_all(config::SERVICE_CARD_SELECTOR);
        if cards.is_empty() {
            debug!("No service cards on this page");
            return None;
        }

        let activator = Rc::new(Self {
            doc: Rc::clone(&doc),
            cards,
            active: Cell::new(None),
        });

        for (index, card) in activator.cards.iter().enumerate() {
            let on_focus_out = Rc::clone(&activator);
            doc.listen(
                ListenTarget::Node(card),
                EventKind::FocusOut,
                Box::new(move |event| on_focus_out.focus_left(index, event.related_target())),
            );

            let on_release = Rc::clone(&activator);
            doc.listen(
                ListenTarget::Node(card),
                EventKind::PointerUp,
                Box::new(move |event| on_release.release(index, event.pointer())),
            );
        }

        let on_press = Rc::clone(&activator);
        doc.listen(
            ListenTarget::Document,
            EventKind::PointerDown,
            Box::new(move |event| on_press.press(event.target())),
        );

        let on_resize = Rc::clone(&activator);
        doc.listen(
            ListenTarget::Window,
            EventKind::Resize,
            Box::new(move |_| on_resize.viewport_changed()),
        );

        Some(activator)
    }

    pub fn active(&self) -> Option<usize> {
        self.active.get()
    }

    /// A pointer was released on card `index`. Only touch-like pointers toggle it.
    pub fn release(&self, index: usize, pointer: PointerKind) {
        if !pointer.is_touch_like() {
            return;
        }
        let Some(card) = self.cards.get(index) else {
            return;
        };

        let was_active = self.active.get() == Some(index);
        self.deactivate_all();
        if !was_active {
            self.doc.add_class(card, ACTIVE_CLASS);
            self.active.set(Some(index));
            self.doc.focus(card);
        }
    }

    /// Focus moved from card `index` to `related`.
    pub fn focus_left(&self, index: usize, related: Option<&D::Node>) {
        let Some(card) = self.cards.get(index) else {
            return;
        };
        if related.map_or(false, |node| self.doc.contains(card, node)) {
            return;
        }
        self.doc.remove_class(card, ACTIVE_CLASS);
        if self.active.get() == Some(index) {
            self.active.set(None);
        }
    }

    /// A pointer went down somewhere on the page.
    pub fn press(&self, target: Option<&D::Node>) {
        let inside_card = target
            .and_then(|node| self.doc.closest(node, config::SERVICE_CARD_SELECTOR))
            .is_some();
        if !inside_card {
            self.deactivate_all();
        }
    }

    pub fn viewport_changed(&self) {
        let precise_hover = self.doc.matches_media(config::HOVER_QUERY)
            && self.doc.matches_media(config::FINE_POINTER_QUERY);
        if precise_hover {
            self.deactivate_all();
        }
    }

    fn deactivate_all(&self) {
        for card in &self.cards {
            self.doc.remove_class(card, ACTIVE_CLASS);
        }
        self.active.set(None);
    }
}
