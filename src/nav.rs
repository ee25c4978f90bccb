use std::cell::Cell;
use std::rc::Rc;

use log::debug;

use crate::config;
use crate::dom::{Document, EventKind, ListenTarget};

const OPEN_CLASS: &str = "active";
const BODY_OPEN_CLASS: &str = "menu-open";

/// The mobile navigation menu and its burger toggle.
pub struct MobileMenu<D: Document> {
    doc: Rc<D>,
    toggle: D::Node,
    menu: D::Node,
    body: Option<D::Node>,
    open: Cell<bool>,
}

impl<D> MobileMenu<D>
where
    D: Document + 'static,
{
    pub fn mount(doc: Rc<D>) -> Option<Rc<Self>> {
        let toggle = doc.query(config::MENU_TOGGLE_SELECTOR);
        let menu = doc.query(config::NAV_MENU_SELECTOR);
        let (Some(toggle), Some(menu)) = (toggle, menu) else {
            debug!("No mobile menu on this page");
            return None;
        };

        let nav = Rc::new(Self {
            body: doc.body(),
            doc: Rc::clone(&doc),
            toggle,
            menu,
            open: Cell::new(false),
        });

        let on_toggle = Rc::clone(&nav);
        doc.listen(
            ListenTarget::Node(&nav.toggle),
            EventKind::Click,
            Box::new(move |_| on_toggle.set_open(!on_toggle.is_open())),
        );

        for link in doc.query_within(&nav.menu, "a") {
            let on_link = Rc::clone(&nav);
            doc.listen(
                ListenTarget::Node(&link),
                EventKind::Click,
                Box::new(move |_| on_link.set_open(false)),
            );
        }

        let on_outside = Rc::clone(&nav);
        doc.listen(
            ListenTarget::Document,
            EventKind::Click,
            Box::new(move |event| on_outside.clicked(event.target())),
        );

        Some(nav)
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    /// Closes the menu when the click landed outside both the menu and its toggle.
    pub fn clicked(&self, target: Option<&D::Node>) {
        let inside = target.map_or(false, |node| {
            self.doc.contains(&self.menu, node) || self.doc.contains(&self.toggle, node)
        });
        if !inside {
            self.set_open(false);
        }
    }

    pub fn set_open(&self, open: bool) {
        self.open.set(open);
        let doc = &self.doc;
        if open {
            doc.add_class(&self.menu, OPEN_CLASS);
            doc.add_class(&self.toggle, OPEN_CLASS);
            if let Some(body) = &self.body {
                doc.add_class(body, BODY_OPEN_CLASS);
            }
        } else {
            doc.remove_class(&self.menu, OPEN_CLASS);
            doc.remove_class(&self.toggle, OPEN_CLASS);
            if let Some(body) = &self.body {
                doc.remove_class(body, BODY_OPEN_CLASS);
            }
        }
    }
}
