//! The slice of the browser document the page scripts depend on.
//!
//! Components are generic over [`Document`] so the same code drives the real page
//! (`web::BrowserDocument`) and the in-memory document used by the tests.

use std::cell::Cell;

use crate::markup::Markup;

pub type Handler<N> = Box<dyn FnMut(&DomEvent<N>)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Click,
    KeyDown,
    PointerDown,
    PointerUp,
    FocusOut,
    MouseEnter,
    MouseLeave,
    Resize,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::KeyDown => "keydown",
            EventKind::PointerDown => "pointerdown",
            EventKind::PointerUp => "pointerup",
            EventKind::FocusOut => "focusout",
            EventKind::MouseEnter => "mouseenter",
            EventKind::MouseLeave => "mouseleave",
            EventKind::Resize => "resize",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Pen,
    Touch,
    Unknown,
}

impl PointerKind {
    pub fn parse(pointer_type: &str) -> Self {
        match pointer_type {
            "mouse" => PointerKind::Mouse,
            "pen" => PointerKind::Pen,
            "touch" => PointerKind::Touch,
            _ => PointerKind::Unknown,
        }
    }

    /// Pointers that cannot hover.
    pub fn is_touch_like(self) -> bool {
        matches!(self, PointerKind::Touch | PointerKind::Pen)
    }
}

pub enum ListenTarget<'a, N> {
    Node(&'a N),
    Document,
    Window,
}

/// The fields of a browser event the handlers read.
pub struct DomEvent<N> {
    target: Option<N>,
    related_target: Option<N>,
    key: Option<String>,
    pointer: Option<PointerKind>,
    prevented: Cell<bool>,
}

impl<N> DomEvent<N> {
    pub fn new() -> Self {
        Self {
            target: None,
            related_target: None,
            key: None,
            pointer: None,
            prevented: Cell::new(false),
        }
    }

    pub fn with_target(mut self, target: N) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_related_target(mut self, related: N) -> Self {
        self.related_target = Some(related);
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_pointer(mut self, pointer: PointerKind) -> Self {
        self.pointer = Some(pointer);
        self
    }

    pub fn target(&self) -> Option<&N> {
        self.target.as_ref()
    }

    pub fn related_target(&self) -> Option<&N> {
        self.related_target.as_ref()
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn pointer(&self) -> PointerKind {
        self.pointer.unwrap_or(PointerKind::Unknown)
    }

    pub fn prevent_default(&self) {
        self.prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.prevented.get()
    }
}

impl<N> Default for DomEvent<N> {
    fn default() -> Self {
        Self::new()
    }
}

pub trait Document {
    type Node: Clone + PartialEq;

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;
    fn query(&self, selector: &str) -> Option<Self::Node>;
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;
    fn query_within(&self, root: &Self::Node, selector: &str) -> Vec<Self::Node>;
    fn closest(&self, node: &Self::Node, selector: &str) -> Option<Self::Node>;
    /// Inclusive: a node contains itself.
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool;
    fn body(&self) -> Option<Self::Node>;

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    fn add_class(&self, node: &Self::Node, class: &str);
    fn remove_class(&self, node: &Self::Node, class: &str);
    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);
    fn set_style(&self, node: &Self::Node, property: &str, value: &str);

    fn text(&self, node: &Self::Node) -> String;
    fn set_text(&self, node: &Self::Node, text: &str);
    fn replace_children(&self, node: &Self::Node, fragment: &[Markup]);

    fn scroll_height(&self, node: &Self::Node) -> f64;
    /// Forces a synchronous layout so the next style change animates from the current one.
    fn force_layout(&self, node: &Self::Node);
    fn focus(&self, node: &Self::Node);
    fn scroll_into_view(&self, node: &Self::Node);

    fn matches_media(&self, query: &str) -> bool;

    fn listen(&self, target: ListenTarget<'_, Self::Node>, kind: EventKind, handler: Handler<Self::Node>);
}
