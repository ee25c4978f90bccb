//! In-memory document and recording animator for the unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use crate::dom::{Document, DomEvent, EventKind, Handler, ListenTarget};
use crate::markup::Markup;
use crate::motion::{Animator, Props, TimelineStep, Tween};

pub type NodeId = usize;

const TEXT_TAG: &str = "#text";

#[derive(Debug, Default)]
struct FakeNode {
    tag: String,
    attrs: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    text: String,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    scroll_height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListenKey {
    Node(NodeId),
    Document,
    Window,
}

type SharedHandler = Rc<RefCell<Handler<NodeId>>>;

pub struct FakeDocument {
    nodes: RefCell<Vec<FakeNode>>,
    listeners: RefCell<Vec<(ListenKey, EventKind, SharedHandler)>>,
    media: RefCell<HashMap<String, bool>>,
    focused: Cell<Option<NodeId>>,
    scrolled: RefCell<Vec<NodeId>>,
    layout_reads: Cell<usize>,
}

impl FakeDocument {
    pub const ROOT: NodeId = 0;
    pub const BODY: NodeId = 1;

    pub fn new() -> Self {
        let doc = Self {
            nodes: RefCell::new(vec![FakeNode {
                tag: "html".to_string(),
                ..FakeNode::default()
            }]),
            listeners: RefCell::new(Vec::new()),
            media: RefCell::new(HashMap::new()),
            focused: Cell::new(None),
            scrolled: RefCell::new(Vec::new()),
            layout_reads: Cell::new(0),
        };
        doc.add(Self::ROOT, "body", &[]);
        doc
    }

    /// Appends an element; `attrs` may include `class` and `id`.
    pub fn add(&self, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let node = FakeNode {
            tag: tag.to_string(),
            attrs: attrs
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            ..FakeNode::default()
        };
        self.append(parent, node)
    }

    pub fn add_text(&self, parent: NodeId, text: &str) -> NodeId {
        let node = FakeNode {
            tag: TEXT_TAG.to_string(),
            text: text.to_string(),
            ..FakeNode::default()
        };
        self.append(parent, node)
    }

    fn append(&self, parent: NodeId, mut node: FakeNode) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        let id = nodes.len();
        node.parent = Some(parent);
        nodes.push(node);
        nodes[parent].children.push(id);
        id
    }

    fn append_markup(&self, parent: NodeId, markup: &Markup) {
        match markup {
            Markup::Text(text) => {
                self.add_text(parent, text);
            }
            Markup::Element(el) => {
                let attrs: Vec<(&str, &str)> = el.attrs().collect();
                let id = self.add(parent, el.tag(), &attrs);
                for child in el.child_nodes() {
                    self.append_markup(id, child);
                }
            }
        }
    }

    fn detach_children(&self, node: NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        let children = std::mem::take(&mut nodes[node].children);
        for child in children {
            nodes[child].parent = None;
        }
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.nodes.borrow()[node].style.get(property).cloned()
    }

    pub fn set_media(&self, query: &str, matches: bool) {
        self.media.borrow_mut().insert(query.to_string(), matches);
    }

    pub fn set_scroll_height(&self, node: NodeId, height: f64) {
        self.nodes.borrow_mut()[node].scroll_height = height;
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused.get()
    }

    pub fn scrolled_into_view(&self) -> Vec<NodeId> {
        self.scrolled.borrow().clone()
    }

    pub fn layout_reads(&self) -> usize {
        self.layout_reads.get()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn by_class(&self, class: &str) -> Vec<NodeId> {
        self.query_all(&format!(".{}", class))
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes.borrow()[node].children.clone()
    }

    /// Runs the handlers on the target and its ancestors, then the document's.
    pub fn dispatch(&self, kind: EventKind, event: DomEvent<NodeId>) -> DomEvent<NodeId> {
        let mut path: Vec<ListenKey> = Vec::new();
        let mut current = event.target().copied();
        while let Some(node) = current {
            path.push(ListenKey::Node(node));
            current = self.nodes.borrow()[node].parent;
        }
        path.push(ListenKey::Document);

        for key in path {
            self.run_handlers(key, kind, &event);
        }
        event
    }

    pub fn dispatch_window(&self, kind: EventKind, event: DomEvent<NodeId>) -> DomEvent<NodeId> {
        self.run_handlers(ListenKey::Window, kind, &event);
        event
    }

    pub fn click(&self, target: NodeId) -> DomEvent<NodeId> {
        self.dispatch(EventKind::Click, DomEvent::new().with_target(target))
    }

    fn run_handlers(&self, key: ListenKey, kind: EventKind, event: &DomEvent<NodeId>) {
        let handlers: Vec<SharedHandler> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(k, event_kind, _)| *k == key && *event_kind == kind)
            .map(|(_, _, handler)| Rc::clone(handler))
            .collect();
        for handler in handlers {
            (handler.borrow_mut())(event);
        }
    }

    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let nodes = self.nodes.borrow();
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = nodes[root].children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            found.push(id);
            stack.extend(nodes[id].children.iter().rev().copied());
        }
        found
    }

    fn matches(&self, node: NodeId, selector: &str) -> bool {
        let chain: Vec<Compound> = selector.split_whitespace().map(Compound::parse).collect();
        let nodes = self.nodes.borrow();
        let Some((last, ancestors)) = chain.split_last() else {
            return false;
        };
        if !last.matches(&nodes[node]) {
            return false;
        }
        let mut current = nodes[node].parent;
        for compound in ancestors.iter().rev() {
            loop {
                match current {
                    Some(id) if compound.matches(&nodes[id]) => {
                        current = nodes[id].parent;
                        break;
                    }
                    Some(id) => current = nodes[id].parent,
                    None => return false,
                }
            }
        }
        true
    }
}

impl Default for FakeDocument {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrTest>,
}

#[derive(Debug)]
enum AttrTest {
    Present(String),
    Equals(String, String),
    Prefix(String, String),
}

impl Compound {
    fn parse(selector: &str) -> Self {
        let is_marker = |ch: char| ch == '.' || ch == '#' || ch == '[';
        let mut compound = Compound::default();

        let end = selector.find(is_marker).unwrap_or(selector.len());
        if end > 0 {
            compound.tag = Some(selector[..end].to_string());
        }
        let mut rest = &selector[end..];
        while !rest.is_empty() {
            if let Some(inner) = rest.strip_prefix('[') {
                let close = inner.find(']').expect("unterminated attribute selector");
                compound.attrs.push(AttrTest::parse(&inner[..close]));
                rest = &inner[close + 1..];
            } else {
                let marker = &rest[..1];
                let name_part = &rest[1..];
                let end = name_part.find(is_marker).unwrap_or(name_part.len());
                let name = name_part[..end].to_string();
                if marker == "." {
                    compound.classes.push(name);
                } else {
                    compound.id = Some(name);
                }
                rest = &name_part[end..];
            }
        }
        compound
    }

    fn matches(&self, node: &FakeNode) -> bool {
        if node.tag == TEXT_TAG {
            return false;
        }
        if let Some(tag) = &self.tag {
            if !node.tag.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if node.attrs.get("id") != Some(id) {
                return false;
            }
        }
        let classes = node.attrs.get("class").map(String::as_str).unwrap_or("");
        if !self
            .classes
            .iter()
            .all(|class| classes.split_whitespace().any(|c| c == class))
        {
            return false;
        }
        self.attrs.iter().all(|test| test.matches(node))
    }
}

impl AttrTest {
    fn parse(inner: &str) -> Self {
        let unquote = |value: &str| value.trim_matches('"').to_string();
        if let Some((name, value)) = inner.split_once("^=") {
            AttrTest::Prefix(name.to_string(), unquote(value))
        } else if let Some((name, value)) = inner.split_once('=') {
            AttrTest::Equals(name.to_string(), unquote(value))
        } else {
            AttrTest::Present(inner.to_string())
        }
    }

    fn matches(&self, node: &FakeNode) -> bool {
        match self {
            AttrTest::Present(name) => node.attrs.contains_key(name),
            AttrTest::Equals(name, value) => node.attrs.get(name) == Some(value),
            AttrTest::Prefix(name, prefix) => node
                .attrs
                .get(name)
                .map_or(false, |value| value.starts_with(prefix.as_str())),
        }
    }
}

impl Document for FakeDocument {
    type Node = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.query(&format!("#{}", id))
    }

    fn query(&self, selector: &str) -> Option<NodeId> {
        self.query_all(selector).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        self.query_within(&Self::ROOT, selector)
    }

    fn query_within(&self, root: &NodeId, selector: &str) -> Vec<NodeId> {
        self.descendants(*root)
            .into_iter()
            .filter(|node| self.matches(*node, selector))
            .collect()
    }

    fn closest(&self, node: &NodeId, selector: &str) -> Option<NodeId> {
        let mut current = Some(*node);
        while let Some(id) = current {
            if self.matches(id, selector) {
                return Some(id);
            }
            current = self.nodes.borrow()[id].parent;
        }
        None
    }

    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        let mut current = Some(*node);
        while let Some(id) = current {
            if id == *ancestor {
                return true;
            }
            current = self.nodes.borrow()[id].parent;
        }
        false
    }

    fn body(&self) -> Option<NodeId> {
        Some(Self::BODY)
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.nodes.borrow()[*node]
            .attrs
            .get("class")
            .map_or(false, |classes| classes.split_whitespace().any(|c| c == class))
    }

    fn add_class(&self, node: &NodeId, class: &str) {
        if self.has_class(node, class) {
            return;
        }
        let mut nodes = self.nodes.borrow_mut();
        let classes = nodes[*node].attrs.entry("class".to_string()).or_default();
        if !classes.is_empty() {
            classes.push(' ');
        }
        classes.push_str(class);
    }

    fn remove_class(&self, node: &NodeId, class: &str) {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(classes) = nodes[*node].attrs.get_mut("class") {
            *classes = classes
                .split_whitespace()
                .filter(|c| *c != class)
                .collect::<Vec<_>>()
                .join(" ");
        }
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.nodes.borrow()[*node].attrs.get(name).cloned()
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        self.nodes.borrow_mut()[*node]
            .attrs
            .insert(name.to_string(), value.to_string());
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) {
        self.nodes.borrow_mut()[*node]
            .style
            .insert(property.to_string(), value.to_string());
    }

    fn text(&self, node: &NodeId) -> String {
        let nodes = self.nodes.borrow();
        let mut text = nodes[*node].text.clone();
        drop(nodes);
        for id in self.descendants(*node) {
            let nodes = self.nodes.borrow();
            if nodes[id].tag == TEXT_TAG {
                text.push_str(&nodes[id].text);
            }
        }
        text
    }

    fn set_text(&self, node: &NodeId, text: &str) {
        self.detach_children(*node);
        if !text.is_empty() {
            self.add_text(*node, text);
        }
    }

    fn replace_children(&self, node: &NodeId, fragment: &[Markup]) {
        self.detach_children(*node);
        for markup in fragment {
            self.append_markup(*node, markup);
        }
    }

    fn scroll_height(&self, node: &NodeId) -> f64 {
        self.nodes.borrow()[*node].scroll_height
    }

    fn force_layout(&self, _node: &NodeId) {
        self.layout_reads.set(self.layout_reads.get() + 1);
    }

    fn focus(&self, node: &NodeId) {
        self.focused.set(Some(*node));
    }

    fn scroll_into_view(&self, node: &NodeId) {
        self.scrolled.borrow_mut().push(*node);
    }

    fn matches_media(&self, query: &str) -> bool {
        self.media.borrow().get(query).copied().unwrap_or(false)
    }

    fn listen(&self, target: ListenTarget<'_, NodeId>, kind: EventKind, handler: Handler<NodeId>) {
        let key = match target {
            ListenTarget::Node(node) => ListenKey::Node(*node),
            ListenTarget::Document => ListenKey::Document,
            ListenTarget::Window => ListenKey::Window,
        };
        self.listeners
            .borrow_mut()
            .push((key, kind, Rc::new(RefCell::new(handler))));
    }
}

/// A tween as the animator received it, minus its completion callback.
pub struct PlayedTween {
    pub targets: Vec<NodeId>,
    pub from: Option<Props>,
    pub to: Props,
    pub duration: f64,
    pub delay: f64,
    pub ease: Option<crate::motion::Ease>,
    pub stagger: Option<f64>,
    pub scroll_trigger: Option<crate::motion::ScrollTrigger>,
    pub had_callback: bool,
}

pub enum Recorded {
    Set { targets: Vec<NodeId>, props: Props },
    Tween(PlayedTween),
    Timeline { target: NodeId, delay: f64, durations: Vec<f64> },
}

/// Records every call and completes callbacks synchronously, in call order.
pub struct RecordingAnimator {
    log: RefCell<Vec<Recorded>>,
    scroll_trigger: bool,
}

impl RecordingAnimator {
    pub fn new() -> Self {
        Self {
            log: RefCell::new(Vec::new()),
            scroll_trigger: true,
        }
    }

    pub fn without_scroll_trigger() -> Self {
        Self {
            scroll_trigger: false,
            ..Self::new()
        }
    }

    pub fn len(&self) -> usize {
        self.log.borrow().len()
    }

    pub fn sets(&self) -> Vec<(Vec<NodeId>, Props)> {
        self.log
            .borrow()
            .iter()
            .filter_map(|entry| match entry {
                Recorded::Set { targets, props } => Some((targets.clone(), props.clone())),
                _ => None,
            })
            .collect()
    }

    /// Calls `f` with every played tween whose targets include `node`.
    pub fn tweens_for<R>(&self, node: NodeId, f: impl Fn(&PlayedTween) -> R) -> Vec<R> {
        self.log
            .borrow()
            .iter()
            .filter_map(|entry| match entry {
                Recorded::Tween(tween) if tween.targets.contains(&node) => Some(f(tween)),
                _ => None,
            })
            .collect()
    }

    pub fn tween_count(&self) -> usize {
        self.log
            .borrow()
            .iter()
            .filter(|entry| matches!(entry, Recorded::Tween(_)))
            .count()
    }

    pub fn with_tweens<R>(&self, f: impl FnOnce(Vec<&PlayedTween>) -> R) -> R {
        let log = self.log.borrow();
        let tweens = log
            .iter()
            .filter_map(|entry| match entry {
                Recorded::Tween(tween) => Some(tween),
                _ => None,
            })
            .collect();
        f(tweens)
    }

    pub fn timelines(&self) -> Vec<(NodeId, f64, Vec<f64>)> {
        self.log
            .borrow()
            .iter()
            .filter_map(|entry| match entry {
                Recorded::Timeline {
                    target,
                    delay,
                    durations,
                } => Some((*target, *delay, durations.clone())),
                _ => None,
            })
            .collect()
    }
}

impl Default for RecordingAnimator {
    fn default() -> Self {
        Self::new()
    }
}

impl Animator for RecordingAnimator {
    type Node = NodeId;

    fn set(&self, targets: &[NodeId], props: &Props) {
        self.log.borrow_mut().push(Recorded::Set {
            targets: targets.to_vec(),
            props: props.clone(),
        });
    }

    fn play(&self, tween: Tween<NodeId>) {
        let Tween {
            targets,
            from,
            to,
            duration,
            delay,
            ease,
            stagger,
            scroll_trigger,
            on_complete,
        } = tween;
        self.log.borrow_mut().push(Recorded::Tween(PlayedTween {
            targets,
            from,
            to,
            duration,
            delay,
            ease,
            stagger,
            scroll_trigger,
            had_callback: on_complete.is_some(),
        }));
        if let Some(callback) = on_complete {
            callback();
        }
    }

    fn timeline(&self, target: &NodeId, delay: f64, steps: Vec<TimelineStep>) {
        self.log.borrow_mut().push(Recorded::Timeline {
            target: *target,
            delay,
            durations: steps.iter().map(|step| step.duration).collect(),
        });
        for step in steps {
            (step.on_complete)();
        }
    }

    fn supports_scroll_trigger(&self) -> bool {
        self.scroll_trigger
    }
}
