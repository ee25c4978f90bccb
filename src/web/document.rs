use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys;
use web_sys::{Element, FocusEvent, HtmlElement, KeyboardEvent, PointerEvent, Window};

use crate::dom::{Document, DomEvent, EventKind, Handler, ListenTarget, PointerKind};
use crate::error::SiteError;
use crate::markup::{self, Markup};

/// The live page, seen through `web-sys`.
pub struct BrowserDocument {
    window: Window,
    document: web_sys::Document,
}

impl BrowserDocument {
    pub fn new() -> Result<Self, SiteError> {
        let window = web_sys::window().ok_or(SiteError::MissingGlobal("window"))?;
        let document = window.document().ok_or(SiteError::MissingGlobal("document"))?;
        Ok(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn is_loading(&self) -> bool {
        self.document.ready_state() == "loading"
    }

    pub fn on_ready(&self, callback: impl FnOnce() + 'static) -> Result<(), SiteError> {
        let callback = Closure::once(callback);
        self.document
            .add_event_listener_with_callback("DOMContentLoaded", callback.as_ref().unchecked_ref())?;
        callback.forget();
        Ok(())
    }
}

fn collect_elements(list: Result<web_sys::NodeList, JsValue>) -> Vec<Element> {
    let Ok(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Calls `element.<method>(options)` with a plain options object.
fn call_with_options(element: &Element, method: &str, options: &[(&str, JsValue)]) {
    let object = js_sys::Object::new();
    for (key, value) in options {
        let _ = js_sys::Reflect::set(&object, &JsValue::from_str(key), value);
    }
    let function = js_sys::Reflect::get(element, &JsValue::from_str(method))
        .ok()
        .and_then(|f| f.dyn_into::<js_sys::Function>().ok());
    match function {
        Some(function) => {
            if let Err(err) = function.call1(element, &object) {
                warn!("{} failed: {:?}", method, err);
            }
        }
        None => warn!("Element has no {} method", method),
    }
}

fn to_dom_event(event: &web_sys::Event) -> DomEvent<Element> {
    let as_element = |target: Option<web_sys::EventTarget>| target.and_then(|t| t.dyn_into::<Element>().ok());

    let mut dom_event = DomEvent::new();
    if let Some(target) = as_element(event.target()) {
        dom_event = dom_event.with_target(target);
    }
    if let Some(focus) = event.dyn_ref::<FocusEvent>() {
        if let Some(related) = as_element(focus.related_target()) {
            dom_event = dom_event.with_related_target(related);
        }
    }
    if let Some(keyboard) = event.dyn_ref::<KeyboardEvent>() {
        dom_event = dom_event.with_key(keyboard.key());
    }
    if let Some(pointer) = event.dyn_ref::<PointerEvent>() {
        dom_event = dom_event.with_pointer(PointerKind::parse(&pointer.pointer_type()));
    }
    dom_event
}

impl Document for BrowserDocument {
    type Node = Element;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        collect_elements(self.document.query_selector_all(selector))
    }

    fn query_within(&self, root: &Element, selector: &str) -> Vec<Element> {
        collect_elements(root.query_selector_all(selector))
    }

    fn closest(&self, node: &Element, selector: &str) -> Option<Element> {
        node.closest(selector).ok().flatten()
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        ancestor.contains(Some(node.as_ref()))
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&self, node: &Element, class: &str) {
        let _ = node.class_list().add_1(class);
    }

    fn remove_class(&self, node: &Element, class: &str) {
        let _ = node.class_list().remove_1(class);
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        let _ = node.set_attribute(name, value);
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) {
        if let Some(html) = node.dyn_ref::<HtmlElement>() {
            let _ = html.style().set_property(property, value);
        }
    }

    fn text(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_text(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn replace_children(&self, node: &Element, fragment: &[Markup]) {
        node.set_inner_html(&markup::to_html(fragment));
    }

    fn scroll_height(&self, node: &Element) -> f64 {
        f64::from(node.scroll_height())
    }

    fn force_layout(&self, node: &Element) {
        if let Some(html) = node.dyn_ref::<HtmlElement>() {
            let _ = html.offset_height();
        }
    }

    fn focus(&self, node: &Element) {
        call_with_options(node, "focus", &[("preventScroll", JsValue::from_bool(true))]);
    }

    fn scroll_into_view(&self, node: &Element) {
        call_with_options(
            node,
            "scrollIntoView",
            &[
                ("behavior", JsValue::from_str("smooth")),
                ("block", JsValue::from_str("start")),
            ],
        );
    }

    fn matches_media(&self, query: &str) -> bool {
        self.window
            .match_media(query)
            .ok()
            .flatten()
            .map_or(false, |list| list.matches())
    }

    fn listen(&self, target: ListenTarget<'_, Element>, kind: EventKind, mut handler: Handler<Element>) {
        let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            let dom_event = to_dom_event(&event);
            handler(&dom_event);
            if dom_event.default_prevented() {
                event.prevent_default();
            }
        });

        let function = callback.as_ref().unchecked_ref();
        let attached = match target {
            ListenTarget::Node(node) => node.add_event_listener_with_callback(kind.as_str(), function),
            ListenTarget::Document => self
                .document
                .add_event_listener_with_callback(kind.as_str(), function),
            ListenTarget::Window => self
                .window
                .add_event_listener_with_callback(kind.as_str(), function),
        };
        if let Err(err) = attached {
            warn!("Could not attach {} listener: {:?}", kind.as_str(), err);
        }
        // Listeners live as long as the page.
        callback.forget();
    }
}
