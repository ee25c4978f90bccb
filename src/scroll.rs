use std::rc::Rc;

use crate::config;
use crate::dom::{Document, EventKind, ListenTarget};

/// Makes in-page menu links scroll smoothly instead of jumping. Returns how many were bound.
pub fn bind_smooth_scrolling<D>(doc: &Rc<D>) -> usize
where
    D: Document + 'static,
{
    let links = doc.query_all(config::ANCHOR_LINK_SELECTOR);
    for link in &links {
        let page = Rc::clone(doc);
        let anchor = link.clone();
        doc.listen(
            ListenTarget::Node(link),
            EventKind::Click,
            Box::new(move |event| {
                event.prevent_default();
                let href = page.attribute(&anchor, "href").unwrap_or_default();
                if let Some(section) = anchor_target(&href).and_then(|id| page.element_by_id(id)) {
                    page.scroll_into_view(&section);
                }
            }),
        );
    }
    links.len()
}

fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}
