//! Browser bindings: the live DOM and the page's GSAP global.

mod document;
mod gsap;

pub use document::BrowserDocument;
pub use gsap::GsapAnimator;

use std::rc::Rc;

use log::{error, info, warn};

use crate::case_studies;
use crate::error::SiteError;
use crate::site;

/// Starts the page scripts once the DOM is parsed.
pub fn run() -> Result<(), SiteError> {
    let doc = BrowserDocument::new()?;
    if doc.is_loading() {
        let waiting = Rc::new(doc);
        let ready = Rc::clone(&waiting);
        waiting.on_ready(move || boot(ready))?;
    } else {
        boot(Rc::new(doc));
    }
    Ok(())
}

fn boot(doc: Rc<BrowserDocument>) {
    let animator = GsapAnimator::detect(doc.window());
    match &animator {
        Some(gsap) if !gsap.has_scroll_trigger() => warn!("ScrollTrigger not loaded, reveals play on load"),
        Some(_) => {}
        None => warn!("GSAP not loaded, animations disabled"),
    }

    let studies = case_studies::load().unwrap_or_else(|err| {
        error!("Case studies unavailable: {}", err);
        Vec::new()
    });
    info!("Loaded {} case studies", studies.len());

    // Every listener holds a strong handle to its component, so the returned state can drop here.
    let _site = site::start(doc, animator.map(Rc::new), &studies);
}
