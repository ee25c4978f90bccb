use std::cell::RefCell;
use std::rc::Rc;

use log::info;

use crate::accordion::Accordion;
use crate::cards::CardActivator;
use crate::case_studies::CaseStudy;
use crate::dom::Document;
use crate::entrance::init_page_animations;
use crate::hover::bind_hover_effects;
use crate::motion::Animator;
use crate::nav::MobileMenu;
use crate::scroll::bind_smooth_scrolling;

/// Handles to what the page scripts set up.
///
/// Every listener owns a strong handle to its component, so dropping a `Site` leaves the page
/// working. It is returned for inspection: component state and how many elements were bound.
pub struct Site<D: Document, A> {
    pub accordion: Option<Rc<RefCell<Accordion<D, A>>>>,
    pub cards: Option<Rc<CardActivator<D>>>,
    pub menu: Option<Rc<MobileMenu<D>>>,
    pub hover_effects: usize,
    pub anchor_links: usize,
}

/// Runs every initializer once, in page order.
pub fn start<D, A>(doc: Rc<D>, animator: Option<Rc<A>>, studies: &[CaseStudy]) -> Site<D, A>
where
    D: Document + 'static,
    A: Animator<Node = D::Node> + 'static,
{
    init_page_animations(&doc, animator.as_deref());
    let hover_effects = bind_hover_effects(&doc, animator.clone());
    let cards = CardActivator::mount(Rc::clone(&doc));
    let menu = MobileMenu::mount(Rc::clone(&doc));
    let anchor_links = bind_smooth_scrolling(&doc);
    let accordion = Accordion::mount(Rc::clone(&doc), animator, studies);

    info!(
        "Page ready: {} hover effects, {} anchor links, cards {}, menu {}, {} case studies",
        hover_effects,
        anchor_links,
        if cards.is_some() { "on" } else { "off" },
        if menu.is_some() { "on" } else { "off" },
        accordion.as_ref().map_or(0, |a| a.borrow().len()),
    );

    Site {
        accordion,
        cards,
        menu,
        hover_effects,
        anchor_links,
    }
}
