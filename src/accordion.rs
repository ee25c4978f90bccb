//! Case studies accordion.
//!
//! Renders the case study list into its container and keeps one expanded flag per item. The
//! flag is mirrored on the page as the `is-expanded` class on the item and `aria-expanded` on
//! its header.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};

use crate::case_studies::CaseStudy;
use crate::config;
use crate::dom::{Document, EventKind, ListenTarget};
use crate::motion::{Animator, Ease, MotionPolicy, Props, Tween};
use crate::render::{header_id, panel_id, render_case_studies};

pub const EXPANDED_CLASS: &str = "is-expanded";
const ITEM_SELECTOR: &str = ".case-study-item";
const BLOCK_SELECTOR: &str = ".case-study-block";

const PANEL_DURATION: f64 = 0.4;
const PANEL_PADDING_BOTTOM: f64 = 50.0;
const BLOCK_FADE_OUT: f64 = 0.2;
const COLLAPSE_DELAY: f64 = 0.1;
const BLOCK_REVEAL: f64 = 0.5;
const BLOCK_REVEAL_DELAY: f64 = 0.2;
const BLOCK_STAGGER: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Expand,
    Collapse,
}

struct Item<N> {
    root: N,
    header: N,
    panel: N,
    expanded: bool,
}

pub struct Accordion<D: Document, A> {
    doc: Rc<D>,
    animator: Option<Rc<A>>,
    items: Vec<Item<D::Node>>,
}

impl<D, A> Accordion<D, A>
where
    D: Document + 'static,
    A: Animator<Node = D::Node> + 'static,
{
    /// Renders `studies` into the accordion container and wires each header.
    ///
    /// Returns `None`, leaving the page untouched, when the container is missing or there is
    /// nothing to show.
    pub fn mount(doc: Rc<D>, animator: Option<Rc<A>>, studies: &[CaseStudy]) -> Option<Rc<RefCell<Self>>> {
        let Some(container) = doc.element_by_id(config::ACCORDION_CONTAINER_ID) else {
            debug!("No #{} on this page", config::ACCORDION_CONTAINER_ID);
            return None;
        };
        if studies.is_empty() {
            debug!("No case studies to show");
            return None;
        }

        doc.replace_children(&container, &render_case_studies(studies));

        let mut items = Vec::with_capacity(studies.len());
        for study in studies {
            let header = doc.element_by_id(&header_id(&study.id));
            let panel = doc.element_by_id(&panel_id(&study.id));
            let (Some(header), Some(panel)) = (header, panel) else {
                warn!("Case study {} rendered without header or panel", study.id);
                continue;
            };
            let root = doc.closest(&header, ITEM_SELECTOR).unwrap_or_else(|| header.clone());
            items.push(Item {
                root,
                header,
                panel,
                expanded: false,
            });
        }

        let accordion = Rc::new(RefCell::new(Self {
            doc: Rc::clone(&doc),
            animator,
            items,
        }));

        for (index, item) in accordion.borrow().items.iter().enumerate() {
            let on_click = Rc::clone(&accordion);
            doc.listen(
                ListenTarget::Node(&item.header),
                EventKind::Click,
                Box::new(move |_| on_click.borrow_mut().toggle(index)),
            );

            let on_key = Rc::clone(&accordion);
            doc.listen(
                ListenTarget::Node(&item.header),
                EventKind::KeyDown,
                Box::new(move |event| {
                    if !event.key().map_or(false, is_toggle_key) {
                        return;
                    }
                    // Space would otherwise scroll the page
                    event.prevent_default();
                    on_key.borrow_mut().toggle(index);
                }),
            );
        }

        debug!("Mounted {} case studies", accordion.borrow().items.len());
        Some(accordion)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.items.get(index).map_or(false, |item| item.expanded)
    }

    pub fn toggle(&mut self, index: usize) {
        let policy = MotionPolicy::detect(&*self.doc, self.animator.is_some());
        let Some(item) = self.items.get_mut(index) else {
            return;
        };
        item.expanded = !item.expanded;

        let direction = if item.expanded {
            Direction::Expand
        } else {
            Direction::Collapse
        };
        let (root, header, panel) = (item.root.clone(), item.header.clone(), item.panel.clone());

        match direction {
            Direction::Expand => {
                self.doc.add_class(&root, EXPANDED_CLASS);
                self.doc.set_attribute(&header, "aria-expanded", "true");
            }
            Direction::Collapse => {
                self.doc.remove_class(&root, EXPANDED_CLASS);
                self.doc.set_attribute(&header, "aria-expanded", "false");
            }
        }
        self.transition(&panel, direction, policy);
    }

    fn transition(&self, panel: &D::Node, direction: Direction, policy: MotionPolicy) {
        let doc = &self.doc;
        let height = match direction {
            Direction::Expand => self.measure(panel),
            Direction::Collapse => 0.0,
        };
        let blocks = doc.query_within(panel, BLOCK_SELECTOR);

        match (direction, policy, self.animator.as_deref()) {
            (Direction::Expand, MotionPolicy::Reduced, _) => {
                doc.set_style(panel, "max-height", "none");
                doc.set_style(panel, "opacity", "1");
                for block in &blocks {
                    doc.set_style(block, "opacity", "1");
                    doc.set_style(block, "transform", "none");
                }
            }
            (Direction::Collapse, MotionPolicy::Reduced, _) => {
                doc.set_style(panel, "max-height", "0");
                doc.set_style(panel, "opacity", "0");
                for block in &blocks {
                    doc.set_style(block, "opacity", "0");
                }
            }
            (Direction::Expand, MotionPolicy::Full, Some(animator)) => {
                let release = self.panel_finisher(panel, "none");
                animator.play(
                    Tween::from_to(
                        vec![panel.clone()],
                        Props::new().max_height(0.0).opacity(0.0).padding_bottom(0.0),
                        Props::new()
                            .max_height(format!("{}px", height))
                            .opacity(1.0)
                            .padding_bottom(PANEL_PADDING_BOTTOM),
                    )
                    .duration(PANEL_DURATION)
                    .ease(Ease::Power2InOut)
                    .on_complete(release),
                );
                for (index, block) in blocks.into_iter().enumerate() {
                    animator.play(
                        Tween::from_to(
                            vec![block],
                            Props::new().opacity(0.0).y(20.0),
                            Props::new().opacity(1.0).y(0.0),
                        )
                        .duration(BLOCK_REVEAL)
                        .delay(BLOCK_REVEAL_DELAY + index as f64 * BLOCK_STAGGER)
                        .ease(Ease::Power2Out),
                    );
                }
            }
            (Direction::Collapse, MotionPolicy::Full, Some(animator)) => {
                if !blocks.is_empty() {
                    animator.play(
                        Tween::to(blocks, Props::new().opacity(0.0).y(-10.0))
                            .duration(BLOCK_FADE_OUT)
                            .ease(Ease::Power2In),
                    );
                }
                let settle = self.panel_finisher(panel, "0");
                animator.play(
                    Tween::to(
                        vec![panel.clone()],
                        Props::new().max_height(0.0).opacity(0.0).padding_bottom(0.0),
                    )
                    .duration(PANEL_DURATION)
                    .delay(COLLAPSE_DELAY)
                    .ease(Ease::Power2InOut)
                    .on_complete(settle),
                );
            }
            // No engine: set the end state and let the stylesheet's transition run.
            (Direction::Expand, _, _) => {
                doc.set_style(panel, "max-height", &format!("{}px", height));
                doc.set_style(panel, "opacity", "1");
            }
            (Direction::Collapse, _, _) => {
                doc.set_style(panel, "max-height", "0");
                doc.set_style(panel, "opacity", "0");
            }
        }
    }

    /// Natural height of the panel's content, leaving the panel collapsed at zero.
    fn measure(&self, panel: &D::Node) -> f64 {
        self.doc.set_style(panel, "max-height", "none");
        let height = self.doc.scroll_height(panel);
        self.doc.set_style(panel, "max-height", "0");
        self.doc.force_layout(panel);
        height
    }

    fn panel_finisher(&self, panel: &D::Node, max_height: &'static str) -> impl FnOnce() + 'static {
        let doc = Rc::clone(&self.doc);
        let panel = panel.clone();
        move || doc.set_style(&panel, "max-height", max_height)
    }
}

fn is_toggle_key(key: &str) -> bool {
    key == "Enter" || key == " "
}
