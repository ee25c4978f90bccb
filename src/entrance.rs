//! One-shot entrance animations for the hero and the scroll-revealed sections.

use std::rc::Rc;

use log::debug;

use crate::config;
use crate::dom::Document;
use crate::motion::{Animator, Ease, Props, ScrollTrigger, TimelineStep, Tween};

const TYPE_DELAY: f64 = 0.5;
const TYPE_INTERVAL: f64 = 0.05;
const OVERSHOOT: Ease = Ease::BackOut(1.7);
const REVEAL_DURATION: f64 = 0.8;

/// A group of elements faded in when their section scrolls into view.
struct RevealGroup {
    selector: &'static str,
    trigger: &'static str,
    from: Props,
    to: Props,
    duration: f64,
    stagger: Option<f64>,
}

fn reveal_groups() -> Vec<RevealGroup> {
    vec![
        RevealGroup {
            selector: config::SERVICE_CARD_SELECTOR,
            trigger: ".services-section",
            from: Props::new().opacity(0.0).y(60.0),
            to: Props::new().opacity(1.0).y(0.0),
            duration: REVEAL_DURATION,
            stagger: Some(0.15),
        },
        RevealGroup {
            selector: ".about-content",
            trigger: ".about-section",
            from: Props::new().opacity(0.0).x(-80.0),
            to: Props::new().opacity(1.0).x(0.0),
            duration: 1.0,
            stagger: None,
        },
        RevealGroup {
            selector: ".contact-content",
            trigger: ".contact-section",
            from: Props::new().opacity(0.0).y(80.0),
            to: Props::new().opacity(1.0).y(0.0),
            duration: 1.0,
            stagger: None,
        },
        RevealGroup {
            selector: ".case-studies-accordion",
            trigger: ".case-studies-section",
            from: Props::new().opacity(0.0).y(60.0),
            to: Props::new().opacity(1.0).y(0.0),
            duration: REVEAL_DURATION,
            stagger: None,
        },
    ]
}

/// Without an animator the page keeps its static, fully visible layout.
pub fn init_page_animations<D, A>(doc: &Rc<D>, animator: Option<&A>)
where
    D: Document + 'static,
    A: Animator<Node = D::Node>,
{
    let Some(animator) = animator else {
        debug!("No animation engine, skipping entrance animations");
        return;
    };

    if let Some(icon) = doc.element_by_id(config::HERO_ICON_ID) {
        animator.set(&[icon.clone()], &Props::new().scale(0.0).opacity(0.0));
        animator.play(
            Tween::to(vec![icon], Props::new().scale(1.0).opacity(1.0))
                .duration(1.0)
                .ease(OVERSHOOT),
        );
    }

    if let Some(headline) = doc.element_by_id(config::HEADLINE_ID) {
        type_headline(doc, animator, headline);
    }

    if let Some(cta) = doc.element_by_id(config::CTA_BUTTON_ID) {
        animator.set(&[cta.clone()], &Props::new().y(50.0).opacity(0.0));
        animator.play(
            Tween::to(vec![cta], Props::new().y(0.0).opacity(1.0))
                .duration(0.8)
                .delay(2.0)
                .ease(OVERSHOOT),
        );
    }

    for group in reveal_groups() {
        reveal(&**doc, animator, group);
    }
}

/// Clears the headline and types it back one character per timeline step.
fn type_headline<D, A>(doc: &Rc<D>, animator: &A, headline: D::Node)
where
    D: Document + 'static,
    A: Animator<Node = D::Node>,
{
    let captured = doc.text(&headline);
    let text = match captured.trim() {
        "" => config::FALLBACK_HEADLINE.to_string(),
        trimmed => trimmed.to_string(),
    };

    doc.set_text(&headline, "");
    animator.set(&[headline.clone()], &Props::new().opacity(1.0));

    let mut revealed = String::with_capacity(text.len());
    let steps = text
        .chars()
        .map(|ch| {
            revealed.push(ch);
            let doc = Rc::clone(doc);
            let node = headline.clone();
            let shown = revealed.clone();
            TimelineStep::new(TYPE_INTERVAL, move || doc.set_text(&node, &shown))
        })
        .collect();
    animator.timeline(&headline, TYPE_DELAY, steps);
}

fn reveal<D, A>(doc: &D, animator: &A, group: RevealGroup)
where
    D: Document,
    A: Animator<Node = D::Node>,
{
    let targets = doc.query_all(group.selector);
    if targets.is_empty() {
        return;
    }

    let mut tween = Tween::from_to(targets, group.from, group.to)
        .duration(group.duration)
        .ease(Ease::Power3Out);
    if let Some(stagger) = group.stagger {
        tween = tween.stagger(stagger);
    }
    // Without the scroll extension the reveal just plays on load.
    if animator.supports_scroll_trigger() {
        tween = tween.scroll_trigger(ScrollTrigger::entering(group.trigger));
    }
    animator.play(tween);
}
