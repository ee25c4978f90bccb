use std::rc::Rc;

use log::debug;

use crate::config;
use crate::dom::{Document, EventKind, ListenTarget};
use crate::motion::{Animator, Props, Tween};

const HOVER_DURATION: f64 = 0.3;

const CTA_GRADIENT: &str = "linear-gradient(45deg, #FF9D00, #FFD046)";
const CTA_GRADIENT_HOVER: &str = "linear-gradient(45deg, #FFD046, #FF9D00)";

enum Target {
    Id(&'static str),
    Selector(&'static str),
}

struct HoverEffect {
    target: Target,
    enter: Props,
    leave: Props,
}

fn hover_effects() -> Vec<HoverEffect> {
    vec![
        HoverEffect {
            target: Target::Id(config::HERO_ICON_ID),
            enter: Props::new().scale(1.15).filter(
                "drop-shadow(0 0 30px rgba(255, 157, 0, 1)) drop-shadow(0 0 60px rgba(255, 157, 0, 0.6))",
            ),
            leave: Props::new().scale(1.0).filter("none"),
        },
        HoverEffect {
            target: Target::Selector(config::HEADER_LOGO_SELECTOR),
            enter: Props::new().scale(1.1).filter("brightness(1.2)"),
            leave: Props::new().scale(1.0).filter("brightness(1)"),
        },
        HoverEffect {
            target: Target::Id(config::CTA_BUTTON_ID),
            enter: Props::new()
                .with("background", CTA_GRADIENT_HOVER)
                .scale(1.05)
                .with("boxShadow", "0 8px 25px rgba(255, 157, 0, 0.4)"),
            leave: Props::new()
                .with("background", CTA_GRADIENT)
                .scale(1.0)
                .with("boxShadow", "0 5px 20px rgba(255, 157, 0, 0.3)"),
        },
        HoverEffect {
            target: Target::Id(config::PROFILE_IMAGE_ID),
            enter: Props::new().rotation(5.0),
            leave: Props::new().rotation(0.0),
        },
    ]
}

/// Attaches enter/leave tweens to the hoverable hero and header elements.
///
/// Returns how many elements were bound.
pub fn bind_hover_effects<D, A>(doc: &Rc<D>, animator: Option<Rc<A>>) -> usize
where
    D: Document + 'static,
    A: Animator<Node = D::Node> + 'static,
{
    let Some(animator) = animator else {
        debug!("No animation engine, skipping hover effects");
        return 0;
    };

    let mut bound = 0;
    for effect in hover_effects() {
        let node = match effect.target {
            Target::Id(id) => doc.element_by_id(id),
            Target::Selector(selector) => doc.query(selector),
        };
        let Some(node) = node else {
            continue;
        };

        for (kind, props) in [
            (EventKind::MouseEnter, effect.enter),
            (EventKind::MouseLeave, effect.leave),
        ] {
            let animator = Rc::clone(&animator);
            let target = node.clone();
            doc.listen(
                ListenTarget::Node(&node),
                kind,
                Box::new(move |_| {
                    animator.play(
                        Tween::to(vec![target.clone()], props.clone()).duration(HOVER_DURATION),
                    );
                }),
            );
        }
        bound += 1;
    }
    bound
}
