//! Animation capability.
//!
//! The page hands all timing and easing to an external engine. Components describe what they
//! want as [`Props`] and [`Tween`] values and pass them to an [`Animator`].

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config;
use crate::dom::Document;

pub type OnComplete = Box<dyn FnOnce()>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropValue {
    Number(f64),
    Text(String),
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Number(value)
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Text(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Text(value)
    }
}

/// Animated properties keyed by their engine (camelCase) names.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Props(BTreeMap<&'static str, PropValue>);

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &'static str, value: impl Into<PropValue>) -> Self {
        self.0.insert(name, value.into());
        self
    }

    pub fn opacity(self, value: f64) -> Self {
        self.with("opacity", value)
    }

    pub fn x(self, value: f64) -> Self {
        self.with("x", value)
    }

    pub fn y(self, value: f64) -> Self {
        self.with("y", value)
    }

    pub fn scale(self, value: f64) -> Self {
        self.with("scale", value)
    }

    pub fn rotation(self, degrees: f64) -> Self {
        self.with("rotation", degrees)
    }

    pub fn filter(self, value: &str) -> Self {
        self.with("filter", value)
    }

    pub fn max_height(self, value: impl Into<PropValue>) -> Self {
        self.with("maxHeight", value)
    }

    pub fn padding_bottom(self, value: f64) -> Self {
        self.with("paddingBottom", value)
    }

    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.0.get(name)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        match self.get(name) {
            Some(PropValue::Number(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ease {
    BackOut(f64),
    Power2In,
    Power2Out,
    Power2InOut,
    Power3Out,
}

impl Ease {
    pub fn name(self) -> String {
        match self {
            Ease::BackOut(overshoot) => format!("back.out({})", overshoot),
            Ease::Power2In => "power2.in".to_string(),
            Ease::Power2Out => "power2.out".to_string(),
            Ease::Power2InOut => "power2.inOut".to_string(),
            Ease::Power3Out => "power3.out".to_string(),
        }
    }
}

/// Plays an animation when its trigger scrolls into view and reverses it on the way back out.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollTrigger {
    pub trigger: String,
    pub start: &'static str,
    pub end: &'static str,
    pub toggle_actions: &'static str,
}

impl ScrollTrigger {
    pub fn entering(trigger: &str) -> Self {
        Self {
            trigger: trigger.to_string(),
            start: "top 80%",
            end: "bottom 20%",
            toggle_actions: "play none none reverse",
        }
    }
}

pub struct Tween<N> {
    pub targets: Vec<N>,
    pub from: Option<Props>,
    pub to: Props,
    pub duration: f64,
    pub delay: f64,
    pub ease: Option<Ease>,
    pub stagger: Option<f64>,
    pub scroll_trigger: Option<ScrollTrigger>,
    pub on_complete: Option<OnComplete>,
}

impl<N> Tween<N> {
    pub fn to(targets: Vec<N>, to: Props) -> Self {
        Self {
            targets,
            from: None,
            to,
            duration: 0.5,
            delay: 0.0,
            ease: None,
            stagger: None,
            scroll_trigger: None,
            on_complete: None,
        }
    }

    pub fn from_to(targets: Vec<N>, from: Props, to: Props) -> Self {
        Self {
            from: Some(from),
            ..Self::to(targets, to)
        }
    }

    pub fn duration(mut self, seconds: f64) -> Self {
        self.duration = seconds;
        self
    }

    pub fn delay(mut self, seconds: f64) -> Self {
        self.delay = seconds;
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = Some(ease);
        self
    }

    pub fn stagger(mut self, seconds: f64) -> Self {
        self.stagger = Some(seconds);
        self
    }

    pub fn scroll_trigger(mut self, trigger: ScrollTrigger) -> Self {
        self.scroll_trigger = Some(trigger);
        self
    }

    pub fn on_complete(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }
}

/// One entry of a sequenced timeline: wait `duration`, then run `on_complete`.
pub struct TimelineStep {
    pub duration: f64,
    pub on_complete: OnComplete,
}

impl TimelineStep {
    pub fn new(duration: f64, on_complete: impl FnOnce() + 'static) -> Self {
        Self {
            duration,
            on_complete: Box::new(on_complete),
        }
    }
}

pub trait Animator {
    type Node;

    /// Applies `props` immediately.
    fn set(&self, targets: &[Self::Node], props: &Props);
    fn play(&self, tween: Tween<Self::Node>);
    fn timeline(&self, target: &Self::Node, delay: f64, steps: Vec<TimelineStep>);
    fn supports_scroll_trigger(&self) -> bool;
}

/// How a state change should reach the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionPolicy {
    /// Animated through the engine.
    Full,
    /// The user asked for reduced motion: jump straight to the final state.
    Reduced,
    /// No engine on the page: set the final state and let CSS transitions do the rest.
    Unavailable,
}

impl MotionPolicy {
    pub fn detect<D: Document + ?Sized>(doc: &D, animator_available: bool) -> Self {
        if doc.matches_media(config::REDUCED_MOTION_QUERY) {
            MotionPolicy::Reduced
        } else if animator_available {
            MotionPolicy::Full
        } else {
            MotionPolicy::Unavailable
        }
    }
}
