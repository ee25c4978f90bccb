//! The page's global GSAP object as an [`Animator`].

use log::warn;
use serde::Serialize;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::js_sys;
use web_sys::{Element, Window};

use crate::error::SiteError;
use crate::motion::{Animator, OnComplete, Props, ScrollTrigger, TimelineStep, Tween};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = gsap, js_name = set)]
    fn gsap_set(targets: &JsValue, vars: &JsValue);

    #[wasm_bindgen(js_namespace = gsap, js_name = to)]
    fn gsap_to(targets: &JsValue, vars: &JsValue);

    #[wasm_bindgen(js_namespace = gsap, js_name = fromTo)]
    fn gsap_from_to(targets: &JsValue, from: &JsValue, to: &JsValue);

    #[wasm_bindgen(js_namespace = gsap, js_name = registerPlugin)]
    fn gsap_register_plugin(plugin: &JsValue);

    type GsapTimeline;

    #[wasm_bindgen(js_namespace = gsap, js_name = timeline)]
    fn gsap_timeline(vars: &JsValue) -> GsapTimeline;

    #[wasm_bindgen(method, js_name = to)]
    fn to(this: &GsapTimeline, target: &JsValue, vars: &JsValue) -> GsapTimeline;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TweenVars<'a> {
    #[serde(flatten)]
    props: &'a Props,
    duration: f64,
    #[serde(skip_serializing_if = "is_zero")]
    delay: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    ease: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stagger: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scroll_trigger: Option<&'a ScrollTrigger>,
}

fn is_zero(value: &f64) -> bool {
    *value == 0.0
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, SiteError> {
    // Plain objects, not Maps: GSAP reads vars as object properties.
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    Ok(value.serialize(&serializer)?)
}

fn with_on_complete(vars: &JsValue, callback: OnComplete) -> Result<(), SiteError> {
    let callback = Closure::once_into_js(callback);
    js_sys::Reflect::set(vars, &JsValue::from_str("onComplete"), &callback)?;
    Ok(())
}

fn targets(elements: &[Element]) -> JsValue {
    elements.iter().collect::<js_sys::Array>().into()
}

pub struct GsapAnimator {
    scroll_trigger: bool,
}

impl GsapAnimator {
    /// Finds GSAP on the page and registers its ScrollTrigger plugin when that is loaded too.
    pub fn detect(window: &Window) -> Option<Self> {
        let global = |name: &str| {
            js_sys::Reflect::get(window, &JsValue::from_str(name))
                .ok()
                .filter(|value| !value.is_undefined() && !value.is_null())
        };

        global("gsap")?;
        let scroll_trigger = match global("ScrollTrigger") {
            Some(plugin) => {
                gsap_register_plugin(&plugin);
                true
            }
            None => false,
        };
        Some(Self { scroll_trigger })
    }

    pub fn has_scroll_trigger(&self) -> bool {
        self.scroll_trigger
    }

    fn try_play(&self, tween: Tween<Element>) -> Result<(), SiteError> {
        let Tween {
            targets: elements,
            from,
            to,
            duration,
            delay,
            ease,
            stagger,
            scroll_trigger,
            on_complete,
        } = tween;

        let vars = to_js(&TweenVars {
            props: &to,
            duration,
            delay,
            ease: ease.map(|e| e.name()),
            stagger,
            scroll_trigger: scroll_trigger.as_ref(),
        })?;
        if let Some(callback) = on_complete {
            with_on_complete(&vars, callback)?;
        }

        let targets = targets(&elements);
        match from {
            Some(from) => gsap_from_to(&targets, &to_js(&from)?, &vars),
            None => gsap_to(&targets, &vars),
        }
        Ok(())
    }

    fn try_timeline(&self, target: &Element, delay: f64, steps: Vec<TimelineStep>) -> Result<(), SiteError> {
        let timeline_vars = js_sys::Object::new();
        js_sys::Reflect::set(&timeline_vars, &JsValue::from_str("delay"), &JsValue::from_f64(delay))?;
        let timeline = gsap_timeline(&timeline_vars);

        for step in steps {
            let vars: JsValue = js_sys::Object::new().into();
            js_sys::Reflect::set(&vars, &JsValue::from_str("duration"), &JsValue::from_f64(step.duration))?;
            with_on_complete(&vars, step.on_complete)?;
            timeline.to(target, &vars);
        }
        Ok(())
    }
}

impl Animator for GsapAnimator {
    type Node = Element;

    fn set(&self, targets_: &[Element], props: &Props) {
        match to_js(props) {
            Ok(vars) => gsap_set(&targets(targets_), &vars),
            Err(err) => warn!("gsap.set skipped: {}", err),
        }
    }

    fn play(&self, tween: Tween<Element>) {
        if let Err(err) = self.try_play(tween) {
            warn!("Tween skipped: {}", err);
        }
    }

    fn timeline(&self, target: &Element, delay: f64, steps: Vec<TimelineStep>) {
        if let Err(err) = self.try_timeline(target, delay, steps) {
            warn!("Timeline skipped: {}", err);
        }
    }

    fn supports_scroll_trigger(&self) -> bool {
        self.scroll_trigger
    }
}
