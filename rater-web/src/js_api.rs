//! JavaScript entry point: `raterJs(selectorOrElement, options)`.
use js_sys::{Function, Reflect};
use rater_core::{ConfigError, Rater, RaterHooks, RaterOptions, RatingInput, Target};
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::binding::RaterBinding;
use crate::dom;
use crate::surface::{DocumentLookup, DomSurface};

/// Handle returned to page scripts.
#[wasm_bindgen]
pub struct JsRater {
    binding: RaterBinding,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RaterSnapshot {
    rating: Option<f64>,
    pending: Option<f64>,
    submitting: bool,
    read_only: bool,
}

/// Bind a star-rating widget to a selector or element.
///
/// # Errors
///
/// Throws when the target is neither a selector string nor an element, when
/// the selector does not match exactly one element, or when the options are
/// invalid.
#[wasm_bindgen(js_name = raterJs)]
pub fn rater_js(target: JsValue, options: JsValue) -> Result<JsRater, JsValue> {
    create(target, &options).map_err(|err| js_sys::Error::new(&err.to_string()).into())
}

fn create(target: JsValue, options: &JsValue) -> Result<JsRater, ConfigError> {
    let target = if let Some(selector) = target.as_string() {
        Target::Selector(selector)
    } else {
        match target.dyn_into::<HtmlElement>() {
            Ok(element) => Target::Surface(DomSurface::new(element)),
            Err(_) => {
                return Err(ConfigError::InvalidTarget {
                    reason: "expected a selector string or an HTMLElement".to_string(),
                });
            }
        }
    };
    let lookup = DocumentLookup::current().ok_or_else(|| ConfigError::InvalidTarget {
        reason: "no document available".to_string(),
    })?;
    let parsed = parse_options(options)?;
    let hooks = read_hooks(options);
    let rater = Rater::bind_target(target, &lookup, &parsed, hooks)?;
    Ok(JsRater {
        binding: RaterBinding::attach(rater),
    })
}

fn parse_options(options: &JsValue) -> Result<RaterOptions, ConfigError> {
    if options.is_undefined() || options.is_null() {
        return Ok(RaterOptions::default());
    }
    serde_wasm_bindgen::from_value(options.clone())
        .map_err(|err| ConfigError::Options(err.to_string()))
}

fn hook(options: &JsValue, name: &str) -> Option<Function> {
    if !options.is_object() {
        return None;
    }
    Reflect::get(options, &JsValue::from_str(name))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok())
}

fn optional(value: Option<f64>) -> JsValue {
    value.map_or(JsValue::NULL, JsValue::from)
}

fn report(name: &str, result: Result<JsValue, JsValue>) {
    if let Err(err) = result {
        log::error!("{name} callback failed: {}", dom::js_error_message(&err));
    }
}

fn read_hooks(options: &JsValue) -> RaterHooks<DomSurface> {
    let mut hooks = RaterHooks::new();
    if let Some(f) = hook(options, "onHover") {
        hooks = hooks.on_hover(move |pending, committed| {
            report(
                "onHover",
                f.call2(&JsValue::NULL, &JsValue::from(pending), &optional(committed)),
            );
        });
    }
    if let Some(f) = hook(options, "onLeave") {
        hooks = hooks.on_leave(move |pending, committed| {
            report(
                "onLeave",
                f.call2(&JsValue::NULL, &optional(pending), &optional(committed)),
            );
        });
    }
    if let Some(f) = hook(options, "rateCallback") {
        hooks = hooks.on_rate(move |value, submission| {
            let done = Closure::once_into_js(move || submission.complete());
            report(
                "rateCallback",
                f.call2(&JsValue::NULL, &JsValue::from(value), &done),
            );
        });
    }
    hooks
}

fn rating_input(value: &JsValue) -> RatingInput {
    if value.is_undefined() {
        RatingInput::Missing
    } else if value.is_null() {
        RatingInput::Null
    } else if let Some(number) = value.as_f64() {
        RatingInput::Number(number)
    } else {
        RatingInput::Other(dom::js_error_message(value))
    }
}

#[wasm_bindgen]
impl JsRater {
    /// # Errors
    ///
    /// Throws when the value is missing, null, not a number or out of range.
    #[wasm_bindgen(js_name = setRating)]
    pub fn set_rating(&self, value: JsValue) -> Result<(), JsValue> {
        self.binding
            .rater()
            .set_rating(rating_input(&value))
            .map_err(|err| js_sys::Error::new(&err.to_string()).into())
    }

    #[wasm_bindgen(js_name = getRating)]
    #[must_use]
    pub fn get_rating(&self) -> JsValue {
        optional(self.binding.rater().rating())
    }

    pub fn disable(&self) {
        self.binding.rater().disable();
    }

    pub fn enable(&self) {
        self.binding.rater().enable();
    }

    pub fn clear(&self) {
        self.binding.rater().clear();
    }

    pub fn dispose(&mut self) {
        self.binding.dispose();
    }

    #[wasm_bindgen(getter)]
    #[must_use]
    pub fn element(&self) -> HtmlElement {
        self.binding.rater().element().element().clone()
    }

    /// Plain-object view of the widget state, for debugging and tests.
    #[must_use]
    pub fn snapshot(&self) -> JsValue {
        let rater = self.binding.rater();
        let snapshot = RaterSnapshot {
            rating: rater.rating(),
            pending: rater.pending(),
            submitting: rater.is_submitting(),
            read_only: rater.is_read_only(),
        };
        serde_wasm_bindgen::to_value(&snapshot).unwrap_or(JsValue::NULL)
    }
}
