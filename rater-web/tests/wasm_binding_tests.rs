#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Function, Object, Reflect};
use rater_core::{Rater, RaterHooks, RaterOptions, SubmissionHandle, Surface};
use rater_web::{DomSurface, RaterBinding, dom, js_api};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::{Event, HtmlElement, MouseEvent, MouseEventInit};

wasm_bindgen_test_configure!(run_in_browser);

fn host(id: &str) -> HtmlElement {
    let doc = dom::document().expect("document");
    if let Some(old) = doc.get_element_by_id(id) {
        old.remove();
    }
    let el = doc
        .create_element("div")
        .expect("create host")
        .dyn_into::<HtmlElement>()
        .expect("html element");
    el.set_id(id);
    doc.body().expect("body").append_child(&el).expect("append host");
    el
}

fn hover(el: &HtmlElement, offset: f64) {
    let left = el.get_bounding_client_rect().left();
    let init = MouseEventInit::new();
    init.set_client_x((left + offset) as i32);
    let event = MouseEvent::new_with_mouse_event_init_dict("mousemove", &init).expect("event");
    el.dispatch_event(&event).expect("dispatch");
}

fn fire(el: &HtmlElement, kind: &str) {
    let event = Event::new(kind).expect("event");
    el.dispatch_event(&event).expect("dispatch");
}

type Parked = Rc<RefCell<Vec<(f64, SubmissionHandle<DomSurface>)>>>;

fn bind_parking(el: &HtmlElement) -> (RaterBinding, Parked) {
    let parked: Parked = Rc::default();
    let sink = Rc::clone(&parked);
    let rater = Rater::bind(
        DomSurface::new(el.clone()),
        &RaterOptions::default(),
        RaterHooks::new().on_rate(move |value, submission| {
            sink.borrow_mut().push((value, submission));
        }),
    )
    .expect("bind");
    (RaterBinding::attach(rater), parked)
}

#[wasm_bindgen_test]
fn binding_decorates_element_and_subscribes() {
    let el = host("rater-bind");
    let rater = Rater::bind(
        DomSurface::new(el.clone()),
        &RaterOptions::default(),
        RaterHooks::new(),
    )
    .expect("bind");
    let mut binding = RaterBinding::attach(rater);
    assert_eq!(binding.subscriptions(), 7);
    assert!(el.class_list().contains("star-rating"));
    assert_eq!(el.child_element_count(), 1);
    assert_eq!(el.style().get_property_value("width").unwrap(), "80px");

    binding.dispose();
    assert_eq!(binding.subscriptions(), 0);
}

#[wasm_bindgen_test]
fn mouse_events_drive_the_widget() {
    let el = host("rater-mouse");
    let rater = Rater::bind(
        DomSurface::new(el.clone()),
        &RaterOptions::default(),
        RaterHooks::new(),
    )
    .expect("bind");
    let binding = RaterBinding::attach(rater);
    hover(&el, 40.0);
    assert_eq!(binding.rater().pending(), Some(3.0));
    assert_eq!(binding.rater().element().attribute("title").as_deref(), Some("3/5"));
}

#[wasm_bindgen_test]
fn factory_rejects_non_element_targets() {
    let err = js_api::rater_js(JsValue::from(42), JsValue::UNDEFINED);
    assert!(err.is_err());
}

#[wasm_bindgen_test]
fn factory_exposes_rating_api() {
    host("rater-factory");
    let rater = js_api::rater_js(JsValue::from_str("#rater-factory"), JsValue::UNDEFINED)
        .expect("factory");
    assert!(rater.get_rating().is_null());
    rater.set_rating(JsValue::from(4.0)).expect("set rating");
    assert_eq!(rater.get_rating().as_f64(), Some(4.0));
    assert!(rater.set_rating(JsValue::NULL).is_err());
    assert!(rater.set_rating(JsValue::from_str("4")).is_err());
    assert!(rater.set_rating(JsValue::from(6.0)).is_err());
    rater.clear();
    assert!(rater.get_rating().is_null());
    assert_eq!(rater.element().id(), "rater-factory");
}

#[wasm_bindgen_test]
fn touchend_commits_the_hovered_rating() {
    let el = host("rater-touchend");
    let (binding, parked) = bind_parking(&el);
    hover(&el, 40.0);
    fire(&el, "touchend");

    let parked = parked.borrow();
    assert_eq!(parked.len(), 1);
    assert_eq!(parked[0].0, 3.0);
    assert!(binding.rater().is_submitting());
    assert!(el.class_list().contains("is-busy"));
}

#[wasm_bindgen_test]
fn touchcancel_restores_the_committed_fill() {
    let el = host("rater-touchcancel");
    let left_with: Rc<RefCell<Option<(Option<f64>, Option<f64>)>>> = Rc::default();
    let sink = Rc::clone(&left_with);
    let rater = Rater::bind(
        DomSurface::new(el.clone()),
        &RaterOptions::default().with_rating(2.0),
        RaterHooks::new().on_leave(move |pending, committed| {
            *sink.borrow_mut() = Some((pending, committed));
        }),
    )
    .expect("bind");
    let binding = RaterBinding::attach(rater);
    hover(&el, 64.0);
    assert_eq!(binding.rater().fill(), 80.0);

    fire(&el, "touchcancel");
    assert_eq!(binding.rater().fill(), 40.0);
    assert_eq!(*left_with.borrow(), Some((Some(4.0), Some(2.0))));
    assert_eq!(el.get_attribute("data-rating").as_deref(), Some("2"));
}

#[wasm_bindgen_test]
fn disposed_binding_ignores_pointer_events() {
    let el = host("rater-disposed");
    let (mut binding, parked) = bind_parking(&el);
    binding.dispose();

    hover(&el, 40.0);
    fire(&el, "click");
    assert_eq!(binding.rater().pending(), None);
    assert!(parked.borrow().is_empty());
    assert!(!el.class_list().contains("is-busy"));
}

#[wasm_bindgen_test]
fn rate_callback_done_clears_busy() {
    let el = host("rater-js-done");
    let received: Rc<RefCell<Option<(JsValue, Function)>>> = Rc::default();
    let sink = Rc::clone(&received);
    let callback = Closure::<dyn FnMut(JsValue, Function)>::new(move |value, done| {
        *sink.borrow_mut() = Some((value, done));
    });
    let options = Object::new();
    Reflect::set(
        &options,
        &JsValue::from_str("rateCallback"),
        callback.as_ref().unchecked_ref(),
    )
    .expect("set rateCallback");

    let rater = js_api::rater_js(JsValue::from_str("#rater-js-done"), options.into())
        .expect("factory");
    hover(&el, 40.0);
    fire(&el, "click");
    assert!(el.class_list().contains("is-busy"));

    let (value, done) = received.borrow_mut().take().expect("rateCallback called");
    assert_eq!(value.as_f64(), Some(3.0));
    rater.set_rating(value).expect("set rating");
    done.call0(&JsValue::NULL).expect("done");

    assert!(!el.class_list().contains("is-busy"));
    assert_eq!(rater.get_rating().as_f64(), Some(3.0));
    let submitting = Reflect::get(&rater.snapshot(), &JsValue::from_str("submitting"))
        .expect("snapshot field");
    assert_eq!(submitting.as_bool(), Some(false));
}
