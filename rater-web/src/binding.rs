//! DOM event wiring for a bound `Rater`.
use rater_core::Rater;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, HtmlElement, MouseEvent, TouchEvent};

use crate::surface::DomSurface;

type Listener = Closure<dyn FnMut(Event)>;

pub const POINTER_EVENTS: [&str; 7] = [
    "mousemove",
    "mouseleave",
    "click",
    "touchmove",
    "touchstart",
    "touchend",
    "touchcancel",
];

/// Keeps the listeners of one widget alive; dropping it detaches them.
pub struct RaterBinding {
    rater: Rater<DomSurface>,
    target: HtmlElement,
    listeners: Vec<(&'static str, Listener)>,
}

impl RaterBinding {
    /// Subscribe `rater` to pointer and touch events on its element.
    #[must_use]
    pub fn attach(rater: Rater<DomSurface>) -> Self {
        let target = rater.element().element().clone();
        let mut binding = Self {
            rater,
            target,
            listeners: Vec::with_capacity(POINTER_EVENTS.len()),
        };
        for event in POINTER_EVENTS {
            let listener = binding.listener_for(event);
            if binding
                .target
                .add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())
                .is_err()
            {
                log::warn!("could not subscribe rating widget to {event}");
                continue;
            }
            binding.listeners.push((event, listener));
        }
        binding
    }

    fn listener_for(&self, event: &'static str) -> Listener {
        let rater = self.rater.clone();
        let handler: Box<dyn FnMut(Event)> = match event {
            "mousemove" => Box::new(move |e: Event| {
                if let Some(mouse) = e.dyn_ref::<MouseEvent>() {
                    rater.pointer_move(rater.element().offset_of(mouse.client_x()));
                }
            }),
            "mouseleave" => Box::new(move |_: Event| rater.pointer_leave()),
            "click" => Box::new(move |_: Event| rater.commit()),
            "touchmove" | "touchstart" => Box::new(move |e: Event| {
                e.prevent_default();
                touch_move(&rater, &e);
            }),
            "touchend" => Box::new(move |e: Event| {
                e.prevent_default();
                touch_move(&rater, &e);
                rater.commit();
            }),
            _ => Box::new(move |e: Event| {
                e.prevent_default();
                rater.pointer_leave();
            }),
        };
        Closure::wrap(handler)
    }

    #[must_use]
    pub const fn rater(&self) -> &Rater<DomSurface> {
        &self.rater
    }

    /// Number of live event subscriptions.
    #[must_use]
    pub fn subscriptions(&self) -> usize {
        self.listeners.len()
    }

    /// Detach every listener and retire the widget.
    pub fn dispose(&mut self) {
        for (event, listener) in self.listeners.drain(..) {
            let _ = self
                .target
                .remove_event_listener_with_callback(event, listener.as_ref().unchecked_ref());
        }
        self.rater.dispose();
    }

    /// Dispose, strip the widget's markers from the element and remove the
    /// fill overlay, leaving the element ready for a fresh binding.
    pub fn release(mut self) {
        self.dispose();
        self.rater.release();
        self.rater.overlay().detach();
    }
}

impl Drop for RaterBinding {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn touch_move(rater: &Rater<DomSurface>, event: &Event) {
    let touch = event
        .dyn_ref::<TouchEvent>()
        .and_then(|touch| touch.changed_touches().get(0));
    if let Some(touch) = touch {
        rater.pointer_move(rater.element().offset_of(touch.client_x()));
    }
}
