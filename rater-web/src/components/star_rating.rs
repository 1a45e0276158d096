#[cfg(target_arch = "wasm32")]
use std::{cell::RefCell, rc::Rc};

use rater_core::{Rater, RaterOptions, SubmissionHandle, Surface};
use yew::hook;
use yew::prelude::*;

#[cfg(target_arch = "wasm32")]
use crate::binding::RaterBinding;
use crate::surface::DomSurface;

/// A click or tap the parent must resolve by completing `submission`.
pub struct RateRequest {
    pub value: f64,
    pub submission: SubmissionHandle<DomSurface>,
}

#[derive(Properties, PartialEq, Clone)]
pub struct StarRatingProps {
    #[prop_or(5)]
    pub max: u32,
    #[prop_or_default]
    pub rating: Option<f64>,
    #[prop_or_default]
    pub read_only: bool,
    #[prop_or(16.0)]
    pub star_size: f64,
    #[prop_or_default]
    pub step: Option<f64>,
    #[prop_or_default]
    pub reverse: bool,
    #[prop_or_default]
    pub busy_text: Option<AttrValue>,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub on_hover: Option<Callback<f64>>,
    #[prop_or_default]
    pub on_rate: Option<Callback<RateRequest>>,
}

impl StarRatingProps {
    #[must_use]
    pub fn options(&self) -> RaterOptions {
        let mut options = RaterOptions::default()
            .with_max(self.max)
            .with_read_only(self.read_only)
            .with_star_size(self.star_size)
            .with_reverse(self.reverse);
        options.rating = self.rating;
        options.step = self.step;
        options.is_busy_text = self.busy_text.as_ref().map(ToString::to_string);
        options
    }

    /// What a props change from `prev` requires of an already bound widget.
    #[must_use]
    pub fn update_from(&self, prev: &Self) -> PropsUpdate {
        let layout_changed = self.max != prev.max
            || self.star_size.to_bits() != prev.star_size.to_bits()
            || self.step != prev.step
            || self.reverse != prev.reverse
            || self.busy_text != prev.busy_text
            || self.on_rate.is_some() != prev.on_rate.is_some();
        if layout_changed {
            PropsUpdate::Rebind
        } else if self.rating != prev.rating || self.read_only != prev.read_only {
            PropsUpdate::Sync
        } else {
            PropsUpdate::Unchanged
        }
    }
}

/// How a props change reaches the bound widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropsUpdate {
    /// Only callbacks or classes changed.
    Unchanged,
    /// Push `rating` and `read_only` through the widget API.
    Sync,
    /// Scale, step, axis, busy text or rate handler presence changed;
    /// release and bind again.
    Rebind,
}

/// Bring a live widget in line with `rating` and `read_only` without
/// rebinding, so an open submission stays current.
pub fn sync_rater<S: Surface>(rater: &Rater<S>, props: &StarRatingProps) {
    match props.rating {
        Some(value) if rater.rating() != Some(value) => {
            if let Err(err) = rater.set_rating(value) {
                log::warn!("star rating prop {value} rejected: {err}");
            }
        }
        Some(_) => {}
        None => {
            if rater.rating().is_some() {
                rater.clear();
            }
        }
    }
    if props.read_only {
        rater.disable();
    } else if rater.is_read_only() {
        rater.enable();
    }
}

#[function_component(StarRating)]
pub fn star_rating(props: &StarRatingProps) -> Html {
    let host = use_node_ref();
    use_bind_effect(host.clone(), props.clone());

    let class = classes!("star-rating-host", props.class.clone());
    let value_now = props.rating.map(|r| r.to_string());
    html! {
        <div
            ref={host}
            class={class}
            role="slider"
            aria-label="Rating"
            aria-valuemin="0"
            aria-valuemax={props.max.to_string()}
            aria-valuenow={value_now}
            aria-readonly={props.read_only.to_string()}
        />
    }
}

#[cfg(target_arch = "wasm32")]
type Slot = Rc<RefCell<Option<(RaterBinding, StarRatingProps)>>>;

/// Bind `host`; hooks read callbacks from `latest` so callback-only prop
/// changes need no rebind.
#[cfg(target_arch = "wasm32")]
fn bind_host(host: &NodeRef, latest: &Rc<RefCell<StarRatingProps>>) -> Option<RaterBinding> {
    use rater_core::RaterHooks;

    let element = host.cast::<web_sys::HtmlElement>()?;
    let props = latest.borrow();
    let on_hover = Rc::clone(latest);
    let mut hooks = RaterHooks::new().on_hover(move |pending, _| {
        let cb = on_hover.borrow().on_hover.clone();
        if let Some(cb) = cb {
            cb.emit(pending);
        }
    });
    if props.on_rate.is_some() {
        let on_rate = Rc::clone(latest);
        hooks = hooks.on_rate(move |value, submission| {
            let cb = on_rate.borrow().on_rate.clone();
            match cb {
                Some(cb) => cb.emit(RateRequest { value, submission }),
                None => submission.complete(),
            }
        });
    }
    Rater::bind(DomSurface::new(element), &props.options(), hooks)
        .map_err(|err| log::error!("star rating not bound: {err}"))
        .ok()
        .map(RaterBinding::attach)
}

#[cfg(target_arch = "wasm32")]
#[hook]
fn use_bind_effect(host: NodeRef, props: StarRatingProps) {
    let latest = use_mut_ref(|| props.clone());
    let slot: Slot = use_mut_ref(|| None);

    {
        let slot = Rc::clone(&slot);
        use_effect_with(props, move |props| {
            *latest.borrow_mut() = props.clone();
            let mut bound = slot.borrow_mut();
            let update = bound
                .as_ref()
                .map_or(PropsUpdate::Rebind, |(_, prev)| props.update_from(prev));
            match update {
                PropsUpdate::Unchanged => {}
                PropsUpdate::Sync => {
                    if let Some((binding, prev)) = bound.as_mut() {
                        sync_rater(binding.rater(), props);
                        *prev = props.clone();
                    }
                }
                PropsUpdate::Rebind => {
                    if let Some((binding, _)) = bound.take() {
                        binding.release();
                    }
                    *bound = bind_host(&host, &latest).map(|binding| (binding, props.clone()));
                }
            }
            || ()
        });
    }

    use_effect_with((), move |()| {
        move || {
            if let Some((binding, _)) = slot.borrow_mut().take() {
                binding.release();
            }
        }
    });
}

#[cfg(not(target_arch = "wasm32"))]
#[hook]
fn use_bind_effect(host: NodeRef, props: StarRatingProps) {
    let _ = (host, props);
}
