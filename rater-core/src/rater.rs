//! Shared handle that owns a widget together with its caller hooks.
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::config::RaterOptions;
use crate::error::{ConfigError, RatingError};
use crate::submission::SubmissionHandle;
use crate::surface::{Surface, SurfaceLookup, Target};
use crate::value::RatingInput;
use crate::widget::{RaterPhase, RatingWidget};

type HoverHook = Box<dyn Fn(f64, Option<f64>)>;
type LeaveHook = Box<dyn Fn(Option<f64>, Option<f64>)>;
type RateHook<S> = Box<dyn Fn(f64, SubmissionHandle<S>)>;

/// Caller callbacks. `on_rate` receives the candidate and the submission to
/// complete once the caller is done with it.
pub struct RaterHooks<S: Surface> {
    on_hover: Option<HoverHook>,
    on_leave: Option<LeaveHook>,
    on_rate: Option<RateHook<S>>,
}

impl<S: Surface> RaterHooks<S> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            on_hover: None,
            on_leave: None,
            on_rate: None,
        }
    }

    #[must_use]
    pub fn on_hover(mut self, hook: impl Fn(f64, Option<f64>) + 'static) -> Self {
        self.on_hover = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn on_leave(mut self, hook: impl Fn(Option<f64>, Option<f64>) + 'static) -> Self {
        self.on_leave = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn on_rate(mut self, hook: impl Fn(f64, SubmissionHandle<S>) + 'static) -> Self {
        self.on_rate = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub const fn has_rate_handler(&self) -> bool {
        self.on_rate.is_some()
    }
}

impl<S: Surface> Default for RaterHooks<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Surface> fmt::Debug for RaterHooks<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RaterHooks")
            .field("on_hover", &self.on_hover.is_some())
            .field("on_leave", &self.on_leave.is_some())
            .field("on_rate", &self.on_rate.is_some())
            .finish()
    }
}

/// Public face of a bound star-rating widget.
///
/// Clones share the same widget. Hooks fire after the widget's state has been
/// updated and released, so they may call back into the handle.
pub struct Rater<S: Surface> {
    widget: Rc<RefCell<RatingWidget<S>>>,
    hooks: Rc<RaterHooks<S>>,
}

impl<S: Surface> Clone for Rater<S> {
    fn clone(&self) -> Self {
        Self {
            widget: Rc::clone(&self.widget),
            hooks: Rc::clone(&self.hooks),
        }
    }
}

impl<S: Surface> Rater<S> {
    /// Bind directly to a surface.
    ///
    /// # Errors
    ///
    /// See [`RatingWidget::bind`].
    pub fn bind(
        surface: S,
        options: &RaterOptions,
        hooks: RaterHooks<S>,
    ) -> Result<Self, ConfigError> {
        let widget = RatingWidget::bind(surface, options, hooks.has_rate_handler())?;
        Ok(Self {
            widget: Rc::new(RefCell::new(widget)),
            hooks: Rc::new(hooks),
        })
    }

    /// Bind to a selector or surface resolved against `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTarget`] when the selector does not match
    /// exactly one surface, or any error from [`Rater::bind`].
    pub fn bind_target<L: SurfaceLookup<S>>(
        target: Target<S>,
        lookup: &L,
        options: &RaterOptions,
        hooks: RaterHooks<S>,
    ) -> Result<Self, ConfigError> {
        let surface = target.resolve(lookup)?;
        Self::bind(surface, options, hooks)
    }

    /// Pointer sample at `x` pixels from the surface's left edge, using the
    /// surface's current width.
    pub fn pointer_move(&self, x: f64) {
        let width = self.widget.borrow().surface().width();
        self.pointer_move_within(x, width);
    }

    pub fn pointer_move_within(&self, x: f64, width: f64) {
        let hover = self.widget.borrow_mut().handle_move(x, width);
        if let (Some(hover), Some(hook)) = (hover, self.hooks.on_hover.as_ref()) {
            hook(hover.pending, hover.committed);
        }
    }

    pub fn pointer_leave(&self) {
        let leave = self.widget.borrow_mut().handle_leave();
        if let (Some(leave), Some(hook)) = (leave, self.hooks.on_leave.as_ref()) {
            hook(leave.pending, leave.committed);
        }
    }

    /// Click or touch end: hand the pending rating to the rate hook.
    pub fn commit(&self) {
        let Some(hook) = self.hooks.on_rate.as_ref() else {
            return;
        };
        let handle = self.widget.borrow_mut().begin_submit();
        if let Some(handle) = handle {
            hook(handle.candidate(), handle);
        }
    }

    /// Open a submission without going through the rate hook.
    #[must_use]
    pub fn begin_submit(&self) -> Option<SubmissionHandle<S>> {
        self.widget.borrow_mut().begin_submit()
    }

    /// # Errors
    ///
    /// See [`RatingWidget::set_rating`].
    pub fn set_rating(&self, value: impl Into<RatingInput>) -> Result<(), RatingError> {
        self.widget.borrow_mut().set_rating(value)
    }

    #[must_use]
    pub fn rating(&self) -> Option<f64> {
        self.widget.borrow().rating()
    }

    pub fn clear(&self) {
        self.widget.borrow_mut().clear();
    }

    pub fn disable(&self) {
        self.widget.borrow_mut().disable();
    }

    pub fn enable(&self) {
        self.widget.borrow_mut().enable();
    }

    pub fn dispose(&self) {
        self.widget.borrow_mut().dispose();
    }

    /// See [`RatingWidget::release`].
    pub fn release(&self) {
        self.widget.borrow_mut().release();
    }

    /// The bound surface.
    #[must_use]
    pub fn element(&self) -> S {
        self.widget.borrow().surface().clone()
    }

    #[must_use]
    pub fn overlay(&self) -> S {
        self.widget.borrow().overlay().clone()
    }

    #[must_use]
    pub fn pending(&self) -> Option<f64> {
        self.widget.borrow().pending()
    }

    #[must_use]
    pub fn fill(&self) -> f64 {
        self.widget.borrow().fill()
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.widget.borrow().is_submitting()
    }

    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.widget.borrow().is_read_only()
    }

    #[must_use]
    pub fn phase(&self) -> RaterPhase {
        self.widget.borrow().phase()
    }
}

impl<S: Surface> fmt::Debug for Rater<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widget = self.widget.borrow();
        f.debug_struct("Rater")
            .field("rating", &widget.rating())
            .field("phase", &widget.phase())
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::HeadlessSurface;
    use std::cell::Cell;

    #[test]
    fn hooks_may_reenter_the_handle() {
        let seen = Rc::new(Cell::new(None));
        let slot: Rc<RefCell<Option<Rater<HeadlessSurface>>>> = Rc::new(RefCell::new(None));
        let hooks = {
            let seen = Rc::clone(&seen);
            let slot = Rc::clone(&slot);
            RaterHooks::new().on_hover(move |pending, _| {
                if let Some(rater) = slot.borrow().as_ref() {
                    rater.set_rating(pending).unwrap();
                    seen.set(rater.rating());
                }
            })
        };
        let rater =
            Rater::bind(HeadlessSurface::new(100.0), &RaterOptions::default(), hooks).unwrap();
        *slot.borrow_mut() = Some(rater.clone());
        rater.pointer_move(50.0);
        assert_eq!(seen.get(), Some(3.0));
        slot.borrow_mut().take();
    }

    #[test]
    fn rate_hook_can_complete_synchronously() {
        let hooks = RaterHooks::new().on_rate(|_, handle: SubmissionHandle<HeadlessSurface>| {
            handle.complete();
        });
        let rater =
            Rater::bind(HeadlessSurface::new(100.0), &RaterOptions::default(), hooks).unwrap();
        rater.pointer_move(90.0);
        rater.commit();
        assert!(!rater.is_submitting());
        assert_eq!(rater.phase(), RaterPhase::Hovering);
    }

    #[test]
    fn commit_without_rate_hook_is_ignored() {
        let rater = Rater::bind(
            HeadlessSurface::new(100.0),
            &RaterOptions::default(),
            RaterHooks::new(),
        )
        .unwrap();
        rater.pointer_move(90.0);
        rater.commit();
        assert!(rater.begin_submit().is_none());
        assert!(!rater.is_submitting());
    }
}
