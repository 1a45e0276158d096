//! The star-rating state machine bound to one surface.
use std::rc::Rc;

use crate::config::{RaterOptions, RaterSettings};
use crate::error::{ConfigError, RatingError};
use crate::geometry::{fill_percent, fill_width, pending_rating, pointer_percent};
use crate::submission::{SubmissionHandle, SubmitGate};
use crate::surface::{
    BUSY_CLASS, DISABLED_CLASS, FILL_CLASS, RATING_ATTR, RATING_CLASS, REVERSE_CLASS, Surface,
    TITLE_ATTR,
};
use crate::template::{self, format_rating};
use crate::value::RatingInput;

/// Emitted when a pointer sample updates the pending rating.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hover {
    pub pending: f64,
    pub committed: Option<f64>,
}

/// Emitted whenever the pointer leaves the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leave {
    pub pending: Option<f64>,
    pub committed: Option<f64>,
}

/// Observable state of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaterPhase {
    Idle { rated: bool },
    Hovering,
    Submitting,
    Disabled,
    Disposed,
}

#[derive(Debug)]
pub struct RatingWidget<S: Surface> {
    surface: S,
    overlay: S,
    settings: RaterSettings,
    committed: Option<f64>,
    pending: Option<f64>,
    fill: f64,
    hovering: bool,
    accepts_submissions: bool,
    disposed: bool,
    gate: Rc<SubmitGate>,
}

impl<S: Surface> RatingWidget<S> {
    /// Decorate `surface` and seed the committed rating.
    ///
    /// The options' `rating` wins over a `data-rating` attribute already on the
    /// surface. `accepts_submissions` records whether a rate handler exists;
    /// without one, commits are ignored.
    ///
    /// # Errors
    ///
    /// Fails before touching the surface when the step or the configured
    /// initial rating is invalid.
    pub fn bind(
        surface: S,
        options: &RaterOptions,
        accepts_submissions: bool,
    ) -> Result<Self, ConfigError> {
        let settings = options.validate()?;
        let seed = match options.rating {
            Some(rating) => Some(RatingInput::from(rating).validate(settings.max_stars)?),
            None => persisted_rating(&surface, settings.max_stars),
        };

        let overlay = surface
            .append_child_node()
            .ok_or_else(|| ConfigError::invalid_target("surface cannot hold a fill overlay"))?;
        surface.add_class(RATING_CLASS);
        overlay.add_class(FILL_CLASS);
        if settings.reverse {
            overlay.add_class(REVERSE_CLASS);
        }
        let size = format!("{}px", settings.star_size);
        overlay.set_style("background-size", &size);
        surface.set_style(
            "width",
            &format!("{}px", settings.star_size * f64::from(settings.max_stars)),
        );
        surface.set_style("height", &size);
        surface.set_style("background-size", &size);

        let mut widget = Self {
            surface,
            overlay,
            settings,
            committed: None,
            pending: None,
            fill: 0.0,
            hovering: false,
            accepts_submissions,
            disposed: false,
            gate: Rc::new(SubmitGate::default()),
        };
        match seed {
            Some(value) => widget.commit_value(value),
            None => widget.set_fill(0.0),
        }
        if options.read_only {
            widget.disable();
        }
        log::debug!(
            "rating widget bound: max {} step {} seed {:?}",
            widget.settings.max_stars,
            widget.settings.step.value(),
            widget.committed
        );
        Ok(widget)
    }

    /// Pointer or touch sample at `x` pixels from the left edge of a surface
    /// `width` pixels wide.
    pub fn handle_move(&mut self, x: f64, width: f64) -> Option<Hover> {
        if self.disposed || self.gate.is_read_only() || self.gate.is_submitting() {
            return None;
        }
        let percent = pointer_percent(x, width, self.settings.reverse)?;
        let pending = pending_rating(percent, self.settings.max_stars, self.settings.step)?;
        self.pending = Some(pending);
        self.hovering = true;
        self.set_fill(pending);
        if self.settings.show_tool_tip {
            let text = template::render(
                &self.settings.rating_text,
                pending,
                self.settings.max_stars,
            );
            self.surface.set_attribute(TITLE_ATTR, &text);
        }
        Some(Hover {
            pending,
            committed: self.committed,
        })
    }

    /// Restore the committed state after the pointer leaves. Runs even while
    /// disabled or submitting.
    pub fn handle_leave(&mut self) -> Option<Leave> {
        if self.disposed {
            return None;
        }
        self.hovering = false;
        match self.committed {
            None => {
                self.set_fill(0.0);
                self.surface.remove_attribute(RATING_ATTR);
            }
            Some(value) => {
                self.set_fill(value);
                self.surface.set_attribute(RATING_ATTR, &format_rating(value));
            }
        }
        Some(Leave {
            pending: self.pending,
            committed: self.committed,
        })
    }

    /// Open a submission for the pending rating.
    ///
    /// Returns `None` when disabled, already submitting, without a rate
    /// handler, or before any pointer sample has produced a rating.
    pub fn begin_submit(&mut self) -> Option<SubmissionHandle<S>> {
        if self.disposed
            || self.gate.is_read_only()
            || self.gate.is_submitting()
            || !self.accepts_submissions
        {
            return None;
        }
        let Some(candidate) = self.pending else {
            log::debug!("commit ignored: no rating under the pointer yet");
            return None;
        };
        match &self.settings.busy_text {
            Some(text) => self.surface.set_attribute(TITLE_ATTR, text),
            None => self.surface.remove_attribute(TITLE_ATTR),
        }
        self.surface.add_class(BUSY_CLASS);
        log::debug!("rating submission of {candidate} started");
        Some(SubmissionHandle::open(candidate, &self.gate, &self.surface))
    }

    /// # Errors
    ///
    /// Rejects missing, null, non-numeric and out-of-range values without
    /// changing any state.
    pub fn set_rating(&mut self, value: impl Into<RatingInput>) -> Result<(), RatingError> {
        let value = value.into().validate(self.settings.max_stars)?;
        self.commit_value(value);
        Ok(())
    }

    #[must_use]
    pub const fn rating(&self) -> Option<f64> {
        self.committed
    }

    /// Forget the committed rating. The `data-rating` attribute is left as is
    /// and resynchronised on the next pointer leave.
    pub fn clear(&mut self) {
        self.committed = None;
        self.set_fill(0.0);
        self.surface.remove_attribute(TITLE_ATTR);
    }

    pub fn disable(&mut self) {
        self.gate.set_read_only(true);
        self.surface.add_class(DISABLED_CLASS);
        if self.settings.show_tool_tip && !self.settings.disable_text.is_empty() {
            let text = template::render(
                &self.settings.disable_text,
                self.committed.unwrap_or(0.0),
                self.settings.max_stars,
            );
            self.surface.set_attribute(TITLE_ATTR, &text);
        } else {
            self.surface.remove_attribute(TITLE_ATTR);
        }
    }

    pub fn enable(&mut self) {
        self.gate.set_read_only(false);
        self.surface.remove_attribute(TITLE_ATTR);
        self.surface.remove_class(DISABLED_CLASS);
    }

    /// Stop reacting to input. Outstanding submission handles become stale.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.hovering = false;
        self.gate.retire();
        log::debug!("rating widget disposed");
    }

    /// Dispose and strip the classes and attributes this widget put on its
    /// surface, so the surface can be bound again from a clean slate. The
    /// overlay node stays attached.
    pub fn release(&mut self) {
        self.dispose();
        for class in [RATING_CLASS, DISABLED_CLASS, BUSY_CLASS] {
            self.surface.remove_class(class);
        }
        self.surface.remove_attribute(TITLE_ATTR);
        self.surface.remove_attribute(RATING_ATTR);
    }

    #[must_use]
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub const fn overlay(&self) -> &S {
        &self.overlay
    }

    #[must_use]
    pub const fn settings(&self) -> &RaterSettings {
        &self.settings
    }

    #[must_use]
    pub const fn pending(&self) -> Option<f64> {
        self.pending
    }

    /// Current overlay width in percent.
    #[must_use]
    pub const fn fill(&self) -> f64 {
        self.fill
    }

    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.gate.is_read_only()
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.gate.is_submitting()
    }

    #[must_use]
    pub const fn is_disposed(&self) -> bool {
        self.disposed
    }

    #[must_use]
    pub fn phase(&self) -> RaterPhase {
        if self.disposed {
            RaterPhase::Disposed
        } else if self.gate.is_submitting() {
            RaterPhase::Submitting
        } else if self.gate.is_read_only() {
            RaterPhase::Disabled
        } else if self.hovering {
            RaterPhase::Hovering
        } else {
            RaterPhase::Idle {
                rated: self.committed.is_some(),
            }
        }
    }

    fn commit_value(&mut self, value: f64) {
        self.committed = Some(value);
        self.set_fill(value);
        self.surface.set_attribute(RATING_ATTR, &format_rating(value));
    }

    fn set_fill(&mut self, value: f64) {
        self.fill = fill_percent(value, self.settings.max_stars);
        self.overlay
            .set_style("width", &fill_width(value, self.settings.max_stars));
    }
}

fn persisted_rating<S: Surface>(surface: &S, max_stars: u32) -> Option<f64> {
    let raw = surface.attribute(RATING_ATTR)?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed
        .parse::<f64>()
        .map_err(|_| RatingError::NotANumber)
        .and_then(|value| RatingInput::from(value).validate(max_stars))
    {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("ignoring persisted rating {raw:?}: {err}");
            None
        }
    }
}
