//! Two-phase submit protocol: a commit opens a submission, the caller
//! resolves it with [`SubmissionHandle::complete`].
use std::cell::Cell;
use std::rc::Rc;

use crate::surface::{BUSY_CLASS, Surface, TITLE_ATTR};

/// Flags shared between a widget and its outstanding submission.
#[derive(Debug, Default)]
pub(crate) struct SubmitGate {
    submitting: Cell<bool>,
    read_only: Cell<bool>,
    generation: Cell<u64>,
}

impl SubmitGate {
    pub(crate) fn is_submitting(&self) -> bool {
        self.submitting.get()
    }

    pub(crate) fn is_read_only(&self) -> bool {
        self.read_only.get()
    }

    pub(crate) fn set_read_only(&self, read_only: bool) {
        self.read_only.set(read_only);
    }

    pub(crate) fn open(&self) -> u64 {
        self.submitting.set(true);
        self.generation.get()
    }

    /// Invalidate every handle issued so far.
    pub(crate) fn retire(&self) {
        self.generation.set(self.generation.get().wrapping_add(1));
    }
}

/// An in-flight submission.
///
/// The widget stays busy until this handle is completed. Dropping it without
/// completing leaves the widget busy.
#[must_use = "the widget stays busy until the submission is completed"]
#[derive(Debug)]
pub struct SubmissionHandle<S: Surface> {
    candidate: f64,
    generation: u64,
    gate: Rc<SubmitGate>,
    surface: S,
}

impl<S: Surface> SubmissionHandle<S> {
    pub(crate) fn open(candidate: f64, gate: &Rc<SubmitGate>, surface: &S) -> Self {
        let generation = gate.open();
        Self {
            candidate,
            generation,
            gate: Rc::clone(gate),
            surface: surface.clone(),
        }
    }

    /// Rating the user picked when the submission began.
    #[must_use]
    pub const fn candidate(&self) -> f64 {
        self.candidate
    }

    /// Whether this handle still belongs to a live submission.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.gate.is_submitting() && self.gate.generation.get() == self.generation
    }

    /// Leave the busy state. The candidate is not committed; callers that
    /// accepted it follow up with `set_rating`.
    pub fn complete(self) {
        if !self.is_current() {
            log::warn!("ignoring completion of a stale rating submission");
            return;
        }
        if !self.gate.is_read_only() {
            self.surface.remove_attribute(TITLE_ATTR);
        }
        self.gate.submitting.set(false);
        self.surface.remove_class(BUSY_CLASS);
        log::debug!("rating submission of {} completed", self.candidate);
    }
}
