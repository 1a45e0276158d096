//! Pointer geometry to rating conversion.
use crate::config::Step;

/// Samples at or past this percentage are treated as overshoot and ignored.
pub const OVERSHOOT_PERCENT: f64 = 101.0;

const QUANTIZE_EPSILON: f64 = 1e-9;
const QUANTIZE_SCALE: f64 = 1e9;

/// Horizontal position of the pointer as a percentage of the surface width.
///
/// `x` is measured from the surface's left edge. Reversed widgets measure from
/// the right edge instead. Returns `None` for a collapsed surface.
#[must_use]
pub fn pointer_percent(x: f64, width: f64, reverse: bool) -> Option<f64> {
    if !(width > 0.0) || !x.is_finite() {
        return None;
    }
    let percent = if reverse {
        (width - x) * 100.0 / width
    } else {
        x * 100.0 / width
    };
    percent.is_finite().then_some(percent)
}

/// Rating implied by a pointer percentage, or `None` for an overshoot sample.
///
/// Whole steps round up to the star the pointer is inside; fractional steps
/// pick the smallest multiple of the step at or above the raw value. The
/// result is clamped to `[0, max_stars]`.
#[must_use]
pub fn pending_rating(percent: f64, max_stars: u32, step: Step) -> Option<f64> {
    if !(percent < OVERSHOOT_PERCENT) {
        return None;
    }
    let max = f64::from(max_stars);
    let raw = percent * max / 100.0;
    let value = match step {
        Step::Whole => raw.ceil(),
        Step::Fraction(step) => {
            let units = (raw / step - QUANTIZE_EPSILON).ceil();
            (units * step * QUANTIZE_SCALE).round() / QUANTIZE_SCALE
        }
    };
    Some(clamp_rating(value, max))
}

fn clamp_rating(value: f64, max: f64) -> f64 {
    if value <= 0.0 {
        0.0
    } else if value > max {
        max
    } else {
        value
    }
}

/// Width of the fill overlay, in percent, for a rating.
#[must_use]
pub fn fill_percent(value: f64, max_stars: u32) -> f64 {
    value * 100.0 / f64::from(max_stars)
}

/// CSS width string for the fill overlay.
#[must_use]
pub fn fill_width(value: f64, max_stars: u32) -> String {
    format!("{}%", fill_percent(value, max_stars))
}
