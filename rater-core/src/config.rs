//! Widget options and their resolved form.
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_MAX_STARS: u32 = 5;
pub const DEFAULT_STAR_SIZE: f64 = 16.0;
pub const DEFAULT_DISABLE_TEXT: &str = "Thank you for your vote!";
pub const DEFAULT_RATING_TEXT: &str = "{rating}/{maxRating}";

/// Options accepted when binding a widget, keyed the way page scripts pass them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaterOptions {
    #[serde(default = "RaterOptions::default_max")]
    pub max: u32,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default = "RaterOptions::default_star_size")]
    pub star_size: f64,
    #[serde(default)]
    pub step: Option<f64>,
    #[serde(default)]
    pub reverse: bool,
    #[serde(default = "RaterOptions::default_show_tool_tip", rename = "showToolTip")]
    pub show_tool_tip: bool,
    #[serde(default = "RaterOptions::default_disable_text")]
    pub disable_text: String,
    #[serde(default = "RaterOptions::default_rating_text")]
    pub rating_text: String,
    #[serde(default)]
    pub is_busy_text: Option<String>,
}

impl RaterOptions {
    const fn default_max() -> u32 {
        DEFAULT_MAX_STARS
    }

    const fn default_star_size() -> f64 {
        DEFAULT_STAR_SIZE
    }

    const fn default_show_tool_tip() -> bool {
        true
    }

    fn default_disable_text() -> String {
        DEFAULT_DISABLE_TEXT.to_string()
    }

    fn default_rating_text() -> String {
        DEFAULT_RATING_TEXT.to_string()
    }

    /// Parse options from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Options`] when the document is not a valid options object.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub const fn with_max(mut self, max: u32) -> Self {
        self.max = max;
        self
    }

    #[must_use]
    pub const fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    #[must_use]
    pub const fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    #[must_use]
    pub const fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    #[must_use]
    pub const fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    #[must_use]
    pub const fn with_star_size(mut self, star_size: f64) -> Self {
        self.star_size = star_size;
        self
    }

    #[must_use]
    pub fn with_busy_text(mut self, text: impl Into<String>) -> Self {
        self.is_busy_text = Some(text.into());
        self
    }

    /// Resolve defaults and check the step range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidStep`] when `step` lies outside `(0, 1]`.
    pub fn validate(&self) -> Result<RaterSettings, ConfigError> {
        let step = match self.step {
            None => Step::Whole,
            Some(step) => Step::new(step)?,
        };
        let max_stars = if self.max == 0 {
            log::debug!("max of 0 falls back to {DEFAULT_MAX_STARS}");
            DEFAULT_MAX_STARS
        } else {
            self.max
        };
        let star_size = if self.star_size > 0.0 && self.star_size.is_finite() {
            self.star_size
        } else {
            DEFAULT_STAR_SIZE
        };
        Ok(RaterSettings {
            max_stars,
            step,
            star_size,
            reverse: self.reverse,
            show_tool_tip: self.show_tool_tip,
            disable_text: self.disable_text.clone(),
            rating_text: self.rating_text.clone(),
            busy_text: self.is_busy_text.clone(),
        })
    }
}

impl Default for RaterOptions {
    fn default() -> Self {
        Self {
            max: Self::default_max(),
            rating: None,
            read_only: false,
            star_size: Self::default_star_size(),
            step: None,
            reverse: false,
            show_tool_tip: Self::default_show_tool_tip(),
            disable_text: Self::default_disable_text(),
            rating_text: Self::default_rating_text(),
            is_busy_text: None,
        }
    }
}

/// Selectable granularity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    Whole,
    Fraction(f64),
}

impl Step {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidStep`] unless `0 < step <= 1`.
    pub fn new(step: f64) -> Result<Self, ConfigError> {
        if !(step > 0.0 && step <= 1.0) {
            return Err(ConfigError::InvalidStep { step });
        }
        if (step - 1.0).abs() < f64::EPSILON {
            Ok(Self::Whole)
        } else {
            Ok(Self::Fraction(step))
        }
    }

    #[must_use]
    pub const fn value(self) -> f64 {
        match self {
            Self::Whole => 1.0,
            Self::Fraction(step) => step,
        }
    }
}

/// Options after defaults and validation.
#[derive(Debug, Clone, PartialEq)]
pub struct RaterSettings {
    pub max_stars: u32,
    pub step: Step,
    pub star_size: f64,
    pub reverse: bool,
    pub show_tool_tip: bool,
    pub disable_text: String,
    pub rating_text: String,
    pub busy_text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page_script() {
        let settings = RaterOptions::default().validate().unwrap();
        assert_eq!(settings.max_stars, 5);
        assert_eq!(settings.step, Step::Whole);
        assert!((settings.star_size - 16.0).abs() < f64::EPSILON);
        assert!(settings.show_tool_tip);
        assert_eq!(settings.disable_text, "Thank you for your vote!");
        assert_eq!(settings.rating_text, "{rating}/{maxRating}");
        assert!(settings.busy_text.is_none());
    }

    #[test]
    fn step_outside_unit_interval_is_rejected() {
        for step in [0.0, -0.5, 1.5, f64::NAN] {
            let err = RaterOptions::default().with_step(step).validate();
            assert!(matches!(err, Err(ConfigError::InvalidStep { .. })));
        }
        assert_eq!(
            RaterOptions::default().with_step(1.0).validate().unwrap().step,
            Step::Whole
        );
        assert_eq!(
            RaterOptions::default().with_step(0.5).validate().unwrap().step,
            Step::Fraction(0.5)
        );
    }

    #[test]
    fn zero_max_and_star_size_fall_back() {
        let settings = RaterOptions::default()
            .with_max(0)
            .with_star_size(0.0)
            .validate()
            .unwrap();
        assert_eq!(settings.max_stars, DEFAULT_MAX_STARS);
        assert!((settings.star_size - DEFAULT_STAR_SIZE).abs() < f64::EPSILON);
    }

    #[test]
    fn json_uses_camel_case_keys() {
        let opts = RaterOptions::from_json(
            r#"{"max":10,"rating":3.3,"readOnly":true,"starSize":12,"showToolTip":false,"isBusyText":"Saving"}"#,
        )
        .unwrap();
        assert_eq!(opts.max, 10);
        assert_eq!(opts.rating, Some(3.3));
        assert!(opts.read_only);
        assert!(!opts.show_tool_tip);
        assert_eq!(opts.is_busy_text.as_deref(), Some("Saving"));
        assert_eq!(opts.disable_text, DEFAULT_DISABLE_TEXT);
    }

    #[test]
    fn malformed_json_reports_options_error() {
        let err = RaterOptions::from_json("{\"max\":\"five\"}").unwrap_err();
        assert!(matches!(err, ConfigError::Options(_)));
    }
}
