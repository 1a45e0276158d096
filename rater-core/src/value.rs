//! Loosely typed rating values as they arrive from callers.
use serde_json::Value;

use crate::error::RatingError;

/// A value handed to `set_rating` before it has been checked.
#[derive(Debug, Clone, PartialEq)]
pub enum RatingInput {
    Missing,
    Null,
    Number(f64),
    Other(String),
}

impl RatingInput {
    /// Check the value against the scale `[0, max_stars]`.
    ///
    /// # Errors
    ///
    /// Returns the [`RatingError`] matching the first rule the value breaks.
    pub fn validate(&self, max_stars: u32) -> Result<f64, RatingError> {
        match self {
            Self::Missing => Err(RatingError::MissingValue),
            Self::Null => Err(RatingError::NullValue),
            Self::Other(_) => Err(RatingError::NotANumber),
            Self::Number(value) if value.is_nan() => Err(RatingError::NotANumber),
            Self::Number(value) => {
                if *value < 0.0 || *value > f64::from(max_stars) {
                    Err(RatingError::OutOfRange {
                        value: *value,
                        max: max_stars,
                    })
                } else {
                    Ok(*value)
                }
            }
        }
    }
}

impl From<f64> for RatingInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for RatingInput {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<Option<f64>> for RatingInput {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Null, Self::Number)
    }
}

impl From<&Value> for RatingInput {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Number(n) => n.as_f64().map_or(Self::Other(n.to_string()), Self::Number),
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<Option<&Value>> for RatingInput {
    fn from(value: Option<&Value>) -> Self {
        value.map_or(Self::Missing, Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn each_rule_maps_to_its_error() {
        assert_eq!(
            RatingInput::Missing.validate(5),
            Err(RatingError::MissingValue)
        );
        assert_eq!(RatingInput::Null.validate(5), Err(RatingError::NullValue));
        assert_eq!(
            RatingInput::from(&json!("4")).validate(5),
            Err(RatingError::NotANumber)
        );
        assert_eq!(
            RatingInput::from(f64::NAN).validate(5),
            Err(RatingError::NotANumber)
        );
        assert_eq!(
            RatingInput::from(5.5).validate(5),
            Err(RatingError::OutOfRange { value: 5.5, max: 5 })
        );
        assert!(matches!(
            RatingInput::from(-0.1).validate(5),
            Err(RatingError::OutOfRange { .. })
        ));
    }

    #[test]
    fn bounds_are_inclusive() {
        assert_eq!(RatingInput::from(0.0).validate(5), Ok(0.0));
        assert_eq!(RatingInput::from(5u32).validate(5), Ok(5.0));
    }

    #[test]
    fn json_shapes_convert() {
        let doc = json!({ "rating": 3.5, "empty": null });
        assert_eq!(
            RatingInput::from(doc.get("rating")),
            RatingInput::Number(3.5)
        );
        assert_eq!(RatingInput::from(doc.get("empty")), RatingInput::Null);
        assert_eq!(RatingInput::from(doc.get("absent")), RatingInput::Missing);
        assert_eq!(RatingInput::from(None::<f64>), RatingInput::Null);
    }
}
