//! Tooltip text templates with `{rating}` and `{maxRating}` placeholders.

pub const RATING_PLACEHOLDER: &str = "{rating}";
pub const MAX_PLACEHOLDER: &str = "{maxRating}";

/// Fill the first occurrence of each placeholder.
#[must_use]
pub fn render(template: &str, rating: f64, max_stars: u32) -> String {
    template
        .replacen(RATING_PLACEHOLDER, &format_rating(rating), 1)
        .replacen(MAX_PLACEHOLDER, &max_stars.to_string(), 1)
}

/// Shortest decimal form: `4` rather than `4.0`.
#[must_use]
pub fn format_rating(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}
