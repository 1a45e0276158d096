pub mod star_rating;

pub use star_rating::{PropsUpdate, RateRequest, StarRating, StarRatingProps, sync_rater};
