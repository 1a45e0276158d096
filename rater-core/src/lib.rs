//! Rater Core
//!
//! Platform-agnostic star-rating widget: turns pointer positions into stepped
//! ratings, renders the fill state onto an abstract surface, and runs the
//! two-phase submit protocol. Browser bindings live in `rater-web`.

pub mod config;
pub mod error;
pub mod geometry;
pub mod rater;
pub mod submission;
pub mod surface;
pub mod template;
pub mod value;
pub mod widget;

// Re-export commonly used types
pub use config::{RaterOptions, RaterSettings, Step};
pub use error::{ConfigError, RatingError};
pub use geometry::{fill_percent, pending_rating, pointer_percent};
pub use rater::{Rater, RaterHooks};
pub use submission::SubmissionHandle;
pub use surface::{HeadlessDocument, HeadlessSurface, Surface, SurfaceLookup, Target};
pub use value::RatingInput;
pub use widget::{Hover, Leave, RaterPhase, RatingWidget};
