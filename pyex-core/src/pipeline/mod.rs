//! Generation pipeline.
//!
//! [`GenerationContext`] carries every dependency a run needs, so nothing in
//! here reaches for process globals. [`Session`] layers the result cache and
//! feedback routing on top for interactive use.

pub mod cache;
pub mod context;
pub mod session;

pub use cache::{CacheStats, ResultCache};
pub use context::{
    Explanation, GeneratedExercise, GenerationContext, GenerationRequest, generate_exercise,
    generate_explanation,
};
pub use session::{FeedbackTarget, GenerationBundle, Session};
