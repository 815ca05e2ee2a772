pub mod feedback;
pub mod generation;
pub mod model;

pub use feedback::{FeedbackConfig, FeedbackCredentials};
pub use generation::{DatasetConfig, GenerationConfig};
pub use model::ModelConfig;
