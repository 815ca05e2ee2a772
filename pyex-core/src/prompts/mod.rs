//! Prompt construction.
//!
//! All builders are pure: identical inputs always produce byte-identical text.

pub mod exercise;
pub mod explanation;
pub mod repair;

pub use exercise::{build_exercise_prompt, exercise_request};
pub use explanation::{EXPLANATION_REQUEST, build_explanation_prompt};
pub use repair::build_repair_prompt;

/// Join a prompt template with optional format instructions and the user question.
pub fn render_template(template: &str, format_instructions: Option<&str>, question: &str) -> String {
    match format_instructions {
        Some(instructions) => format!("{template}\n\n{instructions}\n{question}\n"),
        None => format!("{template}{question}\n"),
    }
}
