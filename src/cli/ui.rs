//! Terminal rendering helpers

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use pyex_core::pipeline::GenerationBundle;
use std::time::Duration;
use termimad::MadSkin;

/// Spinner shown while waiting on the model
pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        let spinner_style = ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
        pb.set_style(spinner_style);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        Self { pb }
    }

    pub fn finish_and_clear(&self) {
        self.pb.finish_and_clear();
    }

    pub fn finish_with_error(&self, message: &str) {
        self.pb.abandon_with_message(message.to_string());
    }
}

/// Markdown for the "Problem Statement" tab
pub fn problem_statement_markdown(bundle: &GenerationBundle) -> String {
    let exercise = &bundle.exercise.exercise;
    format!(
        "# Problem Statement\n\n## {}\n\n*Topic: {}*\n\n{}\n",
        exercise.title, exercise.topic, exercise.problem_statement
    )
}

/// Markdown for the "Code Hint Explanation" tab
pub fn explanation_markdown(bundle: &GenerationBundle, language: &str) -> String {
    format!(
        "# Code Hint Explanation\n\n```{language}\n{}\n```\n\n{}\n",
        bundle.exercise.exercise.solution.trim_end(),
        bundle.explanation.text.trim()
    )
}

pub fn print_markdown(markdown: &str) {
    let skin = MadSkin::default();
    skin.print_text(markdown);
}

pub fn print_run_ids(bundle: &GenerationBundle) {
    println!(
        "{} exercise {}  explanation {}",
        style("run ids:").dim(),
        style(&bundle.exercise.run_id).cyan(),
        style(&bundle.explanation.run_id).cyan()
    );
    if !bundle.exercise.repair_run_ids.is_empty() {
        println!(
            "{} {}",
            style("repair runs:").dim(),
            bundle.exercise.repair_run_ids.join(", ")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pyex_core::exercise::Exercise;
    use pyex_core::pipeline::{Explanation, GeneratedExercise};

    fn bundle() -> GenerationBundle {
        GenerationBundle {
            exercise: GeneratedExercise {
                exercise: Exercise {
                    topic: "Array".to_string(),
                    title: "Sum Pairs".to_string(),
                    problem_statement: "Count pairs of cars.".to_string(),
                    solution: "def f():\n    return 0\n".to_string(),
                },
                run_id: "run-1".to_string(),
                prompt: String::new(),
                repair_attempts: 0,
                repair_run_ids: Vec::new(),
            },
            explanation: Explanation {
                text: "Loops once.".to_string(),
                run_id: "run-2".to_string(),
            },
        }
    }

    #[test]
    fn problem_tab_shows_title_and_statement() {
        let markdown = problem_statement_markdown(&bundle());
        assert!(markdown.starts_with("# Problem Statement"));
        assert!(markdown.contains("## Sum Pairs"));
        assert!(markdown.contains("Count pairs of cars."));
    }

    #[test]
    fn explanation_tab_fences_solution() {
        let markdown = explanation_markdown(&bundle(), "python");
        assert!(markdown.contains("```python\ndef f():\n    return 0\n```"));
        assert!(markdown.ends_with("Loops once.\n"));
    }
}
