//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "pyex",
    version,
    about = "Generate programming exercises with an LLM and collect feedback on them"
)]
pub struct Cli {
    /// Path to pyex.toml (defaults to ./pyex.toml, then ~/.pyex/pyex.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Dataset root laid out as <language>/<Difficulty>/<Topic>.json
    #[arg(long, global = true, value_name = "DIR")]
    pub dataset: Option<PathBuf>,

    /// Model provider: openai or local
    #[arg(long, global = true)]
    pub provider: Option<String>,

    /// Model identifier sent to the provider
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate one exercise with its explanation
    Generate(GenerateArgs),
    /// Interactive menu (default)
    Session,
    /// Attach feedback to a previously logged run
    Feedback(FeedbackArgs),
    /// List dataset topics
    Topics {
        #[arg(long)]
        language: Option<String>,
    },
    /// Write a sample pyex.toml to the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Programming language (defaults to generation.language)
    #[arg(long)]
    pub language: Option<String>,

    /// Easy, Medium or Hard
    #[arg(long, default_value = "Easy")]
    pub difficulty: String,

    #[arg(long)]
    pub topic: String,

    /// Theme the problem statement should be set in, e.g. "cars"
    #[arg(long, default_value = "")]
    pub context: String,

    /// Number of reference exercises placed in the prompt (1-4)
    #[arg(short = 'n', long = "count")]
    pub count: Option<usize>,

    /// Ask for feedback on the result before exiting
    #[arg(long)]
    pub feedback: bool,
}

#[derive(Args, Debug, Clone)]
pub struct FeedbackArgs {
    #[arg(long)]
    pub run_id: String,

    #[arg(long, default_value = "")]
    pub comment: String,

    /// Score between 0 and 1; values outside the range are clamped
    #[arg(long, default_value_t = 0.5, allow_negative_numbers = true)]
    pub score: f64,

    #[arg(long, default_value = "")]
    pub correction: String,
}
