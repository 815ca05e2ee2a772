//! Feedback collection and the `feedback` subcommand

use super::args::FeedbackArgs;
use anyhow::Result;
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input};
use pyex_core::PyexError;
use pyex_core::config::ConfigManager;
use pyex_core::config::constants::defaults;
use pyex_core::feedback::{FeedbackSink, LangSmithClient, clamp_score, correction_payload};
use pyex_core::pipeline::{FeedbackTarget, Session};
use std::sync::Arc;

pub const THANK_YOU: &str = "Thank you for your input!";

/// Parse a typed score; anything unreadable falls back to the default and
/// the result is clamped into `[0, 1]`.
pub fn parse_score(input: &str) -> f64 {
    let score = input
        .trim()
        .parse::<f64>()
        .unwrap_or(defaults::FEEDBACK_SCORE);
    clamp_score(score)
}

/// `pyex feedback --run-id ..`
pub async fn handle_feedback_command(manager: &ConfigManager, args: FeedbackArgs) -> Result<()> {
    let feedback = &manager.config().feedback;
    let credentials = feedback.credentials()?;
    let sink = FeedbackSink::new(
        Arc::new(LangSmithClient::new(credentials)),
        feedback.key.clone(),
    );

    let score = clamp_score(args.score);
    if score != args.score {
        println!(
            "{} score {} clamped to {score}",
            style("note:").yellow(),
            args.score
        );
    }

    let ack = sink
        .submit_feedback(
            &args.run_id,
            &args.comment,
            score,
            correction_payload(&args.correction),
        )
        .await?;
    println!("{}", style(THANK_YOU).green().bold());
    println!("{} {}", style("feedback id:").dim(), ack.feedback_id);
    Ok(())
}

/// Why feedback on `target` cannot be collected right now, if it can't
pub fn feedback_unavailable(session: &Session, target: FeedbackTarget) -> Option<&'static str> {
    if !session.has_feedback() {
        Some(FEEDBACK_NOT_CONFIGURED)
    } else if session.run_id_for(target).is_none() {
        Some(NOTHING_GENERATED)
    } else {
        None
    }
}

const FEEDBACK_NOT_CONFIGURED: &str =
    "Feedback is not configured (set LANGCHAIN_ENDPOINT and LANGCHAIN_API_KEY).";
const NOTHING_GENERATED: &str = "Generate an exercise first.";

/// Prompt for comment, score and correction, then submit against `target`.
///
/// Nothing is prompted when feedback cannot be recorded. A rejected
/// submission is shown and can be retried.
pub async fn collect_feedback(session: &Session, target: FeedbackTarget) -> Result<()> {
    if let Some(reason) = feedback_unavailable(session, target) {
        println!("{}", style(reason).dim());
        return Ok(());
    }

    let theme = ColorfulTheme::default();
    println!(
        "{} {}",
        style("Feedback on the").bold(),
        style(target.label()).cyan().bold()
    );

    let comment: String = Input::with_theme(&theme)
        .with_prompt("Comment")
        .allow_empty(true)
        .interact_text()?;
    let score: String = Input::with_theme(&theme)
        .with_prompt("Score (0-1)")
        .default(defaults::FEEDBACK_SCORE.to_string())
        .interact_text()?;
    let correction: String = Input::with_theme(&theme)
        .with_prompt("Correction")
        .allow_empty(true)
        .interact_text()?;
    let score = parse_score(&score);

    loop {
        match session
            .submit_feedback(target, &comment, score, correction_payload(&correction))
            .await
        {
            Ok(_) => {
                println!("{}", style(THANK_YOU).green().bold());
                return Ok(());
            }
            Err(err) if err.is_recoverable() => {
                eprintln!("{} {}", style("error:").red().bold(), err.user_message());
                if matches!(err, PyexError::InvalidRunId(_)) {
                    return Ok(());
                }
                let retry = Confirm::with_theme(&theme)
                    .with_prompt("Submit again?")
                    .default(true)
                    .interact()?;
                if !retry {
                    return Ok(());
                }
            }
            Err(err) => return Err(err.into()),
        }
    }
}
