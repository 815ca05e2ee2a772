//! `generate` subcommand

use super::args::GenerateArgs;
use super::feedback::collect_feedback;
use super::ui::{Spinner, explanation_markdown, print_markdown, print_run_ids, problem_statement_markdown};
use anyhow::{Context, Result};
use pyex_core::PyexError;
use pyex_core::config::ConfigManager;
use pyex_core::llm::error_display::format_llm_warning;
use pyex_core::pipeline::{FeedbackTarget, GenerationBundle, GenerationRequest, Session};
use std::path::PathBuf;

pub async fn handle_generate_command(
    manager: &ConfigManager,
    dataset_root: PathBuf,
    args: GenerateArgs,
) -> Result<()> {
    let config = manager.config();
    if args.feedback {
        // fail before spending a model call
        config.feedback.credentials()?;
    }

    let language = args
        .language
        .clone()
        .unwrap_or_else(|| config.generation.language.clone());
    let count = args
        .count
        .unwrap_or(config.generation.default_reference_count);
    let request = GenerationRequest::new(
        language.clone(),
        &args.difficulty,
        args.topic.clone(),
        args.context.clone(),
        count,
    )?;

    let mut session = Session::from_config(config, dataset_root)
        .context("Failed to initialize generation session")?;
    let bundle = run_generation(&mut session, &request).await?;

    print_markdown(&problem_statement_markdown(&bundle));
    print_markdown(&explanation_markdown(&bundle, &language));
    print_run_ids(&bundle);

    if args.feedback {
        collect_feedback(&session, FeedbackTarget::Exercise).await?;
        collect_feedback(&session, FeedbackTarget::Explanation).await?;
    }
    Ok(())
}

/// Generate with a spinner, always bypassing the cache.
///
/// Every Generate the user asks for must reach the model, so the CLI never
/// reads from the session cache; cached reuse is for library callers that
/// pass `fresh = false`.
pub async fn run_generation(
    session: &mut Session,
    request: &GenerationRequest,
) -> Result<GenerationBundle, PyexError> {
    let provider = session.context().client().provider_name().to_string();
    let spinner = Spinner::new(&format!(
        "Generating {} {} exercise...",
        request.difficulty, request.topic
    ));

    match session.generate(request, true).await {
        Ok(bundle) => {
            spinner.finish_and_clear();
            if bundle.exercise.repair_attempts > 0 {
                eprintln!(
                    "{}",
                    format_llm_warning(
                        &provider,
                        &format!(
                            "response needed {} repair attempt(s)",
                            bundle.exercise.repair_attempts
                        )
                    )
                );
            }
            Ok(bundle)
        }
        Err(err) => {
            spinner.finish_with_error("generation failed");
            Err(err)
        }
    }
}
