//! Interactive `session` menu
//!
//! One user, one action at a time. Errors from a single action are shown
//! and the menu comes back.

use super::feedback::collect_feedback;
use super::generate::run_generation;
use super::ui::{explanation_markdown, print_markdown, print_run_ids, problem_statement_markdown};
use anyhow::{Context, Result, bail};
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use pyex_core::config::ConfigManager;
use pyex_core::config::constants::reference_exercises;
use pyex_core::dataset::Difficulty;
use pyex_core::pipeline::{FeedbackTarget, GenerationRequest, Session};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    Generate,
    ShowProblem,
    ShowExplanation,
    ExerciseFeedback,
    ExplanationFeedback,
    Quit,
}

impl MenuAction {
    const ALL: [MenuAction; 6] = [
        MenuAction::Generate,
        MenuAction::ShowProblem,
        MenuAction::ShowExplanation,
        MenuAction::ExerciseFeedback,
        MenuAction::ExplanationFeedback,
        MenuAction::Quit,
    ];

    fn label(&self) -> &'static str {
        match self {
            MenuAction::Generate => "Generate exercise",
            MenuAction::ShowProblem => "Show problem statement",
            MenuAction::ShowExplanation => "Show code hint explanation",
            MenuAction::ExerciseFeedback => "Give feedback on the exercise",
            MenuAction::ExplanationFeedback => "Give feedback on the explanation",
            MenuAction::Quit => "Quit",
        }
    }
}

/// Last inputs, offered as defaults on the next "Generate"
struct Selection {
    language: String,
    difficulty: usize,
    topic: usize,
    context: String,
    count: usize,
}

pub async fn handle_session_command(manager: &ConfigManager, dataset_root: PathBuf) -> Result<()> {
    let config = manager.config();
    let mut session = Session::from_config(config, dataset_root)
        .context("Failed to initialize generation session")?;
    let topics = session.topics(&config.generation.language)?;
    if topics.is_empty() {
        bail!(
            "no topics found for {} in the dataset",
            config.generation.language
        );
    }

    println!(
        "{} {} {}",
        style("PyEx").cyan().bold(),
        style(session.context().client().provider_name()).yellow(),
        style(session.context().client().model()).dim()
    );
    if !session.has_feedback() {
        println!(
            "{}",
            style("Feedback backend not configured; feedback actions are disabled.").dim()
        );
    }

    let theme = ColorfulTheme::default();
    let labels: Vec<&str> = MenuAction::ALL.iter().map(MenuAction::label).collect();
    let mut selection = Selection {
        language: config.generation.language.clone(),
        difficulty: 0,
        topic: 0,
        context: String::new(),
        count: config.generation.default_reference_count,
    };

    loop {
        let choice = Select::with_theme(&theme)
            .with_prompt("What next?")
            .items(&labels)
            .default(0)
            .interact()?;

        match MenuAction::ALL[choice] {
            MenuAction::Generate => {
                let request = match prompt_request(&theme, &topics, &mut selection) {
                    Ok(request) => request,
                    Err(err) => {
                        super::report_error(&err);
                        continue;
                    }
                };
                match run_generation(&mut session, &request).await {
                    Ok(bundle) => {
                        print_markdown(&problem_statement_markdown(&bundle));
                        print_run_ids(&bundle);
                    }
                    Err(err) => {
                        eprintln!("{} {}", style("error:").red().bold(), err.user_message());
                    }
                }
            }
            MenuAction::ShowProblem => match session.current() {
                Some(bundle) => print_markdown(&problem_statement_markdown(bundle)),
                None => println!("{}", style("Generate an exercise first.").dim()),
            },
            MenuAction::ShowExplanation => match session.current() {
                Some(bundle) => {
                    print_markdown(&explanation_markdown(bundle, &selection.language))
                }
                None => println!("{}", style("Generate an exercise first.").dim()),
            },
            MenuAction::ExerciseFeedback => {
                if let Err(err) = collect_feedback(&session, FeedbackTarget::Exercise).await {
                    super::report_error(&err);
                }
            }
            MenuAction::ExplanationFeedback => {
                if let Err(err) = collect_feedback(&session, FeedbackTarget::Explanation).await {
                    super::report_error(&err);
                }
            }
            MenuAction::Quit => return Ok(()),
        }
    }
}

fn prompt_request(
    theme: &ColorfulTheme,
    topics: &[String],
    selection: &mut Selection,
) -> Result<GenerationRequest> {
    let difficulties: Vec<&str> = Difficulty::ALL.iter().map(Difficulty::as_str).collect();
    selection.difficulty = Select::with_theme(theme)
        .with_prompt("Difficulty")
        .items(&difficulties)
        .default(selection.difficulty)
        .interact()?;

    selection.topic = Select::with_theme(theme)
        .with_prompt("Topic")
        .items(topics)
        .default(selection.topic.min(topics.len().saturating_sub(1)))
        .interact()?;

    selection.context = Input::with_theme(theme)
        .with_prompt("Context (e.g. cars, trains)")
        .with_initial_text(selection.context.clone())
        .allow_empty(true)
        .interact_text()?;

    let counts: Vec<String> = (reference_exercises::MIN..=reference_exercises::MAX)
        .map(|n| n.to_string())
        .collect();
    let count_index = Select::with_theme(theme)
        .with_prompt("Reference exercises")
        .items(&counts)
        .default(
            selection
                .count
                .saturating_sub(reference_exercises::MIN)
                .min(counts.len() - 1),
        )
        .interact()?;
    selection.count = count_index + reference_exercises::MIN;

    let topic = topics
        .get(selection.topic)
        .cloned()
        .unwrap_or_default();
    Ok(GenerationRequest::new(
        selection.language.clone(),
        difficulties[selection.difficulty],
        topic,
        selection.context.clone(),
        selection.count,
    )?)
}
