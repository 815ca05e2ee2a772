//! PyEx - terminal programming-exercise generator
//!
//! Binary entry point. Argument parsing lives in [`cli::args`]; each
//! subcommand has its own handler module.

use anyhow::Result;
use clap::Parser;
use console::style;
use pyex_core::PyexError;
use pyex_core::config::ConfigManager;
use pyex_core::config::api_keys::load_dotenv;
use pyex_core::config::constants::{models, providers};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    let args = Cli::parse();
    init_tracing(args.verbose);

    if let Err(err) = load_dotenv() {
        eprintln!("{} {err}", style("warning:").yellow().bold());
    }

    if let Err(err) = run(args).await {
        cli::report_error(&err);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "pyex=debug,pyex_core=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

async fn run(args: Cli) -> Result<()> {
    let mut manager = match &args.config {
        Some(path) => ConfigManager::load_from_file(path)?,
        None => ConfigManager::load()?,
    };
    apply_model_overrides(&mut manager, args.provider.as_deref(), args.model.as_deref())?;
    debug!(
        path = ?manager.config_path(),
        provider = %manager.config().model.provider,
        model = %manager.config().model.model,
        "configuration loaded"
    );

    let dataset_root = args
        .dataset
        .clone()
        .unwrap_or_else(|| manager.dataset_root());

    match args.command.unwrap_or(Commands::Session) {
        Commands::Generate(generate) => {
            cli::handle_generate_command(&manager, dataset_root, generate).await
        }
        Commands::Session => cli::handle_session_command(&manager, dataset_root).await,
        Commands::Feedback(feedback) => cli::handle_feedback_command(&manager, feedback).await,
        Commands::Topics { language } => {
            cli::handle_topics_command(&manager, dataset_root, language.as_deref())
        }
        Commands::Init { force } => cli::handle_init_command(force),
    }
}

/// `--provider` / `--model` win over `pyex.toml`. Switching provider without
/// naming a model picks that provider's default.
fn apply_model_overrides(
    manager: &mut ConfigManager,
    provider: Option<&str>,
    model: Option<&str>,
) -> Result<(), PyexError> {
    let config = &mut manager.config_mut().model;
    if let Some(provider) = provider {
        let provider = provider.to_lowercase();
        if !providers::ALL.contains(&provider.as_str()) {
            return Err(PyexError::Config(format!(
                "unknown provider {provider:?}; expected one of {}",
                providers::ALL.join(", ")
            )));
        }
        config.provider = provider;
        if model.is_none() {
            config.model = if config.provider == providers::LOCAL {
                models::local::DEFAULT_MODEL.to_string()
            } else {
                models::openai::DEFAULT_MODEL.to_string()
            };
        }
    }
    if let Some(model) = model {
        config.model = model.to_string();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> ConfigManager {
        ConfigManager::load_from_workspace("/nonexistent/pyex-workspace").unwrap()
    }

    #[test]
    fn provider_override_picks_provider_default_model() {
        let mut manager = manager();
        apply_model_overrides(&mut manager, Some("LOCAL"), None).unwrap();
        assert_eq!(manager.config().model.provider, providers::LOCAL);
        assert_eq!(manager.config().model.model, models::local::DEFAULT_MODEL);

        apply_model_overrides(&mut manager, Some("openai"), Some("gpt-4o-mini")).unwrap();
        assert_eq!(manager.config().model.model, "gpt-4o-mini");
    }

    #[test]
    fn unknown_provider_is_a_config_error() {
        let mut manager = manager();
        let err = apply_model_overrides(&mut manager, Some("palm"), None).unwrap_err();
        assert!(matches!(err, PyexError::Config(msg) if msg.contains("openai, local")));
    }
}
