//! LLM error display utilities using console styling.

use console::style;

pub fn style_llm_error(message: &str) -> String {
    style(message).red().to_string()
}

pub fn style_llm_warning(message: &str) -> String {
    style(message).yellow().to_string()
}

/// Provider names get a stable color so mixed logs stay readable
pub fn style_provider_name(provider: &str) -> String {
    let styled_name = match provider.to_lowercase().as_str() {
        "openai" => style(provider).yellow(),
        "local" => style(provider).green(),
        _ => style(provider).cyan(),
    };
    styled_name.to_string()
}

/// Format an LLM error for display
pub fn format_llm_error(provider: &str, error: &str) -> String {
    format!("{} {}", style_provider_name(provider), style_llm_error(error))
}

pub fn format_llm_warning(provider: &str, warning: &str) -> String {
    format!(
        "{} {}",
        style_provider_name(provider),
        style_llm_warning(warning)
    )
}
