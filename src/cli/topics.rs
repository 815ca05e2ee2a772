//! `topics` subcommand

use anyhow::Result;
use console::style;
use pyex_core::PyexError;
use pyex_core::config::ConfigManager;
use pyex_core::dataset::{Difficulty, JsonDatasetStore, SampleKey, SampleRepository};
use std::path::PathBuf;

pub fn handle_topics_command(
    manager: &ConfigManager,
    dataset_root: PathBuf,
    language: Option<&str>,
) -> Result<()> {
    let language = language.unwrap_or(&manager.config().generation.language);
    let store = JsonDatasetStore::new(dataset_root);
    let topics = store.topics(language).map_err(PyexError::from)?;

    println!(
        "{} {}",
        style("Topics for").bold(),
        style(language).cyan().bold()
    );
    for topic in &topics {
        let counts: Vec<String> = Difficulty::ALL
            .iter()
            .filter_map(|difficulty| {
                let key = SampleKey::new(language, *difficulty, topic.as_str());
                store
                    .get(&key)
                    .ok()
                    .map(|records| format!("{difficulty}: {}", records.len()))
            })
            .collect();
        println!("  {topic}  {}", style(counts.join(", ")).dim());
    }
    Ok(())
}
