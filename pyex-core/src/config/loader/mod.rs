use crate::config::constants::defaults;
use crate::config::core::{DatasetConfig, FeedbackConfig, GenerationConfig, ModelConfig};
use crate::error::PyexError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure for PyEx
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PyexConfig {
    /// Model backend settings
    #[serde(default)]
    pub model: ModelConfig,

    /// Generation and repair settings
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Sample dataset location
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Feedback backend settings
    #[serde(default)]
    pub feedback: FeedbackConfig,
}

impl PyexConfig {
    /// Create sample configuration file
    pub fn create_sample_config<P: AsRef<Path>>(output: P) -> Result<()> {
        let output = output.as_ref();
        let config_content = toml::to_string_pretty(&PyexConfig::default())
            .context("Failed to serialize default configuration")?;

        fs::write(output, config_content)
            .with_context(|| format!("Failed to write config file: {}", output.display()))?;

        Ok(())
    }
}

/// Configuration manager for loading configurations
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: PyexConfig,
    config_path: Option<PathBuf>,
    workspace: PathBuf,
}

impl ConfigManager {
    /// Load configuration from the default locations
    pub fn load() -> Result<Self> {
        Self::load_from_workspace(std::env::current_dir()?)
    }

    fn get_home_dir() -> Option<PathBuf> {
        dirs::home_dir()
    }

    /// Load configuration for `workspace`.
    ///
    /// Looks for `pyex.toml` in the workspace, then `~/.pyex/pyex.toml`, and
    /// falls back to defaults.
    pub fn load_from_workspace(workspace: impl AsRef<Path>) -> Result<Self> {
        let home_dir = Self::get_home_dir();
        Self::load_from_workspace_with_home(workspace.as_ref(), home_dir.as_deref())
    }

    fn load_from_workspace_with_home(workspace: &Path, home_dir: Option<&Path>) -> Result<Self> {
        let config_path = workspace.join(defaults::CONFIG_FILE);
        if config_path.exists() {
            return Self::load_with_workspace(&config_path, workspace);
        }

        if let Some(home_dir) = home_dir {
            let home_config_path = home_dir
                .join(defaults::HOME_CONFIG_DIR)
                .join(defaults::CONFIG_FILE);
            if home_config_path.exists() {
                return Self::load_with_workspace(&home_config_path, workspace);
            }
        }

        Ok(Self {
            config: PyexConfig::default(),
            config_path: None,
            workspace: workspace.to_path_buf(),
        })
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let workspace = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::load_with_workspace(path, &workspace)
    }

    fn load_with_workspace(path: &Path, workspace: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: PyexConfig = toml::from_str(&content).map_err(|err| {
            PyexError::Config(format!(
                "Failed to parse config file {}: {err}",
                path.display()
            ))
        })?;

        Ok(Self {
            config,
            config_path: Some(path.to_path_buf()),
            workspace: workspace.to_path_buf(),
        })
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &PyexConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut PyexConfig {
        &mut self.config
    }

    /// Get the configuration file path (if loaded from file)
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Dataset root resolved against the workspace
    pub fn dataset_root(&self) -> PathBuf {
        self.config.dataset.resolve_root(Some(&self.workspace))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_when_no_file_present() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::load_from_workspace_with_home(dir.path(), None).unwrap();
        assert!(manager.config_path().is_none());
        assert_eq!(manager.config().generation.max_repair_attempts, 3);
        assert_eq!(manager.dataset_root(), dir.path().join("dataset"));
    }

    #[test]
    fn home_config_is_used_when_workspace_has_none() {
        let workspace = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        let home_config = home.path().join(defaults::HOME_CONFIG_DIR);
        fs::create_dir_all(&home_config).unwrap();
        fs::write(
            home_config.join(defaults::CONFIG_FILE),
            "[generation]\nmax_repair_attempts = 5\n",
        )
        .unwrap();

        let manager =
            ConfigManager::load_from_workspace_with_home(workspace.path(), Some(home.path()))
                .unwrap();
        assert_eq!(manager.config().generation.max_repair_attempts, 5);
        assert_eq!(manager.dataset_root(), workspace.path().join("dataset"));
    }

    #[test]
    fn partial_file_keeps_section_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("pyex.toml"),
            r#"
[model]
provider = "local"
model = "llama-2-7b"

[generation]
max_repair_attempts = 2
"#,
        )
        .unwrap();

        let manager = ConfigManager::load_from_workspace(dir.path()).unwrap();
        let config = manager.config();
        assert_eq!(config.model.provider, "local");
        assert_eq!(config.model.tag, "test-run");
        assert_eq!(config.generation.max_repair_attempts, 2);
        assert_eq!(config.generation.cache_capacity, 16);
        assert_eq!(config.feedback.key, "left_comment");
        assert_eq!(manager.config_path(), Some(dir.path().join("pyex.toml").as_path()));
    }

    #[test]
    fn invalid_file_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pyex.toml");
        fs::write(&path, "[model\nprovider = ").unwrap();
        let err = ConfigManager::load_from_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config file"));
        assert!(matches!(
            err.downcast_ref::<PyexError>(),
            Some(PyexError::Config(_))
        ));
    }

    #[test]
    fn sample_config_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pyex.toml");
        PyexConfig::create_sample_config(&path).unwrap();
        let manager = ConfigManager::load_from_file(&path).unwrap();
        assert_eq!(manager.config().model.model, "gpt-3.5-turbo");
    }
}
