// User configuration and task file location

use crate::sort::SortKey;
use eyre::{Context, Result, eyre};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable pointing at an alternative config file
pub const CONFIG_ENV: &str = "TODONE_CONFIG";

/// Task file used when nothing else is configured, relative to home
pub const DEFAULT_FILE_NAME: &str = ".todo.tsv";

const DEFAULT_NUMBER: usize = 5;

/// Settings read from `config.yaml`
///
/// Every field is optional in the file. Example:
///
/// ```yaml
/// file: ~/notes/todo.tsv
/// sort: rank
/// number: 10
/// editor: code -w
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub file: Option<PathBuf>,
    pub sort: SortKey,
    pub number: usize,
    pub editor: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: None,
            sort: SortKey::None,
            number: DEFAULT_NUMBER,
            editor: None,
        }
    }
}

impl Config {
    /// Load from `$TODONE_CONFIG` or the platform config directory
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn config_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("todone").join("config.yaml"))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(file = ?path, "No config file, using defaults");
            return Ok(Self::default());
        }

        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse_yaml(&content).with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(Self::parse_yaml(content)?)
    }

    fn parse_yaml(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Editor to open the task file with: config, then `$VISUAL`, `$EDITOR`, `vi`
    pub fn editor_command(&self) -> String {
        self.editor_command_with(|name| std::env::var(name).ok())
    }

    fn editor_command_with(&self, env: impl Fn(&str) -> Option<String>) -> String {
        let non_blank = |e: &String| !e.trim().is_empty();
        self.editor
            .clone()
            .filter(non_blank)
            .or_else(|| env("VISUAL").filter(non_blank))
            .or_else(|| env("EDITOR").filter(non_blank))
            .unwrap_or_else(|| "vi".to_string())
    }
}

/// Pick the task file: explicit flag (or `TODO_FILE`), then config, then `~/.todo.tsv`
pub fn resolve_store_path(flag: Option<PathBuf>, config: &Config) -> Result<PathBuf> {
    if let Some(path) = flag.or_else(|| config.file.clone()) {
        return expand_home(&path);
    }

    let home = dirs::home_dir().ok_or_else(|| eyre!("Could not determine home directory; pass --file"))?;
    Ok(home.join(DEFAULT_FILE_NAME))
}

fn expand_home(path: &Path) -> Result<PathBuf> {
    match path.strip_prefix("~") {
        Ok(rest) => {
            let home = dirs::home_dir().ok_or_else(|| eyre!("Could not determine home directory for {}", path.display()))?;
            Ok(home.join(rest))
        }
        Err(_) => Ok(path.to_path_buf()),
    }
}
