//! Configuration loading and store factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use paperly_core::model::{CreatorId, Identity, Role, DEFAULT_MARKS_PER_QUESTION};
use paperly_core::traits::PaperStore;

use crate::json::JsonStore;
use crate::memory::MemoryStore;

/// Which backend holds the papers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoreConfig {
    /// Papers vanish when the process exits.
    Memory,
    Json {
        #[serde(default = "default_store_dir")]
        dir: PathBuf,
    },
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::Json {
            dir: default_store_dir(),
        }
    }
}

fn default_store_dir() -> PathBuf {
    PathBuf::from("./paperly-papers")
}

/// The acting user, as the identity provider would report it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityConfig {
    #[serde(default = "default_creator")]
    pub creator: String,
    #[serde(default)]
    pub role: Role,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            creator: default_creator(),
            role: Role::default(),
        }
    }
}

impl IdentityConfig {
    pub fn identity(&self) -> Identity {
        Identity {
            creator: CreatorId::new(self.creator.clone()),
            role: self.role,
        }
    }
}

fn default_creator() -> String {
    "local".to_string()
}

/// Top-level paperly configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperlyConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
    /// Marks per question when none is given on the command line.
    #[serde(default = "default_marks")]
    pub default_marks_per_question: u32,
    /// Question count when none is given on the command line.
    #[serde(default = "default_question_count")]
    pub default_question_count: u32,
}

fn default_marks() -> u32 {
    DEFAULT_MARKS_PER_QUESTION
}
fn default_question_count() -> u32 {
    10
}

impl Default for PaperlyConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            identity: IdentityConfig::default(),
            default_marks_per_question: default_marks(),
            default_question_count: default_question_count(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `paperly.toml` in the current directory
/// 2. `~/.config/paperly/config.toml`
///
/// `PAPERLY_CREATOR` overrides the configured creator identity.
pub fn load_config() -> Result<PaperlyConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<PaperlyConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("paperly.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<PaperlyConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => PaperlyConfig::default(),
    };

    if let Ok(creator) = std::env::var("PAPERLY_CREATOR") {
        config.identity.creator = creator;
    }

    config.identity.creator = resolve_env_vars(&config.identity.creator);
    if let StoreConfig::Json { dir } = &mut config.store {
        *dir = PathBuf::from(resolve_env_vars(&dir.to_string_lossy()));
    }

    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("paperly"))
}

/// Create the configured store backend.
pub fn open_store(config: &StoreConfig) -> Box<dyn PaperStore> {
    match config {
        StoreConfig::Memory => Box::new(MemoryStore::new()),
        StoreConfig::Json { dir } => Box::new(JsonStore::new(dir.clone())),
    }
}
