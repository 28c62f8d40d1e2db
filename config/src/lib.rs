//! Configuration for the MoSIS interview, read from `~/.mosis/config.toml`.
//!
//! Every section and every key is optional; a missing file is not an error.
//! String values may reference environment variables as `${VAR}`.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use toml::de::Error as TomlError;

/// Overrides `store.url` when set.
pub const STORE_URL_ENV: &str = "MOSIS_STORE_URL";

#[derive(Debug, Default, Deserialize)]
pub struct MosisConfig {
    pub store: Option<StoreConfig>,
    pub interview: Option<InterviewConfig>,
    pub export: Option<ExportConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: TomlError,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct StoreConfig {
    pub url: Option<String>,
    pub extension: Option<String>,
    pub namespace: Option<String>,
    pub meta_theory: Option<String>,
    /// Overall request timeout; `0` disables it.
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct InterviewConfig {
    /// Problem name used when the user does not give one at export.
    pub user: Option<String>,
    /// Publish `MPD_*` model theories to the store on export.
    #[serde(default)]
    pub publish_model_theories: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExportConfig {
    pub directory: Option<String>,
}

pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        let var = &after[..end];
        if !var.is_empty() {
            out.push_str(&env::var(var).unwrap_or_default());
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}

fn expanded(value: Option<&String>) -> Option<String> {
    value
        .map(|raw| expand_env_vars(raw))
        .filter(|value| !value.trim().is_empty())
}

impl MosisConfig {
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path).map_err(|source| {
            tracing::warn!("Failed to read config at {:?}: {}", path, source);
            ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }
        })?;

        toml::from_str(&content).map(Some).map_err(|source| {
            tracing::warn!("Failed to parse config at {:?}: {}", path, source);
            ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    /// Store URL: the environment override first, then `store.url`.
    #[must_use]
    pub fn store_url(&self) -> Option<String> {
        env::var(STORE_URL_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .or_else(|| expanded(self.store.as_ref()?.url.as_ref()))
    }

    #[must_use]
    pub fn store_extension(&self) -> Option<String> {
        expanded(self.store.as_ref()?.extension.as_ref())
    }

    #[must_use]
    pub fn store_namespace(&self) -> Option<String> {
        expanded(self.store.as_ref()?.namespace.as_ref())
    }

    #[must_use]
    pub fn store_meta_theory(&self) -> Option<String> {
        expanded(self.store.as_ref()?.meta_theory.as_ref())
    }

    /// `None` when unset; `Some(None)` when explicitly disabled.
    #[must_use]
    pub fn store_timeout(&self) -> Option<Option<Duration>> {
        let secs = self.store.as_ref()?.timeout_secs?;
        Some((secs > 0).then(|| Duration::from_secs(secs)))
    }

    #[must_use]
    pub fn user(&self) -> Option<String> {
        expanded(self.interview.as_ref()?.user.as_ref())
    }

    #[must_use]
    pub fn publish_model_theories(&self) -> bool {
        self.interview
            .as_ref()
            .is_some_and(|interview| interview.publish_model_theories)
    }

    #[must_use]
    pub fn export_directory(&self) -> Option<PathBuf> {
        expanded(self.export.as_ref()?.directory.as_ref()).map(PathBuf::from)
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".mosis").join("config.toml"))
}
