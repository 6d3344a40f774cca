//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use fistest_report::DocumentStyle;

/// Top-level fistest configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FistestConfig {
    /// Directory result documents are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Document formats written after each attempt (html, json, text).
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,
    /// Presentation settings for written documents.
    #[serde(default)]
    pub document: DocumentStyle,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./fistest-results")
}

fn default_formats() -> Vec<String> {
    vec!["html".to_string()]
}

impl Default for FistestConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            formats: default_formats(),
            document: DocumentStyle::default(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `fistest.toml` in the current directory
/// 2. `~/.config/fistest/config.toml`
///
/// `FISTEST_OUTPUT_DIR` overrides the output directory.
pub fn load_config_from(path: Option<&Path>) -> Result<FistestConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("fistest.toml");
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
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<FistestConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => FistestConfig::default(),
    };

    if let Ok(dir) = std::env::var("FISTEST_OUTPUT_DIR") {
        config.output_dir = PathBuf::from(dir);
    }

    config.output_dir = PathBuf::from(resolve_env_vars(&config.output_dir.to_string_lossy()));
    config.document.title = resolve_env_vars(&config.document.title);
    config.document.footer = resolve_env_vars(&config.document.footer);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("fistest"))
}
