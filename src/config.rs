//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/cuecard/cuecard.toml`
//! 3. Local config: `<outline_dir>/.cuecard.toml`
//! 4. Environment variables: `CUECARD_*` prefix

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::{DEFAULT_NEW_ITEM_TITLE, DEFAULT_OUTLINE_NAME};

pub const LOCAL_CONFIG_FILE: &str = ".cuecard.toml";

/// Unified configuration for cuecard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Title given to items created by `edit add`/`edit add-child`
    pub new_item_title: String,
    /// Name of outlines that carry no `# ` title
    pub default_name: String,
    /// Indent saved JSON documents
    pub pretty_json: bool,
    /// File extensions imported as outline text; anything else is JSON
    pub text_extensions: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            new_item_title: DEFAULT_NEW_ITEM_TITLE.to_string(),
            default_name: DEFAULT_OUTLINE_NAME.to_string(),
            pretty_json: true,
            text_extensions: vec!["md".into(), "txt".into()],
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub new_item_title: Option<String>,
    pub default_name: Option<String>,
    pub pretty_json: Option<bool>,
    pub text_extensions: Option<Vec<String>>,
}

/// Get the XDG config directory for cuecard.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "cuecard").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("cuecard.toml"))
}

/// Get the path to the local config file next to an outline.
pub fn local_config_path(outline_dir: &Path) -> PathBuf {
    outline_dir.join(LOCAL_CONFIG_FILE)
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Merge arrays with union semantics and negation support.
    ///
    /// ```ignore
    /// merge_array(&["a", "b"], &["c"])       // → ["a", "b", "c"]
    /// merge_array(&["a", "b"], &["!a", "c"]) // → ["b", "c"]
    /// ```
    pub fn merge_array(base: &[String], overlay: &[String]) -> Vec<String> {
        let mut result: HashSet<String> = base.iter().cloned().collect();

        for pattern in overlay {
            if let Some(negated) = pattern.strip_prefix('!') {
                result.remove(negated);
            } else {
                result.insert(pattern.clone());
            }
        }

        // sorted for deterministic output
        let mut vec: Vec<String> = result.into_iter().collect();
        vec.sort();
        vec
    }

    /// Local overlay: scalars win when given, arrays union (with `!` negation).
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            new_item_title: overlay
                .new_item_title
                .clone()
                .unwrap_or_else(|| self.new_item_title.clone()),
            default_name: overlay
                .default_name
                .clone()
                .unwrap_or_else(|| self.default_name.clone()),
            pretty_json: overlay.pretty_json.unwrap_or(self.pretty_json),
            text_extensions: overlay
                .text_extensions
                .as_ref()
                .map(|o| Self::merge_array(&self.text_extensions, o))
                .unwrap_or_else(|| self.text_extensions.clone()),
        }
    }

    /// Global overlay: like `merge_with`, but arrays REPLACE the defaults.
    fn apply_global(&self, global: &RawSettings) -> Self {
        Self {
            text_extensions: global
                .text_extensions
                .clone()
                .unwrap_or_else(|| self.text_extensions.clone()),
            ..self.merge_with(&RawSettings {
                text_extensions: None,
                ..global.clone()
            })
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `outline_dir` - Directory of the outline being worked on, for local config
    ///
    /// # Array Merge Semantics
    /// - Defaults → Global: REPLACE
    /// - Global → Local: UNION with `!item` negation
    /// - Any → Env vars: REPLACE
    pub fn load(outline_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!(path = %global_path.display(), "global config");
                let raw = load_raw_settings(&global_path)?;
                current = current.apply_global(&raw);
            }
        }

        if let Some(dir) = outline_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!(path = %local_path.display(), "local config");
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        Self::apply_env_overrides(current)
    }

    /// Apply CUECARD_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("CUECARD")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("text_extensions"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("new_item_title") {
            settings.new_item_title = val;
        }
        if let Ok(val) = config.get_string("default_name") {
            settings.default_name = val;
        }
        if let Ok(val) = config.get_bool("pretty_json") {
            settings.pretty_json = val;
        }
        if let Ok(val) = config.get::<Vec<String>>("text_extensions") {
            settings.text_extensions = val;
        }

        Ok(settings)
    }

    /// Whether `path` is imported as outline text rather than JSON.
    pub fn is_text_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| {
                self.text_extensions
                    .iter()
                    .any(|t| t.eq_ignore_ascii_case(ext))
            })
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r##"# cuecard configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/cuecard/cuecard.toml  (defines your baseline)
#   Local:  <outline_dir>/.cuecard.toml     (per-directory additions)
#   Env:    CUECARD_* environment variables (explicit overrides)
#
# Array Merge Semantics:
#   Global config REPLACES compiled defaults.
#   Local config UNIONS with global.
#   Use "!item" in local config to REMOVE an inherited item:
#     text_extensions = ["outline", "!txt"]

# Title of items created by `cuecard edit ... add`
# new_item_title = "New item"

# Name used when an outline has no "# " title
# default_name = "Untitled Outline"

# Indent saved JSON documents
# pretty_json = true

# Extensions imported as outline text (everything else is read as JSON)
# text_extensions = ["md", "txt"]
"##
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
