use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for visage.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (VISAGE_* prefix)
/// 3. Config file (~/.config/visage/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Decision boundary for recognition: the best gallery score must
    /// strictly exceed this value to count as a match.
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f32,

    /// Embedding provider endpoint (the `/represent` route of an
    /// MT Photos AI-compatible service).
    #[serde(default = "default_provider_endpoint")]
    pub provider_endpoint: String,

    /// API credential sent to the provider as the `api-key` header
    /// (required for enroll/recognize).
    ///
    /// Can be set via:
    /// - ENV: VISAGE_PROVIDER_API_KEY
    /// - Config: provider_api_key = "..."
    pub provider_api_key: Option<String>,

    /// Bound on each provider call, in seconds.
    #[serde(default = "default_provider_timeout_secs")]
    pub provider_timeout_secs: u64,

    /// Path to the gallery file.
    ///
    /// Can be set via:
    /// - CLI: --gallery /path/to/gallery.json
    /// - ENV: VISAGE_GALLERY_PATH
    /// - Config: gallery_path = "/path/to/gallery.json"
    /// - Default: ~/.local/share/visage/gallery.json
    #[serde(default = "default_gallery_path")]
    pub gallery_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            similarity_threshold: default_similarity_threshold(),
            provider_endpoint: default_provider_endpoint(),
            provider_api_key: None,
            provider_timeout_secs: default_provider_timeout_secs(),
            gallery_path: default_gallery_path(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/visage/config.toml
    /// Reads environment variables with VISAGE_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("visage");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build().context("Failed to build configuration")?;

        Ok(config)
    }

    /// Load configuration with a custom gallery path.
    ///
    /// This is used when the --gallery CLI flag is provided.
    pub fn load_with_gallery_path(gallery_path: PathBuf) -> Result<Self> {
        let mut config = Self::load()?;
        config.gallery_path = gallery_path;
        Ok(config)
    }
}

fn default_similarity_threshold() -> f32 {
    0.6
}

fn default_provider_endpoint() -> String {
    "http://ai-service:8066/represent".to_string()
}

fn default_provider_timeout_secs() -> u64 {
    30
}

/// Get the default gallery path.
///
/// Returns: ~/.local/share/visage/gallery.json (or platform equivalent)
fn default_gallery_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("visage")
        .join("gallery.json")
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/visage/config.toml
/// - macOS: ~/Library/Application Support/visage/config.toml
/// - Windows: %APPDATA%\visage\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("visage")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Visage Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (VISAGE_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Decision boundary for recognition. The best gallery score must strictly
# exceed this value to report a match. Cosine similarity, so 1.0 is an
# identical embedding and 0.0 is unrelated. Raise it to cut false accepts,
# lower it to cut false rejects.
#similarity_threshold = 0.6

# Embedding provider endpoint (the /represent route of an MT Photos
# AI-compatible service)
#provider_endpoint = "http://ai-service:8066/represent"

# API credential sent as the api-key header on every provider call
#
# Can also be set via:
# - Environment: VISAGE_PROVIDER_API_KEY=your-key-here
provider_api_key = "your-provider-api-key-here"

# Bound on each provider call, in seconds
#provider_timeout_secs = 30

# Path to the gallery file
#
# Stores every enrolled identity record as a JSON array of
# {label, vector} pairs
#
# Can also be set via:
# - CLI: visage --gallery /custom/path.json enroll alice photo.jpg
# - Environment: VISAGE_GALLERY_PATH=/custom/path.json
#
# Default: Platform-specific data directory
#gallery_path = "/path/to/custom/gallery.json"
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}
