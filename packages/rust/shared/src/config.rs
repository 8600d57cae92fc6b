//! Application configuration for Topicshelf.
//!
//! User config lives at `~/.topicshelf/topicshelf.toml`.
//! CLI flags (and their environment variables) override config file values,
//! which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TopicshelfError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "topicshelf.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".topicshelf";

/// Directory name probed next to the executable when no content root is configured.
const DEFAULT_CONTENT_DIR_NAME: &str = "content";

// ---------------------------------------------------------------------------
// Config structs (matching topicshelf.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Content tree settings.
    #[serde(default)]
    pub content: ContentConfig,

    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Search limits.
    #[serde(default)]
    pub search: SearchConfig,

    /// Markdown rendering switches.
    #[serde(default)]
    pub render: RenderConfig,
}

/// `[content]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Root directory of the markdown tree. Unset means "probe the defaults".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

/// `[server]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Built frontend served as static files (skipped when missing).
    #[serde(default = "default_frontend_dist")]
    pub frontend_dist: String,

    /// Allowed CORS origins; `"*"` allows any.
    #[serde(default = "default_cors_origins")]
    pub cors_allow_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            frontend_dist: default_frontend_dist(),
            cors_allow_origins: default_cors_origins(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    8080
}
fn default_frontend_dist() -> String {
    "../frontend/build".into()
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".into()]
}

/// `[search]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum number of results returned per query.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
        }
    }
}

fn default_max_results() -> usize {
    20
}

/// `[render]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Pass raw HTML embedded in documents through to the output.
    #[serde(default)]
    pub allow_raw_html: bool,
}

// ---------------------------------------------------------------------------
// Serve config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Command-line overrides for the server settings. `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct ServeOverrides {
    pub content_dir: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub frontend_dist: Option<PathBuf>,
}

/// Runtime server configuration, merged from config file and CLI flags.
#[derive(Debug, Clone)]
pub struct ServeConfig {
    /// Absolute content root.
    pub content_dir: PathBuf,
    /// `host:port` to bind.
    pub bind_addr: String,
    /// Static frontend directory.
    pub frontend_dist: PathBuf,
    /// Allowed CORS origins.
    pub cors_allow_origins: Vec<String>,
    /// Search result cap.
    pub max_results: usize,
    /// Raw HTML passthrough when rendering.
    pub allow_raw_html: bool,
}

impl ServeConfig {
    /// Merge CLI overrides on top of the loaded config.
    pub fn resolve(config: &AppConfig, overrides: ServeOverrides) -> Result<Self> {
        let content_dir = resolve_content_dir(overrides.content_dir.as_deref(), config)?;
        let host = overrides.host.unwrap_or_else(|| config.server.host.clone());
        let port = overrides.port.unwrap_or(config.server.port);

        if config.search.max_results == 0 {
            return Err(TopicshelfError::config("search.max_results must be at least 1"));
        }

        Ok(Self {
            content_dir,
            bind_addr: format!("{host}:{port}"),
            frontend_dist: overrides
                .frontend_dist
                .unwrap_or_else(|| PathBuf::from(&config.server.frontend_dist)),
            cors_allow_origins: config.server.cors_allow_origins.clone(),
            max_results: config.search.max_results,
            allow_raw_html: config.render.allow_raw_html,
        })
    }
}

/// Pick the content root: explicit flag, then config file, then
/// `<exe dir>/content` if it exists, then `./content`. The result is absolute.
pub fn resolve_content_dir(explicit: Option<&Path>, config: &AppConfig) -> Result<PathBuf> {
    let chosen = match (explicit, config.content.dir.as_deref()) {
        (Some(dir), _) => dir.to_path_buf(),
        (None, Some(dir)) => PathBuf::from(dir),
        (None, None) => default_content_dir(),
    };

    std::path::absolute(&chosen).map_err(|e| TopicshelfError::io(&chosen, e))
}

fn default_content_dir() -> PathBuf {
    let beside_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_CONTENT_DIR_NAME)));

    match beside_exe {
        Some(dir) if dir.is_dir() => dir,
        _ => PathBuf::from(".").join(DEFAULT_CONTENT_DIR_NAME),
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.topicshelf/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| TopicshelfError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.topicshelf/topicshelf.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| TopicshelfError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        TopicshelfError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let path = config_file_path()?;
    init_config_at(&path)?;
    Ok(path)
}

/// Write a default config file at `path`, creating parent directories.
pub fn init_config_at(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| TopicshelfError::io(dir, e))?;
    }

    let content = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| TopicshelfError::config(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| TopicshelfError::io(path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(())
}
