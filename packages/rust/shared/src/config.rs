//! Application configuration for the roster scraper.
//!
//! User config lives at `~/.rosters/rosters.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, RosterError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "rosters.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".rosters";

/// Desktop browser User-Agent; several athletics sites reject unknown agents.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

// ---------------------------------------------------------------------------
// Config structs (matching rosters.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Plain HTTP transport settings.
    #[serde(default)]
    pub http: HttpConfig,

    /// Headless browser (`shot-scraper`) settings.
    #[serde(default)]
    pub browser: BrowserConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Path to the teams list.
    #[serde(default = "default_teams_file")]
    pub teams_file: String,

    /// Directory that receives `rosters_<season>.csv`.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Number of teams scraped at once.
    #[serde(default = "default_concurrency")]
    pub concurrency: u32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            teams_file: default_teams_file(),
            output_dir: default_output_dir(),
            concurrency: default_concurrency(),
        }
    }
}

fn default_teams_file() -> String {
    "data/teams.json".into()
}
fn default_output_dir() -> String {
    "data".into()
}
fn default_concurrency() -> u32 {
    1
}

/// `[http]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_http_timeout")]
    pub timeout_secs: u64,

    /// Retry a 403 response once through `curl`.
    #[serde(default = "default_true")]
    pub curl_fallback: bool,

    /// `curl` executable.
    #[serde(default = "default_curl_path")]
    pub curl_path: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_http_timeout(),
            curl_fallback: true,
            curl_path: default_curl_path(),
        }
    }
}

fn default_user_agent() -> String {
    BROWSER_USER_AGENT.into()
}
fn default_http_timeout() -> u64 {
    30
}
fn default_true() -> bool {
    true
}
fn default_curl_path() -> String {
    "curl".into()
}

/// `[browser]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// `shot-scraper` executable.
    #[serde(default = "default_browser_command")]
    pub command: String,

    /// Optional launcher prefix, e.g. `["uv", "run"]`.
    #[serde(default)]
    pub runner: Vec<String>,

    /// Milliseconds to let the page settle before capturing HTML.
    #[serde(default = "default_wait_ms")]
    pub wait_ms: u64,

    /// Timeout for `shot-scraper html`.
    #[serde(default = "default_render_timeout")]
    pub render_timeout_secs: u64,

    /// Timeout for `shot-scraper javascript`.
    #[serde(default = "default_script_timeout")]
    pub script_timeout_secs: u64,

    /// User-Agent passed to `shot-scraper javascript`.
    #[serde(default = "default_browser_user_agent")]
    pub user_agent: String,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            command: default_browser_command(),
            runner: Vec::new(),
            wait_ms: default_wait_ms(),
            render_timeout_secs: default_render_timeout(),
            script_timeout_secs: default_script_timeout(),
            user_agent: default_browser_user_agent(),
        }
    }
}

fn default_browser_command() -> String {
    "shot-scraper".into()
}
fn default_wait_ms() -> u64 {
    3000
}
fn default_render_timeout() -> u64 {
    45
}
fn default_script_timeout() -> u64 {
    60
}
fn default_browser_user_agent() -> String {
    "Firefox".into()
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.rosters/`).
pub fn config_dir() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| RosterError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.rosters/rosters.toml`).
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
    let content = std::fs::read_to_string(path).map_err(|e| RosterError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| RosterError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| RosterError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| RosterError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| RosterError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
