use crate::Cli;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-09-2025";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT_SECS: u64 = 90;

/// Final resolved configuration for portfoliobot.
#[derive(Debug, Clone)]
pub struct Config {
    /// Empty unless supplied; the endpoint then rejects calls.
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
    pub timeout: Duration,
    pub no_model: bool,
}

impl Config {
    /// Build the final config from CLI flags, environment, TOML file, and defaults.
    ///
    /// Precedence:
    ///   1. CLI flags (`--api-key`, `--model`, `--endpoint`)
    ///   2. Env vars `GEMINI_API_KEY`, `PORTFOLIOBOT_MODEL`, `PORTFOLIOBOT_ENDPOINT`
    ///   3. TOML `~/.config/portfoliobot.toml`
    ///   4. Hardcoded defaults
    pub fn from_sources(cli: &Cli) -> Self {
        let file_cfg = config_path()
            .and_then(|path| load_file_config(&path))
            .unwrap_or_default();

        Self::resolve(
            cli,
            file_cfg,
            env::var("PORTFOLIOBOT_MODEL").ok(),
            env::var("PORTFOLIOBOT_ENDPOINT").ok(),
        )
    }

    fn resolve(
        cli: &Cli,
        file_cfg: FileConfig,
        model_env: Option<String>,
        endpoint_env: Option<String>,
    ) -> Self {
        // clap already folds GEMINI_API_KEY into `cli.api_key`.
        let api_key = cli
            .api_key
            .clone()
            .or(file_cfg.api_key)
            .unwrap_or_default();

        let model = cli
            .model
            .clone()
            .or(model_env)
            .or(file_cfg.model)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let endpoint = cli
            .endpoint
            .clone()
            .or(endpoint_env)
            .or(file_cfg.endpoint)
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let timeout = Duration::from_secs(file_cfg.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));

        let no_model = cli.no_model || model.eq_ignore_ascii_case("none");

        Config {
            api_key,
            model,
            endpoint,
            timeout,
            no_model,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    pub api_key: Option<String>,
    /// Default model to use when not provided via CLI or env.
    pub model: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Return `~/.config/portfoliobot.toml`
fn config_path() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    Some(home.join(".config").join("portfoliobot.toml"))
}

fn load_file_config(path: &Path) -> Option<FileConfig> {
    if !path.exists() {
        return None;
    }

    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) => {
            log::warn!("Could not read {}: {err}", path.display());
            return None;
        }
    };

    match toml::from_str::<FileConfig>(&data) {
        Ok(cfg) => {
            log::debug!("Loaded config from {}", path.display());
            Some(cfg)
        }
        Err(err) => {
            log::warn!("Ignoring malformed config {}: {err}", path.display());
            None
        }
    }
}
