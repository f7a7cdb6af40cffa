//! Configuration file loader with multi-source merging

use super::file_config::{ConfigValidationError, FileConfig};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory name under the user's config dir
const APP_DIR: &str = "survey-dashboard";

/// Project-level file names, checked in order
const PROJECT_FILES: [&str; 2] = ["survey-dashboard.toml", ".survey-dashboard.toml"];

/// Prefix for environment overrides, e.g. `SURVEY_API__BASE_URL`
const ENV_PREFIX: &str = "SURVEY_";

/// Errors raised while producing a usable configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ConfigValidationError),
}

/// Files that take part in a load, lowest priority first
#[derive(Debug, Clone, Default)]
struct ConfigSources {
    global: Option<PathBuf>,
    project: Option<PathBuf>,
    explicit: Option<PathBuf>,
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `SURVEY_*` environment variables (`__` separates sections)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./survey-dashboard.toml` or `./.survey-dashboard.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/survey-dashboard/config.toml`
    /// 5. Default values
    ///
    /// The result is validated before it is returned.
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, ConfigError> {
        let sources = ConfigSources {
            global: Self::global_config_path().filter(|p| p.exists()),
            project: Self::project_config_path(),
            explicit: config_path.cloned(),
        };
        let config: FileConfig = Self::figment(&sources).extract().map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    fn figment(sources: &ConfigSources) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        for path in [&sources.global, &sources.project, &sources.explicit]
            .into_iter()
            .flatten()
        {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/survey-dashboard/config.toml if set,
    /// otherwise falls back to ~/.config/survey-dashboard/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        Self::project_config_in(Path::new("."))
    }

    fn project_config_in(dir: &Path) -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");
        println!("  [     ] Environment: {}*", ENV_PREFIX);

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:<5}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./{} or ./{}", PROJECT_FILES[0], PROJECT_FILES[1]);
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}
