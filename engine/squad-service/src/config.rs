//! Service configuration management

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use squad_optimizer::{BackendConfig, HorizonMode, SquadRules};
use std::path::Path;

/// Main service configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Squad and lineup composition rules
    pub rules: SquadRules,

    /// Solve settings
    pub optimizer: OptimizerSettings,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// How the horizon is solved and by which backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerSettings {
    pub mode: HorizonMode,
    pub backend: BackendConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (json, pretty, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: "pretty".to_string() }
    }
}

impl ServiceConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path:?}"))?;
        let config: ServiceConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {path:?}"))?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {path:?}"))?;
        Ok(())
    }
}

/// Load configuration from an optional file and environment variables
pub fn load_config(path: Option<&Path>) -> Result<ServiceConfig> {
    let mut config = match path {
        Some(path) => {
            tracing::debug!("Loading configuration from file: {:?}", path);
            ServiceConfig::from_file(path)?
        }
        None => ServiceConfig::default(),
    };

    // Override with environment variables
    load_from_env(&mut config)?;

    validate_config(&config)?;
    Ok(config)
}

/// Load configuration overrides from environment variables
pub fn load_from_env(config: &mut ServiceConfig) -> Result<()> {
    apply_overrides(config, |key| std::env::var(key).ok())
}

/// Apply `SQUAD_*` overrides read through `lookup`
pub fn apply_overrides(
    config: &mut ServiceConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(level) = lookup("SQUAD_LOG_LEVEL") {
        config.logging.level = level;
    }

    if let Some(format) = lookup("SQUAD_LOG_FORMAT") {
        config.logging.format = format;
    }

    if let Some(backend) = lookup("SQUAD_BACKEND") {
        config.optimizer.backend.name = backend;
    }

    if let Some(mode) = lookup("SQUAD_HORIZON_MODE") {
        config.optimizer.mode =
            mode.parse().map_err(|e: String| anyhow!(e)).context("Invalid SQUAD_HORIZON_MODE")?;
    }

    if let Some(floor) = lookup("SQUAD_BUDGET_FLOOR") {
        match parse_toggle::<u32>(&floor).context("Invalid SQUAD_BUDGET_FLOOR")? {
            Some(value) => {
                config.rules.budget_floor = value;
                config.rules.enforce_budget_floor = true;
            }
            None => config.rules.enforce_budget_floor = false,
        }
    }

    if let Some(cutoff) = lookup("SQUAD_ELIGIBILITY_CUTOFF") {
        match parse_toggle::<u8>(&cutoff).context("Invalid SQUAD_ELIGIBILITY_CUTOFF")? {
            Some(value) => {
                config.rules.eligibility_cutoff = value;
                config.rules.enforce_eligibility = true;
            }
            None => config.rules.enforce_eligibility = false,
        }
    }

    Ok(())
}

/// `off` disables a rule; anything else must parse as its value
fn parse_toggle<T: std::str::FromStr>(raw: &str) -> Result<Option<T>> {
    let raw = raw.trim();
    if matches!(raw.to_ascii_lowercase().as_str(), "off" | "none" | "false") {
        return Ok(None);
    }
    raw.parse().map(Some).map_err(|_| anyhow!("expected a number or 'off', got '{raw}'"))
}

/// Validate configuration
pub fn validate_config(config: &ServiceConfig) -> Result<()> {
    // Validate log level
    match config.logging.level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => bail!("Invalid log level: {}", config.logging.level),
    }

    // Validate log format
    match config.logging.format.as_str() {
        "json" | "pretty" | "compact" => {}
        _ => bail!("Invalid log format: {}", config.logging.format),
    }

    if config.rules.eligibility_cutoff > player_facts::MAX_ELIGIBILITY {
        bail!("Invalid eligibility cutoff: {}", config.rules.eligibility_cutoff);
    }

    config.rules.validate().context("Invalid squad rules")?;
    squad_optimizer::from_config(&config.optimizer.backend).context("Invalid backend")?;

    Ok(())
}
