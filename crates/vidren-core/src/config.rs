use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::filename::FilenameRules;
use crate::strategy::{CatalogSettings, ConsentSettings, PortalSettings};

/// Rejected configuration values.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("delay values must be finite and non-negative (min={min}, max={max})")]
    NegativeDelay { min: f64, max: f64 },
    #[error("min delay ({min}s) must be less than or equal to max delay ({max}s)")]
    InvertedDelay { min: f64, max: f64 },
    #[error("delay of {secs}s is too large")]
    DelayOutOfRange { secs: f64 },
}

fn delay(secs: f64) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f64(secs).map_err(|_| ConfigError::DelayOutOfRange { secs })
}

fn default_idle_browser_timeout_secs() -> u64 {
    3_600
}

/// Filename tables (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilenameConfig {
    /// Site prefixes, tested in order; the first match is stripped.
    pub site_prefixes: Vec<String>,
    /// Noise suffixes removed from the end of an identifier (first match only).
    pub noise_suffixes: Vec<String>,
}

impl Default for FilenameConfig {
    fn default() -> Self {
        let rules = FilenameRules::default();
        Self {
            site_prefixes: rules.site_prefixes,
            noise_suffixes: rules.noise_suffixes,
        }
    }
}

/// Catalog source used for standard codes (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub base_url: String,
    pub cookie: String,
    pub user_agent: String,
    /// Total request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        let s = CatalogSettings::default();
        Self {
            base_url: s.base_url,
            cookie: s.cookie,
            user_agent: s.user_agent,
            timeout_secs: 15,
        }
    }
}

/// Content portal used for every other identifier (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    pub base_url: String,
    pub navigation_timeout_secs: u64,
    /// Pause after a navigation settles, before the page is inspected.
    pub settle_after_navigation_ms: u64,
    /// Pause after the consent gate is confirmed, for deferred content.
    pub settle_after_consent_ms: u64,
    /// Run Chromium without a window.
    pub headless: bool,
    /// How long the browser connection may stay silent (e.g. during a run of
    /// catalog lookups) before it is dropped.
    #[serde(default = "default_idle_browser_timeout_secs")]
    pub idle_browser_timeout_secs: u64,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: PortalSettings::DEFAULT_BASE_URL.to_string(),
            navigation_timeout_secs: 30,
            settle_after_navigation_ms: 1_000,
            settle_after_consent_ms: 3_000,
            headless: true,
            idle_browser_timeout_secs: default_idle_browser_timeout_secs(),
        }
    }
}

/// Global configuration loaded from `~/.config/vidren/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameConfig {
    /// Lower bound of the pause after each network lookup, in seconds.
    pub min_delay_secs: f64,
    /// Upper bound of the pause after each network lookup, in seconds.
    pub max_delay_secs: f64,
    /// Narrate extraction and resolution steps on stderr.
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub filename: Option<FilenameConfig>,
    #[serde(default)]
    pub catalog: Option<CatalogConfig>,
    #[serde(default)]
    pub portal: Option<PortalConfig>,
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            min_delay_secs: 1.0,
            max_delay_secs: 3.0,
            verbose: false,
            filename: None,
            catalog: None,
            portal: None,
        }
    }
}

impl RenameConfig {
    /// Apply command-line overrides on top of the file values.
    pub fn with_overrides(
        mut self,
        min_delay: Option<f64>,
        max_delay: Option<f64>,
        verbose: bool,
    ) -> Self {
        if let Some(min) = min_delay {
            self.min_delay_secs = min;
        }
        if let Some(max) = max_delay {
            self.max_delay_secs = max;
        }
        self.verbose |= verbose;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = (self.min_delay_secs, self.max_delay_secs);
        if !min.is_finite() || !max.is_finite() || min < 0.0 || max < 0.0 {
            return Err(ConfigError::NegativeDelay { min, max });
        }
        if min > max {
            return Err(ConfigError::InvertedDelay { min, max });
        }
        delay(max)?;
        Ok(())
    }

    /// Validated politeness bounds.
    pub fn delay_bounds(&self) -> Result<(Duration, Duration), ConfigError> {
        self.validate()?;
        Ok((delay(self.min_delay_secs)?, delay(self.max_delay_secs)?))
    }

    pub fn filename_rules(&self) -> FilenameRules {
        let section = self.filename.clone().unwrap_or_default();
        FilenameRules::new(section.site_prefixes, section.noise_suffixes)
    }

    pub fn catalog_config(&self) -> CatalogConfig {
        self.catalog.clone().unwrap_or_default()
    }

    pub fn catalog_settings(&self) -> CatalogSettings {
        let section = self.catalog_config();
        CatalogSettings {
            base_url: section.base_url,
            cookie: section.cookie,
            user_agent: section.user_agent,
        }
    }

    pub fn portal_config(&self) -> PortalConfig {
        self.portal.clone().unwrap_or_default()
    }

    pub fn portal_settings(&self) -> PortalSettings {
        let section = self.portal_config();
        let navigation_timeout = Duration::from_secs(section.navigation_timeout_secs);
        PortalSettings {
            base_url: section.base_url,
            navigation_timeout,
            settle_after_navigation: Duration::from_millis(section.settle_after_navigation_ms),
            consent: ConsentSettings {
                navigation_timeout,
                settle_after_confirm: Duration::from_millis(section.settle_after_consent_ms),
                ..ConsentSettings::default()
            },
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("vidren")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<RenameConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = RenameConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: RenameConfig = toml::from_str(&data)?;
    Ok(cfg)
}
