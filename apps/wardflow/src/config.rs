//! # Configuration
//!
//! Server and flow settings, layered in this order (later wins):
//!
//! 1. Built-in defaults
//! 2. TOML file passed with `--config`
//! 3. `WARDFLOW_*` environment variables
//! 4. Command-line flags
//!
//! ## File format
//!
//! ```toml
//! seed = 42
//!
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [flow]
//! auto = true
//! crowd_threshold = 40
//! max_moves_per_stage = 3
//! wait_threshold = 30
//! ```

use crate::error::AppError;
use serde::Deserialize;
use std::path::Path;
use wardflow_core::{AutoBalanceConfig, FlowControl, Hospital, primitives::DEFAULT_WAIT_THRESHOLD};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;

/// Environment variables read by [`Settings::apply_env`].
pub const ENV_HOST: &str = "WARDFLOW_HOST";
pub const ENV_PORT: &str = "WARDFLOW_PORT";
pub const ENV_SEED: &str = "WARDFLOW_SEED";
pub const ENV_AUTO_FLOW: &str = "WARDFLOW_AUTO_FLOW";
pub const ENV_CROWD_THRESHOLD: &str = "WARDFLOW_CROWD_THRESHOLD";
pub const ENV_MAX_MOVES: &str = "WARDFLOW_MAX_MOVES";

// =============================================================================
// FILE LAYOUT
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    seed: Option<u64>,
    server: ServerSection,
    flow: FlowSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ServerSection {
    host: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FlowSection {
    auto: Option<bool>,
    crowd_threshold: Option<i64>,
    max_moves_per_stage: Option<i64>,
    wait_threshold: Option<u32>,
}

// =============================================================================
// SETTINGS
// =============================================================================

/// Resolved settings for one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// Fixed random seed; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Start in automatic flow mode.
    pub auto: bool,
    pub balance: AutoBalanceConfig,
    pub wait_threshold: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            seed: None,
            auto: false,
            balance: AutoBalanceConfig::default(),
            wait_threshold: DEFAULT_WAIT_THRESHOLD,
        }
    }
}

impl Settings {
    /// Defaults, then the optional file, then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let mut settings = Self::default();
        if let Some(path) = path {
            settings.apply_file(path)?;
        }
        settings.apply_env(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    /// Overlay values from a TOML file.
    pub fn apply_file(&mut self, path: &Path) -> Result<(), AppError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        let file: FileConfig = toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;

        if let Some(host) = file.server.host {
            self.host = host;
        }
        if let Some(port) = file.server.port {
            self.port = port;
        }
        if file.seed.is_some() {
            self.seed = file.seed;
        }
        if let Some(auto) = file.flow.auto {
            self.auto = auto;
        }
        if let Some(minutes) = file.flow.wait_threshold {
            self.wait_threshold = minutes;
        }
        self.apply_tunables(file.flow.crowd_threshold, file.flow.max_moves_per_stage)
    }

    /// Overlay values from environment variables.
    ///
    /// `lookup` maps a variable name to its value; [`Settings::load`] passes
    /// the process environment.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST) {
            self.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.port = parse_var(ENV_PORT, &port)?;
        }
        if let Some(seed) = lookup(ENV_SEED) {
            self.seed = Some(parse_var(ENV_SEED, &seed)?);
        }
        if let Some(auto) = lookup(ENV_AUTO_FLOW) {
            self.auto = parse_flag(&auto)?;
        }
        let crowd = lookup(ENV_CROWD_THRESHOLD)
            .map(|v| parse_var(ENV_CROWD_THRESHOLD, &v))
            .transpose()?;
        let max_moves = lookup(ENV_MAX_MOVES)
            .map(|v| parse_var(ENV_MAX_MOVES, &v))
            .transpose()?;
        self.apply_tunables(crowd, max_moves)
    }

    /// Command-line flags; `None` keeps the current value.
    pub fn apply_flags(&mut self, host: Option<String>, port: Option<u16>, seed: Option<u64>) {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        if seed.is_some() {
            self.seed = seed;
        }
    }

    fn apply_tunables(
        &mut self,
        crowd_threshold: Option<i64>,
        max_moves_per_stage: Option<i64>,
    ) -> Result<(), AppError> {
        if crowd_threshold.is_none() && max_moves_per_stage.is_none() {
            return Ok(());
        }
        self.balance = AutoBalanceConfig::new(
            crowd_threshold.unwrap_or(i64::from(self.balance.crowd_threshold)),
            max_moves_per_stage.unwrap_or(i64::from(self.balance.max_moves_per_stage)),
        )?;
        Ok(())
    }

    /// `host:port` for the listener.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// A hospital in its start-up state, configured from these settings.
    #[must_use]
    pub fn build_hospital(&self) -> Hospital {
        let hospital = match self.seed {
            Some(seed) => Hospital::seeded(seed),
            None => Hospital::new(),
        };
        hospital
            .with_control(FlowControl::with_config(self.auto, self.balance))
            .with_wait_threshold(self.wait_threshold)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, AppError> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::Config(format!("{} has an invalid value: '{}'", name, value)))
}

fn parse_flag(value: &str) -> Result<bool, AppError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AppError::Config(format!(
            "{} has an invalid value: '{}'",
            ENV_AUTO_FLOW, value
        ))),
    }
}

// =============================================================================
// TESTS
// =============================================================================
