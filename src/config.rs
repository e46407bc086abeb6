use crate::application::{DEFAULT_JITTER_RADIUS, DEFAULT_PROBE_RESOURCE};
use crate::domain::services::{PatternTable, MAX_JITTER_RADIUS};
use crate::domain::value_objects::{Coordinate, CoordinateSpan, Viewport};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    // HTTP surface
    pub listen_addr: String,
    pub debug: bool,

    // Backend connectivity probe
    pub backend_url: String,
    pub backend_key: String,
    pub probe_resource: String,
    pub probe_timeout_secs: u64,
    pub patterns_path: Option<String>,

    // Map playground
    pub jitter_radius: f64,
    pub center_lat: f64,
    pub center_lon: f64,
    pub span: f64,
    pub seed_on_start: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            debug: false,
            backend_url: "https://eujoyccryuwhxtqceqgy.supabase.co".to_string(),
            backend_key: "sb_publishable_fxj3f5-PGjWJpmKcLBdfPg_M__xU71j".to_string(),
            probe_resource: DEFAULT_PROBE_RESOURCE.to_string(),
            probe_timeout_secs: 30,
            patterns_path: None,
            jitter_radius: DEFAULT_JITTER_RADIUS,
            center_lat: 37.7749,
            center_lon: -122.4194,
            span: 0.05,
            seed_on_start: true,
        }
    }
}

impl Config {
    /// Initial map viewport.
    pub fn viewport(&self) -> Viewport {
        Viewport::new(
            Coordinate::new(self.center_lat, self.center_lon),
            CoordinateSpan::new(self.span, self.span),
        )
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend_url.trim().is_empty() {
            return Err(ConfigError::MissingBackendUrl);
        }
        if self.probe_resource.trim().is_empty() {
            return Err(ConfigError::MissingProbeResource);
        }
        if !self.jitter_radius.is_finite() || self.jitter_radius.abs() > MAX_JITTER_RADIUS {
            return Err(ConfigError::InvalidJitterRadius(self.jitter_radius));
        }
        if !self.viewport().is_valid() {
            return Err(ConfigError::InvalidViewport);
        }
        Ok(())
    }

    /// Load the classifier pattern table, from `patterns_path` if set.
    pub fn pattern_table(&self) -> anyhow::Result<PatternTable> {
        match &self.patterns_path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)?;
                let table = serde_json::from_str(&raw)?;
                tracing::info!("classifier patterns loaded from {}", path);
                Ok(table)
            }
            None => Ok(PatternTable::default()),
        }
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("backend_url is required")]
    MissingBackendUrl,
    #[error("probe_resource is required")]
    MissingProbeResource,
    #[error("jitter_radius must be finite and at most 360 degrees, got {0}")]
    InvalidJitterRadius(f64),
    #[error("initial viewport is out of range")]
    InvalidViewport,
}

fn env_flag(name: &str, default: bool) -> bool {
    std::env::var(name)
        .map(|v| v == "1" || v.to_lowercase() == "true")
        .unwrap_or(default)
}

pub fn load_config() -> anyhow::Result<Config> {
    let defaults = Config::default();

    let listen_addr = std::env::var("POIPLAY_LISTEN_ADDR")
        .unwrap_or_else(|_| defaults.listen_addr.clone());

    let debug = std::env::var("DEBUG").is_ok();

    // Backend probe settings
    let backend_url = std::env::var("POIPLAY_BACKEND_URL")
        .unwrap_or_else(|_| defaults.backend_url.clone());

    let backend_key = std::env::var("POIPLAY_BACKEND_KEY")
        .unwrap_or_else(|_| defaults.backend_key.clone());

    let probe_resource = std::env::var("POIPLAY_PROBE_RESOURCE")
        .unwrap_or_else(|_| defaults.probe_resource.clone());

    let probe_timeout_secs = std::env::var("POIPLAY_PROBE_TIMEOUT_SECS")
        .unwrap_or_else(|_| "30".to_string())
        .parse()
        .unwrap_or(defaults.probe_timeout_secs);

    let patterns_path = std::env::var("POIPLAY_PATTERNS_PATH").ok();

    // Map settings
    let jitter_radius = std::env::var("POIPLAY_JITTER_RADIUS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(defaults.jitter_radius);

    let center_lat = std::env::var("POIPLAY_CENTER_LAT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(defaults.center_lat);

    let center_lon = std::env::var("POIPLAY_CENTER_LON")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(defaults.center_lon);

    let span = std::env::var("POIPLAY_SPAN")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(defaults.span);

    let seed_on_start = env_flag("POIPLAY_SEED_ON_START", defaults.seed_on_start);

    let cfg = Config {
        listen_addr,
        debug,
        backend_url,
        backend_key,
        probe_resource,
        probe_timeout_secs,
        patterns_path,
        jitter_radius,
        center_lat,
        center_lon,
        span,
        seed_on_start,
    };
    cfg.validate()?;
    Ok(cfg)
}
