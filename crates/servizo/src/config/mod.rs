use std::str::FromStr;

use tracing::warn;

use crate::{error::ServizoError, search::SearchConfig};

pub const RADIUS_ENV: &str = "SERVIZO_RADIUS_KM";
pub const TAG_EXPANSION_ENV: &str = "SERVIZO_TAG_EXPANSION";
pub const PARALLEL_THRESHOLD_ENV: &str = "SERVIZO_PARALLEL_THRESHOLD";

/// Builder for creating search configurations with ergonomic defaults
#[derive(Debug, Clone, Default)]
pub struct SearchConfigBuilder {
    config: SearchConfig,
}

impl SearchConfigBuilder {
    /// Create a new builder with the listing defaults (1.5 km, tag expansion on)
    pub fn new() -> Self {
        Self {
            config: SearchConfig::default(),
        }
    }

    /// Literal matching only: no synonym expansion
    pub fn strict() -> Self {
        let mut builder = Self::new();
        builder.config.tag_expansion = false;
        builder
    }

    /// Tight walking-distance neighbourhood
    pub fn neighbourhood() -> Self {
        let mut builder = Self::new();
        builder.config.radius_km = 0.75;
        builder
    }

    /// Broader area for sparse catalogs
    pub fn wide_area() -> Self {
        let mut builder = Self::new();
        builder.config.radius_km = 5.0;
        builder
    }

    /// Start from the defaults and apply `SERVIZO_*` environment overrides.
    ///
    /// Values that fail to parse or validate are ignored with a warning.
    pub fn from_env() -> Self {
        let mut builder = Self::new();

        if let Some(radius) = env_value::<f64>(RADIUS_ENV) {
            match builder.clone().try_radius_km(radius) {
                Ok(updated) => builder = updated,
                Err(e) => warn!(%e, "Ignoring {RADIUS_ENV}"),
            }
        }
        if let Ok(raw) = std::env::var(TAG_EXPANSION_ENV) {
            builder.config.tag_expansion = raw == "1" || raw.eq_ignore_ascii_case("true");
        }
        if let Some(threshold) = env_value::<usize>(PARALLEL_THRESHOLD_ENV) {
            builder.config.parallel_threshold = threshold;
        }
        builder
    }

    /// Set the near-me radius in kilometres. Negative or non-finite values are
    /// clamped to zero.
    pub fn radius_km(mut self, radius_km: f64) -> Self {
        self.config.radius_km = if radius_km.is_finite() {
            radius_km.max(0.0)
        } else {
            0.0
        };
        self
    }

    /// Set the near-me radius, rejecting negative or non-finite values
    pub fn try_radius_km(mut self, radius_km: f64) -> Result<Self, ServizoError> {
        if !radius_km.is_finite() || radius_km < 0.0 {
            return Err(ServizoError::ConfigError(format!(
                "Radius must be a finite, non-negative number of kilometres, got {radius_km}"
            )));
        }
        self.config.radius_km = radius_km;
        Ok(self)
    }

    /// Enable or disable category synonym expansion
    pub fn tag_expansion(mut self, enabled: bool) -> Self {
        self.config.tag_expansion = enabled;
        self
    }

    /// Catalog size above which filtering is parallelised
    pub fn parallel_threshold(mut self, threshold: usize) -> Self {
        self.config.parallel_threshold = threshold;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> SearchConfig {
        self.config
    }
}

fn env_value<T: FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    let parsed = raw.trim().parse().ok();
    if parsed.is_none() {
        warn!(value = %raw, "Ignoring unparseable {key}");
    }
    parsed
}
