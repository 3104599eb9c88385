//! Catalog records and loading for the Servizo provider directory.
//!
//! The catalog is the ordered, immutable table of [`ServiceProvider`] records
//! that every search runs against. It is loaded once per session (from JSON,
//! a file, or the embedded sample dataset) and shared read-only afterwards;
//! cloning a [`Catalog`] only bumps a reference count.
use std::{path::Path, sync::Arc};

use ahash::AHashMap as HashMap;
use itertools::Itertools;
use once_cell::sync::Lazy;
use tracing::{debug, info, instrument, warn};

mod model;
pub mod test_data;

pub use model::{Availability, Category, Coordinates, Review, ServiceProvider};

mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum DataError {
        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),
        #[error("Serialization error: {0}")]
        Serde(#[from] serde_json::Error),
        #[error("Provider id must not be empty")]
        EmptyProviderId,
        #[error("Duplicate provider id in catalog: {0}")]
        DuplicateProviderId(String),
        #[error("Provider {id} has non-finite coordinates ({latitude}, {longitude})")]
        InvalidCoordinates {
            id: String,
            latitude: f64,
            longitude: f64,
        },
        #[error("Unknown category: {0}")]
        UnknownCategory(String),
        #[error("Unknown availability: {0}")]
        UnknownAvailability(String),
    }
    pub type Result<T> = std::result::Result<T, DataError>;
}

pub use error::{DataError, Result};

/// Environment variable pointing at a catalog JSON file to use instead of the
/// embedded dataset.
pub const CATALOG_PATH_ENV: &str = "SERVIZO_CATALOG";

const EMBEDDED_PROVIDERS: &str = include_str!("../data/providers.json");

static EMBEDDED_CATALOG: Lazy<Catalog> = Lazy::new(|| {
    Catalog::from_json_str(EMBEDDED_PROVIDERS).expect("embedded catalog must be valid")
});

/// Description of the dataset compiled into the library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedMetadata {
    pub version: &'static str,
    pub source: &'static str,
    pub description: &'static str,
    pub providers: usize,
}

pub static METADATA: Lazy<EmbeddedMetadata> = Lazy::new(|| EmbeddedMetadata {
    version: "1.0.0",
    source: "data/providers.json",
    description: "Sample Bangalore service providers across all categories",
    providers: EMBEDDED_CATALOG.len(),
});

/// Ordered, immutable, cheaply cloneable provider table.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    providers: Arc<[ServiceProvider]>,
    by_id: Arc<HashMap<String, usize>>,
}

impl Catalog {
    /// Build a catalog from already-parsed records, keeping their order.
    ///
    /// Fails if an id is empty or repeated, or if a coordinate is not finite.
    pub fn from_providers(providers: Vec<ServiceProvider>) -> Result<Self> {
        validate(&providers)?;

        let by_id = providers
            .iter()
            .enumerate()
            .map(|(idx, p)| (p.id.clone(), idx))
            .collect::<HashMap<_, _>>();

        debug!(providers = providers.len(), "Catalog built");
        Ok(Self {
            providers: providers.into(),
            by_id: Arc::new(by_id),
        })
    }

    /// Parse a JSON array of provider records.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let providers: Vec<ServiceProvider> = serde_json::from_str(json)?;
        Self::from_providers(providers)
    }

    #[instrument(name = "Load Catalog", level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let t_load = std::time::Instant::now();
        let raw = std::fs::read_to_string(path.as_ref())?;
        let catalog = Self::from_json_str(&raw)?;
        info!(
            elapsed = ?t_load.elapsed(),
            providers = catalog.len(),
            "Catalog loaded from file"
        );
        Ok(catalog)
    }

    /// The sample dataset compiled into the library.
    #[must_use]
    pub fn embedded() -> Self {
        EMBEDDED_CATALOG.clone()
    }

    /// Load the file named by `SERVIZO_CATALOG` if set, otherwise the embedded
    /// dataset.
    pub fn from_env_or_embedded() -> Result<Self> {
        match std::env::var(CATALOG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_path(path.trim()),
            Ok(_) => {
                warn!("{CATALOG_PATH_ENV} is set but empty, using embedded catalog");
                Ok(Self::embedded())
            }
            Err(_) => Ok(Self::embedded()),
        }
    }

    #[must_use]
    pub fn providers(&self) -> &[ServiceProvider] {
        &self.providers
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ServiceProvider> {
        self.providers.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ServiceProvider> {
        self.by_id.get(id).map(|&idx| &self.providers[idx])
    }

    /// Catalog position of a provider, which is also its tie-break rank.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a ServiceProvider;
    type IntoIter = std::slice::Iter<'a, ServiceProvider>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn validate(providers: &[ServiceProvider]) -> Result<()> {
    if providers.iter().any(|p| p.id.is_empty()) {
        return Err(DataError::EmptyProviderId);
    }
    if let Some(dup) = providers.iter().map(|p| p.id.as_str()).duplicates().next() {
        return Err(DataError::DuplicateProviderId(dup.to_string()));
    }
    if let Some(p) = providers.iter().find(|p| !p.coordinates().is_finite()) {
        return Err(DataError::InvalidCoordinates {
            id: p.id.clone(),
            latitude: p.latitude,
            longitude: p.longitude,
        });
    }
    Ok(())
}
