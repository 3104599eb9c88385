//! Core provider search functionality for the Servizo library.
//!
//! This module provides the main [`ProviderSearcher`] interface, which owns a
//! read-only [`Catalog`], the category synonym [`TagIndex`] and a
//! [`SearchConfig`], and turns listing inputs into an ordered result set.
//!
//! # Quick Start
//!
//! ```rust
//! use servizo::{FilterState, ProviderSearcher, ProximityState};
//!
//! let searcher = ProviderSearcher::new_embedded();
//!
//! // Everything, in catalog order
//! let all = searcher.search(&FilterState::new(), &ProximityState::inactive());
//! assert_eq!(all.len(), searcher.catalog().len());
//!
//! // "leak" matches plumbers through the synonym index
//! let plumbers = searcher.search(
//!     &FilterState::new().with_search("leak"),
//!     &ProximityState::inactive(),
//! );
//! assert!(!plumbers.is_empty());
//! ```

pub use servizo_catalog::Catalog;
use servizo_catalog::ServiceProvider;
use tracing::{info, instrument};

use crate::{
    error::ServizoError,
    index::TagIndex,
    search::{
        self,
        FilterState, MatchReason, Matcher, ProximityState, SearchConfig, SearchError,
        bulk_compute_results, compute_results, normalize_query,
    },
};

pub type SearchResults<'a> = Vec<&'a ServiceProvider>;
pub type SearchResultsBatch<'a> = Vec<Vec<&'a ServiceProvider>>;

/// The main provider searcher.
///
/// Cloning is cheap: the catalog is reference-counted and the tag index is
/// shared or small.
///
/// # Examples
///
/// With custom configuration:
/// ```rust
/// use servizo::{FilterState, ProviderSearcher, ProximityState, SearchConfig};
/// use servizo::catalog::test_data::BANGALORE_CENTRE;
///
/// let config = SearchConfig::builder().radius_km(3.0).build();
/// let searcher = ProviderSearcher::new_embedded().with_config(config);
///
/// let nearby = searcher.search(
///     &FilterState::new(),
///     &ProximityState::active_at(BANGALORE_CENTRE),
/// );
/// assert!(!nearby.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct ProviderSearcher {
    catalog: Catalog,
    tags: TagIndex,
    config: SearchConfig,
}

impl ProviderSearcher {
    /// Searcher over `catalog` with the default tag index and configuration.
    #[instrument(name = "Create ProviderSearcher", level = "info", skip_all, fields(providers = catalog.len()))]
    pub fn new(catalog: Catalog) -> Self {
        Self::from_components(
            catalog,
            TagIndex::default_index().clone(),
            SearchConfig::default(),
        )
    }

    /// Searcher over the sample catalog compiled into the library.
    pub fn new_embedded() -> Self {
        info!("Creating ProviderSearcher with embedded catalog");
        Self::new(Catalog::embedded())
    }

    /// Searcher over the catalog named by `SERVIZO_CATALOG` (or the embedded
    /// one), configured from `SERVIZO_*` environment overrides.
    #[instrument(name = "Create ProviderSearcher from Environment", level = "info")]
    pub fn from_env() -> Result<Self, ServizoError> {
        let catalog = Catalog::from_env_or_embedded()?;
        let config = crate::SearchConfigBuilder::from_env().build();
        info!(providers = catalog.len(), ?config, "ProviderSearcher configured from environment");
        Ok(Self::from_components(
            catalog,
            TagIndex::default_index().clone(),
            config,
        ))
    }

    pub fn from_components(catalog: Catalog, tags: TagIndex, config: SearchConfig) -> Self {
        Self {
            catalog,
            tags,
            config,
        }
    }

    pub fn builder() -> ProviderSearcherBuilder {
        ProviderSearcherBuilder::new()
    }

    #[must_use]
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Ordered results for the current listing inputs.
    ///
    /// Recomputed from scratch on every call.
    pub fn search(&self, filters: &FilterState, proximity: &ProximityState) -> SearchResults<'_> {
        compute_results(&self.catalog, &self.tags, filters, proximity, &self.config)
    }

    /// Like [`Self::search`] but with a one-off configuration.
    pub fn search_with_config(
        &self,
        filters: &FilterState,
        proximity: &ProximityState,
        config: &SearchConfig,
    ) -> SearchResults<'_> {
        compute_results(&self.catalog, &self.tags, filters, proximity, config)
    }

    /// Evaluate many input pairs in parallel; one result vector per input.
    pub fn search_bulk(&self, inputs: &[(FilterState, ProximityState)]) -> SearchResultsBatch<'_> {
        bulk_compute_results(&self.catalog, &self.tags, inputs, &self.config)
    }

    /// Why `provider` matches `raw_query`, or `None` if it does not.
    ///
    /// The query is normalized here, so raw user input can be passed.
    pub fn explain(&self, provider: &ServiceProvider, raw_query: &str) -> Option<MatchReason> {
        self.matcher().explain(provider, &normalize_query(raw_query))
    }

    pub fn provider(&self, id: &str) -> search::Result<&ServiceProvider> {
        self.catalog
            .get(id)
            .ok_or_else(|| SearchError::UnknownProvider(id.to_string()))
    }

    fn matcher(&self) -> Matcher<'_> {
        if self.config.tag_expansion {
            Matcher::new(&self.tags)
        } else {
            Matcher::literal()
        }
    }

    // === Utility Methods ===

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn tags(&self) -> &TagIndex {
        &self.tags
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

impl Default for ProviderSearcher {
    fn default() -> Self {
        Self::new_embedded()
    }
}

impl From<Catalog> for ProviderSearcher {
    fn from(catalog: Catalog) -> Self {
        Self::new(catalog)
    }
}

// === Builder Pattern ===

/// Builder for creating a [`ProviderSearcher`] from custom parts.
#[derive(Debug, Clone, Default)]
pub struct ProviderSearcherBuilder {
    catalog: Option<Catalog>,
    tags: Option<TagIndex>,
    config: Option<SearchConfig>,
}

impl ProviderSearcherBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    #[must_use]
    pub fn tags(mut self, tags: TagIndex) -> Self {
        self.tags = Some(tags);
        self
    }

    #[must_use]
    pub fn config(mut self, config: SearchConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Unset parts fall back to the embedded catalog, the default tag index and
    /// the default configuration.
    pub fn build(self) -> ProviderSearcher {
        ProviderSearcher::from_components(
            self.catalog.unwrap_or_else(Catalog::embedded),
            self.tags
                .unwrap_or_else(|| TagIndex::default_index().clone()),
            self.config.unwrap_or_default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use servizo_catalog::{Category, test_data::scenario_catalog};

    use super::*;

    #[test]
    fn test_searcher_creation() {
        let searcher = ProviderSearcher::new_embedded();
        assert!(!searcher.catalog().is_empty());
        assert!(searcher.tags().missing_categories().is_empty());
    }

    #[test]
    fn test_explain_normalizes_raw_input() {
        let searcher = ProviderSearcher::new(scenario_catalog());
        let rakesh = searcher.provider("rakesh").unwrap();
        assert_eq!(
            searcher.explain(rakesh, "  LEAK "),
            Some(MatchReason::Tag("leak".to_string()))
        );
        assert_eq!(searcher.explain(rakesh, "yoga"), None);
    }

    #[test]
    fn test_explain_respects_tag_expansion_flag() {
        let searcher = ProviderSearcher::new(scenario_catalog())
            .with_config(crate::SearchConfigBuilder::strict().build());
        let rakesh = searcher.provider("rakesh").unwrap();
        assert_eq!(searcher.explain(rakesh, "leak"), None);
    }

    #[test]
    fn test_unknown_provider() {
        let searcher = ProviderSearcher::new(scenario_catalog());
        assert_eq!(
            searcher.provider("nobody").unwrap_err(),
            SearchError::UnknownProvider("nobody".to_string())
        );
    }

    #[test]
    fn test_builder_with_custom_tags() {
        let searcher = ProviderSearcher::builder()
            .catalog(scenario_catalog())
            .tags(TagIndex::from_table(&[(Category::Tutoring, &["homework"])]))
            .build();

        let results = searcher.search(
            &FilterState::new().with_search("homework"),
            &ProximityState::inactive(),
        );
        let ids: Vec<_> = results.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["asha", "meera"]);

        let results = searcher.search(
            &FilterState::new().with_search("leak"),
            &ProximityState::inactive(),
        );
        assert!(results.is_empty());
    }

    #[test]
    fn test_search_with_config_overrides_radius() {
        let searcher = ProviderSearcher::new(scenario_catalog());
        let proximity =
            ProximityState::active_at(servizo_catalog::test_data::BANGALORE_CENTRE);
        let default_radius = searcher.search(&FilterState::new(), &proximity);
        let wide = searcher.search_with_config(
            &FilterState::new(),
            &proximity,
            &crate::SearchConfigBuilder::new().radius_km(2.5).build(),
        );
        assert_eq!(default_radius.len(), 3);
        assert_eq!(wide.len(), 4);
        assert_eq!(wide.last().map(|p| p.id.as_str()), Some("asha"));
    }
}
