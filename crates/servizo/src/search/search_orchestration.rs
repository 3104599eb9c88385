//! Result assembly: filter, then (conditionally) proximity.
//!
//! Every call re-derives its output from the catalog and the inputs it is
//! given. Nothing is cached between calls, so identical inputs always produce
//! identical, identically ordered results.

use rayon::prelude::*;
use servizo_catalog::{Catalog, ServiceProvider};
use tracing::{debug, info, instrument};

use super::{
    filter::{FilterState, filter_providers, filter_providers_par},
    matcher::Matcher,
    proximity::{DEFAULT_RADIUS_KM, ProximityState, apply_proximity},
};
use crate::{SearchConfigBuilder, index::TagIndex};

/// Configuration for result assembly.
///
/// Use [`SearchConfigBuilder`] for presets and validated setters.
///
/// ```rust
/// use servizo::SearchConfig;
///
/// let config = SearchConfig::builder().radius_km(3.0).build();
/// assert_eq!(config.radius_km, 3.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Near-me neighbourhood radius in kilometres.
    pub radius_km: f64,
    /// Widen text queries with the category synonym index.
    pub tag_expansion: bool,
    /// Catalog size above which filtering runs on the rayon pool.
    pub parallel_threshold: usize,
}

impl SearchConfig {
    pub fn builder() -> SearchConfigBuilder {
        SearchConfigBuilder::default()
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            radius_km: DEFAULT_RADIUS_KM,
            tag_expansion: true,
            parallel_threshold: 512,
        }
    }
}

fn matcher_for<'t>(tags: &'t TagIndex, config: &SearchConfig) -> Matcher<'t> {
    if config.tag_expansion {
        Matcher::new(tags)
    } else {
        Matcher::literal()
    }
}

/// Ordered results for one set of inputs.
#[instrument(name = "Compute Results", level = "debug", skip_all, fields(catalog = catalog.len()))]
pub fn compute_results<'a>(
    catalog: &'a Catalog,
    tags: &TagIndex,
    filters: &FilterState,
    proximity: &ProximityState,
    config: &SearchConfig,
) -> Vec<&'a ServiceProvider> {
    let matcher = matcher_for(tags, config);

    let candidates = if catalog.len() > config.parallel_threshold {
        filter_providers_par(catalog.providers(), filters, &matcher)
    } else {
        filter_providers(catalog.providers(), filters, &matcher)
    };
    let filtered = candidates.len();

    let results = apply_proximity(candidates, proximity, config.radius_km);

    debug!(
        filtered,
        returned = results.len(),
        proximity = proximity.is_applied(),
        "Results computed"
    );
    results
}

/// [`compute_results`] for many input pairs at once, evaluated in parallel.
///
/// The outer vector has one entry per input, in input order.
#[instrument(name = "Bulk Compute Results", level = "info", skip_all, fields(num_inputs = inputs.len()))]
pub fn bulk_compute_results<'a>(
    catalog: &'a Catalog,
    tags: &TagIndex,
    inputs: &[(FilterState, ProximityState)],
    config: &SearchConfig,
) -> Vec<Vec<&'a ServiceProvider>> {
    let t_start = std::time::Instant::now();
    let matcher = matcher_for(tags, config);

    let results: Vec<Vec<&ServiceProvider>> = inputs
        .par_iter()
        .map(|(filters, proximity)| {
            let candidates = filter_providers(catalog.providers(), filters, &matcher);
            apply_proximity(candidates, proximity, config.radius_km)
        })
        .collect();

    info!(
        elapsed = ?t_start.elapsed(),
        total_results = results.iter().map(Vec::len).sum::<usize>(),
        "Bulk result computation finished"
    );
    results
}
