//! Servizo - Local Service Provider Matching Library
//!
//! Servizo filters and ranks a catalog of local service providers (plumbers,
//! tutors, electricians and so on) for a listing view. A free-text query is
//! widened through a per-category synonym index, structured filters narrow the
//! list, and an optional "near me" mode keeps only providers within a fixed
//! great-circle radius of the user, nearest first.
//!
//! # Quick Start
//!
//! ```rust
//! use servizo::{Category, FilterState, ProviderSearcher, ProximityState};
//! use servizo::catalog::test_data::BANGALORE_CENTRE;
//!
//! let searcher = ProviderSearcher::new_embedded();
//!
//! // "leak" is a plumbing synonym, so plumbers match without saying "plumber"
//! let filters = FilterState::new().with_search("leak");
//! let results = searcher.search(&filters, &ProximityState::inactive());
//! assert!(results.iter().all(|p| p.category == Category::Plumbing));
//!
//! // Near-me: within 1.5 km of the user, nearest first
//! let nearby = searcher.search(
//!     &FilterState::new(),
//!     &ProximityState::active_at(BANGALORE_CENTRE),
//! );
//! for provider in &nearby {
//!     println!("{} ({})", provider.name, provider.location);
//! }
//! ```
//!
//! For an interactive listing with toggles, selection and one-shot location
//! acquisition, drive a [`Session`].
//!
//! # Features
//!
//! - **Synonym Matching**: Queries match names, categories, skills, locations
//!   and category tags
//! - **Structured Filters**: Exact category and availability constraints
//! - **Proximity Ranking**: Haversine distance with a stable nearest-first sort
//! - **Batch Processing**: Evaluate many listing inputs in parallel
//! - **Embedded Catalog**: A sample catalog ships with the library, or point
//!   `SERVIZO_CATALOG` at your own JSON file
use once_cell::sync::OnceCell;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

mod config;
mod core;
pub mod error;
pub mod geo;
pub mod index;
pub mod search;
pub mod session;

pub use crate::core::{
    Catalog, ProviderSearcher, ProviderSearcherBuilder, SearchResults, SearchResultsBatch,
};

pub use config::SearchConfigBuilder;
pub use geo::{EARTH_RADIUS_KM, distance_km, haversine_km};
pub use index::TagIndex;
pub use search::{
    DEFAULT_RADIUS_KM, FilterState, MatchReason, NearbyProvider, ProximityState, SearchConfig,
    SearchError,
};
pub use servizo_catalog as catalog;
pub use servizo_catalog::{Availability, Category, Coordinates, Review, ServiceProvider};
pub use session::{
    FixedLocation, GeolocationError, GeolocationProvider, LocationRequest, MapMarker,
    ProximityPhase, Session,
};

static LOGGER_INIT: OnceCell<()> = OnceCell::new();

/// Initialize logging for the Servizo library.
///
/// Sets up a `tracing` subscriber that honours `RUST_LOG` and otherwise logs
/// at `level`. Span close events carry timings for the instrumented search
/// operations. Safe to call more than once; only the first call installs the
/// subscriber.
///
/// # Examples
///
/// ```rust
/// use servizo::init_logging;
/// use tracing::Level;
///
/// init_logging(Level::INFO)?;
/// # Ok::<(), servizo::error::ServizoError>(())
/// ```
pub fn init_logging(level: impl Into<LevelFilter>) -> Result<&'static (), error::ServizoError> {
    LOGGER_INIT.get_or_try_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(level.into().to_string()))?
            .add_directive("rayon_core=warn".parse()?);

        // Another subscriber may already be installed by the host application.
        let _ = tracing_subscriber::fmt::fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .try_init();
        Ok(())
    })
}
