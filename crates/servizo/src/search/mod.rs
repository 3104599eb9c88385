//! Candidate matching and ranking.
//!
//! The pipeline is: [`filter_providers`] (text matcher AND category AND
//! availability, catalog order kept) followed, when near-me mode has a
//! coordinate, by [`apply_proximity`] (radius cut and stable distance sort).
//! [`compute_results`] composes the two.

pub use error::SearchError;
mod filter;
mod matcher;
mod proximity;
mod search_orchestration;

pub use filter::{FilterState, filter_providers, filter_providers_par};
pub use matcher::{MatchReason, Matcher, normalize_query};
pub use proximity::{DEFAULT_RADIUS_KM, NearbyProvider, ProximityState, apply_proximity, rank_within_radius};
pub use search_orchestration::{SearchConfig, bulk_compute_results, compute_results};

mod error {
    use thiserror::Error;

    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum SearchError {
        #[error("No provider with id {0} in the catalog")]
        UnknownProvider(String),
    }
    pub type Result<T> = std::result::Result<T, SearchError>;
}
pub(crate) use error::Result;
