use rayon::prelude::*;
use servizo_catalog::{Availability, Category, ServiceProvider};

use super::matcher::{Matcher, normalize_query};

/// The listing's filter inputs.
///
/// Every field is always present; an empty string means "no constraint".
/// `category` and `availability` hold display names (`"Home Maintenance"`,
/// `"Busy"`) and are compared exactly. `location` is carried for the listing
/// UI but does not take part in matching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterState {
    pub search: String,
    pub category: String,
    pub location: String,
    pub availability: String,
}

impl FilterState {
    /// All fields empty: matches the whole catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category.as_str().to_string();
        self
    }

    #[must_use]
    pub fn with_availability(mut self, availability: Availability) -> Self {
        self.availability = availability.as_str().to_string();
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// True when no field constrains the result.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty()
            && self.category.is_empty()
            && self.location.is_empty()
            && self.availability.is_empty()
    }

    /// The search text as the matcher consumes it.
    #[must_use]
    pub fn normalized_search(&self) -> String {
        normalize_query(&self.search)
    }

    /// Whether `provider` passes all three predicates for an already
    /// normalized `query`.
    #[must_use]
    pub fn retains(&self, provider: &ServiceProvider, query: &str, matcher: &Matcher<'_>) -> bool {
        (self.category.is_empty() || provider.category.as_str() == self.category)
            && (self.availability.is_empty() || provider.availability.as_str() == self.availability)
            && matcher.matches(provider, query)
    }
}

/// Providers passing `filters`, in their original order.
pub fn filter_providers<'a>(
    providers: &'a [ServiceProvider],
    filters: &FilterState,
    matcher: &Matcher<'_>,
) -> Vec<&'a ServiceProvider> {
    let query = filters.normalized_search();
    providers
        .iter()
        .filter(|p| filters.retains(p, &query, matcher))
        .collect()
}

/// [`filter_providers`] evaluated across the rayon pool; output order is the
/// same as the sequential version.
pub fn filter_providers_par<'a>(
    providers: &'a [ServiceProvider],
    filters: &FilterState,
    matcher: &Matcher<'_>,
) -> Vec<&'a ServiceProvider> {
    let query = filters.normalized_search();
    providers
        .par_iter()
        .filter(|p| filters.retains(p, &query, matcher))
        .collect()
}
