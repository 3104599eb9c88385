//! Free-text matching of a query against one provider record.
//!
//! Matching is a union of substring checks and is intentionally permissive:
//! results are scanned visually, so recall wins over precision.

use servizo_catalog::ServiceProvider;

use crate::index::TagIndex;

/// Lowercase and trim raw user input into the form [`Matcher`] expects.
#[must_use]
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Which rule accepted a provider for a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchReason {
    /// The query was empty, so everything matches.
    EmptyQuery,
    Name,
    /// Category contains the query, or the query contains the category.
    Category,
    Skill(String),
    Location,
    /// A synonym of the provider's category overlaps the query.
    Tag(String),
}

/// Decides whether a provider matches a normalized query.
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'a> {
    tags: Option<&'a TagIndex>,
}

impl<'a> Matcher<'a> {
    /// Matcher that also expands queries through `tags`.
    #[must_use]
    pub const fn new(tags: &'a TagIndex) -> Self {
        Self { tags: Some(tags) }
    }

    /// Matcher restricted to the provider's own fields.
    #[must_use]
    pub const fn literal() -> Self {
        Self { tags: None }
    }

    #[must_use]
    pub const fn expands_tags(&self) -> bool {
        self.tags.is_some()
    }

    /// `query` must already be lowercased and trimmed (see [`normalize_query`]).
    #[must_use]
    pub fn matches(&self, provider: &ServiceProvider, query: &str) -> bool {
        self.explain(provider, query).is_some()
    }

    /// First rule that accepts `provider`, checked in the order name, category,
    /// skills, location, tags.
    #[must_use]
    pub fn explain(&self, provider: &ServiceProvider, query: &str) -> Option<MatchReason> {
        if query.is_empty() {
            return Some(MatchReason::EmptyQuery);
        }

        if provider.name.to_lowercase().contains(query) {
            return Some(MatchReason::Name);
        }

        let category = provider.category.as_str().to_lowercase();
        if category.contains(query) || query.contains(category.as_str()) {
            return Some(MatchReason::Category);
        }

        if let Some(skill) = provider
            .skills
            .iter()
            .find(|s| s.to_lowercase().contains(query))
        {
            return Some(MatchReason::Skill(skill.clone()));
        }

        if provider.location.to_lowercase().contains(query) {
            return Some(MatchReason::Location);
        }

        self.tags?
            .tags_for(provider.category)
            .iter()
            .find(|tag| tag.contains(query) || query.contains(tag.as_str()))
            .map(|tag| MatchReason::Tag(tag.clone()))
    }
}
