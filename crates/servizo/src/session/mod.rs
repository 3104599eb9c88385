//! Interactive listing session.
//!
//! A [`Session`] owns the mutable listing inputs ([`FilterState`] and
//! [`ProximityState`]) and the near-me location acquisition, and re-derives
//! results from them on demand. Input handlers are expected to be serialized
//! (one UI event at a time), so the session takes `&mut self` and holds no
//! locks.
//!
//! # Near-me acquisition
//!
//! ```text
//! Inactive --set_near_me(true), no fix--> Requesting --fix--> Active
//!                                              |
//!                                              +--failure--> Inactive
//! ```
//!
//! At most one request is outstanding, and once a fix is known it is kept for
//! the rest of the session, so toggling near-me back on never asks again.

use servizo_catalog::{Availability, Category, Coordinates, ServiceProvider};
use tokio::sync::oneshot::{self, error::TryRecvError};
use tracing::{debug, info, warn};

use crate::{
    core::ProviderSearcher,
    search::{FilterState, ProximityState, SearchError},
};

mod geolocation;

pub use geolocation::{
    FixedLocation, GeolocationError, GeolocationProvider, LocationRequest, LocationResult,
};

/// Where near-me mode is in its acquisition lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProximityPhase {
    Inactive,
    Requesting,
    Active,
}

/// Per-result data handed to the map layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapMarker<'a> {
    pub id: &'a str,
    pub coordinates: Coordinates,
    pub price: &'a str,
    pub availability: Availability,
    pub selected: bool,
}

#[derive(Debug)]
pub struct Session {
    searcher: ProviderSearcher,
    filters: FilterState,
    proximity: ProximityState,
    pending: Option<oneshot::Receiver<LocationResult>>,
    selected: Option<String>,
}

impl Session {
    #[must_use]
    pub fn new(searcher: ProviderSearcher) -> Self {
        Self {
            searcher,
            filters: FilterState::default(),
            proximity: ProximityState::default(),
            pending: None,
            selected: None,
        }
    }

    pub fn searcher(&self) -> &ProviderSearcher {
        &self.searcher
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn proximity(&self) -> &ProximityState {
        &self.proximity
    }

    // === Filter input ===

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filters.search = search.into();
    }

    /// Exact category display name; empty clears the constraint.
    pub fn set_category(&mut self, category: impl Into<String>) {
        self.filters.category = category.into();
    }

    /// Select `category`, or clear it if it is already selected.
    pub fn toggle_category(&mut self, category: Category) {
        toggle(&mut self.filters.category, category.as_str());
    }

    /// Exact availability name; empty clears the constraint.
    pub fn set_availability(&mut self, availability: impl Into<String>) {
        self.filters.availability = availability.into();
    }

    /// Select `availability`, or clear it if it is already selected.
    pub fn toggle_availability(&mut self, availability: Availability) {
        toggle(&mut self.filters.availability, availability.as_str());
    }

    pub fn set_location(&mut self, location: impl Into<String>) {
        self.filters.location = location.into();
    }

    pub fn replace_filters(&mut self, filters: FilterState) {
        self.filters = filters;
    }

    pub fn reset_filters(&mut self) {
        self.filters = FilterState::default();
    }

    // === Near-me ===

    /// Turn near-me on or off.
    ///
    /// Returns a request to fulfil when turning on needs a position: no fix is
    /// known and none is already being fetched. Otherwise returns `None`.
    pub fn set_near_me(&mut self, active: bool) -> Option<LocationRequest> {
        self.proximity.active = active;

        if !active || self.proximity.coordinates.is_some() || self.pending.is_some() {
            return None;
        }

        let (request, rx) = LocationRequest::channel();
        self.pending = Some(rx);
        debug!("Near-me activated without a fix, requesting location");
        Some(request)
    }

    pub fn toggle_near_me(&mut self) -> Option<LocationRequest> {
        self.set_near_me(!self.proximity.active)
    }

    #[must_use]
    pub fn proximity_phase(&self) -> ProximityPhase {
        if !self.proximity.active {
            ProximityPhase::Inactive
        } else if self.proximity.coordinates.is_some() {
            ProximityPhase::Active
        } else {
            ProximityPhase::Requesting
        }
    }

    #[must_use]
    pub fn is_requesting_location(&self) -> bool {
        self.pending.is_some()
    }

    /// Apply a delivered location outcome, if one has arrived.
    ///
    /// Returns `true` when an outcome was applied.
    pub fn poll_location(&mut self) -> bool {
        let Some(rx) = self.pending.as_mut() else {
            return false;
        };
        let outcome = match rx.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Closed) => Err(GeolocationError::PositionUnavailable),
        };
        self.pending = None;
        self.apply_location(outcome);
        true
    }

    /// Wait for the outstanding request, if any, and apply its outcome.
    pub async fn await_location(&mut self) -> bool {
        let Some(rx) = self.pending.take() else {
            return false;
        };
        let outcome = rx
            .await
            .unwrap_or(Err(GeolocationError::PositionUnavailable));
        self.apply_location(outcome);
        true
    }

    /// Turn near-me on and, if a position is needed, obtain it from
    /// `provider`.
    pub async fn acquire_location<P: GeolocationProvider + ?Sized>(
        &mut self,
        provider: &P,
    ) -> ProximityPhase {
        if let Some(request) = self.set_near_me(true) {
            request.resolve(provider.locate().await);
        }
        self.await_location().await;
        self.proximity_phase()
    }

    fn apply_location(&mut self, outcome: LocationResult) {
        match outcome {
            Ok(coordinates) => {
                info!(%coordinates, "Location acquired");
                self.proximity.coordinates = Some(coordinates);
            }
            Err(e) => {
                warn!(error = %e, "Location unavailable, turning near-me off");
                self.proximity.active = false;
            }
        }
    }

    // === Outputs ===

    /// Results for the current inputs, recomputed on every call.
    pub fn results(&self) -> Vec<&ServiceProvider> {
        self.searcher.search(&self.filters, &self.proximity)
    }

    pub fn result_count(&self) -> usize {
        self.results().len()
    }

    pub fn map_markers(&self) -> Vec<MapMarker<'_>> {
        self.results()
            .into_iter()
            .map(|p| MapMarker {
                id: &p.id,
                coordinates: p.coordinates(),
                price: &p.price,
                availability: p.availability,
                selected: self.selected.as_deref() == Some(p.id.as_str()),
            })
            .collect()
    }

    /// Distance shown on a result card while near-me is on.
    pub fn distance_to(&self, provider: &ServiceProvider) -> Option<f64> {
        if self.proximity.active {
            self.proximity.distance_to(provider)
        } else {
            None
        }
    }

    /// Choose a provider (from the list or a map marker).
    pub fn select(&mut self, id: &str) -> Result<&ServiceProvider, SearchError> {
        let provider = self.searcher.provider(id)?;
        debug!(id, name = %provider.name, "Provider selected");
        self.selected = Some(provider.id.clone());
        Ok(provider)
    }

    pub fn selected(&self) -> Option<&ServiceProvider> {
        self.selected
            .as_deref()
            .and_then(|id| self.searcher.catalog().get(id))
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ProviderSearcher::default())
    }
}

fn toggle(slot: &mut String, value: &str) {
    if slot == value {
        slot.clear();
    } else {
        *slot = value.to_string();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use servizo_catalog::test_data::{BANGALORE_CENTRE, scenario_catalog};

    use super::*;

    fn session() -> Session {
        Session::new(ProviderSearcher::new(scenario_catalog()))
    }

    fn ids(session: &Session) -> Vec<String> {
        session.results().iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_new_session_shows_everything() {
        let session = session();
        assert_eq!(session.result_count(), 5);
        assert_eq!(session.proximity_phase(), ProximityPhase::Inactive);
    }

    #[test]
    fn test_filter_mutations() {
        let mut session = session();
        session.set_search("asha");
        assert_eq!(ids(&session), ["asha"]);

        session.reset_filters();
        session.toggle_category(Category::Tutoring);
        assert_eq!(ids(&session), ["asha", "meera"]);
        session.toggle_category(Category::Tutoring);
        assert!(session.filters().category.is_empty());

        session.toggle_availability(Availability::Busy);
        assert_eq!(ids(&session), ["vikram"]);
        session.toggle_availability(Availability::Offline);
        assert_eq!(ids(&session), ["meera"]);
        session.toggle_availability(Availability::Offline);
        assert_eq!(session.result_count(), 5);

        session.set_category("Plumbing");
        session.set_location("Anywhere");
        assert_eq!(ids(&session), ["rakesh"]);

        session.replace_filters(FilterState::new().with_search("leak"));
        assert_eq!(ids(&session), ["rakesh"]);
    }

    #[test]
    fn test_near_me_requests_once() {
        let mut session = session();
        let request = session.set_near_me(true);
        assert!(request.is_some());
        assert_eq!(session.proximity_phase(), ProximityPhase::Requesting);

        // Still pending: no duplicate request, whether toggled or set again.
        assert!(session.set_near_me(true).is_none());
        assert!(session.toggle_near_me().is_none());
        assert!(session.toggle_near_me().is_none());
        assert!(session.is_requesting_location());
    }

    #[test]
    fn test_requesting_is_noop_for_results() {
        let mut session = session();
        let _request = session.set_near_me(true);
        assert_eq!(session.result_count(), 5);
        assert!(!session.poll_location());
    }

    #[test]
    fn test_fix_activates_radius() {
        let mut session = session();
        let request = session.set_near_me(true).unwrap();
        assert!(request.succeed(BANGALORE_CENTRE));
        assert!(session.poll_location());

        assert_eq!(session.proximity_phase(), ProximityPhase::Active);
        assert_eq!(ids(&session), ["rakesh", "meera", "vikram"]);
    }

    #[test]
    fn test_fix_is_retained_across_toggles() {
        let mut session = session();
        session.set_near_me(true).unwrap().succeed(BANGALORE_CENTRE);
        session.poll_location();

        assert!(session.toggle_near_me().is_none());
        assert_eq!(session.proximity_phase(), ProximityPhase::Inactive);
        assert_eq!(session.result_count(), 5);

        assert!(session.toggle_near_me().is_none());
        assert_eq!(session.proximity_phase(), ProximityPhase::Active);
        assert_eq!(session.result_count(), 3);
    }

    #[test]
    fn test_failure_reverts_to_inactive() {
        let mut session = session();
        let request = session.set_near_me(true).unwrap();
        assert!(request.fail(GeolocationError::PermissionDenied));
        assert!(session.poll_location());

        assert_eq!(session.proximity_phase(), ProximityPhase::Inactive);
        assert!(!session.proximity().active);
        assert_eq!(session.result_count(), 5);

        // Turning it on again is a fresh attempt.
        assert!(session.set_near_me(true).is_some());
    }

    #[test]
    fn test_dropped_request_counts_as_failure() {
        let mut session = session();
        drop(session.set_near_me(true));
        assert!(session.poll_location());
        assert_eq!(session.proximity_phase(), ProximityPhase::Inactive);
    }

    #[test]
    fn test_fix_arriving_after_toggle_off_is_kept() {
        let mut session = session();
        let request = session.set_near_me(true).unwrap();
        assert!(session.set_near_me(false).is_none());
        request.succeed(BANGALORE_CENTRE);
        session.poll_location();

        assert_eq!(session.proximity_phase(), ProximityPhase::Inactive);
        assert_eq!(session.proximity().coordinates, Some(BANGALORE_CENTRE));
        assert!(session.set_near_me(true).is_none());
        assert_eq!(session.proximity_phase(), ProximityPhase::Active);
    }

    #[test]
    fn test_delivery_after_teardown_is_discarded() {
        let mut session = session();
        let request = session.set_near_me(true).unwrap();
        drop(session);
        assert!(request.is_abandoned());
        assert!(!request.succeed(BANGALORE_CENTRE));
    }

    #[test]
    fn test_distance_label_only_in_near_me_mode() {
        let mut session = session();
        session.set_near_me(true).unwrap().succeed(BANGALORE_CENTRE);
        session.poll_location();

        let vikram = session.searcher().provider("vikram").unwrap().clone();
        let d = session.distance_to(&vikram).unwrap();
        assert!((d - 1.0).abs() < 1e-9);

        session.set_near_me(false);
        assert_eq!(session.distance_to(&vikram), None);
    }

    #[test]
    fn test_select_and_markers() {
        let mut session = session();
        session.set_search("koramangala");

        let chosen = session.select("vikram").unwrap();
        assert_eq!(chosen.name, "Vikram Singh");
        assert_eq!(session.selected().map(|p| p.id.as_str()), Some("vikram"));

        let markers = session.map_markers();
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].id, "rakesh");
        assert!(!markers[0].selected);
        assert!(markers[1].selected);
        assert_eq!(markers[1].availability, Availability::Busy);
        assert_eq!(markers[1].price, "₹499");

        assert!(session.select("nobody").is_err());
        assert_eq!(session.selected().map(|p| p.id.as_str()), Some("vikram"));
        session.clear_selection();
        assert!(session.selected().is_none());
    }

    #[tokio::test]
    async fn test_acquire_location_with_provider() {
        let mut session = session();
        let phase = session
            .acquire_location(&FixedLocation(Ok(BANGALORE_CENTRE)))
            .await;
        assert_eq!(phase, ProximityPhase::Active);
        assert_eq!(session.result_count(), 3);

        // Already have a fix: the provider is not consulted again.
        let phase = session
            .acquire_location(&FixedLocation(Err(GeolocationError::Timeout)))
            .await;
        assert_eq!(phase, ProximityPhase::Active);
    }

    #[tokio::test]
    async fn test_acquire_location_failure() {
        let mut session = session();
        let phase = session
            .acquire_location(&FixedLocation(Err(GeolocationError::Timeout)))
            .await;
        assert_eq!(phase, ProximityPhase::Inactive);
        assert_eq!(session.result_count(), 5);
    }

    #[tokio::test]
    async fn test_await_location_from_background_task() {
        let mut session = session();
        let request = session.set_near_me(true).unwrap();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            request.succeed(BANGALORE_CENTRE)
        });

        assert!(session.await_location().await);
        assert!(handle.await.unwrap());
        assert_eq!(session.proximity_phase(), ProximityPhase::Active);
        assert!(!session.await_location().await);
    }
}
