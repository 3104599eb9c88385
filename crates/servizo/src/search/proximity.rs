use servizo_catalog::{Coordinates, ServiceProvider};

use crate::geo::haversine_km;

/// Neighbourhood radius used by near-me mode.
pub const DEFAULT_RADIUS_KM: f64 = 1.5;

/// Near-me flag plus the user's coordinate, once one is known.
///
/// The stage only does anything when both are set: an active flag without a
/// coordinate leaves the candidates untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProximityState {
    pub active: bool,
    pub coordinates: Option<Coordinates>,
}

impl ProximityState {
    #[must_use]
    pub const fn inactive() -> Self {
        Self {
            active: false,
            coordinates: None,
        }
    }

    /// Near-me requested but no fix yet.
    #[must_use]
    pub const fn awaiting_fix() -> Self {
        Self {
            active: true,
            coordinates: None,
        }
    }

    #[must_use]
    pub const fn active_at(coordinates: Coordinates) -> Self {
        Self {
            active: true,
            coordinates: Some(coordinates),
        }
    }

    /// The point to rank around, present only when the stage is live.
    #[must_use]
    pub const fn centre(&self) -> Option<Coordinates> {
        if self.active { self.coordinates } else { None }
    }

    #[must_use]
    pub const fn is_applied(&self) -> bool {
        self.centre().is_some()
    }

    /// Distance from the known user coordinate, whether or not near-me is on.
    #[must_use]
    pub fn distance_to(&self, provider: &ServiceProvider) -> Option<f64> {
        self.coordinates
            .map(|c| haversine_km(c, provider.coordinates()))
    }
}

/// A provider inside the radius together with its distance from the centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyProvider<'a> {
    pub provider: &'a ServiceProvider,
    pub distance_km: f64,
}

/// Candidates within `radius_km` of `centre`, nearest first.
///
/// Each distance is computed once and used for both the cut and the sort. The
/// sort is stable, so equal distances keep their incoming order.
pub fn rank_within_radius<'a>(
    candidates: impl IntoIterator<Item = &'a ServiceProvider>,
    centre: Coordinates,
    radius_km: f64,
) -> Vec<NearbyProvider<'a>> {
    let mut nearby: Vec<_> = candidates
        .into_iter()
        .map(|provider| NearbyProvider {
            provider,
            distance_km: haversine_km(centre, provider.coordinates()),
        })
        .filter(|n| n.distance_km <= radius_km)
        .collect();
    nearby.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    nearby
}

/// Radius cut and distance sort when `state` is live; otherwise `candidates`
/// is returned as given.
pub fn apply_proximity<'a>(
    candidates: Vec<&'a ServiceProvider>,
    state: &ProximityState,
    radius_km: f64,
) -> Vec<&'a ServiceProvider> {
    match state.centre() {
        Some(centre) => rank_within_radius(candidates, centre, radius_km)
            .into_iter()
            .map(|n| n.provider)
            .collect(),
        None => candidates,
    }
}
