use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// Closed set of service categories a provider can be listed under.
///
/// The serialized form is the display name shown in the listing filters
/// (e.g. `"Home Maintenance"`), which is also what [`crate::Catalog`] JSON uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Plumbing,
    Electrical,
    Tutoring,
    Mechanic,
    #[serde(rename = "Home Maintenance")]
    HomeMaintenance,
    Gardening,
    Cleaning,
    Moving,
    #[serde(rename = "Pet Care")]
    PetCare,
    Beauty,
    Wellness,
    #[serde(rename = "Appliance Repair")]
    ApplianceRepair,
    #[serde(rename = "AC Repair")]
    AcRepair,
}

impl Category {
    /// Every category, in the order the listing filter presents them.
    pub const ALL: [Self; 13] = [
        Self::Plumbing,
        Self::Electrical,
        Self::Tutoring,
        Self::Mechanic,
        Self::HomeMaintenance,
        Self::Gardening,
        Self::Cleaning,
        Self::Moving,
        Self::PetCare,
        Self::Beauty,
        Self::Wellness,
        Self::ApplianceRepair,
        Self::AcRepair,
    ];

    /// Display name, identical to the serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plumbing => "Plumbing",
            Self::Electrical => "Electrical",
            Self::Tutoring => "Tutoring",
            Self::Mechanic => "Mechanic",
            Self::HomeMaintenance => "Home Maintenance",
            Self::Gardening => "Gardening",
            Self::Cleaning => "Cleaning",
            Self::Moving => "Moving",
            Self::PetCare => "Pet Care",
            Self::Beauty => "Beauty",
            Self::Wellness => "Wellness",
            Self::ApplianceRepair => "Appliance Repair",
            Self::AcRepair => "AC Repair",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| DataError::UnknownCategory(s.to_string()))
    }
}

/// Current booking availability of a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Availability {
    Available,
    Busy,
    Offline,
}

impl Availability {
    pub const ALL: [Self; 3] = [Self::Available, Self::Busy, Self::Offline];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Busy => "Busy",
            Self::Offline => "Offline",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Availability {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| DataError::UnknownAvailability(s.to_string()))
    }
}

/// A point on the globe in signed decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Both components are finite numbers.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

impl From<(f64, f64)> for Coordinates {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

/// A customer review shown on the provider profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub user: String,
    pub rating: f32,
    pub comment: String,
    /// Free-form label such as `"2 days ago"`.
    pub date: String,
}

/// An immutable catalog record for one local service provider.
///
/// Field names follow the catalog JSON (`camelCase`, with `lat`/`lng` for the
/// coordinate). Profile metadata fields default when absent so that minimal
/// records load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceProvider {
    pub id: String,
    pub name: String,
    pub category: Category,
    /// Neighbourhood label, e.g. `"Koramangala"`.
    pub location: String,
    pub availability: Availability,
    pub rating: f32,
    /// Display price tag, e.g. `"₹499"`.
    pub price: String,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lng")]
    pub longitude: f64,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub long_bio: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub reviews_count: u32,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub years_experience: u32,
    #[serde(default)]
    pub response_time: String,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub repeat_customers: u32,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub completed_jobs: u32,
}

impl ServiceProvider {
    #[must_use]
    pub const fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// Mean rating over the attached reviews, `None` when there are none.
    #[must_use]
    pub fn average_review_rating(&self) -> Option<f32> {
        if self.reviews.is_empty() {
            return None;
        }
        let total: f32 = self.reviews.iter().map(|r| r.rating).sum();
        Some(total / self.reviews.len() as f32)
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.availability == Availability::Available
    }
}

impl fmt::Display for ServiceProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ServiceProvider {{ id: \"{}\", name: \"{}\", category: {}, location: \"{}\", availability: {} }}",
            self.id, self.name, self.category, self.location, self.availability
        )
    }
}
