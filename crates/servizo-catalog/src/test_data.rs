//! Fixture builders for tests and examples.
//!
//! [`ProviderFixture`] fills every profile field with neutral defaults so a
//! test only states what it cares about. [`scenario_catalog`] is a small fixed
//! catalog around central Bangalore used across the workspace's tests.
use super::{Availability, Catalog, Category, Coordinates, Review, ServiceProvider};

/// Reference point used by the scenario fixtures (central Bangalore).
pub const BANGALORE_CENTRE: Coordinates = Coordinates::new(12.9716, 77.5946);

/// Builder for a [`ServiceProvider`] with neutral defaults.
#[derive(Debug, Clone)]
pub struct ProviderFixture {
    provider: ServiceProvider,
}

impl ProviderFixture {
    #[must_use]
    pub fn new(id: &str, name: &str, category: Category) -> Self {
        Self {
            provider: ServiceProvider {
                id: id.to_string(),
                name: name.to_string(),
                category,
                location: String::new(),
                availability: Availability::Available,
                rating: 4.5,
                price: "₹499".to_string(),
                latitude: BANGALORE_CENTRE.latitude,
                longitude: BANGALORE_CENTRE.longitude,
                skills: Vec::new(),
                description: String::new(),
                long_bio: String::new(),
                avatar: String::new(),
                reviews_count: 0,
                reviews: Vec::new(),
                years_experience: 1,
                response_time: "15 mins".to_string(),
                verified: false,
                repeat_customers: 0,
                certifications: Vec::new(),
                equipment: Vec::new(),
                completed_jobs: 0,
            },
        }
    }

    #[must_use]
    pub fn location(mut self, location: &str) -> Self {
        self.provider.location = location.to_string();
        self
    }

    #[must_use]
    pub const fn availability(mut self, availability: Availability) -> Self {
        self.provider.availability = availability;
        self
    }

    #[must_use]
    pub fn skills(mut self, skills: &[&str]) -> Self {
        self.provider.skills = skills.iter().map(ToString::to_string).collect();
        self
    }

    #[must_use]
    pub const fn at(mut self, latitude: f64, longitude: f64) -> Self {
        self.provider.latitude = latitude;
        self.provider.longitude = longitude;
        self
    }

    #[must_use]
    pub fn price(mut self, price: &str) -> Self {
        self.provider.price = price.to_string();
        self
    }

    #[must_use]
    pub const fn rating(mut self, rating: f32) -> Self {
        self.provider.rating = rating;
        self
    }

    #[must_use]
    pub fn review(mut self, user: &str, rating: f32, comment: &str) -> Self {
        let id = format!("{}-r{}", self.provider.id, self.provider.reviews.len() + 1);
        self.provider.reviews.push(Review {
            id,
            user: user.to_string(),
            rating,
            comment: comment.to_string(),
            date: "1 week ago".to_string(),
        });
        self.provider.reviews_count = self.provider.reviews.len() as u32;
        self
    }

    #[must_use]
    pub fn build(self) -> ServiceProvider {
        self.provider
    }
}

/// Latitude offset, in degrees, that puts a point `km` kilometres due north of
/// another on a 6371 km sphere.
#[must_use]
pub fn degrees_north(km: f64) -> f64 {
    (km / 6371.0).to_degrees()
}

/// Small deterministic catalog used by the workspace tests.
///
/// | id | name | category | location | availability | distance from centre |
/// |----|------|----------|----------|--------------|----------------------|
/// | `rakesh` | Rakesh Kumar | Plumbing | Koramangala | Available | 0 km |
/// | `asha` | Asha Menon | Tutoring | Indiranagar | Available | 2.0 km north |
/// | `vikram` | Vikram Singh | Electrical | Koramangala | Busy | 1.0 km north |
/// | `meera` | Meera Iyer | Tutoring | Jayanagar | Offline | 0.5 km north |
/// | `suresh` | Suresh Auto Works | Mechanic | Whitefield | Available | 12 km north |
#[must_use]
pub fn scenario_catalog() -> Catalog {
    let centre = BANGALORE_CENTRE;
    let north = |km: f64| centre.latitude + degrees_north(km);

    Catalog::from_providers(vec![
        ProviderFixture::new("rakesh", "Rakesh Kumar", Category::Plumbing)
            .location("Koramangala")
            .skills(&["Pipe Fitting", "Bathroom Fittings"])
            .at(centre.latitude, centre.longitude)
            .review("Anil", 5.0, "Fixed the kitchen sink in minutes")
            .build(),
        ProviderFixture::new("asha", "Asha Menon", Category::Tutoring)
            .location("Indiranagar")
            .skills(&["Mathematics", "Physics"])
            .at(north(2.0), centre.longitude)
            .price("₹799")
            .build(),
        ProviderFixture::new("vikram", "Vikram Singh", Category::Electrical)
            .location("Koramangala")
            .availability(Availability::Busy)
            .skills(&["Wiring", "Inverter Installation"])
            .at(north(1.0), centre.longitude)
            .build(),
        ProviderFixture::new("meera", "Meera Iyer", Category::Tutoring)
            .location("Jayanagar")
            .availability(Availability::Offline)
            .skills(&["English Literature", "Spoken English"])
            .at(north(0.5), centre.longitude)
            .build(),
        ProviderFixture::new("suresh", "Suresh Auto Works", Category::Mechanic)
            .location("Whitefield")
            .skills(&["Two Wheeler Service", "Engine Overhaul"])
            .at(north(12.0), centre.longitude)
            .build(),
    ])
    .expect("scenario catalog fixtures are valid")
}
