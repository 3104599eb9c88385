//! Category synonym index used for tag expansion.
//!
//! Each category maps to a set of lowercase keywords that customers type when
//! they describe a job rather than name a trade ("leak" rather than
//! "Plumbing"). The matcher widens a query's match surface with these tags.
//! A category without an entry is valid and simply gets no expansion.

use ahash::AHashMap as HashMap;
use itertools::Itertools;
use once_cell::sync::Lazy;
use servizo_catalog::Category;
use tracing::debug;

/// Built-in synonym table.
pub const DEFAULT_CATEGORY_TAGS: &[(Category, &[&str])] = &[
    (
        Category::Plumbing,
        &[
            "plumber", "pipe", "tap", "leak", "drain", "toilet", "bathroom", "sink", "water",
            "faucet",
        ],
    ),
    (
        Category::Electrical,
        &[
            "electrician",
            "wire",
            "light",
            "fan",
            "switch",
            "socket",
            "power",
            "fuse",
            "ups",
            "inverter",
            "voltage",
        ],
    ),
    (
        Category::Tutoring,
        &[
            "teacher",
            "tutor",
            "class",
            "study",
            "education",
            "math",
            "science",
            "subject",
            "professor",
        ],
    ),
    (
        Category::Mechanic,
        &[
            "car", "bike", "auto", "vehicle", "engine", "brake", "repair", "puncture", "tyre",
            "tire",
        ],
    ),
    (
        Category::HomeMaintenance,
        &[
            "handyman",
            "painter",
            "carpenter",
            "wall",
            "fixing",
            "furniture",
            "drill",
            "wood",
        ],
    ),
    (
        Category::Gardening,
        &[
            "garden",
            "plant",
            "lawn",
            "grass",
            "pot",
            "landscape",
            "seeds",
            "manure",
        ],
    ),
    (
        Category::Cleaning,
        &[
            "cleaner",
            "housekeeping",
            "maid",
            "sofa",
            "kitchen",
            "floor",
            "dust",
            "broom",
            "vacuum",
        ],
    ),
    (
        Category::Moving,
        &[
            "packer",
            "mover",
            "shift",
            "truck",
            "transport",
            "delivery",
            "luggage",
        ],
    ),
    (
        Category::PetCare,
        &["dog", "cat", "vet", "grooming", "walking", "pet", "animal"],
    ),
    (
        Category::Beauty,
        &[
            "salon",
            "makeup",
            "facial",
            "hair",
            "waxing",
            "threading",
            "pedicure",
            "manicure",
            "bride",
            "groom",
        ],
    ),
    (
        Category::Wellness,
        &[
            "yoga",
            "massage",
            "spa",
            "meditation",
            "trainer",
            "health",
            "fitness",
            "workout",
            "diet",
        ],
    ),
    (
        Category::ApplianceRepair,
        &[
            "fridge",
            "refrigerator",
            "washing machine",
            "microwave",
            "oven",
            "tv",
            "television",
        ],
    ),
    (
        Category::AcRepair,
        &[
            "air conditioner",
            "cooling",
            "hvac",
            "gas refill",
            "service",
            "compressor",
        ],
    ),
];

static DEFAULT_TAG_INDEX: Lazy<TagIndex> =
    Lazy::new(|| TagIndex::from_table(DEFAULT_CATEGORY_TAGS));

/// Immutable category → synonym lookup.
///
/// Tags are stored lowercased, trimmed and de-duplicated in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagIndex {
    tags: HashMap<Category, Box<[String]>>,
}

impl TagIndex {
    /// An index with no entries; every category degrades to literal matching.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Shared instance built from [`DEFAULT_CATEGORY_TAGS`].
    #[must_use]
    pub fn default_index() -> &'static Self {
        &DEFAULT_TAG_INDEX
    }

    /// Build from a static table. Repeated categories have their tags merged.
    #[must_use]
    pub fn from_table(table: &[(Category, &[&str])]) -> Self {
        table
            .iter()
            .flat_map(|(category, tags)| tags.iter().map(move |tag| (*category, *tag)))
            .collect()
    }

    /// Synonyms for `category`, or an empty slice if there is no entry.
    #[must_use]
    pub fn tags_for(&self, category: Category) -> &[String] {
        self.tags
            .get(&category)
            .map(|tags| &tags[..])
            .unwrap_or_default()
    }

    #[must_use]
    pub fn contains_category(&self, category: Category) -> bool {
        self.tags.contains_key(&category)
    }

    /// Categories in the closed set that have no synonym entry.
    #[must_use]
    pub fn missing_categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| !self.contains_category(*c))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<(Category, S)> for TagIndex {
    fn from_iter<I: IntoIterator<Item = (Category, S)>>(iter: I) -> Self {
        let tags = iter
            .into_iter()
            .map(|(category, tag)| (category, tag.as_ref().trim().to_lowercase()))
            .filter(|(_, tag)| !tag.is_empty())
            .into_group_map()
            .into_iter()
            .map(|(category, tags)| {
                let tags: Box<[String]> = tags.into_iter().unique().collect();
                (category, tags)
            })
            .collect::<HashMap<_, _>>();

        let index = Self { tags };
        let missing = index.missing_categories();
        if !missing.is_empty() {
            debug!(
                missing = %missing.iter().join(", "),
                "Tag index has categories without synonyms"
            );
        }
        index
    }
}
