//! Integration tests for Servizo provider matching
//!
//! These tests run against the public API only. Exact-order assertions use the
//! small scenario catalog from `servizo::catalog::test_data`; smoke tests run
//! against the embedded sample catalog.

use servizo::{
    Availability, Category, FilterState, FixedLocation, GeolocationError, MatchReason,
    ProviderSearcher, ProximityPhase, ProximityState, SearchConfigBuilder, Session, TagIndex,
    catalog::{
        Catalog,
        test_data::{BANGALORE_CENTRE, ProviderFixture, degrees_north, scenario_catalog},
    },
};

fn setup_test_env() {
    let _ = servizo::init_logging(tracing::Level::WARN);
}

fn ids(providers: &[&servizo::ServiceProvider]) -> Vec<String> {
    providers.iter().map(|p| p.id.clone()).collect()
}

#[test]
fn test_full_workflow() {
    setup_test_env();

    let searcher = ProviderSearcher::new_embedded();
    let everything = searcher.search(&FilterState::new(), &ProximityState::inactive());
    assert_eq!(everything.len(), searcher.catalog().len());

    // 1. Synonym expansion
    let leak = searcher.search(
        &FilterState::new().with_search("leak"),
        &ProximityState::inactive(),
    );
    assert_eq!(ids(&leak), ["sp-001", "sp-014"]);

    // 2. Structured filters narrow further
    let available_plumbers = searcher.search(
        &FilterState::new()
            .with_search("leak")
            .with_availability(Availability::Available),
        &ProximityState::inactive(),
    );
    assert_eq!(ids(&available_plumbers), ["sp-001"]);

    // 3. Near-me ranks by distance within 1.5 km
    let nearby = searcher.search(
        &FilterState::new(),
        &ProximityState::active_at(BANGALORE_CENTRE),
    );
    assert_eq!(ids(&nearby), ["sp-011", "sp-007", "sp-002"]);

    // 4. Wider radius through configuration
    let wide = searcher.search_with_config(
        &FilterState::new(),
        &ProximityState::active_at(BANGALORE_CENTRE),
        &SearchConfigBuilder::wide_area().build(),
    );
    assert!(wide.len() > nearby.len());
    assert_eq!(ids(&wide[..3]), ids(&nearby));
}

#[test]
fn test_scenario_queries() {
    setup_test_env();
    let searcher = ProviderSearcher::new(scenario_catalog());
    let none = ProximityState::inactive();

    let by_name = searcher.search(&FilterState::new().with_search("Asha"), &none);
    assert_eq!(ids(&by_name), ["asha"]);

    let by_location = searcher.search(
        &FilterState::new()
            .with_search("koramangala")
            .with_availability(Availability::Available),
        &none,
    );
    assert_eq!(ids(&by_location), ["rakesh"]);

    let by_category = searcher.search(&FilterState::new().with_category(Category::Tutoring), &none);
    assert_eq!(ids(&by_category), ["asha", "meera"]);

    let nothing = searcher.search(&FilterState::new().with_search("xyzzy"), &none);
    assert!(nothing.is_empty());
}

#[test]
fn test_proximity_scenarios() {
    setup_test_env();
    let searcher = ProviderSearcher::new(scenario_catalog());

    let nearby = searcher.search(
        &FilterState::new(),
        &ProximityState::active_at(BANGALORE_CENTRE),
    );
    assert_eq!(ids(&nearby), ["rakesh", "meera", "vikram"]);

    // Active without a fix leaves the filtered list untouched.
    let waiting = searcher.search(&FilterState::new(), &ProximityState::awaiting_fix());
    assert_eq!(waiting.len(), 5);

    // A known fix with near-me off is ignored.
    let off = searcher.search(
        &FilterState::new(),
        &ProximityState {
            active: false,
            coordinates: Some(BANGALORE_CENTRE),
        },
    );
    assert_eq!(off.len(), 5);

    // Far from everyone.
    let remote = searcher.search(
        &FilterState::new(),
        &ProximityState::active_at((0.0, 0.0).into()),
    );
    assert!(remote.is_empty());
}

#[test]
fn test_equal_distances_keep_catalog_order() {
    let offset = BANGALORE_CENTRE.latitude + degrees_north(0.3);
    let catalog = Catalog::from_providers(vec![
        ProviderFixture::new("b", "Second Plumber", Category::Plumbing)
            .at(offset, BANGALORE_CENTRE.longitude)
            .build(),
        ProviderFixture::new("a", "First Plumber", Category::Plumbing)
            .at(offset, BANGALORE_CENTRE.longitude)
            .build(),
    ])
    .expect("valid catalog");

    let searcher = ProviderSearcher::new(catalog);
    let results = searcher.search(
        &FilterState::new(),
        &ProximityState::active_at(BANGALORE_CENTRE),
    );
    assert_eq!(ids(&results), ["b", "a"]);
}

#[test]
fn test_batch_operations() {
    setup_test_env();
    let searcher = ProviderSearcher::new_embedded();

    let inputs = vec![
        (FilterState::new().with_search("dog"), ProximityState::inactive()),
        (FilterState::new().with_search("yoga"), ProximityState::inactive()),
        (
            FilterState::new().with_search("tutor"),
            ProximityState::inactive(),
        ),
        (FilterState::new(), ProximityState::active_at(BANGALORE_CENTRE)),
    ];
    let batch = searcher.search_bulk(&inputs);

    assert_eq!(batch.len(), inputs.len());
    for ((filters, proximity), results) in inputs.iter().zip(&batch) {
        assert_eq!(ids(results), ids(&searcher.search(filters, proximity)));
    }
    assert_eq!(ids(&batch[0]), ["sp-009"]);
    assert_eq!(ids(&batch[2]), ["sp-003", "sp-015"]);
}

#[test]
fn test_explain_reports_rule() {
    let searcher = ProviderSearcher::new_embedded();
    let pet_spa = searcher.provider("sp-009").expect("known provider");

    assert_eq!(searcher.explain(pet_spa, ""), Some(MatchReason::EmptyQuery));
    assert_eq!(searcher.explain(pet_spa, "priya"), Some(MatchReason::Name));
    assert_eq!(
        searcher.explain(pet_spa, "Dog"),
        Some(MatchReason::Skill("Dog Grooming".to_string()))
    );
    assert!(searcher.provider("sp-999").is_err());
}

#[test]
fn test_custom_tag_index() {
    let tags: TagIndex = [(Category::Mechanic, "Scooter")].into_iter().collect();
    let searcher = ProviderSearcher::builder()
        .catalog(scenario_catalog())
        .tags(tags)
        .build();

    let results = searcher.search(
        &FilterState::new().with_search("scooter"),
        &ProximityState::inactive(),
    );
    assert_eq!(ids(&results), ["suresh"]);
}

#[test]
fn test_strict_config_disables_expansion() {
    let searcher = ProviderSearcher::new(scenario_catalog())
        .with_config(SearchConfigBuilder::strict().build());
    let results = searcher.search(
        &FilterState::new().with_search("leak"),
        &ProximityState::inactive(),
    );
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_session_near_me_workflow() {
    setup_test_env();
    let mut session = Session::new(ProviderSearcher::new(scenario_catalog()));
    assert_eq!(session.result_count(), 5);

    let phase = session
        .acquire_location(&FixedLocation(Ok(BANGALORE_CENTRE)))
        .await;
    assert_eq!(phase, ProximityPhase::Active);
    assert_eq!(session.result_count(), 3);

    session.toggle_category(Category::Tutoring);
    let markers = session.map_markers();
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].id, "meera");
    assert_eq!(markers[0].availability, Availability::Offline);

    session.select("meera").expect("known provider");
    assert!(session.map_markers()[0].selected);

    // Off again: full filtered list, no distance labels.
    assert!(session.toggle_near_me().is_none());
    assert_eq!(session.result_count(), 2);
    let asha = session.searcher().provider("asha").expect("known provider").clone();
    assert_eq!(session.distance_to(&asha), None);
}

#[tokio::test]
async fn test_session_permission_denied() {
    setup_test_env();
    let mut session = Session::new(ProviderSearcher::new(scenario_catalog()));

    let phase = session
        .acquire_location(&FixedLocation(Err(GeolocationError::PermissionDenied)))
        .await;
    assert_eq!(phase, ProximityPhase::Inactive);
    assert!(!session.proximity().active);
    assert_eq!(session.result_count(), 5);
}
