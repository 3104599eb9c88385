//! Near-me listing session
//!
//! This example drives a [`servizo::Session`] the way a listing UI would:
//! - Toggling near-me on and obtaining a one-shot location fix
//! - Reading nearest-first results with distance labels
//! - Handling a location failure
//! - Building map markers for the current results

use servizo::{
    FixedLocation, GeolocationError, ProviderSearcher, Session,
    catalog::test_data::BANGALORE_CENTRE,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    servizo::init_logging(tracing::Level::INFO)?;

    let mut session = Session::new(ProviderSearcher::from_env()?);
    println!("{} providers listed", session.result_count());

    // A denied permission leaves the list unfiltered and near-me off.
    let phase = session
        .acquire_location(&FixedLocation(Err(GeolocationError::PermissionDenied)))
        .await;
    println!("\nAfter a denied request: {phase:?}, {} providers", session.result_count());

    // A successful fix switches to nearest-first within the radius.
    let phase = session
        .acquire_location(&FixedLocation(Ok(BANGALORE_CENTRE)))
        .await;
    println!("\nNear {BANGALORE_CENTRE} ({phase:?}):");
    for provider in session.results() {
        let distance = session.distance_to(provider).unwrap_or_default();
        println!("  {} - {:.2} km, {}", provider.name, distance, provider.availability);
    }

    if let Some(first) = session.results().first().map(|p| p.id.clone()) {
        session.select(&first)?;
    }

    println!("\nMap markers:");
    for marker in session.map_markers() {
        println!(
            "  {} at {} [{}] {}{}",
            marker.id,
            marker.coordinates,
            marker.price,
            marker.availability,
            if marker.selected { " (selected)" } else { "" }
        );
    }

    Ok(())
}
