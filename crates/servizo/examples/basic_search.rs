//! Basic provider search functionality
//!
//! This example demonstrates the fundamental search operations:
//! - Creating a searcher instance over the embedded catalog
//! - Free-text queries widened by category synonyms
//! - Structured category and availability filters
//! - Asking why a provider matched

use servizo::{Availability, Category, FilterState, ProviderSearcher, ProximityState};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    servizo::init_logging(tracing::Level::INFO)?;

    let searcher = ProviderSearcher::new_embedded();
    let no_proximity = ProximityState::inactive();

    println!("Searching for 'leak':");
    let filters = FilterState::new().with_search("leak");
    let results = searcher.search(&filters, &no_proximity);
    print_results(&searcher, &results, "leak");

    println!("\nAvailable tutors:");
    let filters = FilterState::new()
        .with_category(Category::Tutoring)
        .with_availability(Availability::Available);
    let results = searcher.search(&filters, &no_proximity);
    print_results(&searcher, &results, "");

    println!("\nSearching for 'repair':");
    let filters = FilterState::new().with_search("repair");
    let results = searcher.search(&filters, &no_proximity);
    print_results(&searcher, &results, "repair");

    Ok(())
}

fn print_results(searcher: &ProviderSearcher, results: &[&servizo::ServiceProvider], query: &str) {
    for (i, provider) in results.iter().enumerate() {
        println!(
            "  {}. {} - {} in {} ({}, {}), matched by {:?}",
            i + 1,
            provider.name,
            provider.category,
            provider.location,
            provider.availability,
            provider.price,
            searcher.explain(provider, query),
        );
    }
    if results.is_empty() {
        println!("  No providers found");
    }
}
