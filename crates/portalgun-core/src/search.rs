//! Location filtering for the search box.

use crate::models::Location;

/// Locations whose name, type or dimension contains `term`, ignoring case.
///
/// An empty term returns every location. The result borrows from
/// `locations` and keeps its order.
pub fn filter_locations<'a>(locations: &'a [Location], term: &str) -> Vec<&'a Location> {
    if term.is_empty() {
        return locations.iter().collect();
    }

    let query = term.to_lowercase();
    locations
        .iter()
        .filter(|loc| loc.matches_search(&query))
        .collect()
}
