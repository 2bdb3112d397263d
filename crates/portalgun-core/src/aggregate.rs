//! Paginated location aggregation.
//!
//! The listing endpoint is walked page by page until the API reports no next
//! page or a page request fails. A failure truncates the result to what was
//! gathered so far; it is never reported to the caller.

use std::future::Future;

use tracing::{debug, info, warn};

use crate::api::{ApiClient, ApiError};
use crate::models::{Location, LocationPage};

/// First page number of the listing endpoint
const FIRST_PAGE: u32 = 1;

/// Walk pages starting at 1, concatenating results in page order.
pub async fn collect_pages<F, Fut>(mut fetch_page: F) -> Vec<Location>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<LocationPage, ApiError>>,
{
    let mut locations = Vec::new();
    let mut page = FIRST_PAGE;

    loop {
        let data = match fetch_page(page).await {
            Ok(data) => data,
            Err(e) if e.is_not_found() => {
                // Listing ended without a `next` of null
                debug!(page, gathered = locations.len(), "Location page not found, stopping");
                break;
            }
            Err(e) => {
                warn!(error = %e, page, gathered = locations.len(), "Location page fetch failed, stopping");
                break;
            }
        };

        let has_next = data.has_next();
        let Some(results) = data.results else {
            warn!(page, "Location page has no results field, stopping");
            break;
        };

        debug!(page, count = results.len(), has_next, "Location page received");
        locations.extend(results);

        if !has_next {
            break;
        }
        page += 1;
    }

    locations
}

/// Fetch every location the API knows about
pub async fn fetch_all_locations(api: &ApiClient) -> Vec<Location> {
    let locations = collect_pages(move |page| api.fetch_location_page(page)).await;
    info!(count = locations.len(), "Locations loaded");
    locations
}
