//! Core library for portalgun.
//!
//! Everything here is independent of the terminal UI:
//!
//! - `api`: HTTP client for the Rick and Morty API
//! - `models`: location and character records
//! - `aggregate`: paginated fetch-until-exhausted location loading
//! - `residents`: bounded sequential resident fetch for one location
//! - `cache`: process-lifetime portrait cache keyed by character id
//! - `search`: case-insensitive location filtering
//! - `stats`: collection-wide statistics
//! - `config`: environment-driven configuration

pub mod aggregate;
pub mod api;
pub mod cache;
pub mod config;
pub mod models;
pub mod residents;
pub mod search;
pub mod stats;
pub mod utils;

pub use aggregate::{collect_pages, fetch_all_locations};
pub use api::{ApiClient, ApiError};
pub use cache::{ImageCache, Portrait, PORTRAIT_SIZE};
pub use config::Config;
pub use models::{Character, CharacterStatus, Location, LocationPage};
pub use residents::{fetch_residents, MAX_RESIDENTS};
pub use search::filter_locations;
pub use stats::LocationStats;
