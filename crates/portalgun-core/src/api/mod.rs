//! REST API client module for the Rick and Morty API.
//!
//! This module provides the `ApiClient` for fetching location pages,
//! individual characters and character portraits. The API is public and
//! unauthenticated.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
