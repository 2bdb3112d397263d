//! Data models for Rick and Morty API entities.
//!
//! - `Location`, `LocationPage`, `PageInfo`: the paginated location listing
//! - `Character`, `CharacterStatus`, `NamedResource`: resident records

pub mod character;
pub mod location;

pub use character::{Character, CharacterStatus, NamedResource};
pub use location::{Location, LocationPage, PageInfo};
