use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder shown for blank text fields
const UNKNOWN: &str = "Unknown";

/// Coarse classification of the free-text `status` field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterStatus {
    Alive,
    Dead,
    Unknown,
}

impl CharacterStatus {
    /// Classify the free-text status, ignoring case
    pub fn classify(s: &str) -> Self {
        if s.eq_ignore_ascii_case("alive") {
            CharacterStatus::Alive
        } else if s.eq_ignore_ascii_case("dead") {
            CharacterStatus::Dead
        } else {
            CharacterStatus::Unknown
        }
    }
}

impl fmt::Display for CharacterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharacterStatus::Alive => write!(f, "Alive"),
            CharacterStatus::Dead => write!(f, "Dead"),
            CharacterStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// A `{name, url}` reference to another resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedResource {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub species: String,
    /// Subspecies or variant, often empty
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub origin: NamedResource,
    /// Last known location
    #[serde(default)]
    pub location: NamedResource,
    /// Portrait URL
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub episode: Vec<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

fn or_unknown(s: &str) -> &str {
    if s.is_empty() { UNKNOWN } else { s }
}

impl Character {
    pub fn status_kind(&self) -> CharacterStatus {
        CharacterStatus::classify(&self.status)
    }

    pub fn display_name(&self) -> &str {
        or_unknown(&self.name)
    }

    pub fn status_display(&self) -> &str {
        if self.status.is_empty() { "unknown" } else { &self.status }
    }

    pub fn gender_display(&self) -> &str {
        or_unknown(&self.gender)
    }

    pub fn origin_display(&self) -> &str {
        or_unknown(&self.origin.name)
    }

    pub fn has_image(&self) -> bool {
        !self.image.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_character() {
        let json = r#"{
            "id": 38,
            "name": "Beth Smith",
            "status": "Alive",
            "species": "Human",
            "type": "",
            "gender": "Female",
            "origin": {"name": "Earth (C-137)", "url": "https://rickandmortyapi.com/api/location/1"},
            "location": {"name": "Earth (C-137)", "url": "https://rickandmortyapi.com/api/location/1"},
            "image": "https://rickandmortyapi.com/api/character/avatar/38.jpeg",
            "episode": ["https://rickandmortyapi.com/api/episode/1"],
            "url": "https://rickandmortyapi.com/api/character/38",
            "created": "2017-11-05T09:48:44.230Z"
        }"#;

        let c: Character = serde_json::from_str(json).expect("character should parse");
        assert_eq!(c.id, 38);
        assert_eq!(c.display_name(), "Beth Smith");
        assert_eq!(c.status_kind(), CharacterStatus::Alive);
        assert_eq!(c.species, "Human");
        assert_eq!(c.origin_display(), "Earth (C-137)");
        assert_eq!(c.episode.len(), 1);
        assert!(c.has_image());
    }

    #[test]
    fn test_sparse_character_uses_placeholders() {
        let c: Character = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert_eq!(c.display_name(), "Unknown");
        assert_eq!(c.gender_display(), "Unknown");
        assert_eq!(c.origin_display(), "Unknown");
        assert_eq!(c.status_display(), "unknown");
        assert_eq!(c.status_kind(), CharacterStatus::Unknown);
        assert!(!c.has_image());
    }

    #[test]
    fn test_status_classify() {
        assert_eq!(CharacterStatus::classify("Alive"), CharacterStatus::Alive);
        assert_eq!(CharacterStatus::classify("DEAD"), CharacterStatus::Dead);
        assert_eq!(CharacterStatus::classify("unknown"), CharacterStatus::Unknown);
        assert_eq!(CharacterStatus::classify("Schrodinger"), CharacterStatus::Unknown);
    }
}
