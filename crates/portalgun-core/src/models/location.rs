use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::contains_ignore_case;

/// A place in the multiverse. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    /// Free-form category such as "Planet" or "Space station"
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub dimension: String,
    /// Character resource URLs, in API order
    #[serde(default)]
    pub residents: Vec<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

impl Location {
    pub fn resident_count(&self) -> usize {
        self.residents.len()
    }

    pub fn has_residents(&self) -> bool {
        !self.residents.is_empty()
    }

    /// Check whether name, type or dimension contains `query`.
    /// Query should already be lowercased.
    pub fn matches_search(&self, query: &str) -> bool {
        contains_ignore_case(&self.name, query)
            || contains_ignore_case(&self.kind, query)
            || contains_ignore_case(&self.dimension, query)
    }

    pub fn kind_display(&self) -> &str {
        if self.kind.is_empty() { "-" } else { &self.kind }
    }

    pub fn dimension_display(&self) -> &str {
        if self.dimension.is_empty() { "-" } else { &self.dimension }
    }
}

/// Pagination metadata returned with every listing page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageInfo {
    pub count: Option<u32>,
    pub pages: Option<u32>,
    pub next: Option<String>,
    pub prev: Option<String>,
}

/// One page of `GET /location?page=N`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationPage {
    pub info: Option<PageInfo>,
    /// `None` when the body had no `results` field at all
    pub results: Option<Vec<Location>>,
}

impl LocationPage {
    /// True when the API advertises a further page
    pub fn has_next(&self) -> bool {
        self.info
            .as_ref()
            .and_then(|info| info.next.as_deref())
            .map(|next| !next.is_empty())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_JSON: &str = r#"{
        "info": {
            "count": 126,
            "pages": 7,
            "next": "https://rickandmortyapi.com/api/location?page=2",
            "prev": null
        },
        "results": [
            {
                "id": 1,
                "name": "Earth (C-137)",
                "type": "Planet",
                "dimension": "Dimension C-137",
                "residents": [
                    "https://rickandmortyapi.com/api/character/38",
                    "https://rickandmortyapi.com/api/character/45"
                ],
                "url": "https://rickandmortyapi.com/api/location/1",
                "created": "2017-11-10T12:42:04.162Z"
            },
            {
                "id": 2,
                "name": "Abadango",
                "type": "Cluster",
                "dimension": "unknown",
                "residents": [],
                "url": "https://rickandmortyapi.com/api/location/2",
                "created": "2017-11-10T13:06:38.182Z"
            }
        ]
    }"#;

    #[test]
    fn test_parse_location_page() {
        let page: LocationPage = serde_json::from_str(PAGE_JSON).expect("page should parse");
        assert!(page.has_next());

        let info = page.info.as_ref().unwrap();
        assert_eq!(info.count, Some(126));
        assert_eq!(info.pages, Some(7));
        assert!(info.prev.is_none());

        let results = page.results.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "Earth (C-137)");
        assert_eq!(results[0].kind, "Planet");
        assert_eq!(results[0].resident_count(), 2);
        assert!(results[0].created.is_some());
        assert!(!results[1].has_residents());
    }

    #[test]
    fn test_last_page_has_no_next() {
        let json = r#"{"info": {"count": 126, "pages": 7, "next": null, "prev": "x"}, "results": []}"#;
        let page: LocationPage = serde_json::from_str(json).unwrap();
        assert!(!page.has_next());
        assert_eq!(page.results, Some(vec![]));
    }

    #[test]
    fn test_missing_results_and_info() {
        let page: LocationPage = serde_json::from_str(r#"{"error": "There is nothing here"}"#).unwrap();
        assert!(page.results.is_none());
        assert!(!page.has_next());
    }

    #[test]
    fn test_empty_next_counts_as_absent() {
        let json = r#"{"info": {"next": ""}, "results": []}"#;
        let page: LocationPage = serde_json::from_str(json).unwrap();
        assert!(!page.has_next());
    }

    #[test]
    fn test_matches_search_fields() {
        let page: LocationPage = serde_json::from_str(PAGE_JSON).unwrap();
        let earth = &page.results.unwrap()[0];
        assert!(earth.matches_search("earth"));
        assert!(earth.matches_search("planet"));
        assert!(earth.matches_search("c-137"));
        assert!(!earth.matches_search("citadel"));
    }

    #[test]
    fn test_display_placeholders() {
        let loc: Location = serde_json::from_str(r#"{"id": 9, "name": "Nowhere"}"#).unwrap();
        assert_eq!(loc.kind_display(), "-");
        assert_eq!(loc.dimension_display(), "-");
        assert!(loc.residents.is_empty());
    }
}
