//! Resident fetch for a selected location.

use std::future::Future;

use tracing::debug;

use crate::api::ApiError;
use crate::models::Character;

/// Maximum number of residents fetched per location.
/// References beyond this are dropped without notice.
pub const MAX_RESIDENTS: usize = 20;

/// Fetch up to `MAX_RESIDENTS` characters, one after another, in reference order.
/// Failed fetches are left out of the result.
pub async fn fetch_residents<F, Fut>(resident_urls: &[String], mut fetch: F) -> Vec<Character>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Character, ApiError>>,
{
    let mut characters = Vec::with_capacity(resident_urls.len().min(MAX_RESIDENTS));

    for url in resident_urls.iter().take(MAX_RESIDENTS) {
        match fetch(url.clone()).await {
            Ok(character) => characters.push(character),
            Err(e) => debug!(error = %e, url = %url, "Resident fetch failed, skipping"),
        }
    }

    characters
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn urls(n: usize) -> Vec<String> {
        (1..=n)
            .map(|i| format!("https://rickandmortyapi.com/api/character/{}", i))
            .collect()
    }

    fn id_from_url(url: &str) -> i64 {
        url.rsplit('/').next().and_then(|s| s.parse().ok()).unwrap_or(0)
    }

    fn character(id: i64) -> Character {
        serde_json::from_value(serde_json::json!({ "id": id, "name": format!("Resident {}", id) }))
            .unwrap()
    }

    #[tokio::test]
    async fn test_empty_resident_list_issues_no_calls() {
        let calls = RefCell::new(0);
        let result = fetch_residents(&[], |url| {
            *calls.borrow_mut() += 1;
            async move { Ok(character(id_from_url(&url))) }
        })
        .await;

        assert!(result.is_empty());
        assert_eq!(*calls.borrow(), 0);
    }

    #[tokio::test]
    async fn test_only_first_twenty_are_fetched() {
        let all = urls(25);
        let requested = RefCell::new(Vec::new());

        let result = fetch_residents(&all, |url| {
            requested.borrow_mut().push(url.clone());
            async move { Ok(character(id_from_url(&url))) }
        })
        .await;

        assert_eq!(requested.borrow().as_slice(), &all[..MAX_RESIDENTS]);
        assert_eq!(result.len(), 20);
        assert_eq!(result.first().map(|c| c.id), Some(1));
        assert_eq!(result.last().map(|c| c.id), Some(20));
    }

    #[tokio::test]
    async fn test_failures_are_omitted_and_order_kept() {
        let all = urls(5);
        let result = fetch_residents(&all, |url| async move {
            let id = id_from_url(&url);
            if id % 2 == 0 {
                Err(ApiError::InvalidResponse(format!("no character {}", id)))
            } else {
                Ok(character(id))
            }
        })
        .await;

        let ids: Vec<i64> = result.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 3, 5]);
    }
}
