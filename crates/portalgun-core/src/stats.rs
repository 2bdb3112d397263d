//! Collection-wide statistics over the loaded locations.

use indexmap::IndexMap;

use crate::models::Location;

/// Summary of a non-empty location collection.
///
/// Histograms keep keys in first-seen order. Where several keys (or
/// locations) share the top count, the one encountered first wins.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationStats<'a> {
    pub total_locations: usize,
    /// Sum of resident references, not deduplicated across locations
    pub total_residents: usize,
    pub type_counts: IndexMap<&'a str, usize>,
    pub dimension_counts: IndexMap<&'a str, usize>,
    pub most_populous: &'a Location,
}

impl<'a> LocationStats<'a> {
    /// Returns `None` when nothing has been loaded yet
    pub fn compute(locations: &'a [Location]) -> Option<Self> {
        let most_populous = first_max_by_key(locations.iter(), |loc| loc.resident_count())?;

        let mut type_counts: IndexMap<&str, usize> = IndexMap::new();
        let mut dimension_counts: IndexMap<&str, usize> = IndexMap::new();
        for loc in locations {
            *type_counts.entry(loc.kind.as_str()).or_insert(0) += 1;
            *dimension_counts.entry(loc.dimension.as_str()).or_insert(0) += 1;
        }

        Some(Self {
            total_locations: locations.len(),
            total_residents: locations.iter().map(Location::resident_count).sum(),
            type_counts,
            dimension_counts,
            most_populous,
        })
    }

    pub fn most_common_type(&self) -> Option<(&'a str, usize)> {
        most_common(&self.type_counts)
    }

    pub fn most_common_dimension(&self) -> Option<(&'a str, usize)> {
        most_common(&self.dimension_counts)
    }

    pub fn unique_types(&self) -> usize {
        self.type_counts.len()
    }

    pub fn unique_dimensions(&self) -> usize {
        self.dimension_counts.len()
    }

    /// Plain-text summary, one fact per line
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Total locations:        {}", self.total_locations),
            format!("Total known residents:  {}", self.total_residents),
        ];
        if let Some((kind, count)) = self.most_common_type() {
            lines.push(format!("Most common type:       {} ({} locations)", kind, count));
        }
        if let Some((dimension, count)) = self.most_common_dimension() {
            lines.push(format!("Most common dimension:  {} ({} locations)", dimension, count));
        }
        lines.push(format!(
            "Most populous:          {} ({} residents)",
            self.most_populous.name,
            self.most_populous.resident_count()
        ));
        lines.push(format!("Unique types:           {}", self.unique_types()));
        lines.push(format!("Unique dimensions:      {}", self.unique_dimensions()));
        lines
    }
}

fn most_common<'a>(counts: &IndexMap<&'a str, usize>) -> Option<(&'a str, usize)> {
    first_max_by_key(counts.iter(), |(_, count)| **count).map(|(key, count)| (*key, *count))
}

/// Like `Iterator::max_by_key`, but ties go to the earliest element.
fn first_max_by_key<I, K, F>(iter: I, mut key: F) -> Option<I::Item>
where
    I: Iterator,
    K: Ord,
    F: FnMut(&I::Item) -> K,
{
    let mut best: Option<(K, I::Item)> = None;
    for item in iter {
        let k = key(&item);
        let replace = match &best {
            Some((best_k, _)) => k > *best_k,
            None => true,
        };
        if replace {
            best = Some((k, item));
        }
    }
    best.map(|(_, item)| item)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(id: i64, name: &str, kind: &str, dimension: &str, residents: usize) -> Location {
        Location {
            id,
            name: name.to_string(),
            kind: kind.to_string(),
            dimension: dimension.to_string(),
            residents: (0..residents)
                .map(|i| format!("https://rickandmortyapi.com/api/character/{}", i + 1))
                .collect(),
            url: String::new(),
            created: None,
        }
    }

    #[test]
    fn test_empty_collection_has_no_stats() {
        assert!(LocationStats::compute(&[]).is_none());
    }

    #[test]
    fn test_totals_and_most_populous() {
        let all = vec![
            loc(1, "Earth (C-137)", "Planet", "Dimension C-137", 2),
            loc(2, "Citadel of Ricks", "Space station", "unknown", 5),
            loc(3, "Abadango", "Cluster", "unknown", 0),
        ];

        let stats = LocationStats::compute(&all).unwrap();
        assert_eq!(stats.total_locations, 3);
        assert_eq!(stats.total_residents, 7);
        assert_eq!(stats.most_populous.id, 2);
        assert_eq!(stats.most_common_dimension(), Some(("unknown", 2)));
        assert_eq!(stats.unique_types(), 3);
        assert_eq!(stats.unique_dimensions(), 2);
    }

    #[test]
    fn test_residents_are_not_deduplicated() {
        // Both locations reference the same character URLs
        let all = vec![
            loc(1, "A", "Planet", "D1", 3),
            loc(2, "B", "Planet", "D1", 3),
        ];
        let stats = LocationStats::compute(&all).unwrap();
        assert_eq!(stats.total_residents, 6);
    }

    // Tie-break order is implementation-defined; this pins the current choice
    // (first encountered in collection order).
    #[test]
    fn test_ties_go_to_first_encountered() {
        let all = vec![
            loc(1, "First", "Planet", "D2", 4),
            loc(2, "Second", "Cluster", "D1", 4),
            loc(3, "Third", "Cluster", "D1", 1),
            loc(4, "Fourth", "Planet", "D2", 0),
        ];

        let stats = LocationStats::compute(&all).unwrap();
        assert_eq!(stats.most_populous.id, 1);
        assert_eq!(stats.most_common_type(), Some(("Planet", 2)));
        assert_eq!(stats.most_common_dimension(), Some(("D2", 2)));
    }

    #[test]
    fn test_histogram_keeps_first_seen_order() {
        let all = vec![
            loc(1, "A", "Moon", "D9", 0),
            loc(2, "B", "Planet", "D1", 0),
            loc(3, "C", "Moon", "D9", 0),
        ];
        let stats = LocationStats::compute(&all).unwrap();
        let keys: Vec<&str> = stats.type_counts.keys().copied().collect();
        assert_eq!(keys, vec!["Moon", "Planet"]);
        assert_eq!(stats.type_counts["Moon"], 2);
    }

    #[test]
    fn test_summary_lines() {
        let all = vec![loc(1, "Earth (C-137)", "Planet", "Dimension C-137", 27)];
        let lines = LocationStats::compute(&all).unwrap().summary_lines();
        assert!(lines.iter().any(|l| l.contains("Total locations") && l.ends_with("1")));
        assert!(lines.iter().any(|l| l.contains("Earth (C-137) (27 residents)")));
        assert!(lines.iter().any(|l| l.contains("Planet (1 locations)")));
    }

    #[test]
    fn test_first_max_by_key() {
        let v = [(1, 'a'), (3, 'b'), (3, 'c'), (2, 'd')];
        assert_eq!(first_max_by_key(v.iter(), |x| x.0), Some(&(3, 'b')));
        assert_eq!(first_max_by_key(std::iter::empty::<u8>(), |x| *x), None);
    }
}
