//! In-memory episode cache.
//!
//! Episode lists are memoized per show for the lifetime of the session so
//! revisiting a show never goes back to the catalog.

use crate::types::{Episode, ShowId};
use std::collections::HashMap;

/// Episode lists keyed by exact show id.
///
/// Entries are created on the first successful fetch for a show and are
/// never invalidated or evicted.
#[derive(Debug, Default)]
pub struct EpisodeCache {
    entries: HashMap<ShowId, Vec<Episode>>,
}

impl EpisodeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached episodes for `show`, if it has been fetched before.
    pub fn get(&self, show: ShowId) -> Option<&[Episode]> {
        self.entries.get(&show).map(Vec::as_slice)
    }

    /// Store the episodes fetched for `show`.
    ///
    /// An existing entry is kept; the first successful fetch wins.
    pub fn put(&mut self, show: ShowId, episodes: Vec<Episode>) {
        self.entries.entry(show).or_insert(episodes);
    }

    pub fn contains(&self, show: ShowId) -> bool {
        self.entries.contains_key(&show)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EpisodeKey;

    fn episode(show: u64, season: u32, number: u32) -> Episode {
        Episode {
            id: show * 1000 + (season * 100 + number) as u64,
            show_id: ShowId(show),
            key: EpisodeKey::new(season, number),
            name: format!("Episode {}", number),
            summary: None,
            image: None,
        }
    }

    #[test]
    fn test_miss_on_empty_cache() {
        let cache = EpisodeCache::new();
        assert!(cache.get(ShowId(1)).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_put_then_get() {
        let mut cache = EpisodeCache::new();
        cache.put(ShowId(1), vec![episode(1, 1, 1), episode(1, 1, 2)]);

        let eps = cache.get(ShowId(1)).unwrap();
        assert_eq!(eps.len(), 2);
        assert_eq!(eps[1].key, EpisodeKey::new(1, 2));
        assert!(cache.contains(ShowId(1)));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_keys_are_exact_show_ids() {
        let mut cache = EpisodeCache::new();
        cache.put(ShowId(1), vec![episode(1, 1, 1)]);
        cache.put(ShowId(2), vec![]);

        assert!(cache.get(ShowId(3)).is_none());
        assert_eq!(cache.get(ShowId(2)).unwrap().len(), 0);
        assert_eq!(cache.get(ShowId(1)).unwrap()[0].show_id, ShowId(1));
    }

    #[test]
    fn test_empty_episode_list_is_a_hit() {
        let mut cache = EpisodeCache::new();
        cache.put(ShowId(9), Vec::new());
        assert!(cache.contains(ShowId(9)));
        assert!(cache.get(ShowId(9)).is_some());
    }

    #[test]
    fn test_first_put_wins() {
        let mut cache = EpisodeCache::new();
        cache.put(ShowId(1), vec![episode(1, 1, 1)]);
        cache.put(ShowId(1), vec![episode(1, 2, 1), episode(1, 2, 2)]);
        assert_eq!(cache.get(ShowId(1)).unwrap().len(), 1);
    }
}
