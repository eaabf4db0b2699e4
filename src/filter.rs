//! Visible-subset computation.
//!
//! Everything here is a pure function of the full dataset and a
//! [`SelectionState`]: the same inputs always give the same output, and no
//! render state is consulted.

use crate::selection::{ALL_VALUE, EpisodeFilter, SelectionState};
use crate::types::{Episode, Show, plain_text};
use crate::view::SelectOption;

/// Label of the sentinel option in the show selector.
pub const ALL_SHOWS_LABEL: &str = "Show All Shows";

/// Label of the sentinel option in the episode selector.
pub const ALL_EPISODES_LABEL: &str = "Show All Episodes";

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

// Markup is not searchable: "p" must not match every `<p>` summary.
fn summary_contains(summary: Option<&str>, needle_lower: &str) -> bool {
    summary.is_some_and(|s| contains_ci(&plain_text(s), needle_lower))
}

/// Whether a show matches an already-lowercased search needle.
///
/// Name, summary and every genre are searched.
pub fn show_matches(show: &Show, needle_lower: &str) -> bool {
    contains_ci(&show.name, needle_lower)
        || summary_contains(show.summary.as_deref(), needle_lower)
        || show.genres.iter().any(|g| contains_ci(g, needle_lower))
}

/// Whether an episode matches an already-lowercased search needle.
pub fn episode_matches(episode: &Episode, needle_lower: &str) -> bool {
    contains_ci(&episode.name, needle_lower)
        || summary_contains(episode.summary.as_deref(), needle_lower)
}

fn by_name(a: &Show, b: &Show) -> std::cmp::Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then(a.id.cmp(&b.id))
}

/// Shows matching the current search, ordered case-insensitively by name.
pub fn visible_shows<'a>(shows: &'a [Show], selection: &SelectionState) -> Vec<&'a Show> {
    let needle = selection.search().to_lowercase();
    let mut visible: Vec<&Show> = shows
        .iter()
        .filter(|s| needle.is_empty() || show_matches(s, &needle))
        .collect();
    visible.sort_by(|a, b| by_name(a, b));
    visible
}

/// Episodes of one show narrowed by the episode filter, then by search text.
///
/// Catalog order is preserved.
pub fn visible_episodes<'a>(
    episodes: &'a [Episode],
    selection: &SelectionState,
) -> Vec<&'a Episode> {
    let needle = selection.search().to_lowercase();
    let filter = selection.episode();

    episodes
        .iter()
        .filter(|e| match filter {
            EpisodeFilter::All => true,
            EpisodeFilter::Only(key) => e.key == key,
        })
        .filter(|e| needle.is_empty() || episode_matches(e, &needle))
        .collect()
}

/// Show selector options: the sentinel, then every show sorted by name.
pub fn show_options(shows: &[Show]) -> Vec<SelectOption> {
    let mut sorted: Vec<&Show> = shows.iter().collect();
    sorted.sort_by(|a, b| by_name(a, b));

    std::iter::once(SelectOption::new(ALL_VALUE, ALL_SHOWS_LABEL))
        .chain(
            sorted
                .into_iter()
                .map(|s| SelectOption::new(s.id.to_string(), s.name.clone())),
        )
        .collect()
}

/// Episode selector options for exactly the given episodes.
pub fn episode_options(episodes: &[Episode]) -> Vec<SelectOption> {
    std::iter::once(SelectOption::new(ALL_VALUE, ALL_EPISODES_LABEL))
        .chain(
            episodes
                .iter()
                .map(|e| SelectOption::new(e.key.value(), e.to_display())),
        )
        .collect()
}

/// What the counter is counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Noun {
    Show,
    Episode,
}

/// Format the "Showing X of Y" counter.
///
/// # Examples
///
/// ```
/// use show_browser::filter::{counter, Noun};
///
/// assert_eq!(counter(0, 0, Noun::Show), "Showing 0 of 0 show(s)");
/// assert_eq!(counter(1, 73, Noun::Episode), "Showing 1 of 73 episode(s)");
/// ```
pub fn counter(visible: usize, total: usize, noun: Noun) -> String {
    let noun = match noun {
        Noun::Show => "show(s)",
        Noun::Episode => "episode(s)",
    };
    format!("Showing {} of {} {}", visible, total, noun)
}
