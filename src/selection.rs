//! Selection state: which show, which episode and what search text.

use crate::error::Result;
use crate::types::{EpisodeKey, ShowId};

/// Selector value meaning "no narrowing" in both selectors.
pub const ALL_VALUE: &str = "all";

/// A value chosen in the show selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowChoice {
    All,
    Show(ShowId),
}

impl ShowChoice {
    /// Parse a show selector value: `"all"` or a show id.
    pub fn parse(value: &str) -> Result<Self> {
        if value.trim() == ALL_VALUE {
            Ok(ShowChoice::All)
        } else {
            value.parse().map(ShowChoice::Show)
        }
    }
}

/// A value chosen in the episode selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EpisodeFilter {
    #[default]
    All,
    Only(EpisodeKey),
}

impl EpisodeFilter {
    /// Parse an episode selector value: `"all"` or `season-number`.
    ///
    /// # Examples
    ///
    /// ```
    /// use show_browser::selection::EpisodeFilter;
    /// use show_browser::types::EpisodeKey;
    ///
    /// assert_eq!(EpisodeFilter::parse("all").unwrap(), EpisodeFilter::All);
    /// assert_eq!(
    ///     EpisodeFilter::parse("02-05").unwrap(),
    ///     EpisodeFilter::Only(EpisodeKey::new(2, 5))
    /// );
    /// ```
    pub fn parse(value: &str) -> Result<Self> {
        if value.trim() == ALL_VALUE {
            Ok(EpisodeFilter::All)
        } else {
            value.parse().map(EpisodeFilter::Only)
        }
    }

    /// Selector value for this filter.
    pub fn value(&self) -> String {
        match self {
            EpisodeFilter::All => ALL_VALUE.to_string(),
            EpisodeFilter::Only(key) => key.value(),
        }
    }
}

/// Which list is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Shows,
    Episodes(ShowId),
}

/// What the user has chosen so far.
///
/// Only the controller mutates this; the filter functions read it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    show: Option<ShowId>,
    episode: EpisodeFilter,
    search: String,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&self) -> Option<ShowId> {
        self.show
    }

    pub fn episode(&self) -> EpisodeFilter {
        self.episode
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn view(&self) -> View {
        match self.show {
            Some(id) => View::Episodes(id),
            None => View::Shows,
        }
    }

    /// Switch show. The episode filter always resets; the search text is kept
    /// and applies to the new show's episodes.
    pub fn select_show(&mut self, choice: ShowChoice) {
        self.show = match choice {
            ShowChoice::All => None,
            ShowChoice::Show(id) => Some(id),
        };
        self.episode = EpisodeFilter::All;
    }

    pub fn select_episode(&mut self, filter: EpisodeFilter) {
        self.episode = filter;
    }

    pub fn set_search(&mut self, text: &str) {
        self.search = text.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = SelectionState::new();
        assert_eq!(state.show(), None);
        assert_eq!(state.episode(), EpisodeFilter::All);
        assert_eq!(state.search(), "");
        assert_eq!(state.view(), View::Shows);
    }

    #[test]
    fn test_select_show_resets_episode_keeps_search() {
        let mut state = SelectionState::new();
        state.set_search("pilot");
        state.select_show(ShowChoice::Show(ShowId(1)));
        state.select_episode(EpisodeFilter::Only(EpisodeKey::new(1, 1)));

        state.select_show(ShowChoice::Show(ShowId(2)));
        assert_eq!(state.view(), View::Episodes(ShowId(2)));
        assert_eq!(state.episode(), EpisodeFilter::All);
        assert_eq!(state.search(), "pilot");
    }

    #[test]
    fn test_select_all_shows_reverts_view() {
        let mut state = SelectionState::new();
        state.select_show(ShowChoice::Show(ShowId(5)));
        state.select_episode(EpisodeFilter::Only(EpisodeKey::new(2, 3)));
        state.select_show(ShowChoice::All);

        assert_eq!(state.view(), View::Shows);
        assert_eq!(state.episode(), EpisodeFilter::All);
    }

    #[test]
    fn test_show_choice_parse() {
        assert_eq!(ShowChoice::parse("all").unwrap(), ShowChoice::All);
        assert_eq!(ShowChoice::parse("82").unwrap(), ShowChoice::Show(ShowId(82)));
        assert!(ShowChoice::parse("Game of Thrones").is_err());
    }

    #[test]
    fn test_episode_filter_parse() {
        assert_eq!(
            EpisodeFilter::parse("1-1").unwrap(),
            EpisodeFilter::parse("01-01").unwrap()
        );
        assert!(EpisodeFilter::parse("S01E01").is_err());
    }

    #[test]
    fn test_episode_filter_value() {
        assert_eq!(EpisodeFilter::All.value(), "all");
        assert_eq!(EpisodeFilter::Only(EpisodeKey::new(4, 12)).value(), "4-12");
    }
}
