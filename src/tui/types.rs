//! TUI type definitions for focus, actions and cards.

/// Which control receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Shows,
    Episodes,
    Cards,
}

impl Focus {
    /// Next control in Tab order.
    pub fn next(self) -> Self {
        match self {
            Focus::Search => Focus::Shows,
            Focus::Shows => Focus::Episodes,
            Focus::Episodes => Focus::Cards,
            Focus::Cards => Focus::Search,
        }
    }

    /// Previous control in Tab order.
    pub fn previous(self) -> Self {
        match self {
            Focus::Search => Focus::Cards,
            Focus::Shows => Focus::Search,
            Focus::Episodes => Focus::Shows,
            Focus::Cards => Focus::Episodes,
        }
    }
}

/// Events the TUI hands to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No action, continue running
    None,
    /// Quit the application
    Quit,
    /// Search text changed to this value
    Search(String),
    /// Show selector value chosen (`"all"` or a show id)
    SelectShow(String),
    /// Episode selector value chosen (`"all"` or `season-number`)
    SelectEpisode(String),
}

/// One rendered card.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub title: String,
    /// Episode code, or genres for shows
    pub subtitle: String,
    /// Status, rating and runtime for shows; empty for episodes
    pub meta: String,
    /// Summary with markup removed
    pub summary: String,
    pub image: String,
    /// What Enter on this card does
    pub on_enter: Action,
}
