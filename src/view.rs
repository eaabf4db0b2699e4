//! Capabilities the controller drives: card rendering and the controls.
//!
//! The controller is handed implementations of these at construction time
//! and never looks anything up globally. The terminal front-end implements
//! both on [`crate::tui::Screen`]; tests use recording fakes.

use crate::types::{Episode, Show};

/// One entry of a selector: the value sent back on change and its label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Turns visible records into cards.
pub trait Renderer {
    /// Replace all displayed cards with these shows.
    fn render_shows(&mut self, shows: &[&Show]);

    /// Replace all displayed cards with these episodes of `show`.
    fn render_episodes(&mut self, show: &Show, episodes: &[&Episode]);

    /// Add a persistent error notice. Existing cards stay on screen.
    fn render_error(&mut self, message: &str);
}

/// The search box, selectors and status line.
pub trait ControlPanel {
    /// Replace the show selector's options.
    fn set_show_options(&mut self, options: Vec<SelectOption>);

    /// Move the show selector to `value` without emitting a change.
    fn set_selected_show(&mut self, value: &str);

    /// Replace the episode selector's options.
    fn set_episode_options(&mut self, options: Vec<SelectOption>);

    /// Move the episode selector to `value` without emitting a change.
    fn set_selected_episode(&mut self, value: &str);

    /// Set the "Showing X of Y" counter or a loading message.
    fn set_status(&mut self, status: &str);
}
