//! Terminal User Interface for show-browser using ratatui.
//!
//! This module provides a full-screen TUI with a search bar, show and episode
//! selectors and a card list. [`Screen`] is the view the controller drives.

mod render;
mod state;
mod types;

pub use render::draw;
pub use state::Screen;
pub use types::{Action, Card, Focus};

use crossterm::event::{self, Event};
use std::io;
use std::time::Duration;

/// Poll for keyboard events with a timeout.
pub fn poll_event(timeout: Duration) -> io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}
