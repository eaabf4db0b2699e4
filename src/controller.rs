//! Event handling: one state mutation, one recompute, one re-render.
//!
//! The controller owns all application state and the injected capabilities.
//! Every handler ends in [`Controller::refresh`], which rebuilds the view
//! and counter from state alone.

use crate::api::CatalogClient;
use crate::cache::EpisodeCache;
use crate::error::{AppError, Result};
use crate::filter::{
    Noun, counter, episode_options, show_options, visible_episodes, visible_shows,
};
use crate::selection::{ALL_VALUE, EpisodeFilter, SelectionState, ShowChoice, View};
use crate::types::{Episode, Show, ShowId};
use crate::view::{ControlPanel, Renderer};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::sync::Arc;

/// Everything the app knows during a session.
#[derive(Debug, Default)]
pub struct AppState {
    /// Full show list as fetched
    pub shows: Vec<Show>,
    /// Episodes already fetched, per show
    pub cache: EpisodeCache,
    /// Current show, episode filter and search text
    pub selection: SelectionState,
    /// Shows with an episode fetch outstanding
    in_flight: HashSet<ShowId>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_flight(&self, show: ShowId) -> bool {
        self.in_flight.contains(&show)
    }

    fn find_show(&self, id: ShowId) -> Option<&Show> {
        self.shows.iter().find(|s| s.id == id)
    }
}

/// An episode fetch the caller must run and hand back to
/// [`Controller::complete_episode_fetch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct FetchTicket {
    pub show: ShowId,
}

/// Wires user events to state changes and re-renders.
pub struct Controller<V> {
    client: Arc<dyn CatalogClient>,
    state: AppState,
    view: V,
}

impl<V: Renderer + ControlPanel> Controller<V> {
    pub fn new(client: Arc<dyn CatalogClient>, view: V) -> Self {
        Self {
            client,
            state: AppState::new(),
            view,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Shared handle to the catalog, for running fetches off the event loop.
    pub fn client(&self) -> Arc<dyn CatalogClient> {
        Arc::clone(&self.client)
    }

    /// Fetch the show list and display it.
    ///
    /// On failure an error notice is added and the current show list is
    /// redrawn, which replaces any loading message with the real counter.
    pub async fn load_shows(&mut self) {
        debug!("Loading show list");
        match self.client.fetch_shows().await {
            Ok(shows) => self.shows_loaded(shows),
            Err(e) => {
                self.report(&e);
                self.refresh();
            }
        }
    }

    /// Install a freshly fetched show list.
    pub fn shows_loaded(&mut self, shows: Vec<Show>) {
        debug!("Loaded {} shows", shows.len());
        self.state.shows = shows;
        self.view.set_show_options(show_options(&self.state.shows));
        self.refresh();
    }

    /// Search text changed.
    pub fn on_search(&mut self, text: &str) {
        self.state.selection.set_search(text);
        self.refresh();
    }

    /// Show selector changed; fetches episodes on a cache miss.
    pub async fn on_show_selected(&mut self, value: &str) {
        if let Some(ticket) = self.begin_show_selection(value) {
            let result = self.client.fetch_episodes(ticket.show).await;
            self.complete_episode_fetch(ticket, result);
        }
    }

    /// Apply a show selection without waiting on the network.
    ///
    /// Returns a ticket only when the episodes are neither cached nor
    /// already being fetched.
    pub fn begin_show_selection(&mut self, value: &str) -> Option<FetchTicket> {
        let choice = match ShowChoice::parse(value) {
            Ok(choice) => choice,
            Err(e) => {
                self.report(&e);
                return None;
            }
        };

        if let ShowChoice::Show(id) = choice {
            if self.state.find_show(id).is_none() {
                self.report(&AppError::InvalidInput(format!("unknown show {}", id)));
                return None;
            }
        }

        self.state.selection.select_show(choice);
        self.view.set_selected_episode(ALL_VALUE);

        let ticket = match choice {
            ShowChoice::All => {
                self.view.set_selected_show(ALL_VALUE);
                self.view.set_episode_options(episode_options(&[]));
                None
            }
            ShowChoice::Show(id) => {
                self.view.set_selected_show(&id.to_string());
                match self.state.cache.get(id) {
                    Some(episodes) => {
                        debug!("Episode cache hit for show {}", id);
                        self.view.set_episode_options(episode_options(episodes));
                        None
                    }
                    None => {
                        self.view.set_episode_options(episode_options(&[]));
                        if self.state.in_flight.insert(id) {
                            debug!("Episode cache miss for show {}", id);
                            Some(FetchTicket { show: id })
                        } else {
                            debug!("Episodes for show {} already in flight", id);
                            None
                        }
                    }
                }
            }
        };

        self.refresh();
        ticket
    }

    /// Hand back the outcome of a ticketed fetch.
    ///
    /// Successful results are always cached. They are only rendered when
    /// the ticket's show is still the selected one.
    pub fn complete_episode_fetch(&mut self, ticket: FetchTicket, result: Result<Vec<Episode>>) {
        self.state.in_flight.remove(&ticket.show);
        let current = self.state.selection.show() == Some(ticket.show);

        match result {
            Ok(episodes) => {
                debug!("Fetched {} episodes for show {}", episodes.len(), ticket.show);
                self.state.cache.put(ticket.show, episodes);
                if !current {
                    info!("Discarding stale episode response for show {}", ticket.show);
                    return;
                }
                if let Some(episodes) = self.state.cache.get(ticket.show) {
                    self.view.set_episode_options(episode_options(episodes));
                }
            }
            Err(e) => self.report(&e),
        }

        if current {
            self.refresh();
        }
    }

    /// Episode selector changed.
    pub fn on_episode_selected(&mut self, value: &str) {
        match EpisodeFilter::parse(value) {
            Ok(filter) => {
                self.state.selection.select_episode(filter);
                self.view.set_selected_episode(&filter.value());
                self.refresh();
            }
            Err(e) => self.report(&e),
        }
    }

    /// Recompute the visible subset and counter from state and re-render.
    pub fn refresh(&mut self) {
        let state = &self.state;
        let selection = &state.selection;

        match selection.view() {
            View::Shows => {
                let visible = visible_shows(&state.shows, selection);
                self.view.render_shows(&visible);
                self.view
                    .set_status(&counter(visible.len(), state.shows.len(), Noun::Show));
            }
            View::Episodes(id) => {
                let Some(show) = state.find_show(id) else {
                    warn!("Selected show {} is not in the show list", id);
                    return;
                };
                match state.cache.get(id) {
                    Some(episodes) => {
                        let visible = visible_episodes(episodes, selection);
                        self.view.render_episodes(show, &visible);
                        self.view.set_status(&counter(
                            visible.len(),
                            episodes.len(),
                            Noun::Episode,
                        ));
                    }
                    None => {
                        self.view.render_episodes(show, &[]);
                        if state.is_in_flight(id) {
                            self.view
                                .set_status(&format!("Loading episodes for {}...", show.name));
                        } else {
                            self.view
                                .set_status(&format!("Episodes unavailable for {}", show.name));
                        }
                    }
                }
            }
        }
    }

    fn report(&mut self, err: &AppError) {
        warn!("{}", err);
        self.view.render_error(&err.to_string());
    }
}
