//! Screen state and input handling.

use crate::selection::ALL_VALUE;
use crate::types::{Episode, Show, plain_text};
use crate::view::{ControlPanel, Renderer, SelectOption};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::ListState;

use super::types::{Action, Card, Focus};

const NO_SUMMARY: &str = "No summary available.";

/// Everything the terminal front-end displays.
///
/// Implements [`Renderer`] and [`ControlPanel`], so the controller drives it
/// exactly like any other view.
pub struct Screen {
    /// Which control has focus
    pub focus: Focus,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Whether help modal is shown
    pub show_help: bool,
    /// Current search text
    pub search_input: String,
    /// Show selector
    pub show_options: Vec<SelectOption>,
    pub show_list_state: ListState,
    /// Episode selector
    pub episode_options: Vec<SelectOption>,
    pub episode_list_state: ListState,
    /// Cards currently displayed
    pub cards: Vec<Card>,
    pub card_list_state: ListState,
    /// Heading over the cards: "Shows" or the selected show's name
    pub heading: String,
    /// Whether the cards are episodes of one show
    pub viewing_episodes: bool,
    /// "Showing X of Y" or a loading message
    pub status: String,
    /// Error notices, oldest first
    pub errors: Vec<String>,
    /// Image reference for records without one
    pub placeholder: String,
}

fn select_first(state: &mut ListState, len: usize) {
    state.select(if len == 0 { None } else { Some(0) });
}

fn move_up(state: &mut ListState) {
    let i = state.selected().unwrap_or(0);
    if i > 0 {
        state.select(Some(i - 1));
    }
}

fn move_down(state: &mut ListState, len: usize) {
    let i = state.selected().unwrap_or(0);
    if i < len.saturating_sub(1) {
        state.select(Some(i + 1));
    }
}

fn select_value(state: &mut ListState, options: &[SelectOption], value: &str) {
    match options.iter().position(|o| o.value == value) {
        Some(i) => state.select(Some(i)),
        None => select_first(state, options.len()),
    }
}

impl Screen {
    pub fn new(placeholder: &str) -> Self {
        Self {
            focus: Focus::Cards,
            should_quit: false,
            show_help: false,
            search_input: String::new(),
            show_options: Vec::new(),
            show_list_state: ListState::default(),
            episode_options: Vec::new(),
            episode_list_state: ListState::default(),
            cards: Vec::new(),
            card_list_state: ListState::default(),
            heading: "Shows".to_string(),
            viewing_episodes: false,
            status: String::new(),
            errors: Vec::new(),
            placeholder: placeholder.to_string(),
        }
    }

    /// Card under the cursor, if any.
    pub fn selected_card(&self) -> Option<&Card> {
        self.card_list_state
            .selected()
            .and_then(|i| self.cards.get(i))
    }

    fn highlighted(options: &[SelectOption], state: &ListState) -> Option<String> {
        state
            .selected()
            .and_then(|i| options.get(i))
            .map(|o| o.value.clone())
    }

    /// Handle keyboard input and return an action.
    pub fn handle_input(&mut self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Action::Quit;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                self.show_help = false;
            }
            return Action::None;
        }

        match key.code {
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return Action::None;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.previous();
                return Action::None;
            }
            _ => {}
        }

        if self.focus == Focus::Search {
            return self.handle_search_input(key);
        }

        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                Action::Quit
            }
            KeyCode::Char('?') => {
                self.show_help = true;
                Action::None
            }
            KeyCode::Char('/') => {
                self.focus = Focus::Search;
                Action::None
            }
            KeyCode::Char('x') => {
                self.errors.clear();
                Action::None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                match self.focus {
                    Focus::Shows => move_up(&mut self.show_list_state),
                    Focus::Episodes => move_up(&mut self.episode_list_state),
                    Focus::Cards => move_up(&mut self.card_list_state),
                    Focus::Search => {}
                }
                Action::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                match self.focus {
                    Focus::Shows => {
                        move_down(&mut self.show_list_state, self.show_options.len())
                    }
                    Focus::Episodes => {
                        move_down(&mut self.episode_list_state, self.episode_options.len())
                    }
                    Focus::Cards => move_down(&mut self.card_list_state, self.cards.len()),
                    Focus::Search => {}
                }
                Action::None
            }
            KeyCode::Enter => match self.focus {
                Focus::Shows => Self::highlighted(&self.show_options, &self.show_list_state)
                    .map(Action::SelectShow)
                    .unwrap_or(Action::None),
                Focus::Episodes => {
                    Self::highlighted(&self.episode_options, &self.episode_list_state)
                        .map(Action::SelectEpisode)
                        .unwrap_or(Action::None)
                }
                Focus::Cards => self
                    .selected_card()
                    .map(|c| c.on_enter.clone())
                    .unwrap_or(Action::None),
                Focus::Search => Action::None,
            },
            KeyCode::Esc if self.viewing_episodes => Action::SelectShow(ALL_VALUE.to_string()),
            _ => Action::None,
        }
    }

    fn handle_search_input(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char(c) => {
                self.search_input.push(c);
                Action::Search(self.search_input.clone())
            }
            KeyCode::Backspace => {
                if self.search_input.pop().is_some() {
                    Action::Search(self.search_input.clone())
                } else {
                    Action::None
                }
            }
            KeyCode::Enter | KeyCode::Esc => {
                self.focus = Focus::Cards;
                Action::None
            }
            _ => Action::None,
        }
    }

    fn set_cards(&mut self, cards: Vec<Card>) {
        self.cards = cards;
        select_first(&mut self.card_list_state, self.cards.len());
    }
}

impl Renderer for Screen {
    fn render_shows(&mut self, shows: &[&Show]) {
        let cards = shows
            .iter()
            .map(|s| Card {
                title: s.name.clone(),
                subtitle: s.genres_label(),
                meta: format!(
                    "Status: {} | Rating: {} | Runtime: {}",
                    s.status_label(),
                    s.rating_label(),
                    s.runtime_label()
                ),
                summary: s
                    .summary
                    .as_deref()
                    .map(plain_text)
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| NO_SUMMARY.to_string()),
                image: s.image_or(&self.placeholder).to_string(),
                on_enter: Action::SelectShow(s.id.to_string()),
            })
            .collect();

        self.heading = "Shows".to_string();
        self.viewing_episodes = false;
        self.set_cards(cards);
    }

    fn render_episodes(&mut self, show: &Show, episodes: &[&Episode]) {
        let cards = episodes
            .iter()
            .map(|e| Card {
                title: e.name.clone(),
                subtitle: e.code(),
                meta: String::new(),
                summary: e
                    .summary
                    .as_deref()
                    .map(plain_text)
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| NO_SUMMARY.to_string()),
                image: e.image_or(&self.placeholder).to_string(),
                on_enter: Action::SelectEpisode(e.key.value()),
            })
            .collect();

        self.heading = show.name.clone();
        self.viewing_episodes = true;
        self.set_cards(cards);
    }

    fn render_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}

impl ControlPanel for Screen {
    fn set_show_options(&mut self, options: Vec<SelectOption>) {
        self.show_options = options;
        select_first(&mut self.show_list_state, self.show_options.len());
    }

    fn set_selected_show(&mut self, value: &str) {
        select_value(&mut self.show_list_state, &self.show_options, value);
    }

    fn set_episode_options(&mut self, options: Vec<SelectOption>) {
        self.episode_options = options;
        select_first(&mut self.episode_list_state, self.episode_options.len());
    }

    fn set_selected_episode(&mut self, value: &str) {
        select_value(&mut self.episode_list_state, &self.episode_options, value);
    }

    fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EpisodeKey, ShowId};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn show() -> Show {
        Show {
            id: ShowId(82),
            name: "Game of Thrones".to_string(),
            summary: Some("<p>Seven <b>noble</b> families.</p>".to_string()),
            genres: vec!["Drama".to_string(), "Fantasy".to_string()],
            status: Some("Ended".to_string()),
            runtime: Some(60),
            rating: Some(8.9),
            image: None,
        }
    }

    fn episode() -> Episode {
        Episode {
            id: 4952,
            show_id: ShowId(82),
            key: EpisodeKey::new(1, 1),
            name: "Winter is Coming".to_string(),
            summary: None,
            image: Some("https://static.tvmaze.com/e.jpg".to_string()),
        }
    }

    #[test]
    fn test_render_shows_builds_cards() {
        let mut screen = Screen::new("placeholder.jpg");
        let show = show();
        screen.render_shows(&[&show]);

        let card = &screen.cards[0];
        assert_eq!(card.title, "Game of Thrones");
        assert_eq!(card.subtitle, "Drama, Fantasy");
        assert_eq!(card.meta, "Status: Ended | Rating: 8.9 | Runtime: 60 min");
        assert_eq!(card.summary, "Seven noble families.");
        assert_eq!(card.image, "placeholder.jpg");
        assert_eq!(card.on_enter, Action::SelectShow("82".to_string()));
        assert!(!screen.viewing_episodes);
        assert_eq!(screen.card_list_state.selected(), Some(0));
    }

    #[test]
    fn test_render_episodes_replaces_cards() {
        let mut screen = Screen::new("placeholder.jpg");
        let show = show();
        let ep = episode();
        screen.render_shows(&[&show, &show]);
        screen.render_episodes(&show, &[&ep]);

        assert_eq!(screen.cards.len(), 1);
        assert_eq!(screen.cards[0].subtitle, "S01E01");
        assert_eq!(screen.cards[0].summary, NO_SUMMARY);
        assert_eq!(screen.cards[0].image, "https://static.tvmaze.com/e.jpg");
        assert_eq!(screen.heading, "Game of Thrones");
        assert!(screen.viewing_episodes);
    }

    #[test]
    fn test_render_empty_clears_selection() {
        let mut screen = Screen::new("placeholder.jpg");
        let show = show();
        screen.render_episodes(&show, &[]);
        assert!(screen.cards.is_empty());
        assert_eq!(screen.card_list_state.selected(), None);
    }

    #[test]
    fn test_errors_accumulate_without_clearing_cards() {
        let mut screen = Screen::new("placeholder.jpg");
        let show = show();
        screen.render_shows(&[&show]);
        screen.render_error("Catalog unavailable: HTTP 500 Internal Server Error");
        screen.render_error("second");
        assert_eq!(screen.errors.len(), 2);
        assert_eq!(screen.cards.len(), 1);

        screen.handle_input(key(KeyCode::Char('x')));
        assert!(screen.errors.is_empty());
    }

    #[test]
    fn test_search_fires_on_every_keystroke() {
        let mut screen = Screen::new("p.jpg");
        screen.handle_input(key(KeyCode::Char('/')));
        assert_eq!(screen.focus, Focus::Search);

        assert_eq!(
            screen.handle_input(key(KeyCode::Char('p'))),
            Action::Search("p".to_string())
        );
        assert_eq!(
            screen.handle_input(key(KeyCode::Char('i'))),
            Action::Search("pi".to_string())
        );
        assert_eq!(
            screen.handle_input(key(KeyCode::Backspace)),
            Action::Search("p".to_string())
        );
        // 'q' is text while searching, not quit
        assert_eq!(
            screen.handle_input(key(KeyCode::Char('q'))),
            Action::Search("pq".to_string())
        );
        assert_eq!(screen.handle_input(key(KeyCode::Esc)), Action::None);
        assert_eq!(screen.focus, Focus::Cards);
    }

    #[test]
    fn test_enter_on_selectors() {
        let mut screen = Screen::new("p.jpg");
        screen.set_show_options(vec![
            SelectOption::new("all", "Show All Shows"),
            SelectOption::new("82", "Game of Thrones"),
        ]);
        screen.set_episode_options(vec![
            SelectOption::new("all", "Show All Episodes"),
            SelectOption::new("1-1", "S01E01 - Winter is Coming"),
        ]);

        screen.focus = Focus::Shows;
        screen.handle_input(key(KeyCode::Down));
        assert_eq!(
            screen.handle_input(key(KeyCode::Enter)),
            Action::SelectShow("82".to_string())
        );

        screen.handle_input(key(KeyCode::Tab));
        assert_eq!(screen.focus, Focus::Episodes);
        screen.handle_input(key(KeyCode::Char('j')));
        assert_eq!(
            screen.handle_input(key(KeyCode::Enter)),
            Action::SelectEpisode("1-1".to_string())
        );
    }

    #[test]
    fn test_set_selected_tracks_value() {
        let mut screen = Screen::new("p.jpg");
        screen.set_show_options(vec![
            SelectOption::new("all", "Show All Shows"),
            SelectOption::new("1", "Alpha"),
            SelectOption::new("2", "Beta"),
        ]);
        screen.set_selected_show("2");
        assert_eq!(screen.show_list_state.selected(), Some(2));
        screen.set_selected_show("missing");
        assert_eq!(screen.show_list_state.selected(), Some(0));
    }

    #[test]
    fn test_escape_returns_to_show_list() {
        let mut screen = Screen::new("p.jpg");
        let show = show();
        screen.render_episodes(&show, &[]);
        assert_eq!(
            screen.handle_input(key(KeyCode::Esc)),
            Action::SelectShow("all".to_string())
        );
        screen.render_shows(&[&show]);
        assert_eq!(screen.handle_input(key(KeyCode::Esc)), Action::None);
    }

    #[test]
    fn test_quit_keys() {
        let mut screen = Screen::new("p.jpg");
        assert_eq!(screen.handle_input(key(KeyCode::Char('q'))), Action::Quit);
        assert!(screen.should_quit);

        let mut screen = Screen::new("p.jpg");
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(screen.handle_input(ctrl_c), Action::Quit);
    }
}
