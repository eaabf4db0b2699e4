//! UI rendering functions for the TUI.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

use super::state::Screen;
use super::types::Focus;

/// Most error lines shown at once; older ones scroll off.
const MAX_ERROR_LINES: usize = 3;

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn highlight_style() -> Style {
    Style::default()
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD)
}

/// Draw the UI.
pub fn draw(frame: &mut Frame, screen: &mut Screen) {
    let size = frame.area();

    let error_height = if screen.errors.is_empty() {
        0
    } else {
        screen.errors.len().min(MAX_ERROR_LINES) as u16 + 2
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),            // Header
            Constraint::Length(3),            // Search bar
            Constraint::Length(error_height), // Error notices
            Constraint::Min(0),               // Selectors + cards
            Constraint::Length(3),            // Footer
        ])
        .split(size);

    draw_header(frame, screen, chunks[0]);
    draw_search_bar(frame, screen, chunks[1]);
    if error_height > 0 {
        draw_errors(frame, screen, chunks[2]);
    }

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(36), // Selectors (fixed width)
            Constraint::Min(0),     // Cards
        ])
        .split(chunks[3]);

    draw_selectors(frame, screen, content_chunks[0]);
    draw_cards(frame, screen, content_chunks[1]);
    draw_footer(frame, screen, chunks[4]);

    if screen.show_help {
        draw_help_modal(frame);
    }
}

fn draw_header(frame: &mut Frame, screen: &Screen, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "show-browser",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(format!("[{}]", screen.heading), Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(screen.status.clone(), Style::default().fg(Color::Green)),
    ]))
    .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

fn draw_search_bar(frame: &mut Frame, screen: &Screen, area: Rect) {
    let focused = screen.focus == Focus::Search;

    let search_text = if screen.search_input.is_empty() && !focused {
        "Press '/' to search names, summaries and genres..."
    } else {
        &screen.search_input
    };

    let search = Paragraph::new(search_text)
        .style(if focused {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Search")
                .border_style(border_style(focused)),
        );

    frame.render_widget(search, area);

    if focused {
        frame.set_cursor_position((
            area.x + screen.search_input.chars().count() as u16 + 1,
            area.y + 1,
        ));
    }
}

fn draw_errors(frame: &mut Frame, screen: &Screen, area: Rect) {
    let lines: Vec<Line> = screen
        .errors
        .iter()
        .rev()
        .take(MAX_ERROR_LINES)
        .rev()
        .map(|e| Line::from(Span::styled(e.clone(), Style::default().fg(Color::Red))))
        .collect();

    let notice = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Errors ({}) - press 'x' to dismiss", screen.errors.len()))
                .border_style(Style::default().fg(Color::Red)),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(notice, area);
}

fn draw_selectors(frame: &mut Frame, screen: &mut Screen, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let show_items: Vec<ListItem> = screen
        .show_options
        .iter()
        .map(|o| ListItem::new(o.label.clone()))
        .collect();

    let shows = List::new(show_items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Show")
                .border_style(border_style(screen.focus == Focus::Shows)),
        )
        .highlight_style(highlight_style())
        .highlight_symbol("> ");

    frame.render_stateful_widget(shows, chunks[0], &mut screen.show_list_state);

    let episode_items: Vec<ListItem> = screen
        .episode_options
        .iter()
        .map(|o| ListItem::new(o.label.clone()))
        .collect();

    let episodes = List::new(episode_items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Episode")
                .border_style(border_style(screen.focus == Focus::Episodes)),
        )
        .highlight_style(highlight_style())
        .highlight_symbol("> ");

    frame.render_stateful_widget(episodes, chunks[1], &mut screen.episode_list_state);
}

fn draw_cards(frame: &mut Frame, screen: &mut Screen, area: Rect) {
    // Split into list and details
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let focused = screen.focus == Focus::Cards;

    if screen.cards.is_empty() {
        let empty = Paragraph::new("Nothing to show")
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(screen.heading.clone())
                    .border_style(border_style(focused)),
            );
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = screen
        .cards
        .iter()
        .map(|c| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    c.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    c.subtitle.clone(),
                    Style::default().fg(Color::Yellow),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(screen.heading.clone())
                .border_style(border_style(focused)),
        )
        .highlight_style(highlight_style())
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, chunks[0], &mut screen.card_list_state);

    let details = match screen.selected_card() {
        Some(card) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    format!("{}  {}", card.title, card.subtitle),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
            ];
            if !card.meta.is_empty() {
                lines.push(Line::from(card.meta.clone()));
            }
            lines.push(Line::from(Span::styled(
                format!("Image: {}", card.image),
                Style::default().fg(Color::DarkGray),
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(card.summary.clone()));
            lines
        }
        None => vec![Line::from("No selection")],
    };

    let details = Paragraph::new(details)
        .block(Block::default().borders(Borders::ALL).title("Details"))
        .wrap(Wrap { trim: true });

    frame.render_widget(details, chunks[1]);
}

fn draw_footer(frame: &mut Frame, screen: &Screen, area: Rect) {
    let hints = match screen.focus {
        Focus::Search => "Type to filter | Enter/Esc: done | Tab: next panel",
        _ if screen.viewing_episodes => {
            "j/k: Move | Enter: Select | Esc: All shows | /: Search | Tab: Panel | ?: Help | q: Quit"
        }
        _ => "j/k: Move | Enter: Select | /: Search | Tab: Panel | ?: Help | q: Quit",
    };

    let footer = Paragraph::new(hints)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(footer, area);
}

fn draw_help_modal(frame: &mut Frame) {
    let area = centered_rect(60, 60, frame.area());

    let help = Paragraph::new(
        "Keyboard shortcuts:\n\n\
        /            Focus search (filters as you type)\n\
        Tab / S-Tab  Cycle search, show, episode and cards\n\
        j/k, arrows  Move within the focused list\n\
        Enter        Apply the highlighted option or card\n\
        Esc          Back to all shows\n\
        x            Dismiss error notices\n\
        ?            Toggle this help\n\
        q, Ctrl+C    Quit",
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Help")
            .border_style(Style::default().fg(Color::Cyan)),
    )
    .wrap(Wrap { trim: false });

    frame.render_widget(Clear, area);
    frame.render_widget(help, area);
}

/// Create a centered rectangle.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
