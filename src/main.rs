//! Main entry point for the show-browser terminal application.

use clap::Parser;
use crossterm::{
    event::{Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, info, warn};
use ratatui::prelude::*;
use show_browser::api::TvMazeClient;
use show_browser::config::Config;
use show_browser::controller::{Controller, FetchTicket};
use show_browser::error::Result as CatalogResult;
use show_browser::tui::{Action, Screen, draw, poll_event};
use show_browser::types::Episode;
use show_browser::view::ControlPanel;
use std::io::{self, stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Command-line arguments for the show-browser application.
#[derive(Parser, Debug)]
#[command(
    name = "show-browser",
    version,
    about = "Browse a TV show catalog in the terminal",
    long_about = "Browse shows and episodes from a TVmaze-compatible catalog, \
                  filtering by search text, show and episode."
)]
struct Args {
    /// Log verbosity level: 0=error, 1=warn, 2=info, 3=debug, 4=trace
    #[arg(short, long, default_value_t = 1)]
    log: u8,

    /// Catalog base URL (overrides config)
    #[arg(short, long)]
    api_url: Option<String>,

    /// Request timeout in seconds (overrides config)
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Write a default config file if none exists, print its path and exit
    #[arg(long)]
    init_config: bool,
}

type EpisodeFetch = (FetchTicket, CatalogResult<Vec<Episode>>);

/// Initialize the terminal for TUI rendering.
fn init_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    Terminal::new(backend)
}

/// Restore the terminal to its original state.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;
    Ok(())
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Initialize logging
    let log_level = match args.log {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Warn,
        2 => log::LevelFilter::Info,
        3 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .format_target(false)
        .init();

    debug!("Log level set to {:?}", log_level);

    if args.init_config {
        let path = Config::create_default_if_missing()?;
        println!("{}", path.display());
        return Ok(());
    }

    // Load config
    let mut config = Config::load().unwrap_or_else(|e| {
        warn!("Failed to load config: {}. Using defaults.", e);
        Config::new()
    });

    // Merge config with CLI args
    if let Some(url) = args.api_url {
        config.api_base_url = url;
    }
    if let Some(timeout) = args.timeout {
        config.request_timeout_secs = timeout;
    }

    info!("Using catalog at {}", config.api_base_url);

    let client = TvMazeClient::new(&config)?;
    let mut controller = Controller::new(Arc::new(client), Screen::new(&config.placeholder_image));

    let mut terminal = init_terminal()?;

    let result = run_app(&mut terminal, &mut controller).await;

    restore_terminal()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    controller: &mut Controller<Screen>,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let (tx, mut rx) = mpsc::unbounded_channel::<EpisodeFetch>();

    controller.view_mut().set_status("Loading shows...");
    terminal.draw(|f| draw(f, controller.view_mut()))?;
    controller.load_shows().await;

    loop {
        // Apply finished fetches before drawing
        while let Ok((ticket, result)) = rx.try_recv() {
            controller.complete_episode_fetch(ticket, result);
        }

        terminal.draw(|f| draw(f, controller.view_mut()))?;

        let Some(Event::Key(key)) = poll_event(Duration::from_millis(100))? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match controller.view_mut().handle_input(key) {
            Action::Quit => break,
            Action::Search(text) => controller.on_search(&text),
            Action::SelectShow(value) => {
                if let Some(ticket) = controller.begin_show_selection(&value) {
                    let client = controller.client();
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        let result = client.fetch_episodes(ticket.show).await;
                        // Receiver only goes away on shutdown
                        let _ = tx.send((ticket, result));
                    });
                }
            }
            Action::SelectEpisode(value) => controller.on_episode_selected(&value),
            Action::None => {}
        }

        if controller.view().should_quit {
            break;
        }
    }

    Ok(())
}
