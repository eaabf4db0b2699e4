//! A terminal browser for a TV show catalog written in Rust.
//!
//! show-browser fetches show and episode metadata from a TVmaze-compatible
//! catalog and lets the user narrow it down with search text, a show
//! selector and an episode selector.
//!
//! # Layout
//!
//! - [`api`]: the [`api::CatalogClient`] seam and its HTTP implementation
//! - [`cache`]: per-show episode memoization
//! - [`selection`] and [`filter`]: selection state and the pure functions
//!   that derive the visible subset from it
//! - [`view`]: the capabilities the controller renders through
//! - [`controller`]: event handling and application state
//! - [`tui`]: the ratatui front-end
//!
//! # Usage
//!
//! ```bash
//! # Browse the public TVmaze catalog
//! cargo run
//!
//! # Point at another catalog with debug logging
//! cargo run -- --api-url http://localhost:8080 -l 3
//! ```

pub mod api;
pub mod cache;
pub mod config;
pub mod controller;
pub mod error;
pub mod filter;
pub mod selection;
pub mod tui;
pub mod types;
pub mod view;
