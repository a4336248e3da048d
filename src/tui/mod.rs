//! Terminal dashboard for the simulated option chain.
//!
//! Ratatui front end: market header, symbol selector, the chain table and
//! an analysis overlay backed by [`crate::analysis`].

pub mod app;
pub mod components;
pub mod event;
pub mod input;
pub mod terminal;
pub mod ui;
pub mod views;

pub use app::App;
pub use event::{Action, Event, Message, RefreshTimer};
pub use terminal::{Tui, restore_terminal, setup_terminal};
pub use ui::render;
