//! Widgets shared by the dashboard views.

pub mod format;
pub mod header;
pub mod status_bar;
pub mod symbol_bar;
