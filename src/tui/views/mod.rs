//! Full-area views.

pub mod analysis;
pub mod chain_table;
