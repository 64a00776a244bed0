//! evalwatch-tui - Terminal UI for evalwatch
//!
//! This crate provides the ratatui-based dashboard. It creates an Engine
//! from evalwatch-app and adds terminal rendering, key polling and the
//! chart widgets.

pub mod event;
pub mod layout;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub mod test_utils;

// Re-export main entry point
pub use runner::run;
