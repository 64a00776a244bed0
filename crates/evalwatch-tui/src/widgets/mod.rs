//! Custom widget components

mod charts;
mod event_log;
mod header;
mod kpis;
mod status_bar;

pub use charts::{AccuracyChart, DistributionChart, OutcomesChart, ResponseTimeChart, ScatterChart};
pub use event_log::EventLogView;
pub use header::MainHeader;
pub use kpis::KpiCards;
pub use status_bar::StatusBar;

// Re-export state types from app layer (these are used by render/)
pub use evalwatch_app::log_view_state::LogViewState;
