//! # evalwatch-core - Core Domain Types
//!
//! Foundation crate for evalwatch. Provides domain types, error handling,
//! frame classification, the event log and the results snapshot projections.
//!
//! This crate has **zero internal dependencies** and performs no network I/O.
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`ConnectionState`] - Live channel lifecycle (Connecting, Open, Closed)
//! - [`LogLine`] - A single event log line with severity and sequence number
//! - [`Severity`] - Line class (Info, Success, Warning, Error)
//!
//! ### Event Log (`event_log`)
//! - [`EventLog`] - Append-only ordered log with clear-on-reset
//!
//! ### Frames (`frame`)
//! - [`classify_frame()`] - Classify a raw live channel text frame
//! - [`StatusFrame`], [`ControlKind`], [`ResultEvent`]
//!
//! ### Results (`stats`, `projections`)
//! - [`StatsSnapshot`], [`DomainStat`] - Per-domain aggregates
//! - [`Kpis`] - Total questions, overall accuracy, fastest domain
//! - [`SnapshotStore`] - Latest snapshot plus derived views
//! - [`ChartProjections`] - The five chart-ready series
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum grouped by layer
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//!
//! ## Prelude
//!
//! ```rust
//! use evalwatch_core::prelude::*;
//! ```

pub mod error;
pub mod event_log;
pub mod frame;
pub mod logging;
pub mod projections;
pub mod stats;
pub mod types;

/// Prelude for common imports used throughout all evalwatch crates
pub mod prelude {
    pub use super::error::{Error, Result};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

pub use error::{Error, Result};
pub use event_log::EventLog;
pub use frame::{classify_frame, ControlKind, ResultEvent, StatusFrame};
pub use projections::{CategorySeries, ChartProjections, OutcomeSplit, ScatterPoint};
pub use stats::{DomainStat, Kpis, SnapshotStore, StatsSnapshot};
pub use types::{ConnectionState, LogLine, Severity};
