//! # evalwatch-app - Dashboard State and Orchestration
//!
//! TEA (The Elm Architecture) core of evalwatch:
//!
//! - [`Message`] - everything that can happen
//! - [`DashboardState`] - the composed state handed to presentation
//! - [`handler::update()`] - pure state transitions returning [`UpdateAction`]s
//! - [`Engine`] - session composition root: spawns actions, owns the live
//!   channel, broadcasts [`EngineEvent`]s
//!
//! Settings are loaded from `.evalwatch/config.toml` via [`config`].

pub mod actions;
pub mod config;
pub mod engine;
pub mod engine_event;
pub mod handler;
pub mod input_key;
pub mod log_view_state;
pub mod message;
pub mod signals;
pub mod state;

pub use config::Settings;
pub use engine::Engine;
pub use engine_event::EngineEvent;
pub use handler::{UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use log_view_state::LogViewState;
pub use message::Message;
pub use state::{DashboardState, SessionPhase};
