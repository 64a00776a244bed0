//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `live`: Live channel events and frame application
//! - `results`: Command completion and snapshot refresh
//! - `keys`: Key bindings
//! - `scroll`: Event log scrolling

pub(crate) mod keys;
pub(crate) mod live;
pub(crate) mod results;
pub(crate) mod scroll;
pub(crate) mod update;


use evalwatch_client::Command;

use crate::message::Message;

pub use update::update;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateAction {
    /// Fetch the results snapshot in the background, tagged with its request id
    FetchSnapshot { seq: u64 },

    /// Send a control command. Commands that refresh the snapshot carry the
    /// request id of their follow-up fetch.
    ExecuteCommand {
        command: Command,
        snapshot_seq: Option<u64>,
    },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
