//! Key bindings

use evalwatch_client::Command;

use super::UpdateResult;
use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::DashboardState;

/// Map a key press to a follow-up message
pub fn handle_key(_state: &mut DashboardState, key: InputKey) -> UpdateResult {
    match key_to_message(key) {
        Some(msg) => UpdateResult::message(msg),
        None => UpdateResult::none(),
    }
}

fn key_to_message(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('q') | InputKey::Esc | InputKey::CharCtrl('c') => Some(Message::Quit),

        // Control commands
        InputKey::Char('1') => Some(Message::IssueCommand(Command::Quick)),
        InputKey::Char('s') => Some(Message::IssueCommand(Command::Start)),
        InputKey::Char('p') => Some(Message::IssueCommand(Command::Pause)),
        InputKey::Char('r') => Some(Message::IssueCommand(Command::Resume)),
        InputKey::Char('x') => Some(Message::IssueCommand(Command::Reset)),

        InputKey::Char('f') => Some(Message::RefreshSnapshot),

        // Event log scrolling
        InputKey::Up | InputKey::Char('k') => Some(Message::ScrollUp),
        InputKey::Down | InputKey::Char('j') => Some(Message::ScrollDown),
        InputKey::PageUp => Some(Message::PageUp),
        InputKey::PageDown => Some(Message::PageDown),
        InputKey::Home | InputKey::Char('g') => Some(Message::ScrollToTop),
        InputKey::End | InputKey::Char('G') => Some(Message::ScrollToBottom),

        _ => None,
    }
}
