//! Scroll message handlers for the event log view

use crate::state::DashboardState;

use super::UpdateResult;

pub fn handle_scroll_up(state: &mut DashboardState) -> UpdateResult {
    state.log_view.scroll_up(1);
    UpdateResult::none()
}

pub fn handle_scroll_down(state: &mut DashboardState) -> UpdateResult {
    state.log_view.scroll_down(1);
    UpdateResult::none()
}

pub fn handle_page_up(state: &mut DashboardState) -> UpdateResult {
    state.log_view.page_up();
    UpdateResult::none()
}

pub fn handle_page_down(state: &mut DashboardState) -> UpdateResult {
    state.log_view.page_down();
    UpdateResult::none()
}

pub fn handle_scroll_to_top(state: &mut DashboardState) -> UpdateResult {
    state.log_view.scroll_to_top();
    UpdateResult::none()
}

pub fn handle_scroll_to_bottom(state: &mut DashboardState) -> UpdateResult {
    state.log_view.scroll_to_bottom();
    UpdateResult::none()
}
