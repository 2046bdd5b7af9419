//! Read model handed to the rendering layer each cycle.

use crate::state::{Event, GateState, Screen};
use crate::transition::TransitionPhase;
use chrono::NaiveDate;
use serde::Serialize;

/// Chrome decisions derived from the active screen and the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChromeHints {
    /// Bottom tab bar is visible.
    pub show_bottom_nav: bool,
    /// Tab bar is dimmed because the home input has focus.
    pub bottom_nav_focus_dim: bool,
    /// Constrained screens draw the background grid.
    pub show_background_grid: bool,
    /// Grid cell size in px.
    pub grid_cell_px: u8,
    pub blur_background: bool,
    /// Content leaves room at the bottom for the tab bar.
    pub reserve_tab_bar_space: bool,
}

impl ChromeHints {
    pub fn derive(active: Screen, gate: &GateState) -> Self {
        Self {
            show_bottom_nav: active.is_main() && !gate.modal_open(),
            bottom_nav_focus_dim: gate.input_focused() && active == Screen::Home,
            show_background_grid: !active.is_full_width(),
            grid_cell_px: if active == Screen::DailyView { 24 } else { 20 },
            blur_background: gate.input_focused(),
            reserve_tab_bar_space: active.is_main(),
        }
    }
}

/// Everything the rendering layer needs to pick and annotate the visible screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderSnapshot {
    pub active: Screen,
    /// History, oldest first; the last entry is `active`.
    pub stack: Vec<Screen>,
    /// Number of history entries; back leaves the app section at 1.
    pub depth: usize,
    pub is_main: bool,
    pub is_full_width: bool,
    pub phase: TransitionPhase,
    pub selection: Option<Event>,
    pub modal_open: bool,
    pub input_focused: bool,
    pub active_date: NaiveDate,
    /// Address awaiting verification, shown by the verification screen.
    pub pending_email: Option<String>,
    pub chrome: ChromeHints,
}

impl RenderSnapshot {
    /// One-line summary for logs and the interactive shell.
    pub fn summary(&self) -> String {
        let stack: Vec<&str> = self.stack.iter().map(Screen::as_str).collect();
        let mut line = format!(
            "{} [{}] phase={:?} date={}",
            self.active,
            stack.join(" > "),
            self.phase,
            self.active_date
        );
        if let Some(event) = &self.selection {
            line.push_str(&format!(" selected={}", event.id));
        }
        if self.modal_open {
            line.push_str(" modal");
        }
        if self.input_focused {
            line.push_str(" focused");
        }
        line
    }
}
