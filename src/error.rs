use crate::state::Screen;
use thiserror::Error;

/// Invalid-state conditions surfaced by the navigation controller.
///
/// Silent fallbacks (popping a singleton stack, re-entrant transition starts)
/// are not errors and never appear here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    #[error("a modal is already open on {holder}")]
    ModalAlreadyHeld { holder: Screen },

    #[error("input focus is only available on home (active screen: {active})")]
    FocusOutOfScope { active: Screen },

    #[error("{0} cannot be shown without a selected item")]
    RequiresSelection(Screen),

    #[error("Unknown screen: {0}")]
    UnknownScreen(String),

    #[error("Invalid date (expected YYYY-MM-DD): {0}")]
    UnknownDate(String),

    #[error("navigation controller is no longer running")]
    ControllerClosed,
}

pub type Result<T> = std::result::Result<T, NavError>;
