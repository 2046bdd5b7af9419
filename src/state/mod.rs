//! Navigation state.
//!
//! Each piece of cross-screen state lives in its own type with its own
//! invariants; the controller is the only place that mutates them together.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                NavigationController                   │
//! ├──────────────────────────────────────────────────────┤
//! │  ┌─────────────────┐   ┌───────────────────────────┐ │
//! │  │ NavigationStack │   │ TransitionCoordinator     │ │
//! │  │ [home, detail]  │   │ idle / entering / leaving │ │
//! │  └─────────────────┘   └───────────────────────────┘ │
//! │  ┌─────────────────┐   ┌───────────────────────────┐ │
//! │  │ SelectionContext│   │ GateState                 │ │
//! │  │ current, parked │   │ modal lease, focus lease  │ │
//! │  └─────────────────┘   └───────────────────────────┘ │
//! └──────────────────────────────────────────────────────┘
//! ```

pub mod gate;
pub mod screen;
pub mod selection;
pub mod stack;

pub use gate::{FocusLease, GateState, ModalLease};
pub use screen::Screen;
pub use selection::{Event, EventKind, Intensity, SelectionContext, WorkoutDetails};
pub use stack::NavigationStack;

use crate::flow::FlowSignal;
use chrono::NaiveDate;

/// Navigation intent signalled by a screen collaborator.
///
/// Screens never mutate navigation state directly; they hand one of these to
/// the controller and read the next snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationIntent {
    /// Bottom navigation or generic forward navigation (`onNavigate`).
    Navigate(Screen),
    /// Back button (`onBack`).
    Back,
    /// An event was tapped (`onEventSelect`).
    SelectEvent(Event),
    /// "See full day" from the given screen (`onExpand`).
    Expand(Screen),
    /// Zoom from the calendar into a day (`onDailyViewOpen`).
    OpenDailyView(NaiveDate),
    /// Settings sub-screen, pushed on top of the current path.
    PushChild(Screen),
    /// The calendar picked another date (`onDateSelect`).
    SelectDate(NaiveDate),
    /// A hosted overlay opened or closed (`onModalStateChange`).
    ModalStateChange(bool),
    /// The home text input gained or lost focus (`onAITextboxFocus`).
    InputFocus(bool),
    /// Onboarding, authentication and settings flow steps.
    Flow(FlowSignal),
}
