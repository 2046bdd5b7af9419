//! NutriFlow - navigation and transition controller
//!
//! This library owns the client's screen history, the animated
//! calendar ↔ daily view hand-off, the selected event and the modal/focus
//! gate. Screens are collaborators: they signal intent and render snapshots.

// Core modules
pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod flow;
pub mod runtime;
pub mod schedule;
pub mod snapshot;
pub mod state;
pub mod transition;
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use controller::{ControllerOptions, NavigationController};
pub use error::{NavError, Result};
pub use flow::FlowSignal;
pub use snapshot::RenderSnapshot;
pub use state::{Event, EventKind, NavigationIntent, Screen};
pub use transition::{EnterOutcome, LeaveOutcome, TransitionPhase, TransitionTimings};
