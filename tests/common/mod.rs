//! Shared test utilities for navigation integration tests.
//!
//! Provides `Harness` - a controller paired with a virtual clock, so timed
//! transitions can be stepped through without sleeping.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use nutriflow::controller::{ControllerOptions, NavigationController};
use nutriflow::state::{Event, EventKind, Screen};

/// Serializes tests that touch process-wide environment variables.
#[allow(dead_code)]
pub static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Controller plus the virtual time it has been driven to.
#[allow(dead_code)]
pub struct Harness {
    pub nav: NavigationController,
    pub now: Instant,
}

#[allow(dead_code)]
impl Harness {
    /// Fresh controller with the default start-up options (welcome).
    pub fn new() -> Self {
        Self::with_options(ControllerOptions::default())
    }

    /// Fresh controller whose stack starts as `[screen]`.
    pub fn at(screen: Screen) -> Self {
        Self::with_options(ControllerOptions {
            initial_screen: screen,
            ..ControllerOptions::default()
        })
    }

    pub fn with_options(options: ControllerOptions) -> Self {
        Self {
            nav: NavigationController::new(options),
            now: Instant::now(),
        }
    }

    /// Let `ms` milliseconds pass and fire whatever came due.
    pub fn wait(&mut self, ms: u64) -> usize {
        self.now += Duration::from_millis(ms);
        self.nav.advance(self.now)
    }

    /// Let time pass until nothing is scheduled.
    pub fn settle(&mut self) {
        while let Some(at) = self.nav.next_deadline() {
            self.now = self.now.max(at);
            self.nav.advance(self.now);
        }
    }

    pub fn stack(&self) -> Vec<Screen> {
        self.nav.stack().to_vec()
    }
}

#[allow(dead_code)]
pub fn event(id: &str) -> Event {
    Event::new(id, "Morning swim", "6:30 AM", EventKind::Swim)
}
