//! Calendar ↔ daily view hand-off.
//!
//! Moving between the calendar and the daily view is an animated
//! continuation rather than a screen swap, so both screens stay mounted
//! for a short window. The coordinator tracks that window as a phase that
//! overlays the navigation stack:
//!
//! ```text
//!   idle ──open──► enteringDetail ──commit (push dailyView)──► ... ──settle──► idle
//!   idle ──back──► leavingDetail  ──commit (pop dailyView)───► ... ──settle──► idle
//! ```
//!
//! Each run owns a [`RunToken`]; cancelling the run removes its pending
//! steps from the timeline.

use crate::schedule::{RunToken, Timeline, TokenSource};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::debug;

/// Visual phase of the calendar/daily hand-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransitionPhase {
    #[default]
    Idle,
    /// Calendar → daily view.
    EnteringDetail,
    /// Daily view → calendar.
    LeavingDetail,
}

impl TransitionPhase {
    pub fn is_idle(&self) -> bool {
        matches!(self, TransitionPhase::Idle)
    }
}

/// Deferred steps of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionStep {
    /// Push `dailyView` once the calendar has extracted the target day.
    CommitEnter,
    /// Inbound animation finished.
    SettleEnter,
    /// Pop `dailyView`.
    CommitLeave,
    /// Outbound animation finished.
    SettleLeave,
}

/// The four fixed delays of the choreography.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionTimings {
    pub enter_commit: Duration,
    pub enter_settle: Duration,
    pub leave_commit: Duration,
    pub leave_settle: Duration,
}

impl Default for TransitionTimings {
    fn default() -> Self {
        Self {
            enter_commit: Duration::from_millis(300),
            enter_settle: Duration::from_millis(800),
            leave_commit: Duration::from_millis(100),
            leave_settle: Duration::from_millis(600),
        }
    }
}

/// Result of asking to open the daily view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnterOutcome {
    /// A forward run was started.
    Started,
    /// A forward run was already in flight; only its date changed.
    Retargeted,
    /// A backward run is in flight.
    Ignored,
}

/// Result of asking to leave the daily view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveOutcome {
    /// A backward run was started.
    Started,
    /// A forward run had not pushed `dailyView` yet and was dropped.
    Aborted,
    /// A backward run is already in flight.
    Ignored,
}

#[derive(Debug, Clone, Copy)]
struct Run {
    token: RunToken,
    committed: bool,
}

/// Transition Coordinator.
#[derive(Debug)]
pub struct TransitionCoordinator {
    phase: TransitionPhase,
    run: Option<Run>,
    timings: TransitionTimings,
    tokens: TokenSource,
    timeline: Timeline<TransitionStep>,
}

impl TransitionCoordinator {
    pub fn new(timings: TransitionTimings) -> Self {
        Self {
            phase: TransitionPhase::Idle,
            run: None,
            timings,
            tokens: TokenSource::default(),
            timeline: Timeline::new(),
        }
    }

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    /// Whether the in-flight run already mutated the stack.
    pub fn is_committed(&self) -> bool {
        self.run.is_some_and(|r| r.committed)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timeline.next_deadline()
    }

    fn start(
        &mut self,
        phase: TransitionPhase,
        first: TransitionStep,
        delay: Duration,
        now: Instant,
    ) {
        let token = self.tokens.issue();
        self.timeline.schedule(now + delay, token, first);
        self.run = Some(Run {
            token,
            committed: false,
        });
        self.phase = phase;
        debug!("transition {:?} started ({:?})", phase, token);
    }

    /// Forward protocol: record the date and enter `enteringDetail`.
    pub fn begin_enter(&mut self, date: NaiveDate, now: Instant) -> EnterOutcome {
        match self.phase {
            TransitionPhase::Idle => {
                debug!("forward transition to {}", date);
                self.start(
                    TransitionPhase::EnteringDetail,
                    TransitionStep::CommitEnter,
                    self.timings.enter_commit,
                    now,
                );
                EnterOutcome::Started
            }
            TransitionPhase::EnteringDetail => {
                debug!("forward transition retargeted to {}", date);
                EnterOutcome::Retargeted
            }
            TransitionPhase::LeavingDetail => {
                debug!("open daily view ignored while leaving it");
                EnterOutcome::Ignored
            }
        }
    }

    /// Backward protocol: enter `leavingDetail`.
    ///
    /// A forward run that has not committed is dropped instead, leaving the
    /// stack untouched; a committed one is superseded by the backward run.
    pub fn begin_leave(&mut self, now: Instant) -> LeaveOutcome {
        match self.phase {
            TransitionPhase::LeavingDetail => LeaveOutcome::Ignored,
            TransitionPhase::EnteringDetail if !self.is_committed() => {
                self.cancel();
                LeaveOutcome::Aborted
            }
            TransitionPhase::EnteringDetail | TransitionPhase::Idle => {
                self.cancel();
                self.start(
                    TransitionPhase::LeavingDetail,
                    TransitionStep::CommitLeave,
                    self.timings.leave_commit,
                    now,
                );
                LeaveOutcome::Started
            }
        }
    }

    /// Force the coordinator back to idle, cancelling every pending step.
    /// Returns the phase that was interrupted, if any.
    pub fn cancel(&mut self) -> Option<TransitionPhase> {
        let run = self.run.take()?;
        let dropped = self.timeline.cancel(run.token);
        let interrupted = self.phase;
        self.phase = TransitionPhase::Idle;
        debug!(
            "transition {:?} cancelled ({:?}, {} pending steps dropped)",
            interrupted, run.token, dropped
        );
        Some(interrupted)
    }

    /// Fire the next step due at `now`.
    ///
    /// Commit steps are returned for the caller to apply to the stack;
    /// settle steps return the phase to idle here. The settle deadline is
    /// measured from the commit's own deadline so polling late does not
    /// stretch the run.
    pub fn poll(&mut self, now: Instant) -> Option<TransitionStep> {
        let due = self.timeline.take_due(now)?;
        match due.step {
            TransitionStep::CommitEnter | TransitionStep::CommitLeave => {
                let settle = if due.step == TransitionStep::CommitEnter {
                    (TransitionStep::SettleEnter, self.timings.enter_settle)
                } else {
                    (TransitionStep::SettleLeave, self.timings.leave_settle)
                };
                if let Some(run) = self.run.as_mut() {
                    run.committed = true;
                }
                self.timeline.schedule(due.at + settle.1, due.token, settle.0);
            }
            TransitionStep::SettleEnter | TransitionStep::SettleLeave => {
                self.run = None;
                self.phase = TransitionPhase::Idle;
            }
        }
        debug!("transition step {:?} ({:?})", due.step, due.token);
        Some(due.step)
    }
}

impl Default for TransitionCoordinator {
    fn default() -> Self {
        Self::new(TransitionTimings::default())
    }
}
