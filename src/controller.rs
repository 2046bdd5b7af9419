//! Navigation and transition-coordination controller.
//!
//! One record owns every piece of cross-screen state (history, selection,
//! gate, transition phase, active date) and every mutation goes through the
//! methods below, so the invariants are enforced here and nowhere else:
//!
//! - the stack is never empty and its tail is the active screen;
//! - a selection exists exactly while `itemDetail` is active;
//! - leaving a screen revokes the gate leases it owned;
//! - a structural navigation cancels any in-flight deferred run.
//!
//! The controller is synchronous. Time enters only through the `now`
//! argument; deferred steps fire when [`NavigationController::advance`] is
//! called with a time at or past their deadline.

use crate::error::{NavError, Result};
use crate::flow::{FlowEffect, FlowSignal, SocialProvider};
use crate::schedule::{RunToken, Timeline, TokenSource};
use crate::snapshot::{ChromeHints, RenderSnapshot};
use crate::state::{
    Event, FocusLease, GateState, ModalLease, NavigationIntent, NavigationStack, Screen,
    SelectionContext,
};
use crate::transition::{
    EnterOutcome, LeaveOutcome, TransitionCoordinator, TransitionPhase, TransitionStep,
    TransitionTimings,
};
use chrono::NaiveDate;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Calendar date selected at process start.
pub fn default_initial_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 6, 4).unwrap_or(NaiveDate::MIN)
}

/// Start-up parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerOptions {
    pub initial_screen: Screen,
    pub initial_date: NaiveDate,
    pub timings: TransitionTimings,
    /// Simulated identity provider round-trip.
    pub social_login_delay: Duration,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            initial_screen: Screen::Welcome,
            initial_date: default_initial_date(),
            timings: TransitionTimings::default(),
            social_login_delay: Duration::from_millis(1000),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlowStep {
    CompleteLogin(SocialProvider),
}

/// The navigation controller.
#[derive(Debug)]
pub struct NavigationController {
    stack: NavigationStack,
    selection: SelectionContext,
    gate: GateState,
    transition: TransitionCoordinator,
    active_date: NaiveDate,
    pending_email: Option<String>,

    flow_tokens: TokenSource,
    flow_timeline: Timeline<FlowStep>,
    flow_run: Option<RunToken>,
    social_login_delay: Duration,

    /// Leases held on behalf of the boolean gate callbacks.
    modal_adapter: Option<ModalLease>,
    focus_adapter: Option<FocusLease>,
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new(ControllerOptions::default())
    }
}

impl NavigationController {
    pub fn new(options: ControllerOptions) -> Self {
        // The detail screen needs an item, which nothing can supply at start-up
        let root = if options.initial_screen == Screen::ItemDetail {
            warn!("itemDetail cannot be the initial screen, starting on home");
            Screen::Home
        } else {
            options.initial_screen
        };
        Self {
            stack: NavigationStack::new(root),
            selection: SelectionContext::new(),
            gate: GateState::new(),
            transition: TransitionCoordinator::new(options.timings),
            active_date: options.initial_date,
            pending_email: None,
            flow_tokens: TokenSource::default(),
            flow_timeline: Timeline::new(),
            flow_run: None,
            social_login_delay: options.social_login_delay,
            modal_adapter: None,
            focus_adapter: None,
        }
    }

    // ==================== Read side ====================

    pub fn active(&self) -> Screen {
        self.stack.tail()
    }

    pub fn stack(&self) -> &[Screen] {
        self.stack.entries()
    }

    pub fn phase(&self) -> TransitionPhase {
        self.transition.phase()
    }

    pub fn selection(&self) -> Option<&Event> {
        self.selection.current()
    }

    pub fn gate(&self) -> &GateState {
        &self.gate
    }

    pub fn active_date(&self) -> NaiveDate {
        self.active_date
    }

    pub fn pending_email(&self) -> Option<&str> {
        self.pending_email.as_deref()
    }

    /// Earliest deadline of any deferred step.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.transition.next_deadline(), self.flow_timeline.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// No deferred step is pending.
    pub fn is_settled(&self) -> bool {
        self.next_deadline().is_none()
    }

    /// Whether the selection and stack agree.
    pub fn invariants_hold(&self) -> bool {
        let detail_active = self.active() == Screen::ItemDetail;
        let buried = self.stack.occurrences(Screen::ItemDetail) - usize::from(detail_active);
        self.selection.is_selected() == detail_active && self.selection.parked_len() == buried
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        let active = self.active();
        RenderSnapshot {
            active,
            stack: self.stack.entries().to_vec(),
            depth: self.stack.depth(),
            is_main: active.is_main(),
            is_full_width: active.is_full_width(),
            phase: self.phase(),
            selection: self.selection.current().cloned(),
            modal_open: self.gate.modal_open(),
            input_focused: self.gate.input_focused(),
            active_date: self.active_date,
            pending_email: self.pending_email.clone(),
            chrome: ChromeHints::derive(active, &self.gate),
        }
    }

    // ==================== Single entry point ====================

    /// Apply a collaborator signal.
    pub fn dispatch(&mut self, intent: NavigationIntent, now: Instant) -> Result<()> {
        match intent {
            NavigationIntent::Navigate(screen) => self.navigate_to(screen, now)?,
            NavigationIntent::Back => self.go_back(now),
            NavigationIntent::SelectEvent(item) => self.push_detail(item),
            NavigationIntent::Expand(from) => self.expand(from),
            NavigationIntent::OpenDailyView(date) => {
                self.open_daily_view(date, now);
            }
            NavigationIntent::PushChild(screen) => self.push_child(screen, now)?,
            NavigationIntent::SelectDate(date) => self.select_date(date),
            NavigationIntent::ModalStateChange(open) => self.set_modal_open(open)?,
            NavigationIntent::InputFocus(focused) => self.set_input_focused(focused)?,
            NavigationIntent::Flow(signal) => {
                self.flow(signal, now);
            }
        }
        Ok(())
    }

    // ==================== Navigation Stack Manager ====================

    /// Tab navigation resets history; anything else is pushed.
    pub fn navigate_to(&mut self, screen: Screen, now: Instant) -> Result<()> {
        match screen {
            Screen::ItemDetail => {
                warn!("navigate to itemDetail without an item");
                Err(NavError::RequiresSelection(screen))
            }
            Screen::DailyView => {
                self.open_daily_view(self.active_date, now);
                Ok(())
            }
            _ => {
                self.supersede();
                if screen.is_main() {
                    self.apply_reset(screen);
                } else {
                    self.apply_push(screen);
                }
                Ok(())
            }
        }
    }

    /// Open `item` in the detail screen on top of the current path.
    pub fn push_detail(&mut self, item: Event) {
        self.supersede();
        self.apply_push(Screen::ItemDetail);
        self.selection.select(item);
    }

    /// Path-preserving forward navigation (settings sub-screens).
    pub fn push_child(&mut self, screen: Screen, now: Instant) -> Result<()> {
        match screen {
            Screen::ItemDetail => Err(NavError::RequiresSelection(screen)),
            Screen::DailyView => {
                self.open_daily_view(self.active_date, now);
                Ok(())
            }
            _ => {
                self.supersede();
                self.apply_push(screen);
                Ok(())
            }
        }
    }

    /// Show the full-day list for the active date.
    pub fn expand(&mut self, from: Screen) {
        debug!("expand to full day from {}", from);
        self.supersede();
        self.apply_push(Screen::FullDay);
    }

    /// Back navigation.
    ///
    /// Leaving the daily view (or backing out of a zoom that is still
    /// animating) is handed to the transition coordinator.
    pub fn go_back(&mut self, now: Instant) {
        self.cancel_flow_run();
        if !self.transition.phase().is_idle() || self.active() == Screen::DailyView {
            match self.transition.begin_leave(now) {
                LeaveOutcome::Started => debug!("leaving daily view"),
                LeaveOutcome::Aborted => debug!("zoom into day abandoned on {}", self.active()),
                LeaveOutcome::Ignored => debug!("back ignored while leaving daily view"),
            }
            return;
        }
        self.apply_pop(Screen::Home);
    }

    // ==================== Transition Coordinator ====================

    /// Zoom from the calendar into `date`.
    pub fn open_daily_view(&mut self, date: NaiveDate, now: Instant) -> EnterOutcome {
        if self.transition.phase() == TransitionPhase::LeavingDetail {
            return self.transition.begin_enter(date, now);
        }
        self.active_date = date;
        if self.transition.phase().is_idle() && self.active() == Screen::DailyView {
            debug!("daily view already active, date set to {}", date);
            return EnterOutcome::Retargeted;
        }
        self.cancel_flow_run();
        self.transition.begin_enter(date, now)
    }

    /// The calendar or daily view picked another date.
    pub fn select_date(&mut self, date: NaiveDate) {
        debug!("active date {} -> {}", self.active_date, date);
        self.active_date = date;
    }

    /// Fire every deferred step due at `now`, in deadline order.
    /// Returns how many steps fired.
    pub fn advance(&mut self, now: Instant) -> usize {
        let mut fired = 0;
        loop {
            let transition_due = self.transition.next_deadline().filter(|at| *at <= now);
            let flow_due = self.flow_timeline.next_deadline().filter(|at| *at <= now);
            let progressed = match (transition_due, flow_due) {
                (None, None) => break,
                (Some(t), Some(f)) if f < t => self.fire_flow(now),
                (Some(_), _) => self.fire_transition(now),
                (None, Some(_)) => self.fire_flow(now),
            };
            if !progressed {
                break;
            }
            fired += 1;
        }
        fired
    }

    fn fire_transition(&mut self, now: Instant) -> bool {
        let Some(step) = self.transition.poll(now) else {
            return false;
        };
        match step {
            TransitionStep::CommitEnter => self.apply_push(Screen::DailyView),
            TransitionStep::CommitLeave => {
                self.apply_pop(Screen::Calendar);
            }
            TransitionStep::SettleEnter | TransitionStep::SettleLeave => {
                debug!("transition settled on {}", self.active());
            }
        }
        true
    }

    // ==================== Flows ====================

    /// Apply an onboarding/authentication/settings signal.
    /// Returns false when the signal has no destination.
    pub fn flow(&mut self, signal: FlowSignal, now: Instant) -> bool {
        match signal.effect() {
            FlowEffect::Reset(screen) => {
                if let FlowSignal::AccountCreated { email } = signal {
                    info!("account created, awaiting verification");
                    self.pending_email = Some(email);
                }
                self.supersede();
                self.apply_reset(screen);
                true
            }
            FlowEffect::Push(screen) => {
                self.supersede();
                self.apply_push(screen);
                true
            }
            FlowEffect::DeferLogin(provider) => {
                self.supersede();
                let token = self.flow_tokens.issue();
                self.flow_timeline.schedule(
                    now + self.social_login_delay,
                    token,
                    FlowStep::CompleteLogin(provider),
                );
                self.flow_run = Some(token);
                info!("{} login attempted", provider.as_str());
                true
            }
            FlowEffect::Unsupported => {
                warn!("flow signal {:?} has no screen", signal);
                false
            }
        }
    }

    fn fire_flow(&mut self, now: Instant) -> bool {
        let Some(due) = self.flow_timeline.take_due(now) else {
            return false;
        };
        self.flow_run = None;
        match due.step {
            FlowStep::CompleteLogin(provider) => {
                info!("{} login succeeded", provider.as_str());
                self.transition.cancel();
                self.apply_reset(Screen::Home);
            }
        }
        true
    }

    fn cancel_flow_run(&mut self) {
        if let Some(token) = self.flow_run.take() {
            self.flow_timeline.cancel(token);
            debug!("pending flow step cancelled ({:?})", token);
        }
    }

    // ==================== Modal/Focus Gate ====================

    /// Grant the modal gate to the active screen.
    pub fn acquire_modal(&mut self) -> Result<ModalLease> {
        self.gate.acquire_modal(self.active())
    }

    pub fn release_modal(&mut self, lease: ModalLease) -> bool {
        self.gate.release_modal(lease)
    }

    /// Grant input focus; only the home screen hosts a focusable input.
    pub fn acquire_focus(&mut self) -> Result<FocusLease> {
        self.gate.acquire_focus(self.active())
    }

    pub fn release_focus(&mut self, lease: FocusLease) -> bool {
        self.gate.release_focus(lease)
    }

    /// Boolean overlay callback (`onModalStateChange`).
    pub fn set_modal_open(&mut self, open: bool) -> Result<()> {
        if open {
            let lease = self.acquire_modal()?;
            self.modal_adapter = Some(lease);
        } else if let Some(lease) = self.modal_adapter.take() {
            self.gate.release_modal(lease);
        }
        Ok(())
    }

    /// Boolean focus callback (`onAITextboxFocus`).
    pub fn set_input_focused(&mut self, focused: bool) -> Result<()> {
        if focused {
            let lease = self.acquire_focus()?;
            self.focus_adapter = Some(lease);
        } else if let Some(lease) = self.focus_adapter.take() {
            self.gate.release_focus(lease);
        }
        Ok(())
    }

    // ==================== Structural mutations ====================

    /// A new navigation supersedes anything still scheduled.
    fn supersede(&mut self) {
        if let Some(phase) = self.transition.cancel() {
            debug!("{:?} superseded on {}", phase, self.active());
        }
        self.cancel_flow_run();
    }

    fn leave(&mut self, left: Screen, next: Screen) {
        if left != next {
            self.gate.revoke_owned_by(left);
        }
    }

    fn apply_push(&mut self, screen: Screen) {
        let left = self.active();
        if left == Screen::ItemDetail {
            self.selection.park();
        }
        self.leave(left, screen);
        self.stack.push(screen);
    }

    fn apply_reset(&mut self, root: Screen) {
        let left = self.active();
        self.selection.reset();
        self.leave(left, root);
        self.stack.reset(root);
    }

    fn apply_pop(&mut self, fallback: Screen) -> Screen {
        let left = self.active();
        if left == Screen::ItemDetail {
            self.selection.clear();
        }
        let next = self.stack.pop_or(fallback);
        if next == Screen::ItemDetail {
            self.selection.restore();
        }
        self.leave(left, next);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::EventKind;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn event(id: &str) -> Event {
        Event::new(id, "Lunch", "12:30 PM", EventKind::Meal)
    }

    fn at(screen: Screen) -> NavigationController {
        NavigationController::new(ControllerOptions {
            initial_screen: screen,
            ..ControllerOptions::default()
        })
    }

    #[test]
    fn test_starts_at_welcome() {
        let nav = NavigationController::default();
        assert_eq!(nav.stack(), &[Screen::Welcome]);
        assert_eq!(nav.active_date(), default_initial_date());
        assert!(nav.phase().is_idle());
        assert!(nav.is_settled());
    }

    #[test]
    fn test_detail_park_and_restore() {
        let t0 = Instant::now();
        let mut nav = at(Screen::Home);
        nav.push_detail(event("a"));
        nav.push_child(Screen::Support, t0).unwrap();
        assert!(nav.selection().is_none());
        assert!(nav.invariants_hold());

        nav.go_back(t0);
        assert_eq!(nav.active(), Screen::ItemDetail);
        assert_eq!(nav.selection().map(|e| e.id.as_str()), Some("a"));
        assert!(nav.invariants_hold());
    }

    #[test]
    fn test_navigate_to_item_detail_rejected() {
        let t0 = Instant::now();
        let mut nav = at(Screen::Home);
        assert_eq!(
            nav.navigate_to(Screen::ItemDetail, t0),
            Err(NavError::RequiresSelection(Screen::ItemDetail))
        );
        assert_eq!(nav.stack(), &[Screen::Home]);
    }

    #[test]
    fn test_navigate_to_daily_view_uses_transition() {
        let t0 = Instant::now();
        let mut nav = at(Screen::Calendar);
        nav.navigate_to(Screen::DailyView, t0).unwrap();
        assert_eq!(nav.phase(), TransitionPhase::EnteringDetail);
        nav.advance(t0 + ms(1100));
        assert_eq!(nav.stack(), &[Screen::Calendar, Screen::DailyView]);
    }

    #[test]
    fn test_advance_reports_fired_steps() {
        let t0 = Instant::now();
        let mut nav = at(Screen::Calendar);
        nav.open_daily_view(default_initial_date(), t0);
        assert_eq!(nav.advance(t0 + ms(10)), 0);
        assert_eq!(nav.advance(t0 + ms(300)), 1);
        assert_eq!(nav.advance(t0 + ms(2000)), 1);
        assert!(nav.is_settled());
    }

    #[test]
    fn test_next_deadline_is_earliest() {
        let t0 = Instant::now();
        let mut nav = at(Screen::Login);
        nav.flow(FlowSignal::SocialLogin(SocialProvider::Google), t0);
        assert_eq!(nav.next_deadline(), Some(t0 + ms(1000)));
    }

    #[test]
    fn test_modal_adapter_roundtrip() {
        let mut nav = at(Screen::Insights);
        nav.set_modal_open(true).unwrap();
        assert!(nav.snapshot().modal_open);
        assert!(!nav.snapshot().chrome.show_bottom_nav);
        nav.set_modal_open(false).unwrap();
        assert!(!nav.gate().modal_open());
        // Closing again is harmless
        nav.set_modal_open(false).unwrap();
    }

    #[test]
    fn test_item_detail_is_not_a_valid_root() {
        let nav = at(Screen::ItemDetail);
        assert_eq!(nav.stack(), &[Screen::Home]);
        assert!(nav.invariants_hold());
    }
}
