//! Async host for the navigation controller.
//!
//! The controller runs on a single tokio task, which keeps the
//! run-to-completion model: commands are applied one at a time in arrival
//! order and deferred steps fire between commands, never during one. The
//! task sleeps until the controller's next deadline, so cancelled steps are
//! simply never woken for.

use crate::controller::NavigationController;
use crate::error::{NavError, Result};
use crate::snapshot::RenderSnapshot;
use crate::state::{Event, NavigationIntent, Screen};
use chrono::NaiveDate;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, warn};

enum Command {
    Dispatch(NavigationIntent, oneshot::Sender<Result<()>>),
    Snapshot(oneshot::Sender<RenderSnapshot>),
    Shutdown,
}

/// Cloneable handle to a running controller.
#[derive(Debug, Clone)]
pub struct NavigatorHandle {
    commands: mpsc::UnboundedSender<Command>,
    snapshots: watch::Receiver<RenderSnapshot>,
}

/// Move `controller` onto a tokio task.
///
/// The join handle yields the controller back once the handle side calls
/// [`NavigatorHandle::shutdown`] or every handle is dropped.
pub fn spawn(
    controller: NavigationController,
) -> (NavigatorHandle, JoinHandle<NavigationController>) {
    let (commands, rx) = mpsc::unbounded_channel();
    let (snapshot_tx, snapshots) = watch::channel(controller.snapshot());
    let task = tokio::spawn(drive(controller, rx, snapshot_tx));
    (
        NavigatorHandle {
            commands,
            snapshots,
        },
        task,
    )
}

fn now() -> std::time::Instant {
    Instant::now().into_std()
}

async fn sleep_until(deadline: Option<std::time::Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(Instant::from_std(at)).await,
        None => std::future::pending().await,
    }
}

fn publish(controller: &NavigationController, snapshots: &watch::Sender<RenderSnapshot>) {
    let next = controller.snapshot();
    snapshots.send_if_modified(|current| {
        if *current == next {
            false
        } else {
            *current = next;
            true
        }
    });
}

async fn drive(
    mut controller: NavigationController,
    mut commands: mpsc::UnboundedReceiver<Command>,
    snapshots: watch::Sender<RenderSnapshot>,
) -> NavigationController {
    loop {
        let deadline = controller.next_deadline();
        tokio::select! {
            command = commands.recv() => {
                // Steps that came due while we were idle go first
                controller.advance(now());
                match command {
                    Some(Command::Dispatch(intent, reply)) => {
                        debug!("dispatch {:?}", intent);
                        let result = controller.dispatch(intent, now());
                        if let Err(e) = &result {
                            warn!("navigation rejected: {}", e);
                        }
                        // Publish before replying so callers observe their own effect
                        publish(&controller, &snapshots);
                        let _ = reply.send(result);
                    }
                    Some(Command::Snapshot(reply)) => {
                        let _ = reply.send(controller.snapshot());
                    }
                    Some(Command::Shutdown) | None => break,
                }
            }
            () = sleep_until(deadline) => {
                controller.advance(now());
            }
        }

        publish(&controller, &snapshots);
    }
    debug!("navigation controller stopped on {}", controller.active());
    controller
}

impl NavigatorHandle {
    /// Send an intent and wait for the controller to apply it.
    pub async fn dispatch(&self, intent: NavigationIntent) -> Result<()> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(Command::Dispatch(intent, reply))
            .map_err(|_| NavError::ControllerClosed)?;
        rx.await.map_err(|_| NavError::ControllerClosed)?
    }

    /// Fresh snapshot, after firing anything already due.
    pub async fn snapshot(&self) -> Result<RenderSnapshot> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(Command::Snapshot(reply))
            .map_err(|_| NavError::ControllerClosed)?;
        rx.await.map_err(|_| NavError::ControllerClosed)
    }

    /// Last published snapshot, without a round-trip.
    pub fn latest(&self) -> RenderSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver notified whenever the snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<RenderSnapshot> {
        self.snapshots.clone()
    }

    /// Wait until no transition phase is active.
    pub async fn settled(&self) -> Result<RenderSnapshot> {
        let mut rx = self.subscribe();
        let snapshot = rx
            .wait_for(|s| s.phase.is_idle())
            .await
            .map_err(|_| NavError::ControllerClosed)?;
        Ok(snapshot.clone())
    }

    pub fn shutdown(&self) {
        let _ = self.commands.send(Command::Shutdown);
    }

    // ==================== Callback contracts ====================

    pub async fn navigate(&self, screen: Screen) -> Result<()> {
        self.dispatch(NavigationIntent::Navigate(screen)).await
    }

    pub async fn back(&self) -> Result<()> {
        self.dispatch(NavigationIntent::Back).await
    }

    pub async fn select_event(&self, item: Event) -> Result<()> {
        self.dispatch(NavigationIntent::SelectEvent(item)).await
    }

    pub async fn open_daily_view(&self, date: NaiveDate) -> Result<()> {
        self.dispatch(NavigationIntent::OpenDailyView(date)).await
    }

    pub async fn set_modal_open(&self, open: bool) -> Result<()> {
        self.dispatch(NavigationIntent::ModalStateChange(open)).await
    }

    pub async fn set_input_focused(&self, focused: bool) -> Result<()> {
        self.dispatch(NavigationIntent::InputFocus(focused)).await
    }
}
