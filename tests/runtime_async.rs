//! Integration tests for the async runtime host.
//!
//! Tokio time is paused, so deferred transition steps fire as soon as the
//! runtime would otherwise sit idle, without real sleeping.

use chrono::NaiveDate;
use nutriflow::controller::{ControllerOptions, NavigationController};
use nutriflow::error::NavError;
use nutriflow::runtime;
use nutriflow::state::{Event, EventKind, Screen};
use nutriflow::transition::TransitionPhase;
use std::time::Duration;

fn controller_at(screen: Screen) -> NavigationController {
    NavigationController::new(ControllerOptions {
        initial_screen: screen,
        ..ControllerOptions::default()
    })
}

fn june_4() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 6, 4).unwrap()
}

#[tokio::test(start_paused = true)]
async fn daily_view_transition_runs_to_completion() {
    let (handle, task) = runtime::spawn(controller_at(Screen::Calendar));

    handle.open_daily_view(june_4()).await.unwrap();
    assert_eq!(handle.latest().phase, TransitionPhase::EnteringDetail);

    let settled = handle.settled().await.unwrap();
    assert_eq!(settled.stack, vec![Screen::Calendar, Screen::DailyView]);
    assert_eq!(settled.active_date, june_4());

    handle.back().await.unwrap();
    assert_eq!(handle.latest().phase, TransitionPhase::LeavingDetail);
    let settled = handle.settled().await.unwrap();
    assert_eq!(settled.stack, vec![Screen::Calendar]);

    handle.shutdown();
    let controller = task.await.unwrap();
    assert!(controller.is_settled());
}

#[tokio::test(start_paused = true)]
async fn commit_happens_after_the_first_delay() {
    let (handle, _task) = runtime::spawn(controller_at(Screen::Calendar));
    handle.open_daily_view(june_4()).await.unwrap();

    tokio::time::sleep(Duration::from_millis(299)).await;
    assert_eq!(handle.snapshot().await.unwrap().active, Screen::Calendar);

    tokio::time::sleep(Duration::from_millis(2)).await;
    let snap = handle.snapshot().await.unwrap();
    assert_eq!(snap.active, Screen::DailyView);
    assert_eq!(snap.phase, TransitionPhase::EnteringDetail);
}

#[tokio::test(start_paused = true)]
async fn tab_navigation_cancels_pending_steps() {
    let (handle, _task) = runtime::spawn(controller_at(Screen::Calendar));
    handle.open_daily_view(june_4()).await.unwrap();
    handle.navigate(Screen::Home).await.unwrap();

    tokio::time::sleep(Duration::from_secs(5)).await;
    let snap = handle.snapshot().await.unwrap();
    assert_eq!(snap.stack, vec![Screen::Home]);
    assert_eq!(snap.phase, TransitionPhase::Idle);
}

#[tokio::test(start_paused = true)]
async fn rejected_intents_come_back_as_errors() {
    let (handle, _task) = runtime::spawn(controller_at(Screen::Insights));
    assert_eq!(
        handle.set_input_focused(true).await,
        Err(NavError::FocusOutOfScope {
            active: Screen::Insights
        })
    );
    assert_eq!(
        handle.navigate(Screen::ItemDetail).await,
        Err(NavError::RequiresSelection(Screen::ItemDetail))
    );

    // The controller keeps serving after a rejection
    handle
        .select_event(Event::new("w1", "Tempo run", "6:00 AM", EventKind::Workout))
        .await
        .unwrap();
    assert_eq!(handle.latest().active, Screen::ItemDetail);
}

#[tokio::test(start_paused = true)]
async fn subscribers_see_every_phase() {
    let (handle, _task) = runtime::spawn(controller_at(Screen::Calendar));
    let mut rx = handle.subscribe();

    handle.open_daily_view(june_4()).await.unwrap();

    let mut phases = Vec::new();
    loop {
        rx.changed().await.unwrap();
        let snap = rx.borrow_and_update().clone();
        phases.push((snap.active, snap.phase));
        if snap.phase.is_idle() {
            break;
        }
    }
    assert_eq!(
        phases,
        vec![
            (Screen::Calendar, TransitionPhase::EnteringDetail),
            (Screen::DailyView, TransitionPhase::EnteringDetail),
            (Screen::DailyView, TransitionPhase::Idle),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn closed_controller_reports_closed() {
    let (handle, task) = runtime::spawn(controller_at(Screen::Home));
    handle.shutdown();
    task.await.unwrap();

    assert_eq!(handle.back().await, Err(NavError::ControllerClosed));
    assert!(matches!(
        handle.snapshot().await,
        Err(NavError::ControllerClosed)
    ));
}
