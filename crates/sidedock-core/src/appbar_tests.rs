use std::time::Duration;

use super::*;
use crate::config::Settings;
use crate::geometry::compute_layout;
use crate::monitor::test_monitor;
use crate::style::ZOrder;
use crate::tests::fakes::{
    CALLBACK_MESSAGE, FakeShell, FakeWindow, ShellCall, deferred_channel,
};

fn layout() -> Layout {
    let monitors = [test_monitor(
        Rect::new(0, 0, 1920, 1080),
        Rect::new(0, 0, 1920, 1040),
        96,
        true,
    )];
    compute_layout(&monitors, &Settings::default(), None).unwrap()
}

fn registrar(shell: FakeShell) -> AppBarRegistrar<FakeShell> {
    let (sink, _rx) = deferred_channel();
    AppBarRegistrar::new(shell, sink)
}

fn creates(shell: &FakeShell) -> usize {
    shell.count(|c| matches!(c, ShellCall::Create(_)))
}

#[test]
fn register_negotiates_then_moves_window() {
    // Arrange
    let mut bar = registrar(FakeShell::default());
    let reserved = Rect::new(1740, 0, 1920, 1040);

    // Act
    let created = bar.register(&layout()).unwrap();

    // Assert
    assert!(created);
    assert_eq!(
        bar.shell().calls,
        vec![
            ShellCall::RegisterMessage,
            ShellCall::Create(CALLBACK_MESSAGE),
            ShellCall::Query(DockEdge::Right, reserved),
            ShellCall::Set(DockEdge::Right, reserved),
            ShellCall::Move(reserved),
        ]
    );
    assert_eq!(bar.state().phase, AppBarPhase::Registered);
    assert_eq!(bar.state().reserved_width, 180);
    assert_eq!(bar.callback_message(), Some(CALLBACK_MESSAGE));
}

#[test]
fn second_register_is_a_no_op() {
    // Arrange
    let mut bar = registrar(FakeShell::default());
    bar.register(&layout()).unwrap();
    let calls_before = bar.shell().calls.len();

    // Act
    let created = bar.register(&layout()).unwrap();

    // Assert
    assert!(!created);
    assert_eq!(bar.shell().calls.len(), calls_before);
}

#[test]
fn dock_registers_once_then_repositions() {
    // Arrange
    let mut bar = registrar(FakeShell::default());

    // Act
    let first = bar.dock(&layout()).unwrap();
    let second = bar.dock(&layout()).unwrap();

    // Assert
    assert_eq!(first, RegisterOutcome::First);
    assert_eq!(second, RegisterOutcome::Repositioned);
    assert_eq!(creates(bar.shell()), 1);
    assert_eq!(
        bar.shell().count(|c| matches!(c, ShellCall::Set(..))),
        2
    );
}

#[test]
fn register_unregister_register_matches_single_register() {
    // Arrange
    let mut once = registrar(FakeShell::default());
    let mut cycled = registrar(FakeShell::default());

    // Act
    once.register(&layout()).unwrap();
    cycled.register(&layout()).unwrap();
    cycled.unregister().unwrap();
    cycled.register(&layout()).unwrap();

    // Assert
    assert_eq!(cycled.state(), once.state());
    assert_eq!(
        cycled
            .shell()
            .count(|c| matches!(c, ShellCall::RegisterMessage)),
        1,
        "callback id is claimed once and reused"
    );
}

#[test]
fn unregister_twice_equals_once() {
    // Arrange
    let mut bar = registrar(FakeShell::default());
    bar.register(&layout()).unwrap();

    // Act
    bar.unregister().unwrap();
    bar.unregister().unwrap();

    // Assert
    assert_eq!(bar.shell().count(|c| matches!(c, ShellCall::Remove)), 1);
    assert_eq!(bar.state().phase, AppBarPhase::Unregistered);
    assert_eq!(bar.reservation(), None);
}

#[test]
fn reposition_while_unregistered_is_ignored() {
    // Arrange
    let mut bar = registrar(FakeShell::default());

    // Act
    let result = bar.reposition(&layout()).unwrap();

    // Assert
    assert_eq!(result, None);
    assert!(bar.shell().calls.is_empty());
}

#[test]
fn none_edge_is_rejected_before_any_shell_call() {
    // Arrange
    let mut bar = registrar(FakeShell::default());
    let mut bad = layout();
    bad.edge = DockEdge::None;

    // Act
    let result = bar.register(&bad);

    // Assert
    assert_eq!(result, Err(DockError::InvalidDockEdge));
    assert!(bar.shell().calls.is_empty());
    assert_eq!(bar.state().phase, AppBarPhase::Unregistered);
}

#[test]
fn failed_create_returns_to_unregistered() {
    // Arrange
    let mut bar = registrar(FakeShell {
        fail_create: true,
        ..FakeShell::default()
    });

    // Act
    let result = bar.register(&layout());

    // Assert
    assert!(matches!(result, Err(DockError::Os(_))));
    assert_eq!(bar.state().phase, AppBarPhase::Unregistered);
    assert!(!bar.shell().calls.contains(&ShellCall::Remove));
}

#[test]
fn window_moves_to_layout_not_to_granted_rect() {
    // Arrange: another app-bar owns 40px on the right.
    let mut bar = registrar(FakeShell {
        taskbar_right: Some(40),
        ..FakeShell::default()
    });

    // Act
    bar.register(&layout()).unwrap();

    // Assert
    let calls = &bar.shell().calls;
    assert!(calls.contains(&ShellCall::Set(
        DockEdge::Right,
        Rect::new(1700, 0, 1880, 1040)
    )));
    assert_eq!(
        calls.last(),
        Some(&ShellCall::Move(Rect::new(1740, 0, 1920, 1040)))
    );
}

#[test]
fn notifications_wait_for_start_listening() {
    // Arrange
    let mut bar = registrar(FakeShell::default());
    let mut style = StyleController::new(FakeWindow::default());
    bar.register(&layout()).unwrap();

    // Act
    bar.handle_notification(AppBarNotification::PositionChanged, &mut style)
        .unwrap();

    // Assert
    assert!(!bar.has_pending_reposition());
}

#[test]
fn start_listening_requires_registration() {
    // Arrange
    let mut bar = registrar(FakeShell::default());

    // Act
    bar.start_listening();

    // Assert
    assert!(!bar.is_listening());
}

#[test]
fn position_changes_coalesce_into_one_reposition() {
    // Arrange
    let (sink, rx) = deferred_channel();
    let mut bar = AppBarRegistrar::new(FakeShell::default(), sink);
    let mut style = StyleController::new(FakeWindow::default());
    bar.register(&layout()).unwrap();
    bar.start_listening();

    // Act
    for _ in 0..5 {
        bar.handle_notification(AppBarNotification::PositionChanged, &mut style)
            .unwrap();
    }
    let mut accepted = 0;
    while let Ok(fired) = rx.recv_timeout(POSITION_CHANGED_DEBOUNCE + Duration::from_millis(400)) {
        assert_eq!(*fired.payload(), Deferred::ShellPositionChanged);
        if bar.accept_reposition(fired) {
            accepted += 1;
        }
    }

    // Assert
    assert_eq!(accepted, 1);
}

#[test]
fn full_screen_restores_prior_topmost() {
    // Arrange
    let mut bar = registrar(FakeShell::default());
    let mut style = StyleController::new(FakeWindow::default());
    style.set_topmost(false).unwrap();
    bar.register(&layout()).unwrap();
    bar.start_listening();

    // Act
    bar.handle_notification(AppBarNotification::FullScreen(true), &mut style)
        .unwrap();

    // Assert
    assert!(!style.is_topmost());

    // Act
    bar.handle_notification(AppBarNotification::FullScreen(false), &mut style)
        .unwrap();

    // Assert
    assert!(style.is_topmost());
    assert_eq!(
        style.backend().z_orders,
        vec![ZOrder::Topmost, ZOrder::Bottom, ZOrder::Topmost]
    );
}

#[test]
fn full_screen_leaves_non_topmost_panel_alone() {
    // Arrange
    let mut bar = registrar(FakeShell::default());
    let mut style = StyleController::new(FakeWindow::default());
    bar.register(&layout()).unwrap();
    bar.start_listening();

    // Act
    bar.handle_notification(AppBarNotification::FullScreen(true), &mut style)
        .unwrap();
    bar.handle_notification(AppBarNotification::FullScreen(false), &mut style)
        .unwrap();

    // Assert
    assert!(style.backend().z_orders.is_empty());
    assert!(!style.is_topmost());
}

#[test]
fn repeated_full_screen_close_does_not_repin() {
    // Arrange
    let mut bar = registrar(FakeShell::default());
    let mut style = StyleController::new(FakeWindow::default());
    style.set_topmost(false).unwrap();
    bar.register(&layout()).unwrap();
    bar.start_listening();
    bar.handle_notification(AppBarNotification::FullScreen(true), &mut style)
        .unwrap();
    bar.handle_notification(AppBarNotification::FullScreen(false), &mut style)
        .unwrap();
    style.clear_topmost(false).unwrap();

    // Act
    bar.handle_notification(AppBarNotification::FullScreen(false), &mut style)
        .unwrap();

    // Assert
    assert!(!style.is_topmost());
}

#[test]
fn zero_reservation_slot_still_receives_full_screen() {
    // Arrange
    let monitors = [test_monitor(
        Rect::new(0, 0, 1920, 1080),
        Rect::new(0, 0, 1920, 1040),
        96,
        true,
    )];
    let mut settings = Settings::default();
    settings.behavior.use_appbar = false;
    let layout = compute_layout(&monitors, &settings, None).unwrap();
    let mut bar = registrar(FakeShell::default());
    let mut style = StyleController::new(FakeWindow::default());
    style.set_topmost(false).unwrap();

    // Act
    let outcome = bar.dock(&layout).unwrap();
    bar.start_listening();
    bar.handle_notification(AppBarNotification::FullScreen(true), &mut style)
        .unwrap();

    // Assert
    assert_eq!(outcome, RegisterOutcome::First);
    assert!(bar.is_registered());
    assert_eq!(bar.state().reserved_width, 0);
    assert_eq!(
        bar.shell().calls.last(),
        Some(&ShellCall::Move(layout.window_bounds()))
    );
    assert!(!style.is_topmost());
    assert_eq!(style.backend().z_orders, vec![ZOrder::Topmost, ZOrder::Bottom]);
}

#[test]
fn unregister_stops_listening_and_cancels_reposition() {
    // Arrange
    let (sink, rx) = deferred_channel();
    let mut bar = AppBarRegistrar::new(FakeShell::default(), sink);
    let mut style = StyleController::new(FakeWindow::default());
    bar.register(&layout()).unwrap();
    bar.start_listening();
    bar.handle_notification(AppBarNotification::PositionChanged, &mut style)
        .unwrap();

    // Act
    bar.unregister().unwrap();

    // Assert
    assert!(!bar.is_listening());
    assert!(!bar.has_pending_reposition());
    assert!(
        rx.recv_timeout(POSITION_CHANGED_DEBOUNCE + Duration::from_millis(300))
            .is_err()
    );
}
