//! End-to-end drag-puzzle scenario against the recording mock driver.
//!
//! Verifies the exact gesture traffic of the full journey: one navigation
//! tap to the Drag tab, nine swipes with the puzzle's literal coordinate
//! pairs each followed by a settle pause, two verification taps, and one
//! navigation tap back to Home, in that order and nothing else.

use palpar::{
    CallRecord, DragScreen, MockDriver, Point, PointerAction, PuzzlePiece, ScenarioRun, Toolkit,
    DROP_SETTLE_MS, VERIFY_POINT,
};

const DRAG_TAB_CENTER: Point = Point::new(990, 2282);
const HOME_TAB_CENTER: Point = Point::new(90, 2282);

/// Route scenario logs through the test harness; later calls are no-ops.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
}

fn expect_tap(record: &CallRecord, at: Point) {
    match record {
        CallRecord::Pointer(actions) => {
            assert_eq!(
                actions,
                &vec![
                    PointerAction::Move {
                        duration_ms: 0,
                        to: at
                    },
                    PointerAction::Down,
                    PointerAction::Pause { ms: 50 },
                    PointerAction::Up,
                ],
                "expected tap at {at}"
            );
        }
        other => panic!("expected tap at {at}, got {other:?}"),
    }
}

fn expect_swipe(record: &CallRecord, from: Point, to: Point) {
    match record {
        CallRecord::Pointer(actions) => {
            assert_eq!(
                actions,
                &vec![
                    PointerAction::Move {
                        duration_ms: 0,
                        to: from
                    },
                    PointerAction::Down,
                    PointerAction::Move {
                        duration_ms: 1000,
                        to
                    },
                    PointerAction::Up,
                ],
                "expected swipe {from} -> {to}"
            );
        }
        other => panic!("expected swipe {from} -> {to}, got {other:?}"),
    }
}

#[tokio::test]
async fn full_drag_scenario_issues_exact_gesture_order() {
    init_tracing();
    let toolkit = Toolkit::new(MockDriver::new());
    let screen = DragScreen::new(&toolkit);

    let mut run = ScenarioRun::new("drag-puzzle");
    assert!(run.phase("navigate to drag tab", screen.open()).await);
    assert!(
        run.phase("drag all pieces", screen.drag_all_pieces_to_drop_zones())
            .await
    );
    assert!(
        run.phase("verify completion", async {
            screen.tap_to_verify_result().await?;
            screen.tap_to_confirm().await
        })
        .await
    );
    assert!(run.phase("return home", screen.return_home()).await);

    let report = run.finish();
    assert!(report.passed());
    assert_eq!(report.passed_count(), 4);

    let log = toolkit.driver().gesture_log();
    // 1 nav tap + 9 * (swipe + pause) + 2 verify taps + 1 nav tap
    assert_eq!(log.len(), 22);

    expect_tap(&log[0], DRAG_TAB_CENTER);

    for (i, piece) in PuzzlePiece::ALL.iter().enumerate() {
        let (from, to) = piece.drag_vector();
        expect_swipe(&log[1 + 2 * i], from, to);
        assert_eq!(log[2 + 2 * i], CallRecord::Pause(DROP_SETTLE_MS));
    }

    expect_tap(&log[19], VERIFY_POINT);
    expect_tap(&log[20], VERIFY_POINT);
    expect_tap(&log[21], HOME_TAB_CENTER);
}

#[tokio::test]
async fn failing_drag_aborts_scenario_and_reports_skips() {
    init_tracing();
    let driver = MockDriver::new();
    // First pointer sequence is the nav tap; fail on the third drag.
    driver.fail_after("perform_pointer", 3);
    let toolkit = Toolkit::new(driver);
    let screen = DragScreen::new(&toolkit);

    let mut run = ScenarioRun::new("drag-puzzle");
    assert!(run.phase("navigate to drag tab", screen.open()).await);
    assert!(
        !run.phase("drag all pieces", screen.drag_all_pieces_to_drop_zones())
            .await
    );
    assert!(!run.phase("verify completion", screen.tap_to_verify_result()).await);
    assert!(!run.phase("return home", screen.return_home()).await);

    let report = run.finish();
    assert!(!report.passed());
    assert_eq!(report.passed_count(), 1);
    assert_eq!(report.failed_count(), 1);
    assert_eq!(report.skipped_count(), 2);

    // Nav tap plus two successful drags; the third drag died mid-flow and
    // no gesture was issued after it.
    assert_eq!(toolkit.driver().pointer_count(), 3);
}
