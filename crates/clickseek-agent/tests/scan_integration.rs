//! Integration tests for the scan pipeline.
//!
//! These tests exercise the application layer of clickseek-agent end-to-end:
//! `ScanSession` + capture/stitch/locate/resolve + mock infrastructure.
//! No display or input device is touched.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use image::{imageops, Rgba, RgbaImage};

use clickseek_agent::application::capture_frame::ScreenCapturer;
use clickseek_agent::application::click_target::PointerDriver;
use clickseek_agent::application::scan_loop::{RunState, ScanSession};
use clickseek_agent::infrastructure::pointer::MockPointerDriver;
use clickseek_agent::infrastructure::screen_capture::MockScreenCapturer;
use clickseek_core::{Monitor, ScanEvent, StatusUpdate, TargetPoint};

// ── Fixtures ──────────────────────────────────────────────────────────────────

/// An 8x8 two-colour checker: distinctive enough not to match a gray desktop.
fn checker_template() -> RgbaImage {
    RgbaImage::from_fn(8, 8, |x, y| {
        if (x / 2 + y / 2) % 2 == 0 {
            Rgba([220, 40, 40, 255])
        } else {
            Rgba([40, 40, 220, 255])
        }
    })
}

/// A gray monitor-sized frame with the template pasted at `(x, y)`.
fn frame_with_template(width: u32, height: u32, template: &RgbaImage, x: u32, y: u32) -> RgbaImage {
    let mut frame = RgbaImage::from_pixel(width, height, Rgba([128, 128, 128, 255]));
    imageops::replace(&mut frame, template, i64::from(x), i64::from(y));
    frame
}

/// Receives the next status, panicking on `Finished` or a closed channel.
async fn next_status(rx: &mut tokio::sync::mpsc::UnboundedReceiver<ScanEvent>) -> StatusUpdate {
    match rx.recv().await {
        Some(ScanEvent::Status(status)) => status,
        other => panic!("expected a status event, got {other:?}"),
    }
}

/// Stops the session and drains the receiver until `Finished`.
async fn stop_and_drain(
    session: &ScanSession,
    rx: &mut tokio::sync::mpsc::UnboundedReceiver<ScanEvent>,
) {
    session.stop();
    while let Some(event) = rx.recv().await {
        if event == ScanEvent::Finished {
            return;
        }
    }
    panic!("channel closed without a Finished event");
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_full_cycle_finds_template_clicks_center_and_restores_pointer() {
    // Arrange: one 640x480 monitor with the template at (100, 50); the
    // pointer starts at (5, 7). The 8x8 match centers at (104, 54).
    let template = checker_template();
    let capturer = Arc::new(MockScreenCapturer::single_small());
    capturer.set_frame(0, frame_with_template(640, 480, &template, 100, 50));
    let pointer = Arc::new(MockPointerDriver::at(5, 7));

    let session = ScanSession::new(
        Arc::clone(&capturer) as Arc<dyn ScreenCapturer>,
        Arc::clone(&pointer) as Arc<dyn PointerDriver>,
    )
    .with_interval(Duration::from_millis(200));

    // Act
    let mut rx = session.start(template).expect("start");
    let target = TargetPoint { x: 104, y: 54 };

    // Assert: the first cycle's full status sequence.
    assert_eq!(next_status(&mut rx).await, StatusUpdate::Capturing);
    assert_eq!(next_status(&mut rx).await, StatusUpdate::Searching);
    assert_eq!(next_status(&mut rx).await, StatusUpdate::Found { target });
    assert_eq!(next_status(&mut rx).await, StatusUpdate::Clicked { target });
    assert_eq!(next_status(&mut rx).await, StatusUpdate::CursorRestored);

    stop_and_drain(&session, &mut rx).await;

    // Every click landed on the target; every move pair is target-then-origin;
    // the pointer ends where it started.
    let clicks = pointer.clicks.lock().unwrap().clone();
    assert!(!clicks.is_empty());
    assert!(clicks.iter().all(|&c| c == (104, 54)));

    let moves = pointer.moves.lock().unwrap().clone();
    assert_eq!(moves.len() % 2, 0);
    for pair in moves.chunks(2) {
        assert_eq!(pair, [(104, 54), (5, 7)]);
    }
    assert_eq!(*pointer.position.lock().unwrap(), (5, 7));
}

#[tokio::test]
async fn test_match_on_second_monitor_is_attributed_past_first_monitor_width() {
    // Arrange: 192x108 + 256x144 side by side. The template sits at (3, 10)
    // on the second monitor, i.e. stitched x = 192 + 3 = 195, which is past
    // the first monitor's right edge. The click must land at the match
    // center (199, 14) — attributed to monitor 1, not monitor 0.
    let template = checker_template();
    let capturer = Arc::new(MockScreenCapturer::dual_side_by_side());
    capturer.set_frame(1, frame_with_template(256, 144, &template, 3, 10));
    let pointer = Arc::new(MockPointerDriver::new());

    let session = ScanSession::new(
        Arc::clone(&capturer) as Arc<dyn ScreenCapturer>,
        Arc::clone(&pointer) as Arc<dyn PointerDriver>,
    )
    .with_interval(Duration::from_millis(200));

    // Act
    let mut rx = session.start(template).expect("start");
    let target = TargetPoint { x: 199, y: 14 };

    // Assert
    assert_eq!(next_status(&mut rx).await, StatusUpdate::Capturing);
    assert_eq!(next_status(&mut rx).await, StatusUpdate::Searching);
    assert_eq!(next_status(&mut rx).await, StatusUpdate::Found { target });

    stop_and_drain(&session, &mut rx).await;

    let clicks = pointer.clicks.lock().unwrap().clone();
    assert_eq!(clicks[0], (199, 14));
}

#[tokio::test]
async fn test_no_match_cycle_takes_no_action_and_continues() {
    // Arrange: blank desktop, nothing to find.
    let capturer = Arc::new(MockScreenCapturer::single_small());
    let pointer = Arc::new(MockPointerDriver::new());

    let session = ScanSession::new(
        Arc::clone(&capturer) as Arc<dyn ScreenCapturer>,
        Arc::clone(&pointer) as Arc<dyn PointerDriver>,
    )
    .with_interval(Duration::from_millis(50));

    // Act
    let mut rx = session.start(checker_template()).expect("start");

    // Assert: "not found" then "waiting", and a second cycle follows after
    // the interval — the loop did not die.
    assert_eq!(next_status(&mut rx).await, StatusUpdate::Capturing);
    assert_eq!(next_status(&mut rx).await, StatusUpdate::Searching);
    assert_eq!(next_status(&mut rx).await, StatusUpdate::NotFound);
    assert_eq!(next_status(&mut rx).await, StatusUpdate::Waiting);
    assert_eq!(next_status(&mut rx).await, StatusUpdate::Capturing);

    stop_and_drain(&session, &mut rx).await;

    assert!(pointer.clicks.lock().unwrap().is_empty());
    assert!(pointer.moves.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_capture_failure_aborts_cycle_but_not_the_loop() {
    // Arrange: captures fail to begin with.
    let capturer = Arc::new(MockScreenCapturer::single_small());
    capturer.fail_capture.store(true, Ordering::Relaxed);
    let pointer = Arc::new(MockPointerDriver::new());

    let session = ScanSession::new(
        Arc::clone(&capturer) as Arc<dyn ScreenCapturer>,
        Arc::clone(&pointer) as Arc<dyn PointerDriver>,
    )
    .with_interval(Duration::from_millis(50));

    // Act
    let mut rx = session.start(checker_template()).expect("start");

    // First cycle: capture fails, the cycle is abandoned, the loop sleeps.
    assert_eq!(next_status(&mut rx).await, StatusUpdate::Capturing);
    assert!(matches!(
        next_status(&mut rx).await,
        StatusUpdate::CaptureFailed { .. }
    ));
    assert_eq!(next_status(&mut rx).await, StatusUpdate::Waiting);

    // Heal the backend; the next cycle proceeds past capture.
    capturer.fail_capture.store(false, Ordering::Relaxed);
    assert_eq!(next_status(&mut rx).await, StatusUpdate::Capturing);
    assert_eq!(next_status(&mut rx).await, StatusUpdate::Searching);

    stop_and_drain(&session, &mut rx).await;
}

#[tokio::test]
async fn test_match_in_stitched_space_outside_all_monitors_reports_unmapped() {
    // Arrange: two monitors stacked vertically in the real desktop. The
    // stitcher still lays them out side by side, so a match on the second
    // monitor gets stitched x = 100 + 20 = 120 — a coordinate no monitor
    // rectangle contains. The cycle must report it unmapped and not click.
    let template = checker_template();
    let capturer = Arc::new(MockScreenCapturer::new(vec![
        Monitor {
            id: 0,
            x: 0,
            y: 0,
            width: 100,
            height: 50,
        },
        Monitor {
            id: 1,
            x: 0,
            y: 50,
            width: 100,
            height: 50,
        },
    ]));
    capturer.set_frame(1, frame_with_template(100, 50, &template, 20, 10));
    let pointer = Arc::new(MockPointerDriver::new());

    let session = ScanSession::new(
        Arc::clone(&capturer) as Arc<dyn ScreenCapturer>,
        Arc::clone(&pointer) as Arc<dyn PointerDriver>,
    )
    .with_interval(Duration::from_millis(200));

    // Act
    let mut rx = session.start(template).expect("start");

    // Assert
    assert_eq!(next_status(&mut rx).await, StatusUpdate::Capturing);
    assert_eq!(next_status(&mut rx).await, StatusUpdate::Searching);
    assert_eq!(next_status(&mut rx).await, StatusUpdate::Unmapped);

    stop_and_drain(&session, &mut rx).await;

    assert!(pointer.clicks.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_stop_mid_cycle_lets_the_cycle_finish_then_exits_without_sleeping() {
    // Arrange: a long interval so that an accidental post-stop sleep would
    // blow the timeout below.
    let template = checker_template();
    let capturer = Arc::new(MockScreenCapturer::single_small());
    capturer.set_frame(0, frame_with_template(640, 480, &template, 30, 40));
    let pointer = Arc::new(MockPointerDriver::new());

    let session = ScanSession::new(
        Arc::clone(&capturer) as Arc<dyn ScreenCapturer>,
        Arc::clone(&pointer) as Arc<dyn PointerDriver>,
    )
    .with_interval(Duration::from_secs(30));

    let mut rx = session.start(template).expect("start");
    let target = TargetPoint { x: 34, y: 44 };

    assert_eq!(next_status(&mut rx).await, StatusUpdate::Capturing);
    assert_eq!(next_status(&mut rx).await, StatusUpdate::Searching);

    // Act: stop while the search is still in flight.
    session.stop();
    assert_eq!(session.state(), RunState::Stopping);

    // Assert: the in-flight cycle runs to completion (locate, resolve, and
    // the click all still happen), then the loop exits directly — no
    // "waiting", no sleep — well inside the 30-second interval.
    let remainder = tokio::time::timeout(Duration::from_secs(10), async {
        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        events
    })
    .await
    .expect("loop must exit without sleeping the full interval");

    assert_eq!(
        remainder,
        vec![
            ScanEvent::Status(StatusUpdate::Found { target }),
            ScanEvent::Status(StatusUpdate::Clicked { target }),
            ScanEvent::Status(StatusUpdate::CursorRestored),
            ScanEvent::Status(StatusUpdate::Stopping),
            ScanEvent::Finished,
        ]
    );
    assert_eq!(session.state(), RunState::Idle);
    assert_eq!(*pointer.clicks.lock().unwrap(), vec![(34, 44)]);
}
