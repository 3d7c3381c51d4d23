// Host-side tests for the frame loop state machine.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod lifecycle {
    include!("../src/core/lifecycle.rs");
}

use lifecycle::*;

#[test]
fn starts_stopped() {
    let l: FrameLoop = FrameLoop::new();
    assert_eq!(l.state(), LoopState::Stopped);
    assert!(l.pending().is_none());
}

#[test]
fn stop_before_start_is_noop() {
    let mut l: FrameLoop = FrameLoop::new();
    assert_eq!(l.stop(), None);
    assert_eq!(l.state(), LoopState::Stopped);
}

#[test]
fn start_twice_schedules_once() {
    let mut l: FrameLoop = FrameLoop::new();
    assert!(l.start());
    l.arm(7);
    assert!(!l.start());
    assert_eq!(l.pending(), Some(&7));
}

#[test]
fn stop_yields_pending_handle_once() {
    let mut l: FrameLoop = FrameLoop::new();
    l.start();
    l.arm(3);
    assert_eq!(l.stop(), Some(3));
    assert_eq!(l.stop(), None);
    assert!(!l.is_running());
}

#[test]
fn late_callback_after_stop_does_not_run() {
    let mut l: FrameLoop = FrameLoop::new();
    l.start();
    l.arm(1);
    l.stop();
    assert!(!l.begin_frame());
}

#[test]
fn running_frames_rearm_each_time() {
    let mut l: FrameLoop = FrameLoop::new();
    l.start();
    for id in 1..=5 {
        l.arm(id);
        assert!(l.begin_frame());
        assert!(l.pending().is_none());
    }
}

#[test]
fn restart_after_stop() {
    let mut l: FrameLoop = FrameLoop::new();
    l.start();
    l.stop();
    assert!(l.start());
    assert!(l.is_running());
}
