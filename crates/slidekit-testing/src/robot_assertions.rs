//! Assertion utilities for robot testing
//!
//! Helpers for checking recorded frames with a tolerance, since settle
//! animations rarely land on bit-exact values mid-flight.

use slidekit_core::{Frame, VisualState};
use slidekit_geometry::Point;

/// Assert that a value is within an expected range.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

pub fn assert_point_approx_eq(actual: Point, expected: Point, tolerance: f32, msg: &str) {
    assert_approx_eq(actual.x, expected.x, tolerance, &format!("{} - x", msg));
    assert_approx_eq(actual.y, expected.y, tolerance, &format!("{} - y", msg));
}

/// Compares the channels a renderer reads. Rotation and anchor must match
/// exactly; numeric channels within `tolerance`.
pub fn assert_state_approx_eq(
    actual: &VisualState,
    expected: &VisualState,
    tolerance: f32,
    msg: &str,
) {
    assert_approx_eq(
        actual.opacity,
        expected.opacity,
        tolerance,
        &format!("{} - opacity", msg),
    );
    assert_approx_eq(
        actual.scale,
        expected.scale,
        tolerance,
        &format!("{} - scale", msg),
    );
    assert_point_approx_eq(
        actual.translation,
        expected.translation,
        tolerance,
        &format!("{} - translation", msg),
    );
    assert_approx_eq(
        actual.rotation.degrees,
        expected.rotation.degrees,
        tolerance,
        &format!("{} - rotation", msg),
    );
    assert_eq!(actual.anchor, expected.anchor, "{}: anchor", msg);
}

/// Assert that every opacity and scale in the frame is renderable.
pub fn assert_frame_channels_valid(frame: &Frame, msg: &str) {
    for state in frame
        .items
        .iter()
        .map(|item| &item.state)
        .chain([&frame.before, &frame.after])
    {
        assert!(
            (0.0..=1.0).contains(&state.opacity),
            "{}: opacity {} out of range in {:?}",
            msg,
            state.opacity,
            frame
        );
        assert!(
            state.scale >= 0.0 && state.scale.is_finite(),
            "{}: scale {} invalid in {:?}",
            msg,
            state.scale,
            frame
        );
        assert!(
            state.translation.is_finite(),
            "{}: non-finite translation in {:?}",
            msg,
            frame
        );
    }
}

/// Assert that listed item indices are strictly increasing and unique.
pub fn assert_frame_sorted(frame: &Frame, msg: &str) {
    let indices: Vec<i64> = frame.items.iter().map(|item| item.index).collect();
    assert!(
        indices.windows(2).all(|pair| pair[0] < pair[1]),
        "{}: indices not strictly increasing: {:?}",
        msg,
        indices
    );
}

/// Assert that a frame lists at most `max` items.
pub fn assert_window_at_most(frame: &Frame, max: usize, msg: &str) {
    assert!(
        frame.len() <= max,
        "{}: expected at most {} items, got {}",
        msg,
        max,
        frame.len()
    );
}

/// Assert that a sequence of values never moves against `forward`.
pub fn assert_monotonic(values: &[f32], forward: bool, msg: &str) {
    for pair in values.windows(2) {
        let ok = if forward {
            pair[1] >= pair[0]
        } else {
            pair[1] <= pair[0]
        };
        assert!(ok, "{}: {} -> {} in {:?}", msg, pair[0], pair[1], values);
    }
}
