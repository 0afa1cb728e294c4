use super::*;
use crate::commit::{CommitOutcome, Direction};
use crate::transform::{ChannelPair, CoverflowTransform, PairTransform};
use crate::visual::VisualState;
use slidekit_geometry::Axis;
use std::cell::RefCell;
use std::rc::Rc;
use web_time::Duration;

fn coverflow() -> TransformKind {
    TransformKind::Coverflow(CoverflowTransform::default())
}

fn pager(count: usize, bounds: IndexBounds) -> PagerState {
    let config = PagerConfig::new(300.0).with_bounds(bounds);
    let metrics = LayoutMetrics::paged(300.0, count).unwrap();
    PagerState::new(config, metrics, coverflow()).unwrap()
}

fn drag(state: &mut PagerState, translations: &[f32]) {
    state.on_gesture(GestureEvent::Began);
    for (step, translation) in translations.iter().enumerate() {
        state.on_gesture(GestureEvent::Changed {
            translation: *translation,
            timestamp: Duration::from_millis(step as u64 * 10),
        });
    }
}

#[test]
fn half_way_indicator_frame() {
    let indicator = PairTransform::new(ChannelPair::new(1.0, 0.0))
        .unwrap()
        .with_rest(VisualState::IDENTITY)
        .unwrap();
    let config = PagerConfig::new(100.0).with_opacity_effect(true);
    let metrics = LayoutMetrics::new(100.0, 0.0, 3, 100.0).unwrap();
    let mut state = PagerState::new(config, metrics, TransformKind::Pair(indicator)).unwrap();

    let frame = state.on_sample(PositionSample::at(150.0)).clone();
    assert_eq!(state.pair().active_index, 1);
    assert_eq!(state.pair().fraction, 0.5);
    assert_eq!(frame.state_of(1).opacity, 0.5);
    assert_eq!(frame.state_of(2).opacity, 0.5);
    assert_eq!(frame.state_of(0).opacity, 1.0);
}

#[test]
fn empty_pager_produces_empty_frames() {
    let mut state = pager(0, IndexBounds::Clamped);
    assert!(state.on_sample(PositionSample::at(480.0)).is_empty());
    assert_eq!(state.pair(), ActivePair::at(0));
    drag(&mut state, &[-200.0]);
    let request = state
        .on_gesture(GestureEvent::Ended {
            translation: -250.0,
            velocity: 0.0,
        })
        .unwrap();
    assert_eq!(request.target_index, 0);
}

#[test]
fn long_forward_drag_commits_to_next_item() {
    let mut state = pager(5, IndexBounds::Clamped);
    let decisions = Rc::new(RefCell::new(Vec::new()));
    let _subscription = {
        let decisions = Rc::clone(&decisions);
        state.subscribe_decisions(move |decision| decisions.borrow_mut().push(*decision))
    };

    drag(&mut state, &[-100.0, -250.0]);
    assert_eq!(state.offset(), 250.0);
    let request = state
        .on_gesture(GestureEvent::Ended {
            translation: -250.0,
            velocity: -40.0,
        })
        .unwrap();

    assert_eq!(request.target_index, 1);
    assert_eq!(request.target_offset, 300.0);
    assert!(!request.animation.is_snap());
    assert_eq!(state.phase(), GesturePhase::Settling);

    let decisions = decisions.borrow();
    assert_eq!(decisions.len(), 1);
    assert_eq!(decisions[0].effective_displacement, -258.0);
    assert_eq!(decisions[0].outcome, CommitOutcome::Commit(Direction::Forward));
}

#[test]
fn short_drag_reverts() {
    let mut state = pager(5, IndexBounds::Clamped);
    drag(&mut state, &[-40.0]);
    let request = state
        .on_gesture(GestureEvent::Ended {
            translation: -60.0,
            velocity: 100.0,
        })
        .unwrap();
    assert_eq!(request.target_index, 0);
    assert_eq!(request.target_offset, 0.0);
}

#[test]
fn clamped_bounds_stop_at_the_last_item() {
    let mut state = pager(5, IndexBounds::Clamped);
    state.on_sample(PositionSample::at(1200.0));
    drag(&mut state, &[-280.0]);
    let request = state
        .on_gesture(GestureEvent::Ended {
            translation: -290.0,
            velocity: -2_000.0,
        })
        .unwrap();
    assert_eq!(request.target_index, 4);
    assert_eq!(request.target_offset, 1200.0);
}

#[test]
fn looping_bounds_step_past_the_start() {
    let mut state = pager(3, IndexBounds::Looping);
    drag(&mut state, &[150.0]);
    // Crossing the start rebased the offset by one content length.
    assert_eq!(state.offset(), 750.0);
    assert_eq!(state.last_rebase(), 900.0);

    state.on_gesture(GestureEvent::Changed {
        translation: 250.0,
        timestamp: Duration::from_millis(40),
    });
    assert_eq!(state.offset(), 650.0);
    assert_eq!(state.last_rebase(), 0.0);

    let request = state
        .on_gesture(GestureEvent::Ended {
            translation: 250.0,
            velocity: 0.0,
        })
        .unwrap();
    assert_eq!(request.target_index, 2);
    assert_eq!(request.target_offset, 600.0);

    state.on_sample(PositionSample::at(600.0));
    state.settle_finished();
    assert_eq!(state.current_index(), 2);
}

#[test]
fn release_without_velocity_after_a_rebase_keeps_its_direction() {
    let mut state = pager(5, IndexBounds::Looping);
    let decisions = Rc::new(RefCell::new(Vec::new()));
    let _subscription = {
        let decisions = Rc::clone(&decisions);
        state.subscribe_decisions(move |decision| decisions.borrow_mut().push(*decision))
    };

    state.on_sample(PositionSample::at(1200.0));
    let translations: Vec<f32> = (1..=8).map(|step| step as f32 * -50.0).collect();
    drag(&mut state, &translations);
    // 1550 folded back by the 1500 content length mid-drag.
    assert_eq!(state.offset(), 100.0);

    let request = state
        .on_gesture(GestureEvent::Ended {
            translation: -400.0,
            velocity: 0.0,
        })
        .unwrap();
    let decisions = decisions.borrow();
    assert_eq!(decisions[0].outcome, CommitOutcome::Commit(Direction::Forward));
    assert!(decisions[0].effective_displacement < -400.0);
    assert_eq!(request.target_index, 0);
    assert_eq!(request.target_offset, 0.0);
}

#[test]
fn rebase_during_settle_moves_the_target() {
    let mut state = pager(3, IndexBounds::Looping);
    state.on_sample(PositionSample::at(30.0));
    drag(&mut state, &[50.0]);
    assert_eq!(state.offset(), 880.0);
    let request = state
        .on_gesture(GestureEvent::Ended {
            translation: 50.0,
            velocity: 0.0,
        })
        .unwrap();
    assert_eq!(request.target_index, 3);
    assert_eq!(request.target_offset, 900.0);

    // The settle animation overshoots the end and gets folded to the start.
    state.on_sample(PositionSample::at(905.0));
    assert_eq!(state.offset(), 5.0);
    let target = state.settle_target().unwrap();
    assert_eq!(target.target_index, 0);
    assert_eq!(target.target_offset, 0.0);
}

#[test]
fn rebase_happens_before_mapping() {
    let config = PagerConfig::new(100.0).with_bounds(IndexBounds::Looping);
    let metrics = LayoutMetrics::new(100.0, 0.0, 10, 250.0).unwrap();
    let mut state = PagerState::new(config, metrics, coverflow()).unwrap();

    let frame = state.on_sample(PositionSample::at(1005.0)).clone();
    assert_eq!(state.offset(), 5.0);
    assert_eq!(state.pair().active_index, 0);
    assert_eq!(frame, state.mapper.map_frame_looping(&resolve(0.05), 10));
}

#[test]
fn looping_requires_content_wider_than_the_viewport() {
    let config = PagerConfig::new(100.0).with_bounds(IndexBounds::Looping);
    let metrics = LayoutMetrics::new(100.0, 0.0, 2, 250.0).unwrap();
    assert!(matches!(
        PagerState::new(config, metrics, coverflow()),
        Err(ConfigError::WrapContentTooSmall { .. })
    ));
}

#[test]
fn new_drag_abandons_the_settle_target() {
    let mut state = pager(5, IndexBounds::Clamped);
    drag(&mut state, &[-250.0]);
    state.on_gesture(GestureEvent::Ended {
        translation: -250.0,
        velocity: -40.0,
    });
    assert_eq!(state.current_index(), 1);

    // Caught mid-animation, closer to item 0.
    state.on_sample(PositionSample::at(120.0));
    state.on_gesture(GestureEvent::Began);
    assert_eq!(state.phase(), GesturePhase::Dragging);
    assert_eq!(state.settle_target(), None);

    state.on_gesture(GestureEvent::Changed {
        translation: 20.0,
        timestamp: Duration::from_millis(5),
    });
    assert_eq!(state.offset(), 100.0);
    let request = state
        .on_gesture(GestureEvent::Ended {
            translation: 20.0,
            velocity: 0.0,
        })
        .unwrap();
    assert_eq!(request.target_index, 0);
}

#[test]
fn tracked_velocity_fills_in_a_missing_release_velocity() {
    let mut state = pager(5, IndexBounds::Clamped);
    drag(&mut state, &[-10.0, -30.0, -60.0, -100.0]);
    let request = state
        .on_gesture(GestureEvent::Ended {
            translation: -100.0,
            velocity: 0.0,
        })
        .unwrap();
    assert_eq!(request.target_index, 1);
}

#[test]
fn cancelled_drag_settles_back() {
    let mut state = pager(5, IndexBounds::Clamped);
    drag(&mut state, &[-200.0]);
    let request = state.on_gesture(GestureEvent::Cancelled).unwrap();
    assert_eq!(request.target_index, 0);
    assert_eq!(state.phase(), GesturePhase::Settling);
    state.settle_finished();
    assert_eq!(state.phase(), GesturePhase::Idle);
}

#[test]
fn every_sample_publishes_a_frame() {
    let mut state = pager(5, IndexBounds::Clamped);
    let count = Rc::new(RefCell::new(0));
    let subscription = {
        let count = Rc::clone(&count);
        state.subscribe_frames(move |_| *count.borrow_mut() += 1)
    };
    for offset in [0.0, 10.0, 20.0] {
        state.on_sample(PositionSample::at(offset));
    }
    assert_eq!(*count.borrow(), 3);

    subscription.cancel();
    state.on_sample(PositionSample::at(30.0));
    assert_eq!(*count.borrow(), 3);
}

#[test]
fn out_of_order_events_produce_no_requests() {
    let mut state = pager(5, IndexBounds::Clamped);
    assert_eq!(
        state.on_gesture(GestureEvent::Ended {
            translation: -300.0,
            velocity: -9_000.0,
        }),
        None
    );
    assert_eq!(state.phase(), GesturePhase::Idle);
}

#[test]
fn metrics_must_match_the_config() {
    let config = PagerConfig::new(999.0);
    let metrics = LayoutMetrics::paged(100.0, 3).unwrap();
    assert!(matches!(
        PagerState::new(config, metrics, coverflow()),
        Err(ConfigError::MetricsMismatch {
            name: "item extent",
            ..
        })
    ));

    let mut state = pager(5, IndexBounds::Clamped);
    let spaced = LayoutMetrics::new(300.0, 12.0, 5, 300.0).unwrap();
    assert!(state.set_metrics(spaced).is_err());
    assert_eq!(state.metrics().spacing(), 0.0);
}

#[test]
fn config_opacity_effect_overrides_the_transform() {
    let crossfade = PairTransform::new(ChannelPair::new(1.0, 0.0))
        .unwrap()
        .with_rest(VisualState::IDENTITY)
        .unwrap();
    let metrics = LayoutMetrics::new(100.0, 0.0, 3, 100.0).unwrap();
    let mut state = PagerState::new(
        PagerConfig::new(100.0).with_opacity_effect(false),
        metrics,
        TransformKind::Pair(crossfade),
    )
    .unwrap();

    let frame = state.on_sample(PositionSample::at(150.0));
    assert_eq!(frame.state_of(1).opacity, 1.0);
    assert_eq!(frame.state_of(2).opacity, 1.0);
}

#[test]
fn config_sets_stack_depth_and_axis() {
    let config = PagerConfig::new(300.0)
        .with_visible_cards(1)
        .with_axis(Axis::Vertical);
    let metrics = LayoutMetrics::paged(300.0, 5).unwrap();
    let state = PagerState::new(config, metrics, coverflow()).unwrap();
    let TransformKind::Coverflow(transform) = state.mapper.kind() else {
        panic!("expected coverflow, got {}", state.mapper.kind().name());
    };
    assert_eq!(transform.max_depth, 1);
    assert_eq!(transform.axis, Axis::Vertical);
    assert_eq!(state.mapper.kind().window(), (1, 1));

    // Default coverflow fades out fully by its second card.
    let deep = PagerConfig::new(300.0).with_visible_cards(3);
    let metrics = LayoutMetrics::paged(300.0, 5).unwrap();
    assert!(matches!(
        PagerState::new(deep, metrics, coverflow()),
        Err(ConfigError::ChannelOutOfRange { .. })
    ));
}
