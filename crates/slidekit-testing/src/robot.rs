//! Robot-style driver for a [`PagerState`].
//!
//! The robot plays the part of the host: it scripts drags on a virtual
//! clock, runs the returned settle animations frame by frame through
//! [`Transition`], keeps its own scroll position in step with wraparound
//! rebases, and records every frame the pager publishes.
//!
//! # Example
//!
//! ```
//! use slidekit_core::{CoverflowTransform, LayoutMetrics, PagerConfig, TransformKind};
//! use slidekit_testing::GestureRobot;
//!
//! let metrics = LayoutMetrics::paged(300.0, 5).unwrap();
//! let kind = TransformKind::Coverflow(CoverflowTransform::default());
//! let mut robot = GestureRobot::new(PagerConfig::new(300.0), metrics, kind).unwrap();
//!
//! robot.swipe(-240.0, 8, -600.0);
//! robot.run_until_idle();
//! assert_eq!(robot.state().pair().active_index, 1);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use slidekit_animation::Transition;
use slidekit_core::{
    ConfigError, Frame, GestureCommitDecision, LayoutMetrics, PagerConfig, PagerState,
    SettleRequest, Subscription, TransformKind,
};
use slidekit_foundation::{GestureEvent, PositionSample};
use web_time::Duration;

/// Virtual frame interval (60 Hz).
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Upper bound on frames one settle may take before the robot gives up.
pub const MAX_SETTLE_FRAMES: usize = 600;

struct ActiveSettle {
    request: SettleRequest,
    transition: Transition,
    /// Sum of rebase shifts applied since the animation started.
    bias: f32,
}

/// Drives a [`PagerState`] the way a host would.
pub struct GestureRobot {
    state: PagerState,
    clock: Duration,
    translation: f32,
    settle: Option<ActiveSettle>,
    frames: Rc<RefCell<Vec<Frame>>>,
    decisions: Rc<RefCell<Vec<GestureCommitDecision>>>,
    _subscriptions: [Subscription; 2],
}

impl GestureRobot {
    pub fn new(
        config: PagerConfig,
        metrics: LayoutMetrics,
        kind: TransformKind,
    ) -> Result<Self, ConfigError> {
        Ok(Self::wrap(PagerState::new(config, metrics, kind)?))
    }

    /// Takes over an existing state; only frames published from now on are
    /// recorded.
    pub fn wrap(state: PagerState) -> Self {
        let frames = Rc::new(RefCell::new(Vec::new()));
        let decisions = Rc::new(RefCell::new(Vec::new()));
        let frame_sink = Rc::clone(&frames);
        let decision_sink = Rc::clone(&decisions);
        let subscriptions = [
            state.subscribe_frames(move |frame| frame_sink.borrow_mut().push(frame.clone())),
            state.subscribe_decisions(move |decision| decision_sink.borrow_mut().push(*decision)),
        ];
        Self {
            state,
            clock: Duration::ZERO,
            translation: 0.0,
            settle: None,
            frames,
            decisions,
            _subscriptions: subscriptions,
        }
    }

    pub fn state(&self) -> &PagerState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut PagerState {
        &mut self.state
    }

    pub fn into_state(self) -> PagerState {
        self.state
    }

    /// Virtual time elapsed since the robot was created.
    pub fn elapsed(&self) -> Duration {
        self.clock
    }

    pub fn is_settling(&self) -> bool {
        self.settle.is_some()
    }

    /// Scrolls programmatically, outside any gesture.
    pub fn scroll_to(&mut self, offset: f32) -> Frame {
        self.tick();
        self.state
            .on_sample(PositionSample::new(offset, 0.0, self.clock))
            .clone()
    }

    /// Puts a finger down. Any running settle animation is abandoned.
    pub fn press(&mut self) {
        self.settle = None;
        self.translation = 0.0;
        self.state.on_gesture(GestureEvent::Began);
    }

    /// Moves the finger to `translation` (relative to where it went down).
    pub fn move_to(&mut self, translation: f32) {
        self.tick();
        self.translation = translation;
        self.state.on_gesture(GestureEvent::Changed {
            translation,
            timestamp: self.clock,
        });
    }

    /// Moves the finger to `translation` in `steps` evenly spaced frames.
    pub fn drag_by(&mut self, translation: f32, steps: usize) {
        let start = self.translation;
        let steps = steps.max(1);
        for step in 1..=steps {
            let fraction = step as f32 / steps as f32;
            self.move_to(start + (translation - start) * fraction);
        }
    }

    /// Keeps the finger still for `frames` frames, letting the tracked
    /// velocity decay.
    pub fn hold(&mut self, frames: usize) {
        for _ in 0..frames {
            self.move_to(self.translation);
        }
    }

    /// Lifts the finger. A zero `velocity` lets the pager use its tracked
    /// velocity instead.
    pub fn release(&mut self, velocity: f32) -> Option<SettleRequest> {
        let request = self.state.on_gesture(GestureEvent::Ended {
            translation: self.translation,
            velocity,
        })?;
        self.begin_settle(request);
        Some(request)
    }

    pub fn cancel(&mut self) -> Option<SettleRequest> {
        let request = self.state.on_gesture(GestureEvent::Cancelled);
        match request {
            Some(request) => self.begin_settle(request),
            None => self.settle = None,
        }
        request
    }

    /// Press, drag to `translation` over `steps` frames, release.
    pub fn swipe(
        &mut self,
        translation: f32,
        steps: usize,
        velocity: f32,
    ) -> Option<SettleRequest> {
        self.press();
        self.drag_by(translation, steps);
        self.release(velocity)
    }

    /// Advances the running settle animation by one frame.
    ///
    /// Returns `true` once the animation has finished and the pager was told.
    pub fn advance_frame(&mut self) -> bool {
        self.tick();
        let Some(settle) = self.settle.as_mut() else {
            return true;
        };
        let sample = settle.transition.sample(self.clock.as_nanos() as u64);
        let offset = sample.value + settle.bias;
        self.state.on_sample(PositionSample::new(offset, 0.0, self.clock));
        settle.bias += self.state.last_rebase();

        if sample.finished {
            self.settle = None;
            self.state.settle_finished();
            return true;
        }
        false
    }

    /// Runs the settle animation to completion; returns the frame count.
    pub fn run_until_idle(&mut self) -> usize {
        let mut frames = 0;
        while self.settle.is_some() && frames < MAX_SETTLE_FRAMES {
            self.advance_frame();
            frames += 1;
        }
        frames
    }

    /// The request currently being animated, in the pager's present
    /// coordinates.
    pub fn active_request(&self) -> Option<SettleRequest> {
        self.settle.as_ref().map(|settle| SettleRequest {
            target_offset: settle.request.target_offset + settle.bias,
            ..settle.request
        })
    }

    pub fn recorded_frames(&self) -> Vec<Frame> {
        self.frames.borrow().clone()
    }

    pub fn last_frame(&self) -> Option<Frame> {
        self.frames.borrow().last().cloned()
    }

    pub fn decisions(&self) -> Vec<GestureCommitDecision> {
        self.decisions.borrow().clone()
    }

    pub fn clear_recorded(&mut self) {
        self.frames.borrow_mut().clear();
        self.decisions.borrow_mut().clear();
    }

    fn begin_settle(&mut self, request: SettleRequest) {
        self.settle = Some(ActiveSettle {
            request,
            transition: Transition::new(
                self.state.offset(),
                request.target_offset,
                request.animation,
            ),
            bias: 0.0,
        });
    }

    fn tick(&mut self) {
        self.clock += FRAME_INTERVAL;
    }
}

impl std::fmt::Debug for GestureRobot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureRobot")
            .field("state", &self.state)
            .field("clock", &self.clock)
            .field("settling", &self.settle.is_some())
            .finish()
    }
}
