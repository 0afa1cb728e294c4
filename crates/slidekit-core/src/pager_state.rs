//! Per-instance owner of the sample pipeline.
//!
//! Each sample runs wrap, normalize, resolve and map strictly in that order
//! inside [`PagerState::on_sample`], so a rebased offset is never seen by the
//! mapper. Gesture events drive the phase machine and end in a
//! [`SettleRequest`] the host animates.

use slidekit_animation::AnimationType;
use slidekit_foundation::gesture_constants::MAX_FLING_VELOCITY;
use slidekit_foundation::{
    GestureEvent, GestureMachine, GesturePhase, PhaseTransition, PositionSample, VelocityTracker,
};

use crate::commit::{CommitPolicy, GestureCommitDecision};
use crate::config::{IndexBounds, PagerConfig};
use crate::error::ConfigError;
use crate::index::{resolve, ActivePair};
use crate::metrics::LayoutMetrics;
use crate::observer::{Publisher, Subscription};
use crate::progress::normalize_offset;
use crate::transform::{TransformKind, TransformMapper};
use crate::visual::Frame;
use crate::wrap::{WrapAroundRepositioner, WrapWindow};

/// Where the host should animate the scroll position to after a gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettleRequest {
    pub target_index: i64,
    pub target_offset: f32,
    pub animation: AnimationType,
}

pub struct PagerState {
    config: PagerConfig,
    metrics: LayoutMetrics,
    mapper: TransformMapper,
    commit: CommitPolicy,
    wrap: Option<WrapAroundRepositioner>,
    gesture: GestureMachine,
    velocity: VelocityTracker,
    offset: f32,
    last_rebase: f32,
    drag_origin: f32,
    drag_index: i64,
    settle_target: Option<SettleRequest>,
    pair: ActivePair,
    frame: Frame,
    frames: Publisher<Frame>,
    decisions: Publisher<GestureCommitDecision>,
}

impl PagerState {
    /// `metrics` must be laid out with the config's item extent and spacing.
    /// Settings the config shares with `kind` are taken from the config, see
    /// [`TransformKind::configured`].
    pub fn new(
        config: PagerConfig,
        metrics: LayoutMetrics,
        kind: TransformKind,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        config.check_metrics(&metrics)?;
        let commit = config.commit_policy()?;
        let kind = kind.configured(&config)?;
        let wrap = match config.bounds {
            IndexBounds::Looping => Some(WrapAroundRepositioner::new(WrapWindow::for_metrics(
                &metrics,
            )?)),
            IndexBounds::Clamped | IndexBounds::Unbounded => None,
        };
        let mut state = Self {
            config,
            metrics,
            mapper: TransformMapper::new(kind),
            commit,
            wrap,
            gesture: GestureMachine::new(),
            velocity: VelocityTracker::new(),
            offset: 0.0,
            last_rebase: 0.0,
            drag_origin: 0.0,
            drag_index: 0,
            settle_target: None,
            pair: ActivePair::default(),
            frame: Frame::empty(),
            frames: Publisher::new(),
            decisions: Publisher::new(),
        };
        state.process(0.0);
        Ok(state)
    }

    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    pub fn metrics(&self) -> &LayoutMetrics {
        &self.metrics
    }

    pub fn phase(&self) -> GesturePhase {
        self.gesture.phase()
    }

    /// Offset of the last processed sample, after any rebase.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Shift the most recent sample was rebased by, 0 if it wasn't.
    ///
    /// The host applies the same shift to its own scroll position (and to any
    /// running settle animation) so later samples arrive in the rebased
    /// coordinates.
    pub fn last_rebase(&self) -> f32 {
        self.last_rebase
    }

    pub fn pair(&self) -> ActivePair {
        self.pair
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// The item the pager is resting on or heading to.
    pub fn current_index(&self) -> i64 {
        match self.settle_target {
            Some(request) => request.target_index,
            None => self.nearest_index(),
        }
    }

    pub fn settle_target(&self) -> Option<SettleRequest> {
        self.settle_target
    }

    pub fn subscribe_frames(&self, listener: impl Fn(&Frame) + 'static) -> Subscription {
        self.frames.subscribe(listener)
    }

    pub fn subscribe_decisions(
        &self,
        listener: impl Fn(&GestureCommitDecision) + 'static,
    ) -> Subscription {
        self.decisions.subscribe(listener)
    }

    /// Replaces the layout, e.g. after a resize or a change in item count.
    pub fn set_metrics(&mut self, metrics: LayoutMetrics) -> Result<(), ConfigError> {
        self.config.check_metrics(&metrics)?;
        if let Some(wrap) = self.wrap.as_mut() {
            *wrap = WrapAroundRepositioner::new(WrapWindow::for_metrics(&metrics)?);
        }
        self.metrics = metrics;
        self.process(self.offset);
        self.frames.publish(&self.frame);
        Ok(())
    }

    /// Runs one position sample through the pipeline and publishes the frame.
    pub fn on_sample(&mut self, sample: PositionSample) -> &Frame {
        self.process(sample.offset);
        // Recorded after folding so the history never spans a rebase jump.
        if self.gesture.is_dragging() && sample.offset.is_finite() {
            self.velocity.add_sample(&sample.with_offset(self.offset));
        }
        self.frames.publish(&self.frame);
        &self.frame
    }

    /// Feeds one lifecycle event. Returns the settle animation to run when
    /// the event ends a drag.
    pub fn on_gesture(&mut self, event: GestureEvent) -> Option<SettleRequest> {
        let transition = self.gesture.handle(&event)?;
        match event {
            GestureEvent::Began => {
                self.begin_drag(transition);
                None
            }
            GestureEvent::Changed {
                translation,
                timestamp,
            } => {
                self.on_sample(PositionSample::new(
                    self.drag_origin - translation,
                    0.0,
                    timestamp,
                ));
                None
            }
            GestureEvent::Ended {
                translation,
                velocity,
            } => Some(self.end_drag(translation, velocity)),
            GestureEvent::Cancelled if transition.to == GesturePhase::Settling => {
                let request = self.request_for(self.drag_index, true);
                self.settle_target = Some(request);
                Some(request)
            }
            GestureEvent::Cancelled | GestureEvent::SettleFinished => {
                self.settle_target = None;
                None
            }
        }
    }

    /// Convenience for `on_gesture(GestureEvent::SettleFinished)`.
    pub fn settle_finished(&mut self) {
        self.on_gesture(GestureEvent::SettleFinished);
    }

    fn begin_drag(&mut self, transition: PhaseTransition) {
        if transition.interrupted_settle() {
            if let Some(abandoned) = self.settle_target {
                log::debug!(
                    "drag interrupted settle toward {}; restarting from {}",
                    abandoned.target_index,
                    self.offset
                );
            }
        }
        self.settle_target = None;
        self.velocity.reset();
        self.drag_origin = self.offset;
        self.drag_index = self.nearest_index();
    }

    fn end_drag(&mut self, translation: f32, velocity: f32) -> SettleRequest {
        let release = self.drag_origin - translation;
        if release.is_finite() {
            self.process(release);
            self.frames.publish(&self.frame);
        }

        // Tracked velocity is in offset space; the resolver wants finger space.
        let velocity = if velocity.is_finite() && velocity != 0.0 {
            velocity
        } else {
            -self.velocity.velocity_capped(MAX_FLING_VELOCITY)
        };

        let decision = self.commit.on_gesture_end(
            self.drag_index,
            translation,
            velocity,
            self.metrics.item_extent(),
        );
        self.decisions.publish(&decision);

        let request = self.request_for(decision.target_index, decision.should_animate);
        self.settle_target = Some(request);
        request
    }

    fn request_for(&self, index: i64, animate: bool) -> SettleRequest {
        let target_index = self.bound_index(index);
        SettleRequest {
            target_index,
            target_offset: self.metrics.offset_for_index(target_index),
            animation: if animate {
                self.config.settle_animation
            } else {
                AnimationType::Snap
            },
        }
    }

    fn bound_index(&self, index: i64) -> i64 {
        match self.config.bounds {
            IndexBounds::Clamped => {
                let last = self.metrics.item_count().saturating_sub(1) as i64;
                index.clamp(0, last)
            }
            // Targets one step past either end stay in the current lap; the
            // repositioner folds the offsets once they arrive.
            IndexBounds::Looping | IndexBounds::Unbounded => index,
        }
    }

    fn nearest_index(&self) -> i64 {
        self.bound_index(self.pair.nearest_index())
    }

    /// Moves everything tracked in offset space along with a rebase.
    fn apply_rebase(&mut self, shift: f32) {
        self.last_rebase = shift;
        if shift == 0.0 {
            return;
        }
        let laps = (shift / self.metrics.stride()).round() as i64;
        self.drag_origin += shift;
        self.drag_index += laps;
        self.velocity.shift(shift);
        if let Some(target) = self.settle_target.as_mut() {
            target.target_offset += shift;
            target.target_index += laps;
        }
    }

    fn process(&mut self, offset: f32) {
        let outcome = self.wrap.as_mut().map(|wrap| wrap.process(offset));
        let offset = match outcome {
            Some(outcome) => {
                self.apply_rebase(outcome.shift);
                outcome.offset
            }
            None => {
                self.last_rebase = 0.0;
                offset
            }
        };
        if offset.is_finite() {
            self.offset = offset;
        }

        let looping = self.wrap.is_some();
        let clip = self.config.clip_edges && !looping;
        let progress = normalize_offset(offset, &self.metrics, clip);
        self.pair = resolve(progress.value());
        self.frame = if looping {
            self.mapper
                .map_frame_looping(&self.pair, self.metrics.item_count())
        } else {
            self.mapper.map_frame(&self.pair, self.metrics.item_count())
        };
        log::trace!(
            "sample {offset} -> progress {} ({} items mapped)",
            progress.value(),
            self.frame.len()
        );
    }
}

impl std::fmt::Debug for PagerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagerState")
            .field("phase", &self.gesture.phase())
            .field("offset", &self.offset)
            .field("pair", &self.pair)
            .field("settle_target", &self.settle_target)
            .field("transform", &self.mapper.kind().name())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/pager_state_tests.rs"]
mod tests;
