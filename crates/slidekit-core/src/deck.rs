//! Looping stacked deck: drag the top card away and it goes to the back.
//!
//! The cards behind the top one are laid out by [`DepthTransform`]. Only
//! forward (leading-edge) drags are allowed, and a commit plays in two
//! steps: the top card slides out, then, once it is behind the stack, slides
//! back into its slot.

use slidekit_animation::AnimationType;
use slidekit_foundation::gesture_constants::{
    DECK_PUSH_DURATION_SECS, DEFAULT_COMMIT_THRESHOLD, SETTLE_DURATION_SECS,
};
use slidekit_foundation::{GestureEvent, GestureMachine, GesturePhase};
use slidekit_geometry::Axis;
use smallvec::SmallVec;

use crate::commit::{AllowedDirection, CommitPolicy};
use crate::error::{positive_extent, ConfigError};
use crate::transform::DepthTransform;
use crate::visual::{Frame, ItemVisual, Rotation, VisualState};

/// Tilt of a card dragged a full card width away.
const MAX_DRAG_ROTATION_DEGREES: f32 = -30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckMotion {
    /// Top card slides out past its own width.
    Push,
    /// The pushed card, now at the back, slides back into the stack.
    Restore,
    /// Not far enough; the top card returns.
    SnapBack,
}

/// Offset animation the host should run for the dragged card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeckRequest {
    pub motion: DeckMotion,
    pub card: usize,
    pub target_offset: f32,
    pub animation: AnimationType,
}

#[derive(Debug, Clone)]
pub struct Deck {
    count: usize,
    card_extent: f32,
    rotation: usize,
    moving_card: usize,
    offset: f32,
    drag_origin: f32,
    depth: DepthTransform,
    commit: CommitPolicy,
    gesture: GestureMachine,
    pending: Option<DeckMotion>,
}

impl Deck {
    pub fn new(
        count: usize,
        card_extent: f32,
        visible_cards_count: usize,
    ) -> Result<Self, ConfigError> {
        let card_extent = positive_extent("card extent", card_extent)?;
        let depth = DepthTransform::new(20.0, 0.07, visible_cards_count)?;
        let commit = CommitPolicy::new(DEFAULT_COMMIT_THRESHOLD)?
            .with_allowed_direction(AllowedDirection::ForwardOnly);
        Ok(Self {
            count,
            card_extent,
            rotation: 0,
            moving_card: 0,
            offset: 0.0,
            drag_origin: 0.0,
            depth,
            commit,
            gesture: GestureMachine::new(),
            pending: None,
        })
    }

    pub fn with_depth(mut self, depth: DepthTransform) -> Self {
        self.depth = depth;
        self
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn phase(&self) -> GesturePhase {
        self.gesture.phase()
    }

    /// Card currently on top.
    pub fn top_card(&self) -> usize {
        if self.count == 0 {
            0
        } else {
            self.rotation % self.count
        }
    }

    /// How many cards sit in front of `card`.
    pub fn depth_of(&self, card: usize) -> usize {
        if self.count == 0 {
            return 0;
        }
        (card + self.count - self.top_card()) % self.count
    }

    /// Cards from top to bottom.
    pub fn order(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.count).map(move |depth| (self.rotation + depth) % self.count)
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Applies one frame of the host's offset animation.
    pub fn set_offset(&mut self, offset: f32) {
        if offset.is_finite() {
            self.offset = offset.min(0.0);
        }
    }

    pub fn on_gesture(&mut self, event: GestureEvent) -> Option<DeckRequest> {
        if self.count < 2 && matches!(event, GestureEvent::Began) {
            log::debug!("deck of {} cards ignores drags", self.count);
            return None;
        }
        let transition = self.gesture.handle(&event)?;
        match event {
            GestureEvent::Began => {
                if transition.interrupted_settle() && self.pending == Some(DeckMotion::Restore) {
                    self.offset = 0.0;
                }
                self.pending = None;
                self.moving_card = self.top_card();
                self.drag_origin = self.offset;
                None
            }
            GestureEvent::Changed { translation, .. } => {
                self.follow_finger(translation);
                None
            }
            GestureEvent::Ended {
                translation,
                velocity,
            } => {
                self.follow_finger(translation);
                let decision = self
                    .commit
                    .on_gesture_end(0, self.offset, velocity, self.card_extent);
                let request = if decision.committed() {
                    self.request(DeckMotion::Push, -self.card_extent, DECK_PUSH_DURATION_SECS)
                } else {
                    self.request(DeckMotion::SnapBack, 0.0, SETTLE_DURATION_SECS)
                };
                self.pending = Some(request.motion);
                Some(request)
            }
            GestureEvent::Cancelled if transition.to == GesturePhase::Settling => {
                self.pending = Some(DeckMotion::SnapBack);
                Some(self.request(DeckMotion::SnapBack, 0.0, SETTLE_DURATION_SECS))
            }
            GestureEvent::Cancelled | GestureEvent::SettleFinished => {
                self.pending = None;
                None
            }
        }
    }

    /// The host finished the last requested animation. A finished push
    /// rotates the deck and asks for the restore animation.
    pub fn settle_finished(&mut self) -> Option<DeckRequest> {
        match self.pending.take() {
            Some(DeckMotion::Push) => {
                self.rotation = (self.rotation + 1) % self.count.max(1);
                log::debug!("deck rotated; top card is now {}", self.top_card());
                let request = self.request(DeckMotion::Restore, 0.0, DECK_PUSH_DURATION_SECS);
                self.pending = Some(DeckMotion::Restore);
                Some(request)
            }
            Some(DeckMotion::Restore) | Some(DeckMotion::SnapBack) | None => {
                self.offset = 0.0;
                self.on_gesture(GestureEvent::SettleFinished);
                None
            }
        }
    }

    fn follow_finger(&mut self, translation: f32) {
        let allowed = self.commit.allowed_direction().constrain(translation);
        self.set_offset(self.drag_origin + allowed);
    }

    fn request(&self, motion: DeckMotion, target_offset: f32, duration_secs: f32) -> DeckRequest {
        DeckRequest {
            motion,
            card: self.moving_card,
            target_offset,
            animation: AnimationType::smooth(duration_secs),
        }
    }

    fn drag_rotation(&self) -> f32 {
        (-self.offset / self.card_extent).clamp(0.0, 1.0) * MAX_DRAG_ROTATION_DEGREES
    }

    /// Visual state of one card.
    pub fn card_state(&self, card: usize) -> VisualState {
        let depth = self.depth_of(card);
        let mut state = self.depth.map_distance(0, depth as f32);
        state.z_index = (self.count - depth) as f32;
        if card == self.moving_card {
            if depth == 0 {
                state.translation += self.depth.axis.along(self.offset);
            }
            state = state.with_rotation(Rotation::y(self.drag_rotation()));
        }
        state
    }

    /// States for the visible part of the deck, plus the moving card.
    pub fn frame(&self) -> Frame {
        if self.count == 0 {
            return Frame::empty();
        }
        let visible = (self.depth.max_depth + 1).min(self.count);
        let mut items: SmallVec<[ItemVisual; 8]> = self
            .order()
            .take(visible)
            .map(|card| ItemVisual {
                index: card as i64,
                state: self.card_state(card),
            })
            .collect();
        if !items.iter().any(|item| item.index == self.moving_card as i64) {
            items.push(ItemVisual {
                index: self.moving_card as i64,
                state: self.card_state(self.moving_card),
            });
        }
        items.sort_by_key(|item| item.index);

        let mut hidden = self.depth.map_distance(0, self.depth.max_depth as f32);
        hidden.z_index = 0.0;
        Frame {
            items,
            before: hidden,
            after: hidden,
        }
    }

    pub fn axis(&self) -> Axis {
        self.depth.axis
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use web_time::Duration;

    fn drag(deck: &mut Deck, translation: f32, velocity: f32) -> Option<DeckRequest> {
        deck.on_gesture(GestureEvent::Began);
        deck.on_gesture(GestureEvent::Changed {
            translation,
            timestamp: Duration::from_millis(16),
        });
        deck.on_gesture(GestureEvent::Ended {
            translation,
            velocity,
        })
    }

    #[test]
    fn far_drag_pushes_the_top_card_to_the_back() {
        let mut deck = Deck::new(4, 200.0, 2).unwrap();
        let push = drag(&mut deck, -150.0, 0.0).unwrap();
        assert_eq!(push.motion, DeckMotion::Push);
        assert_eq!(push.target_offset, -200.0);

        deck.set_offset(-200.0);
        let restore = deck.settle_finished().unwrap();
        assert_eq!(restore.motion, DeckMotion::Restore);
        assert_eq!(restore.card, 0);
        assert_eq!(deck.top_card(), 1);
        assert_eq!(deck.depth_of(0), 3);

        deck.set_offset(0.0);
        assert_eq!(deck.settle_finished(), None);
        assert_eq!(deck.phase(), GesturePhase::Idle);
    }

    #[test]
    fn velocity_helps_a_short_drag_over_the_threshold() {
        let mut deck = Deck::new(4, 200.0, 2).unwrap();
        // 100 + 200 / 5 = 140 > 130
        let request = drag(&mut deck, -100.0, -200.0).unwrap();
        assert_eq!(request.motion, DeckMotion::Push);
    }

    #[test]
    fn short_or_backward_drags_snap_back() {
        let mut deck = Deck::new(4, 200.0, 2).unwrap();
        assert_eq!(drag(&mut deck, -60.0, 0.0).unwrap().motion, DeckMotion::SnapBack);
        deck.settle_finished();

        let request = drag(&mut deck, 180.0, 3_000.0).unwrap();
        assert_eq!(request.motion, DeckMotion::SnapBack);
        assert_eq!(deck.offset(), 0.0);
    }

    #[test]
    fn dragged_card_tilts_with_its_offset() {
        let mut deck = Deck::new(3, 200.0, 2).unwrap();
        deck.on_gesture(GestureEvent::Began);
        deck.on_gesture(GestureEvent::Changed {
            translation: -100.0,
            timestamp: Duration::from_millis(16),
        });
        let top = deck.card_state(0);
        assert_eq!(top.rotation, Rotation::y(-15.0));
        assert_eq!(top.translation.x, -100.0);
        assert_eq!(deck.card_state(1).rotation.degrees, 0.0);
    }

    #[test]
    fn cards_behind_recede_and_draw_below() {
        let deck = Deck::new(5, 200.0, 2).unwrap();
        let frame = deck.frame();
        assert_eq!(frame.len(), 3);
        assert_eq!(frame.state_of(1).translation.x, 20.0);
        assert!(frame.state_of(0).z_index > frame.state_of(1).z_index);
        assert_eq!(frame.state_of(4).translation.x, 40.0);
    }

    #[test]
    fn single_card_deck_ignores_drags() {
        let mut deck = Deck::new(1, 200.0, 2).unwrap();
        assert_eq!(drag(&mut deck, -190.0, -900.0), None);
        assert_eq!(deck.phase(), GesturePhase::Idle);
    }
}
