//! Scroll-position-driven transform kernel.
//!
//! The kernel turns a stream of raw scroll or drag positions into
//! per-item render parameters, and decides where a released gesture lands.
//! It never renders and never animates; hosts feed it [`PositionSample`]s and
//! [`GestureEvent`]s and apply the [`Frame`]s and [`SettleRequest`]s it emits.
//!
//! ```text
//! sample -> wrap rebase -> progress -> active pair -> transform -> frame
//!                                                     \-> gesture end -> commit decision
//! ```
//!
//! [`PositionSample`]: slidekit_foundation::PositionSample
//! [`GestureEvent`]: slidekit_foundation::GestureEvent

pub mod auto_scroll;
pub mod commit;
pub mod config;
pub mod deck;
mod error;
pub mod index;
pub mod metrics;
pub mod observer;
pub mod pager_state;
pub mod progress;
pub mod reveal;
pub mod sentinel;
pub mod stagger;
pub mod transform;
pub mod visual;
pub mod wrap;

pub use auto_scroll::AutoScroller;
pub use commit::{
    AllowedDirection, CommitOutcome, CommitPolicy, Direction, GestureCommitDecision,
    VelocityDampening,
};
pub use config::{IndexBounds, PagerConfig};
pub use deck::{Deck, DeckMotion, DeckRequest};
pub use error::ConfigError;
pub use index::{resolve, ActivePair};
pub use metrics::{check_label_count, page_count_for, LayoutMetrics};
pub use observer::{Publisher, Subscription};
pub use pager_state::{PagerState, SettleRequest};
pub use progress::{normalize, normalize_offset, Progress};
pub use reveal::{CollapsingHeader, PullToReveal};
pub use sentinel::{Retarget, SentinelPager};
pub use stagger::{FlipTransition, StaggerConfig, StaggeredTransition, TransitionPhase};
pub use transform::{
    ChannelPair, CircularTransform, CoverflowTransform, DepthTransform, PairTransform,
    ParallaxTransform, TiltTransform, TransformKind, TransformMapper,
};
pub use visual::{Frame, ItemVisual, Rotation, RotationAxis, VisualState};
pub use wrap::{RebaseState, WrapAroundRepositioner, WrapOutcome, WrapWindow};

pub mod prelude {
    pub use crate::commit::{AllowedDirection, CommitOutcome, Direction, GestureCommitDecision};
    pub use crate::config::{IndexBounds, PagerConfig};
    pub use crate::index::ActivePair;
    pub use crate::metrics::LayoutMetrics;
    pub use crate::pager_state::{PagerState, SettleRequest};
    pub use crate::transform::{TransformKind, TransformMapper};
    pub use crate::visual::{Frame, VisualState};
    pub use crate::ConfigError;
    pub use slidekit_foundation::prelude::*;
}
