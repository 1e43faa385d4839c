//! Animation core for weft.
//!
//! This crate holds everything that animates a single property over time,
//! independent of how the animated elements are stored:
//! - [`value`]: the closed value domain (numbers, colors, matrices, sequences)
//! - [`interpolate`]: blending between two values
//! - [`easing`]: timing curves
//! - [`config`]: the declarative transition/animation wire format
//! - [`events`]: the generic event bus and tween events
//! - [`tween`]: the per-property animator state machine
//! - [`timeline`]: clocks that drive joined tweens
//! - [`manager`]: the keyed tween registry and its per-frame patch
//!
//! # Example
//!
//! ```ignore
//! use weft_anim::{Timeline, Tween, TweenManager, TweenTarget, Property, Value, Timing};
//!
//! let mut timeline = Timeline::clock();
//! let mut tweens = TweenManager::new();
//! let tween = Tween::interpolate(
//!     TweenTarget::node("a"),
//!     Property::Opacity,
//!     Value::Number(0.0),
//!     Value::Number(1.0),
//!     Timing::new(0.0, 300.0),
//! );
//! tweens.join(tween, true, &mut timeline, &mut graph)?;
//! tweens.tick(&mut timeline, 150.0, &mut graph)?;
//! ```

pub mod config;
pub mod easing;
pub mod error;
pub mod events;
pub mod interpolate;
pub mod manager;
pub mod timeline;
pub mod transform;
pub mod tween;
pub mod value;

pub use config::{
    AnimationConfig, AnimationFrame, NodeAnimation, NodeTransition, TransitionConfig, Trigger,
    has_leave_animations,
};
pub use easing::Easing;
pub use error::AnimError;
pub use events::{BusEvent, EventBus, Subscription, TweenEvent, TweenEventKind, TweenEventName};
pub use interpolate::blend;
pub use manager::{TweenManager, TweensPatch, diff_tweens};
pub use timeline::{Timeline, TimelineEvent, TimelineEventName, TimelineKind, TimelineNodes};
pub use transform::{DecomposedMatrix, Matrix};
pub use tween::{
    Curve, ElementKind, Keyframe, Mutator, Timing, Tween, TweenId, TweenKey, TweenRole,
    TweenStatus, TweenTarget,
};
pub use value::{Property, PropertyMap, Rgba, Value};
