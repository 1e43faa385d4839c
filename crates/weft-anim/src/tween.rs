//! Tweens: time-driven animators of one element property.
//!
//! A tween moves through `Join -> Start -> Progress -> End`, with `Pause` as
//! a side state:
//!
//! - [`Tween::join`] records the timeline's current value as the join
//!   offset, applies the initial value and registers on the timeline.
//! - [`Tween::update`] computes
//!   `progress = clamp01((t - join_start - delay) / duration)`, applies the
//!   eased value through a [`Mutator`] and reports `Start` (first update
//!   only), `Progress` and `Change` events.
//! - When progress reaches 1 the tween stays registered for one more tick
//!   and emits `End` on that tick, so observers always see the final value
//!   before teardown.
//! - [`Tween::end`] terminates at once; forced ends snap to the final value.
//!
//! Child tweens queued with [`Tween::after`] are handed back to the owner
//! (see [`crate::TweenManager`]) when the parent ends.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::AnimationConfig;
use crate::easing::Easing;
use crate::error::AnimError;
use crate::events::{TweenEvent, TweenEventKind};
use crate::interpolate::blend;
use crate::timeline::Timeline;
use crate::value::{Property, Value};

/// Unique identifier of a tween instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TweenId(pub u64);

impl TweenId {
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for TweenId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TweenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tween#{}", self.0)
    }
}

/// Kind of render element a tween writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementKind {
    Node,
    Link,
}

/// The element a tween is bound to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TweenTarget {
    pub kind: ElementKind,
    pub id: String,
}

impl TweenTarget {
    pub fn node(id: impl Into<String>) -> Self {
        Self {
            kind: ElementKind::Node,
            id: id.into(),
        }
    }

    pub fn link(id: impl Into<String>) -> Self {
        Self {
            kind: ElementKind::Link,
            id: id.into(),
        }
    }
}

/// Identity of a logical animation. Displays as `"{id}.{property}"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TweenKey {
    pub target: TweenTarget,
    pub property: Property,
}

impl TweenKey {
    pub fn new(target: TweenTarget, property: Property) -> Self {
        Self { target, property }
    }
}

impl fmt::Display for TweenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.target.id, self.property)
    }
}

/// Which trigger produced a tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TweenRole {
    Enter,
    Update,
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenStatus {
    Join,
    Start,
    Progress,
    Pause,
    End,
}

/// Delay, duration (both in timeline units) and easing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub delay: f64,
    pub duration: f64,
    pub easing: Easing,
}

impl Timing {
    pub fn new(delay: f64, duration: f64) -> Self {
        Self {
            delay,
            duration,
            easing: Easing::Linear,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

/// One stop of a keyframe track.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframe {
    pub offset: f64,
    pub value: Value,
    /// Easing of the segment that starts here.
    pub easing: Option<Easing>,
}

/// The path a tween follows.
#[derive(Debug, Clone, PartialEq)]
pub enum Curve {
    Interpolate { from: Value, to: Value },
    /// Sorted by offset, never empty.
    Keyframes(Vec<Keyframe>),
}

impl Curve {
    fn initial(&self) -> Option<&Value> {
        match self {
            Curve::Interpolate { from, .. } => Some(from),
            Curve::Keyframes(frames) => frames.first().map(|k| &k.value),
        }
    }

    /// Value reached at progress 1.
    pub fn target(&self) -> Option<&Value> {
        match self {
            Curve::Interpolate { to, .. } => Some(to),
            Curve::Keyframes(frames) => frames.last().map(|k| &k.value),
        }
    }

    /// Two curves lead to the same place. Interpolations compare `to`,
    /// keyframe tracks compare every stop.
    pub fn same_target(&self, other: &Curve) -> bool {
        match (self, other) {
            (Curve::Interpolate { to: a, .. }, Curve::Interpolate { to: b, .. }) => a == b,
            (Curve::Keyframes(a), Curve::Keyframes(b)) => a == b,
            _ => false,
        }
    }

    pub fn value_at(&self, progress: f64, easing: Easing) -> Result<Value, AnimError> {
        match self {
            Curve::Interpolate { from, to } => blend(from, to, easing.evaluate(progress)),
            Curve::Keyframes(frames) => {
                let (Some(first), Some(last)) = (frames.first(), frames.last()) else {
                    return Err(AnimError::EmptyKeyframes);
                };
                if progress <= first.offset {
                    return Ok(first.value.clone());
                }
                if progress >= last.offset {
                    return Ok(last.value.clone());
                }
                let pair = frames
                    .windows(2)
                    .find(|w| progress >= w[0].offset && progress < w[1].offset);
                let Some([a, b]) = pair else {
                    return Ok(last.value.clone());
                };
                let span = b.offset - a.offset;
                let local = if span > 0.0 {
                    (progress - a.offset) / span
                } else {
                    1.0
                };
                blend(&a.value, &b.value, a.easing.unwrap_or(easing).evaluate(local))
            }
        }
    }
}

/// Writes tween values onto the elements they are bound to.
///
/// `slot` is a cached position hint owned by the tween; implementations may
/// use it to skip a lookup and should refresh it when stale. Writing to an
/// element that no longer exists is a no-op.
pub trait Mutator {
    fn mutate(
        &mut self,
        target: &TweenTarget,
        slot: &mut Option<usize>,
        property: Property,
        value: &Value,
    ) -> Result<(), AnimError>;
}

/// Animator of a single (element, property) pair.
#[derive(Debug, Clone)]
pub struct Tween {
    id: TweenId,
    key: TweenKey,
    role: TweenRole,
    curve: Curve,
    timing: Timing,
    join_start: Option<f64>,
    last_time: f64,
    progress: f64,
    status: TweenStatus,
    resume_status: TweenStatus,
    active: bool,
    started: bool,
    finished: bool,
    current: Value,
    slot: Option<usize>,
    children: Vec<Tween>,
}

impl Tween {
    /// Tween from `from` to `to`.
    pub fn interpolate(
        target: TweenTarget,
        property: Property,
        from: Value,
        to: Value,
        timing: Timing,
    ) -> Self {
        let current = from.clone();
        Self::with_curve(
            TweenKey::new(target, property),
            Curve::Interpolate { from, to },
            timing,
            current,
        )
    }

    /// Tween along a keyframe track. Returns `None` for an empty track.
    pub fn keyframes(
        target: TweenTarget,
        property: Property,
        mut frames: Vec<Keyframe>,
        timing: Timing,
    ) -> Option<Self> {
        frames.sort_by(|a, b| a.offset.total_cmp(&b.offset));
        let current = frames.first()?.value.clone();
        Some(Self::with_curve(
            TweenKey::new(target, property),
            Curve::Keyframes(frames),
            timing,
            current,
        ))
    }

    /// One keyframe tween per property named by the config's frames.
    ///
    /// Frames without an explicit progress are spread evenly by index.
    pub fn from_animation(target: &TweenTarget, config: &AnimationConfig) -> Vec<Tween> {
        let count = config.frames.len();
        let offset_of = |index: usize| match count {
            0 | 1 => 1.0,
            n => index as f64 / (n - 1) as f64,
        };
        let timing = Timing::new(config.delay, config.duration).with_easing(config.easing);

        let mut properties: Vec<Property> = config
            .frames
            .iter()
            .flat_map(|f| f.properties.keys().copied())
            .collect();
        properties.sort();
        properties.dedup();

        properties
            .into_iter()
            .filter_map(|property| {
                let track = config
                    .frames
                    .iter()
                    .enumerate()
                    .filter_map(|(index, frame)| {
                        frame.properties.get(&property).map(|value| Keyframe {
                            offset: frame.progress.unwrap_or_else(|| offset_of(index)).clamp(0.0, 1.0),
                            value: value.clone(),
                            easing: frame.easing,
                        })
                    })
                    .collect();
                Tween::keyframes(target.clone(), property, track, timing)
            })
            .collect()
    }

    fn with_curve(key: TweenKey, curve: Curve, timing: Timing, current: Value) -> Self {
        Self {
            id: TweenId::new(),
            key,
            role: TweenRole::Update,
            curve,
            timing,
            join_start: None,
            last_time: 0.0,
            progress: 0.0,
            status: TweenStatus::Join,
            resume_status: TweenStatus::Join,
            active: true,
            started: false,
            finished: false,
            current,
            slot: None,
            children: Vec::new(),
        }
    }

    pub fn with_role(mut self, role: TweenRole) -> Self {
        self.role = role;
        self
    }

    /// Queue tweens that join the timeline once this one ends.
    pub fn after(mut self, children: impl IntoIterator<Item = Tween>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn id(&self) -> TweenId {
        self.id
    }

    pub fn key(&self) -> &TweenKey {
        &self.key
    }

    pub fn target(&self) -> &TweenTarget {
        &self.key.target
    }

    pub fn property(&self) -> Property {
        self.key.property
    }

    pub fn role(&self) -> TweenRole {
        self.role
    }

    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn status(&self) -> TweenStatus {
        self.status
    }

    pub fn current(&self) -> &Value {
        &self.current
    }

    pub fn join_start(&self) -> Option<f64> {
        self.join_start
    }

    pub fn is_joined(&self) -> bool {
        self.join_start.is_some()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn children(&self) -> &[Tween] {
        &self.children
    }

    pub(crate) fn take_children(&mut self) -> Vec<Tween> {
        std::mem::take(&mut self.children)
    }

    pub fn slot(&self) -> Option<usize> {
        self.slot
    }

    pub fn set_slot(&mut self, slot: Option<usize>) {
        self.slot = slot;
    }

    /// Target value of the curve.
    pub fn to(&self) -> Option<&Value> {
        self.curve.target()
    }

    pub fn same_target(&self, other: &Tween) -> bool {
        self.curve.same_target(&other.curve)
    }

    /// Progress the tween would have at timeline value `time`.
    pub fn progress_at(&self, time: f64) -> f64 {
        let Some(join_start) = self.join_start else {
            return 0.0;
        };
        let elapsed = time - join_start - self.timing.delay;
        if self.timing.duration <= 0.0 {
            return if elapsed >= 0.0 { 1.0 } else { 0.0 };
        }
        (elapsed / self.timing.duration).clamp(0.0, 1.0)
    }

    fn emit(&self, events: &mut Vec<TweenEvent>, kind: TweenEventKind) {
        events.push(TweenEvent {
            tween: self.id,
            key: self.key.clone(),
            role: self.role,
            kind,
        });
    }

    fn apply(&mut self, mutator: &mut dyn Mutator) -> Result<(), AnimError> {
        mutator.mutate(&self.key.target, &mut self.slot, self.key.property, &self.current)
    }

    /// Write the current value again, e.g. onto a fresh copy of the element.
    pub fn reapply(&mut self, mutator: &mut dyn Mutator) -> Result<(), AnimError> {
        if self.is_joined() && !self.finished {
            self.apply(mutator)?;
        }
        Ok(())
    }

    /// Join `timeline` at its current value and apply the initial value.
    pub fn join(
        &mut self,
        timeline: &mut Timeline,
        mutator: &mut dyn Mutator,
        events: &mut Vec<TweenEvent>,
    ) -> Result<(), AnimError> {
        let now = timeline.value();
        self.join_start = Some(now);
        self.last_time = now;
        if let Some(initial) = self.curve.initial() {
            self.current = initial.clone();
        }
        self.apply(mutator)?;
        timeline.add(self.id);
        self.emit(events, TweenEventKind::Join);
        Ok(())
    }

    /// Advance to timeline value `time`.
    pub fn update(
        &mut self,
        time: f64,
        mutator: &mut dyn Mutator,
        events: &mut Vec<TweenEvent>,
    ) -> Result<(), AnimError> {
        if self.finished {
            return Ok(());
        }
        let Some(join_start) = self.join_start else {
            return Ok(());
        };
        if !self.active {
            // Frozen: slide the join offset so progress resumes where it stopped
            self.join_start = Some(join_start + (time - self.last_time));
            self.last_time = time;
            return Ok(());
        }
        self.last_time = time;

        if self.status == TweenStatus::End {
            // Progress hit 1 on the previous tick
            self.apply(mutator)?;
            self.finish(events);
            return Ok(());
        }

        if !self.started {
            self.started = true;
            self.status = TweenStatus::Start;
            self.emit(events, TweenEventKind::Start);
        }

        self.progress = self.progress_at(time);
        self.emit(events, TweenEventKind::Progress(self.progress));

        self.current = self.curve.value_at(self.progress, self.timing.easing)?;
        self.apply(mutator)?;
        self.emit(events, TweenEventKind::Change(self.current.clone()));
        tracing::trace!(key = %self.key, progress = self.progress, value = %self.current, "tween update");

        self.status = if self.progress >= 1.0 {
            TweenStatus::End
        } else {
            TweenStatus::Progress
        };
        Ok(())
    }

    /// Terminate now. A forced end snaps to the final value first.
    pub fn end(
        &mut self,
        force: bool,
        mutator: &mut dyn Mutator,
        events: &mut Vec<TweenEvent>,
    ) -> Result<(), AnimError> {
        if self.finished {
            return Ok(());
        }
        if force {
            self.progress = 1.0;
            self.current = self.curve.value_at(1.0, self.timing.easing)?;
            if self.is_joined() {
                self.apply(mutator)?;
            }
        }
        self.status = TweenStatus::End;
        self.finish(events);
        Ok(())
    }

    fn finish(&mut self, events: &mut Vec<TweenEvent>) {
        self.finished = true;
        self.status = TweenStatus::End;
        self.emit(events, TweenEventKind::End);
    }

    /// Stop advancing; applies to queued children too.
    pub fn pause(&mut self, events: &mut Vec<TweenEvent>) {
        if self.active && !self.finished {
            self.active = false;
            self.resume_status = self.status;
            self.status = TweenStatus::Pause;
            self.emit(events, TweenEventKind::Pause);
        }
        for child in &mut self.children {
            child.pause(events);
        }
    }

    pub fn resume(&mut self, events: &mut Vec<TweenEvent>) {
        if !self.active && !self.finished {
            self.active = true;
            self.status = self.resume_status;
            self.emit(events, TweenEventKind::Resume);
        }
        for child in &mut self.children {
            child.resume(events);
        }
    }
}

static_assertions::assert_impl_all!(Tween: Send);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnimationFrame;
    use crate::value::PropertyMap;
    use std::collections::HashMap;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    /// Records the last value written per key.
    #[derive(Default)]
    struct Recorder {
        values: HashMap<String, Value>,
    }

    impl Mutator for Recorder {
        fn mutate(
            &mut self,
            target: &TweenTarget,
            _slot: &mut Option<usize>,
            property: Property,
            value: &Value,
        ) -> Result<(), AnimError> {
            self.values
                .insert(format!("{}.{}", target.id, property), value.clone());
            Ok(())
        }
    }

    fn opacity_tween(duration: f64) -> Tween {
        Tween::interpolate(
            TweenTarget::node("a"),
            Property::Opacity,
            Value::Number(0.0),
            Value::Number(1.0),
            Timing::new(0.0, duration),
        )
    }

    fn kinds(events: &[TweenEvent]) -> Vec<&'static str> {
        events
            .iter()
            .map(|e| match e.kind {
                TweenEventKind::Join => "join",
                TweenEventKind::Start => "start",
                TweenEventKind::Progress(_) => "progress",
                TweenEventKind::Change(_) => "change",
                TweenEventKind::Pause => "pause",
                TweenEventKind::Resume => "resume",
                TweenEventKind::End => "end",
            })
            .collect()
    }

    #[test]
    fn test_key_display() {
        assert_eq!(opacity_tween(100.0).key().to_string(), "a.opacity");
    }

    #[test]
    fn test_join_applies_initial_value() {
        let mut timeline = Timeline::clock();
        timeline.set_value(50.0);
        let mut recorder = Recorder::default();
        let mut events = Vec::new();
        let mut tween = opacity_tween(100.0);

        tween.join(&mut timeline, &mut recorder, &mut events).unwrap();

        assert_eq!(tween.join_start(), Some(50.0));
        assert!(timeline.contains(tween.id()));
        assert_eq!(recorder.values["a.opacity"], Value::Number(0.0));
        assert_eq!(kinds(&events), vec!["join"]);
    }

    #[test]
    fn test_start_fires_once() {
        let mut timeline = Timeline::clock();
        let mut recorder = Recorder::default();
        let mut events = Vec::new();
        let mut tween = opacity_tween(100.0);
        tween.join(&mut timeline, &mut recorder, &mut events).unwrap();
        events.clear();

        tween.update(0.0, &mut recorder, &mut events).unwrap();
        tween.update(10.0, &mut recorder, &mut events).unwrap();

        let starts = kinds(&events).iter().filter(|k| **k == "start").count();
        assert_eq!(starts, 1);
        assert_eq!(&kinds(&events)[..4], &["start", "progress", "change", "progress"]);
    }

    #[test]
    fn test_progress_clamps_and_is_monotonic() {
        let mut timeline = Timeline::clock();
        let mut recorder = Recorder::default();
        let mut events = Vec::new();
        let mut tween = Tween::interpolate(
            TweenTarget::node("a"),
            Property::X,
            Value::Number(0.0),
            Value::Number(10.0),
            Timing::new(20.0, 100.0),
        );
        tween.join(&mut timeline, &mut recorder, &mut events).unwrap();

        let mut last = 0.0;
        for t in [0.0, 10.0, 20.0, 45.0, 70.0, 119.0] {
            tween.update(t, &mut recorder, &mut events).unwrap();
            assert!(tween.progress() >= last);
            last = tween.progress();
        }
        assert!(approx_eq(tween.progress_at(45.0), 0.25));
        tween.update(120.0, &mut recorder, &mut events).unwrap();
        assert_eq!(tween.progress(), 1.0);
        assert_eq!(tween.progress_at(500.0), 1.0);
    }

    #[test]
    fn test_end_fires_one_tick_late() {
        let mut timeline = Timeline::clock();
        let mut recorder = Recorder::default();
        let mut events = Vec::new();
        let mut tween = opacity_tween(100.0);
        tween.join(&mut timeline, &mut recorder, &mut events).unwrap();

        tween.update(100.0, &mut recorder, &mut events).unwrap();
        assert_eq!(tween.progress(), 1.0);
        assert_eq!(tween.status(), TweenStatus::End);
        assert!(!tween.is_finished());
        assert!(!events.iter().any(TweenEvent::is_end));
        assert_eq!(recorder.values["a.opacity"], Value::Number(1.0));

        tween.update(116.0, &mut recorder, &mut events).unwrap();
        assert!(tween.is_finished());
        assert_eq!(events.iter().filter(|e| e.is_end()).count(), 1);

        // further updates are inert
        tween.update(132.0, &mut recorder, &mut events).unwrap();
        assert_eq!(events.iter().filter(|e| e.is_end()).count(), 1);
    }

    #[test]
    fn test_forced_end_snaps() {
        let mut timeline = Timeline::clock();
        let mut recorder = Recorder::default();
        let mut events = Vec::new();
        let mut tween = opacity_tween(100.0);
        tween.join(&mut timeline, &mut recorder, &mut events).unwrap();
        tween.update(30.0, &mut recorder, &mut events).unwrap();

        tween.end(true, &mut recorder, &mut events).unwrap();

        assert!(tween.is_finished());
        assert_eq!(tween.progress(), 1.0);
        assert_eq!(recorder.values["a.opacity"], Value::Number(1.0));
        assert!(events.last().is_some_and(TweenEvent::is_end));
    }

    #[test]
    fn test_unforced_end_keeps_value() {
        let mut timeline = Timeline::clock();
        let mut recorder = Recorder::default();
        let mut events = Vec::new();
        let mut tween = opacity_tween(100.0);
        tween.join(&mut timeline, &mut recorder, &mut events).unwrap();
        tween.update(50.0, &mut recorder, &mut events).unwrap();

        tween.end(false, &mut recorder, &mut events).unwrap();

        assert!(approx_eq(tween.progress(), 0.5));
        assert_eq!(recorder.values["a.opacity"], Value::Number(0.5));
    }

    #[test]
    fn test_pause_freezes_progress() {
        let mut timeline = Timeline::clock();
        let mut recorder = Recorder::default();
        let mut events = Vec::new();
        let mut tween = opacity_tween(100.0);
        tween.join(&mut timeline, &mut recorder, &mut events).unwrap();
        tween.update(40.0, &mut recorder, &mut events).unwrap();

        tween.pause(&mut events);
        assert_eq!(tween.status(), TweenStatus::Pause);
        tween.update(90.0, &mut recorder, &mut events).unwrap();
        assert!(approx_eq(tween.progress(), 0.4));
        assert_eq!(recorder.values["a.opacity"], Value::Number(0.4));

        tween.resume(&mut events);
        tween.update(100.0, &mut recorder, &mut events).unwrap();
        // 50ms were spent paused
        assert!(approx_eq(tween.progress(), 0.5));
    }

    #[test]
    fn test_pause_recurses_into_children() {
        let child = opacity_tween(50.0);
        let mut tween = opacity_tween(100.0).after([child]);
        let mut events = Vec::new();
        tween.pause(&mut events);
        assert!(!tween.children()[0].is_active());
        tween.resume(&mut events);
        assert!(tween.children()[0].is_active());
    }

    #[test]
    fn test_zero_duration_completes_after_delay() {
        let mut timeline = Timeline::clock();
        let mut recorder = Recorder::default();
        let mut events = Vec::new();
        let mut tween = Tween::interpolate(
            TweenTarget::node("a"),
            Property::X,
            Value::Number(0.0),
            Value::Number(5.0),
            Timing::new(10.0, 0.0),
        );
        tween.join(&mut timeline, &mut recorder, &mut events).unwrap();
        tween.update(5.0, &mut recorder, &mut events).unwrap();
        assert_eq!(tween.progress(), 0.0);
        tween.update(10.0, &mut recorder, &mut events).unwrap();
        assert_eq!(tween.progress(), 1.0);
    }

    #[test]
    fn test_blend_error_surfaces() {
        let mut timeline = Timeline::clock();
        let mut recorder = Recorder::default();
        let mut events = Vec::new();
        let mut tween = Tween::interpolate(
            TweenTarget::node("a"),
            Property::Color,
            Value::Number(0.0),
            Value::Color(crate::Rgba::BLACK),
            Timing::new(0.0, 100.0),
        );
        tween.join(&mut timeline, &mut recorder, &mut events).unwrap();
        let err = tween.update(50.0, &mut recorder, &mut events).unwrap_err();
        assert!(matches!(err, AnimError::UnsupportedBlend { .. }));
    }

    #[test]
    fn test_keyframes_from_animation() {
        let frame = |progress: Option<f64>, opacity: f64| AnimationFrame {
            progress,
            easing: None,
            properties: PropertyMap::from([(Property::Opacity, Value::Number(opacity))]),
        };
        let config = AnimationConfig {
            delay: 0.0,
            duration: 100.0,
            easing: Easing::Linear,
            frames: vec![frame(None, 0.0), frame(Some(0.8), 1.0), frame(None, 0.5)],
        };
        let tweens = Tween::from_animation(&TweenTarget::node("a"), &config);
        assert_eq!(tweens.len(), 1);
        let curve = tweens[0].curve();
        assert!(approx_eq(curve.value_at(0.4, Easing::Linear).unwrap().as_number().unwrap(), 0.5));
        assert!(approx_eq(curve.value_at(0.9, Easing::Linear).unwrap().as_number().unwrap(), 0.75));
        assert_eq!(curve.value_at(1.0, Easing::Linear).unwrap(), Value::Number(0.5));
        assert_eq!(tweens[0].to(), Some(&Value::Number(0.5)));
    }

    #[test]
    fn test_same_target_compares_to_only() {
        let a = opacity_tween(100.0);
        let b = Tween::interpolate(
            TweenTarget::node("a"),
            Property::Opacity,
            Value::Number(0.7),
            Value::Number(1.0),
            Timing::new(0.0, 50.0),
        );
        assert!(a.same_target(&b));
        assert_ne!(a.id(), b.id());
    }
}
