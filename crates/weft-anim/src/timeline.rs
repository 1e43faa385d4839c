//! Timelines: clocks that drive joined tweens.
//!
//! A timeline only tracks membership and the current value; the tweens
//! themselves live in whatever registry owns them and are reached through
//! [`TimelineNodes`]. Several timelines can coexist, e.g. a wall clock and
//! one driven by a scroll offset.

use crate::error::AnimError;
use crate::events::{BusEvent, EventBus, Subscription};
use crate::tween::TweenId;

/// What drives a timeline's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineKind {
    /// Frame timestamps.
    Clock,
    /// Scroll offset.
    Scroll,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TimelineEvent {
    Updated(f64),
    Joined(TweenId),
    Left(TweenId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimelineEventName {
    Updated,
    Joined,
    Left,
}

impl BusEvent for TimelineEvent {
    type Name = TimelineEventName;

    fn name(&self) -> TimelineEventName {
        match self {
            TimelineEvent::Updated(_) => TimelineEventName::Updated,
            TimelineEvent::Joined(_) => TimelineEventName::Joined,
            TimelineEvent::Left(_) => TimelineEventName::Left,
        }
    }
}

/// Resolves joined tween ids during [`Timeline::update`].
pub trait TimelineNodes {
    fn update_node(&mut self, id: TweenId, value: f64) -> Result<(), AnimError>;
}

#[derive(Debug)]
pub struct Timeline {
    kind: TimelineKind,
    value: f64,
    nodes: Vec<TweenId>,
    bus: EventBus<TimelineEvent>,
}

impl Timeline {
    pub fn new(kind: TimelineKind) -> Self {
        Self {
            kind,
            value: 0.0,
            nodes: Vec::new(),
            bus: EventBus::new(),
        }
    }

    pub fn clock() -> Self {
        Self::new(TimelineKind::Clock)
    }

    pub fn scroll() -> Self {
        Self::new(TimelineKind::Scroll)
    }

    pub fn kind(&self) -> TimelineKind {
        self.kind
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Move the clock without driving any tween.
    pub fn set_value(&mut self, value: f64) {
        self.value = value;
    }

    /// Set the value, then update every joined node in join order.
    pub fn update(&mut self, value: f64, nodes: &mut dyn TimelineNodes) -> Result<(), AnimError> {
        self.value = value;
        // Snapshot: nodes may leave while being driven
        let joined = self.nodes.clone();
        for id in joined {
            nodes.update_node(id, value)?;
        }
        self.bus.emit(&TimelineEvent::Updated(value));
        Ok(())
    }

    pub fn add(&mut self, id: TweenId) {
        if !self.nodes.contains(&id) {
            self.nodes.push(id);
            self.bus.emit(&TimelineEvent::Joined(id));
        }
    }

    /// Idempotent; returns whether the node was a member.
    pub fn remove(&mut self, id: TweenId) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|n| *n != id);
        let removed = self.nodes.len() != before;
        if removed {
            self.bus.emit(&TimelineEvent::Left(id));
        }
        removed
    }

    /// Joined nodes in join order.
    pub fn nodes(&self) -> &[TweenId] {
        &self.nodes
    }

    pub fn contains(&self, id: TweenId) -> bool {
        self.nodes.contains(&id)
    }

    /// True while at least one node is joined; keeps the frame loop alive.
    pub fn need_update(&self) -> bool {
        !self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn subscribe(
        &mut self,
        name: TimelineEventName,
        callback: impl FnMut(&TimelineEvent) + 'static,
    ) -> Subscription {
        self.bus.subscribe(name, callback)
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.bus.unsubscribe(subscription)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Seen(Vec<(TweenId, f64)>);

    impl TimelineNodes for Seen {
        fn update_node(&mut self, id: TweenId, value: f64) -> Result<(), AnimError> {
            self.0.push((id, value));
            Ok(())
        }
    }

    #[test]
    fn test_update_drives_joined_nodes() {
        let mut timeline = Timeline::clock();
        let (a, b) = (TweenId::new(), TweenId::new());
        timeline.add(a);
        timeline.add(b);
        timeline.add(a);

        let mut seen = Seen::default();
        timeline.update(16.0, &mut seen).unwrap();

        assert_eq!(timeline.value(), 16.0);
        assert_eq!(seen.0, vec![(a, 16.0), (b, 16.0)]);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut timeline = Timeline::scroll();
        let id = TweenId::new();
        timeline.add(id);
        assert!(timeline.need_update());
        assert!(timeline.remove(id));
        assert!(!timeline.remove(id));
        assert!(!timeline.need_update());
        assert_eq!(timeline.kind(), TimelineKind::Scroll);
    }

    #[test]
    fn test_events() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut timeline = Timeline::clock();
        let sink = log.clone();
        timeline.subscribe(TimelineEventName::Updated, move |e| sink.borrow_mut().push(e.clone()));

        timeline.update(5.0, &mut Seen::default()).unwrap();
        timeline.set_value(9.0);
        assert_eq!(*log.borrow(), vec![TimelineEvent::Updated(5.0)]);
    }
}
