//! Publish/subscribe events.
//!
//! [`EventBus`] is a small typed emitter shared by the tween manager, the
//! timelines and the renderer. Each component defines an event enum and a
//! matching `Copy` name enum; listeners subscribe to a name and receive
//! every event carrying it.
//!
//! # Usage
//!
//! ```ignore
//! use weft_anim::{TweenManager, TweenEventName};
//!
//! let mut tweens = TweenManager::new();
//! let sub = tweens.subscribe(TweenEventName::End, |event| {
//!     println!("{} finished", event.key);
//! });
//! // ...
//! tweens.unsubscribe(sub);
//! ```

use std::fmt;
use std::hash::Hash;

use crate::tween::{TweenId, TweenKey, TweenRole};
use crate::value::Value;

/// An event that can travel on an [`EventBus`].
pub trait BusEvent {
    type Name: Copy + Eq + Hash + fmt::Debug;

    fn name(&self) -> Self::Name;
}

/// Token returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

struct Listener<E: BusEvent> {
    id: Subscription,
    name: E::Name,
    callback: Box<dyn FnMut(&E)>,
}

/// Typed event emitter. Listeners run in subscription order.
pub struct EventBus<E: BusEvent> {
    next_id: u64,
    listeners: Vec<Listener<E>>,
}

impl<E: BusEvent> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: BusEvent> fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<E: BusEvent> EventBus<E> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, name: E::Name, callback: impl FnMut(&E) + 'static) -> Subscription {
        let id = Subscription(self.next_id);
        self.next_id += 1;
        self.listeners.push(Listener {
            id,
            name,
            callback: Box::new(callback),
        });
        id
    }

    /// Returns false if the subscription was already gone.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != subscription);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: &E) {
        let name = event.name();
        for listener in self.listeners.iter_mut().filter(|l| l.name == name) {
            (listener.callback)(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}

/// What happened to a tween.
#[derive(Debug, Clone, PartialEq)]
pub enum TweenEventKind {
    /// Joined a timeline; the initial value was applied.
    Join,
    /// First update after joining.
    Start,
    /// New progress value.
    Progress(f64),
    /// New value applied to the element.
    Change(Value),
    Pause,
    Resume,
    /// Terminal. Fired one tick after progress reached 1, or at once when forced.
    End,
}

/// Name of a [`TweenEventKind`], for subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TweenEventName {
    Join,
    Start,
    Progress,
    Change,
    Pause,
    Resume,
    End,
}

/// Lifecycle event of a single tween.
#[derive(Debug, Clone, PartialEq)]
pub struct TweenEvent {
    pub tween: TweenId,
    pub key: TweenKey,
    pub role: TweenRole,
    pub kind: TweenEventKind,
}

impl TweenEvent {
    pub fn is_end(&self) -> bool {
        self.kind == TweenEventKind::End
    }
}

impl BusEvent for TweenEvent {
    type Name = TweenEventName;

    fn name(&self) -> TweenEventName {
        match self.kind {
            TweenEventKind::Join => TweenEventName::Join,
            TweenEventKind::Start => TweenEventName::Start,
            TweenEventKind::Progress(_) => TweenEventName::Progress,
            TweenEventKind::Change(_) => TweenEventName::Change,
            TweenEventKind::Pause => TweenEventName::Pause,
            TweenEventKind::Resume => TweenEventName::Resume,
            TweenEventKind::End => TweenEventName::End,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug)]
    enum Ping {
        A(u32),
        B,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum PingName {
        A,
        B,
    }

    impl BusEvent for Ping {
        type Name = PingName;

        fn name(&self) -> PingName {
            match self {
                Ping::A(_) => PingName::A,
                Ping::B => PingName::B,
            }
        }
    }

    #[test]
    fn test_subscribe_and_emit_by_name() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::<Ping>::new();
        let sink = seen.clone();
        bus.subscribe(PingName::A, move |e| {
            if let Ping::A(n) = e {
                sink.borrow_mut().push(*n);
            }
        });

        bus.emit(&Ping::A(1));
        bus.emit(&Ping::B);
        bus.emit(&Ping::A(2));
        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_unsubscribe() {
        let count = Rc::new(RefCell::new(0));
        let mut bus = EventBus::<Ping>::new();
        let sink = count.clone();
        let sub = bus.subscribe(PingName::B, move |_| *sink.borrow_mut() += 1);

        bus.emit(&Ping::B);
        assert!(bus.unsubscribe(sub));
        assert!(!bus.unsubscribe(sub));
        bus.emit(&Ping::B);
        assert_eq!(*count.borrow(), 1);
        assert_eq!(bus.listener_count(), 0);
    }
}
