//! Tween manager: the keyed registry of live tweens.
//!
//! The manager owns every live [`Tween`], indexed by [`TweenKey`] so that at
//! most one tween animates a given (element, property) pair. It handles:
//! - joining tweens onto a [`Timeline`] and driving them each tick
//! - auto-removal once a tween emits `End`, joining its queued children
//! - the per-frame patch that reconciles freshly computed tweens with the
//!   live ones (see [`diff_tweens`] and [`TweenManager::apply_patch`])
//!
//! Tweens are either *transient* (enter/leave, self-terminating, never
//! compared across frames) or *persistent* (update-triggered, diffed frame
//! to frame so an in-flight animation is not restarted needlessly).
//!
//! # Usage
//!
//! ```ignore
//! use weft_anim::{TweenManager, Timeline, diff_tweens};
//!
//! let mut tweens = TweenManager::new();
//! let mut timeline = Timeline::clock();
//!
//! // Every frame
//! let ended = tweens.tick(&mut timeline, now, &mut graph)?;
//! let patch = diff_tweens(tweens.persistent(), updates).with_transients(enter_and_leave);
//! let events = tweens.apply_patch(patch, &mut timeline, &mut graph)?;
//! tweens.apply_current(&mut graph)?;
//! ```

use std::collections::{HashMap, HashSet};

use crate::error::AnimError;
use crate::events::{EventBus, Subscription, TweenEvent, TweenEventName};
use crate::timeline::{Timeline, TimelineNodes};
use crate::tween::{Mutator, Tween, TweenId, TweenKey, TweenTarget};

#[derive(Debug)]
struct Entry {
    tween: Tween,
    transient: bool,
}

/// Registry of live tweens keyed by identity.
#[derive(Debug, Default)]
pub struct TweenManager {
    entries: HashMap<TweenKey, Entry>,
    /// Reverse index used when the timeline hands back tween ids.
    index: HashMap<TweenId, TweenKey>,
    /// End every tween as soon as it joins.
    reduced_motion: bool,
    bus: EventBus<TweenEvent>,
}

/// Reconciliation of live tweens with freshly computed ones.
#[derive(Debug, Default)]
pub struct TweensPatch {
    /// Enter/leave tweens, joined fresh.
    pub transients: Vec<Tween>,
    /// Persistent tweens with no live counterpart.
    pub adds: Vec<Tween>,
    /// Persistent tweens whose key is already live.
    pub updates: Vec<Tween>,
    /// Live persistent tweens that were not recomputed.
    pub removes: Vec<TweenKey>,
}

impl TweensPatch {
    pub fn with_transients(mut self, transients: Vec<Tween>) -> Self {
        self.transients.extend(transients);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.transients.is_empty()
            && self.adds.is_empty()
            && self.updates.is_empty()
            && self.removes.is_empty()
    }
}

/// Split `next` against the keys of the `previous` persistent tweens.
pub fn diff_tweens<'a>(previous: impl IntoIterator<Item = &'a Tween>, next: Vec<Tween>) -> TweensPatch {
    let previous: Vec<TweenKey> = previous.into_iter().map(|t| t.key().clone()).collect();
    let known: HashSet<&TweenKey> = previous.iter().collect();
    let mut seen = HashSet::new();
    let mut patch = TweensPatch::default();

    for tween in next {
        seen.insert(tween.key().clone());
        if known.contains(tween.key()) {
            patch.updates.push(tween);
        } else {
            patch.adds.push(tween);
        }
    }
    patch.removes = previous
        .iter()
        .filter(|key| !seen.contains(*key))
        .cloned()
        .collect();
    patch
}

/// Hands timeline ticks to the registered tweens.
struct Driver<'a> {
    entries: &'a mut HashMap<TweenKey, Entry>,
    index: &'a HashMap<TweenId, TweenKey>,
    mutator: &'a mut dyn Mutator,
    events: &'a mut Vec<TweenEvent>,
}

impl TimelineNodes for Driver<'_> {
    fn update_node(&mut self, id: TweenId, value: f64) -> Result<(), AnimError> {
        let Some(key) = self.index.get(&id) else {
            return Ok(());
        };
        match self.entries.get_mut(key) {
            Some(entry) => entry.tween.update(value, self.mutator, self.events),
            None => Ok(()),
        }
    }
}

impl TweenManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_reduced_motion(&mut self, reduced_motion: bool) {
        self.reduced_motion = reduced_motion;
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Register without joining. No-op returning false if the key is taken.
    pub fn add(&mut self, tween: Tween, transient: bool) -> bool {
        if self.entries.contains_key(tween.key()) {
            return false;
        }
        self.index.insert(tween.id(), tween.key().clone());
        self.entries
            .insert(tween.key().clone(), Entry { tween, transient });
        true
    }

    pub fn get(&self, key: &TweenKey) -> Option<&Tween> {
        self.entries.get(key).map(|e| &e.tween)
    }

    pub fn contains(&self, key: &TweenKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn is_transient(&self, key: &TweenKey) -> Option<bool> {
        self.entries.get(key).map(|e| e.transient)
    }

    /// Unregister without ending. The caller owns the tween afterwards.
    pub fn remove(&mut self, key: &TweenKey) -> Option<Tween> {
        let entry = self.entries.remove(key)?;
        self.index.remove(&entry.tween.id());
        Some(entry.tween)
    }

    /// Unregister and leave the timeline without ending: no final value is
    /// written, no events fire and queued children are discarded.
    pub fn cancel(&mut self, key: &TweenKey, timeline: &mut Timeline) -> Option<Tween> {
        let tween = self.remove(key)?;
        timeline.remove(tween.id());
        tracing::debug!(%key, "tween cancelled");
        Some(tween)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tween> {
        self.entries.values().map(|e| &e.tween)
    }

    /// The update-triggered tweens, compared across frames.
    pub fn persistent(&self) -> impl Iterator<Item = &Tween> {
        self.entries
            .values()
            .filter(|e| !e.transient)
            .map(|e| &e.tween)
    }

    /// Register and join. Returns no events if the key was taken.
    pub fn join(
        &mut self,
        tween: Tween,
        transient: bool,
        timeline: &mut Timeline,
        mutator: &mut dyn Mutator,
    ) -> Result<Vec<TweenEvent>, AnimError> {
        let mut events = Vec::new();
        self.attach(tween, transient, timeline, mutator, &mut events)?;
        self.settle(timeline, mutator, &mut events)?;
        self.publish(&events);
        Ok(events)
    }

    /// Drive `timeline` to `time`, then retire every tween that ended.
    pub fn tick(
        &mut self,
        timeline: &mut Timeline,
        time: f64,
        mutator: &mut dyn Mutator,
    ) -> Result<Vec<TweenEvent>, AnimError> {
        let mut events = Vec::new();
        {
            let mut driver = Driver {
                entries: &mut self.entries,
                index: &self.index,
                mutator: &mut *mutator,
                events: &mut events,
            };
            timeline.update(time, &mut driver)?;
        }
        self.settle(timeline, mutator, &mut events)?;
        self.publish(&events);
        Ok(events)
    }

    /// Reconcile the registry with a frame's computed tweens.
    ///
    /// Order: transients, adds, removes, updates. A persistent update whose
    /// target is unchanged leaves the live tween untouched; a changed target
    /// snaps the live tween and joins the new one. The same applies to an add
    /// whose key is held by a transient.
    pub fn apply_patch(
        &mut self,
        patch: TweensPatch,
        timeline: &mut Timeline,
        mutator: &mut dyn Mutator,
    ) -> Result<Vec<TweenEvent>, AnimError> {
        let TweensPatch {
            transients,
            adds,
            updates,
            removes,
        } = patch;
        tracing::debug!(
            transients = transients.len(),
            adds = adds.len(),
            updates = updates.len(),
            removes = removes.len(),
            "apply tween patch"
        );
        let mut events = Vec::new();

        for tween in transients {
            if self.supersedes(&tween) {
                self.supersede(tween.key(), mutator, &mut events)?;
            }
            self.attach(tween, true, timeline, mutator, &mut events)?;
        }

        for tween in adds {
            if self.supersedes(&tween) {
                tracing::debug!(key = %tween.key(), "update replaces transient");
                self.supersede(tween.key(), mutator, &mut events)?;
            }
            self.attach(tween, false, timeline, mutator, &mut events)?;
        }

        for key in removes {
            if self.is_transient(&key) == Some(false) {
                self.end_entry(&key, true, mutator, &mut events)?;
            }
        }

        for tween in updates {
            let unchanged = self
                .entries
                .get(tween.key())
                .map(|live| live.tween.same_target(&tween));
            match unchanged {
                Some(true) => continue,
                Some(false) => {
                    tracing::debug!(key = %tween.key(), "retarget tween");
                    self.supersede(tween.key(), mutator, &mut events)?;
                    self.attach(tween, false, timeline, mutator, &mut events)?;
                }
                None => {
                    self.attach(tween, false, timeline, mutator, &mut events)?;
                }
            }
        }

        self.settle(timeline, mutator, &mut events)?;
        self.publish(&events);
        Ok(events)
    }

    /// End the tween at `key`; forced ends snap to the final value.
    pub fn end(
        &mut self,
        key: &TweenKey,
        force: bool,
        timeline: &mut Timeline,
        mutator: &mut dyn Mutator,
    ) -> Result<Vec<TweenEvent>, AnimError> {
        let mut events = Vec::new();
        self.end_entry(key, force, mutator, &mut events)?;
        self.settle(timeline, mutator, &mut events)?;
        self.publish(&events);
        Ok(events)
    }

    pub fn pause(&mut self, key: &TweenKey) -> Vec<TweenEvent> {
        let mut events = Vec::new();
        if let Some(entry) = self.entries.get_mut(key) {
            entry.tween.pause(&mut events);
        }
        self.publish(&events);
        events
    }

    pub fn resume(&mut self, key: &TweenKey) -> Vec<TweenEvent> {
        let mut events = Vec::new();
        if let Some(entry) = self.entries.get_mut(key) {
            entry.tween.resume(&mut events);
        }
        self.publish(&events);
        events
    }

    pub fn pause_all(&mut self) -> Vec<TweenEvent> {
        let mut events = Vec::new();
        for entry in self.entries.values_mut() {
            entry.tween.pause(&mut events);
        }
        self.publish(&events);
        events
    }

    pub fn resume_all(&mut self) -> Vec<TweenEvent> {
        let mut events = Vec::new();
        for entry in self.entries.values_mut() {
            entry.tween.resume(&mut events);
        }
        self.publish(&events);
        events
    }

    /// Write every live tween's current value onto `mutator`.
    pub fn apply_current(&mut self, mutator: &mut dyn Mutator) -> Result<(), AnimError> {
        for entry in self.entries.values_mut() {
            entry.tween.reapply(mutator)?;
        }
        Ok(())
    }

    /// Refresh every tween's cached element slot, e.g. after a new root.
    pub fn rebind(&mut self, mut locate: impl FnMut(&TweenTarget) -> Option<usize>) {
        for entry in self.entries.values_mut() {
            let slot = locate(entry.tween.target());
            entry.tween.set_slot(slot);
        }
    }

    /// Drop every tween without ending it.
    pub fn clear(&mut self, timeline: &mut Timeline) {
        for id in self.index.keys() {
            timeline.remove(*id);
        }
        self.entries.clear();
        self.index.clear();
    }

    pub fn subscribe(
        &mut self,
        name: TweenEventName,
        callback: impl FnMut(&TweenEvent) + 'static,
    ) -> Subscription {
        self.bus.subscribe(name, callback)
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.bus.unsubscribe(subscription)
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn supersedes(&self, tween: &Tween) -> bool {
        self.entries
            .get(tween.key())
            .is_some_and(|live| !live.tween.same_target(tween))
    }

    /// Take the live tween out and snap it. Its queued children are dropped.
    fn supersede(
        &mut self,
        key: &TweenKey,
        mutator: &mut dyn Mutator,
        events: &mut Vec<TweenEvent>,
    ) -> Result<(), AnimError> {
        if let Some(mut old) = self.remove(key) {
            old.take_children();
            old.end(true, mutator, events)?;
        }
        Ok(())
    }

    fn attach(
        &mut self,
        tween: Tween,
        transient: bool,
        timeline: &mut Timeline,
        mutator: &mut dyn Mutator,
        events: &mut Vec<TweenEvent>,
    ) -> Result<bool, AnimError> {
        let key = tween.key().clone();
        if !self.add(tween, transient) {
            return Ok(false);
        }
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.tween.join(timeline, mutator, events)?;
            if self.reduced_motion {
                entry.tween.end(true, mutator, events)?;
            }
        }
        Ok(true)
    }

    fn end_entry(
        &mut self,
        key: &TweenKey,
        force: bool,
        mutator: &mut dyn Mutator,
        events: &mut Vec<TweenEvent>,
    ) -> Result<(), AnimError> {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.tween.end(force, mutator, events)?;
        }
        Ok(())
    }

    /// Retire ended tweens and join their children.
    ///
    /// Walks `events` from the start; children joined here append to it and
    /// are visited in turn.
    fn settle(
        &mut self,
        timeline: &mut Timeline,
        mutator: &mut dyn Mutator,
        events: &mut Vec<TweenEvent>,
    ) -> Result<(), AnimError> {
        let mut cursor = 0;
        while cursor < events.len() {
            if events[cursor].is_end() {
                let id = events[cursor].tween;
                timeline.remove(id);
                if let Some(key) = self.index.remove(&id) {
                    if let Some(mut entry) = self.entries.remove(&key) {
                        for child in entry.tween.take_children() {
                            self.attach(child, entry.transient, timeline, mutator, events)?;
                        }
                    }
                }
            }
            cursor += 1;
        }
        Ok(())
    }

    fn publish(&mut self, events: &[TweenEvent]) {
        for event in events {
            self.bus.emit(event);
        }
    }
}
