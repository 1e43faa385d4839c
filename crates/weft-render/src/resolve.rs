//! Transition resolver: from a graph diff and declarative configs to tweens.
//!
//! - enter (adds): configs with a `from`; a missing `to` is the element's
//!   settled value, so the animation lands exactly where layout put it
//! - leave (removes with a slot): configs with a `to`; a missing `from` is
//!   the value the element was last presented with
//! - update (matched pairs): old presented values against new settled ones,
//!   restricted to `properties` when given, one tween per changed property
//!
//! Enter, leave and every keyframe animation are transient; transition
//! updates are persistent.

use bitflags::bitflags;
use weft_anim::{
    AnimationConfig, NodeAnimation, NodeTransition, Property, TransitionConfig, Trigger, Timing,
    Tween, TweenRole,
};

use crate::diff::{GraphMutation, ListMutation, Slot};
use crate::render_graph::{ElementList, RenderElement, RenderGraph};

bitflags! {
    /// Which diff buckets to resolve.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AnimationStep: u8 {
        const ENTER = 1;
        const UPDATE = 2;
        const LEAVE = 4;
    }
}

/// Tweens computed for one frame.
#[derive(Debug, Default)]
pub struct ResolvedTweens {
    pub transients: Vec<Tween>,
    pub persistent: Vec<Tween>,
}

impl ResolvedTweens {
    pub fn len(&self) -> usize {
        self.transients.len() + self.persistent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transients.is_empty() && self.persistent.is_empty()
    }

    fn extend(&mut self, other: ResolvedTweens) {
        self.transients.extend(other.transients);
        self.persistent.extend(other.persistent);
    }
}

fn timing(config: &TransitionConfig) -> Timing {
    Timing::new(config.delay, config.duration).with_easing(config.easing)
}

fn configs(transitions: &[NodeTransition], trigger: Trigger) -> impl Iterator<Item = &TransitionConfig> {
    transitions
        .iter()
        .filter(move |t| t.trigger == trigger)
        .flat_map(|t| &t.configs)
}

fn animation_configs(animations: &[NodeAnimation], trigger: Trigger) -> impl Iterator<Item = &AnimationConfig> {
    animations
        .iter()
        .filter(move |a| a.trigger == trigger)
        .flat_map(|a| &a.configs)
}

fn keyframes<E: RenderElement>(element: &E, trigger: Trigger, role: TweenRole, out: &mut Vec<Tween>) {
    let target = element.target();
    for config in animation_configs(element.animations(), trigger) {
        out.extend(
            Tween::from_animation(&target, config)
                .into_iter()
                .map(|t| t.with_role(role)),
        );
    }
}

fn resolve_enter<E: RenderElement>(element: &E, out: &mut Vec<Tween>) {
    let target = element.target();
    for config in configs(element.transitions(), Trigger::Enter) {
        let Some(from) = &config.from else {
            continue;
        };
        for (property, start) in from {
            let end = config
                .to
                .as_ref()
                .and_then(|to| to.get(property).cloned())
                .unwrap_or_else(|| element.base().get(*property));
            out.push(
                Tween::interpolate(target.clone(), *property, start.clone(), end, timing(config))
                    .with_role(TweenRole::Enter),
            );
        }
    }
    keyframes(element, Trigger::Enter, TweenRole::Enter, out);
}

fn resolve_leave<E: RenderElement>(element: &E, out: &mut Vec<Tween>) {
    let target = element.target();
    for config in configs(element.transitions(), Trigger::Leave) {
        let Some(to) = &config.to else {
            continue;
        };
        for (property, end) in to {
            let start = config
                .from
                .as_ref()
                .and_then(|from| from.get(property).cloned())
                .unwrap_or_else(|| element.props().get(*property));
            out.push(
                Tween::interpolate(target.clone(), *property, start, end.clone(), timing(config))
                    .with_role(TweenRole::Leave),
            );
        }
    }
    keyframes(element, Trigger::Leave, TweenRole::Leave, out);
}

fn resolve_update<E: RenderElement>(older: &E, newer: &E, out: &mut ResolvedTweens) {
    let target = newer.target();
    for config in configs(older.transitions(), Trigger::Update) {
        let properties: &[Property] = config.properties.as_deref().unwrap_or(&Property::ALL);
        for property in properties {
            let start = older.props().get(*property);
            let end = newer.base().get(*property);
            if start != end {
                out.persistent.push(
                    Tween::interpolate(target.clone(), *property, start, end, timing(config))
                        .with_role(TweenRole::Update),
                );
            }
        }
    }
    // Keyframes replay only when the settled values actually changed
    if older.base() != newer.base() {
        keyframes(newer, Trigger::Update, TweenRole::Update, &mut out.transients);
    }
}

/// Resolve one list. `current` is the new list after layout.
pub fn resolve_list<E: RenderElement>(
    mutation: &ListMutation<E>,
    current: &ElementList<E>,
    steps: AnimationStep,
) -> ResolvedTweens {
    let mut resolved = ResolvedTweens::default();

    if steps.contains(AnimationStep::ENTER) {
        for id in &mutation.adds {
            if let Some(element) = current.get(id) {
                resolve_enter(element, &mut resolved.transients);
            }
        }
    }

    if steps.contains(AnimationStep::LEAVE) {
        for removal in &mutation.removes {
            if removal.slot != Slot::Drop {
                resolve_leave(removal.element.as_ref(), &mut resolved.transients);
            }
        }
    }

    if steps.contains(AnimationStep::UPDATE) {
        for (older, newer) in mutation.pairs(current) {
            resolve_update(older, newer, &mut resolved);
        }
    }

    resolved
}

pub fn resolve_graph(mutation: &GraphMutation, root: &RenderGraph, steps: AnimationStep) -> ResolvedTweens {
    let mut resolved = resolve_list(&mutation.nodes, &root.nodes, steps);
    resolved.extend(resolve_list(&mutation.links, &root.links, steps));
    tracing::debug!(
        transients = resolved.transients.len(),
        persistent = resolved.persistent.len(),
        "resolved tweens"
    );
    resolved
}
