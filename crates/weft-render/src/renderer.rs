//! The render pipeline.
//!
//! [`Renderer`] owns the committed render graph, the tween registry and the
//! clock timeline. Callers schedule frames with a [`RenderHint`] (and, for
//! structural changes, the next logical graph); hints accumulate until the
//! next tick, which runs one frame:
//!
//! 1. tick the timeline against the committed graph
//! 2. adopt the new root, or snapshot the committed one
//! 3. diff the committed graph against it
//! 4. layout hooks, then settle
//! 5. re-splice leaving elements, rebind tweens, resolve and patch tweens
//! 6. write the current tween values onto the new root and commit it
//! 7. clip hooks over a shallow clone of the committed root
//! 8. paint hooks produce the frame output
//!
//! While any tween is joined the renderer schedules the next frame itself.
//!
//! # Example
//!
//! ```ignore
//! let mut renderer = Renderer::<Vec<String>>::with_config(&WeftConfig::load());
//! renderer.on_paint(|graph, ctx, _next| {
//!     let mut lines = Vec::new();
//!     for node in graph.nodes_in_paint_order() {
//!         lines.extend(ctx.render_node(&node)?);
//!     }
//!     Ok(lines)
//! });
//! renderer.commit(graph.clone());
//! let output = renderer.frame(0.0)?;
//! ```

use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use weft_anim::{
    BusEvent, EventBus, Subscription, Timeline, TweenEvent, TweenEventKind, TweenId, TweenKey,
    TweenManager, TweenRole, TweenTarget, diff_tweens,
};
use weft_config::WeftConfig;
use weft_graph::GraphStruct;

use crate::diff::{diff_graph, prepare_removals};
use crate::error::{RenderError, Result};
use crate::hint::{RenderAction, RenderHint};
use crate::hooks::{FrameInfo, HookHandle, Hooks, Next, PaintContext, Phase};
use crate::plugin::{ClipPlugin, LinearLayoutPlugin, RendererPlugin};
use crate::rect::Rect;
use crate::render_graph::{RenderGraph, RenderLink, RenderNode};
use crate::resolve::{AnimationStep, resolve_graph};

/// Renderer lifecycle notifications.
#[derive(Debug, Clone, PartialEq)]
pub enum RendererEvent<T> {
    BeforeRender(FrameInfo),
    Rendered(FrameInfo, T),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RendererEventName {
    BeforeRender,
    Rendered,
}

impl<T> BusEvent for RendererEvent<T> {
    type Name = RendererEventName;

    fn name(&self) -> RendererEventName {
        match self {
            RendererEvent::BeforeRender(_) => RendererEventName::BeforeRender,
            RendererEvent::Rendered(..) => RendererEventName::Rendered,
        }
    }
}

impl<T> RendererEvent<T> {
    pub fn into_output(self) -> Option<T> {
        match self {
            RendererEvent::Rendered(_, output) => Some(output),
            RendererEvent::BeforeRender(_) => None,
        }
    }
}

struct State {
    root: RenderGraph,
    next_root: Option<GraphStruct>,
    tweens: TweenManager,
    timeline: Timeline,
    /// Leave tweens that fired `Start`.
    leaving: HashSet<TweenId>,
    viewport: Rect,
    hint: RenderHint,
    scheduled: bool,
    frame: u64,
    time_scale: f64,
}

impl Default for State {
    fn default() -> Self {
        Self {
            root: RenderGraph::new(),
            next_root: None,
            tweens: TweenManager::new(),
            timeline: Timeline::clock(),
            leaving: HashSet::new(),
            viewport: Rect::UNBOUNDED,
            hint: RenderHint::RENDER,
            scheduled: false,
            frame: 0,
            time_scale: 1.0,
        }
    }
}

/// Leave accounting for one batch of tween events. Releases happen after
/// the whole batch so a leave tween replaced within it keeps its element.
fn account_leaves(
    root: &mut RenderGraph,
    tweens: &TweenManager,
    leaving: &mut HashSet<TweenId>,
    events: &[TweenEvent],
) {
    let mut ended = Vec::new();
    for event in events.iter().filter(|e| e.role == TweenRole::Leave) {
        match event.kind {
            TweenEventKind::Start => {
                leaving.insert(event.tween);
                root.begin_leave(&event.key.target);
            }
            TweenEventKind::End => {
                if leaving.remove(&event.tween) {
                    root.end_leave(&event.key.target);
                }
                ended.push(&event.key.target);
            }
            _ => {}
        }
    }
    for target in ended {
        let pending = tweens
            .iter()
            .any(|t| t.role() == TweenRole::Leave && t.target() == target);
        if !pending && root.release(target) {
            tracing::debug!(id = %target.id, "leave finished");
        }
    }
}

impl State {
    /// `target` was re-added while leaving: its leave tweens stop where
    /// they are, without ending, so nothing releases it.
    fn revive(&mut self, target: &TweenTarget) {
        let keys: Vec<TweenKey> = self
            .tweens
            .iter()
            .filter(|t| t.role() == TweenRole::Leave && t.target() == target)
            .map(|t| t.key().clone())
            .collect();
        for key in keys {
            if let Some(tween) = self.tweens.cancel(&key, &mut self.timeline) {
                self.leaving.remove(&tween.id());
            }
        }
        tracing::debug!(id = %target.id, "leaving element re-added");
    }

    fn render_frame<T: Default>(&mut self, hooks: &Hooks<T>, info: FrameInfo) -> Result<T> {
        let action = info.action;
        tracing::debug!(frame = info.frame, ?action, "render frame");

        let events = self.tweens.tick(
            &mut self.timeline,
            info.timestamp * self.time_scale,
            &mut self.root,
        )?;
        account_leaves(&mut self.root, &self.tweens, &mut self.leaving, &events);

        let mut root = if action.need_new_root {
            let graph = self.next_root.take().ok_or(RenderError::MissingRoot)?;
            let mut root = RenderGraph::from_graph(&graph);
            root.inherit_departing(&self.root);
            for target in root.revived(&self.root) {
                self.revive(&target);
            }
            root
        } else {
            self.root.snapshot()
        };

        let mutation = diff_graph(&self.root, &root);
        tracing::debug!(
            adds = mutation.nodes.adds.len() + mutation.links.adds.len(),
            removes = mutation.nodes.removes.len() + mutation.links.removes.len(),
            "diff"
        );

        if action.need_layout {
            root = hooks
                .layout
                .run(root, &info, &mut |graph: RenderGraph, _: &FrameInfo| Ok(graph))
                .map_err(|e| RenderError::hook(Phase::Layout, e))?;
        }
        root.settle();

        if action.need_animation {
            prepare_removals(&mut root.nodes, &mutation.nodes);
            prepare_removals(&mut root.links, &mutation.links);
            self.tweens.rebind(|target| root.locate(target));

            let resolved = resolve_graph(&mutation, &root, AnimationStep::all());
            let patch = diff_tweens(self.tweens.persistent(), resolved.persistent)
                .with_transients(resolved.transients);
            let events = self.tweens.apply_patch(patch, &mut self.timeline, &mut root)?;
            account_leaves(&mut root, &self.tweens, &mut self.leaving, &events);
        }

        self.tweens.apply_current(&mut root)?;
        self.root = root;

        let clipped = if action.need_clip {
            hooks
                .clip
                .run(self.root.shallow_clone(), &info, &mut |graph: RenderGraph, _: &FrameInfo| Ok(graph))
                .map_err(|e| RenderError::hook(Phase::Clip, e))?
        } else {
            self.root.shallow_clone()
        };

        let ctx = hooks.paint_context(info);
        hooks
            .paint
            .run(clipped, &ctx, &mut |_: RenderGraph, _: &PaintContext<T>| Ok(T::default()))
            .map_err(|e| RenderError::hook(Phase::Paint, e))
    }
}

/// Frame-driven renderer producing one `T` per frame.
pub struct Renderer<T> {
    hooks: Hooks<T>,
    state: State,
    bus: EventBus<RendererEvent<T>>,
}

impl<T> fmt::Debug for Renderer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer")
            .field("hooks", &self.hooks)
            .field("frame", &self.state.frame)
            .field("tweens", &self.state.tweens.len())
            .field("scheduled", &self.state.scheduled)
            .finish()
    }
}

impl<T: Default + 'static> Default for Renderer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Default + 'static> Renderer<T> {
    pub fn new() -> Self {
        Self {
            hooks: Hooks::new(),
            state: State::default(),
            bus: EventBus::new(),
        }
    }

    /// Renderer with the configured animation settings and default plugins.
    pub fn with_config(config: &WeftConfig) -> Self {
        let mut renderer = Self::new();
        renderer.set_time_scale(config.animation.time_scale);
        renderer.set_reduced_motion(config.animation.reduced_motion);
        renderer.install_defaults(config);
        renderer
    }

    /// Linear layout, plus viewport clipping when enabled.
    pub fn install_defaults(&mut self, config: &WeftConfig) -> Vec<HookHandle> {
        let mut handles = self.install(&LinearLayoutPlugin::from(&config.layout));
        if config.clip.enabled {
            handles.extend(self.install(&ClipPlugin::from(&config.clip)));
        }
        handles
    }

    pub fn install(&mut self, plugin: &dyn RendererPlugin<T>) -> Vec<HookHandle> {
        tracing::debug!(plugin = plugin.name(), "install plugin");
        plugin.install(&mut self.hooks)
    }

    pub fn hooks_mut(&mut self) -> &mut Hooks<T> {
        &mut self.hooks
    }

    pub fn on_stage(
        &mut self,
        hook: impl Fn((), &FrameInfo, Next<'_, (), T, FrameInfo>) -> anyhow::Result<T> + 'static,
    ) -> HookHandle {
        self.hooks.on_stage(hook)
    }

    pub fn on_layout(
        &mut self,
        hook: impl Fn(RenderGraph, &FrameInfo, Next<'_, RenderGraph, RenderGraph, FrameInfo>) -> anyhow::Result<RenderGraph>
        + 'static,
    ) -> HookHandle {
        self.hooks.on_layout(hook)
    }

    pub fn on_clip(
        &mut self,
        hook: impl Fn(RenderGraph, &FrameInfo, Next<'_, RenderGraph, RenderGraph, FrameInfo>) -> anyhow::Result<RenderGraph>
        + 'static,
    ) -> HookHandle {
        self.hooks.on_clip(hook)
    }

    pub fn on_paint(
        &mut self,
        hook: impl Fn(RenderGraph, &PaintContext<T>, Next<'_, RenderGraph, T, PaintContext<T>>) -> anyhow::Result<T>
        + 'static,
    ) -> HookHandle {
        self.hooks.on_paint(hook)
    }

    pub fn on_node(
        &mut self,
        hook: impl Fn(Rc<RenderNode>, &FrameInfo, Next<'_, Rc<RenderNode>, T, FrameInfo>) -> anyhow::Result<T>
        + 'static,
    ) -> HookHandle {
        self.hooks.on_node(hook)
    }

    pub fn on_link(
        &mut self,
        hook: impl Fn(Rc<RenderLink>, &FrameInfo, Next<'_, Rc<RenderLink>, T, FrameInfo>) -> anyhow::Result<T>
        + 'static,
    ) -> HookHandle {
        self.hooks.on_link(hook)
    }

    pub fn unhook(&mut self, handle: HookHandle) -> bool {
        self.hooks.unhook(handle)
    }

    // ========================================================================
    // Scheduling
    // ========================================================================

    /// Request a frame. Hints accumulate until it runs; a supplied root
    /// replaces any earlier one not yet adopted.
    pub fn schedule_render(&mut self, hint: RenderHint, next_root: Option<GraphStruct>) {
        self.state.hint |= hint;
        if let Some(root) = next_root {
            self.state.next_root = Some(root);
        }
        if !self.state.scheduled {
            tracing::trace!(?hint, "frame scheduled");
        }
        self.state.scheduled = true;
    }

    /// Schedule adoption of `graph` as the next root.
    pub fn commit(&mut self, graph: GraphStruct) {
        self.schedule_render(RenderHint::FORCE_UPDATE, Some(graph));
    }

    pub fn is_scheduled(&self) -> bool {
        self.state.scheduled
    }

    pub fn update_viewport(&mut self, viewport: Rect) {
        self.state.viewport = viewport;
        self.schedule_render(RenderHint::VIEWPORT_UPDATE, None);
    }

    /// Tick callback: renders only if a frame was scheduled.
    pub fn frame(&mut self, timestamp: f64) -> Result<Option<T>> {
        if !self.state.scheduled {
            return Ok(None);
        }
        self.render(timestamp).map(Some)
    }

    /// Render a frame now with the accumulated hint.
    pub fn render(&mut self, timestamp: f64) -> Result<T> {
        self.state.scheduled = false;
        let hint = std::mem::take(&mut self.state.hint);
        let info = FrameInfo {
            timestamp,
            frame: self.state.frame,
            action: RenderAction::from_hint(hint),
            viewport: self.state.viewport,
        };
        self.bus.emit(&RendererEvent::BeforeRender(info));

        let had_animations = self.state.timeline.need_update();
        let hooks = &self.hooks;
        let state = &mut self.state;
        let output = hooks
            .stage
            .run((), &info, &mut |_: (), info: &FrameInfo| {
                state.render_frame(hooks, *info).map_err(anyhow::Error::from)
            })
            .map_err(|e| RenderError::hook(Phase::Stage, e))?;
        self.state.frame += 1;

        let event = RendererEvent::Rendered(info, output);
        self.bus.emit(&event);

        if had_animations || self.state.timeline.need_update() {
            self.schedule_render(RenderHint::ANIMATION_UPDATE, None);
        }
        Ok(event.into_output().unwrap_or_default())
    }

    // ========================================================================
    // Events
    // ========================================================================

    pub fn on_render(&mut self, mut callback: impl FnMut(&FrameInfo, &T) + 'static) -> Subscription {
        self.bus.subscribe(RendererEventName::Rendered, move |event| {
            if let RendererEvent::Rendered(info, output) = event {
                callback(info, output);
            }
        })
    }

    pub fn before_render(&mut self, mut callback: impl FnMut(&FrameInfo) + 'static) -> Subscription {
        self.bus.subscribe(RendererEventName::BeforeRender, move |event| {
            if let RendererEvent::BeforeRender(info) = event {
                callback(info);
            }
        })
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.bus.unsubscribe(subscription)
    }

    // ========================================================================
    // Animation control and accessors
    // ========================================================================

    pub fn pause_animations(&mut self) {
        self.state.tweens.pause_all();
    }

    pub fn resume_animations(&mut self) {
        self.state.tweens.resume_all();
    }

    pub fn set_time_scale(&mut self, time_scale: f64) {
        self.state.time_scale = time_scale;
    }

    pub fn set_reduced_motion(&mut self, reduced_motion: bool) {
        self.state.tweens.set_reduced_motion(reduced_motion);
    }

    /// The last committed, unclipped root.
    pub fn root(&self) -> &RenderGraph {
        &self.state.root
    }

    pub fn viewport(&self) -> Rect {
        self.state.viewport
    }

    pub fn tweens(&self) -> &TweenManager {
        &self.state.tweens
    }

    pub fn timeline(&self) -> &Timeline {
        &self.state.timeline
    }

    /// Frames rendered so far.
    pub fn frame_count(&self) -> u64 {
        self.state.frame
    }
}

static_assertions::assert_not_impl_any!(Renderer<()>: Send);

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use weft_graph::GraphNode;

    fn graph(ids: &[&str]) -> GraphStruct {
        let mut graph = GraphStruct::new();
        for id in ids {
            graph.add_node(GraphNode::with_id(*id).with_size(10.0, 10.0)).unwrap();
        }
        graph
    }

    #[test]
    fn test_frame_without_schedule_is_skipped() {
        let mut renderer: Renderer<()> = Renderer::new();
        assert!(renderer.frame(0.0).unwrap().is_none());
        assert_eq!(renderer.frame_count(), 0);
    }

    #[test]
    fn test_force_update_without_root_fails() {
        let mut renderer: Renderer<()> = Renderer::new();
        renderer.schedule_render(RenderHint::FORCE_UPDATE, None);
        let err = renderer.frame(0.0).unwrap_err();
        assert!(matches!(err, RenderError::MissingRoot));
    }

    #[test]
    fn test_hook_error_carries_phase() {
        let mut renderer: Renderer<()> = Renderer::new();
        renderer.on_layout(|_: RenderGraph, _: &FrameInfo, _: Next<'_, RenderGraph, RenderGraph, FrameInfo>| {
            anyhow::bail!("no room")
        });
        renderer.commit(graph(&["a"]));
        let err = renderer.frame(0.0).unwrap_err();
        assert!(matches!(err, RenderError::Hook { phase: Phase::Layout, .. }));
        assert_eq!(err.to_string(), "layout hook failed: no room");
    }

    #[test]
    fn test_commit_adopts_root_and_notifies() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut renderer: Renderer<u32> = Renderer::new();
        renderer.on_paint(|graph: RenderGraph, _: &PaintContext<u32>, _: Next<'_, RenderGraph, u32, PaintContext<u32>>| {
            Ok(graph.nodes.len() as u32)
        });
        let sink = seen.clone();
        renderer.on_render(move |info, count| sink.borrow_mut().push((info.frame, *count)));

        renderer.commit(graph(&["a", "b"]));
        assert_eq!(renderer.frame(0.0).unwrap(), Some(2));
        assert_eq!(renderer.root().nodes.len(), 2);
        assert!(!renderer.is_scheduled());
        assert_eq!(*seen.borrow(), vec![(0, 2)]);
    }

    #[test]
    fn test_stage_hook_can_short_circuit() {
        let mut renderer: Renderer<u32> = Renderer::new();
        renderer.on_stage(|_: (), _: &FrameInfo, _: Next<'_, (), u32, FrameInfo>| Ok(7));
        renderer.commit(graph(&["a"]));
        assert_eq!(renderer.frame(0.0).unwrap(), Some(7));
        assert!(renderer.root().nodes.is_empty());
    }
}
