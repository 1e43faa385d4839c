//! Hook chains for the render pipeline phases.
//!
//! A [`HookChain`] is an ordered list of middleware. Each hook receives the
//! phase input, a read-only context and a [`Next`] continuation; running
//! `next` hands the (possibly transformed) input to the rest of the chain,
//! and not running it short-circuits the phase. The first registered hook is
//! the outermost one.
//!
//! # Usage
//!
//! ```ignore
//! use weft_render::{FrameInfo, Next, RenderGraph, Renderer};
//!
//! let mut renderer = Renderer::<Vec<String>>::new();
//! renderer.on_layout(|graph: RenderGraph, info: &FrameInfo, next: Next<'_, _, _, _>| {
//!     tracing::debug!(frame = info.frame, "layout");
//!     next.run(graph)
//! });
//! ```

use std::fmt;
use std::rc::Rc;

use crate::hint::RenderAction;
use crate::rect::Rect;
use crate::render_graph::{RenderGraph, RenderLink, RenderNode};

/// Pipeline phase a hook belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Wraps the whole frame.
    Stage,
    Layout,
    Clip,
    Paint,
    /// Per-node render, reached from paint hooks.
    Node,
    /// Per-link render, reached from paint hooks.
    Link,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Stage => "stage",
            Phase::Layout => "layout",
            Phase::Clip => "clip",
            Phase::Paint => "paint",
            Phase::Node => "node",
            Phase::Link => "link",
        };
        f.write_str(name)
    }
}

/// Returned by hook registration; pass to `unhook` to remove the hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HookHandle {
    pub phase: Phase,
    id: u64,
}

/// A hook taking `A` in context `C` and producing `R`.
pub type HookFn<A, R, C> = dyn Fn(A, &C, Next<'_, A, R, C>) -> anyhow::Result<R>;

type Terminal<'a, A, R, C> = dyn FnMut(A, &C) -> anyhow::Result<R> + 'a;

/// The rest of a hook chain.
pub struct Next<'a, A, R, C> {
    hooks: &'a [(HookHandle, Rc<HookFn<A, R, C>>)],
    ctx: &'a C,
    terminal: &'a mut Terminal<'a, A, R, C>,
}

impl<A, R, C> Next<'_, A, R, C> {
    /// Run the remaining hooks, then the phase's own behavior.
    pub fn run(self, arg: A) -> anyhow::Result<R> {
        match self.hooks.split_first() {
            Some(((_, hook), rest)) => hook(
                arg,
                self.ctx,
                Next {
                    hooks: rest,
                    ctx: self.ctx,
                    terminal: self.terminal,
                },
            ),
            None => (self.terminal)(arg, self.ctx),
        }
    }

    /// Hooks left after this point, terminal excluded.
    pub fn remaining(&self) -> usize {
        self.hooks.len()
    }
}

pub struct HookChain<A, R, C> {
    phase: Phase,
    next_id: u64,
    entries: Vec<(HookHandle, Rc<HookFn<A, R, C>>)>,
}

impl<A, R, C> Clone for HookChain<A, R, C> {
    fn clone(&self) -> Self {
        Self {
            phase: self.phase,
            next_id: self.next_id,
            entries: self.entries.clone(),
        }
    }
}

impl<A, R, C> fmt::Debug for HookChain<A, R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookChain")
            .field("phase", &self.phase)
            .field("hooks", &self.entries.len())
            .finish()
    }
}

impl<A, R, C> HookChain<A, R, C> {
    pub fn new(phase: Phase) -> Self {
        Self {
            phase,
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Append `hook`; it runs after every hook registered before it.
    pub fn push(
        &mut self,
        hook: impl Fn(A, &C, Next<'_, A, R, C>) -> anyhow::Result<R> + 'static,
    ) -> HookHandle {
        let handle = HookHandle {
            phase: self.phase,
            id: self.next_id,
        };
        self.next_id += 1;
        self.entries.push((handle, Rc::new(hook)));
        handle
    }

    /// Returns false if the hook was already removed.
    pub fn remove(&mut self, handle: HookHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(h, _)| *h != handle);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run the chain, ending in `terminal`.
    pub fn run<'a>(
        &'a self,
        arg: A,
        ctx: &'a C,
        terminal: &'a mut Terminal<'a, A, R, C>,
    ) -> anyhow::Result<R> {
        Next {
            hooks: &self.entries,
            ctx,
            terminal,
        }
        .run(arg)
    }
}

/// What a frame is doing, passed to every hook.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    /// Tick timestamp, before time scaling.
    pub timestamp: f64,
    /// Frames rendered before this one.
    pub frame: u64,
    pub action: RenderAction,
    pub viewport: Rect,
}

type NodeChain<T> = HookChain<Rc<RenderNode>, T, FrameInfo>;
type LinkChain<T> = HookChain<Rc<RenderLink>, T, FrameInfo>;

/// Context of paint hooks: the per-element render chains.
pub struct PaintContext<T> {
    pub info: FrameInfo,
    nodes: Rc<NodeChain<T>>,
    links: Rc<LinkChain<T>>,
}

impl<T: Default> PaintContext<T> {
    pub fn render_node(&self, node: &Rc<RenderNode>) -> anyhow::Result<T> {
        self.nodes
            .run(node.clone(), &self.info, &mut |_: Rc<RenderNode>, _: &FrameInfo| Ok(T::default()))
    }

    pub fn render_link(&self, link: &Rc<RenderLink>) -> anyhow::Result<T> {
        self.links
            .run(link.clone(), &self.info, &mut |_: Rc<RenderLink>, _: &FrameInfo| Ok(T::default()))
    }
}

/// Every hook chain of a renderer producing `T`.
pub struct Hooks<T> {
    pub(crate) stage: HookChain<(), T, FrameInfo>,
    pub(crate) layout: HookChain<RenderGraph, RenderGraph, FrameInfo>,
    pub(crate) clip: HookChain<RenderGraph, RenderGraph, FrameInfo>,
    pub(crate) paint: HookChain<RenderGraph, T, PaintContext<T>>,
    node: Rc<NodeChain<T>>,
    link: Rc<LinkChain<T>>,
}

impl<T> Default for Hooks<T> {
    fn default() -> Self {
        Self {
            stage: HookChain::new(Phase::Stage),
            layout: HookChain::new(Phase::Layout),
            clip: HookChain::new(Phase::Clip),
            paint: HookChain::new(Phase::Paint),
            node: Rc::new(HookChain::new(Phase::Node)),
            link: Rc::new(HookChain::new(Phase::Link)),
        }
    }
}

impl<T> fmt::Debug for Hooks<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("stage", &self.stage.len())
            .field("layout", &self.layout.len())
            .field("clip", &self.clip.len())
            .field("paint", &self.paint.len())
            .field("node", &self.node.len())
            .field("link", &self.link.len())
            .finish()
    }
}

impl<T> Hooks<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_stage(
        &mut self,
        hook: impl Fn((), &FrameInfo, Next<'_, (), T, FrameInfo>) -> anyhow::Result<T> + 'static,
    ) -> HookHandle {
        self.stage.push(hook)
    }

    pub fn on_layout(
        &mut self,
        hook: impl Fn(RenderGraph, &FrameInfo, Next<'_, RenderGraph, RenderGraph, FrameInfo>) -> anyhow::Result<RenderGraph>
        + 'static,
    ) -> HookHandle {
        self.layout.push(hook)
    }

    pub fn on_clip(
        &mut self,
        hook: impl Fn(RenderGraph, &FrameInfo, Next<'_, RenderGraph, RenderGraph, FrameInfo>) -> anyhow::Result<RenderGraph>
        + 'static,
    ) -> HookHandle {
        self.clip.push(hook)
    }

    pub fn on_paint(
        &mut self,
        hook: impl Fn(RenderGraph, &PaintContext<T>, Next<'_, RenderGraph, T, PaintContext<T>>) -> anyhow::Result<T>
        + 'static,
    ) -> HookHandle {
        self.paint.push(hook)
    }

    pub fn on_node(
        &mut self,
        hook: impl Fn(Rc<RenderNode>, &FrameInfo, Next<'_, Rc<RenderNode>, T, FrameInfo>) -> anyhow::Result<T>
        + 'static,
    ) -> HookHandle {
        Rc::make_mut(&mut self.node).push(hook)
    }

    pub fn on_link(
        &mut self,
        hook: impl Fn(Rc<RenderLink>, &FrameInfo, Next<'_, Rc<RenderLink>, T, FrameInfo>) -> anyhow::Result<T>
        + 'static,
    ) -> HookHandle {
        Rc::make_mut(&mut self.link).push(hook)
    }

    /// Remove a hook from whichever chain it was registered on.
    pub fn unhook(&mut self, handle: HookHandle) -> bool {
        match handle.phase {
            Phase::Stage => self.stage.remove(handle),
            Phase::Layout => self.layout.remove(handle),
            Phase::Clip => self.clip.remove(handle),
            Phase::Paint => self.paint.remove(handle),
            Phase::Node => Rc::make_mut(&mut self.node).remove(handle),
            Phase::Link => Rc::make_mut(&mut self.link).remove(handle),
        }
    }

    pub(crate) fn paint_context(&self, info: FrameInfo) -> PaintContext<T> {
        PaintContext {
            info,
            nodes: self.node.clone(),
            links: self.link.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render_graph::RenderElement;

    fn info() -> FrameInfo {
        FrameInfo {
            timestamp: 0.0,
            frame: 0,
            action: RenderAction::default(),
            viewport: Rect::UNBOUNDED,
        }
    }

    fn run(chain: &HookChain<i32, Vec<String>, FrameInfo>, arg: i32) -> anyhow::Result<Vec<String>> {
        chain.run(arg, &info(), &mut |n: i32, _: &FrameInfo| Ok(vec![format!("end {n}")]))
    }

    #[test]
    fn test_hooks_run_in_registration_order() {
        let mut chain = HookChain::new(Phase::Paint);
        chain.push(|n: i32, _: &FrameInfo, next: Next<'_, i32, Vec<String>, FrameInfo>| {
            let mut out = vec![format!("a {n}")];
            out.extend(next.run(n + 1)?);
            Ok(out)
        });
        chain.push(|n: i32, _: &FrameInfo, next: Next<'_, i32, Vec<String>, FrameInfo>| {
            let mut out = vec![format!("b {n}")];
            out.extend(next.run(n * 10)?);
            Ok(out)
        });
        assert_eq!(run(&chain, 1).unwrap(), vec!["a 1", "b 2", "end 20"]);
    }

    #[test]
    fn test_short_circuit_and_unhook() {
        let mut chain = HookChain::new(Phase::Clip);
        let stop = chain.push(|_: i32, _: &FrameInfo, _: Next<'_, i32, Vec<String>, FrameInfo>| {
            Ok(vec!["stopped".to_string()])
        });
        assert_eq!(run(&chain, 1).unwrap(), vec!["stopped"]);

        assert!(chain.remove(stop));
        assert!(!chain.remove(stop));
        assert_eq!(run(&chain, 1).unwrap(), vec!["end 1"]);
    }

    #[test]
    fn test_errors_propagate() {
        let mut chain = HookChain::new(Phase::Layout);
        chain.push(|_: i32, _: &FrameInfo, _: Next<'_, i32, Vec<String>, FrameInfo>| {
            anyhow::bail!("layout exploded")
        });
        let err = run(&chain, 1).unwrap_err();
        assert_eq!(err.to_string(), "layout exploded");
    }

    #[test]
    fn test_paint_context_defaults_without_hooks() {
        let mut hooks: Hooks<Vec<String>> = Hooks::new();
        let node = Rc::new(RenderNode::from_graph(&weft_graph::GraphNode::with_id("a")));
        let ctx = hooks.paint_context(info());
        assert!(ctx.render_node(&node).unwrap().is_empty());

        let handle = hooks.on_node(|node: Rc<RenderNode>, _: &FrameInfo, _: Next<'_, _, Vec<String>, _>| {
            Ok(vec![node.id().to_string()])
        });
        assert_eq!(handle.phase, Phase::Node);
        let ctx = hooks.paint_context(info());
        assert_eq!(ctx.render_node(&node).unwrap(), vec!["a"]);

        assert!(hooks.unhook(handle));
        assert!(hooks.paint_context(info()).render_node(&node).unwrap().is_empty());
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::Layout.to_string(), "layout");
        assert_eq!(Phase::Node.to_string(), "node");
    }
}
