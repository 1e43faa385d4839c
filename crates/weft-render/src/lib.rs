//! Render pipeline for weft graphs.
//!
//! This crate turns successive [`weft_graph::GraphStruct`] roots into
//! animated frames:
//! - **Render graph**: the animatable projection of a logical graph, with
//!   settled and presented values per element and a hand-off chain for
//!   elements that are leaving
//! - **Differ**: matches elements by id and decides where removed elements
//!   keep rendering while they leave
//! - **Resolver**: enter, update and leave tweens from declarative configs
//! - **Pipeline**: hint-driven frames run through layout, clip and paint
//!   hook chains
//!
//! # Architecture
//!
//! ```text
//! Renderer
//!   ├── committed RenderGraph ──diff──> GraphMutation
//!   ├── TweenManager + Timeline <──resolve── GraphMutation
//!   └── Hooks: stage ⊃ (layout, clip, paint ⊃ (node, link))
//! ```

pub mod diff;
pub mod error;
pub mod hint;
pub mod hooks;
pub mod plugin;
pub mod rect;
pub mod render_graph;
pub mod renderer;
pub mod resolve;
pub mod ticker;

pub use diff::{GraphMutation, ListMutation, Removal, Slot, diff_graph, diff_list, prepare_removals};
pub use error::{RenderError, Result};
pub use hint::{RenderAction, RenderHint};
pub use hooks::{FrameInfo, HookChain, HookFn, HookHandle, Hooks, Next, PaintContext, Phase};
pub use plugin::{ClipPlugin, LinearLayoutPlugin, RendererPlugin};
pub use rect::Rect;
pub use render_graph::{ChainLink, ElementList, Props, RenderElement, RenderGraph, RenderLink, RenderNode};
pub use renderer::{Renderer, RendererEvent, RendererEventName};
pub use resolve::{AnimationStep, ResolvedTweens, resolve_graph, resolve_list};
pub use ticker::{FrameLoop, ManualTicker, Ticker};
