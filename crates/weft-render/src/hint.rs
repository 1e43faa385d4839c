//! Render hints: why a frame was requested, and what it has to do.

use bitflags::bitflags;

bitflags! {
    /// Reasons for a scheduled frame. Hints accumulate until the frame runs.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RenderHint: u32 {
        /// A new logical graph was committed.
        const FORCE_UPDATE = 1;
        /// Tweens need another tick.
        const ANIMATION_UPDATE = 1 << 1;
        /// The viewport moved or resized.
        const VIEWPORT_UPDATE = 1 << 2;
        /// Tweens need a tick but layout is known to be unchanged.
        const ANIMATION_UPDATE_WITHOUT_LAYOUT = 1 << 3;
    }
}

impl RenderHint {
    /// Repaint only.
    pub const RENDER: RenderHint = RenderHint::empty();
}

/// Pipeline stages a frame runs, derived from its hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderAction {
    pub need_new_root: bool,
    pub need_layout: bool,
    pub need_animation: bool,
    pub need_clip: bool,
}

impl RenderAction {
    pub fn from_hint(hint: RenderHint) -> Self {
        let force = hint.contains(RenderHint::FORCE_UPDATE);
        let animation = hint.contains(RenderHint::ANIMATION_UPDATE);
        let viewport = hint.contains(RenderHint::VIEWPORT_UPDATE);
        let without_layout = hint.contains(RenderHint::ANIMATION_UPDATE_WITHOUT_LAYOUT);
        Self {
            need_new_root: force,
            need_layout: force || animation || viewport,
            need_animation: force || animation || without_layout,
            need_clip: true,
        }
    }
}
