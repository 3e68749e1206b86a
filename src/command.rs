//! Command-based control for the engine.

use crate::selection::Selection;

/// Actions for controlling a [`BadgeEngine`](crate::BadgeEngine).
///
/// Useful when a selector task (button handler, radio link) talks to the
/// rendering task over a channel instead of calling engine methods directly.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EngineAction {
    /// Store a mode and color selection.
    Select(Selection),
    /// Start the selected animation.
    Start,
    /// Stop the animation, keeping the selection.
    Stop,
    /// Pause the animation.
    Pause,
    /// Resume the animation.
    Resume,
    /// Clear the selection.
    Clear,
    /// Set the master brightness (0.0-1.0).
    SetBrightness(f32),
    /// Set the level driving the VU meter (0.0-1.0).
    SetLevel(f32),
}
