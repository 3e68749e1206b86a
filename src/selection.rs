//! Mode and color paired into a single selection.
//!
//! A [`Selection`] is the contract between whatever picks animations (button
//! handler, radio command, stored configuration) and the rendering engine.
//! Serialized selections are two raw bytes; [`Selection::from_raw`] is the
//! validated entry point, so out-of-range bytes never reach a renderer.

use crate::color::{InvalidColor, LedColor};
use crate::mode::{InvalidMode, LedMode};
use rand::Rng;

/// An animation mode paired with a color selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Selection {
    pub mode: LedMode,
    pub color: LedColor,
}

impl Selection {
    /// Creates a selection from already-validated values.
    pub fn new(mode: LedMode, color: LedColor) -> Self {
        Self { mode, color }
    }

    /// Parses a selection from raw configuration bytes.
    ///
    /// The mode byte is checked first, so if both bytes are out of range the
    /// error names the mode.
    ///
    /// # Errors
    /// * [`SelectionError::Mode`] - the mode byte is `>= LedMode::COUNT`
    /// * [`SelectionError::Color`] - the color byte is `>= LedColor::COUNT`
    pub fn from_raw(mode: u8, color: u8) -> Result<Self, SelectionError> {
        let mode = LedMode::try_from(mode)?;
        let color = LedColor::try_from(color)?;
        Ok(Self { mode, color })
    }

    /// Returns the `(mode, color)` raw byte encoding.
    pub fn to_raw(self) -> (u8, u8) {
        (self.mode.into(), self.color.into())
    }

    /// Draws a uniformly random selection from the full vocabulary.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            mode: LedMode::ALL[rng.gen_range(0..LedMode::COUNT)],
            color: LedColor::ALL[rng.gen_range(0..LedColor::COUNT)],
        }
    }

    /// Draws a random selection for shuffle rotation.
    ///
    /// Any color may come up, but never [`LedMode::PartyShuffle`] itself.
    pub fn random_non_shuffle<R: Rng>(rng: &mut R) -> Self {
        // PartyShuffle is declared last, so capping the range excludes it.
        Self {
            mode: LedMode::ALL[rng.gen_range(0..LedMode::COUNT - 1)],
            color: LedColor::ALL[rng.gen_range(0..LedColor::COUNT)],
        }
    }
}

/// Errors from parsing raw selection bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SelectionError {
    /// The mode byte is out of range.
    Mode(InvalidMode),
    /// The color byte is out of range.
    Color(InvalidColor),
}

impl core::fmt::Display for SelectionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SelectionError::Mode(err) => write!(f, "{}", err),
            SelectionError::Color(err) => write!(f, "{}", err),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SelectionError {}

impl From<InvalidMode> for SelectionError {
    fn from(err: InvalidMode) -> Self {
        SelectionError::Mode(err)
    }
}

impl From<InvalidColor> for SelectionError {
    fn from(err: InvalidColor) -> Self {
        SelectionError::Color(err)
    }
}
