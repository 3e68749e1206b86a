//! The badge's color vocabulary.
//!
//! Colors are a closed, ordered set. The first seven entries are concrete
//! hues; [`LedColor::Sequential`] and [`LedColor::Multi`] are behavioral
//! values that renderers resolve through a [`ColorPlan`] rather than a single
//! hue. Raw `u8` values follow declaration order starting at 0 and are a
//! stable wire contract: the badge stores and transmits selections as bytes.

use palette::Srgb;

/// How long [`LedColor::Sequential`] dwells on each concrete hue.
pub const SEQUENTIAL_DWELL_MS: u64 = 2000;

/// A color selection for the badge's LEDs.
///
/// Raw values `0..LedColor::COUNT` are valid; everything else is rejected by
/// the [`TryFrom<u8>`] conversion. There is no sentinel entry; use
/// [`LedColor::COUNT`] for bounds checks and random selection ranges.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedColor {
    /// Concrete hue.
    Green = 0,
    /// Concrete hue.
    Blue = 1,
    /// Concrete hue.
    Red = 2,
    /// Concrete hue.
    Cyan = 3,
    /// Concrete hue.
    Yellow = 4,
    /// Concrete hue.
    Purple = 5,
    /// Concrete hue.
    White = 6,
    /// Cycle through the concrete hues over time.
    Sequential = 7,
    /// Show many concrete hues simultaneously across the strip.
    Multi = 8,
}

impl LedColor {
    /// Number of valid color values. Raw values must satisfy `raw < COUNT`.
    pub const COUNT: usize = 9;

    /// Every valid color value, in declaration (= raw value) order.
    pub const ALL: [LedColor; Self::COUNT] = [
        LedColor::Green,
        LedColor::Blue,
        LedColor::Red,
        LedColor::Cyan,
        LedColor::Yellow,
        LedColor::Purple,
        LedColor::White,
        LedColor::Sequential,
        LedColor::Multi,
    ];

    /// The concrete hues, in declaration order. [`LedColor::Sequential`]
    /// cycles through these; [`LedColor::Multi`] spreads them across LEDs.
    pub const CONCRETE: [LedColor; 7] = [
        LedColor::Green,
        LedColor::Blue,
        LedColor::Red,
        LedColor::Cyan,
        LedColor::Yellow,
        LedColor::Purple,
        LedColor::White,
    ];

    /// Returns the fixed hue of a concrete color, or `None` for the
    /// behavioral values.
    pub fn srgb(self) -> Option<Srgb> {
        match self {
            LedColor::Green => Some(Srgb::new(0.0, 1.0, 0.0)),
            LedColor::Blue => Some(Srgb::new(0.0, 0.0, 1.0)),
            LedColor::Red => Some(Srgb::new(1.0, 0.0, 0.0)),
            LedColor::Cyan => Some(Srgb::new(0.0, 1.0, 1.0)),
            LedColor::Yellow => Some(Srgb::new(1.0, 1.0, 0.0)),
            LedColor::Purple => Some(Srgb::new(1.0, 0.0, 1.0)),
            LedColor::White => Some(Srgb::new(1.0, 1.0, 1.0)),
            LedColor::Sequential | LedColor::Multi => None,
        }
    }

    /// Returns true for the behavioral values that resolve to different hues
    /// over time or across LEDs.
    pub fn is_dynamic(self) -> bool {
        matches!(self, LedColor::Sequential | LedColor::Multi)
    }

    /// Human-readable name for logs and debug output.
    pub fn label(self) -> &'static str {
        match self {
            LedColor::Green => "green",
            LedColor::Blue => "blue",
            LedColor::Red => "red",
            LedColor::Cyan => "cyan",
            LedColor::Yellow => "yellow",
            LedColor::Purple => "purple",
            LedColor::White => "white",
            LedColor::Sequential => "sequential",
            LedColor::Multi => "multi",
        }
    }

    /// Resolves this color selection into a per-frame [`ColorPlan`].
    ///
    /// `elapsed_ms` is the time since the animation started; it only affects
    /// [`LedColor::Sequential`], which dwells [`SEQUENTIAL_DWELL_MS`] on each
    /// concrete hue in declaration order.
    pub fn plan(self, elapsed_ms: u64) -> ColorPlan {
        match self {
            LedColor::Sequential => {
                let idx = (elapsed_ms / SEQUENTIAL_DWELL_MS) as usize % Self::CONCRETE.len();
                // CONCRETE entries always have a fixed hue
                ColorPlan::Solid(Self::CONCRETE[idx].srgb().unwrap_or(Srgb::new(1.0, 1.0, 1.0)))
            }
            LedColor::Multi => ColorPlan::Spread,
            concrete => {
                ColorPlan::Solid(concrete.srgb().unwrap_or(Srgb::new(1.0, 1.0, 1.0)))
            }
        }
    }
}

impl From<LedColor> for u8 {
    fn from(color: LedColor) -> Self {
        color as u8
    }
}

impl TryFrom<u8> for LedColor {
    type Error = InvalidColor;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(LedColor::Green),
            1 => Ok(LedColor::Blue),
            2 => Ok(LedColor::Red),
            3 => Ok(LedColor::Cyan),
            4 => Ok(LedColor::Yellow),
            5 => Ok(LedColor::Purple),
            6 => Ok(LedColor::White),
            7 => Ok(LedColor::Sequential),
            8 => Ok(LedColor::Multi),
            _ => Err(InvalidColor(value)),
        }
    }
}

/// Error returned when a raw byte does not name a valid color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidColor(pub u8);

impl core::fmt::Display for InvalidColor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "invalid color value: {} (valid values are 0..{})",
            self.0,
            LedColor::COUNT
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidColor {}

/// The per-frame resolution of a color selection.
///
/// Renderers never see [`LedColor::Sequential`] or [`LedColor::Multi`]
/// directly; they receive a plan and ask it for the hue of each LED.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorPlan {
    /// Every LED shows the same hue.
    Solid(Srgb),
    /// Each LED shows its own concrete hue, spread in declaration order.
    Spread,
}

impl ColorPlan {
    /// Returns the hue for the LED at `index`.
    pub fn color_for(&self, index: usize) -> Srgb {
        match self {
            ColorPlan::Solid(color) => *color,
            ColorPlan::Spread => {
                let concrete = LedColor::CONCRETE[index % LedColor::CONCRETE.len()];
                concrete.srgb().unwrap_or(Srgb::new(1.0, 1.0, 1.0))
            }
        }
    }
}
