//! The badge's animation mode vocabulary.
//!
//! Like colors, modes form a closed, ordered set with raw `u8` values
//! following declaration order from 0. The raw encoding is shared with the
//! badge's stored configuration, so order and values must not change.

/// A lighting animation mode.
///
/// There is no sentinel entry; use [`LedMode::COUNT`] for bounds checks and
/// random selection ranges. Raw values `>= COUNT` are rejected by the
/// [`TryFrom<u8>`] conversion.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedMode {
    /// A bright dot ping-pongs across the strip, leaving a fading tail.
    Scan = 0,
    /// The same sweep over a constantly lit dim background.
    ScanConstant = 1,
    /// The whole strip breathes between dim and full brightness.
    Pulse = 2,
    /// A lub-dub double beat followed by a rest.
    Heartbeat = 3,
    /// An elementary cellular automaton stepped around the strip.
    CellularAutomaton = 4,
    /// Random sparks flare up and decay.
    Twinkle = 5,
    /// Four-on-the-floor kick flashes with offbeat accents.
    BootsAndPants = 6,
    /// A level bar driven by an externally supplied signal.
    VuMeter = 7,
    /// Re-rolls a random mode and color every few seconds.
    PartyShuffle = 8,
}

impl LedMode {
    /// Number of valid mode values. Raw values must satisfy `raw < COUNT`.
    pub const COUNT: usize = 9;

    /// Every valid mode, in declaration (= raw value) order.
    pub const ALL: [LedMode; Self::COUNT] = [
        LedMode::Scan,
        LedMode::ScanConstant,
        LedMode::Pulse,
        LedMode::Heartbeat,
        LedMode::CellularAutomaton,
        LedMode::Twinkle,
        LedMode::BootsAndPants,
        LedMode::VuMeter,
        LedMode::PartyShuffle,
    ];

    /// Human-readable name for logs and debug output.
    pub fn label(self) -> &'static str {
        match self {
            LedMode::Scan => "scan",
            LedMode::ScanConstant => "scan-constant",
            LedMode::Pulse => "pulse",
            LedMode::Heartbeat => "heartbeat",
            LedMode::CellularAutomaton => "cellular-automaton",
            LedMode::Twinkle => "twinkle",
            LedMode::BootsAndPants => "boots-and-pants",
            LedMode::VuMeter => "vu-meter",
            LedMode::PartyShuffle => "party-shuffle",
        }
    }
}

impl From<LedMode> for u8 {
    fn from(mode: LedMode) -> Self {
        mode as u8
    }
}

impl TryFrom<u8> for LedMode {
    type Error = InvalidMode;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(LedMode::Scan),
            1 => Ok(LedMode::ScanConstant),
            2 => Ok(LedMode::Pulse),
            3 => Ok(LedMode::Heartbeat),
            4 => Ok(LedMode::CellularAutomaton),
            5 => Ok(LedMode::Twinkle),
            6 => Ok(LedMode::BootsAndPants),
            7 => Ok(LedMode::VuMeter),
            8 => Ok(LedMode::PartyShuffle),
            _ => Err(InvalidMode(value)),
        }
    }
}

/// Error returned when a raw byte does not name a valid mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidMode(pub u8);

impl core::fmt::Display for InvalidMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "invalid mode value: {} (valid values are 0..{})",
            self.0,
            LedMode::COUNT
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidMode {}
