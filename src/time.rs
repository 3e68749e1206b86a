//! Time abstraction traits for platform-agnostic timing.
//!
//! The engine never reads a clock directly. Firmware supplies a
//! [`TimeSource`] backed by its platform (embassy, a HAL timer, `std` on a
//! host), and the engine derives elapsed animation time through these
//! traits. Tests drive the engine with a controllable mock source.

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Zero duration constant.
    const ZERO: Self;

    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;

    /// Saturating subtraction (returns ZERO on underflow).
    fn saturating_sub(self, other: Self) -> Self;
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    fn duration_since(&self, earlier: Self) -> Self::Duration;

    /// Adds duration to instant, returns None on overflow.
    ///
    /// Used to compensate the animation clock for time spent paused.
    fn checked_add(self, duration: Self::Duration) -> Option<Self>;
}
