//! Shared test infrastructure for badge-lights integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use badge_lights::{Frame, LedStrip, TimeDuration, TimeInstant, TimeSource};
use palette::Srgb;
use std::cell::RefCell;
use std::rc::Rc;

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }

    fn saturating_sub(self, other: Self) -> Self {
        TestDuration(self.0.saturating_sub(other.0))
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }

    fn checked_add(self, duration: Self::Duration) -> Option<Self> {
        Some(TestInstant(self.0 + duration.0))
    }
}

// ============================================================================
// Mock Strip
// ============================================================================

/// Mock strip that records every frame written, for testing.
///
/// The strip itself moves into the engine; keep the [`FrameLog`] handle to
/// inspect what reached the hardware.
pub struct MockStrip<const N: usize> {
    frames: Rc<RefCell<Vec<Frame<N>>>>,
}

impl<const N: usize> MockStrip<N> {
    pub fn new() -> (Self, FrameLog<N>) {
        let frames = Rc::new(RefCell::new(Vec::new()));
        let strip = Self {
            frames: Rc::clone(&frames),
        };
        (strip, FrameLog { frames })
    }
}

impl<const N: usize> LedStrip<N> for MockStrip<N> {
    fn write(&mut self, frame: &Frame<N>) {
        self.frames.borrow_mut().push(*frame);
    }
}

/// Inspection handle for frames written to a [`MockStrip`]
pub struct FrameLog<const N: usize> {
    frames: Rc<RefCell<Vec<Frame<N>>>>,
}

impl<const N: usize> FrameLog<N> {
    /// Number of hardware writes so far
    pub fn len(&self) -> usize {
        self.frames.borrow().len()
    }

    /// The most recently written frame
    pub fn last(&self) -> Option<Frame<N>> {
        self.frames.borrow().last().copied()
    }

    /// The frame written at `index`
    pub fn frame(&self, index: usize) -> Frame<N> {
        self.frames.borrow()[index]
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: core::cell::Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u64) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + millis));
    }

    pub fn set_time(&self, time: TestInstant) {
        self.current_time.set(time);
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Test Helper Constants and Functions
// ============================================================================

pub const BLACK: Srgb = Srgb::new(0.0, 0.0, 0.0);
pub const RED: Srgb = Srgb::new(1.0, 0.0, 0.0);
pub const GREEN: Srgb = Srgb::new(0.0, 1.0, 0.0);
pub const BLUE: Srgb = Srgb::new(0.0, 0.0, 1.0);
pub const WHITE: Srgb = Srgb::new(1.0, 1.0, 1.0);

/// Compare two colors with floating-point tolerance
pub fn colors_equal(a: Srgb, b: Srgb) -> bool {
    const EPSILON: f32 = 0.001;
    (a.red - b.red).abs() < EPSILON
        && (a.green - b.green).abs() < EPSILON
        && (a.blue - b.blue).abs() < EPSILON
}

/// Compare two colors with custom epsilon
pub fn colors_equal_epsilon(a: Srgb, b: Srgb, epsilon: f32) -> bool {
    (a.red - b.red).abs() < epsilon
        && (a.green - b.green).abs() < epsilon
        && (a.blue - b.blue).abs() < epsilon
}

/// True if every LED in the frame is off
pub fn frame_is_dark<const N: usize>(frame: &Frame<N>) -> bool {
    frame.iter().all(|led| colors_equal(*led, BLACK))
}
