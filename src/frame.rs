//! Per-LED output buffer.
//!
//! Renderers mutate a persistent [`Frame`] once per engine tick; the engine
//! compares it against the previously written frame so the strip hardware is
//! only touched when something actually changed.

use crate::COLOR_OFF;
use palette::Srgb;

/// A fixed-size buffer holding one color per LED.
///
/// Colors are `Srgb<f32>` in the 0.0-1.0 range, matching the rest of the
/// library. Strip implementations convert to their hardware's native format
/// when the engine hands them a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame<const N: usize> {
    leds: [Srgb; N],
}

impl<const N: usize> Frame<N> {
    /// Number of LEDs in the frame.
    pub const LEN: usize = N;

    /// Creates a frame with every LED off.
    pub fn new() -> Self {
        Self {
            leds: [COLOR_OFF; N],
        }
    }

    /// Creates a frame with every LED set to `color`.
    pub fn filled(color: Srgb) -> Self {
        Self { leds: [color; N] }
    }

    /// Turns every LED off.
    pub fn clear(&mut self) {
        self.fill(COLOR_OFF);
    }

    /// Sets every LED to `color`.
    pub fn fill(&mut self, color: Srgb) {
        self.leds = [color; N];
    }

    /// Sets the LED at `index`.
    ///
    /// # Panics
    /// Panics if `index >= N`. Renderers derive indices from the strip
    /// length, so this is a programming error rather than a runtime input.
    pub fn set(&mut self, index: usize, color: Srgb) {
        self.leds[index] = color;
    }

    /// Returns the color of the LED at `index`.
    ///
    /// # Panics
    /// Panics if `index >= N`.
    pub fn get(&self, index: usize) -> Srgb {
        self.leds[index]
    }

    /// Multiplies every LED by `factor`, clamped to 0.0-1.0.
    ///
    /// A factor below 1.0 dims the frame toward black; renderers use this
    /// per tick for comet tails and beat decay.
    pub fn scale(&mut self, factor: f32) {
        let factor = factor.clamp(0.0, 1.0);
        for led in &mut self.leds {
            led.red *= factor;
            led.green *= factor;
            led.blue *= factor;
        }
    }

    /// Returns a copy of this frame scaled by `factor`.
    ///
    /// The engine applies master brightness this way so the renderer's own
    /// state is left untouched.
    pub fn scaled(&self, factor: f32) -> Self {
        let mut copy = *self;
        copy.scale(factor);
        copy
    }

    /// Returns the LED colors as a slice.
    pub fn as_slice(&self) -> &[Srgb] {
        &self.leds
    }

    /// Iterates over the LED colors.
    pub fn iter(&self) -> core::slice::Iter<'_, Srgb> {
        self.leds.iter()
    }

    /// Number of LEDs in the frame.
    pub fn len(&self) -> usize {
        N
    }

    /// True only for the degenerate zero-LED frame.
    pub fn is_empty(&self) -> bool {
        N == 0
    }
}

impl<const N: usize> Default for Frame<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors_equal(a: Srgb, b: Srgb) -> bool {
        const EPSILON: f32 = 0.001;
        (a.red - b.red).abs() < EPSILON
            && (a.green - b.green).abs() < EPSILON
            && (a.blue - b.blue).abs() < EPSILON
    }

    #[test]
    fn new_frame_is_all_off() {
        let frame = Frame::<8>::new();
        for led in frame.iter() {
            assert!(colors_equal(*led, COLOR_OFF));
        }
    }

    #[test]
    fn filled_sets_every_led() {
        let red = Srgb::new(1.0, 0.0, 0.0);
        let frame = Frame::<4>::filled(red);
        for led in frame.iter() {
            assert!(colors_equal(*led, red));
        }
    }

    #[test]
    fn exposes_its_length_and_raw_slice() {
        let mut frame = Frame::<5>::new();
        frame.set(3, Srgb::new(1.0, 0.0, 0.0));

        assert_eq!(Frame::<5>::LEN, 5);
        assert_eq!(frame.len(), 5);
        assert!(!frame.is_empty());

        // Strip implementations read the buffer through as_slice
        let slice = frame.as_slice();
        assert_eq!(slice.len(), 5);
        assert!(colors_equal(slice[3], Srgb::new(1.0, 0.0, 0.0)));
        assert!(colors_equal(slice[0], COLOR_OFF));

        assert!(Frame::<0>::new().is_empty());
    }

    #[test]
    fn set_and_get_single_led() {
        let mut frame = Frame::<4>::new();
        let blue = Srgb::new(0.0, 0.0, 1.0);

        frame.set(2, blue);

        assert!(colors_equal(frame.get(2), blue));
        assert!(colors_equal(frame.get(0), COLOR_OFF));
    }

    #[test]
    fn scale_dims_every_led() {
        let mut frame = Frame::<2>::filled(Srgb::new(1.0, 0.5, 0.0));
        frame.scale(0.5);

        assert!(colors_equal(frame.get(0), Srgb::new(0.5, 0.25, 0.0)));
        assert!(colors_equal(frame.get(1), Srgb::new(0.5, 0.25, 0.0)));
    }

    #[test]
    fn scale_clamps_factor() {
        let mut frame = Frame::<2>::filled(Srgb::new(0.5, 0.5, 0.5));
        frame.scale(2.0);

        // Factor above 1.0 must not brighten
        assert!(colors_equal(frame.get(0), Srgb::new(0.5, 0.5, 0.5)));

        frame.scale(-1.0);
        assert!(colors_equal(frame.get(0), COLOR_OFF));
    }

    #[test]
    fn scaled_leaves_original_untouched() {
        let frame = Frame::<2>::filled(Srgb::new(1.0, 1.0, 1.0));
        let dimmed = frame.scaled(0.25);

        assert!(colors_equal(frame.get(0), Srgb::new(1.0, 1.0, 1.0)));
        assert!(colors_equal(dimmed.get(0), Srgb::new(0.25, 0.25, 0.25)));
    }

    #[test]
    fn equality_detects_changes() {
        let mut a = Frame::<4>::new();
        let b = Frame::<4>::new();
        assert_eq!(a, b);

        a.set(1, Srgb::new(0.1, 0.0, 0.0));
        assert_ne!(a, b);
    }
}
