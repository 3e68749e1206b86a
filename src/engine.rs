//! Badge animation engine with state management and timing control.
//!
//! Provides [`BadgeEngine`] which drives a strip of LEDs through the animation
//! selected as a ([`LedMode`], [`LedColor`]) pair, handling state transitions,
//! frame timing, and strip updates. Also defines the [`LedStrip`] trait for
//! hardware abstraction.

use crate::animation::{ModeRenderer, RenderContext};
use crate::color::LedColor;
use crate::command::EngineAction;
use crate::frame::Frame;
use crate::mode::LedMode;
use crate::selection::Selection;
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Interval between rendered frames (25 FPS).
pub const FRAME_INTERVAL_MS: u64 = 40;

/// How long [`LedMode::PartyShuffle`] dwells on one draw before re-rolling.
pub const SHUFFLE_DWELL_MS: u64 = 5000;

/// Trait for abstracting LED strip hardware.
///
/// Implement this for your strip hardware (WS2812 over SPI/RMT, PWM channels,
/// shift registers, etc.) to allow the engine to drive it.
pub trait LedStrip<const N: usize> {
    /// Writes a full frame to the strip.
    ///
    /// Color components are in the range 0.0-1.0. Implementations should
    /// convert these to their hardware's native format (e.g., 8-bit GRB,
    /// PWM duty cycles). Handle any hardware errors internally - this method
    /// cannot fail.
    fn write(&mut self, frame: &Frame<N>);
}

/// The current state of a badge engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EngineState {
    /// No selection stored. LEDs are off.
    Idle,
    /// Selection stored and ready to start. LEDs are off.
    Ready,
    /// Animation actively rendering.
    Running,
    /// Animation paused. LEDs hold the frame from when pause was called.
    Paused,
}

/// Errors that can occur during engine operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EngineError {
    /// Operation called from an invalid state.
    ///
    /// The `expected` field describes which state(s) are valid for this operation.
    InvalidState {
        /// Human-readable description of expected state(s), e.g. "Running" or "Running or Paused"
        expected: &'static str,
        /// The actual current state
        actual: EngineState,
    },
    /// No selection is stored.
    NoSelection,
}

impl core::fmt::Display for EngineError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EngineError::InvalidState { expected, actual } => {
                write!(
                    f,
                    "invalid state: expected {}, but engine is in {:?}",
                    expected, actual
                )
            }
            EngineError::NoSelection => {
                write!(f, "no selection stored")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EngineError {}

/// Drives a strip of LEDs through the selected badge animation.
///
/// The engine owns the strip and renders the active mode into a persistent
/// [`Frame`] at a fixed cadence, writing to the hardware only when the output
/// actually changed. Selections can be swapped live while running, the way a
/// badge button cycles modes without stopping the show.
///
/// All stochastic behavior (twinkle sparks, automaton seeds, party shuffle
/// draws) comes from a single RNG seeded at construction, so a fixed seed
/// reproduces the exact same animation.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `S` - Strip implementation type
/// * `T` - Time source implementation type
/// * `N` - Number of LEDs on the strip
pub struct BadgeEngine<'t, I: TimeInstant, S: LedStrip<N>, T: TimeSource<I>, const N: usize> {
    strip: S,
    time_source: &'t T,
    state: EngineState,
    selection: Option<Selection>,
    /// What the renderer was actually built for. Differs from `selection`
    /// only while party shuffle is substituting its draws.
    active: Selection,
    renderer: ModeRenderer<N>,
    shuffling: bool,
    frame: Frame<N>,
    written: Frame<N>,
    start_time: Option<I>,
    pause_start_time: Option<I>,
    active_since_ms: u64,
    next_frame_ms: u64,
    next_shuffle_ms: u64,
    brightness: f32,
    level: f32,
    rng: SmallRng,
}

impl<'t, I: TimeInstant, S: LedStrip<N>, T: TimeSource<I>, const N: usize>
    BadgeEngine<'t, I, S, T, N>
{
    /// Creates a new idle engine with all LEDs turned off.
    ///
    /// The seed feeds the engine's RNG. On hardware, derive it from an
    /// entropy peripheral or a unique device id; in tests, fix it for
    /// reproducible animations.
    pub fn new(mut strip: S, time_source: &'t T, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let frame = Frame::new();
        strip.write(&frame);

        let active = Selection::new(LedMode::Scan, LedColor::White);
        let renderer = ModeRenderer::for_mode(active.mode, &mut rng);

        Self {
            strip,
            time_source,
            state: EngineState::Idle,
            selection: None,
            active,
            renderer,
            shuffling: false,
            frame,
            written: frame,
            start_time: None,
            pause_start_time: None,
            active_since_ms: 0,
            next_frame_ms: 0,
            next_shuffle_ms: 0,
            brightness: 1.0,
            level: 0.0,
            rng,
        }
    }

    /// Handles an engine action by dispatching to the appropriate method.
    ///
    /// This is a convenience method for command-based control, allowing actions
    /// to be dispatched without matching on the action type manually.
    ///
    /// # Returns
    /// * `Ok(Some(delay))` - Next service is due after `delay` (actions that start rendering)
    /// * `Ok(None)` - Action needs no servicing
    /// * `Err` - Operation failed (invalid state, etc.)
    pub fn handle_action(
        &mut self,
        action: EngineAction,
    ) -> Result<Option<I::Duration>, EngineError> {
        match action {
            EngineAction::Select(selection) => {
                self.select(selection);
                Ok(None)
            }
            EngineAction::Start => self.start().map(Some),
            EngineAction::Stop => {
                self.stop()?;
                Ok(None)
            }
            EngineAction::Pause => {
                self.pause()?;
                Ok(None)
            }
            EngineAction::Resume => self.resume().map(Some),
            EngineAction::Clear => {
                self.clear();
                Ok(None)
            }
            EngineAction::SetBrightness(value) => {
                self.set_brightness(value);
                Ok(None)
            }
            EngineAction::SetLevel(value) => {
                self.set_level(value);
                Ok(None)
            }
        }
    }

    /// Stores a selection. Can be called from any state.
    ///
    /// From `Idle` or `Ready` this stores the pair and transitions to `Ready`.
    /// While `Running` or `Paused` the renderer is swapped in place and the
    /// animation keeps going, so selections can be cycled live.
    pub fn select(&mut self, selection: Selection) {
        self.selection = Some(selection);

        match self.state {
            EngineState::Running | EngineState::Paused => {
                let elapsed = self.elapsed_now();
                self.activate(selection, elapsed);
            }
            _ => self.state = EngineState::Ready,
        }
    }

    /// Starts the selected animation from the beginning.
    ///
    /// Must be called from `Ready` state. Renders and writes the first frame
    /// immediately.
    ///
    /// # Returns
    /// * `Ok(delay)` - When to service next
    /// * `Err` - Invalid state or no selection stored
    pub fn start(&mut self) -> Result<I::Duration, EngineError> {
        if self.state != EngineState::Ready {
            return Err(EngineError::InvalidState {
                expected: "Ready",
                actual: self.state,
            });
        }

        let selection = match self.selection {
            Some(selection) => selection,
            None => return Err(EngineError::NoSelection),
        };

        self.start_time = Some(self.time_source.now());
        self.next_frame_ms = 0;
        self.state = EngineState::Running;
        self.activate(selection, 0);
        self.service()
    }

    /// Services the engine, rendering a frame if one is due.
    ///
    /// Must be called from `Running` state. When a frame boundary has passed,
    /// the active renderer is stepped once and the strip is updated if the
    /// output changed. Calling early (or repeatedly without time advancing)
    /// is safe and renders nothing.
    ///
    /// # Returns
    /// * `Ok(delay)` - Time until the next frame is due
    /// * `Err` - Invalid state
    pub fn service(&mut self) -> Result<I::Duration, EngineError> {
        if self.state != EngineState::Running {
            return Err(EngineError::InvalidState {
                expected: "Running",
                actual: self.state,
            });
        }

        let start_time = self.start_time.unwrap();
        let current_time = self.time_source.now();
        let elapsed = current_time.duration_since(start_time).as_millis();

        if elapsed < self.next_frame_ms {
            return Ok(I::Duration::from_millis(self.next_frame_ms - elapsed));
        }

        if self.shuffling && elapsed >= self.next_shuffle_ms {
            let draw = Selection::random_non_shuffle(&mut self.rng);
            self.active = draw;
            self.renderer = ModeRenderer::for_mode(draw.mode, &mut self.rng);
            self.active_since_ms = elapsed;
            self.next_shuffle_ms = elapsed + SHUFFLE_DWELL_MS;
        }

        // Renderers see time from their own activation, so a live swap or a
        // shuffle draw starts its animation from phase zero
        let local_elapsed = elapsed.saturating_sub(self.active_since_ms);
        let plan = self.active.color.plan(local_elapsed);

        let mut ctx = RenderContext {
            elapsed_ms: local_elapsed,
            plan,
            level: self.level,
            rng: &mut self.rng,
        };
        self.renderer.render(&mut ctx, &mut self.frame);

        // Update the strip only if the output changed
        let output = self.frame.scaled(self.brightness);
        if output != self.written {
            self.strip.write(&output);
            self.written = output;
        }

        self.next_frame_ms = elapsed - (elapsed % FRAME_INTERVAL_MS) + FRAME_INTERVAL_MS;
        Ok(I::Duration::from_millis(self.next_frame_ms - elapsed))
    }

    /// Stops the animation and turns the strip off.
    ///
    /// The selection is kept and the engine transitions to `Ready`.
    /// Can be called from `Running` or `Paused`.
    pub fn stop(&mut self) -> Result<(), EngineError> {
        match self.state {
            EngineState::Running | EngineState::Paused => {
                self.start_time = None;
                self.pause_start_time = None;
                self.state = EngineState::Ready;

                self.frame.clear();
                self.strip.write(&self.frame);
                self.written = self.frame;

                Ok(())
            }
            _ => Err(EngineError::InvalidState {
                expected: "Running or Paused",
                actual: self.state,
            }),
        }
    }

    /// Pauses the animation, holding the current frame on the strip.
    ///
    /// Must be called from `Running` state.
    pub fn pause(&mut self) -> Result<(), EngineError> {
        if self.state != EngineState::Running {
            return Err(EngineError::InvalidState {
                expected: "Running",
                actual: self.state,
            });
        }

        self.pause_start_time = Some(self.time_source.now());
        self.state = EngineState::Paused;
        Ok(())
    }

    /// Resumes a paused animation, adjusting timing for the pause duration.
    ///
    /// Must be called from `Paused` state.
    pub fn resume(&mut self) -> Result<I::Duration, EngineError> {
        if self.state != EngineState::Paused {
            return Err(EngineError::InvalidState {
                expected: "Paused",
                actual: self.state,
            });
        }

        let pause_start = self.pause_start_time.unwrap();
        let current_time = self.time_source.now();
        let pause_duration = current_time.duration_since(pause_start);

        // Add the pause duration to start time to compensate for the time spent
        // paused. This keeps the animation at the phase it was at when paused.
        // If checked_add returns None (overflow, e.g. a very long pause on a
        // 32-bit timer), fall back to the old start time: the animation jumps
        // forward instead of crashing.
        let old_start = self.start_time.unwrap();
        self.start_time = Some(old_start.checked_add(pause_duration).unwrap_or(old_start));

        self.pause_start_time = None;
        self.state = EngineState::Running;
        self.service()
    }

    /// Clears the selection and turns the strip off.
    ///
    /// Transitions to `Idle`. Can be called from any state.
    pub fn clear(&mut self) {
        self.selection = None;
        self.shuffling = false;
        self.start_time = None;
        self.pause_start_time = None;
        self.state = EngineState::Idle;

        self.frame.clear();
        self.strip.write(&self.frame);
        self.written = self.frame;
    }

    /// Sets the master brightness (clamped to 0.0-1.0).
    ///
    /// Scales every frame at write time without disturbing renderer state.
    /// Takes effect on the next frame the engine writes.
    pub fn set_brightness(&mut self, value: f32) {
        self.brightness = value.clamp(0.0, 1.0);
    }

    /// Feeds the signal level driving [`LedMode::VuMeter`] (clamped to 0.0-1.0).
    ///
    /// Where the level comes from (a microphone envelope, a beat detector,
    /// accelerometer motion) is up to the caller.
    pub fn set_level(&mut self, value: f32) {
        self.level = value.clamp(0.0, 1.0);
    }

    /// Returns the current state of the engine.
    pub fn get_state(&self) -> EngineState {
        self.state
    }

    /// Returns the stored selection, if any.
    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// Returns the selection actually being rendered, if the engine is
    /// running or paused.
    ///
    /// While party shuffle is active this is the current substitute draw,
    /// never [`LedMode::PartyShuffle`] itself.
    pub fn effective_selection(&self) -> Option<Selection> {
        match self.state {
            EngineState::Running | EngineState::Paused => Some(self.active),
            _ => None,
        }
    }

    /// Returns the frame currently displayed on the strip.
    pub fn current_frame(&self) -> &Frame<N> {
        &self.written
    }

    /// Returns the master brightness.
    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    /// Returns the current VU level.
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Returns true if the engine is currently paused.
    pub fn is_paused(&self) -> bool {
        self.state == EngineState::Paused
    }

    /// Returns true if the engine is currently running.
    pub fn is_running(&self) -> bool {
        self.state == EngineState::Running
    }

    /// Returns the elapsed time since the animation started, if running
    pub fn elapsed_time(&self) -> Option<I::Duration> {
        self.start_time.map(|start| {
            let now = self.time_source.now();
            now.duration_since(start)
        })
    }

    /// Swaps the renderer for a new selection, resolving party shuffle into
    /// a concrete draw.
    fn activate(&mut self, selection: Selection, elapsed_ms: u64) {
        self.shuffling = selection.mode == LedMode::PartyShuffle;

        let effective = if self.shuffling {
            self.next_shuffle_ms = elapsed_ms + SHUFFLE_DWELL_MS;
            Selection::random_non_shuffle(&mut self.rng)
        } else {
            selection
        };

        self.active = effective;
        self.renderer = ModeRenderer::for_mode(effective.mode, &mut self.rng);
        self.active_since_ms = elapsed_ms;
    }

    fn elapsed_now(&self) -> u64 {
        match self.start_time {
            Some(start) => {
                // The animation clock freezes at the pause point until
                // resume() folds the pause into start_time. A selection made
                // while paused is stamped against the frozen clock so it does
                // not land in the future and hold at phase zero after resume.
                let reference = match self.pause_start_time {
                    Some(pause_start) => pause_start,
                    None => self.time_source.now(),
                };
                reference.duration_since(start).as_millis()
            }
            None => 0,
        }
    }
}
