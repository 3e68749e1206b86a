#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`LedColor`**: The closed set of selectable colors - seven concrete hues plus the behavioral `Sequential` and `Multi`
//! - **`LedMode`**: The closed set of animation modes, from `Scan` to `PartyShuffle`
//! - **`Selection`**: One mode paired with one color; `Selection::from_raw` validates the stored byte encoding
//! - **`Frame`**: Per-LED color buffer the engine renders into each tick
//! - **`BadgeEngine`**: Drives a strip of LEDs through the selected animation
//! - **`LedStrip`**: Trait to implement for your strip hardware
//! - **`TimeSource`**: Trait to implement for your timing system
//! - **`EngineAction`**: Commands that can be sent to control the engine
//!
//! The library uses `Srgb<f32>` (0.0-1.0 range) for all color operations.
//! When implementing `LedStrip` for your hardware, convert these values to your
//! device's native format (e.g., 8-bit integers, PWM duty cycles).

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod color;
pub mod mode;
pub mod selection;
pub mod frame;
pub mod time;
mod animation;
pub mod engine;
pub mod command;

pub use color::{ColorPlan, InvalidColor, LedColor};
pub use mode::{InvalidMode, LedMode};
pub use selection::{Selection, SelectionError};
pub use frame::Frame;
pub use time::{TimeDuration, TimeInstant, TimeSource};
pub use engine::{
    BadgeEngine, EngineError, EngineState, FRAME_INTERVAL_MS, LedStrip, SHUFFLE_DWELL_MS,
};
pub use command::EngineAction;

pub const COLOR_OFF: Srgb = Srgb::new(0.0, 0.0, 0.0);
