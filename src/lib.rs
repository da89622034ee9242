//! Gamepad soundboard: press a button, hear one of five system sounds.
//!
//! The [`arbiter`] guarantees at most one sound plays at a time; the
//! [`soundboard`] loop feeds it gamepad snapshots and keeps the status
//! display current.

pub mod arbiter;
pub mod config;
pub mod input;
pub mod sound;
pub mod soundboard;
pub mod telemetry;
pub mod utils;

// Platform abstraction layer
pub mod platform;

pub use arbiter::{Arbiter, CompletionNotifier, PlaybackId, PlaybackState};
pub use config::SoundboardConfig;
pub use input::{GamepadState, InputDevice, Trigger};
pub use platform::{PlaySoundParams, SoundBackend};
pub use sound::{Sound, SoundLibrary};
pub use soundboard::Soundboard;
pub use telemetry::{EntryHandle, Telemetry, TelemetryBuffer, Viewer};
