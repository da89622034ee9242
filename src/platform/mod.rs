//! Platform abstraction for sound playback
//! This module provides a unified interface for playing sound files
//! (native CPAL output, test doubles, etc.)

use crate::arbiter::CompletionNotifier;
use std::path::Path;

/// How a single sound should be played
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaySoundParams {
    /// Release the output stream as soon as the clip has played out.
    /// When false the stream stays open (silent) until the backend is dropped.
    pub auto_stop: bool,
    /// Linear gain, 0.0 to 1.0
    pub volume: f32,
}

impl Default for PlaySoundParams {
    fn default() -> Self {
        Self {
            auto_stop: true,
            volume: 1.0,
        }
    }
}

/// Trait for platform-specific sound playback implementations
pub trait SoundBackend {
    /// Start playing the file at `path` and return immediately.
    ///
    /// Implementations must eventually notify `on_complete` exactly once, from
    /// any thread, when playback finishes or is stopped. Dropping the notifier
    /// counts as notifying, so failures only need to let it go.
    fn play(&mut self, path: &Path, params: PlaySoundParams, on_complete: CompletionNotifier);
}

// Platform-specific implementations
#[cfg(feature = "native")]
pub mod wav;

#[cfg(feature = "native")]
pub mod cpal_output;

#[cfg(feature = "native")]
pub use self::cpal_output::CpalBackend;
