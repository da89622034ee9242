use crate::sound::DEFAULT_SOUND_DIR;
use std::path::PathBuf;
use std::time::Duration;

/// Runtime settings for the soundboard loop
#[derive(Debug, Clone, PartialEq)]
pub struct SoundboardConfig {
    /// Directory holding `running.wav`, `connect.wav`, ...
    pub sound_dir: PathBuf,
    /// Minimum time between display transmissions
    pub refresh_interval: Duration,
    /// How long one input poll may wait for events
    pub poll_interval: Duration,
    /// How long a keyboard press counts as a held button
    pub key_hold: Duration,
    /// Playback volume, 0.0 to 1.0
    pub volume: f32,
}

impl Default for SoundboardConfig {
    fn default() -> Self {
        Self {
            sound_dir: PathBuf::from(DEFAULT_SOUND_DIR),
            refresh_interval: Duration::from_millis(10),
            poll_interval: Duration::from_millis(16),
            key_hold: Duration::from_millis(150),
            volume: 1.0,
        }
    }
}
