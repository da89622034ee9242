//! The fixed sound catalogue and where its files live on disk

use crate::input::Trigger;
use std::fmt;
use std::path::{Path, PathBuf};

/// Directory the Robot Controller keeps its blocks sounds in
pub const DEFAULT_SOUND_DIR: &str = "/sdcard/FIRST/blocks/sounds/";

/// One of the five system sounds that can be played from the gamepad.
///
/// Declaration order is the selection priority: when several triggers are
/// held at once, the sound declared first wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    Running,
    Connect,
    Disconnect,
    Warning,
    Error,
}

impl Sound {
    /// All sounds in priority order
    pub const ALL: [Sound; 5] = [
        Sound::Running,
        Sound::Connect,
        Sound::Disconnect,
        Sound::Warning,
        Sound::Error,
    ];

    /// Lower-case name, also the file stem
    pub fn name(self) -> &'static str {
        match self {
            Sound::Running => "running",
            Sound::Connect => "connect",
            Sound::Disconnect => "disconnect",
            Sound::Warning => "warning",
            Sound::Error => "error",
        }
    }

    /// The gamepad control that plays this sound
    pub fn trigger(self) -> Trigger {
        match self {
            Sound::Running => Trigger::LeftBumper,
            Sound::Connect => Trigger::DpadUp,
            Sound::Disconnect => Trigger::DpadDown,
            Sound::Warning => Trigger::DpadLeft,
            Sound::Error => Trigger::DpadRight,
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.wav", self.name())
    }
}

impl fmt::Display for Sound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolves sounds to files inside a single directory.
///
/// Existence is checked against the file system on every call, so files
/// copied onto the device while the program runs are picked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundLibrary {
    dir: PathBuf,
}

impl SoundLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of the backing file for `sound`
    pub fn path(&self, sound: Sound) -> PathBuf {
        self.dir.join(sound.file_name())
    }

    /// Whether the backing file for `sound` is present (directories don't count)
    pub fn exists(&self, sound: Sound) -> bool {
        self.path(sound).is_file()
    }

    /// Sounds whose files are present, in priority order
    pub fn available(&self) -> impl Iterator<Item = Sound> + '_ {
        Sound::ALL.into_iter().filter(move |s| self.exists(*s))
    }
}

impl Default for SoundLibrary {
    fn default() -> Self {
        Self::new(DEFAULT_SOUND_DIR)
    }
}
