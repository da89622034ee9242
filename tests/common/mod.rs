// Shared fakes for the integration tests

#![allow(dead_code)]

use playsounds::{
    CompletionNotifier, GamepadState, InputDevice, PlaySoundParams, Sound, SoundBackend, Viewer,
};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

/// Backend that records every play request and holds the notifiers
#[derive(Default)]
pub struct RecordingBackend {
    pub played: Vec<(PathBuf, PlaySoundParams)>,
    pub pending: Vec<CompletionNotifier>,
}

impl RecordingBackend {
    /// Finish the oldest outstanding playback
    pub fn finish_next(&mut self) {
        let notifier = self.pending.remove(0);
        notifier.notify();
    }
}

impl SoundBackend for RecordingBackend {
    fn play(&mut self, path: &Path, params: PlaySoundParams, on_complete: CompletionNotifier) {
        self.played.push((path.to_path_buf(), params));
        self.pending.push(on_complete);
    }
}

/// Viewer that keeps every transmitted frame
#[derive(Default)]
pub struct RecordingViewer {
    pub frames: Vec<Vec<String>>,
}

impl RecordingViewer {
    pub fn last(&self) -> &[String] {
        self.frames.last().map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Viewer for RecordingViewer {
    fn show(&mut self, rows: &[String]) -> Result<(), anyhow::Error> {
        self.frames.push(rows.to_vec());
        Ok(())
    }
}

/// Input that replays a fixed list of snapshots, then asks to stop
pub struct ScriptedInput {
    script: VecDeque<GamepadState>,
}

impl ScriptedInput {
    pub fn new(script: Vec<GamepadState>) -> Self {
        Self {
            script: script.into(),
        }
    }
}

impl InputDevice for ScriptedInput {
    fn poll(&mut self) -> Result<GamepadState, anyhow::Error> {
        Ok(self.script.pop_front().unwrap_or_default())
    }

    fn stop_requested(&self) -> bool {
        self.script.is_empty()
    }
}

/// Fresh sound directory containing files for `sounds`
pub fn sound_dir(test_name: &str, sounds: &[Sound]) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "playsounds-test-{}-{}",
        std::process::id(),
        test_name
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    for sound in sounds {
        std::fs::write(dir.join(sound.file_name()), b"RIFF").unwrap();
    }
    dir
}
