//! Single-sound playback arbiter.
//!
//! At most one sound is in flight at a time. The arbiter is `Idle` until a
//! playback is started, and only the completion of that same playback brings
//! it back to `Idle`. Backends report completion through a
//! [`CompletionNotifier`], which posts a message to the arbiter's channel; the
//! owning thread applies it in [`Arbiter::poll_completions`], so every state
//! transition happens on one thread.

use crate::input::GamepadState;
use crate::platform::{PlaySoundParams, SoundBackend};
use crate::sound::{Sound, SoundLibrary};
use crate::telemetry::{EntryHandle, Telemetry};
use std::sync::mpsc::{channel, Receiver, Sender};

/// Identifies one started playback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaybackId(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Playing {
        sound: Sound,
        playback: PlaybackId,
        entry: Option<EntryHandle>,
    },
}

/// One-shot completion signal handed to a backend.
///
/// Calling [`notify`](Self::notify) posts the completion. A notifier that is
/// dropped without being notified (backend error, panicking worker) posts it
/// too, so every started playback completes exactly once.
pub struct CompletionNotifier {
    playback: PlaybackId,
    tx: Option<Sender<PlaybackId>>,
}

impl CompletionNotifier {
    pub fn playback(&self) -> PlaybackId {
        self.playback
    }

    /// Signal that playback finished or was stopped
    pub fn notify(mut self) {
        self.send();
    }

    fn send(&mut self) {
        if let Some(tx) = self.tx.take() {
            // The arbiter may already be gone; nothing left to release then
            let _ = tx.send(self.playback);
        }
    }
}

impl Drop for CompletionNotifier {
    fn drop(&mut self) {
        self.send();
    }
}

pub struct Arbiter {
    library: SoundLibrary,
    volume: f32,
    state: PlaybackState,
    next_playback: u64,
    completion_tx: Sender<PlaybackId>,
    completion_rx: Receiver<PlaybackId>,
}

impl Arbiter {
    pub fn new(library: SoundLibrary) -> Self {
        let (completion_tx, completion_rx) = channel();
        Self {
            library,
            volume: 1.0,
            state: PlaybackState::Idle,
            next_playback: 0,
            completion_tx,
            completion_rx,
        }
    }

    /// Playback volume passed to the backend (clamped to 0.0..=1.0)
    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume.clamp(0.0, 1.0);
        self
    }

    pub fn library(&self) -> &SoundLibrary {
        &self.library
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == PlaybackState::Idle
    }

    pub fn now_playing(&self) -> Option<Sound> {
        match self.state {
            PlaybackState::Playing { sound, .. } => Some(sound),
            PlaybackState::Idle => None,
        }
    }

    /// Pick the sound requested by `input`.
    ///
    /// Simultaneous presses resolve to the earliest sound in [`Sound::ALL`];
    /// sounds without a backing file are never selected.
    pub fn resolve(&self, input: &GamepadState) -> Option<Sound> {
        Sound::ALL
            .into_iter()
            .find(|s| s.trigger().is_pressed(input) && self.library.exists(*s))
    }

    /// Start playing `sound` if the arbiter is idle.
    ///
    /// Returns whether playback was started. Requests while busy, with no
    /// sound, or for a missing file are dropped without queueing.
    pub fn start(
        &mut self,
        sound: Option<Sound>,
        backend: &mut dyn SoundBackend,
        telemetry: &mut dyn Telemetry,
    ) -> bool {
        let Some(sound) = sound else {
            return false;
        };

        if let PlaybackState::Playing { sound: current, .. } = self.state {
            log::debug!("Dropping '{sound}' while '{current}' is playing");
            return false;
        }

        let path = self.library.path(sound);
        if !path.is_file() {
            log::warn!("Sound file '{}' not found", path.display());
            return false;
        }

        let playback = PlaybackId(self.next_playback);
        self.next_playback += 1;

        let entry = telemetry.add_entry("Playing", sound.name());
        self.state = PlaybackState::Playing {
            sound,
            playback,
            entry: Some(entry),
        };
        log::info!("Playing '{}'", path.display());

        let notifier = CompletionNotifier {
            playback,
            tx: Some(self.completion_tx.clone()),
        };
        let params = PlaySoundParams {
            auto_stop: true,
            volume: self.volume,
        };
        backend.play(&path, params, notifier);
        true
    }

    /// Apply every completion posted since the last call.
    /// Returns how many of them moved the arbiter back to idle.
    pub fn poll_completions(&mut self, telemetry: &mut dyn Telemetry) -> usize {
        let mut finished = 0;
        while let Ok(playback) = self.completion_rx.try_recv() {
            if self.on_complete(playback, telemetry) {
                finished += 1;
            }
        }
        finished
    }

    /// Handle the end of `playback`.
    ///
    /// Completions for anything other than the current playback (including
    /// any that arrive while idle) are ignored.
    pub fn on_complete(&mut self, playback: PlaybackId, telemetry: &mut dyn Telemetry) -> bool {
        let (sound, entry) = match self.state {
            PlaybackState::Playing {
                sound,
                playback: current,
                entry,
            } if current == playback => (sound, entry),
            _ => {
                log::debug!("Ignoring stale completion {playback:?}");
                return false;
            }
        };

        self.state = PlaybackState::Idle;
        log::info!("Finished '{sound}'");

        if let Some(entry) = entry {
            telemetry.remove_entry(entry);
        }
        telemetry.clear();
        self.show_menu(telemetry);
        true
    }

    /// Write the instructions and per-sound status lines
    pub fn show_menu(&self, telemetry: &mut dyn Telemetry) {
        telemetry.add_line("Press a gamepad button to play sound\n");

        for sound in Sound::ALL {
            if self.library.exists(sound) {
                telemetry.add_entry(
                    &format!("To play '{sound}'"),
                    &format!("Press {}", sound.trigger().name()),
                );
            } else {
                telemetry.add_entry(sound.name(), "Not Found");
            }
        }
        telemetry.add_line(" ");
    }
}
