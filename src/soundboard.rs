//! The polling loop: read the gamepad, let the arbiter pick and start a
//! sound, and push the status display.

use crate::arbiter::Arbiter;
use crate::config::SoundboardConfig;
use crate::input::{GamepadState, InputDevice};
use crate::platform::SoundBackend;
use crate::sound::Sound;
use crate::telemetry::Telemetry;

pub struct Soundboard<B: SoundBackend, T: Telemetry> {
    arbiter: Arbiter,
    backend: B,
    telemetry: T,
}

impl<B: SoundBackend, T: Telemetry> Soundboard<B, T> {
    /// Configure the display and draw the initial menu
    pub fn new(arbiter: Arbiter, backend: B, mut telemetry: T, config: &SoundboardConfig) -> Self {
        telemetry.set_refresh_interval(config.refresh_interval);
        telemetry.set_auto_clear(false);
        arbiter.show_menu(&mut telemetry);

        Self {
            arbiter,
            backend,
            telemetry,
        }
    }

    /// One poll iteration. Returns the sound started this tick, if any.
    pub fn tick(&mut self, input: &GamepadState) -> Option<Sound> {
        self.arbiter.poll_completions(&mut self.telemetry);

        let requested = self.arbiter.resolve(input);
        let started = self.arbiter.is_idle()
            && self
                .arbiter
                .start(requested, &mut self.backend, &mut self.telemetry);

        self.telemetry.update();
        if started {
            requested
        } else {
            None
        }
    }

    /// Poll `input` until it asks to stop.
    /// A sound still playing when the loop ends is left to finish on its own.
    pub fn run(&mut self, input: &mut dyn InputDevice) -> Result<(), anyhow::Error> {
        while !input.stop_requested() {
            let state = input.poll()?;
            self.tick(&state);
        }
        log::info!("Stop requested");
        Ok(())
    }

    pub fn arbiter(&self) -> &Arbiter {
        &self.arbiter
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn telemetry(&self) -> &T {
        &self.telemetry
    }
}
