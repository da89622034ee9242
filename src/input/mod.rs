//! Gamepad triggers and the input devices that report them

#[cfg(feature = "terminal")]
pub mod keyboard;

#[cfg(feature = "terminal")]
pub use keyboard::KeyboardGamepad;

/// A named boolean control on the gamepad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    LeftBumper,
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
}

impl Trigger {
    pub const ALL: [Trigger; 5] = [
        Trigger::LeftBumper,
        Trigger::DpadUp,
        Trigger::DpadDown,
        Trigger::DpadLeft,
        Trigger::DpadRight,
    ];

    /// Control name as shown to the driver
    pub fn name(self) -> &'static str {
        match self {
            Trigger::LeftBumper => "LEFT_BUMPER",
            Trigger::DpadUp => "DPAD_UP",
            Trigger::DpadDown => "DPAD_DOWN",
            Trigger::DpadLeft => "DPAD_LEFT",
            Trigger::DpadRight => "DPAD_RIGHT",
        }
    }

    /// Read this trigger out of a snapshot
    pub fn is_pressed(self, state: &GamepadState) -> bool {
        match self {
            Trigger::LeftBumper => state.left_bumper,
            Trigger::DpadUp => state.dpad_up,
            Trigger::DpadDown => state.dpad_down,
            Trigger::DpadLeft => state.dpad_left,
            Trigger::DpadRight => state.dpad_right,
        }
    }
}

/// Snapshot of every trigger, taken once per poll
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GamepadState {
    pub left_bumper: bool,
    pub dpad_up: bool,
    pub dpad_down: bool,
    pub dpad_left: bool,
    pub dpad_right: bool,
}

impl GamepadState {
    /// Builder-style press, handy for scripting input
    pub fn press(mut self, trigger: Trigger) -> Self {
        self.set(trigger, true);
        self
    }

    pub fn set(&mut self, trigger: Trigger, pressed: bool) {
        let field = match trigger {
            Trigger::LeftBumper => &mut self.left_bumper,
            Trigger::DpadUp => &mut self.dpad_up,
            Trigger::DpadDown => &mut self.dpad_down,
            Trigger::DpadLeft => &mut self.dpad_left,
            Trigger::DpadRight => &mut self.dpad_right,
        };
        *field = pressed;
    }

    pub fn any_pressed(&self) -> bool {
        Trigger::ALL.iter().any(|t| t.is_pressed(self))
    }
}

/// Source of gamepad snapshots for the polling loop
pub trait InputDevice {
    /// Read the current state of all triggers.
    /// May block for up to one poll interval waiting for input.
    fn poll(&mut self) -> Result<GamepadState, anyhow::Error>;

    /// Whether the operator asked the loop to stop
    fn stop_requested(&self) -> bool;
}
