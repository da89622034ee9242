//! Keyboard stand-in for the gamepad.
//!
//! Terminals report key presses (and auto-repeats) but never releases, so a
//! trigger counts as held for a short window after its most recent key event.
//! Holding a key keeps the window topped up through auto-repeat.

use super::{GamepadState, InputDevice, Trigger};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

pub struct KeyboardGamepad {
    poll_interval: Duration,
    hold: Duration,
    last_pressed: [Option<Instant>; 5],
    stop: bool,
}

impl KeyboardGamepad {
    pub fn new(poll_interval: Duration, hold: Duration) -> Self {
        Self {
            poll_interval,
            hold,
            last_pressed: [None; 5],
            stop: false,
        }
    }

    /// Key label for each trigger, for help text
    pub fn bindings() -> [(&'static str, Trigger); 5] {
        [
            ("B", Trigger::LeftBumper),
            ("↑", Trigger::DpadUp),
            ("↓", Trigger::DpadDown),
            ("←", Trigger::DpadLeft),
            ("→", Trigger::DpadRight),
        ]
    }

    fn trigger_for(code: KeyCode) -> Option<Trigger> {
        match code {
            KeyCode::Char('b') | KeyCode::Char('B') => Some(Trigger::LeftBumper),
            KeyCode::Up => Some(Trigger::DpadUp),
            KeyCode::Down => Some(Trigger::DpadDown),
            KeyCode::Left => Some(Trigger::DpadLeft),
            KeyCode::Right => Some(Trigger::DpadRight),
            _ => None,
        }
    }

    fn slot(trigger: Trigger) -> usize {
        match trigger {
            Trigger::LeftBumper => 0,
            Trigger::DpadUp => 1,
            Trigger::DpadDown => 2,
            Trigger::DpadLeft => 3,
            Trigger::DpadRight => 4,
        }
    }

    /// Apply one key event at time `now`
    fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.stop = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.stop = true,
            code => {
                if let Some(trigger) = Self::trigger_for(code) {
                    self.last_pressed[Self::slot(trigger)] = Some(now);
                }
            }
        }
    }

    /// Snapshot of the triggers as seen at `now`
    fn state_at(&self, now: Instant) -> GamepadState {
        let mut state = GamepadState::default();
        for trigger in Trigger::ALL {
            let held = self.last_pressed[Self::slot(trigger)]
                .map(|t| now.saturating_duration_since(t) < self.hold)
                .unwrap_or(false);
            state.set(trigger, held);
        }
        state
    }
}

impl InputDevice for KeyboardGamepad {
    fn poll(&mut self) -> Result<GamepadState, anyhow::Error> {
        // Wait up to one poll interval for the first event, then drain the rest
        let mut timeout = self.poll_interval;
        while event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key, Instant::now());
            }
            timeout = Duration::ZERO;
        }
        Ok(self.state_at(Instant::now()))
    }

    fn stop_requested(&self) -> bool {
        self.stop
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_press_is_held_for_window() {
        let mut pad = KeyboardGamepad::new(Duration::from_millis(16), Duration::from_millis(150));
        let t0 = Instant::now();
        pad.handle_key(key(KeyCode::Up), t0);

        assert!(pad.state_at(t0 + Duration::from_millis(100)).dpad_up);
        assert!(!pad.state_at(t0 + Duration::from_millis(200)).dpad_up);
    }

    #[test]
    fn test_bindings_map_to_triggers() {
        let mut pad = KeyboardGamepad::new(Duration::from_millis(16), Duration::from_millis(150));
        let t0 = Instant::now();
        pad.handle_key(key(KeyCode::Char('b')), t0);
        pad.handle_key(key(KeyCode::Right), t0);

        let state = pad.state_at(t0);
        assert!(state.left_bumper);
        assert!(state.dpad_right);
        assert!(!state.dpad_up);
        assert!(!state.dpad_down);
        assert!(!state.dpad_left);
    }

    #[test]
    fn test_quit_keys_request_stop() {
        let mut pad = KeyboardGamepad::new(Duration::from_millis(16), Duration::from_millis(150));
        assert!(!pad.stop_requested());
        pad.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), Instant::now());
        assert!(pad.stop_requested());

        let mut pad = KeyboardGamepad::new(Duration::from_millis(16), Duration::from_millis(150));
        pad.handle_key(key(KeyCode::Esc), Instant::now());
        assert!(pad.stop_requested());
    }

    #[test]
    fn test_unbound_keys_are_ignored() {
        let mut pad = KeyboardGamepad::new(Duration::from_millis(16), Duration::from_millis(150));
        let t0 = Instant::now();
        pad.handle_key(key(KeyCode::Char('x')), t0);
        assert!(!pad.state_at(t0).any_pressed());
        assert!(!pad.stop_requested());
    }
}
