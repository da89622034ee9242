//! Status display surface.
//!
//! Items (free lines and `key : value` entries) are buffered and only handed to
//! a [`Viewer`] on [`Telemetry::update`], at most once per refresh interval.

use std::time::{Duration, Instant};

#[cfg(feature = "terminal")]
pub mod terminal;

#[cfg(feature = "terminal")]
pub use terminal::{TerminalSession, TerminalViewer};

/// Default minimum time between transmissions
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_millis(250);

/// Separator between an entry's key and value
const ENTRY_SEPARATOR: &str = " : ";

/// Handle to a `key : value` entry, used to remove it later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryHandle(u64);

/// Operations the program needs from a status display
pub trait Telemetry {
    /// Append a free-standing line of text
    fn add_line(&mut self, text: &str);

    /// Append a `key : value` entry
    fn add_entry(&mut self, key: &str, value: &str) -> EntryHandle;

    /// Remove an entry; returns false if it was already gone
    fn remove_entry(&mut self, handle: EntryHandle) -> bool;

    /// Drop every buffered item
    fn clear(&mut self);

    /// Flush the buffered items to the viewer.
    /// Returns whether anything was transmitted.
    fn update(&mut self) -> bool;

    fn set_refresh_interval(&mut self, interval: Duration);

    /// When on, items are cleared after each transmission
    fn set_auto_clear(&mut self, auto_clear: bool);
}

/// Something that can present rendered telemetry rows
pub trait Viewer {
    fn show(&mut self, rows: &[String]) -> Result<(), anyhow::Error>;
}

#[derive(Debug, Clone)]
enum Item {
    Line(String),
    Entry {
        handle: EntryHandle,
        key: String,
        value: String,
    },
}

/// Buffered [`Telemetry`] implementation that forwards to a [`Viewer`]
pub struct TelemetryBuffer<V: Viewer> {
    viewer: V,
    items: Vec<Item>,
    next_handle: u64,
    refresh_interval: Duration,
    auto_clear: bool,
    last_transmit: Option<Instant>,
}

impl<V: Viewer> TelemetryBuffer<V> {
    pub fn new(viewer: V) -> Self {
        Self {
            viewer,
            items: Vec::new(),
            next_handle: 0,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            auto_clear: true,
            last_transmit: None,
        }
    }

    /// Render the buffered items as display rows
    pub fn rows(&self) -> Vec<String> {
        let mut rows = Vec::new();
        for item in &self.items {
            let text = match item {
                Item::Line(text) => text.clone(),
                Item::Entry { key, value, .. } => format!("{key}{ENTRY_SEPARATOR}{value}"),
            };
            // A trailing newline leaves an empty row, same as a printed line would
            rows.extend(text.split('\n').map(str::to_owned));
        }
        rows
    }

    pub fn viewer(&self) -> &V {
        &self.viewer
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Transmit if the refresh interval allows it at time `now`
    fn update_at(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_transmit {
            if now.saturating_duration_since(last) < self.refresh_interval {
                return false;
            }
        }

        let rows = self.rows();
        if let Err(e) = self.viewer.show(&rows) {
            log::warn!("Telemetry viewer failed: {e:#}");
        }
        self.last_transmit = Some(now);

        if self.auto_clear {
            self.items.clear();
        }
        true
    }
}

impl<V: Viewer> Telemetry for TelemetryBuffer<V> {
    fn add_line(&mut self, text: &str) {
        self.items.push(Item::Line(text.to_owned()));
    }

    fn add_entry(&mut self, key: &str, value: &str) -> EntryHandle {
        let handle = EntryHandle(self.next_handle);
        self.next_handle += 1;
        self.items.push(Item::Entry {
            handle,
            key: key.to_owned(),
            value: value.to_owned(),
        });
        handle
    }

    fn remove_entry(&mut self, handle: EntryHandle) -> bool {
        let before = self.items.len();
        self.items
            .retain(|item| !matches!(item, Item::Entry { handle: h, .. } if *h == handle));
        self.items.len() != before
    }

    fn clear(&mut self) {
        self.items.clear();
    }

    fn update(&mut self) -> bool {
        self.update_at(Instant::now())
    }

    fn set_refresh_interval(&mut self, interval: Duration) {
        self.refresh_interval = interval;
    }

    fn set_auto_clear(&mut self, auto_clear: bool) {
        self.auto_clear = auto_clear;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Capture {
        frames: Vec<Vec<String>>,
    }

    impl Viewer for Capture {
        fn show(&mut self, rows: &[String]) -> Result<(), anyhow::Error> {
            self.frames.push(rows.to_vec());
            Ok(())
        }
    }

    #[test]
    fn test_refresh_interval_throttles_transmission() {
        let mut telemetry = TelemetryBuffer::new(Capture::default());
        telemetry.set_refresh_interval(Duration::from_millis(100));
        telemetry.set_auto_clear(false);
        telemetry.add_line("hello");

        let t0 = Instant::now();
        assert!(telemetry.update_at(t0));
        assert!(!telemetry.update_at(t0 + Duration::from_millis(50)));
        assert!(telemetry.update_at(t0 + Duration::from_millis(100)));
        assert_eq!(telemetry.viewer().frames.len(), 2);
    }

    #[test]
    fn test_throttled_update_keeps_items() {
        let mut telemetry = TelemetryBuffer::new(Capture::default());
        telemetry.set_refresh_interval(Duration::from_secs(1));
        let t0 = Instant::now();
        telemetry.update_at(t0);

        telemetry.add_line("pending");
        assert!(!telemetry.update_at(t0 + Duration::from_millis(10)));
        assert!(!telemetry.is_empty());
    }

    #[test]
    fn test_multiline_text_splits_into_rows() {
        let mut telemetry = TelemetryBuffer::new(Capture::default());
        telemetry.add_line("first\nsecond");
        telemetry.add_entry("key", "value");
        assert_eq!(telemetry.rows(), vec!["first", "second", "key : value"]);
    }

    #[test]
    fn test_failing_viewer_does_not_propagate() {
        struct Broken;
        impl Viewer for Broken {
            fn show(&mut self, _rows: &[String]) -> Result<(), anyhow::Error> {
                Err(anyhow::anyhow!("terminal gone"))
            }
        }

        let mut telemetry = TelemetryBuffer::new(Broken);
        telemetry.add_line("still fine");
        assert!(telemetry.update());
    }
}
