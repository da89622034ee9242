use super::Viewer;
use crossterm::{
    cursor, execute, queue,
    style::Print,
    terminal::{self, disable_raw_mode, enable_raw_mode, Clear, ClearType},
};
use std::io::{self, Write};

/// Raw-mode, alternate-screen terminal for the lifetime of the guard.
/// The terminal is restored on drop, including on early returns.
pub struct TerminalSession {
    _private: (),
}

impl TerminalSession {
    pub fn enter() -> Result<Self, anyhow::Error> {
        enable_raw_mode()?;
        execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(Self { _private: () })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Full-screen telemetry renderer on stdout
pub struct TerminalViewer<W: Write = io::Stdout> {
    out: W,
    title: String,
    footer: Vec<String>,
    last_rows: Option<Vec<String>>,
}

impl TerminalViewer<io::Stdout> {
    pub fn stdout(title: impl Into<String>) -> Self {
        Self::new(io::stdout(), title)
    }
}

impl<W: Write> TerminalViewer<W> {
    pub fn new(out: W, title: impl Into<String>) -> Self {
        Self {
            out,
            title: title.into(),
            footer: Vec::new(),
            last_rows: None,
        }
    }

    /// Help lines drawn under the telemetry rows
    pub fn with_footer(mut self, footer: Vec<String>) -> Self {
        self.footer = footer;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Viewer for TerminalViewer<W> {
    fn show(&mut self, rows: &[String]) -> Result<(), anyhow::Error> {
        // Redrawing an identical frame only causes flicker
        if self.last_rows.as_deref() == Some(rows) {
            return Ok(());
        }

        queue!(self.out, Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        queue!(self.out, Print(format!("=== {} ===\r\n\r\n", self.title)))?;
        for row in rows {
            queue!(self.out, Print(row), Print("\r\n"))?;
        }
        if !self.footer.is_empty() {
            queue!(self.out, Print("\r\n"))?;
            for line in &self.footer {
                queue!(self.out, Print(line), Print("\r\n"))?;
            }
        }
        self.out.flush()?;

        self.last_rows = Some(rows.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_frames_are_drawn_once() {
        let mut viewer = TerminalViewer::new(Vec::new(), "Play Sounds");
        let rows = vec!["running : Not Found".to_string()];

        viewer.show(&rows).unwrap();
        let first_len = viewer.out.len();
        viewer.show(&rows).unwrap();
        assert_eq!(viewer.out.len(), first_len);

        let output = String::from_utf8_lossy(&viewer.into_inner()).into_owned();
        assert!(output.contains("=== Play Sounds ==="));
        assert!(output.contains("running : Not Found"));
    }

    #[test]
    fn test_footer_is_drawn() {
        let mut viewer = TerminalViewer::new(Vec::new(), "Play Sounds")
            .with_footer(vec!["Q / Esc = quit".to_string()]);
        viewer.show(&[]).unwrap();
        let output = String::from_utf8_lossy(&viewer.into_inner()).into_owned();
        assert!(output.contains("Q / Esc = quit"));
    }
}
