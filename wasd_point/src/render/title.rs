use anyhow::Result;

use super::{Frame, PositionRenderer};

/// Shows the coordinate readout in the window title.
#[derive(Debug)]
pub struct TitleRenderer {
    base: String,
    current: Option<String>,
}

impl TitleRenderer {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            current: None,
        }
    }

    /// Full window title for a readout.
    pub fn title_for(&self, readout: &str) -> String {
        format!("{} | {}", self.base, readout)
    }

    /// The title most recently pushed to the window.
    pub fn current_title(&self) -> Option<&str> {
        self.current.as_deref()
    }
}

impl PositionRenderer for TitleRenderer {
    fn render(&mut self, frame: &Frame<'_>) -> Result<()> {
        let Some(window) = frame.window else {
            return Ok(());
        };

        let title = self.title_for(frame.readout);
        if self.current.as_deref() != Some(title.as_str()) {
            window.set_title(&title);
            self.current = Some(title);
        }
        Ok(())
    }
}
