use anyhow::Result;

use super::{Frame, PositionRenderer};

/// Logs the coordinate readout whenever it changes.
#[derive(Debug, Default)]
pub struct LogRenderer {
    last: Option<String>,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// The last readout that was logged, if any.
    pub fn last_readout(&self) -> Option<&str> {
        self.last.as_deref()
    }

    /// Record `readout` and report whether it differs from the previous one.
    fn observe(&mut self, readout: &str) -> bool {
        if self.last.as_deref() == Some(readout) {
            return false;
        }
        self.last = Some(readout.to_owned());
        true
    }
}

impl PositionRenderer for LogRenderer {
    fn render(&mut self, frame: &Frame<'_>) -> Result<()> {
        if self.observe(frame.readout) {
            log::info!("{}", frame.readout);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec2;

    #[test]
    fn only_changes_are_observed() {
        let mut renderer = LogRenderer::new();
        assert!(renderer.observe("X: 0.00  Y: 0.00"));
        assert!(!renderer.observe("X: 0.00  Y: 0.00"));
        assert!(renderer.observe("X: 0.00  Y: 1.00"));
        assert_eq!(renderer.last_readout(), Some("X: 0.00  Y: 1.00"));
    }

    #[test]
    fn render_tracks_last_readout() {
        let mut renderer = LogRenderer::new();
        renderer
            .render(&Frame::detached(Vec2::new(0.5, 0.0), "X: 0.50  Y: 0.00"))
            .unwrap();
        assert_eq!(renderer.last_readout(), Some("X: 0.50  Y: 0.00"));
    }
}
