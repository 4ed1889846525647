//! Presentation of the point's position.
//!
//! The engine hands every new position to a set of [`PositionRenderer`]s.
//! The movement core itself never sees a renderer.

mod log_renderer;
mod title;

use anyhow::Result;
use winit::window::Window;

use crate::math::Vec2;

pub use log_renderer::LogRenderer;
pub use title::TitleRenderer;

/// Everything a renderer gets for one frame.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    pub position: Vec2,
    /// Preformatted coordinate readout for `position`.
    pub readout: &'a str,
    /// The demo window, once it exists.
    pub window: Option<&'a Window>,
}

impl<'a> Frame<'a> {
    /// A frame with no window attached (tests, headless runs).
    pub fn detached(position: Vec2, readout: &'a str) -> Self {
        Self {
            position,
            readout,
            window: None,
        }
    }
}

/// Displays the point's position.
pub trait PositionRenderer {
    /// Called once per frame after the position has been updated.
    fn render(&mut self, frame: &Frame<'_>) -> Result<()>;
}

/// Render `frame` with each renderer in order, stopping at the first error.
pub fn render_all(renderers: &mut [Box<dyn PositionRenderer>], frame: &Frame<'_>) -> Result<()> {
    for renderer in renderers.iter_mut() {
        renderer.render(frame)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::{cell::RefCell, rc::Rc};

    use anyhow::anyhow;

    struct Recorder(Rc<RefCell<Vec<(&'static str, Vec2)>>>, &'static str);

    impl PositionRenderer for Recorder {
        fn render(&mut self, frame: &Frame<'_>) -> Result<()> {
            self.0.borrow_mut().push((self.1, frame.position));
            Ok(())
        }
    }

    struct Failing;

    impl PositionRenderer for Failing {
        fn render(&mut self, _frame: &Frame<'_>) -> Result<()> {
            Err(anyhow!("display went away"))
        }
    }

    #[test]
    fn render_all_fans_out_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut renderers: Vec<Box<dyn PositionRenderer>> = vec![
            Box::new(Recorder(log.clone(), "first")),
            Box::new(LogRenderer::new()),
            Box::new(Recorder(log.clone(), "second")),
        ];
        let p = Vec2::new(1.0, 2.0);
        let frame = Frame::detached(p, "X: 1.00  Y: 2.00");
        render_all(&mut renderers, &frame).unwrap();

        assert_eq!(*log.borrow(), vec![("first", p), ("second", p)]);
    }

    #[test]
    fn render_all_stops_on_error() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut renderers: Vec<Box<dyn PositionRenderer>> =
            vec![Box::new(Failing), Box::new(Recorder(log.clone(), "after"))];
        let frame = Frame::detached(Vec2::ZERO, "X: 0.00  Y: 0.00");
        assert!(render_all(&mut renderers, &frame).is_err());
        assert!(log.borrow().is_empty());
    }
}
