use crate::math::Vec2;

/// Formats the point's position as a live coordinate readout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CoordinateReadout {
    /// Digits after the decimal point.
    pub precision: usize,
}

impl CoordinateReadout {
    pub fn new(precision: usize) -> Self {
        Self { precision }
    }

    /// `"X: 1.00  Y: -2.50"` at the default precision.
    pub fn format(&self, position: Vec2) -> String {
        let p = self.precision;
        format!(
            "X: {:.p$}  Y: {:.p$}",
            tidy(position.x, p),
            tidy(position.y, p),
            p = p
        )
    }
}

impl Default for CoordinateReadout {
    fn default() -> Self {
        Self { precision: 2 }
    }
}

// Values that round to zero would otherwise print as "-0.00".
fn tidy(value: f32, precision: usize) -> f32 {
    let scale = 10f32.powi(precision.min(38) as i32);
    if value == 0.0 || (value * scale).round() == 0.0 {
        0.0
    } else {
        value
    }
}
