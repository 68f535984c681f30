use crate::{core::viewport::Viewport, ui::controls::ControlPosition};
use serde::{Deserialize, Serialize};

/// Metric scale bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleControl {
    pub position: ControlPosition,
    /// Longest the bar may get, in pixels
    pub max_width: f64,
}

impl Default for ScaleControl {
    fn default() -> Self {
        Self {
            position: ControlPosition::BottomRight,
            max_width: 100.0,
        }
    }
}

/// What the scale bar shows for one view
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleReading {
    pub label: String,
    pub meters: f64,
    pub width_px: f64,
}

impl ScaleControl {
    pub fn new(position: ControlPosition) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Picks the longest round distance that fits in `max_width` at the
    /// viewport's center latitude
    pub fn measure(&self, viewport: &Viewport) -> ScaleReading {
        let max_meters = viewport.meters_per_pixel() * self.max_width;
        let meters = round_down(max_meters);
        let width_px = if max_meters > 0.0 {
            (self.max_width * meters / max_meters).round()
        } else {
            0.0
        };

        ScaleReading {
            label: label_for(meters),
            meters,
            width_px,
        }
    }
}

/// Rounds down to 1, 2, 3 or 5 times a power of ten
fn round_down(value: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        return 0.0;
    }
    let pow10 = 10f64.powi(value.log10().floor() as i32);
    let d = value / pow10;
    let d = if d >= 10.0 {
        10.0
    } else if d >= 5.0 {
        5.0
    } else if d >= 3.0 {
        3.0
    } else if d >= 2.0 {
        2.0
    } else {
        1.0
    };
    pow10 * d
}

fn label_for(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{} m", meters)
    } else {
        format!("{} km", meters / 1000.0)
    }
}
