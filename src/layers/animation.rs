use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
}

impl EasingType {
    /// Apply easing function to a normalized time value (0.0 to 1.0)
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::Linear => t,
            EasingType::EaseIn => t * t * t,
            EasingType::EaseOut => {
                let t = t - 1.0;
                t * t * t + 1.0
            }
            EasingType::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// Where the view is at one instant of a transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewFrame {
    pub center: LatLng,
    pub zoom: f64,
    /// Eased progress in `0.0..=1.0`
    pub progress: f64,
}

/// An animated move of the map view, e.g. a fly-to after a click.
///
/// The map applies the end state immediately; the transition only describes
/// the path so a front end can animate it.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewTransition {
    pub from_center: LatLng,
    pub to_center: LatLng,
    pub from_zoom: f64,
    pub to_zoom: f64,
    pub duration: Duration,
    pub easing: EasingType,
}

impl ViewTransition {
    pub fn new(
        from_center: LatLng,
        to_center: LatLng,
        from_zoom: f64,
        to_zoom: f64,
        duration: Duration,
    ) -> Self {
        Self {
            from_center,
            to_center,
            from_zoom,
            to_zoom,
            duration,
            easing: EasingType::default(),
        }
    }

    pub fn with_easing(mut self, easing: EasingType) -> Self {
        self.easing = easing;
        self
    }

    /// View after `elapsed` time. Past the end (or with a zero duration) this
    /// is the target view.
    pub fn sample(&self, elapsed: Duration) -> ViewFrame {
        if self.duration.is_zero() || elapsed >= self.duration {
            return self.end();
        }

        let progress = self
            .easing
            .apply(elapsed.as_secs_f64() / self.duration.as_secs_f64());
        ViewFrame {
            center: self.from_center.lerp(&self.to_center, progress),
            zoom: self.from_zoom + (self.to_zoom - self.from_zoom) * progress,
            progress,
        }
    }

    pub fn end(&self) -> ViewFrame {
        ViewFrame {
            center: self.to_center,
            zoom: self.to_zoom,
            progress: 1.0,
        }
    }
}
