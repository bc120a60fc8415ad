use crate::config::{AspectMode, RenderConfig};

/// Affine map from the visible plane window onto the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    view_min: f64,
    scale_x: f64,
    scale_y: f64,
    offset_x: f64,
    offset_y: f64,
}

impl Viewport {
    pub fn from_config(config: &RenderConfig) -> Self {
        let span = (config.view_max - config.view_min).max(f64::EPSILON);
        let fit_x = config.width / span;
        let fit_y = config.height / span;
        let (scale_x, scale_y) = match config.aspect {
            AspectMode::Stretch => (fit_x, fit_y),
            AspectMode::Meet => (fit_x.min(fit_y), fit_x.min(fit_y)),
            AspectMode::Slice => (fit_x.max(fit_y), fit_x.max(fit_y)),
        };
        Self {
            width: config.width,
            height: config.height,
            view_min: config.view_min,
            scale_x,
            scale_y,
            offset_x: (config.width - span * scale_x) / 2.0,
            offset_y: (config.height - span * scale_y) / 2.0,
        }
    }

    pub fn map(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.offset_x + (x - self.view_min) * self.scale_x,
            self.offset_y + (y - self.view_min) * self.scale_y,
        )
    }

    /// Scales a plane length (radius, stroke width) onto the surface.
    pub fn length(&self, value: f64) -> f64 {
        value * self.scale_x.min(self.scale_y)
    }
}
