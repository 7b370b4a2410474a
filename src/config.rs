//! The parameters of a single render.  A RenderConfig is built once,
//! checked once, and then only ever read.

use error::{MandelError, Result};
use num::Complex;
use planes::Viewport;

/// Everything the renderer needs to know to paint an image.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// The point of the complex plane at the middle of the image.
    pub center: Complex<f64>,
    /// Half the width (and height) of the region being rendered.
    pub scale: f64,
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// Iterations spent on a point before it is declared in the set.
    pub max_iterations: usize,
    /// Number of worker threads, and so of horizontal bands.
    pub workers: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            center: Complex::new(0.0, 0.0),
            scale: 4.0,
            width: 500,
            height: 500,
            max_iterations: 1000,
            workers: 1,
        }
    }
}

impl RenderConfig {
    /// Check every value before any work is started.
    pub fn validate(&self) -> Result<()> {
        if !(self.scale > 0.0) || !self.scale.is_finite() {
            return Err(MandelError::invalid_config(format!(
                "scale must be a positive number, got {}",
                self.scale
            )));
        }
        if !(self.center.re.is_finite() && self.center.im.is_finite()) {
            return Err(MandelError::invalid_config(
                "center must be a finite point",
            ));
        }
        if self.width == 0 || self.height == 0 {
            return Err(MandelError::invalid_config(format!(
                "image must be at least 1x1 pixels, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > u32::max_value() as usize || self.height > u32::max_value() as usize {
            return Err(MandelError::invalid_config(format!(
                "image {}x{} is too large",
                self.width, self.height
            )));
        }
        if self.max_iterations == 0 {
            return Err(MandelError::invalid_config(
                "maximum iterations must be at least 1",
            ));
        }
        if self.workers == 0 {
            return Err(MandelError::invalid_config(
                "at least one worker thread is required",
            ));
        }
        Ok(())
    }

    /// The region of the complex plane this configuration looks at.
    pub fn viewport(&self) -> Result<Viewport> {
        Viewport::from_center(self.center, self.scale)
    }
}
