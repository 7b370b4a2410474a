//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and a rectangle on the complex plane (the Viewport).  Column zero
//! of the image sits on `xmin`, row zero on `ymin`.
use error::{MandelError, Result};
use num::Complex;

/// Describes the width and height of an integral plane that is assumed
/// to start at 0,0.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralPlane(pub usize, pub usize);

/// Describes the x, y (column, row) of a pixel on the integral plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// The rectangle of the complex plane that gets stretched over the
/// image.  Once built it is never modified; every worker reads the
/// same one.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Real part of the left edge.
    pub xmin: f64,
    /// Real part of the right edge.
    pub xmax: f64,
    /// Imaginary part of the top row.
    pub ymin: f64,
    /// Imaginary part of the bottom row.
    pub ymax: f64,
}

impl Viewport {
    /// Builds a viewport from its four edges.  The edges must be
    /// finite and each minimum strictly below its maximum.
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Result<Viewport> {
        if !(xmin.is_finite() && xmax.is_finite() && ymin.is_finite() && ymax.is_finite()) {
            return Err(MandelError::invalid_config(
                "viewport edges must be finite numbers",
            ));
        }
        if xmin >= xmax {
            return Err(MandelError::invalid_config(format!(
                "xmin {} is not to the left of xmax {}",
                xmin, xmax
            )));
        }
        if ymin >= ymax {
            return Err(MandelError::invalid_config(format!(
                "ymin {} is not below ymax {}",
                ymin, ymax
            )));
        }
        Ok(Viewport {
            xmin,
            xmax,
            ymin,
            ymax,
        })
    }

    /// Derives the viewport from a center point and a scale, where the
    /// scale is the half-width (and half-height) of the square region.
    pub fn from_center(center: Complex<f64>, scale: f64) -> Result<Viewport> {
        if !(scale > 0.0) || !scale.is_finite() {
            return Err(MandelError::invalid_config(format!(
                "scale must be a positive number, got {}",
                scale
            )));
        }
        Viewport::new(
            center.re - scale,
            center.re + scale,
            center.im - scale,
            center.im + scale,
        )
    }

    /// Horizontal extent on the complex plane.
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    /// Vertical extent on the complex plane.
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }
}

/// Maps pixels of an integral plane onto a viewport.
#[derive(Copy, Clone, Debug)]
pub struct PlaneMapper {
    /// Width and height of the image in pixels.
    pub integral_plane: IntegralPlane,
    /// The region of the complex plane covered by the image.
    pub viewport: Viewport,
    // Width and height of the viewport, cached so every pixel doesn't
    // redo the subtraction.
    span: (f64, f64),
}

impl PlaneMapper {
    /// Constructor.  An image with no rows or no columns cannot be
    /// mapped, and is rejected here rather than producing a division
    /// by zero later.
    pub fn new(width: usize, height: usize, viewport: Viewport) -> Result<PlaneMapper> {
        if width == 0 || height == 0 {
            return Err(MandelError::InvalidDimension { width, height });
        }
        Ok(PlaneMapper {
            integral_plane: IntegralPlane(width, height),
            viewport,
            span: (viewport.width(), viewport.height()),
        })
    }

    /// Given a pixel on the integral plane, return the point on the
    /// complex plane it stands for.
    #[inline]
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            self.viewport.xmin + (pixel.0 as f64) * self.span.0 / (self.integral_plane.0 as f64),
            self.viewport.ymin + (pixel.1 as f64) * self.span.1 / (self.integral_plane.1 as f64),
        )
    }
}

/// One-shot form of `PlaneMapper::pixel_to_point`, taking the row
/// first the way the rest of the renderer walks the image.
pub fn map(
    row: usize,
    col: usize,
    width: usize,
    height: usize,
    viewport: &Viewport,
) -> Result<Complex<f64>> {
    let mapper = PlaneMapper::new(width, height, *viewport)?;
    Ok(mapper.pixel_to_point(&Pixel(col, row)))
}
