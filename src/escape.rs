//! The escape-time evaluator.  This is our classic iterator function:
//! how many times can we square a point and add it back to itself
//! before it leaves the circle of radius two?

use error::{MandelError, Result};
use num::{clamp, Complex};

/// Squared escape radius.  Anything farther than 2 from the origin is
/// guaranteed to run off to infinity.
pub const ESCAPE_NORM_SQR: f64 = 4.0;

/// Count the iterations of `z = z * z + c`, starting at `z = c`, until
/// `|z|^2` exceeds four or `max` iterations have been spent.  The
/// result is always within `0..=max`; a point that is already outside
/// the circle scores zero, a point in the set scores `max`.
#[inline]
pub fn iterations_at(c: Complex<f64>, max: usize) -> usize {
    let mut z = c;
    let mut iter = 0;
    while z.norm_sqr() <= ESCAPE_NORM_SQR && iter < max {
        z = z * z + c;
        iter += 1;
    }
    iter
}

/// Scale an iteration count to gray, with `max` mapping to white.
/// The division truncates, so `max - 1` iterations never reach 255.
pub fn iteration_to_gray(count: usize, max: usize) -> Result<u8> {
    if max == 0 {
        return Err(MandelError::invalid_config(
            "maximum iterations must be at least 1",
        ));
    }
    Ok(gray(count, max))
}

#[inline]
fn gray(count: usize, max: usize) -> u8 {
    clamp(255 * count as u64 / max as u64, 0, 255) as u8
}

/// An evaluator bound to a validated iteration limit, so the per-pixel
/// path has no error to check.
#[derive(Copy, Clone, Debug)]
pub struct EscapeTime {
    max: usize,
}

impl EscapeTime {
    /// Requires a limit of at least one iteration.
    pub fn new(max: usize) -> Result<Self> {
        if max == 0 {
            return Err(MandelError::invalid_config(
                "maximum iterations must be at least 1",
            ));
        }
        Ok(EscapeTime { max })
    }

    /// The iteration limit.
    pub fn max(&self) -> usize {
        self.max
    }

    /// Iterations spent at `c`, in `0..=max`.
    #[inline]
    pub fn iterations(&self, c: Complex<f64>) -> usize {
        iterations_at(c, self.max)
    }

    /// The gray level for the point `c`.
    #[inline]
    pub fn shade(&self, c: Complex<f64>) -> u8 {
        gray(self.iterations(c), self.max)
    }
}
