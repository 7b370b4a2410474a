#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer
//!
//! The Mandelbrot set is the set of points `c` on the complex plane
//! for which the recurrence `z = z * z + c` stays bounded.  For every
//! pixel of the output image we find the matching point, iterate the
//! recurrence until it escapes the circle of radius two (or we give
//! up), and paint the pixel with a shade of gray proportional to how
//! long it held out.  Points that never escape are painted white.
//!
//! The image is cut into horizontal bands, one per worker thread.
//! Each worker owns a disjoint slice of the pixel buffer, so the
//! threads never need to talk to each other while they work.

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate image;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;

mod bands;
pub mod config;
pub mod error;
pub mod escape;
pub mod planes;
pub mod render;

pub use config::RenderConfig;
pub use error::{MandelError, Result};
pub use planes::{PlaneMapper, Viewport};
pub use render::{render, render_into, save};
