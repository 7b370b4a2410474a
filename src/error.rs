// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The errors a render can fail with.  Every one of them is reported
//! to the caller before, or instead of, an image; we never hand back a
//! half-painted raster.

use std::fmt::Display;
use std::io;
use std::path::Path;

/// Everything that can go wrong between reading a configuration and
/// writing the finished image to disk.
#[derive(Debug, Fail, PartialEq)]
pub enum MandelError {
    /// A configuration value was out of range: a non-positive scale,
    /// an empty image, zero iterations, or zero workers.
    #[fail(display = "invalid configuration: {}", reason)]
    InvalidConfig {
        /// What was wrong with it.
        reason: String,
    },

    /// The integral plane has no area, so there is nothing to map.
    #[fail(display = "invalid image dimensions {}x{}", width, height)]
    InvalidDimension {
        /// Requested width in pixels.
        width: usize,
        /// Requested height in pixels.
        height: usize,
    },

    /// The image could not be written.
    #[fail(display = "couldn't write to {}: {}", path, reason)]
    EncodingFailure {
        /// Where we tried to write.
        path: String,
        /// The underlying I/O or encoder message.
        reason: String,
    },

    /// The operating system refused to start a worker thread.
    #[fail(display = "couldn't start worker {}: {}", worker, reason)]
    SpawnFailed {
        /// Index of the worker that could not be started.
        worker: usize,
        /// The underlying I/O message.
        reason: String,
    },

    /// A worker thread failed or panicked; the raster is incomplete.
    #[fail(display = "worker {} failed to render its band", worker)]
    WorkerFailed {
        /// Index of the first worker found to have failed.
        worker: usize,
    },
}

impl MandelError {
    pub(crate) fn invalid_config<S: Into<String>>(reason: S) -> Self {
        MandelError::InvalidConfig {
            reason: reason.into(),
        }
    }

    pub(crate) fn encoding<E: Display>(path: &Path, reason: E) -> Self {
        MandelError::EncodingFailure {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn spawn_failed(worker: usize, err: &io::Error) -> Self {
        MandelError::SpawnFailed {
            worker,
            reason: err.to_string(),
        }
    }
}

/// Shorthand used throughout the crate.
pub type Result<T> = ::std::result::Result<T, MandelError>;
