//! The partitioned executor.  One scoped thread per band, each handed
//! exclusive ownership of its own rows of the pixel buffer; the
//! threads are joined before the raster is given back to anyone.

use std::ops::Range;
use std::path::Path;
use std::time::Instant;

use bands::bands;
use config::RenderConfig;
use crossbeam;
use error::{MandelError, Result};
use escape::EscapeTime;
use image::{DynamicImage, GrayImage};
use itertools::iproduct;
use planes::{Pixel, PlaneMapper, Viewport};

/// A worker's view of the raster: its rows, and nothing else.
struct Band<'a> {
    index: usize,
    rows: Range<usize>,
    width: usize,
    pixels: &'a mut [u8],
}

impl<'a> Band<'a> {
    /// Rows and columns are in image coordinates.
    #[inline]
    fn set(&mut self, col: usize, row: usize, intensity: u8) {
        let offset = (row - self.rows.start) * self.width + col;
        self.pixels[offset] = intensity;
    }

    /// Row-major, top to bottom, left to right.
    fn paint<F>(&mut self, shade: &F)
    where
        F: Fn(usize, usize) -> u8,
    {
        debug!("worker {} rendering rows {:?}", self.index, self.rows);
        for (row, col) in iproduct!(self.rows.clone(), 0..self.width) {
            let intensity = shade(col, row);
            self.set(col, row, intensity);
        }
    }
}

/// Cut the raster into `workers` bands, each a disjoint mutable slice
/// of whole rows.
fn split_bands(raster: &mut GrayImage, workers: usize) -> Vec<Band<'_>> {
    let width = raster.width() as usize;
    let height = raster.height() as usize;
    let mut rest: &mut [u8] = raster;
    let mut split = Vec::with_capacity(workers);
    for (index, rows) in bands(workers, height).into_iter().enumerate() {
        let remaining = rest;
        let (pixels, tail) = remaining.split_at_mut(rows.len() * width);
        rest = tail;
        split.push(Band {
            index,
            rows,
            width,
            pixels,
        });
    }
    split
}

/// Fill every pixel of `raster` with `shade(col, row)`, using exactly
/// `workers` threads.  All threads are joined before this returns.  If
/// any of them panics the whole render fails with `WorkerFailed`,
/// naming the lowest-numbered worker that went down; if a thread
/// cannot be started at all it fails with `SpawnFailed`.
pub fn render_bands<F>(raster: &mut GrayImage, workers: usize, shade: F) -> Result<()>
where
    F: Fn(usize, usize) -> u8 + Sync,
{
    if workers == 0 {
        return Err(MandelError::invalid_config(
            "at least one worker thread is required",
        ));
    }
    let shade = &shade;
    let split = split_bands(raster, workers);

    let outcome = crossbeam::scope(|spawner| {
        let mut handles = Vec::with_capacity(workers);
        let mut spawn_error = None;
        for mut band in split {
            let index = band.index;
            match spawner.builder().spawn(move |_| band.paint(shade)) {
                Ok(handle) => handles.push((index, handle)),
                Err(err) => {
                    warn!("couldn't start worker {}: {}", index, err);
                    spawn_error = Some(MandelError::spawn_failed(index, &err));
                    break;
                }
            }
        }

        // Workers already running are joined even when a later spawn
        // failed.
        let mut failed = None;
        for (index, handle) in handles {
            if handle.join().is_err() && failed.is_none() {
                failed = Some(MandelError::WorkerFailed { worker: index });
            }
        }
        match spawn_error.or(failed) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    });

    // Every handle is joined above; the scope itself only errs on an
    // unjoined panic.
    match outcome {
        Ok(result) => result,
        Err(_) => Err(MandelError::WorkerFailed { worker: 0 }),
    }
}

/// Render the Mandelbrot set for `viewport` into an existing raster.
pub fn render_into(
    raster: &mut GrayImage,
    viewport: &Viewport,
    max_iterations: usize,
    workers: usize,
) -> Result<()> {
    let evaluator = EscapeTime::new(max_iterations)?;
    let mapper = PlaneMapper::new(raster.width() as usize, raster.height() as usize, *viewport)?;

    let started = Instant::now();
    render_bands(raster, workers, |col, row| {
        evaluator.shade(mapper.pixel_to_point(&Pixel(col, row)))
    })?;
    info!(
        "rendered {}x{} at max={} with {} workers in {:?}",
        mapper.integral_plane.0,
        mapper.integral_plane.1,
        max_iterations,
        workers,
        started.elapsed()
    );
    Ok(())
}

/// Validate `config`, create a raster of the requested size and render
/// into it.
pub fn render(config: &RenderConfig) -> Result<GrayImage> {
    config.validate()?;
    let viewport = config.viewport()?;
    let mut raster = GrayImage::new(config.width as u32, config.height as u32);
    render_into(
        &mut raster,
        &viewport,
        config.max_iterations,
        config.workers,
    )?;
    Ok(raster)
}

/// Write the raster to `path`.  The file format follows the extension.
pub fn save<P: AsRef<Path>>(raster: &GrayImage, path: P) -> Result<()> {
    let path = path.as_ref();
    // Not every encoder accepts 8-bit gray; all of them take RGB.
    let rgb = DynamicImage::ImageLuma8(raster.clone()).to_rgb();
    rgb.save(path).map_err(|err| MandelError::encoding(path, err))
}

#[cfg(test)]
mod tests {
    extern crate tempfile;

    use super::*;
    use image;
    use num::Complex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn small(workers: usize) -> RenderConfig {
        RenderConfig {
            center: Complex::new(0.0, 0.0),
            scale: 4.0,
            width: 4,
            height: 4,
            max_iterations: 10,
            workers,
        }
    }

    #[test]
    fn renders_the_reference_image() {
        let expected: Vec<u8> = vec![
            0, 0,   0,   0,
            0, 0,   25,  0,
            0, 255, 255, 25,
            0, 0,   25,  0,
        ];
        for workers in 1..=6 {
            let raster = render(&small(workers)).unwrap();
            assert_eq!(raster.dimensions(), (4, 4));
            assert_eq!(raster.into_raw(), expected, "{} workers", workers);
        }
    }

    #[test]
    fn worker_count_does_not_change_the_image() {
        let config = RenderConfig {
            center: Complex::new(-0.5, 0.0),
            scale: 1.5,
            width: 97,
            height: 61,
            max_iterations: 200,
            workers: 1,
        };
        let single = render(&config).unwrap();
        let four = render(&RenderConfig { workers: 4, ..config }).unwrap();
        let many = render(&RenderConfig {
            workers: 100,
            ..config
        })
        .unwrap();
        assert_eq!(single.to_vec(), four.to_vec());
        assert_eq!(single.to_vec(), many.to_vec());
    }

    #[test]
    fn every_pixel_is_written_once() {
        let mut raster = GrayImage::new(13, 29);
        for workers in &[1, 2, 3, 7, 29, 40] {
            let seen: Vec<_> = (0..13 * 29)
                .map(|_| AtomicUsize::new(0))
                .collect();
            render_bands(&mut raster, *workers, |col, row| {
                seen[row * 13 + col].fetch_add(1, Ordering::SeqCst);
                (row % 256) as u8
            })
            .unwrap();
            assert!(seen
                .iter()
                .all(|n| n.load(Ordering::SeqCst) == 1));
            for (row, line) in raster.to_vec().chunks(13).enumerate() {
                assert!(line.iter().all(|&p| p == row as u8));
            }
        }
    }

    #[test]
    fn a_panicking_worker_fails_the_render() {
        let mut raster = GrayImage::new(8, 8);
        let result = render_bands(&mut raster, 4, |_, row| {
            if row == 5 {
                panic!("cannot shade row five");
            }
            1
        });
        assert_eq!(result, Err(MandelError::WorkerFailed { worker: 2 }));
    }

    #[test]
    fn hundreds_of_mostly_empty_bands_still_render() {
        let reference = render(&small(1)).unwrap();
        let crowded = render(&small(300)).unwrap();
        assert_eq!(crowded.to_vec(), reference.to_vec());
    }

    #[test]
    fn zero_workers_is_a_config_error() {
        let mut raster = GrayImage::new(4, 4);
        match render_bands(&mut raster, 0, |_, _| 0) {
            Err(MandelError::InvalidConfig { .. }) => (),
            other => panic!("expected InvalidConfig, got {:?}", other),
        }
        assert!(render(&small(0)).is_err());
    }

    #[test]
    fn invalid_configs_render_nothing() {
        let base = small(1);
        for config in &[
            RenderConfig { scale: 0.0, ..base },
            RenderConfig {
                max_iterations: 0,
                ..base
            },
            RenderConfig { width: 0, ..base },
        ] {
            match render(config) {
                Err(MandelError::InvalidConfig { .. }) => (),
                other => panic!("{:?} gave {:?}", config, other),
            }
        }
    }

    #[test]
    fn render_into_rejects_an_empty_raster() {
        let mut raster = GrayImage::new(0, 4);
        let vp = Viewport::new(-1.0, 1.0, -1.0, 1.0).unwrap();
        assert_eq!(
            render_into(&mut raster, &vp, 10, 1),
            Err(MandelError::InvalidDimension {
                width: 0,
                height: 4
            })
        );
    }

    #[test]
    fn saved_image_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let raster = render(&small(2)).unwrap();
        for name in &["mandel.bmp", "mandel.png"] {
            let path = dir.path().join(name);
            save(&raster, &path).unwrap();
            let reloaded = image::open(&path).unwrap().to_rgb();
            assert_eq!(reloaded.dimensions(), raster.dimensions());
            let grays: Vec<u8> = reloaded.to_vec().chunks(3).map(|px| px[0]).collect();
            assert_eq!(grays, raster.to_vec());
            assert!(reloaded
                .to_vec()
                .chunks(3)
                .all(|px| px[0] == px[1] && px[1] == px[2]));
        }
    }

    #[test]
    fn unwritable_path_is_an_encoding_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("mandel.bmp");
        let raster = render(&small(1)).unwrap();
        match save(&raster, &path) {
            Err(MandelError::EncodingFailure { path: p, .. }) => {
                assert!(p.ends_with("mandel.bmp"))
            }
            other => panic!("expected EncodingFailure, got {:?}", other),
        }
    }
}
