//! Horizontal bands.  The image is cut into one contiguous run of rows
//! per worker.  Which rows a worker gets depends only on its index,
//! the worker count and the image height, so nothing has to be shared
//! between workers to hand out the work.

use std::ops::Range;

/// Rows rendered by worker `index` of `workers`.  Every band is
/// `height / workers` rows tall except the last, which also takes the
/// remainder so the bands always reach the bottom of the image.  When
/// there are more workers than rows, all but the last band are empty.
///
/// With no workers there is nothing to assign and the band is empty.
pub(crate) fn band(index: usize, workers: usize, height: usize) -> Range<usize> {
    if workers == 0 {
        return 0..0;
    }
    debug_assert!(index < workers);
    let band_height = height / workers;
    let start = band_height * index;
    let end = if index + 1 == workers {
        height
    } else {
        band_height * (index + 1)
    };
    start..end
}

/// All the bands for an image, in worker order.  Consecutive bands
/// abut: the end of one is the start of the next.
pub(crate) fn bands(workers: usize, height: usize) -> Vec<Range<usize>> {
    (0..workers).map(|w| band(w, workers, height)).collect()
}
