//! Partition a profile spectrum into contiguous runs of signal.
//!
//! TOF instruments sample m/z with a spacing that grows with the square root of
//! m/z and drop long stretches of empty signal entirely, so two samples further
//! apart than the widest spacing seen at the high m/z end of the scan belong to
//! different runs of signal.
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::spectrum::ProfileSpectrum;

/// The gap threshold used when a spectrum has no positive-to-zero transition
pub const DEFAULT_MAX_GAP: f64 = 0.1;

/// Regions must hold strictly more samples than this to be kept
pub const MIN_REGION_SAMPLES: usize = 2;

/// A half-open range of sample indices `[start, end)` holding one run of signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Region {
    pub start: usize,
    pub end: usize,
}

impl Region {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    /// The index of the last sample in the region
    #[inline]
    pub fn last(&self) -> usize {
        self.end - 1
    }

    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }

    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for Region {
    fn from(value: Range<usize>) -> Self {
        Self::new(value.start, value.end)
    }
}

/// Spectrum-wide quantities computed while segmenting
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Segmentation {
    /// The m/z gap at or above which a new region starts
    pub max_gap: f64,
    /// The smallest strictly positive intensity in the spectrum, or 0.0 if there is none
    pub min_intensity: f64,
}

/// Estimate the widest expected sample spacing in `spectrum`.
///
/// Walks backwards from the high m/z end and returns the m/z delta of the first
/// positive-to-zero transition found, falling back to [`DEFAULT_MAX_GAP`].
pub fn estimate_max_gap<S: ProfileSpectrum + ?Sized>(spectrum: &S) -> f64 {
    for i in (1..spectrum.len()).rev() {
        if spectrum.intensity(i) == 0.0 && spectrum.intensity(i - 1) > 0.0 {
            return spectrum.mz(i) - spectrum.mz(i - 1);
        }
    }
    DEFAULT_MAX_GAP
}

#[inline]
fn close_region(regions: &mut Vec<Region>, start: usize, end: usize, above_noise: bool) {
    if above_noise && end - start > MIN_REGION_SAMPLES {
        regions.push(Region::new(start, end));
    }
}

/// Split `spectrum` into regions, writing them into `regions` in ascending order.
///
/// `regions` is cleared first. A region is kept only if it holds more than
/// [`MIN_REGION_SAMPLES`] samples and at least one sample after its first
/// exceeds `noise_level`. The first sample of each region never counts towards
/// that test, though it does count towards [`Segmentation::min_intensity`].
///
/// Spectra with fewer than three samples produce no regions.
pub fn segment_regions<S: ProfileSpectrum + ?Sized>(
    spectrum: &S,
    noise_level: f64,
    regions: &mut Vec<Region>,
) -> Segmentation {
    regions.clear();
    let n = spectrum.len();
    if n <= MIN_REGION_SAMPLES {
        return Segmentation {
            max_gap: DEFAULT_MAX_GAP,
            min_intensity: 0.0,
        };
    }

    let max_gap = estimate_max_gap(spectrum);

    let first_intensity = spectrum.intensity(0);
    let mut min_intensity = if first_intensity > 0.0 {
        first_intensity
    } else {
        f64::INFINITY
    };

    let mut start = 0;
    let mut above_noise = false;
    let mut last_mz = spectrum.mz(0);

    for i in 1..n {
        let mz = spectrum.mz(i);
        let intensity = spectrum.intensity(i);
        if intensity > 0.0 && intensity < min_intensity {
            min_intensity = intensity;
        }
        if mz - last_mz >= max_gap {
            close_region(regions, start, i, above_noise);
            start = i;
            above_noise = false;
        } else if intensity > noise_level {
            above_noise = true;
        }
        last_mz = mz;
    }
    close_region(regions, start, n, above_noise);

    if min_intensity.is_infinite() {
        min_intensity = 0.0;
    }

    Segmentation {
        max_gap,
        min_intensity,
    }
}
