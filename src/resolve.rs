//! Decide which neighbouring apexes are distinct peaks and which are
//! ringing or shoulders on a single peak.
//!
//! Candidates are visited left to right. Each pair of consecutive apexes is
//! separated if the lowest point between them falls far enough below the
//! current apex and the next apex rises far enough above it. Otherwise the two
//! are merged and the taller apex represents the merged peak.
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::region::Region;
use crate::spectrum::ProfileSpectrum;

/// The valley must drop below this fraction of the current apex
pub const VALLEY_DEPTH_RATIO: f64 = 0.7;

/// The next apex must rise above this multiple of the valley
pub const VALLEY_RISE_RATIO: f64 = 1.3;

/// A peak's apex and the half-open range of samples `[start, end)` it owns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResolvedPeak {
    pub apex: usize,
    pub start: usize,
    pub end: usize,
}

impl ResolvedPeak {
    pub fn new(apex: usize, start: usize, end: usize) -> Self {
        debug_assert!(start <= apex && apex < end);
        Self { apex, start, end }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// The index of the lowest sample strictly between `left` and `right`,
/// preferring the leftmost on ties. `None` if the two are adjacent.
pub fn find_valley<S: ProfileSpectrum + ?Sized>(
    spectrum: &S,
    left: usize,
    right: usize,
) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for i in (left + 1)..right {
        let intensity = spectrum.intensity(i);
        match best {
            Some((_, lowest)) if intensity >= lowest => {}
            _ => best = Some((i, intensity)),
        }
    }
    best.map(|(i, _)| i)
}

/// Whether a valley of height `valley` between an apex of height `apex` and
/// the next apex of height `next_apex` separates them into two peaks
#[inline]
pub fn is_separated(apex: f64, next_apex: f64, valley: f64) -> bool {
    valley < VALLEY_DEPTH_RATIO * apex && next_apex > VALLEY_RISE_RATIO * valley
}

/// Group the apexes in `candidates` into peaks that partition `region`,
/// appending them to `peaks` in ascending order.
///
/// `candidates` must be ascending and lie inside `region`. Returns the number of
/// peaks appended, which is zero only when there are no candidates.
pub fn resolve_peaks<S: ProfileSpectrum + ?Sized>(
    spectrum: &S,
    region: Region,
    candidates: &[usize],
    peaks: &mut Vec<ResolvedPeak>,
) -> usize {
    let (first, rest) = match candidates.split_first() {
        Some(split) => split,
        None => return 0,
    };
    let initial = peaks.len();

    let mut apex = *first;
    let mut start = region.start;

    for &next_apex in rest {
        let apex_intensity = spectrum.intensity(apex);
        let next_intensity = spectrum.intensity(next_apex);
        let valley = find_valley(spectrum, apex, next_apex);
        match valley {
            Some(valley)
                if is_separated(apex_intensity, next_intensity, spectrum.intensity(valley)) =>
            {
                peaks.push(ResolvedPeak::new(apex, start, valley));
                apex = next_apex;
                start = valley;
            }
            _ => {
                if next_intensity > apex_intensity {
                    apex = next_apex;
                }
            }
        }
    }
    peaks.push(ResolvedPeak::new(apex, start, region.end));
    peaks.len() - initial
}
