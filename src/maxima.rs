//! Locate candidate peak apexes within a region.
//!
use crate::region::Region;
use crate::spectrum::ProfileSpectrum;

/// Whether `current` is a local maximum between `prev` and `next`.
///
/// The comparison is non-strict on the left and strict on the right, so a flat
/// top yields exactly one candidate instead of one per sample.
#[inline]
pub fn is_local_maximum(prev: f64, current: f64, next: f64) -> bool {
    current >= prev && current > next
}

/// Find every sample in `region` at or above `noise_level` that is a local maximum,
/// writing the indices into `candidates` in ascending order.
///
/// Samples outside the region are treated as zero, so the first and last samples
/// of a region may qualify. `candidates` is cleared first. Returns the number
/// of candidates found.
pub fn find_local_maxima<S: ProfileSpectrum + ?Sized>(
    spectrum: &S,
    region: Region,
    noise_level: f64,
    candidates: &mut Vec<usize>,
) -> usize {
    candidates.clear();
    if region.is_empty() {
        return 0;
    }
    let last = region.last();
    for i in region.range() {
        let current = spectrum.intensity(i);
        if current < noise_level {
            continue;
        }
        let prev = if i == region.start {
            0.0
        } else {
            spectrum.intensity(i - 1)
        };
        let next = if i == last {
            0.0
        } else {
            spectrum.intensity(i + 1)
        };
        if is_local_maximum(prev, current, next) {
            candidates.push(i);
        }
    }
    candidates.len()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_data::{pairs, SHALLOW_INTENSITY, WORKED_INTENSITY, WORKED_MZ, WORKED_NOISE};
    use rstest::rstest;

    #[test]
    fn test_worked_candidates() {
        let spectrum = pairs(&WORKED_MZ, &WORKED_INTENSITY);
        let mut candidates = Vec::new();
        let n = find_local_maxima(&spectrum, Region::new(0, 7), WORKED_NOISE, &mut candidates);
        assert_eq!(n, 2);
        assert_eq!(candidates, vec![2, 6]);
    }

    #[test]
    fn test_shallow_candidates() {
        let spectrum = pairs(&WORKED_MZ, &SHALLOW_INTENSITY);
        let mut candidates = vec![42];
        find_local_maxima(&spectrum, Region::new(0, 7), WORKED_NOISE, &mut candidates);
        assert_eq!(candidates, vec![2, 5]);
    }

    #[rstest]
    #[case::plateau(&[1.0, 5.0, 5.0, 1.0], vec![2])]
    #[case::left_edge(&[9.0, 5.0, 1.0], vec![0])]
    #[case::right_edge(&[1.0, 5.0, 9.0], vec![2])]
    #[case::flat(&[3.0, 3.0, 3.0], vec![2])]
    #[case::all_zero(&[0.0, 0.0, 0.0], vec![])]
    fn test_shapes(#[case] intensities: &[f64], #[case] expected: Vec<usize>) {
        let mzs: Vec<f64> = (0..intensities.len()).map(|i| 100.0 + i as f64 * 0.01).collect();
        let spectrum = pairs(&mzs, intensities);
        let mut candidates = Vec::new();
        find_local_maxima(
            &spectrum,
            Region::new(0, intensities.len()),
            0.0,
            &mut candidates,
        );
        assert_eq!(candidates, expected);
    }

    #[test]
    fn test_noise_level_inclusive() {
        let spectrum = pairs(&WORKED_MZ, &WORKED_INTENSITY);
        let mut candidates = Vec::new();
        find_local_maxima(&spectrum, Region::new(0, 7), 60.0, &mut candidates);
        assert_eq!(candidates, vec![2, 6]);
        find_local_maxima(&spectrum, Region::new(0, 7), 60.5, &mut candidates);
        assert_eq!(candidates, vec![2]);
    }

    #[test]
    fn test_region_edges_are_zero_bordered() {
        let spectrum = pairs(&WORKED_MZ, &WORKED_INTENSITY);
        let mut candidates = Vec::new();
        // index 3 (30.0) has a 100.0 neighbour outside the region, index 5 (20.0) a 60.0
        find_local_maxima(&spectrum, Region::new(3, 6), 0.0, &mut candidates);
        assert_eq!(candidates, vec![3, 5]);
    }
}
