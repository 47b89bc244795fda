//! Read-only views over profile-mode spectra.
//!
//! The detector never owns its input. Anything that can report a sample count,
//! an m/z and an intensity per sample can be centroided by implementing
//! [`ProfileSpectrum`].
use std::borrow::Cow;

use mzpeaks::peak::MZPoint;
use num_traits::{AsPrimitive, Float};

use crate::detector::CentroidingError;

/// A profile spectrum, sampled in ascending m/z order with non-negative intensities.
///
/// The unchecked detection path trusts these invariants. Use [`ProfileSpectrum::validate`]
/// when the source is not known to be well-formed.
pub trait ProfileSpectrum {
    /// The number of samples in the spectrum
    fn len(&self) -> usize;

    /// The m/z of the sample at `index`
    fn mz(&self, index: usize) -> f64;

    /// The intensity of the sample at `index`
    fn intensity(&self, index: usize) -> f64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check that the spectrum is sorted by m/z, finite and non-negative.
    fn validate(&self) -> Result<(), CentroidingError> {
        validate_spectrum(self)
    }
}

/// Scan `spectrum` once, reporting the first sample that breaks the
/// ordering, finiteness or sign requirements of [`ProfileSpectrum`].
///
/// Repeated m/z values are accepted.
pub fn validate_spectrum<S: ProfileSpectrum + ?Sized>(
    spectrum: &S,
) -> Result<(), CentroidingError> {
    let mut last_mz = f64::NEG_INFINITY;
    for index in 0..spectrum.len() {
        let mz = spectrum.mz(index);
        let intensity = spectrum.intensity(index);
        if !mz.is_finite() || !intensity.is_finite() {
            return Err(CentroidingError::NonFiniteValue { index });
        }
        if mz < last_mz {
            return Err(CentroidingError::MZNotSorted { index });
        }
        if intensity < 0.0 {
            return Err(CentroidingError::NegativeIntensity {
                index,
                value: intensity,
            });
        }
        last_mz = mz;
    }
    Ok(())
}

/// Paired m/z and intensity arrays, either borrowed from the caller or owned.
///
/// The intensity array may hold any floating point type, so both the `f32`
/// arrays most file formats decode to and `f64` arrays can be used directly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpectrumArrays<'a, Y: Clone + 'a = f64> {
    pub mz_array: Cow<'a, [f64]>,
    pub intensity_array: Cow<'a, [Y]>,
}

impl<'a, Y: Float + AsPrimitive<f64>> SpectrumArrays<'a, Y> {
    pub fn new(mz_array: Cow<'a, [f64]>, intensity_array: Cow<'a, [Y]>) -> Self {
        Self {
            mz_array,
            intensity_array,
        }
    }

    /// Borrow a pair of slices without copying them
    pub fn wrap(mz_array: &'a [f64], intensity_array: &'a [Y]) -> Self {
        Self::new(Cow::Borrowed(mz_array), Cow::Borrowed(intensity_array))
    }

    /// Whether both arrays have the same number of entries
    pub fn is_matched(&self) -> bool {
        self.mz_array.len() == self.intensity_array.len()
    }

    pub fn min_mz(&self) -> Option<f64> {
        self.mz_array.first().copied()
    }

    pub fn max_mz(&self) -> Option<f64> {
        self.mz_array.last().copied()
    }

    /// Detach from any borrowed storage
    pub fn into_owned(self) -> SpectrumArrays<'static, Y> {
        SpectrumArrays {
            mz_array: Cow::Owned(self.mz_array.into_owned()),
            intensity_array: Cow::Owned(self.intensity_array.into_owned()),
        }
    }
}

impl<Y: Float + AsPrimitive<f64>> From<(Vec<f64>, Vec<Y>)> for SpectrumArrays<'static, Y> {
    fn from(value: (Vec<f64>, Vec<Y>)) -> Self {
        Self::new(Cow::Owned(value.0), Cow::Owned(value.1))
    }
}

impl<'a, Y: Float + AsPrimitive<f64>> ProfileSpectrum for SpectrumArrays<'a, Y> {
    /// Mismatched arrays are truncated to the shorter of the two, and rejected by
    /// [`ProfileSpectrum::validate`].
    #[inline]
    fn len(&self) -> usize {
        self.mz_array.len().min(self.intensity_array.len())
    }

    #[inline]
    fn mz(&self, index: usize) -> f64 {
        self.mz_array[index]
    }

    #[inline]
    fn intensity(&self, index: usize) -> f64 {
        self.intensity_array[index].as_()
    }

    fn validate(&self) -> Result<(), CentroidingError> {
        if !self.is_matched() {
            return Err(CentroidingError::MZIntensityMismatch);
        }
        validate_spectrum(self)
    }
}

impl ProfileSpectrum for [(f64, f64)] {
    #[inline]
    fn len(&self) -> usize {
        <[(f64, f64)]>::len(self)
    }

    #[inline]
    fn mz(&self, index: usize) -> f64 {
        self[index].0
    }

    #[inline]
    fn intensity(&self, index: usize) -> f64 {
        self[index].1
    }
}

impl ProfileSpectrum for [MZPoint] {
    #[inline]
    fn len(&self) -> usize {
        <[MZPoint]>::len(self)
    }

    #[inline]
    fn mz(&self, index: usize) -> f64 {
        self[index].mz
    }

    #[inline]
    fn intensity(&self, index: usize) -> f64 {
        self[index].intensity as f64
    }
}

impl<T> ProfileSpectrum for Vec<T>
where
    [T]: ProfileSpectrum,
{
    #[inline]
    fn len(&self) -> usize {
        ProfileSpectrum::len(self.as_slice())
    }

    #[inline]
    fn mz(&self, index: usize) -> f64 {
        self.as_slice().mz(index)
    }

    #[inline]
    fn intensity(&self, index: usize) -> f64 {
        ProfileSpectrum::intensity(self.as_slice(), index)
    }

    fn validate(&self) -> Result<(), CentroidingError> {
        self.as_slice().validate()
    }
}

impl<S: ProfileSpectrum + ?Sized> ProfileSpectrum for &S {
    #[inline]
    fn len(&self) -> usize {
        (**self).len()
    }

    #[inline]
    fn mz(&self, index: usize) -> f64 {
        (**self).mz(index)
    }

    #[inline]
    fn intensity(&self, index: usize) -> f64 {
        (**self).intensity(index)
    }

    fn validate(&self) -> Result<(), CentroidingError> {
        (**self).validate()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_array_adapters_agree() {
        let mzs: Vec<f64> = vec![100.0, 100.01, 100.02];
        let ints32 = vec![1.0f32, 2.5, 0.0];
        let arrays = SpectrumArrays::wrap(&mzs, &ints32);
        let pairs: Vec<(f64, f64)> = vec![(100.0, 1.0), (100.01, 2.5), (100.02, 0.0)];
        let points: Vec<MZPoint> = pairs
            .iter()
            .map(|(mz, i)| MZPoint {
                mz: *mz,
                intensity: *i as f32,
            })
            .collect();

        assert_eq!(ProfileSpectrum::len(&arrays), 3);
        assert_eq!(ProfileSpectrum::len(&pairs), 3);
        assert_eq!(ProfileSpectrum::len(&points), 3);
        for i in 0..3 {
            assert_eq!(arrays.mz(i), pairs.mz(i));
            assert_eq!(arrays.intensity(i), ProfileSpectrum::intensity(&pairs, i));
            assert_eq!(points.mz(i), pairs.mz(i));
            assert_eq!(
                ProfileSpectrum::intensity(&points, i),
                ProfileSpectrum::intensity(&pairs, i)
            );
        }
        assert_eq!(arrays.min_mz(), Some(100.0));
        assert_eq!(arrays.max_mz(), Some(100.02));
    }

    #[test]
    fn test_validate_accepts_flat_mz() {
        let pairs: Vec<(f64, f64)> = vec![(100.0, 1.0), (100.0, 0.0), (100.5, 3.0)];
        assert!(pairs.validate().is_ok());
        let empty: Vec<(f64, f64)> = Vec::new();
        assert!(empty.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects() {
        let unsorted: Vec<(f64, f64)> = vec![(100.0, 1.0), (99.0, 1.0)];
        assert!(matches!(
            unsorted.validate(),
            Err(CentroidingError::MZNotSorted { index: 1 })
        ));

        let negative: Vec<(f64, f64)> = vec![(100.0, 1.0), (101.0, -1.0)];
        assert!(matches!(
            negative.validate(),
            Err(CentroidingError::NegativeIntensity { index: 1, .. })
        ));

        let nan: Vec<(f64, f64)> = vec![(100.0, f64::NAN)];
        assert!(matches!(
            nan.validate(),
            Err(CentroidingError::NonFiniteValue { index: 0 })
        ));

        let mzs: [f64; 2] = [100.0, 101.0];
        let ints = [1.0f64];
        let arrays = SpectrumArrays::wrap(&mzs, &ints);
        assert_eq!(ProfileSpectrum::len(&arrays), 1);
        assert!(matches!(
            arrays.validate(),
            Err(CentroidingError::MZIntensityMismatch)
        ));
    }

    #[test]
    fn test_into_owned() {
        let mzs: Vec<f64> = vec![1.0, 2.0];
        let ints = vec![3.0f64, 4.0];
        let owned = SpectrumArrays::wrap(&mzs, &ints).into_owned();
        drop(mzs);
        assert_eq!(owned.mz(1), 2.0);
        assert_eq!(owned.intensity(0), 3.0);
    }
}
