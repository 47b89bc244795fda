use std::fmt;

use mzpeaks::peak::MZPoint;
use mzpeaks::{CentroidPeak, IndexType, MZPeakSetType};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The centroided peak list of one spectrum, as paired m/z and intensity arrays
/// in ascending m/z order.
///
/// The two arrays always have the same length.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Centroids {
    mz_array: Vec<f64>,
    intensity_array: Vec<f64>,
}

impl Centroids {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            mz_array: Vec::with_capacity(capacity),
            intensity_array: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, mz: f64, intensity: f64) {
        self.mz_array.push(mz);
        self.intensity_array.push(intensity);
    }

    pub fn len(&self) -> usize {
        self.mz_array.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mz_array.is_empty()
    }

    pub fn clear(&mut self) {
        self.mz_array.clear();
        self.intensity_array.clear();
    }

    pub fn mz_array(&self) -> &[f64] {
        &self.mz_array
    }

    pub fn intensity_array(&self) -> &[f64] {
        &self.intensity_array
    }

    pub fn get(&self, index: usize) -> Option<(f64, f64)> {
        Some((
            *self.mz_array.get(index)?,
            *self.intensity_array.get(index)?,
        ))
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.mz_array
            .iter()
            .copied()
            .zip(self.intensity_array.iter().copied())
    }

    /// Split into the m/z and intensity arrays
    pub fn into_arrays(self) -> (Vec<f64>, Vec<f64>) {
        (self.mz_array, self.intensity_array)
    }

    /// Build an [`MZPeakSetType`] of [`CentroidPeak`], narrowing intensities to `f32`.
    ///
    /// Peak indices follow m/z order.
    pub fn to_peak_set(&self) -> MZPeakSetType<CentroidPeak> {
        let peaks: Vec<CentroidPeak> = self
            .iter()
            .enumerate()
            .map(|(i, (mz, intensity))| CentroidPeak::new(mz, intensity as f32, i as IndexType))
            .collect();
        MZPeakSetType::new(peaks)
    }

    pub fn to_points(&self) -> Vec<MZPoint> {
        self.iter()
            .map(|(mz, intensity)| MZPoint {
                mz,
                intensity: intensity as f32,
            })
            .collect()
    }
}

impl FromIterator<(f64, f64)> for Centroids {
    fn from_iter<T: IntoIterator<Item = (f64, f64)>>(iter: T) -> Self {
        let mut acc = Self::new();
        acc.extend(iter);
        acc
    }
}

impl Extend<(f64, f64)> for Centroids {
    fn extend<T: IntoIterator<Item = (f64, f64)>>(&mut self, iter: T) {
        for (mz, intensity) in iter {
            self.push(mz, intensity);
        }
    }
}

impl From<Centroids> for MZPeakSetType<CentroidPeak> {
    fn from(value: Centroids) -> Self {
        value.to_peak_set()
    }
}

impl From<Centroids> for (Vec<f64>, Vec<f64>) {
    fn from(value: Centroids) -> Self {
        value.into_arrays()
    }
}

impl fmt::Display for Centroids {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Centroids(")?;
        for (i, (mz, intensity)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "({}, {})", mz, intensity)?;
        }
        write!(f, ")")
    }
}
