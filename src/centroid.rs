//! Reduce a resolved peak to a single (m/z, abundance) pair.
//!
//! The centroid m/z is the intensity-weighted mean over the samples in the top
//! portion of the peak, which keeps the asymmetric tails of a TOF peak from
//! pulling the estimate away from the apex.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::resolve::ResolvedPeak;
use crate::spectrum::ProfileSpectrum;

/// Only samples above this fraction of the apex intensity contribute to the centroid m/z
pub const CENTROID_INTENSITY_FRACTION: f64 = 0.4;

/// Apexes weaker than this multiple of the spectrum's smallest positive intensity
/// are judged against a relative floor instead of the noise level
pub const LOW_DYNAMIC_RANGE_RATIO: f64 = 5.0;

/// The relative floor, as a multiple of the spectrum's smallest positive intensity
pub const LOW_DYNAMIC_RANGE_FLOOR: f64 = 2.0;

/// How the reported intensity of a peak is computed
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AbundanceMeasure {
    /// The intensity of the apex sample
    #[default]
    Height,
    /// The plain sum of every sample intensity in the peak
    Area,
}

/// The intensity an apex must reach to be reported.
///
/// When the apex is within [`LOW_DYNAMIC_RANGE_RATIO`] of `min_intensity` the fixed
/// noise level is too permissive for the spectrum's baseline and a floor of
/// [`LOW_DYNAMIC_RANGE_FLOOR`] times `min_intensity` is used instead.
#[inline]
pub fn detection_threshold(apex_intensity: f64, min_intensity: f64, noise_level: f64) -> f64 {
    if apex_intensity < LOW_DYNAMIC_RANGE_RATIO * min_intensity {
        LOW_DYNAMIC_RANGE_FLOOR * min_intensity
    } else {
        noise_level
    }
}

/// Gate, centroid and measure resolved peaks from one spectrum
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Centroider {
    pub noise_level: f64,
    /// The smallest strictly positive intensity in the spectrum being processed
    pub min_intensity: f64,
    pub abundance_measure: AbundanceMeasure,
}

impl Centroider {
    pub fn new(noise_level: f64, min_intensity: f64, abundance_measure: AbundanceMeasure) -> Self {
        Self {
            noise_level,
            min_intensity,
            abundance_measure,
        }
    }

    /// Whether `peak`'s apex is strong enough to be reported
    pub fn passes_gate<S: ProfileSpectrum + ?Sized>(
        &self,
        spectrum: &S,
        peak: &ResolvedPeak,
    ) -> bool {
        let apex_intensity = spectrum.intensity(peak.apex);
        apex_intensity
            >= detection_threshold(apex_intensity, self.min_intensity, self.noise_level)
    }

    /// The intensity-weighted mean m/z of the samples in `peak` above
    /// [`CENTROID_INTENSITY_FRACTION`] of its apex, or `None` if no sample qualifies
    pub fn centroid_mz<S: ProfileSpectrum + ?Sized>(
        &self,
        spectrum: &S,
        peak: &ResolvedPeak,
    ) -> Option<f64> {
        let cutoff = CENTROID_INTENSITY_FRACTION * spectrum.intensity(peak.apex);
        let mut weighted_mz = 0.0;
        let mut total_weight = 0.0;
        for i in peak.range() {
            let intensity = spectrum.intensity(i);
            if intensity > cutoff {
                weighted_mz += spectrum.mz(i) * intensity;
                total_weight += intensity;
            }
        }
        if total_weight == 0.0 {
            None
        } else {
            Some(weighted_mz / total_weight)
        }
    }

    /// The reported intensity of `peak` under the configured [`AbundanceMeasure`]
    pub fn abundance<S: ProfileSpectrum + ?Sized>(
        &self,
        spectrum: &S,
        peak: &ResolvedPeak,
    ) -> f64 {
        match self.abundance_measure {
            AbundanceMeasure::Height => spectrum.intensity(peak.apex),
            AbundanceMeasure::Area => peak.range().map(|i| spectrum.intensity(i)).sum(),
        }
    }

    /// Reduce `peak` to an (m/z, abundance) pair, or `None` if it fails the
    /// detection gate or has no weight to centroid over.
    pub fn centroid<S: ProfileSpectrum + ?Sized>(
        &self,
        spectrum: &S,
        peak: &ResolvedPeak,
    ) -> Option<(f64, f64)> {
        if !self.passes_gate(spectrum, peak) {
            return None;
        }
        let mz = self.centroid_mz(spectrum, peak)?;
        Some((mz, self.abundance(spectrum, peak)))
    }
}
