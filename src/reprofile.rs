//! Convert centroids into a profile spectrum sampled like a TOF instrument.
//!
//! The m/z axis is sampled with a spacing proportional to the square root of m/z,
//! peaks are drawn as Gaussians whose width is set by a constant resolving power,
//! and samples with no signal are dropped except for the zero on either side of
//! each run of signal, mirroring how TOF acquisition software stores profile data.
use mzpeaks::CentroidLike;

use crate::spectrum::SpectrumArrays;

/// The m/z spacing at m/z `x` is this coefficient times `sqrt(x)`
pub const DEFAULT_SPACING_COEFFICIENT: f64 = 2.5e-4;
/// `m/z / FWHM` for every synthesized peak
pub const DEFAULT_RESOLVING_POWER: f64 = 10_000.0;
/// Intensities at or below this are recorded as zero
pub const DEFAULT_SIGNAL_FLOOR: f64 = 1.0;

const FWHM_TO_SIGMA: f64 = 2.35482;

/// Build an m/z axis from `mz_start` up to (but excluding) `mz_end` whose
/// spacing grows with `sqrt(mz)`
pub fn tof_grid(mz_start: f64, mz_end: f64, spacing_coefficient: f64) -> Vec<f64> {
    let mut grid = Vec::new();
    if !(mz_start > 0.0 && spacing_coefficient > 0.0) {
        return grid;
    }
    let mut mz = mz_start;
    while mz < mz_end {
        grid.push(mz);
        mz += spacing_coefficient * mz.sqrt();
    }
    grid
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// A Gaussian model of a single peak's signal
pub struct PeakShapeModel {
    pub mz: f64,
    pub intensity: f64,
    pub full_width_at_half_max: f64,
}

impl PeakShapeModel {
    pub fn gaussian(mz: f64, intensity: f64, full_width_at_half_max: f64) -> Self {
        Self {
            mz,
            intensity,
            full_width_at_half_max,
        }
    }

    /// A peak whose width is `mz / resolving_power`
    pub fn from_resolving_power(mz: f64, intensity: f64, resolving_power: f64) -> Self {
        Self::gaussian(mz, intensity, mz / resolving_power)
    }

    /// Estimate the intensity of this peak at `mz`
    #[inline]
    pub fn predict(&self, mz: f64) -> f64 {
        let spread = self.full_width_at_half_max / FWHM_TO_SIGMA;
        let scaler = (-(mz - self.mz).powi(2) / (2.0 * spread.powi(2))).exp();
        self.intensity * scaler
    }

    /// The m/z range beyond which this peak contributes no meaningful signal
    pub fn extremes(&self) -> (f64, f64) {
        (
            self.mz - 3.0 * self.full_width_at_half_max,
            self.mz + 3.0 * self.full_width_at_half_max,
        )
    }

    /// Add this peak's signal at each m/z in `mz_array` into `intensity_array`
    pub fn shape_in(&self, mz_array: &[f64], intensity_array: &mut [f64]) {
        assert_eq!(mz_array.len(), intensity_array.len());
        for (mz, out) in mz_array.iter().zip(intensity_array.iter_mut()) {
            *out += self.predict(*mz);
        }
    }
}

/// Convert something into a [`PeakShapeModel`] at a given resolving power
pub trait AsPeakShapeModel {
    fn as_peak_shape_model(&self, resolving_power: f64) -> PeakShapeModel;
}

impl<T: CentroidLike> AsPeakShapeModel for T {
    fn as_peak_shape_model(&self, resolving_power: f64) -> PeakShapeModel {
        PeakShapeModel::from_resolving_power(
            self.coordinate(),
            self.intensity() as f64,
            resolving_power,
        )
    }
}

/// Renders peak models onto a TOF sampling grid
#[derive(Debug, Clone)]
pub struct TofReprofiler {
    /// The m/z sampling points, ascending
    pub mz_grid: Vec<f64>,
    pub resolving_power: f64,
    pub signal_floor: f64,
}

impl TofReprofiler {
    /// A reprofiler over `[mz_start, mz_end)` with the default sampling, resolving
    /// power and signal floor
    pub fn new(mz_start: f64, mz_end: f64) -> Self {
        Self::with_parameters(
            mz_start,
            mz_end,
            DEFAULT_SPACING_COEFFICIENT,
            DEFAULT_RESOLVING_POWER,
            DEFAULT_SIGNAL_FLOOR,
        )
    }

    pub fn with_parameters(
        mz_start: f64,
        mz_end: f64,
        spacing_coefficient: f64,
        resolving_power: f64,
        signal_floor: f64,
    ) -> Self {
        Self {
            mz_grid: tof_grid(mz_start, mz_end, spacing_coefficient),
            resolving_power,
            signal_floor,
        }
    }

    fn find_offset(&self, mz: f64) -> usize {
        self.mz_grid.partition_point(|x| *x < mz)
    }

    /// Sum the signal of `models` at every grid point
    pub fn render(&self, models: &[PeakShapeModel]) -> Vec<f64> {
        let mut result = vec![0.0; self.mz_grid.len()];
        for model in models.iter() {
            let (mz_start, mz_end) = model.extremes();
            let start_index = self.find_offset(mz_start);
            let end_index = self.find_offset(mz_end);
            model.shape_in(
                &self.mz_grid[start_index..end_index],
                &mut result[start_index..end_index],
            );
        }
        result
    }

    /// Render `models` and keep only samples carrying signal plus the zero-intensity
    /// samples bordering them
    pub fn reprofile_from_models(
        &self,
        models: &[PeakShapeModel],
    ) -> SpectrumArrays<'static, f64> {
        let dense = self.render(models);
        let n = dense.len();
        let is_signal = |i: usize| dense[i] > self.signal_floor;

        let mut mz_array = Vec::new();
        let mut intensity_array = Vec::new();
        for i in 0..n {
            if is_signal(i) {
                mz_array.push(self.mz_grid[i]);
                intensity_array.push(dense[i]);
            } else if (i > 0 && is_signal(i - 1)) || (i + 1 < n && is_signal(i + 1)) {
                mz_array.push(self.mz_grid[i]);
                intensity_array.push(0.0);
            }
        }
        SpectrumArrays::from((mz_array, intensity_array))
    }

    /// Build a profile spectrum from centroided `peaks` at this reprofiler's resolving power
    pub fn reprofile<T: AsPeakShapeModel>(&self, peaks: &[T]) -> SpectrumArrays<'static, f64> {
        let models: Vec<PeakShapeModel> = peaks
            .iter()
            .map(|p| p.as_peak_shape_model(self.resolving_power))
            .collect();
        self.reprofile_from_models(&models)
    }
}

/// Convert an iterator of peak-like objects into a TOF profile spectrum at
/// `resolving_power`, spanning a little beyond the outermost peaks
pub fn reprofile<'a, P, I>(peaks: I, resolving_power: f64) -> SpectrumArrays<'static, f64>
where
    P: AsPeakShapeModel + 'a,
    I: IntoIterator<Item = &'a P>,
{
    let mut models: Vec<PeakShapeModel> = peaks
        .into_iter()
        .map(|p| p.as_peak_shape_model(resolving_power))
        .collect();
    if models.is_empty() {
        return SpectrumArrays::from((Vec::new(), Vec::new()));
    }
    models.sort_by(|a, b| a.mz.total_cmp(&b.mz));
    let mz_start = models[0].extremes().0 - 1.0;
    let mz_end = models[models.len() - 1].extremes().1 + 1.0;
    let reprofiler = TofReprofiler::with_parameters(
        mz_start,
        mz_end,
        DEFAULT_SPACING_COEFFICIENT,
        resolving_power,
        DEFAULT_SIGNAL_FLOOR,
    );
    reprofiler.reprofile_from_models(&models)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::centroid::AbundanceMeasure;
    use crate::detector::{DetectorConfig, TofMassDetector};
    use crate::spectrum::ProfileSpectrum;
    use mzpeaks::CentroidPeak;

    fn detector() -> TofMassDetector {
        TofMassDetector::new(DetectorConfig::new(10.0, AbundanceMeasure::Height))
    }

    #[test]
    fn test_grid_spacing_grows() {
        let grid = tof_grid(100.0, 1000.0, DEFAULT_SPACING_COEFFICIENT);
        assert_eq!(grid[0], 100.0);
        assert!(*grid.last().unwrap() < 1000.0);
        let first = grid[1] - grid[0];
        let last = grid[grid.len() - 1] - grid[grid.len() - 2];
        assert!((first - 0.0025).abs() < 1e-12);
        assert!(last > 3.0 * first);
        assert!(tof_grid(0.0, 10.0, 1e-3).is_empty());
    }

    #[test]
    fn test_peak_model() {
        let model = PeakShapeModel::from_resolving_power(500.0, 1000.0, 10_000.0);
        assert_eq!(model.full_width_at_half_max, 0.05);
        assert!((model.predict(500.0) - 1000.0).abs() < 1e-9);
        let half = model.predict(500.025);
        assert!((half - 500.0).abs() < 0.5, "{half}");
        let (lo, hi) = model.extremes();
        assert!(model.predict(lo) < 1e-6 && model.predict(hi) < 1e-6);
    }

    #[test]
    fn test_sparse_output_has_zero_flanks() {
        let peaks = vec![CentroidPeak::new(500.0, 1000.0, 0)];
        let spectrum = TofReprofiler::new(499.0, 501.0).reprofile(&peaks);
        assert!(spectrum.is_matched());
        let n = ProfileSpectrum::len(&spectrum);
        assert!(n > 10);
        assert_eq!(spectrum.intensity(0), 0.0);
        assert_eq!(spectrum.intensity(n - 1), 0.0);
        assert!((1..n - 1).all(|i| spectrum.intensity(i) > DEFAULT_SIGNAL_FLOOR));
        assert!(spectrum.validate().is_ok());
    }

    #[test]
    fn test_single_peak_round_trip() {
        let peaks = vec![CentroidPeak::new(500.0, 1000.0, 0)];
        let spectrum = reprofile(peaks.iter(), DEFAULT_RESOLVING_POWER);
        let centroids = detector().detect(&spectrum);
        assert_eq!(centroids.len(), 1);
        let (mz, intensity) = centroids.get(0).unwrap();
        assert!((mz - 500.0).abs() < 2e-3, "{mz}");
        assert!(intensity > 980.0 && intensity <= 1000.0, "{intensity}");
    }

    #[test]
    fn test_separated_peaks_round_trip() {
        let peaks = vec![
            CentroidPeak::new(400.0, 5000.0, 0),
            CentroidPeak::new(800.0, 2000.0, 1),
        ];
        let spectrum = reprofile(peaks.iter(), DEFAULT_RESOLVING_POWER);
        let mut detector = detector();
        let centroids = detector.detect(&spectrum);
        assert_eq!(detector.regions().len(), 2);
        assert_eq!(centroids.len(), 2);
        for ((mz, _), peak) in centroids.iter().zip(peaks.iter()) {
            assert!((mz - peak.mz).abs() < 5e-3, "{mz} vs {}", peak.mz);
        }
    }

    #[test]
    fn test_doublet_is_resolved() {
        let peaks = vec![
            CentroidPeak::new(500.0, 1000.0, 0),
            CentroidPeak::new(500.15, 1000.0, 1),
        ];
        let spectrum = reprofile(peaks.iter(), DEFAULT_RESOLVING_POWER);
        let mut detector = detector();
        let centroids = detector.detect(&spectrum);
        assert_eq!(detector.regions().len(), 1);
        assert_eq!(centroids.len(), 2);
        assert!((centroids.mz_array()[0] - 500.0).abs() < 2e-3);
        assert!((centroids.mz_array()[1] - 500.15).abs() < 2e-3);
    }

    #[test]
    fn test_empty() {
        let peaks: Vec<CentroidPeak> = Vec::new();
        let spectrum = reprofile(peaks.iter(), DEFAULT_RESOLVING_POWER);
        assert!(ProfileSpectrum::is_empty(&spectrum));
        assert!(detector().detect(&spectrum).is_empty());
    }
}
