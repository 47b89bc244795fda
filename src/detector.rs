//! Centroid profile-mode TOF spectra.
//!
//! [`TofMassDetector`] runs the four stages for one spectrum at a time:
//! [`segment_regions`], [`find_local_maxima`], [`resolve_peaks`] and
//! [`Centroider::centroid`]. It keeps its intermediate buffers between calls so
//! that a detector reused across a whole run allocates only while the
//! buffers grow to fit the largest spectrum seen.
use std::fmt;
use std::ops;

use log::{debug, trace};
use thiserror::Error;

#[cfg(feature = "parallelism")]
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::centroid::{AbundanceMeasure, Centroider};
use crate::maxima::find_local_maxima;
use crate::peak::Centroids;
use crate::region::{segment_regions, Region, Segmentation};
use crate::resolve::{resolve_peaks, ResolvedPeak};
use crate::spectrum::{ProfileSpectrum, SpectrumArrays};

/// All the ways checked centroiding can reject its input
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CentroidingError {
    #[error("The m/z and intensity arrays do not match in length")]
    MZIntensityMismatch,
    #[error("The m/z array is not sorted at index {index}")]
    MZNotSorted { index: usize },
    #[error("Negative intensity {value} at index {index}")]
    NegativeIntensity { index: usize, value: f64 },
    #[error("Non-finite m/z or intensity at index {index}")]
    NonFiniteValue { index: usize },
    #[error("The noise level must be finite and non-negative, got {0}")]
    InvalidNoiseLevel(f64),
}

/// Parameters for [`TofMassDetector`]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DetectorConfig {
    /// The absolute intensity a sample must reach to be considered signal
    pub noise_level: f64,
    /// How each reported peak's intensity is computed
    pub abundance_measure: AbundanceMeasure,
}

impl DetectorConfig {
    pub fn new(noise_level: f64, abundance_measure: AbundanceMeasure) -> Self {
        Self {
            noise_level,
            abundance_measure,
        }
    }

    pub fn builder() -> DetectorConfigBuilder {
        DetectorConfigBuilder::new()
    }

    pub fn validate(&self) -> Result<(), CentroidingError> {
        if !self.noise_level.is_finite() || self.noise_level < 0.0 {
            return Err(CentroidingError::InvalidNoiseLevel(self.noise_level));
        }
        Ok(())
    }
}

/// A builder for configuring [`TofMassDetector`]
#[derive(Debug, Clone, Default)]
pub struct DetectorConfigBuilder {
    noise_level: f64,
    abundance_measure: AbundanceMeasure,
}

impl DetectorConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn noise_level(&mut self, noise_level: f64) -> &mut Self {
        self.noise_level = noise_level;
        self
    }

    pub fn abundance_measure(&mut self, abundance_measure: AbundanceMeasure) -> &mut Self {
        self.abundance_measure = abundance_measure;
        self
    }

    pub fn build(&self) -> DetectorConfig {
        DetectorConfig::new(self.noise_level, self.abundance_measure)
    }

    /// Build the configuration, rejecting a negative or non-finite noise level
    pub fn try_build(&self) -> Result<DetectorConfig, CentroidingError> {
        let config = self.build();
        config.validate()?;
        Ok(config)
    }
}

impl From<DetectorConfigBuilder> for DetectorConfig {
    fn from(value: DetectorConfigBuilder) -> Self {
        value.build()
    }
}

/// Counts of what each stage produced, for one spectrum or folded over many
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DetectionSummary {
    pub spectra: usize,
    pub samples: usize,
    pub regions: usize,
    pub candidates: usize,
    pub resolved_peaks: usize,
    /// Resolved peaks dropped by the detection gate or the zero-weight guard
    pub rejected_peaks: usize,
    pub centroids: usize,
}

impl DetectionSummary {
    pub fn combine(mut self, other: &Self) -> Self {
        self.spectra += other.spectra;
        self.samples += other.samples;
        self.regions += other.regions;
        self.candidates += other.candidates;
        self.resolved_peaks += other.resolved_peaks;
        self.rejected_peaks += other.rejected_peaks;
        self.centroids += other.centroids;
        self
    }
}

impl ops::Add for DetectionSummary {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.combine(&rhs)
    }
}

impl fmt::Display for DetectionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Spectra processed: {}", self.spectra)?;
        writeln!(f, "Profile samples: {}", self.samples)?;
        writeln!(f, "Signal regions: {}", self.regions)?;
        writeln!(f, "Candidate apexes: {}", self.candidates)?;
        writeln!(f, "Resolved peaks: {}", self.resolved_peaks)?;
        writeln!(f, "Rejected peaks: {}", self.rejected_peaks)?;
        write!(f, "Centroids: {}", self.centroids)
    }
}

/// A TOF profile spectrum centroider.
///
/// A detector holds reusable scratch space and must not be shared between
/// threads while in use; give each worker its own, as [`detect_batch`] does.
#[derive(Debug, Clone, Default)]
pub struct TofMassDetector {
    config: DetectorConfig,
    regions: Vec<Region>,
    candidates: Vec<usize>,
    peaks: Vec<ResolvedPeak>,
    segmentation: Segmentation,
    summary: DetectionSummary,
}

impl TofMassDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Create a detector with scratch space pre-sized for spectra of about `capacity` samples
    pub fn with_capacity(config: DetectorConfig, capacity: usize) -> Self {
        let mut this = Self::new(config);
        this.expand_to_capacity(capacity);
        this
    }

    /// Grow the scratch buffers ahead of time. Region and peak counts are bounded
    /// by a third and a half of the sample count respectively.
    pub fn expand_to_capacity(&mut self, capacity: usize) {
        self.regions.reserve(capacity / 3);
        self.candidates.reserve(capacity / 2);
        self.peaks.reserve(capacity / 2);
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: DetectorConfig) {
        self.config = config;
    }

    /// The regions found in the most recently processed spectrum
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// The resolved peaks of the most recently processed spectrum, including
    /// those later rejected by the centroider
    pub fn resolved_peaks(&self) -> &[ResolvedPeak] {
        &self.peaks
    }

    /// The gap threshold and minimum intensity of the most recently processed spectrum
    pub fn segmentation(&self) -> &Segmentation {
        &self.segmentation
    }

    pub fn last_summary(&self) -> &DetectionSummary {
        &self.summary
    }

    /// Centroid `spectrum` into a new [`Centroids`].
    ///
    /// The input is assumed to satisfy the [`ProfileSpectrum`] invariants.
    pub fn detect<S: ProfileSpectrum + ?Sized>(&mut self, spectrum: &S) -> Centroids {
        let mut acc = Centroids::new();
        self.detect_into(spectrum, &mut acc);
        acc
    }

    /// Check `spectrum` and the configuration before centroiding it
    pub fn detect_checked<S: ProfileSpectrum + ?Sized>(
        &mut self,
        spectrum: &S,
    ) -> Result<Centroids, CentroidingError> {
        self.config.validate()?;
        spectrum.validate()?;
        Ok(self.detect(spectrum))
    }

    /// Centroid `spectrum`, appending the results to `acc`.
    ///
    /// Returns the number of centroids appended.
    pub fn detect_into<S: ProfileSpectrum + ?Sized>(
        &mut self,
        spectrum: &S,
        acc: &mut Centroids,
    ) -> usize {
        let initial = acc.len();
        let noise_level = self.config.noise_level;

        self.peaks.clear();
        self.segmentation = segment_regions(spectrum, noise_level, &mut self.regions);

        let mut n_candidates = 0;
        for region in self.regions.iter() {
            n_candidates +=
                find_local_maxima(spectrum, *region, noise_level, &mut self.candidates);
            resolve_peaks(spectrum, *region, &self.candidates, &mut self.peaks);
        }

        let centroider = Centroider::new(
            noise_level,
            self.segmentation.min_intensity,
            self.config.abundance_measure,
        );
        for peak in self.peaks.iter() {
            if let Some((mz, intensity)) = centroider.centroid(spectrum, peak) {
                acc.push(mz, intensity);
            }
        }

        let n_centroids = acc.len() - initial;
        self.summary = DetectionSummary {
            spectra: 1,
            samples: spectrum.len(),
            regions: self.regions.len(),
            candidates: n_candidates,
            resolved_peaks: self.peaks.len(),
            rejected_peaks: self.peaks.len() - n_centroids,
            centroids: n_centroids,
        };
        trace!(
            "Centroided {} samples (max gap {:0.5}, min intensity {:0.3}): \
             {} regions, {} candidates, {} peaks, {} centroids",
            self.summary.samples,
            self.segmentation.max_gap,
            self.segmentation.min_intensity,
            self.summary.regions,
            self.summary.candidates,
            self.summary.resolved_peaks,
            self.summary.centroids,
        );
        n_centroids
    }
}

/// A convenience function that centroids paired m/z and intensity arrays with
/// `config`, checking the arrays and the configuration first.
pub fn centroid_spectrum(
    mz_array: &[f64],
    intensity_array: &[f64],
    config: DetectorConfig,
) -> Result<Centroids, CentroidingError> {
    let spectrum = SpectrumArrays::wrap(mz_array, intensity_array);
    let mut detector = TofMassDetector::with_capacity(config, mz_array.len());
    detector.detect_checked(&spectrum)
}

/// Centroid every spectrum in `spectra` with `config`, returning the results in
/// input order.
///
/// With the `parallelism` feature, spectra are spread across the `rayon` thread
/// pool and each worker reuses its own [`TofMassDetector`].
pub fn detect_batch<S: ProfileSpectrum + Sync>(
    config: DetectorConfig,
    spectra: &[S],
) -> Vec<Centroids> {
    let detect_one = |detector: &mut TofMassDetector, spectrum: &S| {
        let centroids = detector.detect(spectrum);
        (centroids, *detector.last_summary())
    };

    cfg_if::cfg_if! {
        if #[cfg(feature = "parallelism")] {
            let results: Vec<(Centroids, DetectionSummary)> = spectra
                .par_iter()
                .map_init(|| TofMassDetector::new(config), detect_one)
                .collect();
        } else {
            let mut detector = TofMassDetector::new(config);
            let results: Vec<(Centroids, DetectionSummary)> = spectra
                .iter()
                .map(|spectrum| detect_one(&mut detector, spectrum))
                .collect();
        }
    }

    let summary = results
        .iter()
        .fold(DetectionSummary::default(), |acc, (_, s)| acc.combine(s));
    debug!("Batch centroiding finished\n{summary}");
    results.into_iter().map(|(centroids, _)| centroids).collect()
}
