//! `tofcentroid` reduces profile-mode time-of-flight mass spectra to centroided
//! peak lists.
//!
//! A profile spectrum is segmented into contiguous runs of signal, the local maxima
//! in each run are found, neighbouring maxima separated only by a shallow valley are
//! merged, and every surviving peak is reduced to an intensity-weighted m/z and an
//! abundance. [`TofMassDetector`] runs these stages and reuses its scratch space
//! across spectra, and [`detect_batch`] spreads many spectra over a thread pool.
//!
//! Any source of samples can be centroided by implementing [`ProfileSpectrum`], which
//! is already implemented for slices of `(f64, f64)` pairs, [`mzpeaks::peak::MZPoint`]
//! and the array pair wrapper [`SpectrumArrays`].
//!
//! # Usage
//! ```
//! use tofcentroid::{AbundanceMeasure, DetectorConfig, SpectrumArrays, TofMassDetector};
//!
//! let mz_array = [100.00, 100.01, 100.02, 100.03, 100.04, 100.05, 100.06];
//! let intensity_array = [5.0, 20.0, 100.0, 30.0, 5.0, 20.0, 60.0];
//!
//! let config = DetectorConfig::builder()
//!     .noise_level(5.0)
//!     .abundance_measure(AbundanceMeasure::Height)
//!     .build();
//! let mut detector = TofMassDetector::new(config);
//! let centroids = detector.detect(&SpectrumArrays::wrap(&mz_array, &intensity_array));
//! assert_eq!(centroids.len(), 2);
//! for (mz, intensity) in centroids.iter() {
//!     println!("{mz:0.4}\t{intensity:0.1}");
//! }
//! ```
//!
//! When the input is not known to be well-formed, use [`centroid_spectrum`] or
//! [`TofMassDetector::detect_checked`], which reject unsorted, mismatched or negative
//! input with a [`CentroidingError`].
//!
//! ## Features
//! - `parallelism`: centroid batches of spectra with `rayon` (on by default)
//! - `serde`: serialize configurations, summaries and centroid lists
pub mod centroid;
pub mod detector;
pub mod maxima;
pub mod peak;
pub mod prelude;
pub mod region;
pub mod reprofile;
pub mod resolve;
pub mod spectrum;

#[cfg(test)]
mod test_data;

pub use crate::centroid::AbundanceMeasure;
pub use crate::detector::{
    centroid_spectrum, detect_batch, CentroidingError, DetectionSummary, DetectorConfig,
    DetectorConfigBuilder, TofMassDetector,
};
pub use crate::peak::Centroids;
pub use crate::region::Region;
pub use crate::resolve::ResolvedPeak;
pub use crate::spectrum::{ProfileSpectrum, SpectrumArrays};
