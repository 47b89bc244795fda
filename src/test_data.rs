//! Small hand-built spectra with known answers.

/// Seven evenly spaced samples holding two apexes separated by a deep valley
pub const WORKED_MZ: [f64; 7] = [100.00, 100.01, 100.02, 100.03, 100.04, 100.05, 100.06];
pub const WORKED_INTENSITY: [f64; 7] = [5.0, 20.0, 100.0, 30.0, 5.0, 20.0, 60.0];

/// The same m/z axis with a shallow valley at index 4 between apexes at 2 and 5,
/// so the two apexes merge into one peak
pub const SHALLOW_INTENSITY: [f64; 7] = [5.0, 20.0, 100.0, 85.0, 80.0, 85.0, 60.0];

pub const WORKED_NOISE: f64 = 5.0;

/// Two clusters of signal, each flanked by zero samples, separated by an acquisition gap.
/// The widest sample spacing sits at the high m/z end, as on a TOF instrument.
pub const GAPPED_MZ: [f64; 12] = [
    200.000, 200.002, 200.004, 200.006, 200.008, 200.010, 250.000, 250.002, 250.004, 250.006,
    250.008, 250.014,
];
pub const GAPPED_INTENSITY: [f64; 12] = [
    0.0, 10.0, 50.0, 12.0, 0.0, 0.0, 0.0, 8.0, 40.0, 90.0, 30.0, 0.0,
];

pub fn pairs(mz_array: &[f64], intensity_array: &[f64]) -> Vec<(f64, f64)> {
    mz_array
        .iter()
        .copied()
        .zip(intensity_array.iter().copied())
        .collect()
}
