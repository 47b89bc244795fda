use std::env;

use mzpeaks::CentroidPeak;
use tofcentroid::reprofile::reprofile;
use tofcentroid::{centroid_spectrum, AbundanceMeasure, CentroidingError, DetectorConfig};

fn main() -> Result<(), CentroidingError> {
    pretty_env_logger::init();

    let resolving_power: f64 = env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(10_000.0);

    let truth = vec![
        CentroidPeak::new(445.1200, 12000.0, 0),
        CentroidPeak::new(446.1234, 4200.0, 1),
        CentroidPeak::new(447.1210, 900.0, 2),
        CentroidPeak::new(622.0290, 30000.0, 3),
        CentroidPeak::new(622.0900, 8000.0, 4),
        CentroidPeak::new(922.0098, 15000.0, 5),
    ];
    let profile = reprofile(truth.iter(), resolving_power);
    eprintln!(
        "Synthesized {} profile samples at resolving power {resolving_power}",
        profile.mz_array.len()
    );

    let config = DetectorConfig::builder()
        .noise_level(50.0)
        .abundance_measure(AbundanceMeasure::Height)
        .try_build()?;
    let centroids = centroid_spectrum(&profile.mz_array, &profile.intensity_array, config)?;

    println!("mz\tintensity");
    for (mz, intensity) in centroids.iter() {
        println!("{mz:0.4}\t{intensity:0.1}");
    }
    Ok(())
}
