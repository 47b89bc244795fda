use criterion::{BenchmarkId, Criterion};

use mzpeaks::CentroidPeak;
use tofcentroid::reprofile::{reprofile, DEFAULT_RESOLVING_POWER};
use tofcentroid::{
    detect_batch, AbundanceMeasure, DetectorConfig, SpectrumArrays, TofMassDetector,
};

fn synthetic_spectrum(n_peaks: usize) -> SpectrumArrays<'static, f64> {
    let peaks: Vec<CentroidPeak> = (0..n_peaks)
        .map(|i| {
            let mz = 150.0 + i as f64 * 1.37 + (i % 7) as f64 * 0.11;
            let intensity = 500.0 * (1 + (i * 37) % 23) as f32;
            CentroidPeak::new(mz, intensity, i as u32)
        })
        .collect();
    reprofile(peaks.iter(), DEFAULT_RESOLVING_POWER)
}

fn single_spectrum(c: &mut Criterion) {
    let config = DetectorConfig::new(50.0, AbundanceMeasure::Height);
    let mut group = c.benchmark_group("detect");
    for n_peaks in [100, 1000] {
        let spectrum = synthetic_spectrum(n_peaks);
        let mut detector = TofMassDetector::with_capacity(config, spectrum.mz_array.len());
        group.bench_with_input(
            BenchmarkId::from_parameter(n_peaks),
            &spectrum,
            |b, spectrum| b.iter(|| detector.detect(spectrum)),
        );
    }
    group.finish();
}

fn batch(c: &mut Criterion) {
    let config = DetectorConfig::new(50.0, AbundanceMeasure::Area);
    let spectra: Vec<_> = (0..64).map(|i| synthetic_spectrum(200 + i * 5)).collect();
    c.bench_function("detect_batch", |b| b.iter(|| detect_batch(config, &spectra)));
}

criterion::criterion_group!(benches, single_spectrum, batch);
criterion::criterion_main!(benches);
