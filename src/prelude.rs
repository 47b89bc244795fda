pub use crate::reprofile::AsPeakShapeModel;
pub use crate::spectrum::ProfileSpectrum;
