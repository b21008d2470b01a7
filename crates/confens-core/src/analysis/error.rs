use crate::core::io::xyz::XyzError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Ensemble root path not found or not a directory: {path}", path = path.display())]
    PathNotFound { path: PathBuf },

    #[error("Missing structure file for conformer {index}: {path}", path = path.display())]
    MissingConformerFile { index: usize, path: PathBuf },

    #[error("Failed to parse structure for conformer {index}: {source}")]
    MoleculeParse {
        index: usize,
        #[source]
        source: XyzError,
    },

    #[error("Conformer {index} has no defined inertia tensor (zero total mass)")]
    DegenerateGeometry { index: usize },

    #[error("Percentile delta must be a finite value in (0, 1] (got {delta})")]
    InvalidDelta { delta: f64 },

    #[error("Ensemble contains no conformers, quantile thresholds are undefined")]
    EmptyEnsemble,

    #[error(
        "No {kind} candidate found before the percentile bound left [0, 1] (delta {delta})"
    )]
    NoCandidateFound { kind: &'static str, delta: f64 },

    #[error("Failed to write plot {path}: {message}", path = path.display())]
    PlotWrite { path: PathBuf, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
