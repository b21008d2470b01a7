use crate::analysis::error::AnalysisError;
use crate::analysis::progress::{Progress, ProgressReporter};
use crate::core::io::traits::MolecularFile;
use crate::core::io::xyz::{XyzError, XyzFile};
use nalgebra::{DMatrix, Vector3};
use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name expected inside every numbered conformer subdirectory.
pub const CONFORMER_FILE_NAME: &str = "conf.xyz";

/// Represents one conformer collection anchored at a root path.
///
/// The ensemble expects one subdirectory per conformer under its root,
/// named with consecutive positive integers starting at 1, each holding a
/// `conf.xyz` structure file. Discovery sizes the moment matrix; the
/// computation pass fills it, one row per conformer, after which the matrix
/// is read-only.
#[derive(Debug, Clone)]
pub struct Ensemble {
    name: String,
    root_path: PathBuf,
    conformer_count: usize,
    moments: DMatrix<f64>,
}

impl Ensemble {
    /// Creates an ensemble anchored at `root_path`.
    ///
    /// # Arguments
    ///
    /// * `root_path` - Directory containing the numbered conformer subdirectories.
    /// * `name` - Human-readable label, informational only.
    pub fn new(root_path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root_path: root_path.into(),
            conformer_count: 0,
            moments: DMatrix::zeros(0, 3),
        }
    }

    /// The informational label of the ensemble.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The root directory of the ensemble.
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Number of conformers found by [`count_conformers`](Self::count_conformers).
    pub fn conformer_count(&self) -> usize {
        self.conformer_count
    }

    /// The (conformer_count × 3) principal-moment matrix. Row `i` holds the
    /// ascending moments of conformer `i + 1` once
    /// [`compute_principal_moments`](Self::compute_principal_moments) has run.
    pub fn moments(&self) -> &DMatrix<f64> {
        &self.moments
    }

    /// Counts the conformer subdirectories under the root path and allocates
    /// the zero-filled moment matrix accordingly.
    ///
    /// A root with no subdirectories yields a count of zero; that is not an
    /// error at this stage.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::PathNotFound`] when the root path does not
    /// exist or is not a directory.
    pub fn count_conformers(&mut self) -> Result<usize, AnalysisError> {
        if !self.root_path.is_dir() {
            return Err(AnalysisError::PathNotFound {
                path: self.root_path.clone(),
            });
        }

        let mut count = 0;
        for entry in fs::read_dir(&self.root_path)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                count += 1;
            }
        }

        self.conformer_count = count;
        self.moments = DMatrix::zeros(count, 3);

        info!(
            ensemble = %self.name,
            conformers = count,
            "Discovered conformer subdirectories."
        );
        Ok(count)
    }

    /// Computes the principal moments of inertia for every conformer and
    /// stores them into the moment matrix.
    ///
    /// Conformers are independent, so the loads run on the rayon pool; each
    /// result row is written exactly once, keyed by its conformer index.
    /// Hydrogens enter the inertia tensor like every other atom.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::MissingConformerFile`] when a numbered
    /// subdirectory lacks its `conf.xyz`, [`AnalysisError::MoleculeParse`]
    /// when a structure file is malformed, and
    /// [`AnalysisError::DegenerateGeometry`] when a structure has no defined
    /// inertia tensor.
    pub fn compute_principal_moments(
        &mut self,
        reporter: &ProgressReporter,
    ) -> Result<(), AnalysisError> {
        reporter.report(Progress::ConformersFound {
            total: self.conformer_count as u64,
        });

        let rows: Vec<(usize, Vector3<f64>)> = (1..=self.conformer_count)
            .into_par_iter()
            .map(|index| {
                let moments = self.load_conformer_moments(index)?;
                reporter.report(Progress::ConformerLoaded);
                Ok((index, moments))
            })
            .collect::<Result<_, AnalysisError>>()?;

        for (index, moments) in rows {
            self.moments.set_row(index - 1, &moments.transpose());
        }

        reporter.report(Progress::LoadFinish);
        info!(
            ensemble = %self.name,
            conformers = self.conformer_count,
            "Computed principal moments for all conformers."
        );
        Ok(())
    }

    fn conformer_file(&self, index: usize) -> PathBuf {
        self.root_path
            .join(index.to_string())
            .join(CONFORMER_FILE_NAME)
    }

    fn load_conformer_moments(&self, index: usize) -> Result<Vector3<f64>, AnalysisError> {
        let path = self.conformer_file(index);
        debug!(conformer = index, path = %path.display(), "Loading conformer structure.");

        let (molecule, _) = XyzFile::read_from_path(&path).map_err(|err| match err {
            XyzError::Io(ref io_err) if io_err.kind() == io::ErrorKind::NotFound => {
                AnalysisError::MissingConformerFile {
                    index,
                    path: path.clone(),
                }
            }
            other => AnalysisError::MoleculeParse {
                index,
                source: other,
            },
        })?;

        molecule
            .principal_moments()
            .ok_or(AnalysisError::DegenerateGeometry { index })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn write_conformer(root: &Path, index: usize, content: &str) {
        let dir = root.join(index.to_string());
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(CONFORMER_FILE_NAME), content).unwrap();
    }

    fn diatomic_xyz(separation: f64) -> String {
        format!(
            "2\ndiatomic\nH {:.6} 0.0 0.0\nH {:.6} 0.0 0.0\n",
            -separation / 2.0,
            separation / 2.0
        )
    }

    #[test]
    fn count_conformers_counts_only_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        write_conformer(dir.path(), 1, &diatomic_xyz(1.0));
        write_conformer(dir.path(), 2, &diatomic_xyz(2.0));
        write_conformer(dir.path(), 3, &diatomic_xyz(3.0));
        fs::write(dir.path().join("stray.log"), "not a conformer").unwrap();

        let mut ensemble = Ensemble::new(dir.path(), "test");
        let count = ensemble.count_conformers().unwrap();

        assert_eq!(count, 3);
        assert_eq!(ensemble.conformer_count(), 3);
        assert_eq!(ensemble.moments().nrows(), 3);
        assert_eq!(ensemble.moments().ncols(), 3);
        assert!(ensemble.moments().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn count_conformers_accepts_empty_roots() {
        let dir = tempfile::tempdir().unwrap();
        let mut ensemble = Ensemble::new(dir.path(), "empty");
        assert_eq!(ensemble.count_conformers().unwrap(), 0);
        assert_eq!(ensemble.moments().nrows(), 0);
    }

    #[test]
    fn count_conformers_fails_for_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let mut ensemble = Ensemble::new(&missing, "gone");

        let err = ensemble.count_conformers().unwrap_err();
        assert!(matches!(err, AnalysisError::PathNotFound { .. }));
    }

    #[test]
    fn compute_fills_one_row_per_conformer() {
        let dir = tempfile::tempdir().unwrap();
        write_conformer(dir.path(), 1, &diatomic_xyz(1.0));
        write_conformer(dir.path(), 2, &diatomic_xyz(2.0));

        let mut ensemble = Ensemble::new(dir.path(), "pair");
        ensemble.count_conformers().unwrap();
        ensemble
            .compute_principal_moments(&ProgressReporter::new())
            .unwrap();

        let moments = ensemble.moments();
        assert!(moments.iter().all(|v| v.is_finite()));

        // A diatomic of two hydrogens at separation d has perpendicular
        // moments 2 m (d/2)^2; the wider conformer must be four times the
        // narrower one.
        let h_mass = crate::core::utils::elements::atomic_mass("H").unwrap();
        assert!((moments[(0, 1)] - 2.0 * h_mass * 0.25).abs() < 1e-9);
        assert!((moments[(1, 1)] - 2.0 * h_mass).abs() < 1e-9);

        for row in 0..2 {
            assert!(moments[(row, 0)] <= moments[(row, 1)]);
            assert!(moments[(row, 1)] <= moments[(row, 2)]);
        }
    }

    #[test]
    fn computed_moments_match_analytic_references() {
        let dir = tempfile::tempdir().unwrap();
        let separations = [0.8, 1.2, 1.9, 2.6, 3.3];
        for (i, d) in separations.iter().enumerate() {
            write_conformer(dir.path(), i + 1, &diatomic_xyz(*d));
        }

        let mut ensemble = Ensemble::new(dir.path(), "reference");
        ensemble.count_conformers().unwrap();
        ensemble
            .compute_principal_moments(&ProgressReporter::new())
            .unwrap();

        // Two hydrogens at separation d: zero moment along the bond axis,
        // m d^2 / 2 about the two perpendicular axes.
        let h_mass = crate::core::utils::elements::atomic_mass("H").unwrap();
        let moments = ensemble.moments();
        for (row, d) in separations.iter().enumerate() {
            let expected = h_mass * d * d / 2.0;
            assert!(moments[(row, 0)].abs() < 1e-9);
            assert!((moments[(row, 1)] - expected).abs() / expected < 1e-6);
            assert!((moments[(row, 2)] - expected).abs() / expected < 1e-6);
        }
    }

    #[test]
    fn compute_reports_missing_conformer_files() {
        let dir = tempfile::tempdir().unwrap();
        write_conformer(dir.path(), 1, &diatomic_xyz(1.0));
        fs::create_dir_all(dir.path().join("2")).unwrap();

        let mut ensemble = Ensemble::new(dir.path(), "gap");
        ensemble.count_conformers().unwrap();
        let err = ensemble
            .compute_principal_moments(&ProgressReporter::new())
            .unwrap_err();

        assert!(matches!(
            err,
            AnalysisError::MissingConformerFile { index: 2, .. }
        ));
    }

    #[test]
    fn compute_reports_unnumbered_subdirectories_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        write_conformer(dir.path(), 1, &diatomic_xyz(1.0));
        fs::create_dir_all(dir.path().join("extras")).unwrap();

        let mut ensemble = Ensemble::new(dir.path(), "misnamed");
        ensemble.count_conformers().unwrap();
        let err = ensemble
            .compute_principal_moments(&ProgressReporter::new())
            .unwrap_err();

        assert!(matches!(
            err,
            AnalysisError::MissingConformerFile { index: 2, .. }
        ));
    }

    #[test]
    fn compute_reports_parse_failures_with_conformer_index() {
        let dir = tempfile::tempdir().unwrap();
        write_conformer(dir.path(), 1, "garbage\n");

        let mut ensemble = Ensemble::new(dir.path(), "bad");
        ensemble.count_conformers().unwrap();
        let err = ensemble
            .compute_principal_moments(&ProgressReporter::new())
            .unwrap_err();

        assert!(matches!(err, AnalysisError::MoleculeParse { index: 1, .. }));
    }

    #[test]
    fn progress_events_cover_every_conformer() {
        use std::sync::atomic::{AtomicU64, Ordering};

        let dir = tempfile::tempdir().unwrap();
        write_conformer(dir.path(), 1, &diatomic_xyz(1.0));
        write_conformer(dir.path(), 2, &diatomic_xyz(1.5));

        let loaded = AtomicU64::new(0);
        let total = AtomicU64::new(0);
        let reporter = ProgressReporter::with_callback(Box::new(|event| match event {
            Progress::ConformersFound { total: t } => {
                total.store(t, Ordering::SeqCst);
            }
            Progress::ConformerLoaded => {
                loaded.fetch_add(1, Ordering::SeqCst);
            }
            _ => {}
        }));

        let mut ensemble = Ensemble::new(dir.path(), "progress");
        ensemble.count_conformers().unwrap();
        ensemble.compute_principal_moments(&reporter).unwrap();
        drop(reporter);

        assert_eq!(total.load(Ordering::SeqCst), 2);
        assert_eq!(loaded.load(Ordering::SeqCst), 2);
    }
}
