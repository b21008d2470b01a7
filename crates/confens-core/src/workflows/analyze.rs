use crate::analysis::ensemble::Ensemble;
use crate::analysis::error::AnalysisError;
use crate::analysis::plotting;
use crate::analysis::progress::{Progress, ProgressReporter};
use crate::analysis::selection::{self, CandidateReport};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Configuration for the ensemble analysis workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzeConfig {
    /// Informational molecule label.
    pub name: String,
    /// Whether to render the pairwise scatter plots into the ensemble root.
    pub generate_plots: bool,
    /// Percentile step for the folded candidate search.
    pub folded_delta: f64,
    /// Percentile step for the unfolded candidate search.
    pub unfolded_delta: f64,
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            name: "mol".to_string(),
            generate_plots: true,
            folded_delta: 0.05,
            unfolded_delta: 0.10,
        }
    }
}

/// The outcome of a complete ensemble analysis.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// The ensemble label the analysis ran under.
    pub name: String,
    /// Number of conformers discovered and analyzed.
    pub conformer_count: usize,
    /// Paths of the scatter plots written, empty when plotting was disabled.
    pub plot_paths: Vec<PathBuf>,
    /// Candidates matching the folded geometric profile.
    pub folded: CandidateReport,
    /// Candidates matching the unfolded geometric profile.
    pub unfolded: CandidateReport,
}

/// Runs the complete analysis over the conformer ensemble at `root_path`:
/// discovery, principal-moment computation, optional plot rendering, and the
/// folded and unfolded candidate searches.
///
/// # Errors
///
/// Propagates the first error of any phase; there is no partial recovery.
#[instrument(skip_all, name = "analyze_workflow")]
pub fn run(
    root_path: &Path,
    config: &AnalyzeConfig,
    reporter: &ProgressReporter,
) -> Result<AnalysisReport, AnalysisError> {
    // === Phase 1: Conformer discovery ===
    reporter.report(Progress::PhaseStart { name: "Discovery" });
    let mut ensemble = Ensemble::new(root_path, config.name.as_str());
    let count = ensemble.count_conformers()?;
    info!(ensemble = %config.name, conformers = count, "Discovery finished.");
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Principal-moment computation ===
    reporter.report(Progress::PhaseStart {
        name: "Computing principal moments",
    });
    ensemble.compute_principal_moments(reporter)?;
    reporter.report(Progress::PhaseFinish);

    // === Phase 3: Scatter plots (optional) ===
    let plot_paths = if config.generate_plots {
        reporter.report(Progress::PhaseStart {
            name: "Rendering scatter plots",
        });
        let paths = plotting::render_moment_plots(ensemble.moments(), ensemble.root_path())?;
        reporter.report(Progress::PhaseFinish);
        paths
    } else {
        info!("Plot generation disabled, skipping.");
        Vec::new()
    };

    // === Phase 4: Candidate selection ===
    reporter.report(Progress::PhaseStart {
        name: "Selecting candidates",
    });
    let folded = selection::select_candidates(ensemble.moments(), true, config.folded_delta)?;
    let unfolded = selection::select_candidates(ensemble.moments(), false, config.unfolded_delta)?;
    reporter.report(Progress::PhaseFinish);

    info!(
        folded = folded.candidates.len(),
        unfolded = unfolded.candidates.len(),
        "Candidate selection finished."
    );

    Ok(AnalysisReport {
        name: config.name.clone(),
        conformer_count: count,
        plot_paths,
        folded,
        unfolded,
    })
}
