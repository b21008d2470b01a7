use crate::analysis::error::AnalysisError;
use nalgebra::DMatrix;
use tracing::debug;

// Slack for the [0, 1] exit test so a bound like 20 * 0.05 cannot fall out
// of range through binary rounding alone.
const BOUND_TOLERANCE: f64 = 1e-9;

/// The outcome of a candidate search over the principal-moment matrix.
///
/// A report is only ever constructed with at least one candidate; an
/// exhausted search fails with [`AnalysisError::NoCandidateFound`] instead.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateReport {
    /// Whether this report describes the folded or the unfolded search.
    pub folded: bool,
    /// 0-based row indices of all matching conformers, ascending.
    pub candidates: Vec<usize>,
    /// The percentile bound at which the search stopped.
    pub percentile: f64,
}

impl CandidateReport {
    /// The 0-based row index of the best candidate: the first match in row
    /// order. The report invariant guarantees at least one candidate.
    pub fn best(&self) -> usize {
        self.candidates[0]
    }

    /// Human-readable label of the search direction.
    pub fn kind(&self) -> &'static str {
        if self.folded { "folded" } else { "unfolded" }
    }
}

/// Computes the quantile of pre-sorted data at `level` in [0, 1] using
/// linear interpolation between closest ranks.
fn quantile(sorted: &[f64], level: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }

    let rank = level * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = (lower + 1).min(n - 1);
    let fraction = rank - lower as f64;

    sorted[lower] + fraction * (sorted[upper] - sorted[lower])
}

fn sorted_column(moments: &DMatrix<f64>, column: usize) -> Vec<f64> {
    let mut values: Vec<f64> = moments.column(column).iter().copied().collect();
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    values
}

/// Selects conformers whose geometry is extreme along all three principal
/// moments simultaneously, in the direction given by `folded`.
///
/// The percentile bound starts at the `folded` extreme of [0, 1] and steps
/// toward the opposite extreme by `percentile_delta` per iteration. Each
/// iteration takes quantile thresholds from the moment columns (column 0 at
/// level `1 - bound`, columns 1 and 2 at level `bound`) and keeps the rows
/// with `col0 < t0`, `col1 > t1` and `col2 > t2`. The first non-empty row
/// set wins; its report records the bound actually used.
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidDelta`] for a non-finite delta outside
/// (0, 1], [`AnalysisError::EmptyEnsemble`] when the matrix has no rows, and
/// [`AnalysisError::NoCandidateFound`] once the bound leaves [0, 1] without
/// a match, which caps the search at roughly `1 / delta` iterations.
pub fn select_candidates(
    moments: &DMatrix<f64>,
    folded: bool,
    percentile_delta: f64,
) -> Result<CandidateReport, AnalysisError> {
    if !percentile_delta.is_finite() || percentile_delta <= 0.0 || percentile_delta > 1.0 {
        return Err(AnalysisError::InvalidDelta {
            delta: percentile_delta,
        });
    }
    if moments.nrows() == 0 {
        return Err(AnalysisError::EmptyEnsemble);
    }

    let kind = if folded { "folded" } else { "unfolded" };
    let columns = [
        sorted_column(moments, 0),
        sorted_column(moments, 1),
        sorted_column(moments, 2),
    ];

    let mut step = 0u32;
    loop {
        step += 1;
        // Recomputed per step rather than accumulated so the exit test sees
        // no floating-point drift.
        let bound = if folded {
            f64::from(step) * percentile_delta
        } else {
            1.0 - f64::from(step) * percentile_delta
        };

        if !(-BOUND_TOLERANCE..=1.0 + BOUND_TOLERANCE).contains(&bound) {
            return Err(AnalysisError::NoCandidateFound {
                kind,
                delta: percentile_delta,
            });
        }
        let level = bound.clamp(0.0, 1.0);

        let threshold_0 = quantile(&columns[0], 1.0 - level);
        let threshold_1 = quantile(&columns[1], level);
        let threshold_2 = quantile(&columns[2], level);

        let candidates: Vec<usize> = (0..moments.nrows())
            .filter(|&row| {
                moments[(row, 0)] < threshold_0
                    && moments[(row, 1)] > threshold_1
                    && moments[(row, 2)] > threshold_2
            })
            .collect();

        debug!(
            kind,
            step,
            percentile = level,
            matches = candidates.len(),
            "Evaluated percentile thresholds."
        );

        if !candidates.is_empty() {
            return Ok(CandidateReport {
                folded,
                candidates,
                percentile: level,
            });
        }
    }
}
