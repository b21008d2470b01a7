use confens::analysis::selection::CandidateReport;
use confens::workflows::analyze::AnalysisReport;

/// Formats one candidate report the way it is printed: the labeled 1-based
/// candidate list, the best candidate, and the percentile bound the search
/// stopped at.
pub fn format_candidates(report: &CandidateReport) -> String {
    let label = if report.folded { "Folded" } else { "Unfolded" };
    let listed: Vec<String> = report
        .candidates
        .iter()
        .map(|index| (index + 1).to_string())
        .collect();

    format!(
        "{label} structures: {}\nBest candidate: {}\nPercentile used: {:.2}\n",
        listed.join(", "),
        report.best() + 1,
        report.percentile,
    )
}

pub fn print_report(report: &AnalysisReport) {
    println!(
        "Analyzed {} conformer(s) of '{}'.",
        report.conformer_count, report.name
    );
    for path in &report.plot_paths {
        println!("✓ Plot written to: {}", path.display());
    }
    println!();
    print!("{}", format_candidates(&report.folded));
    println!();
    print!("{}", format_candidates(&report.unfolded));
}
