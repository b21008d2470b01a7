use crate::analysis::error::AnalysisError;
use cairo::{Context, PdfSurface};
use nalgebra::DMatrix;
use plotters::prelude::*;
use plotters::style::colors::colormaps::{ColorMap, ViridisRGB};
use plotters_cairo::CairoBackend;
use std::path::{Path, PathBuf};
use tracing::info;

const PLOT_WIDTH: f64 = 800.0;
const PLOT_HEIGHT: f64 = 600.0;
const COLORBAR_WIDTH: i32 = 150;
const POINT_SIZE: i32 = 4;

struct PlotSpec {
    x_column: usize,
    y_column: usize,
    x_label: &'static str,
    y_label: &'static str,
    file_name: &'static str,
}

const PLOT_SPECS: [PlotSpec; 3] = [
    PlotSpec {
        x_column: 0,
        y_column: 1,
        x_label: "1st Principal Moment",
        y_label: "2nd Principal Moment",
        file_name: "principal_moments_1-2.pdf",
    },
    PlotSpec {
        x_column: 0,
        y_column: 2,
        x_label: "1st Principal Moment",
        y_label: "3rd Principal Moment",
        file_name: "principal_moments_1-3.pdf",
    },
    PlotSpec {
        x_column: 1,
        y_column: 2,
        x_label: "2nd Principal Moment",
        y_label: "3rd Principal Moment",
        file_name: "principal_moments_2-3.pdf",
    },
];

fn plot_error(path: &Path, message: impl ToString) -> AnalysisError {
    AnalysisError::PlotWrite {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

// Reversed viridis: conformer 0 gets the top of the map, the last conformer
// the bottom, matching a sequential colormap drawn in reverse direction.
fn conformer_color(index: usize, total: usize) -> RGBColor {
    let span = total.saturating_sub(1).max(1) as f32;
    let reversed = (total - 1 - index) as f32;
    ViridisRGB.get_color_normalized(reversed, 0.0, span)
}

fn axis_range(values: &[f64]) -> std::ops::Range<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }

    let span = max - min;
    let pad = if span > 0.0 { span * 0.05 } else { min.abs().max(1.0) * 0.05 };
    (min - pad)..(max + pad)
}

/// Renders the three pairwise scatter plots of the principal-moment columns
/// into `out_dir` as vector PDFs: `principal_moments_1-2.pdf`,
/// `principal_moments_1-3.pdf` and `principal_moments_2-3.pdf`.
///
/// Points are colored by conformer index on a reversed sequential colormap,
/// with a colorbar strip labeled "Conformer Number". Existing files are
/// overwritten.
///
/// # Errors
///
/// Returns [`AnalysisError::PlotWrite`] when a surface cannot be created or
/// a chart fails to draw (e.g. the directory is not writable).
pub fn render_moment_plots(
    moments: &DMatrix<f64>,
    out_dir: &Path,
) -> Result<Vec<PathBuf>, AnalysisError> {
    let mut written = Vec::with_capacity(PLOT_SPECS.len());

    for spec in &PLOT_SPECS {
        let path = out_dir.join(spec.file_name);
        render_scatter(moments, spec, &path)?;
        info!(path = %path.display(), "Wrote principal-moment scatter plot.");
        written.push(path);
    }

    Ok(written)
}

fn render_scatter(
    moments: &DMatrix<f64>,
    spec: &PlotSpec,
    path: &Path,
) -> Result<(), AnalysisError> {
    let surface = PdfSurface::new(PLOT_WIDTH, PLOT_HEIGHT, path).map_err(|e| plot_error(path, e))?;
    let context = Context::new(&surface).map_err(|e| plot_error(path, e))?;
    let backend = CairoBackend::new(&context, (PLOT_WIDTH as u32, PLOT_HEIGHT as u32))
        .map_err(|e| plot_error(path, e))?;

    let root = backend.into_drawing_area();
    root.fill(&WHITE).map_err(|e| plot_error(path, e))?;

    let (chart_area, bar_area) = root.split_horizontally(PLOT_WIDTH as i32 - COLORBAR_WIDTH);
    let total = moments.nrows();

    let xs: Vec<f64> = moments.column(spec.x_column).iter().copied().collect();
    let ys: Vec<f64> = moments.column(spec.y_column).iter().copied().collect();
    let x_range = axis_range(&xs);
    let y_range = axis_range(&ys);

    let mut chart = ChartBuilder::on(&chart_area)
        .margin(24)
        .x_label_area_size(55)
        .y_label_area_size(75)
        .build_cartesian_2d(x_range, y_range)
        .map_err(|e| plot_error(path, e))?;

    chart
        .configure_mesh()
        .x_desc(spec.x_label)
        .y_desc(spec.y_label)
        .axis_desc_style(("sans-serif", 18))
        .label_style(("sans-serif", 14))
        .draw()
        .map_err(|e| plot_error(path, e))?;

    chart
        .draw_series((0..total).map(|row| {
            Circle::new(
                (moments[(row, spec.x_column)], moments[(row, spec.y_column)]),
                POINT_SIZE,
                conformer_color(row, total).filled(),
            )
        }))
        .map_err(|e| plot_error(path, e))?;

    draw_colorbar(&bar_area, total, path)?;

    root.present().map_err(|e| plot_error(path, e))?;
    surface.finish();
    Ok(())
}

fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    total: usize,
    path: &Path,
) -> Result<(), AnalysisError> {
    let upper = total.max(1) as f64;

    let mut colorbar = ChartBuilder::on(area)
        .margin(24)
        .y_label_area_size(55)
        .build_cartesian_2d(0.0..1.0, 0.0..upper)
        .map_err(|e| plot_error(path, e))?;

    colorbar
        .configure_mesh()
        .disable_mesh()
        .x_labels(0)
        .y_desc("Conformer Number")
        .axis_desc_style(("sans-serif", 16))
        .label_style(("sans-serif", 12))
        .draw()
        .map_err(|e| plot_error(path, e))?;

    colorbar
        .draw_series((0..total).map(|index| {
            Rectangle::new(
                [(0.0, index as f64), (1.0, (index + 1) as f64)],
                conformer_color(index, total).filled(),
            )
        }))
        .map_err(|e| plot_error(path, e))?;

    Ok(())
}
