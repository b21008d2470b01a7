use confens::analysis::progress::{Progress, ProgressCallback};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

/// Translates core progress events into an indicatif spinner (phases) and a
/// per-conformer progress bar (structure loading).
#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let pb = ProgressBar::new(0)
            .with_style(Self::spinner_style())
            .with_message("Initializing...");
        pb.set_draw_target(indicatif::ProgressDrawTarget::stderr());
        pb.disable_steady_tick();
        pb.finish_and_clear();

        Self {
            pb: Arc::new(Mutex::new(pb)),
        }
    }

    pub fn callback(&self) -> ProgressCallback<'static> {
        let pb_handle = self.pb.clone();

        Box::new(move |progress: Progress| {
            let Ok(pb) = pb_handle.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::PhaseStart { name } => {
                    pb.reset();
                    pb.set_length(0);
                    pb.set_style(Self::spinner_style());
                    pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                    pb.set_message(name.to_string());
                }
                Progress::PhaseFinish => {
                    pb.disable_steady_tick();
                    pb.finish_and_clear();
                }
                Progress::ConformersFound { total } => {
                    pb.disable_steady_tick();
                    pb.reset();
                    pb.set_length(total);
                    pb.set_position(0);
                    pb.set_style(Self::bar_style());
                    pb.set_message("Loading conformers");
                }
                Progress::ConformerLoaded => {
                    pb.inc(1);
                }
                Progress::LoadFinish => {
                    if pb.position() < pb.length().unwrap_or(0) {
                        pb.set_position(pb.length().unwrap_or(0));
                    }
                }
            }
        })
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .expect("Failed to create spinner style template")
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template(
            "{msg} [{bar:40.cyan/blue}] {pos}/{len} ({elapsed})",
        )
        .expect("Failed to create bar style template")
        .progress_chars("=> ")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}
