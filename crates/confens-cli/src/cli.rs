use clap::Parser;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu",
    version,
    about = "Confens CLI - Analyze a molecular conformer ensemble through its principal moments of inertia and select folded/unfolded candidate structures.",
    help_template = HELP_TEMPLATE,
)]
pub struct Cli {
    /// Path to the conformer ensemble root: one subdirectory per conformer,
    /// named with consecutive numbers starting at 1, each holding a conf.xyz.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Name of the molecule, used in logs and the printed report [default: mol]
    #[arg(long, value_name = "STRING")]
    pub name: Option<String>,

    /// Toggle generation of the principal-moment scatter plots [default: true]
    #[arg(long, value_name = "BOOL", action = clap::ArgAction::Set)]
    pub plots: Option<bool>,

    /// Percentile step for the folded candidate search [default: 0.05]
    #[arg(long, value_name = "FLOAT")]
    pub folded_delta: Option<f64>,

    /// Percentile step for the unfolded candidate search [default: 0.10]
    #[arg(long, value_name = "FLOAT")]
    pub unfolded_delta: Option<f64>,

    /// Path to a TOML configuration file. Explicit CLI arguments override
    /// values from the file.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, value_name = "NUM")]
    pub threads: Option<usize>,
}
