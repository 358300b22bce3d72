//! CLI argument definitions for the enrolment sync tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "enrolsync",
    version,
    about = "Reconcile timetable enrolments against the LMS",
    long_about = "Correlate a timetable enrolment export with the LMS module \
                  catalogue, then diff the expected enrolment state against \
                  the live LMS and emit enrol/unenrol action tables.\n\n\
                  Remote access needs MOODLE_URL and MOODLE_TOKEN in the \
                  environment (a .env file is honoured)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include row-level values (email addresses) in logs.
    ///
    /// Off by default; emails are personal data and appear redacted.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build the timetable-to-module mapping and write the mapping result.
    Map(MapArgs),

    /// Full run: map, resolve against the LMS and emit action tables.
    Sync(SyncArgs),
}

/// The two input tables both commands consume.
#[derive(Args)]
pub struct InputArgs {
    /// Current-enrolment export CSV.
    #[arg(value_name = "ENROLMENT_FILE")]
    pub enrolment_file: PathBuf,

    /// Unit-creation (module catalogue) export CSV.
    #[arg(value_name = "MODULES_FILE")]
    pub modules_file: PathBuf,

    /// Email column name in the enrolment export.
    #[arg(long = "email-column", value_name = "NAME", default_value = "Email2")]
    pub email_column: String,

    /// Timetable identifier column name in the enrolment export.
    #[arg(
        long = "timetable-column",
        value_name = "NAME",
        default_value = "TimetableID"
    )]
    pub timetable_column: String,

    /// Shortname column name in the module export.
    #[arg(
        long = "shortname-column",
        value_name = "NAME",
        default_value = "shortname"
    )]
    pub shortname_column: String,

    /// Fullname column name in the module export.
    #[arg(
        long = "fullname-column",
        value_name = "NAME",
        default_value = "fullname"
    )]
    pub fullname_column: String,
}

#[derive(Args)]
pub struct MapArgs {
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Output path for the mapping result CSV.
    #[arg(
        long = "output",
        value_name = "PATH",
        default_value = "result/mapping_result.csv"
    )]
    pub output: PathBuf,

    /// Skip all remote lookups; course ids stay unresolved.
    #[arg(long = "offline")]
    pub offline: bool,
}

#[derive(Args)]
pub struct SyncArgs {
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Directory for the mapping result and action tables.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "result")]
    pub output_dir: PathBuf,

    /// Compute and report the plan without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
