//! datadash - terminal viewer for the processed-data API.
//!
//! Usage:
//!   datadash                              # fetch from http://127.0.0.1:5000/api/data
//!   datadash --url http://host/api/data   # custom endpoint
//!   datadash --file payload.json          # read a saved payload
//!   datadash --route /dashboard           # start on the raw payload view
//!   datadash -v --log-file datadash.log   # debug logs to a file

use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use tikv_jemallocator::Jemalloc;
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::{Directive, LevelFilter};

use datadash::provider::{DEFAULT_API_URL, FileSource, HttpSource, PayloadSource};
use datadash::tui::{App, Route};
use datadash::view::table::ColumnPolicy;

#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

/// Redraw interval of the UI.
const TICK_RATE: Duration = Duration::from_millis(250);

/// Terminal viewer for the processed-data API.
#[derive(Parser)]
#[command(name = "datadash", version, about = "Processed data dashboard")]
struct Args {
    /// Payload endpoint.
    #[arg(long, env = "DATADASH_API_URL", default_value = DEFAULT_API_URL, conflicts_with = "file")]
    url: String,

    /// Read the payload from a JSON file instead of the endpoint.
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Initial route: `/` (tables) or `/dashboard` (raw payload).
    #[arg(long, default_value = "/")]
    route: Route,

    /// How table columns are derived from records.
    #[arg(long, value_enum, default_value_t = ColumnPolicy::FirstRecord)]
    columns: ColumnPolicy,

    /// Write logs to this file. Without it logs are discarded, since the
    /// TUI owns the terminal.
    #[arg(long, env = "DATADASH_LOG_FILE", value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(args.verbose, args.quiet, args.log_file.as_deref()) {
        eprintln!("Error: cannot open log file: {e}");
        std::process::exit(1);
    }

    if !io::stdout().is_terminal() {
        error!("stdout is not a terminal, nothing to render into");
        eprintln!("Error: datadash needs an interactive terminal");
        std::process::exit(1);
    }

    let source: Arc<dyn PayloadSource> = match &args.file {
        Some(path) => Arc::new(FileSource::new(path)),
        None => match HttpSource::new(&args.url) {
            Ok(s) => Arc::new(s),
            Err(e) => {
                error!(error = %e, "failed to set up HTTP client");
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
    };

    info!(source = %source.describe(), route = %args.route, "starting");

    let app = App::new(source, args.columns);
    if let Err(e) = app.run(args.route, TICK_RATE) {
        error!(error = %e, "terminal error");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Where log events are written.
#[derive(Debug, PartialEq, Eq)]
enum LogSink<'a> {
    File(&'a Path),
    /// Nothing may be written to the terminal the TUI draws on.
    Discard,
}

fn log_sink(log_file: Option<&Path>) -> LogSink<'_> {
    match log_file {
        Some(path) => LogSink::File(path),
        None => LogSink::Discard,
    }
}

/// Initializes tracing. `RUST_LOG` is respected; `-v`/`-q` set the level
/// for this crate.
fn init_logging(verbose: u8, quiet: bool, log_file: Option<&Path>) -> io::Result<()> {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy()
        .add_directive(
            format!("datadash={level}")
                .parse::<Directive>()
                .unwrap_or_else(|_| LevelFilter::from_level(level).into()),
        );

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match log_sink(log_file) {
        LogSink::File(path) => {
            let file = File::options().create(true).append(true).open(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        LogSink::Discard => builder.with_writer(io::sink).init(),
    }
    Ok(())
}
