//! Binary that reads `V`/`E` commands from standard in and answers every valid edge list with a
//! minimum vertex cover on standard out. Logs go to standard error.

use std::error;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sat_cover::{
    minimize::Minimizer,
    oracle::{CdclSolver, SolverConfig},
    session::Session,
};

#[derive(Parser, Debug)]
#[command(name = "cover", version, about = "Minimum vertex cover through a SAT reduction")]
struct Cli {
    /// Log verbosity on stderr (-v, -vv, -vvv). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Gives up on a single cover size after this many milliseconds, rounded up to whole
    /// seconds.
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Writes every formula handed to the solver as DIMACS into this directory.
    #[arg(long, value_name = "DIR")]
    dump_dir: Option<PathBuf>,
}

pub fn main() -> Result<(), Box<dyn error::Error>> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let oracle = CdclSolver::with_config(SolverConfig {
        timeout: cli.timeout_ms.map(Duration::from_millis),
        cancel: None,
    });
    let mut minimizer = Minimizer::new(oracle);
    if let Some(dir) = cli.dump_dir {
        std::fs::create_dir_all(&dir)?;
        minimizer = minimizer.with_dump_dir(dir);
    }

    let stdin = io::stdin();
    let stdin = stdin.lock();
    let stdout = io::stdout();
    let stdout = stdout.lock();
    Session::new(minimizer).run(stdin, stdout)?;
    Ok(())
}
