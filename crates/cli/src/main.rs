// This code is part of star-route.
//
// This code is licensed under the Apache License, Version 2.0. You may
// obtain a copy of this license in the LICENSE.txt file in the root directory
// of this source tree or at http://www.apache.org/licenses/LICENSE-2.0.

//! `star-route`: an interactive front-end over [`star_route_core`], plus a
//! `--bench` mode that reproduces the original program's `REPEAT`-loop
//! comparison between the trivial router and the decomposition-derived
//! lower bound.

mod bench;
mod error;
mod instance;
mod repl;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;

use error::CliResult;
use instance::Instance;

/// `m` defaults to this when `--leaves` is omitted and the user declines
/// the interactive prompt, mirroring the original's compile-time `SET_M`
/// override.
const DEFAULT_M: usize = 5;

/// Saved/loaded instances always live at `<save-dir>/p4.fcs`, matching the
/// original solver's hard-coded `l` command.
const SAVE_NAME: &str = "p4";

#[derive(Parser)]
#[command(name = "star-route", about = "Star-graph qubit routing: baseline router and cycle-decomposition lower bound")]
struct Cli {
    /// Number of centres `k`. Prompted interactively if omitted.
    #[arg(short = 'k', long = "centres")]
    centres: Option<usize>,

    /// Leaves per centre `m`.
    #[arg(short = 'm', long = "leaves", default_value_t = DEFAULT_M)]
    leaves: usize,

    /// Run `N` random instances through both algorithms and print averaged
    /// statistics instead of entering the interactive REPL.
    #[arg(long = "bench", value_name = "N")]
    bench: Option<u32>,

    /// Directory instance files are saved to and loaded from.
    #[arg(long = "save-dir", default_value = ".")]
    save_dir: PathBuf,

    /// Raise log verbosity: -v for info, -vv for debug, -vvv for trace.
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    pretty_env_logger::formatted_builder()
        .filter_level(level)
        .init();
}

/// Prompt on stdin for `k` (and, if not passed on the command line, `m`),
/// mirroring the original's `getParams()`.
fn prompt_centres() -> io::Result<usize> {
    print!("k (number of centres): ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    line.trim()
        .parse::<usize>()
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "expected an integer"))
}

fn run(cli: Cli) -> CliResult<()> {
    let k = match cli.centres {
        Some(k) => k,
        None => prompt_centres()?,
    };
    let m = cli.leaves;

    if let Some(repeat) = cli.bench {
        let mut rng = rand::thread_rng();
        let report = bench::run(k, m, repeat, &mut rng)?;
        println!("{report}");
        return Ok(());
    }

    let instance = Instance::random(k, m, &mut rand::thread_rng());
    let save_path = cli.save_dir.join(SAVE_NAME);
    repl::run(instance, save_path)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("star-route: {err}");
            ExitCode::FAILURE
        }
    }
}
