//! `let` command-line.
//!
//! Parses one input file (or standard input when given `-`), reports every error found, and
//! optionally dumps the program back as fully parenthesized source and evaluates it.

use std::fs::File;
use std::io;
use std::io::prelude::*;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{self, Context};
use clap::{ArgAction, Parser};

use letlang::interpreter::Interpreter;

#[derive(Parser, Debug)]
#[command(name = "let", version, about, long_about = None, disable_version_flag = true)]
struct Args {
    /// Print version.
    #[arg(short = 'v', long, action = ArgAction::Version)]
    version: (),

    /// Dump the parsed program again.
    #[arg(short, long)]
    dump: bool,

    /// Evaluate the program.
    #[arg(short, long)]
    eval: bool,

    /// Input file.  Use "-" to read from standard input.
    file: PathBuf,
}

fn main() -> Result<ExitCode, anyhow::Error> {
    env_logger::init();
    let args = Args::parse();
    log::debug!("{:?}", args);

    let interp = Interpreter::new();
    let prg = if args.file == Path::new("-") {
        interp.parse(io::stdin().lock(), None)
    } else {
        let file = File::open(&args.file)
            .with_context(|| format!("cannot read file '{}'", args.file.display()))?;
        interp.parse(BufReader::new(file), Some(&args.file))
    };

    for diag in interp.diagnostics() {
        eprintln!("{}", diag);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.dump {
        out.write_all(prg.render().as_bytes())?;
    }
    if args.eval {
        prg.evaluate(&mut out)?;
    }
    out.flush()?;

    match interp.error_count() {
        0 => Ok(ExitCode::SUCCESS),
        num => {
            eprintln!("{} error(s) encountered", num);
            Ok(ExitCode::FAILURE)
        }
    }
}
