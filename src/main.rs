//! Konami Code Esoteric Language - CLI

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use konamicode::util::logger;
use konamicode::{NAME, VERSION};

/// Interpreter for the Konami Code esoteric language
///
/// A piped standard input is always the program source; FILE is read
/// only when stdin is an interactive terminal. Program input is
/// consumed from standard input during execution.
#[derive(Parser, Debug)]
#[command(name = "konamicode")]
#[command(version = VERSION)]
#[command(about = NAME, long_about = None)]
struct Args {
    /// Program file to run (ignored when a program is piped on stdin)
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Print the compiled instruction listing instead of executing
    #[arg(long)]
    dump: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.verbose {
        logger::init_debug();
    } else {
        logger::init_cli();
    }

    match konamicode_main(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // 诊断约定:stderr 上一行,带程序名前缀,退出码 1
            eprintln!("{}: {:#}", program_name(), err);
            ExitCode::FAILURE
        }
    }
}

fn konamicode_main(args: &Args) -> Result<()> {
    let source = read_source(args)?;
    if args.dump {
        konamicode::dump(&source)
    } else {
        konamicode::run(&source)
    }
}

/// Select the program source: a piped stdin, or exactly one file argument.
///
/// Piped input takes precedence; file arguments are only consulted when
/// stdin is an interactive terminal, and then exactly one is required.
fn read_source(args: &Args) -> Result<String> {
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        let mut source = String::new();
        stdin
            .lock()
            .read_to_string(&mut source)
            .context("Failed to read program source")?;
        return Ok(source);
    }

    match args.files.as_slice() {
        [path] => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display())),
        _ => bail!("usage: konamicode <file>"),
    }
}

/// Diagnostic prefix, taken from the running executable's file name
fn program_name() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| NAME.to_string())
}
