// cwalk: run a small C-like program and exit with main's return value

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, anyhow, bail};
use tracing::{Level, info, warn};

use cwalk::parser::printer::print_program;
use cwalk::{Parser, PrintSink, RunConfig, StdoutSink, diagnostics};

const USAGE: &str = "\
Usage: cwalk [OPTIONS] <file>

Options:
  -h, --help           Print this help and exit
  -V, --version        Print the version and exit
  -v, --verbose        Log more (repeat for trace output)
      --config <file>  Load run settings from a TOML file
      --dump-ast       Print the parsed program in canonical form and exit";

#[derive(Debug, Default)]
struct Options {
    file: Option<PathBuf>,
    config: Option<PathBuf>,
    verbose: u8,
    dump_ast: bool,
}

enum Command {
    Help,
    Version,
    Run(Options),
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Command> {
    let mut options = Options::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            "-v" | "--verbose" => options.verbose = options.verbose.saturating_add(1),
            "-vv" => options.verbose = options.verbose.saturating_add(2),
            "--dump-ast" => options.dump_ast = true,
            "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| anyhow!("--config needs a file argument"))?;
                options.config = Some(PathBuf::from(path));
            }
            flag if flag.starts_with('-') && flag != "-" => bail!("unknown option '{flag}'"),
            _ => {
                if options.file.is_some() {
                    bail!("only one input file may be given");
                }
                options.file = Some(PathBuf::from(arg));
            }
        }
    }

    if options.file.is_none() {
        bail!("no input file provided");
    }
    Ok(Command::Run(options))
}

fn init_logging(config: &RunConfig, verbose: u8) {
    let level = match verbose {
        0 => config.log_level.parse().unwrap_or_else(|_| {
            eprintln!(
                "warning: unknown log level '{}', using 'warn'",
                config.log_level
            );
            Level::WARN
        }),
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(level)
        .init();
}

/// Run one file; the returned code is what the process exits with
fn run(options: Options) -> Result<i32> {
    let config = match &options.config {
        Some(path) => RunConfig::load(path)
            .with_context(|| format!("could not load config {}", path.display()))?,
        None => RunConfig::default(),
    };
    init_logging(&config, options.verbose);

    let path = options
        .file
        .ok_or_else(|| anyhow!("no input file provided"))?;
    let source = fs::read_to_string(&path)
        .with_context(|| format!("could not read {}", path.display()))?;
    let filename = path.display().to_string();

    if options.dump_ast {
        info!(file = %filename, "parsing");
        return match Parser::new(&source)
            .map_err(cwalk::Error::from)
            .and_then(|mut parser| Ok(parser.parse_program()?))
        {
            Ok(program) => {
                print!("{}", print_program(&program));
                Ok(0)
            }
            Err(err) => {
                eprint!("{}", diagnostics::render(&err, &source, Some(&filename)));
                Ok(1)
            }
        };
    }

    info!(file = %filename, "running");
    let mut stdout = StdoutSink::new();
    let outcome = cwalk::run_source(&source, &config, |text: &str| stdout.write_str(text));
    stdout.finish().context("could not write program output")?;

    match outcome {
        Ok(value) => {
            info!(value, "main returned");
            Ok(value as i32)
        }
        Err(err) => {
            warn!(phase = err.phase(), "run failed");
            eprint!("{}", diagnostics::render(&err, &source, Some(&filename)));
            Ok(1)
        }
    }
}

fn main() -> ExitCode {
    let command = match parse_args(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!();
            eprintln!("{USAGE}");
            return ExitCode::from(1);
        }
    };

    match command {
        Command::Help => {
            println!("{USAGE}");
            ExitCode::SUCCESS
        }
        Command::Version => {
            println!("cwalk {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Command::Run(options) => match run(options) {
            // The process status keeps only the low byte
            Ok(code) => ExitCode::from(code as u8),
            Err(err) => {
                eprintln!("error: {err:#}");
                ExitCode::from(1)
            }
        },
    }
}
