//! Codetally CLI - interactive file, line and character counts for a project.

use std::io::{self, Write};

use clap::Parser;
use codetally::catalog::PROJECT_TYPES;
use codetally::errors::{exit_code, TallyError};
use codetally::input::TerminalInput;
use codetally::report::display_results;
use codetally::scan::Scan;
use codetally::selector::{resolve_directory, select_project_type, PathResolution, Selection};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "codetally")]
#[command(about = "Count lines and files in code projects")]
#[command(version)]
struct Cli {
    /// Source directory path to analyze
    #[arg(long)]
    src: Option<String>,

    /// Log scan progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("CODETALLY_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let code = match run(&cli) {
        Ok(()) => 0,
        Err(e) => {
            if !e.is_reported() {
                eprintln!("error: {}", e);
            }
            exit_code(&e)
        }
    };
    std::process::exit(code);
}

fn run(cli: &Cli) -> Result<(), TallyError> {
    let mut input = TerminalInput::install()?;
    let interrupt = input.interrupt_flag();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let project = match select_project_type(PROJECT_TYPES, &mut input, &mut out)? {
        Selection::Chosen(project) => project,
        Selection::Quit | Selection::Cancelled => return Ok(()),
    };

    let root = match resolve_directory(cli.src.as_deref(), project, &mut input, &mut out)? {
        PathResolution::Resolved(root) => root,
        PathResolution::Invalid | PathResolution::Cancelled => return Ok(()),
    };

    writeln!(out)?;
    writeln!(out, "Analyzing directory: {}", root.display())?;
    writeln!(out, "Processing files...")?;
    out.flush()?;

    let mut warning_error: Option<io::Error> = None;
    let outcome = {
        let warnings = &mut out;
        Scan::new(&root)
            .extensions(project.extensions)
            .interrupt(&interrupt)
            .on_skip(|skip| {
                if warning_error.is_some() {
                    return;
                }
                let written = writeln!(
                    warnings,
                    "Warning: Could not read {}: {}",
                    skip.path.display(),
                    skip.error
                );
                warning_error = written.err();
            })
            .run()
    };
    if let Some(e) = warning_error {
        return Err(e.into());
    }

    match outcome {
        Ok(result) => {
            display_results(&mut out, &result, project)?;
            Ok(())
        }
        Err(e) if e.is_interrupted() => {
            writeln!(out)?;
            writeln!(out, "Operation cancelled.")?;
            Ok(())
        }
        Err(e) => {
            writeln!(out, "Error analyzing directory: {}", e)?;
            writeln!(out, "Analysis failed.")?;
            out.flush()?;
            Err(e.into())
        }
    }
}
