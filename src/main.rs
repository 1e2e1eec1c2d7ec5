//! paramsync CLI - parameter synchronization for SQL query templates

use clap::Parser;
use paramsync::cli::{discover_sql_files, Cli, Commands};
use paramsync::config::Limits;
use paramsync::error::format_placeholder_report;
use paramsync::{param, render_context, scan, sync};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let limits = Limits::from_env();

    match cli.command {
        Commands::Scan { files } => run_scan(&files),
        Commands::Sync {
            params,
            write,
            file,
        } => run_sync(&params, &file, write, &limits),
        Commands::Context { params } => run_context(&params),
    }
}

/// Run the scan command
fn run_scan(files: &[PathBuf]) -> ExitCode {
    let mut found_invalid = false;
    let mut had_errors = false;

    for file_path in files {
        // Handle stdin
        if file_path == Path::new("-") {
            match read_stdin() {
                Ok(contents) => {
                    found_invalid |= report_placeholders("<stdin>", &contents);
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    had_errors = true;
                }
            }
            continue;
        }

        // Handle files, directories and glob patterns
        for entry in discover_sql_files(file_path) {
            match fs::read_to_string(&entry) {
                Ok(contents) => {
                    found_invalid |= report_placeholders(&entry.display().to_string(), &contents);
                }
                Err(e) => {
                    eprintln!("{}: {}", entry.display(), e);
                    had_errors = true;
                }
            }
        }
    }

    if had_errors {
        ExitCode::from(2)
    } else if found_invalid {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

/// Print the placeholder report for one input; true when invalid tokens exist
fn report_placeholders(label: &str, contents: &str) -> bool {
    let report = scan(contents);

    for name in &report.valid {
        println!("{}: {}", label, name);
    }

    let invalid = report.invalid();
    for token in &invalid {
        let message = format!("'{}' is not a valid parameter name", token.name);
        eprintln!(
            "{}: {}",
            label,
            format_placeholder_report(contents, token.span.0, &message)
        );
    }

    !invalid.is_empty()
}

/// Run the sync command
fn run_sync(state_path: &Path, sql_path: &Path, write_mode: bool, limits: &Limits) -> ExitCode {
    let params = match load_params(state_path) {
        Ok(params) => params,
        Err(e) => {
            eprintln!("{}: {}", state_path.display(), e);
            return ExitCode::from(2);
        }
    };

    let sql = match read_input(sql_path) {
        Ok(sql) => sql,
        Err(e) => {
            eprintln!("{}: {}", sql_path.display(), e);
            return ExitCode::from(2);
        }
    };

    let outcome = sync(&sql, &params, limits);

    if outcome.limit_exceeded {
        eprintln!("you can add up to {} query parameters", limits.max_parameters);
    }
    for token in &outcome.invalid {
        let message = format!("'{}' is not a valid parameter name", token.name);
        eprintln!(
            "{}",
            format_placeholder_report(&sql, token.span.0, &message)
        );
    }

    let payload = match param::serialize_params(&outcome.params) {
        Ok(payload) => payload,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    if write_mode {
        if let Err(e) = fs::write(state_path, &payload) {
            eprintln!("{}: {}", state_path.display(), e);
            return ExitCode::from(2);
        }
    } else {
        println!("{}", payload);
    }

    if outcome.limit_exceeded || outcome.has_invalid() {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

/// Run the context command
fn run_context(state_path: &Path) -> ExitCode {
    let params = match load_params(state_path) {
        Ok(params) => params,
        Err(e) => {
            eprintln!("{}: {}", state_path.display(), e);
            return ExitCode::from(2);
        }
    };

    match render_context(&params) {
        Ok(payload) => {
            println!("{}", payload);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

/// Load a persisted parameter list from a state file
fn load_params(path: &Path) -> Result<Vec<param::Parameter>, paramsync::Error> {
    let contents = fs::read_to_string(path)?;
    param::parse_params(&contents)
}

/// Read a SQL input, treating `-` as stdin
fn read_input(path: &Path) -> Result<String, paramsync::Error> {
    if path == Path::new("-") {
        return read_stdin();
    }
    Ok(fs::read_to_string(path)?)
}

/// Read stdin to a string
fn read_stdin() -> Result<String, paramsync::Error> {
    let mut contents = String::new();
    io::stdin().read_to_string(&mut contents)?;
    Ok(contents)
}
