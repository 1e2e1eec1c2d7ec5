//! CLI argument parsing and file discovery

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// paramsync - placeholder scanning and parameter synchronization for SQL templates
#[derive(Parser, Debug)]
#[command(name = "paramsync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan SQL files for placeholder tokens
    Scan {
        /// Files or directories to scan (use - for stdin)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Reconcile a persisted parameter list against a SQL file
    Sync {
        /// Parameter list state file (JSON array)
        #[arg(short, long)]
        params: PathBuf,

        /// Write the updated list back to the state file
        #[arg(short, long)]
        write: bool,

        /// SQL file to reconcile against (use - for stdin)
        file: PathBuf,
    },
    /// Render the template-context payload for a parameter list
    Context {
        /// Parameter list state file (JSON array)
        #[arg(short, long)]
        params: PathBuf,
    },
}

/// Discover SQL files from a path (file, directory or glob pattern)
pub fn discover_sql_files(path: &Path) -> Vec<PathBuf> {
    if path.is_file() {
        return vec![path.to_path_buf()];
    }

    if path.is_dir() {
        let mut files = Vec::new();
        for entry in walkdir::WalkDir::new(path)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == "sql") {
                files.push(path.to_path_buf());
            }
        }
        return files;
    }

    // Handle glob patterns
    if let Ok(paths) = glob::glob(path.to_str().unwrap_or("")) {
        return paths
            .filter_map(|p| p.ok())
            .filter(|p| p.is_file())
            .filter(|p| p.extension().map_or(false, |e| e == "sql"))
            .collect();
    }

    vec![]
}
