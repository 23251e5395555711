//! Command-line interface module for extsort.
//!
//! This module handles argument parsing, path resolution, and orchestration
//! of a sorting run (or a dry run that only reports what would happen).

use crate::output::OutputFormatter;
use crate::sorter::{FileSorter, SortResult, SortSummary};
use clap::{ArgAction, Parser};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Sort files into category folders.
#[derive(Debug, Clone, Parser)]
#[command(name = "extsort", version, about)]
pub struct Args {
    /// Folder to sort
    pub source: PathBuf,

    /// Optional destination root (defaults to source)
    pub destination: Option<PathBuf>,

    /// Show where each file would go without moving anything
    #[arg(long)]
    pub dry_run: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// A fully resolved sorting request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortCommand {
    /// Absolute path of the folder whose files are sorted.
    pub source: PathBuf,
    /// Absolute path under which category folders are created.
    pub destination: PathBuf,
    /// If true, report the plan without touching the filesystem.
    pub dry_run: bool,
}

impl SortCommand {
    /// Resolves both paths to absolute form. The destination defaults to
    /// the source when omitted.
    ///
    /// # Examples
    ///
    /// ```
    /// use extsort::cli::{Args, SortCommand};
    /// use std::path::PathBuf;
    ///
    /// let args = Args {
    ///     source: PathBuf::from("/data/inbox"),
    ///     destination: None,
    ///     dry_run: false,
    ///     verbose: 0,
    /// };
    /// let command = SortCommand::from_args(&args);
    /// assert_eq!(command.destination, PathBuf::from("/data/inbox"));
    /// ```
    pub fn from_args(args: &Args) -> Self {
        let source = resolve_path(&args.source);
        let destination = args
            .destination
            .as_deref()
            .map(resolve_path)
            .unwrap_or_else(|| source.clone());

        Self {
            source,
            destination,
            dry_run: args.dry_run,
        }
    }
}

/// Makes `path` absolute against the current directory and removes `.` and
/// `..` segments without consulting the filesystem. The path is left as is
/// if it cannot be made absolute.
fn resolve_path(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    normalize_lexically(&absolute)
}

/// Collapses `.` and `..` segments; `..` at the root stays at the root.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => normalized.push(Component::ParentDir),
            },
            other => normalized.push(other),
        }
    }
    normalized
}

/// Runs a sorting command and returns the per-category counts.
///
/// # Errors
///
/// Returns `SortError::InvalidSource` before touching anything when the
/// source is not a directory. Any failure to create a folder or move a file
/// stops the run and is returned as is.
///
/// # Examples
///
/// ```no_run
/// use extsort::cli::{run_cli, SortCommand};
/// use std::path::PathBuf;
///
/// let command = SortCommand {
///     source: PathBuf::from("/home/user/Downloads"),
///     destination: PathBuf::from("/home/user/Downloads"),
///     dry_run: false,
/// };
/// match run_cli(&command) {
///     Ok(summary) => println!("{} files sorted", summary.total_files),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run_cli(command: &SortCommand) -> SortResult<SortSummary> {
    debug!(
        source = %command.source.display(),
        destination = %command.destination.display(),
        dry_run = command.dry_run,
        "Starting run"
    );

    if command.dry_run {
        sort_directory_dry_run(&command.source, &command.destination)
    } else {
        sort_directory(&command.source, &command.destination)
    }
}

/// Moves every top-level file of `source` into its category folder under
/// `destination`, printing one line per file.
pub fn sort_directory(source: &Path, destination: &Path) -> SortResult<SortSummary> {
    let plan = FileSorter::plan(source, destination)?;
    OutputFormatter::info(&format!("Sorting contents of: {}", source.display()));

    let pb = OutputFormatter::create_progress_bar(plan.len() as u64);
    let result = FileSorter::execute_plan(&plan, |operation| {
        pb.suspend(|| OutputFormatter::moved(operation));
        pb.inc(1);
    });
    pb.finish_and_clear();

    let operations = result?;
    let summary = SortSummary::from_operations(&operations);

    OutputFormatter::success("\nSorting complete!");
    if summary.total_files > 0 {
        OutputFormatter::summary_table(&summary);
    }

    Ok(summary)
}

/// Reports where each file of `source` would go without changing anything.
pub fn sort_directory_dry_run(source: &Path, destination: &Path) -> SortResult<SortSummary> {
    let plan = FileSorter::plan(source, destination)?;
    OutputFormatter::info(&format!("DRY RUN: Analyzing contents of: {}", source.display()));

    if plan.is_empty() {
        OutputFormatter::warning("No files found to sort.");
        return Ok(SortSummary::default());
    }

    for planned in &plan {
        OutputFormatter::dry_run_move(planned);
    }

    let summary = SortSummary::from_plan(&plan);
    OutputFormatter::summary_table(&summary);
    OutputFormatter::dry_run_notice("No files were moved.");

    Ok(summary)
}
