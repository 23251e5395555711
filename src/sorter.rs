//! Moves the files of a source folder into category folders of a destination.
//!
//! A run enumerates the top level of the source once, skips directories,
//! and relocates every remaining entry into `<destination>/<category>` (or
//! `<destination>/Misc`). Category folders are created on first use.

use crate::file_category::{self, MISC_CATEGORY};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while sorting a folder.
#[derive(Debug, Error)]
pub enum SortError {
    /// The source path is missing or is not a directory.
    #[error("Source folder does not exist.")]
    InvalidSource { path: PathBuf },

    /// The source directory could not be listed.
    #[error("Failed to read directory {}: {source}", .path.display())]
    ReadDirFailed { path: PathBuf, source: io::Error },

    /// A category folder could not be created.
    #[error("Failed to create directory {}: {source}", .path.display())]
    DirectoryCreationFailed { path: PathBuf, source: io::Error },

    /// The target category folder already holds a file with the same name.
    #[error("Refusing to overwrite existing file {}", .path.display())]
    DestinationExists { path: PathBuf },

    /// The file could not be moved into its category folder.
    #[error("Failed to move {} to {}: {error}", .from.display(), .to.display())]
    FileMoveFailure {
        from: PathBuf,
        to: PathBuf,
        #[source]
        error: io::Error,
    },
}

impl SortError {
    /// Returns false for an invalid source, which ends the run before
    /// anything is touched. Every other error interrupts a run.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, SortError::InvalidSource { .. })
    }
}

/// Result type for sorting operations.
pub type SortResult<T> = Result<T, SortError>;

/// A file found in the source folder together with where it will go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedMove {
    /// File name, lossily converted for display.
    pub file_name: String,
    /// Current location of the file.
    pub source_path: PathBuf,
    /// Category folder name, `Misc` when nothing matched.
    pub category: &'static str,
    /// Whether the extension matched a category in the table.
    pub matched: bool,
    /// `<destination>/<category>`.
    pub target_dir: PathBuf,
    /// `<destination>/<category>/<file name>`.
    pub target_path: PathBuf,
}

/// A completed move.
///
/// Returned by [`FileSorter::execute`] once the file sits at `new_path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    /// File name, lossily converted for display.
    pub file_name: String,
    /// Where the file was before the move.
    pub original_path: PathBuf,
    /// Where the file is now, `<destination>/<category>/<file name>`.
    pub new_path: PathBuf,
    /// Category folder the file was moved into.
    pub category: &'static str,
    /// False when the file went to `Misc` because no category matched.
    pub matched: bool,
}

/// File counts per category for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortSummary {
    /// Number of files per category folder, keyed by folder name.
    pub category_counts: BTreeMap<String, usize>,
    /// Number of files across all categories.
    pub total_files: usize,
}

impl SortSummary {
    /// Counts one more file into `category`.
    pub fn record(&mut self, category: &str) {
        *self
            .category_counts
            .entry(category.to_string())
            .or_insert(0) += 1;
        self.total_files += 1;
    }

    /// Builds the summary of a completed run.
    ///
    /// # Arguments
    ///
    /// * `operations` - The moves performed during the run
    ///
    /// # Example
    ///
    /// ```
    /// use extsort::sorter::{Operation, SortSummary};
    /// use std::path::PathBuf;
    ///
    /// let op = Operation {
    ///     file_name: "song.mp3".to_string(),
    ///     original_path: PathBuf::from("/in/song.mp3"),
    ///     new_path: PathBuf::from("/out/Audio/song.mp3"),
    ///     category: "Audio",
    ///     matched: true,
    /// };
    /// let summary = SortSummary::from_operations(&[op]);
    /// assert_eq!(summary.total_files, 1);
    /// assert_eq!(summary.category_counts.get("Audio"), Some(&1));
    /// ```
    pub fn from_operations(operations: &[Operation]) -> Self {
        let mut summary = Self::default();
        for op in operations {
            summary.record(op.category);
        }
        summary
    }

    /// Builds the summary a run of `plan` would produce.
    ///
    /// # Arguments
    ///
    /// * `plan` - Moves returned by [`FileSorter::plan`]
    ///
    /// # Returns
    ///
    /// Counts per target category; used by dry runs, where nothing moves.
    pub fn from_plan(plan: &[PlannedMove]) -> Self {
        let mut summary = Self::default();
        for planned in plan {
            summary.record(planned.category);
        }
        summary
    }
}

/// Sorts files into category folders.
pub struct FileSorter;

impl FileSorter {
    /// Lists the files of `source` and resolves a target for each one.
    ///
    /// Nothing on disk is touched. Directories (including symlinks to
    /// directories) are skipped. The returned moves follow the order in
    /// which the filesystem enumerated the entries.
    ///
    /// # Errors
    ///
    /// Returns `SortError::InvalidSource` if `source` is not a directory and
    /// `SortError::ReadDirFailed` if it cannot be listed.
    pub fn plan(source: &Path, destination: &Path) -> SortResult<Vec<PlannedMove>> {
        if !source.is_dir() {
            return Err(SortError::InvalidSource {
                path: source.to_path_buf(),
            });
        }

        let entries = fs::read_dir(source).map_err(|e| SortError::ReadDirFailed {
            path: source.to_path_buf(),
            source: e,
        })?;

        let mut plan = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| SortError::ReadDirFailed {
                path: source.to_path_buf(),
                source: e,
            })?;
            let source_path = entry.path();

            if source_path.is_dir() {
                debug!(path = %source_path.display(), "Skipping directory");
                continue;
            }

            let ext = file_category::extension_of(&source_path);
            let category = file_category::target_folder_name(&ext);
            let target_dir = destination.join(category);
            let target_path = target_dir.join(entry.file_name());

            debug!(
                path = %source_path.display(),
                ext = %ext,
                category,
                "Resolved category"
            );

            plan.push(PlannedMove {
                file_name: entry.file_name().to_string_lossy().into_owned(),
                source_path,
                category,
                matched: category != MISC_CATEGORY,
                target_dir,
                target_path,
            });
        }

        Ok(plan)
    }

    /// Creates `path` and any missing parents. Succeeds if it already exists.
    pub fn ensure_folder(path: &Path) -> SortResult<()> {
        fs::create_dir_all(path).map_err(|e| SortError::DirectoryCreationFailed {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Moves one planned file into its category folder.
    ///
    /// Existing files in the target folder are never overwritten. When the
    /// target lives on another filesystem the file is copied and the original
    /// removed.
    pub fn execute(planned: &PlannedMove) -> SortResult<Operation> {
        Self::ensure_folder(&planned.target_dir)?;

        if fs::symlink_metadata(&planned.target_path).is_ok() {
            return Err(SortError::DestinationExists {
                path: planned.target_path.clone(),
            });
        }

        move_file(&planned.source_path, &planned.target_path)?;
        info!(
            from = %planned.source_path.display(),
            to = %planned.target_path.display(),
            "Moved file"
        );

        Ok(Operation {
            file_name: planned.file_name.clone(),
            original_path: planned.source_path.clone(),
            new_path: planned.target_path.clone(),
            category: planned.category,
            matched: planned.matched,
        })
    }

    /// Sorts every file at the top level of `source` into `destination`.
    ///
    /// `on_move` is called after each successful move. The first failure
    /// stops the run; files moved before it stay where they were moved.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use extsort::sorter::FileSorter;
    /// use std::path::Path;
    ///
    /// let moved = FileSorter::sort(
    ///     Path::new("/home/user/Downloads"),
    ///     Path::new("/home/user/Sorted"),
    ///     |op| println!("{} -> {}", op.file_name, op.category),
    /// );
    /// ```
    pub fn sort<F>(
        source: &Path,
        destination: &Path,
        on_move: F,
    ) -> SortResult<Vec<Operation>>
    where
        F: FnMut(&Operation),
    {
        let plan = Self::plan(source, destination)?;
        Self::execute_plan(&plan, on_move)
    }

    /// Executes planned moves in order, stopping at the first failure.
    pub fn execute_plan<F>(plan: &[PlannedMove], mut on_move: F) -> SortResult<Vec<Operation>>
    where
        F: FnMut(&Operation),
    {
        let mut operations = Vec::with_capacity(plan.len());

        for planned in plan {
            let operation = Self::execute(planned)?;
            on_move(&operation);
            operations.push(operation);
        }

        Ok(operations)
    }
}

fn move_file(from: &Path, to: &Path) -> SortResult<()> {
    let failure = |error| SortError::FileMoveFailure {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        error,
    };

    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            warn!(error = %e, "Rename crosses devices, falling back to copy and remove");
            copy_then_remove(from, to)
        }
        Err(e) => Err(failure(e)),
    }
}

/// Copies `from` to `to` keeping its timestamps, then removes `from`.
fn copy_then_remove(from: &Path, to: &Path) -> SortResult<()> {
    fs::copy(from, to).map_err(|error| SortError::FileMoveFailure {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        error,
    })?;

    if let Err(e) = copy_times(from, to) {
        warn!(error = %e, path = %to.display(), "Could not preserve timestamps");
    }

    finish_copy(from, to, fs::remove_file(from))
}

fn copy_times(from: &Path, to: &Path) -> io::Result<()> {
    let metadata = fs::metadata(from)?;
    let times = fs::FileTimes::new()
        .set_accessed(metadata.accessed()?)
        .set_modified(metadata.modified()?);
    fs::OpenOptions::new().write(true).open(to)?.set_times(times)
}

/// Completes a copy-based move given the outcome of removing the original.
///
/// If the original could not be removed the copy is deleted again, so the
/// file stays in exactly one place.
fn finish_copy(from: &Path, to: &Path, removal: io::Result<()>) -> SortResult<()> {
    removal.map_err(|error| {
        if let Err(cleanup) = fs::remove_file(to) {
            warn!(error = %cleanup, path = %to.display(), "Could not remove copied file");
        }
        SortError::FileMoveFailure {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            error,
        }
    })
}
