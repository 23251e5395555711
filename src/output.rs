//! Console output for sorting runs.
//!
//! All user-facing lines go through [`OutputFormatter`] so styling stays
//! consistent. Diagnostics go through `tracing` instead.

use crate::sorter::{Operation, PlannedMove, SortSummary};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

/// Manages CLI output with consistent styling.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Formats a user-facing error line.
    ///
    /// # Example
    ///
    /// ```
    /// use extsort::output::OutputFormatter;
    /// assert_eq!(
    ///     OutputFormatter::error_line("Source folder does not exist."),
    ///     "Error: Source folder does not exist."
    /// );
    /// ```
    pub fn error_line(message: &str) -> String {
        format!("Error: {}", message)
    }

    /// Prints `Error: <message>` in red on stderr.
    pub fn error(message: &str) {
        eprintln!("{}", Self::error_line(message).red());
    }

    /// Prints a regular message without styling.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a success message in green.
    pub fn success(message: &str) {
        println!("{}", message.green());
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Formats the notification line for a completed move.
    ///
    /// # Example
    ///
    /// ```
    /// use extsort::output::OutputFormatter;
    /// use extsort::sorter::Operation;
    /// use std::path::PathBuf;
    ///
    /// let op = Operation {
    ///     file_name: "cat.png".to_string(),
    ///     original_path: PathBuf::from("/in/cat.png"),
    ///     new_path: PathBuf::from("/out/Images/cat.png"),
    ///     category: "Images",
    ///     matched: true,
    /// };
    /// assert_eq!(OutputFormatter::move_line(&op), "[Moved] cat.png → Images");
    /// ```
    pub fn move_line(operation: &Operation) -> String {
        if operation.matched {
            format!("[Moved] {} → {}", operation.file_name, operation.category)
        } else {
            format!("[Misc] {}", operation.file_name)
        }
    }

    /// Prints the notification line for a completed move.
    pub fn moved(operation: &Operation) {
        let line = Self::move_line(operation);
        if operation.matched {
            println!("{}", line.green());
        } else {
            println!("{}", line.yellow());
        }
    }

    /// Prints what a dry run would do with one file.
    pub fn dry_run_move(planned: &PlannedMove) {
        Self::dry_run_notice(&format!("{} → {}", planned.file_name, planned.category));
    }

    /// Prints a dry-run notice message.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }

    /// Creates a progress bar for `total` file moves.
    ///
    /// The bar draws on stderr and stays hidden when stderr is not a terminal.
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .map(|style| style.progress_chars("█▓░"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        pb
    }

    /// Prints a summary table with file counts by category.
    pub fn summary_table(summary: &SortSummary) {
        Self::header("SUMMARY");

        let max_category_len = summary
            .category_counts
            .keys()
            .map(|name| name.len())
            .max()
            .unwrap_or(0)
            .max(8); // At least "Category" width

        println!(
            "{:<width$} | {}",
            "Category".bold(),
            "Files".bold(),
            width = max_category_len
        );
        println!("{}", "-".repeat(max_category_len + 10));

        // BTreeMap keeps the rows sorted by category name
        for (category, count) in &summary.category_counts {
            println!(
                "{:<width$} | {} {}",
                category,
                count.to_string().green(),
                file_word(*count),
                width = max_category_len
            );
        }

        println!("{}", "-".repeat(max_category_len + 10));
        println!(
            "{:<width$} | {} {}",
            "Total".bold(),
            summary.total_files.to_string().green().bold(),
            file_word(summary.total_files),
            width = max_category_len
        );
    }
}

fn file_word(count: usize) -> &'static str {
    if count == 1 { "file" } else { "files" }
}
