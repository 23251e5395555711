//! extsort - sort the files of a folder into category subfolders
//!
//! Files are classified by extension against a fixed, ordered category table
//! and moved into `<destination>/<category>`; anything unmatched goes to
//! `<destination>/Misc`. Only the top level of the source folder is sorted.

pub mod cli;
pub mod file_category;
pub mod output;
pub mod sorter;

pub use cli::{Args, SortCommand, run_cli};
pub use file_category::{CATEGORIES, Category, MISC_CATEGORY, category_for_extension};
pub use sorter::{FileSorter, Operation, PlannedMove, SortError, SortResult, SortSummary};
