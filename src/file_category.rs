//! Extension-based file categorization.
//!
//! The category table is an ordered list: an extension may belong to more
//! than one category, and lookups resolve to the first category that lists it.
//!
//! # Examples
//!
//! ```
//! use extsort::file_category::{category_for_extension, target_folder_name};
//!
//! assert_eq!(category_for_extension(".png").map(|c| c.name), Some("Images"));
//! assert_eq!(category_for_extension(".csv").map(|c| c.name), Some("Documents"));
//! assert_eq!(target_folder_name(".xyz123"), "Misc");
//! ```

use std::path::Path;

/// Folder that receives every file whose extension is not in the table.
pub const MISC_CATEGORY: &str = "Misc";

/// A named group of file extensions.
///
/// Extensions are stored lowercase with their leading dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    /// Folder name used under the destination root.
    pub name: &'static str,
    /// Member extensions, e.g. `".jpg"`.
    pub extensions: &'static [&'static str],
}

impl Category {
    /// Returns true if `ext` is one of this category's extensions.
    pub fn contains(&self, ext: &str) -> bool {
        self.extensions.iter().any(|member| *member == ext)
    }
}

/// The category table, in lookup order.
pub const CATEGORIES: &[Category] = &[
    Category {
        name: "Images",
        extensions: &[
            ".jpg", ".jpeg", ".png", ".gif", ".bmp", ".tiff", ".tif", ".svg", ".webp", ".psd",
            ".raw", ".ico", ".heif", ".heic",
        ],
    },
    Category {
        name: "Videos",
        extensions: &[
            ".mp4", ".mkv", ".mov", ".avi", ".wmv", ".flv", ".webm", ".mpeg", ".mpg", ".m4v",
            ".3gp", ".ts",
        ],
    },
    Category {
        name: "Audio",
        extensions: &[
            ".mp3", ".wav", ".aac", ".m4a", ".flac", ".ogg", ".oga", ".aiff", ".alac", ".wma",
            ".mid", ".midi",
        ],
    },
    Category {
        name: "Documents",
        extensions: &[
            ".pdf", ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx", ".txt", ".rtf", ".odt",
            ".ods", ".odp", ".md", ".csv", ".epub",
        ],
    },
    Category {
        name: "Archives",
        extensions: &[".zip", ".rar", ".7z", ".tar", ".gz", ".bz2", ".xz", ".iso"],
    },
    Category {
        name: "Code",
        extensions: &[
            ".py", ".java", ".js", ".jsx", ".ts", ".tsx", ".c", ".cpp", ".h", ".hpp", ".cs",
            ".php", ".rb", ".go", ".rs", ".swift", ".kt", ".sh", ".bat", ".ps1", ".sql",
            ".html", ".css", ".xml", ".json", ".yaml", ".yml", ".ini", ".toml",
        ],
    },
    Category {
        name: "Executables",
        extensions: &[".exe", ".msi", ".apk", ".app", ".deb", ".rpm", ".bin", ".run"],
    },
    Category {
        name: "Fonts",
        extensions: &[".ttf", ".otf", ".woff", ".woff2", ".fon"],
    },
    Category {
        name: "3D_Models",
        extensions: &[".obj", ".fbx", ".blend", ".stl", ".dae", ".gltf", ".glb"],
    },
    // Also listed under Documents, which comes first.
    Category {
        name: "Spreadsheets",
        extensions: &[".xls", ".xlsx", ".ods", ".csv"],
    },
    Category {
        name: "Databases",
        extensions: &[".db", ".sqlite", ".sqlite3", ".mdb", ".accdb"],
    },
    Category {
        name: "Design",
        extensions: &[".ai", ".eps", ".indd", ".xd", ".sketch"],
    },
    Category {
        name: "Torrents",
        extensions: &[".torrent"],
    },
];

/// Finds the first category whose extension set contains `ext`.
///
/// `ext` must already be lowercase and include its leading dot; no
/// normalization happens here.
///
/// # Examples
///
/// ```
/// use extsort::file_category::category_for_extension;
///
/// assert_eq!(category_for_extension(".mp3").map(|c| c.name), Some("Audio"));
/// assert_eq!(category_for_extension(".MP3"), None);
/// assert_eq!(category_for_extension(""), None);
/// ```
pub fn category_for_extension(ext: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|category| category.contains(ext))
}

/// Returns the folder name a file with extension `ext` belongs in.
pub fn target_folder_name(ext: &str) -> &'static str {
    category_for_extension(ext).map_or(MISC_CATEGORY, |category| category.name)
}

/// Extracts the lowercased extension of `path`, including the leading dot.
///
/// The extension is the text from the last dot of the file name onwards,
/// ignoring any dots the name starts with. Returns an empty string when
/// there is none, so `.bashrc` and `..jpg` have no extension.
///
/// # Examples
///
/// ```
/// use extsort::file_category::extension_of;
/// use std::path::Path;
///
/// assert_eq!(extension_of(Path::new("PHOTO.JPG")), ".jpg");
/// assert_eq!(extension_of(Path::new("backup.tar.gz")), ".gz");
/// assert_eq!(extension_of(Path::new("README")), "");
/// assert_eq!(extension_of(Path::new("..jpg")), "");
/// ```
pub fn extension_of(path: &Path) -> String {
    let Some(name) = path.file_name() else {
        return String::new();
    };
    let name = name.to_string_lossy();
    let stem_and_ext = name.trim_start_matches('.');

    stem_and_ext
        .rfind('.')
        .map(|dot| stem_and_ext[dot..].to_lowercase())
        .unwrap_or_default()
}
