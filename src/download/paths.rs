use std::path::{Path, PathBuf};

use crate::library::OwnedRecord;

/// Extension of the premium ebook the service delivers.
const BOOK_EXTENSION: &str = "epub";

/// Local path for a book: `{directory}/{slug}.epub`.
pub fn book_path(directory: &Path, record: &OwnedRecord) -> PathBuf {
    directory.join(format!("{}.{}", book_stem(record), BOOK_EXTENSION))
}

/// Local path with the identifier appended: `{directory}/{slug}-{id}.epub`.
///
/// Used when another book in the same run already claimed [`book_path`].
pub fn book_path_with_id(directory: &Path, record: &OwnedRecord) -> PathBuf {
    let stem = book_stem(record);
    let id = clean_filename(&record.id);
    if stem == id.trim() {
        return book_path(directory, record);
    }
    directory.join(format!("{}-{}.{}", stem, id.trim(), BOOK_EXTENSION))
}

fn book_stem(record: &OwnedRecord) -> String {
    let stem = clean_filename(record.file_stem());
    let stem = if stem.trim().is_empty() {
        clean_filename(&record.id)
    } else {
        stem
    };
    stem.trim().to_string()
}

/// Temporary path the transfer streams into before the final rename.
pub fn part_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".part");
    path.with_file_name(name)
}

/// Clean a filename by removing characters that are invalid on common
/// filesystems: `/`, `\`, `:`, `*`, `?`, `"`, `<`, `>`, `|`, and control
/// characters.
pub fn clean_filename(filename: &str) -> String {
    filename
        .chars()
        .filter(|c| {
            !c.is_control()
                && !matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|')
        })
        .collect()
}
