//! Find config spreadsheets under a root directory

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Prefix of the lock files office suites keep next to open documents
const LOCK_FILE_PREFIX: &str = "~$";

/// Error visiting a directory entry; aborts the walk
pub type WalkError = walkdir::Error;

/// Lazy, single-pass iterator over spreadsheet files under a root
///
/// Directories, lock files and files with other extensions are skipped.
/// Entries are visited in file name order.
pub struct SheetWalker<'a> {
    inner: walkdir::IntoIter,
    extensions: &'a [String],
}

impl<'a> SheetWalker<'a> {
    /// `extensions` are lower-case and without the leading dot
    pub fn new(root: &Path, extensions: &'a [String]) -> Self {
        Self {
            inner: WalkDir::new(root).sort_by_file_name().into_iter(),
            extensions,
        }
    }
}

impl Iterator for SheetWalker<'_> {
    type Item = Result<PathBuf, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(Err(e)),
            };

            if entry.file_type().is_dir() {
                continue;
            }

            let path = entry.path();
            if is_lock_file(path) {
                log::debug!("Skipping lock file {}", path.display());
                continue;
            }
            if !has_extension(path, self.extensions) {
                continue;
            }

            return Some(Ok(entry.into_path()));
        }
    }
}

fn is_lock_file(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with(LOCK_FILE_PREFIX))
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension().is_some_and(|ext| {
        let ext = ext.to_string_lossy();
        extensions.iter().any(|e| ext.eq_ignore_ascii_case(e))
    })
}
