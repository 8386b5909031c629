//! Source folder listing.
//! Single level only; directory entries are excluded, everything else is a
//! candidate. Symlinks are not followed when deciding the entry type.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::errors::MoverError;

/// Names of the immediate non-directory children of `dir`, in the order the
/// directory iterator yields them.
///
/// An unreadable or missing folder is a `DirectoryRead` error, never an empty
/// listing — an empty-but-present folder returns `Ok(vec![])` and the two
/// cases must stay distinguishable. Names that are not valid UTF-8 are
/// skipped with a warning; the matching contract is defined over strings.
pub fn list_file_names(dir: &Path) -> Result<Vec<String>, MoverError> {
    let read_err = |source| MoverError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        if entry.file_type().map_err(read_err)?.is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => {
                warn!(name = %raw.to_string_lossy(), "Skipping non-UTF-8 file name");
            }
        }
    }

    debug!(dir = %dir.display(), count = names.len(), "Listed source folder");
    Ok(names)
}
