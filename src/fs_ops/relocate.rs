//! Single-file relocation.
//! Attempts an atomic rename first; a cross-device failure falls back to
//! copy+delete. A pre-existing destination entry is skipped, never
//! overwritten — the rename-failure kind decides the branch explicitly
//! instead of funneling every error into the fallback.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, info, warn};

use super::copy::copy_and_delete;
use super::disk::check_disk_space;

/// Per-file result of a relocation attempt.
#[derive(Debug)]
pub enum Outcome {
    /// The file now lives in the target folder and is gone from the source.
    Moved,
    /// The target already had an entry with this name; nothing was touched.
    SkippedExists,
    /// Rename and fallback both failed, or the source could not be removed
    /// after a successful copy (a duplicate is left behind in that case).
    Failed(anyhow::Error),
}

impl Outcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

/// Rename failure reduced to the classes the fallback decision needs.
enum RenameFailure {
    CrossDevice,
    Other(io::Error),
}

fn classify_rename_failure(e: io::Error) -> RenameFailure {
    #[cfg(unix)]
    if e.raw_os_error() == Some(libc::EXDEV) {
        return RenameFailure::CrossDevice;
    }

    #[cfg(windows)]
    if e.raw_os_error() == Some(17) {
        // ERROR_NOT_SAME_DEVICE
        return RenameFailure::CrossDevice;
    }

    RenameFailure::Other(e)
}

/// Relocate `name` from `source_dir` into `target_dir`.
///
/// In dry-run mode the collision check still runs, but the filesystem is not
/// modified; a would-be move reports `Moved`.
pub fn relocate_file(source_dir: &Path, name: &str, target_dir: &Path, dry_run: bool) -> Outcome {
    let src = source_dir.join(name);
    let dest = target_dir.join(name);

    // Never clobber: any entry under the destination name (including a
    // dangling symlink, hence symlink_metadata) means we leave both sides alone.
    if fs::symlink_metadata(&dest).is_ok() {
        debug!(dest = %dest.display(), "Destination already exists; skipping");
        return Outcome::SkippedExists;
    }

    if dry_run {
        info!(src = %src.display(), dest = %dest.display(), "dry-run: would move file");
        return Outcome::Moved;
    }

    match fs::rename(&src, &dest) {
        Ok(()) => {
            info!(src = %src.display(), dest = %dest.display(), "Renamed file atomically");
            Outcome::Moved
        }
        Err(e) => match classify_rename_failure(e) {
            RenameFailure::CrossDevice => {
                warn!(src = %src.display(), "Rename crossed a filesystem boundary; using copy+delete");
                match check_disk_space(&src, target_dir)
                    .and_then(|()| copy_and_delete(&src, &dest))
                {
                    Ok(_) => {
                        info!(src = %src.display(), dest = %dest.display(), "Copied and removed source");
                        Outcome::Moved
                    }
                    Err(e) => Outcome::Failed(e),
                }
            }
            RenameFailure::Other(e) => Outcome::Failed(anyhow::Error::new(e).context(format!(
                "rename '{}' -> '{}'",
                src.display(),
                dest.display()
            ))),
        },
    }
}
