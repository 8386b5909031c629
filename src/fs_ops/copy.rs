//! Streaming copy + delete used by the cross-filesystem fallback.
//!
//! The copy writes to a temp file created with `create_new` in the target
//! directory, fsyncs it, then renames it onto the final name, so a torn copy
//! is never visible under the destination name. Snapshot semantics: the
//! source is read once from start to EOF; concurrent growth is not included.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

const BUF_SIZE: usize = 1024 * 1024; // 1 MiB buffers

/// Temp name alongside `dest`: hidden, pid-tagged, `.part`-suffixed so a
/// crashed run leaves an obviously incomplete artifact.
fn temp_sibling(dest: &Path) -> PathBuf {
    let name = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "file".into());
    dest.with_file_name(format!(".{}.{}.part", name, std::process::id()))
}

/// Copy `src` to `dest` via a temp file, then remove `src`.
///
/// Failure modes are deliberate:
/// - copy or temp-rename failure: temp file is cleaned up, `dest` never
///   appears, the source is untouched;
/// - delete failure after a successful copy: the destination copy is kept and
///   the error names the surviving source — a duplicate, not a rollback.
pub fn copy_and_delete(src: &Path, dest: &Path) -> Result<u64> {
    let tmp = temp_sibling(dest);

    let bytes = match copy_streaming(src, &tmp) {
        Ok(n) => n,
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            return Err(e).with_context(|| {
                format!("copy '{}' to temporary '{}'", src.display(), tmp.display())
            });
        }
    };

    if let Err(e) = fs::rename(&tmp, dest) {
        let _ = fs::remove_file(&tmp);
        return Err(e).with_context(|| {
            format!(
                "rename temporary '{}' -> '{}'",
                tmp.display(),
                dest.display()
            )
        });
    }

    #[cfg(unix)]
    if let Some(parent) = dest.parent() {
        // Best-effort: a failed directory fsync must not undo a completed copy.
        let _ = fsync_dir(parent);
    }

    debug!(src = %src.display(), dest = %dest.display(), bytes, "Copied across filesystems");

    fs::remove_file(src).with_context(|| {
        format!(
            "copied to '{}' but failed to remove source '{}'; both copies remain",
            dest.display(),
            src.display()
        )
    })?;

    Ok(bytes)
}

/// Buffered byte-for-byte copy; the destination is created with `create_new`
/// so an existing file is never clobbered. Syncs the file before returning.
fn copy_streaming(src: &Path, dst: &Path) -> io::Result<u64> {
    let src_f = File::open(src)?;
    let dst_f = OpenOptions::new().write(true).create_new(true).open(dst)?;

    let mut reader = BufReader::with_capacity(BUF_SIZE, src_f);
    let mut writer = BufWriter::with_capacity(BUF_SIZE, dst_f);
    let bytes = io::copy(&mut reader, &mut writer)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(bytes)
}

#[cfg(unix)]
fn fsync_dir(dir: &Path) -> io::Result<()> {
    File::open(dir)?.sync_all()
}
