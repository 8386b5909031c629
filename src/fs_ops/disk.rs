//! Destination capacity check before the copy fallback.
//! Only the fallback needs this; a same-volume rename consumes no new space.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

pub(super) fn check_disk_space(src: &Path, dest_dir: &Path) -> Result<()> {
    let need = fs::metadata(src)
        .with_context(|| format!("stat source '{}'", src.display()))?
        .len();
    let available = fs2::available_space(dest_dir)
        .with_context(|| format!("query free space of '{}'", dest_dir.display()))?;

    if u128::from(need) > u128::from(available) {
        bail!(
            "insufficient space on destination '{}': need {} bytes, have {} bytes",
            dest_dir.display(),
            need,
            available
        );
    }
    Ok(())
}
