//! Default path helpers and symlink checks.
//! OS-appropriate config/log locations, plus the symlinked-ancestor probe the
//! file-logging layer uses to refuse unsafe log paths.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::CONFIG_ENV;

/// Effective config file path: `$FILE_MOVER_CONFIG` wins, otherwise the OS
/// config dir (`.../file_mover/config.xml`).
pub fn default_config_path() -> Option<PathBuf> {
    if let Some(explicit) = env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(explicit));
    }
    if let Some(mut base) = dirs::config_dir() {
        base.push("file_mover");
        base.push("config.xml");
        return Some(base);
    }
    env::var("HOME").ok().map(|h| {
        PathBuf::from(h)
            .join(".config")
            .join("file_mover")
            .join("config.xml")
    })
}

/// OS-appropriate default log file path (data dir).
pub fn default_log_path() -> Option<PathBuf> {
    if let Some(mut base) = dirs::data_dir() {
        base.push("file_mover");
        base.push("file_mover.log");
        return Some(base);
    }
    env::var("HOME").ok().map(|h| {
        PathBuf::from(h)
            .join(".local")
            .join("share")
            .join("file_mover")
            .join("file_mover.log")
    })
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.exists() && fs::symlink_metadata(anc)?.file_type().is_symlink() {
            return Ok(true);
        }
        p = anc.parent();
    }
    Ok(false)
}
