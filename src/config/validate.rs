//! Request validation.
//! Runs before the pipeline: the source must be a readable directory, the
//! target is created when missing and must be writable, and the two must not
//! resolve to the same directory.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{debug, info};

use crate::pipeline::Request;

/// Validate a request in place; creates the target folder when absent.
pub fn validate_request(request: &Request) -> Result<()> {
    let src = &request.source;
    let tgt = &request.target;

    if !src.exists() {
        bail!("source folder does not exist: {}", src.display());
    }
    if !src.is_dir() {
        bail!("source path is not a directory: {}", src.display());
    }
    // Readability probe; read_dir is also what the pipeline will do.
    fs::read_dir(src)
        .with_context(|| format!("cannot read source folder '{}'", src.display()))?;
    debug!(source = %src.display(), "Source folder readable");

    if tgt.exists() {
        if !tgt.is_dir() {
            bail!("target path exists but is not a directory: {}", tgt.display());
        }
    } else {
        fs::create_dir_all(tgt)
            .with_context(|| format!("failed to create target folder '{}'", tgt.display()))?;
        info!(target = %tgt.display(), "Created target folder");
    }
    ensure_writable(tgt)?;

    // Same-folder moves would skip every file against itself; reject early.
    let src_real = dunce::canonicalize(src).unwrap_or_else(|_| src.clone());
    let tgt_real = dunce::canonicalize(tgt).unwrap_or_else(|_| tgt.clone());
    if src_real == tgt_real {
        bail!(
            "source and target resolve to the same folder: {}",
            src_real.display()
        );
    }

    Ok(())
}

/// Writability probe: create and remove a small file with `create_new`.
fn ensure_writable(dir: &Path) -> Result<()> {
    let probe = dir.join(format!(".file_mover_probe_{}.tmp", std::process::id()));
    match fs::OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(&probe)
    {
        Ok(_) => {
            let _ = fs::remove_file(&probe);
            Ok(())
        }
        Err(e) => bail!(
            "cannot write to target folder '{}': {e}; check directory permissions",
            dir.display()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn request(source: &Path, target: &Path) -> Request {
        Request {
            source: source.to_path_buf(),
            pattern: ".*".into(),
            target: target.to_path_buf(),
        }
    }

    #[test]
    fn creates_missing_target() {
        let td = tempdir().unwrap();
        let source = td.path().join("in");
        fs::create_dir(&source).unwrap();
        let target = td.path().join("out");

        validate_request(&request(&source, &target)).unwrap();
        assert!(target.is_dir());
    }

    #[test]
    fn missing_source_is_rejected() {
        let td = tempdir().unwrap();
        let err =
            validate_request(&request(&td.path().join("nope"), td.path())).unwrap_err();
        assert!(format!("{err}").contains("does not exist"));
    }

    #[test]
    fn source_file_is_rejected() {
        let td = tempdir().unwrap();
        let file = td.path().join("f.txt");
        fs::write(&file, b"x").unwrap();
        let err = validate_request(&request(&file, &td.path().join("out"))).unwrap_err();
        assert!(format!("{err}").contains("not a directory"));
    }

    #[test]
    fn identical_source_and_target_are_rejected() {
        let td = tempdir().unwrap();
        let dir = td.path().join("same");
        fs::create_dir(&dir).unwrap();
        let err = validate_request(&request(&dir, &dir)).unwrap_err();
        assert!(format!("{err}").contains("same folder"));
    }
}
