//! Batch orchestration: list the source, filter by pattern, relocate each
//! match strictly in order. Per-file failures never abort the batch; only
//! listing and pattern errors (and an empty match set) terminate the run.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::errors::MoverError;
use crate::fs_ops::{Outcome, list_file_names, relocate_file};
use crate::matcher;
use crate::shutdown;

/// One validated relocation request. The caller guarantees the source exists
/// and the target folder has been created before this reaches the pipeline.
#[derive(Debug, Clone)]
pub struct Request {
    pub source: PathBuf,
    pub pattern: String,
    pub target: PathBuf,
}

/// Outcome of one file in the batch, tagged with the name it applies to.
#[derive(Debug)]
pub struct FileReport {
    pub name: String,
    pub outcome: Outcome,
}

/// Run the full pipeline for `request`.
///
/// An empty source folder is not itself an error: it yields an empty
/// candidate set, which then surfaces as `NoMatch`. An interrupt (Ctrl-C)
/// stops the batch at the next file boundary; files already processed keep
/// their reports.
pub fn run(request: &Request, dry_run: bool) -> Result<Vec<FileReport>, MoverError> {
    let candidates = list_file_names(&request.source)?;
    if candidates.is_empty() {
        info!(source = %request.source.display(), "Source folder has no files");
    }

    let re = matcher::compile(&request.pattern)?;
    let matched = matcher::filter_names(&re, &candidates);
    if matched.is_empty() {
        return Err(MoverError::NoMatch {
            pattern: request.pattern.clone(),
        });
    }
    info!(
        count = matched.len(),
        pattern = %request.pattern,
        "Relocating matched files"
    );

    let mut reports = Vec::with_capacity(matched.len());
    for (idx, name) in matched.iter().enumerate() {
        if shutdown::is_requested() {
            warn!(
                remaining = matched.len() - idx,
                "Interrupted; stopping before the next file"
            );
            break;
        }
        let outcome = relocate_file(&request.source, name, &request.target, dry_run);
        reports.push(FileReport {
            name: name.clone(),
            outcome,
        });
    }
    Ok(reports)
}
