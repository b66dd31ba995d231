use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::merge_tool::MergeToolError;
use crate::segment::Role;

#[derive(Debug, Error)]
pub enum Error {
    #[error("No binaries to merge were found in {}", .0.display())]
    NoSegmentsFound(PathBuf),
    #[error("Critical binary is missing or empty: {} ({role})", .path.display())]
    MissingCriticalSegment { role: Role, path: PathBuf },
    #[error("Merging failed: {0}")]
    MergeToolFailed(#[from] MergeToolError),
    #[error("I/O error when reading {}: {}", .0.display(), .1)]
    Io(PathBuf, io::Error),
}
