use std::fs;
use std::path::PathBuf;

use log::{debug, error, info, warn};

use crate::digest;
use crate::layout::Layout;
use crate::merge_tool::MergeTool;
use crate::segment::Segment;
use crate::Error;

/// Merges the segments of a build output directory into a single firmware image.
#[derive(Debug)]
pub struct Assembler<T> {
    layout: Layout,
    tool: T,
}

impl<T: MergeTool> Assembler<T> {
    pub fn new(layout: Layout, tool: T) -> Assembler<T> {
        Assembler { layout, tool }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Returns the segments that make up the image: every required segment, and the optional
    /// ones that the build produced
    pub fn select_segments(&self) -> Vec<Segment> {
        self.layout
            .segments()
            .into_iter()
            .filter(|segment| {
                if segment.required || segment.exists() {
                    return true;
                }

                warn!(
                    "Optional {} binary not found: {} (offset {}), leaving it out",
                    segment.role,
                    segment.path.display(),
                    segment.offset_arg()
                );

                false
            })
            .collect()
    }

    /// Merges the build output into a single image and returns the path of the image
    ///
    /// Fails with `Error::NoSegmentsFound` if none of the binaries exist,
    /// `Error::MissingCriticalSegment` if a critical binary is missing or empty and
    /// `Error::MergeToolFailed` if the merge tool could not produce the image.
    pub fn assemble(&self) -> Result<PathBuf, Error> {
        debug!("Using build directory {}", self.layout.build_dir().display());

        let selected = self.select_segments();
        let present: Vec<Segment> = selected
            .iter()
            .filter(|segment| {
                if segment.exists() {
                    return true;
                }

                warn!(
                    "File does not exist: {} (offset {}), skipping it",
                    segment.path.display(),
                    segment.offset_arg()
                );

                false
            })
            .cloned()
            .collect();

        if present.is_empty() {
            error!("No binaries to merge were found");

            return Err(Error::NoSegmentsFound(self.layout.build_dir().to_path_buf()));
        }

        for segment in selected.iter().filter(|segment| segment.role.is_critical()) {
            verify_critical(segment)?;
        }

        debug!("Merging {} segments", present.len());

        let output = self.layout.output_path();

        if let Err(err) = self.tool.merge(self.layout.chip(), &output, &present) {
            error!("Merging failed: {}", err);

            return Err(err.into());
        }

        info!("Merge complete: {}", output.display());

        Ok(output)
    }
}

/// Checks that the binary of a critical `segment` is a regular file and isn't empty, and logs its
/// size and digest
fn verify_critical(segment: &Segment) -> Result<(), Error> {
    let size = fs::metadata(&segment.path)
        .ok()
        .filter(|metadata| metadata.is_file())
        .map(|metadata| metadata.len())
        .unwrap_or(0);

    if size == 0 {
        error!(
            "Critical binary is missing or empty: {} ({}), check the build output",
            segment.path.display(),
            segment.role
        );

        return Err(Error::MissingCriticalSegment {
            role: segment.role,
            path: segment.path.clone(),
        });
    }

    let sha256 = digest::sha256_file(&segment.path)
        .map_err(|err| Error::Io(segment.path.clone(), err))?;

    info!(
        "{} binary present, size: {} bytes, sha256: {:x}",
        segment.role,
        size,
        sha256
    );

    Ok(())
}
