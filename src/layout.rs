//! The flash layout of the esp32Fan firmware

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use crate::segment::{Role, Segment};

/// The chip family passed to the merge tool
pub const CHIP: &str = "esp32";

/// The name of the build output directory, relative to the working directory
pub const BUILD_DIR_NAME: &str = "build";

/// The file name of the merged image, relative to the build output directory
pub const MERGED_IMAGE_NAME: &str = "esp32Fan_merged.bin";

/// Static description of a segment in the build output
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SegmentEntry {
    pub role: Role,
    /// Path of the binary relative to the build output directory
    pub file_name: &'static str,
    pub offset: u32,
    pub required: bool,
}

/// Every segment the build may produce, in ascending flash offset order
pub const SEGMENT_TABLE: &[SegmentEntry] = &[
    SegmentEntry {
        role: Role::Bootloader,
        file_name: "bootloader/bootloader.bin",
        offset: 0x1000,
        required: true,
    },
    SegmentEntry {
        role: Role::PartitionTable,
        file_name: "partition_table/partition-table.bin",
        offset: 0x8000,
        required: true,
    },
    SegmentEntry {
        role: Role::Nvs,
        file_name: "nvs.bin",
        offset: 0x9000,
        required: false,
    },
    SegmentEntry {
        role: Role::PhyInit,
        file_name: "phy_init.bin",
        offset: 0xf000,
        required: false,
    },
    SegmentEntry {
        role: Role::Application,
        file_name: "esp32Fan.bin",
        offset: 0x10000,
        required: true,
    },
    SegmentEntry {
        role: Role::Filesystem,
        file_name: "spiffs.bin",
        offset: 0x3d0000,
        required: false,
    },
];

/// The build output directory together with the fixed flash layout of the firmware
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Layout {
    build_dir: PathBuf,
    chip: &'static str,
    entries: &'static [SegmentEntry],
}

impl Layout {
    /// Creates a layout for the build output in `build_dir`
    ///
    /// The directory is not created or checked here.
    pub fn new<P: Into<PathBuf>>(build_dir: P) -> Layout {
        Layout {
            build_dir: build_dir.into(),
            chip: CHIP,
            entries: SEGMENT_TABLE,
        }
    }

    /// Creates a layout for the `build` directory in the current working directory
    pub fn from_current_dir() -> Result<Layout, io::Error> {
        Ok(Layout::new(env::current_dir()?.join(BUILD_DIR_NAME)))
    }

    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    pub fn chip(&self) -> &'static str {
        self.chip
    }

    /// Returns the path the merged image is written to
    pub fn output_path(&self) -> PathBuf {
        self.build_dir.join(MERGED_IMAGE_NAME)
    }

    /// Returns every segment of the layout, resolved against the build directory and in
    /// ascending flash offset order
    pub fn segments(&self) -> Vec<Segment> {
        self.entries
            .iter()
            .map(|entry| Segment {
                role: entry.role,
                offset: entry.offset,
                path: self.build_dir.join(entry.file_name),
                required: entry.required,
            })
            .collect()
    }
}
