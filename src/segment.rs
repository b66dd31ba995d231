use std::fmt;
use std::path::{Path, PathBuf};

/// The role a binary plays in the flash layout of the device
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Role {
    Bootloader,
    PartitionTable,
    Nvs,
    PhyInit,
    Application,
    Filesystem,
}

impl Role {
    /// Returns the name of the role as it's printed on the console
    pub fn name(self) -> &'static str {
        match self {
            Role::Bootloader => "bootloader",
            Role::PartitionTable => "partition-table",
            Role::Nvs => "nvs",
            Role::PhyInit => "phy-init",
            Role::Application => "application",
            Role::Filesystem => "filesystem",
        }
    }

    /// Returns true if a segment with this role must be a non-empty file whenever it is part of
    /// the merged image
    ///
    /// The filesystem image is critical without being required: it is only checked when the
    /// build produced it.
    pub fn is_critical(self) -> bool {
        matches!(
            self,
            Role::Bootloader | Role::PartitionTable | Role::Application | Role::Filesystem
        )
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A binary file destined for a fixed offset in the flash of the device
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Segment {
    /// What the segment contains
    pub role: Role,
    /// The flash offset the segment is written to
    pub offset: u32,
    /// The location of the binary in the build output
    pub path: PathBuf,
    /// Whether the image is unusable without this segment
    pub required: bool,
}

impl Segment {
    /// Returns the path of the segment binary
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the flash offset formatted the way the merge tool expects it, e.g. `0x10000`
    pub fn offset_arg(&self) -> String {
        format!("{:#x}", self.offset)
    }

    /// Returns true if the segment binary exists on disk
    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}
