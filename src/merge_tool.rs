//! The external tool that concatenates the segments into a single image

use std::ffi::{OsStr, OsString};
use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus};

use log::{debug, info};
use thiserror::Error;

use crate::segment::Segment;

/// The interpreter used to run esptool when the user doesn't provide one
pub const DEFAULT_PYTHON: &str = "python3";

#[derive(Error, Debug)]
pub enum MergeToolError {
    #[error("Could not start {program:?}: {source}")]
    Spawn {
        program: OsString,
        #[source]
        source: io::Error,
    },
    #[error("Command `{command_line}` failed with {status}")]
    Status {
        command_line: String,
        status: ExitStatus,
    },
}

/// An interface for tools that write `segments` to their flash offsets in a single image at
/// `output`.
pub trait MergeTool {
    fn merge(
        &self,
        chip: &str,
        output: &Path,
        segments: &[Segment],
    ) -> Result<(), MergeToolError>;
}

/// Runs the `merge_bin` command of esptool as a Python module.
#[derive(Debug, Clone)]
pub struct Esptool {
    python: OsString,
}

impl Esptool {
    /// Creates an esptool runner that uses the given `python` interpreter
    pub fn new<S: AsRef<OsStr>>(python: S) -> Esptool {
        Esptool {
            python: python.as_ref().to_os_string(),
        }
    }

    /// Returns the command that merges `segments` into `output` without running it
    pub fn command(&self, chip: &str, output: &Path, segments: &[Segment]) -> Command {
        let mut command = Command::new(&self.python);

        command
            .args(&["-m", "esptool", "--chip", chip, "merge_bin", "-o"])
            .arg(output);

        for segment in segments {
            command.arg(segment.offset_arg()).arg(segment.path());
        }

        command
    }

    /// Returns the command line as it would be typed into a shell, separated by spaces
    pub fn command_line(&self, chip: &str, output: &Path, segments: &[Segment]) -> String {
        let command = self.command(chip, output, segments);
        let mut parts = vec![command.get_program().to_string_lossy().into_owned()];

        parts.extend(
            command
                .get_args()
                .map(|arg| arg.to_string_lossy().into_owned()),
        );

        parts.join(" ")
    }
}

impl Default for Esptool {
    fn default() -> Esptool {
        Esptool::new(DEFAULT_PYTHON)
    }
}

impl MergeTool for Esptool {
    fn merge(
        &self,
        chip: &str,
        output: &Path,
        segments: &[Segment],
    ) -> Result<(), MergeToolError> {
        let command_line = self.command_line(chip, output, segments);

        info!("Running command:");
        info!("  {}", command_line);

        let status = self
            .command(chip, output, segments)
            .status()
            .map_err(|source| MergeToolError::Spawn {
                program: self.python.clone(),
                source,
            })?;

        debug!("Merge tool exited with {}", status);

        if !status.success() {
            return Err(MergeToolError::Status {
                command_line,
                status,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::segment::Role;

    fn segments() -> Vec<Segment> {
        vec![
            Segment {
                role: Role::Bootloader,
                offset: 0x1000,
                path: PathBuf::from("/fw/build/bootloader/bootloader.bin"),
                required: true,
            },
            Segment {
                role: Role::Application,
                offset: 0x10000,
                path: PathBuf::from("/fw/build/esp32Fan.bin"),
                required: true,
            },
        ]
    }

    #[test]
    fn it_should_build_merge_bin_command() {
        let esptool = Esptool::default();
        let command = esptool.command(
            "esp32",
            Path::new("/fw/build/esp32Fan_merged.bin"),
            &segments(),
        );
        let args: Vec<&OsStr> = command.get_args().collect();

        assert_eq!(command.get_program(), OsStr::new("python3"));
        assert_eq!(
            args,
            vec![
                "-m",
                "esptool",
                "--chip",
                "esp32",
                "merge_bin",
                "-o",
                "/fw/build/esp32Fan_merged.bin",
                "0x1000",
                "/fw/build/bootloader/bootloader.bin",
                "0x10000",
                "/fw/build/esp32Fan.bin",
            ]
        );
    }

    #[test]
    fn it_should_render_command_line() {
        let esptool = Esptool::new("/usr/bin/python3");
        let line = esptool.command_line(
            "esp32",
            Path::new("/fw/build/esp32Fan_merged.bin"),
            &segments()[..1],
        );

        assert_eq!(
            line,
            "/usr/bin/python3 -m esptool --chip esp32 merge_bin -o \
             /fw/build/esp32Fan_merged.bin 0x1000 /fw/build/bootloader/bootloader.bin"
        );
    }

    #[test]
    fn it_should_fail_when_tool_cannot_start() {
        let esptool = Esptool::new("/nonexistent/esp32fan-merge/python3");
        let result = esptool.merge("esp32", Path::new("merged.bin"), &segments());

        assert!(matches!(result, Err(MergeToolError::Spawn { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn it_should_fail_on_non_zero_exit_status() {
        let esptool = Esptool::new("false");
        let result = esptool.merge("esp32", Path::new("merged.bin"), &segments());

        match result {
            Err(MergeToolError::Status { status, .. }) => assert!(!status.success()),
            other => panic!("expected a status error, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn it_should_succeed_on_zero_exit_status() {
        let esptool = Esptool::new("true");

        esptool
            .merge("esp32", Path::new("merged.bin"), &segments())
            .unwrap();
    }
}
