//! Merges the binaries produced by the esp32Fan firmware build into a single image that can be
//! flashed at offset 0.
//!
//! # Examples
//!
//! ```no_run
//! use esp32fan::{Assembler, Esptool, Layout};
//!
//! let assembler = Assembler::new(Layout::from_current_dir()?, Esptool::default());
//! let image = assembler.assemble()?;
//!
//! println!("Merged image: {}", image.display());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod assembler;
pub mod digest;
mod error;
pub mod layout;
pub mod merge_tool;
pub mod segment;

pub use error::Error;

pub use assembler::Assembler;
pub use layout::Layout;
pub use merge_tool::{Esptool, MergeTool, MergeToolError};
pub use segment::{Role, Segment};
