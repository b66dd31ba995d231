use std::fs::File;
use std::io;
use std::path::Path;

use sha2::digest::Output;
use sha2::{Digest, Sha256};

/// Calculates the SHA-256 digest of the file at `path`
///
/// The returned digest formats as lowercase hex with `{:x}`.
pub fn sha256_file<P: AsRef<Path>>(path: P) -> Result<Output<Sha256>, io::Error> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();

    io::copy(&mut file, &mut hasher)?;

    Ok(hasher.finalize())
}
