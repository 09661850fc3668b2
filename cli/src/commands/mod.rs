pub mod draw;
pub mod field;
pub mod locate;

use std::path::Path;

use anyhow::{Result, ensure};

/// Refuse to clobber an existing output file unless `force` is set.
pub(crate) fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    ensure!(force || !path.exists(),
        "[output] {} already exists (use --force to overwrite)", path.display());
    Ok(())
}
