use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ScanError;
use crate::models::HolderRecord;

/// Write the holder list under `<root>/<token>/members.json`.
///
/// Keying the path by the checksummed token address keeps runs for
/// different tokens from clobbering each other.
pub fn write_members(
    root: &str,
    token: &str,
    holders: &[HolderRecord],
) -> Result<PathBuf, ScanError> {
    let dir = Path::new(root).join(token);
    fs::create_dir_all(&dir)?;

    let path = dir.join("members.json");
    fs::write(&path, serde_json::to_string_pretty(holders)?)?;
    Ok(path)
}
