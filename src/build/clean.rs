//! Build artifact cleanup.
//!
//! `sbuild clean` removes every versioned artifact produced from the
//! descriptor's `buildpath` (`{buildpath}-*`) and then the output directory
//! itself if nothing else is left in it. Other files are never touched.

use crate::store::{ConfigStore, FileStore};
use anyhow::{Context, Result};
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Splits `buildpath` into the directory artifacts land in and the file name
/// prefix shared by all versions.
fn artifact_location(root: &Path, build_output_path: &str) -> (PathBuf, String) {
    match build_output_path.rfind(['/', '\\']) {
        Some(idx) => {
            let dir = &build_output_path[..idx];
            let stem = &build_output_path[idx + 1..];
            let dir = if dir.is_empty() { "/" } else { dir };
            (root.join(dir), format!("{}-", stem))
        }
        None => (root.to_path_buf(), format!("{}-", build_output_path)),
    }
}

/// Removes built artifacts; returns how many entries were deleted.
pub fn clean_artifacts(root: &Path, build_output_path: &str) -> Result<usize> {
    let (dir, prefix) = artifact_location(root, build_output_path);
    if !dir.is_dir() {
        return Ok(0);
    }

    let mut removed = 0;
    for entry in fs::read_dir(&dir).with_context(|| format!("Failed to read {}", dir.display()))? {
        let entry = entry?;
        let name = entry.file_name();
        if !name.to_string_lossy().starts_with(&prefix) {
            continue;
        }
        let path = entry.path();
        let result = if entry.file_type()?.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        result.with_context(|| format!("Failed to remove {}", path.display()))?;
        println!("   {} Removed {}", "🗑️".red(), path.display());
        removed += 1;
    }

    let is_root = fs::canonicalize(&dir).ok() == fs::canonicalize(root).ok();
    if !is_root && fs::read_dir(&dir)?.next().is_none() {
        fs::remove_dir(&dir).with_context(|| format!("Failed to remove {}", dir.display()))?;
    }

    Ok(removed)
}

pub fn clean(root: &Path) -> Result<()> {
    let store = FileStore::in_project(root);
    let descriptor = store.load()?;

    let removed = clean_artifacts(root, &descriptor.build_output_path)?;
    if removed > 0 {
        println!("{} Clean complete.", "✓".green());
    } else {
        println!("{} Nothing to clean", "!".yellow());
    }
    Ok(())
}
