//! Header installation (`sbuild install`).
//!
//! Copies C/C++ headers from a file or a directory tree into the project's
//! `include/` directory. Directory installs keep the layout relative to the
//! source root, so `vendor/fmt/core.h` lands in `include/fmt/core.h`.

use anyhow::{Context, Result, bail};
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const HEADER_EXTENSIONS: &[&str] = &["h", "hpp", "hh", "hxx"];

fn is_header(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            HEADER_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// True when both paths exist and resolve to the same file.
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn canonical(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).with_context(|| format!("Failed to resolve {}", path.display()))
}

/// Installs headers from `source` into `<root>/include`; returns the number
/// of files copied.
pub fn install_headers(root: &Path, source: &Path) -> Result<usize> {
    if !source.exists() {
        bail!("Source path does not exist: {}", source.display());
    }

    let include_dir = root.join("include");
    fs::create_dir_all(&include_dir).context("Failed to create include directory")?;

    if source.is_file() {
        if !is_header(source) {
            println!("{} Not a header file: {}", "x".red(), source.display());
            return Ok(0);
        }
        let file_name = source
            .file_name()
            .context("Header path has no file name")?;
        let dest = include_dir.join(file_name);
        if same_file(source, &dest) {
            bail!(
                "{} is already installed; refusing to copy it onto itself",
                source.display()
            );
        }
        fs::copy(source, &dest)
            .with_context(|| format!("Failed to copy {}", source.display()))?;
        println!(
            "{} Installed header: {}",
            "✓".green(),
            file_name.to_string_lossy()
        );
        return Ok(1);
    }

    // Copying out of include/ into itself would truncate every header.
    let include_canonical = canonical(&include_dir)?;
    if canonical(source)?.starts_with(&include_canonical) {
        bail!(
            "Source {} is inside {}; nothing to install",
            source.display(),
            include_dir.display()
        );
    }

    let mut copied = 0;
    let walker = WalkDir::new(source).into_iter().filter_entry(|e| {
        !(e.file_type().is_dir()
            && fs::canonicalize(e.path()).is_ok_and(|p| p == include_canonical))
    });
    for entry in walker.filter_map(|e| e.ok()) {
        let path = entry.path();
        if !entry.file_type().is_file() || !is_header(path) {
            continue;
        }

        let rel_path = path.strip_prefix(source)?;
        let dest = include_dir.join(rel_path);
        if same_file(path, &dest) {
            continue;
        }
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(path, &dest).with_context(|| format!("Failed to copy {}", path.display()))?;
        copied += 1;
    }

    println!(
        "{} Installed {} headers to {}",
        "✓".green(),
        copied,
        include_dir.display()
    );
    Ok(copied)
}
