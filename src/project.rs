//! Project scaffolding (`sbuild new`).

use crate::config::DESCRIPTOR_FILE;
use crate::store::{ConfigStore, FileStore};
use crate::templates;
use anyhow::{Context, Result, bail};
use colored::*;
use std::fs;
use std::path::Path;

/// Creates `src/`, `include/`, `project.json` and a hello-world entry point
/// under `path`. Existing directories are reused; an existing descriptor is
/// never overwritten.
pub fn create_project(path: &Path, lang: &str) -> Result<()> {
    if !matches!(lang, "c" | "cpp") {
        bail!("Unsupported language '{}' (expected 'c' or 'cpp')", lang);
    }

    let store = FileStore::in_project(path);
    if store.exists() {
        bail!(
            "{} already exists in '{}'",
            DESCRIPTOR_FILE,
            path.display()
        );
    }

    fs::create_dir_all(path.join("src")).context("Failed to create src")?;
    fs::create_dir_all(path.join("include")).context("Failed to create include")?;

    let abs_path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let (descriptor, main_code) =
        templates::get_template(&abs_path.to_string_lossy(), lang);

    let main_file = path.join("src").join(format!("main.{}", lang));
    fs::write(&main_file, main_code)
        .with_context(|| format!("Failed to write {}", main_file.display()))?;
    store.save(&descriptor)?;

    println!(
        "{} Project created at: {}",
        "✓".green(),
        path.display().to_string().bold()
    );
    println!("  cd {}\n  sbuild build 1.1", path.display());
    Ok(())
}
