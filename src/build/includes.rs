//! Include spec expansion.
//!
//! A spec is either a literal directory (`./vendor/json`) or a single-level
//! pattern (`./include/*`) standing for every immediate subdirectory of the
//! part before the `*`. Specs are resolved in order, which is also the order
//! the compiler searches them.

use crate::error::IncludeWarning;
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Flags and warnings produced by one resolution pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResolvedIncludes {
    /// `-I<dir>` flags, in spec order.
    pub flags: Vec<String>,
    pub warnings: Vec<IncludeWarning>,
}

/// Resolves include specs relative to a project root.
///
/// Existence checks use `root`, but the emitted flags keep the paths as
/// written so they match the compiler's working directory (also `root`).
#[derive(Debug, Clone)]
pub struct IncludeResolver {
    root: PathBuf,
}

impl IncludeResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolves `specs` and prints any warnings to stderr.
    pub fn expand(&self, specs: &[String]) -> Vec<String> {
        let resolved = self.resolve(specs);
        for warning in &resolved.warnings {
            eprintln!("   {} Warning: {}", "!".yellow(), warning);
        }
        resolved.flags
    }

    /// Resolves `specs` without printing anything.
    pub fn resolve(&self, specs: &[String]) -> ResolvedIncludes {
        let mut out = ResolvedIncludes::default();
        for spec in specs {
            match spec.find('*') {
                Some(pos) => self.expand_wildcard(spec, &spec[..pos], &mut out),
                None => {
                    // An empty spec would locate the root and emit a bare `-I`.
                    if !spec.is_empty() && self.locate(spec).is_dir() {
                        out.flags.push(format!("-I{}", spec));
                    } else {
                        out.warnings
                            .push(IncludeWarning::IncludePathMissing(spec.clone()));
                    }
                }
            }
        }
        out
    }

    fn expand_wildcard(&self, spec: &str, prefix: &str, out: &mut ResolvedIncludes) {
        let base = prefix.strip_suffix(['/', '\\']).unwrap_or(prefix);
        let listing = if base.is_empty() {
            self.root.clone()
        } else {
            self.locate(base)
        };

        let entries = match fs::read_dir(&listing) {
            Ok(entries) => entries,
            Err(_) => {
                out.warnings.push(IncludeWarning::WildcardBaseUnreadable {
                    spec: spec.to_string(),
                    base: base.to_string(),
                });
                return;
            }
        };

        // read_dir order is filesystem-dependent
        let mut children = Vec::new();
        for entry in entries.filter_map(|e| e.ok()) {
            if !entry.path().is_dir() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => children.push(name),
                Err(raw) => out.warnings.push(IncludeWarning::NonUtf8Entry {
                    spec: spec.to_string(),
                    name: raw.to_string_lossy().into_owned(),
                }),
            }
        }
        children.sort();

        for child in children {
            let dir = if base.is_empty() {
                child
            } else {
                format!("{}/{}", base, child)
            };
            out.flags.push(format!("-I{}", dir));
        }
    }

    fn locate(&self, path: &str) -> PathBuf {
        let p = Path::new(path);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.root.join(p)
        }
    }
}
