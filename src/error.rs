//! Error taxonomy for the build core.
//!
//! Terminal failures are [`BuildError`]s and abort the current invocation
//! before the descriptor is rewritten. Missing include directories are only
//! advisory and surface as [`IncludeWarning`]s.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Terminal failure of a build invocation.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The descriptor file does not exist.
    #[error("{} not found", .0.display())]
    ConfigNotFound(PathBuf),

    /// The descriptor exists but is not valid JSON or lacks a required field.
    #[error("{shown} is malformed: {reason}", shown = .path.display())]
    ConfigMalformed { path: PathBuf, reason: String },

    /// `type` is neither `elf` nor `shared`.
    #[error("invalid build type '{0}' (expected 'elf' or 'shared')")]
    InvalidBuildType(String),

    /// The compiler exited unsuccessfully.
    #[error("build failed ({})", exit_code_label(.code))]
    ExternalBuildFailed { code: Option<i32> },

    /// The compiler could not be started at all.
    #[error("failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn exit_code_label(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exit code {}", c),
        None => "terminated by signal".to_string(),
    }
}

/// Non-fatal problem found while resolving include specs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncludeWarning {
    /// A literal include spec does not name an existing directory.
    IncludePathMissing(String),
    /// The directory before a `*` could not be listed.
    WildcardBaseUnreadable { spec: String, base: String },
    /// A directory matched by a `*` has a name that is not valid UTF-8 and
    /// cannot be passed on as a flag; `name` is its lossy rendering.
    NonUtf8Entry { spec: String, name: String },
}

impl fmt::Display for IncludeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncludeWarning::IncludePathMissing(path) => {
                write!(f, "include path '{}' is not a directory, skipping", path)
            }
            IncludeWarning::WildcardBaseUnreadable { spec, base } => write!(
                f,
                "cannot list '{}' for include pattern '{}', skipping",
                base, spec
            ),
            IncludeWarning::NonUtf8Entry { spec, name } => write!(
                f,
                "directory '{}' matched by '{}' is not valid UTF-8, skipping",
                name, spec
            ),
        }
    }
}
