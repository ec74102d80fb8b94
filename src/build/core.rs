use super::command::BuildCommand;
use super::includes::IncludeResolver;
use super::runner::{CommandRunner, SystemRunner};
use crate::error::BuildError;
use crate::store::{ConfigStore, FileStore};
use colored::*;
use std::fs;
use std::path::Path;
use std::time::Instant;

#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    /// Print the command instead of running it. Nothing is written.
    pub dry_run: bool,
}

/// Result of a successful (or dry-run) build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Artifact path, suffixed with the version the build started from.
    pub output_name: String,
    pub previous_version: String,
    pub new_version: String,
    /// `false` for dry runs: the descriptor was not rewritten.
    pub committed: bool,
}

// --- CORE: Build Project ---
//
// load -> resolve includes -> build command -> run -> save.
// The descriptor is written exactly once, and only after the compiler exited
// with success; every earlier failure returns before touching it.
pub fn run_build<S, R>(
    store: &S,
    runner: &mut R,
    root: &Path,
    new_version: &str,
    options: BuildOptions,
) -> Result<BuildReport, BuildError>
where
    S: ConfigStore + ?Sized,
    R: CommandRunner + ?Sized,
{
    let start_time = Instant::now();

    // 1. Load Descriptor
    let mut descriptor = store.load()?;

    // 2. Resolve Includes (advisory warnings only)
    let includes = IncludeResolver::new(root).expand(&descriptor.effective_include_specs());

    // 3. Build Command
    let command = BuildCommand::build(&descriptor, &includes)?;

    if options.dry_run {
        println!("{} Would execute: {}", "[DRY RUN]".yellow(), command);
        return Ok(BuildReport {
            output_name: command.output_name,
            previous_version: descriptor.version,
            new_version: new_version.to_string(),
            committed: false,
        });
    }

    ensure_output_dir(root, &command.output_name)?;

    // 4. Run Compiler
    println!("{} Running: {}", "🚧".yellow(), command);
    let outcome = runner.run(&command)?;
    if !outcome.success {
        return Err(BuildError::ExternalBuildFailed { code: outcome.code });
    }

    println!(
        "{} Build successful -> {} ({:.2?})",
        "✓".green(),
        command.output_name.bold(),
        start_time.elapsed()
    );

    // 5. Commit Version
    let previous_version = std::mem::replace(&mut descriptor.version, new_version.to_string());
    store.save(&descriptor)?;
    println!("{} Updated version to: {}", "🔄".cyan(), new_version.bold());

    Ok(BuildReport {
        output_name: command.output_name,
        previous_version,
        new_version: new_version.to_string(),
        committed: true,
    })
}

// --- COMMAND: Build ---
pub fn build_project(
    root: &Path,
    new_version: &str,
    options: BuildOptions,
) -> Result<BuildReport, BuildError> {
    let store = FileStore::in_project(root);
    let mut runner = SystemRunner::new(root);
    run_build(&store, &mut runner, root, new_version, options)
}

fn ensure_output_dir(root: &Path, output_name: &str) -> Result<(), BuildError> {
    if let Some(parent) = Path::new(output_name).parent()
        && !parent.as_os_str().is_empty()
    {
        let dir = root.join(parent);
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }
    }
    Ok(())
}
