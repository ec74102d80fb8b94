//! # sbuild CLI Entry Point
//!
//! Parses arguments with clap and routes each subcommand to its handler:
//! `build`, `new`, `install`, `clean`, `version`, `completion` (and clap's
//! built-in `help`).

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::*;
use std::path::PathBuf;

use sbuild::build::{self, BuildOptions};
use sbuild::error::BuildError;
use sbuild::install;
use sbuild::project;

#[derive(Parser)]
#[command(name = "sbuild")]
#[command(about = "Single-target C/C++ build orchestrator", version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Project root containing project.json
    #[arg(short = 'C', long = "dir", global = true, default_value = ".")]
    dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the project and record <NEW_VERSION> on success
    Build {
        /// Version to record after a successful build
        new_version: String,
        /// Show the compiler command without running it
        #[arg(long)]
        dry_run: bool,
    },
    /// Create a new project skeleton
    New {
        /// Directory to create the project in
        path: PathBuf,
        /// Language (cpp or c)
        #[arg(long, default_value = "cpp")]
        lang: String,
    },
    /// Copy headers from a file or directory into ./include
    Install {
        /// Header file or directory to copy from
        path: PathBuf,
    },
    /// Remove built artifacts
    Clean,
    /// Show the sbuild version
    Version,
    /// Generate shell completion scripts
    Completion { shell: Shell },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            new_version,
            dry_run,
        } => {
            match build::build_project(&cli.dir, &new_version, BuildOptions { dry_run }) {
                Ok(_) => Ok(()),
                Err(e) => {
                    report_build_error(&e);
                    std::process::exit(1);
                }
            }
        }
        Commands::New { path, lang } => project::create_project(&cli.dir.join(path), &lang),
        Commands::Install { path } => {
            install::install_headers(&cli.dir, &path)?;
            Ok(())
        }
        Commands::Clean => build::clean(&cli.dir),
        Commands::Version => {
            println!("sbuild {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let bin_name = cmd.get_name().to_string();
            generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
            Ok(())
        }
    }
}

fn report_build_error(err: &BuildError) {
    eprintln!("{} {}", "x".red(), err);
    match err {
        BuildError::ConfigNotFound(_) => eprintln!(
            "\n💡 Tip: Run 'sbuild new <path>' to create a project, or use -C <dir>."
        ),
        BuildError::ExternalBuildFailed { .. } => {
            eprintln!("{} Version not updated", "!".yellow())
        }
        _ => {}
    }
}
