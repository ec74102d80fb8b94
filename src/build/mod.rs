mod clean;
pub mod command;
mod core;
pub mod includes;
pub mod runner;

pub use clean::{clean, clean_artifacts};
pub use command::BuildCommand;
pub use core::{BuildOptions, BuildReport, build_project, run_build};
pub use includes::{IncludeResolver, ResolvedIncludes};
pub use runner::{CommandRunner, ProcessOutcome, SystemRunner};
