use super::command::BuildCommand;
use crate::error::BuildError;
use std::path::{Path, PathBuf};
use std::process::Command;

/// How the compiler process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessOutcome {
    pub success: bool,
    /// `None` when the process was killed by a signal.
    pub code: Option<i32>,
}

impl ProcessOutcome {
    pub fn from_code(code: i32) -> Self {
        Self {
            success: code == 0,
            code: Some(code),
        }
    }
}

/// Executes a [`BuildCommand`] and reports only its exit status.
pub trait CommandRunner {
    fn run(&mut self, command: &BuildCommand) -> Result<ProcessOutcome, BuildError>;
}

/// Spawns the compiler as a child process in the project root.
///
/// stdout and stderr are inherited so compiler diagnostics reach the
/// terminal unchanged; nothing is captured.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    working_dir: PathBuf,
}

impl SystemRunner {
    pub fn new(working_dir: &Path) -> Self {
        Self {
            working_dir: working_dir.to_path_buf(),
        }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&mut self, command: &BuildCommand) -> Result<ProcessOutcome, BuildError> {
        let status = Command::new(&command.program)
            .args(&command.args)
            .current_dir(&self.working_dir)
            .status()
            .map_err(|source| BuildError::Spawn {
                program: command.program.clone(),
                source,
            })?;

        Ok(ProcessOutcome {
            success: status.success(),
            code: status.code(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildType;

    fn command(program: &str, args: &[&str]) -> BuildCommand {
        BuildCommand {
            program: program.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
            build_type: BuildType::Elf,
            output_name: "out-1.0".to_string(),
        }
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let mut runner = SystemRunner::new(Path::new("."));
        let err = runner
            .run(&command("sbuild-definitely-not-a-compiler", &[]))
            .unwrap_err();
        assert!(matches!(err, BuildError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_status_is_reported() {
        let mut runner = SystemRunner::new(Path::new("."));
        let ok = runner.run(&command("sh", &["-c", "exit 0"])).unwrap();
        assert_eq!(ok, ProcessOutcome::from_code(0));

        let failed = runner.run(&command("sh", &["-c", "exit 3"])).unwrap();
        assert!(!failed.success);
        assert_eq!(failed.code, Some(3));
    }
}
