use crate::config::{BuildType, ProjectDescriptor};
use crate::error::BuildError;
use std::fmt;

/// A fully assembled compiler invocation.
///
/// Arguments are kept as a list and handed to the process spawner as-is, so
/// paths with spaces or shell metacharacters need no quoting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildCommand {
    pub program: String,
    pub args: Vec<String>,
    pub build_type: BuildType,
    /// `{buildpath}-{version}`.
    pub output_name: String,
}

impl BuildCommand {
    /// Assembles `program -o <output> <source> [flags] [type flags] [includes]`.
    ///
    /// Fails with [`BuildError::InvalidBuildType`] before anything is
    /// assembled when the descriptor's `type` is not recognized.
    pub fn build(
        descriptor: &ProjectDescriptor,
        include_flags: &[String],
    ) -> Result<Self, BuildError> {
        let build_type = descriptor.parsed_build_type()?;
        let output_name = descriptor.output_name();

        let mut args = vec![
            "-o".to_string(),
            output_name.clone(),
            descriptor.source_path.clone(),
        ];
        args.extend(descriptor.extra_flags());
        args.extend(build_type.flags().iter().map(|f| f.to_string()));
        args.extend(include_flags.iter().cloned());

        Ok(Self {
            program: descriptor.compiler_program().to_string(),
            args,
            build_type,
            output_name,
        })
    }
}

impl fmt::Display for BuildCommand {
    /// Shell-like rendering for log output only.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}
