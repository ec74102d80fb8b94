use crate::error::BuildError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

/// File name of the project descriptor, relative to the project root.
pub const DESCRIPTOR_FILE: &str = "project.json";

/// Include spec used when `includepaths` is absent.
pub const DEFAULT_INCLUDE_SPEC: &str = "./include/*";

/// The persisted project descriptor (`project.json`).
///
/// Required keys are plain fields so a missing one fails deserialization.
/// Optional keys stay `None` when absent and are skipped on save, so a
/// load/save cycle never injects values the user did not write. Keys this
/// tool does not know about are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDescriptor {
    /// Artifact path without the version suffix.
    #[serde(rename = "buildpath")]
    pub build_output_path: String,

    /// The single compilation entry point.
    #[serde(rename = "srcpath")]
    pub source_path: String,

    /// Kept as written; validated when the command is built.
    #[serde(rename = "type")]
    pub build_type: String,

    #[serde(
        rename = "includepaths",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub include_specs: Option<Vec<String>>,

    /// Version of the last successful build.
    pub version: String,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub flags: Option<Flags>,

    /// Use the C driver instead of the C++ one.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub c: Option<bool>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub compiler: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Optional keys must hold a real value when present. An explicit `null`
/// would otherwise load as absent and vanish on the next save.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Extra compiler flags, accepted either as one string or as a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Flags {
    Line(String),
    List(Vec<String>),
}

impl Flags {
    pub fn to_args(&self) -> Vec<String> {
        match self {
            Flags::Line(line) => line.split_whitespace().map(str::to_string).collect(),
            Flags::List(list) => list.clone(),
        }
    }
}

/// Kind of artifact to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildType {
    /// Plain executable.
    Elf,
    /// Position-independent shared library.
    Shared,
}

impl BuildType {
    pub fn as_str(self) -> &'static str {
        match self {
            BuildType::Elf => "elf",
            BuildType::Shared => "shared",
        }
    }

    /// Flags appended after the user flags for this artifact kind.
    pub fn flags(self) -> &'static [&'static str] {
        match self {
            BuildType::Elf => &[],
            BuildType::Shared => &["-shared", "-fPIC"],
        }
    }
}

impl FromStr for BuildType {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "elf" => Ok(BuildType::Elf),
            "shared" => Ok(BuildType::Shared),
            other => Err(BuildError::InvalidBuildType(other.to_string())),
        }
    }
}

impl ProjectDescriptor {
    /// Descriptor written by `sbuild new`.
    pub fn scaffold(c: bool) -> Self {
        let source_path = if c { "./src/main.c" } else { "./src/main.cpp" };
        Self {
            build_output_path: "./build/output".to_string(),
            source_path: source_path.to_string(),
            build_type: BuildType::Elf.as_str().to_string(),
            include_specs: Some(vec![DEFAULT_INCLUDE_SPEC.to_string()]),
            version: "1.0".to_string(),
            flags: None,
            c: c.then_some(true),
            compiler: None,
            extra: Map::new(),
        }
    }

    pub fn parsed_build_type(&self) -> Result<BuildType, BuildError> {
        self.build_type.parse()
    }

    /// Include specs in effect, falling back to [`DEFAULT_INCLUDE_SPEC`].
    pub fn effective_include_specs(&self) -> Vec<String> {
        match &self.include_specs {
            Some(specs) => specs.clone(),
            None => vec![DEFAULT_INCLUDE_SPEC.to_string()],
        }
    }

    pub fn extra_flags(&self) -> Vec<String> {
        self.flags.as_ref().map(Flags::to_args).unwrap_or_default()
    }

    /// Compiler program: explicit `compiler`, else `gcc` for C, else `g++`.
    pub fn compiler_program(&self) -> &str {
        match &self.compiler {
            Some(compiler) => compiler.as_str(),
            None if self.c.unwrap_or(false) => "gcc",
            None => "g++",
        }
    }

    /// `{buildpath}-{version}`, using the version currently recorded.
    pub fn output_name(&self) -> String {
        format!("{}-{}", self.build_output_path, self.version)
    }
}
