//! # sbuild - Minimal C/C++ Build Orchestrator
//!
//! sbuild reads a declarative `project.json`, turns it into a single compiler
//! invocation, runs it, and bumps the recorded version only when the compiler
//! succeeds.
//!
//! ## Quick Start
//!
//! ```bash
//! sbuild new myapp
//! cd myapp
//! sbuild build 1.1   # produces ./build/output-1.0, records version 1.1
//! ```
//!
//! ## Module Organization
//!
//! - [`build`] - Include expansion, command assembly and the build/commit protocol
//! - [`config`] - The `project.json` descriptor
//! - [`store`] - Loading and saving the descriptor
//! - [`error`] - Error taxonomy

/// Include expansion, command assembly and the build/commit protocol.
pub mod build;

/// Project descriptor (`project.json`).
pub mod config;

/// Build errors and include warnings.
pub mod error;

/// Header installation into `include/`.
pub mod install;

/// Project scaffolding.
pub mod project;

/// Descriptor persistence.
pub mod store;

/// Starter templates for `sbuild new`.
pub mod templates;
