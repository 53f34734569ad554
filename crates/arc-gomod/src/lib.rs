//! Parser for Go module definition files (`go.mod`).
//!
//! Produces the structured records the archived-dependency scanner needs:
//! required module paths with their `// indirect` marker, and replace
//! directives with their old and new paths. Only the subset of the grammar
//! that carries dependency information is modelled: `go`, `toolchain` and
//! `exclude` are checked for arity but not kept, and `retract`, `godebug`,
//! `tool` and `ignore` directives are accepted and skipped.

pub mod error;
pub mod modfile;

pub use error::{ModFileError, Result};
pub use modfile::{parse, ModFile, ModuleVersion, Replace, Require};
