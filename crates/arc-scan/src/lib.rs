//! Finds archived GitHub repositories among the Go module dependencies of a
//! project tree.
//!
//! A scan runs in three steps: [`locator`] walks the tree for manifests,
//! [`extract`] groups their GitHub dependencies by repository and
//! [`resolve`] looks each repository up concurrently, sending archived
//! matches to an [`ArchiveReport`].

pub mod error;
pub mod extract;
pub mod locator;
pub mod report;
pub mod resolve;

pub use error::{Result, ScanError};
pub use extract::{extract_dependencies, DependencyIndex, Reference};
pub use locator::{find_manifests, GO_MOD};
pub use report::{format_match, ArchiveReport};
pub use resolve::{check_index, resolve, ResolveOptions};
