//! CLI command implementations.

pub mod gomod;
