//! Shared collections for the patchbay crates.
pub mod collections;
