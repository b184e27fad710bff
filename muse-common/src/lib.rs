//! Shared plumbing for the Muse workspace.
//!
//! Currently this is only the [`observability`] module, which centralises
//! `tracing` initialisation so every binary and integration test emits into
//! the same rolling file sink. It is intentionally lightweight so that all
//! crates can depend on it without pulling in heavy transitive costs.

pub mod observability;
