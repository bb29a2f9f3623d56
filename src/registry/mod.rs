//! The shared state registry.
//!
//! This module provides the bookkeeping behind shared entries:
//! - Entry storage: one shared cell per entry id
//! - Reference counts: how many live handles hold interest in each id
//! - Lifecycle: entries exist exactly while their count is positive

mod registry;

pub use registry::StateRegistry;
