//! Per-consumer handles.
//!
//! This module provides the consumer-facing surface:
//! - Handles: one per consumer, tracking every entry id it touched
//! - Keys: the `(category, key)` to entry-id construction
//! - Release: one-pass withdrawal of a consumer's interest, RAII-backed

mod handle;
mod key;

pub use handle::StateHandle;
pub use key::StateKey;
