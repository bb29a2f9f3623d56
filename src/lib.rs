//! # Multistate
//!
//! A reference-counted shared state registry for Rust.
//!
//! Multistate lets independent consumers (UI components, plugins, tasks)
//! read and write named pieces of shared reactive state without prop-drilling
//! or one global app store, and tears each piece down automatically when the
//! last interested consumer goes away.
//!
//! ## Registry (shared bookkeeping)
//!
//! - [`StateRegistry`] - Maps entry ids to shared cells and reference counts
//! - Entries live exactly as long as some live handle references them
//! - Explicit instances for isolation, or a process-wide `global()` fallback
//!
//! ## Handles (per-consumer access)
//!
//! - [`StateHandle`] - One per consumer; `get`/`set` by `(category, key)`
//! - Interest in an entry is registered at most once per handle
//! - Releasing the handle (explicitly or on drop) withdraws all of it
//!
//! ## Cells (reactive storage)
//!
//! - [`StateCell`] - Shared container holding an optional value
//! - All holders of the same entry observe writes immediately
//! - Subscribers run synchronously on every write

pub mod cell;
pub mod error;
pub mod handle;
pub mod registry;

// Re-export main types for convenience
pub use cell::StateCell;
pub use error::StateError;
pub use handle::{StateHandle, StateKey};
pub use registry::StateRegistry;
