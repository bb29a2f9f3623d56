//! Reactive value cells.
//!
//! This module provides the storage primitive the registry hands out:
//! - Cells: Shared containers holding an optional value
//! - Clones alias the same storage, so writes are observed everywhere
//! - Subscribers: Callbacks that run synchronously on every write

mod cell;

pub use cell::StateCell;
