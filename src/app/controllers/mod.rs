//! Controllers layer - orchestration and coordination.
//!
//! These hold the UI-independent state machines the coordinator drives:
//! - Saved places with optimistic updates and rollback
//! - Catalog loading and distance ordering
//! - Removal confirmation

pub mod available;
pub mod confirmation;
pub mod selection;
