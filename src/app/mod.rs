//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (Place, Settings, Messages, view states)
//! - `controllers/` - Orchestration (SelectionManager, AvailablePlacesLoader, ConfirmationFlow)
//! - `services/` - Business operations (place store, location lookup, distance sorting)
//! - `infrastructure/` - Cross-cutting concerns (errors, logging)
//! - `state.rs` - Main application coordinator

pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod state;

// Re-exports for convenient external access
pub use controllers::available::AvailablePlacesLoader;
pub use controllers::confirmation::ConfirmationFlow;
pub use controllers::selection::SelectionManager;
pub use domain::{AppSettings, EscapeBehavior, ListView, Message, Place, PlaceId, ThemeMode};
pub use infrastructure::error::{AppError, LocationError, StoreError};
pub use services::store::{HttpPlaceStore, PlaceStore};
