//! Domain layer - core data structures and types.
//!
//! This module contains the fundamental domain models:
//! - Place, PlaceId and Coordinates
//! - User-facing error state and list view models
//! - Application settings
//! - Message types for the event system

pub mod errors;
pub mod messages;
pub mod place;
pub mod settings;

pub use errors::{ErrorKind, ErrorState, ListView};
pub use messages::Message;
pub use place::{Coordinates, Place, PlaceId, PlaceImage};
pub use settings::{AppSettings, EscapeBehavior, LocationSource, ThemeMode};
