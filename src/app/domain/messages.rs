use super::place::{Coordinates, Place, PlaceId};
use crate::app::infrastructure::error::{LocationError, StoreError};

/// All messages that can be sent through the FLTK channel.
/// Widget callbacks and background threads send one of these; the dispatch
/// loop in main hands them to `AppState::handle`.
#[derive(Debug, Clone)]
pub enum Message {
    // File
    OpenSettings,
    Quit,

    // View
    ToggleDarkMode,

    // Help
    ShowAbout,

    // Saved places
    UserPlacesLoaded(Result<Vec<Place>, StoreError>),
    StartRemovePlace(PlaceId),
    PersistFinished {
        ticket: u64,
        result: Result<(), StoreError>,
    },
    DismissError,

    // Removal dialog
    ConfirmRemoval,
    CancelRemoval,
    /// Escape key or window close on the removal dialog.
    RemovalDialogClosed,

    // Available places
    CatalogLoaded(Result<Vec<Place>, StoreError>),
    LocationResolved {
        request: u64,
        result: Result<Coordinates, LocationError>,
    },
    LocationTimedOut(u64),
    SelectPlace(PlaceId),
}
