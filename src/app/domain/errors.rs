use super::place::Place;

pub const USER_PLACES_LOAD_FALLBACK: &str = "Failed to fetch user places.";
pub const CATALOG_LOAD_MESSAGE: &str = "Could not fetch places, please try again later.";
pub const ADD_FALLBACK: &str = "Failed to update places.";
pub const REMOVE_FALLBACK: &str = "Failed to delete place.";
pub const LOCATION_UNAVAILABLE_MESSAGE: &str =
    "Your location is unavailable, places are shown in catalog order.";

pub const ERROR_TITLE: &str = "An error occurred!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Initial fetch of a list failed; the list view is replaced.
    Load,
    /// Persisting a selection change failed; shown as a dismissible overlay.
    Mutation,
    LocationUnavailable,
}

/// A user-facing error: what went wrong and the text to show for it.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorState {
    pub kind: ErrorKind,
    pub title: String,
    pub message: String,
}

impl ErrorState {
    /// Build an error from an optional failure message, falling back to
    /// `fallback` when the failure carries no text.
    pub fn new(kind: ErrorKind, message: Option<&str>, fallback: &str) -> Self {
        let message = message
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(fallback)
            .to_string();
        Self {
            kind,
            title: ERROR_TITLE.to_string(),
            message,
        }
    }
}

/// What a place list widget should show.
#[derive(Debug, Clone, PartialEq)]
pub enum ListView {
    Loading(String),
    Empty(String),
    Places(Vec<Place>),
    Error(ErrorState),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_kept_when_present() {
        let err = ErrorState::new(ErrorKind::Mutation, Some("Server exploded"), ADD_FALLBACK);
        assert_eq!(err.message, "Server exploded");
        assert_eq!(err.title, ERROR_TITLE);
    }

    #[test]
    fn test_fallback_for_missing_or_blank_message() {
        let err = ErrorState::new(ErrorKind::Mutation, None, REMOVE_FALLBACK);
        assert_eq!(err.message, REMOVE_FALLBACK);

        let err = ErrorState::new(ErrorKind::Load, Some("   "), USER_PLACES_LOAD_FALLBACK);
        assert_eq!(err.message, USER_PLACES_LOAD_FALLBACK);
    }
}
