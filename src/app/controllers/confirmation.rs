use crate::app::domain::{EscapeBehavior, Place, PlaceId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    Closed,
    Open,
}

/// Holds a removal back until the user confirms it.
pub struct ConfirmationFlow {
    state: DialogState,
    /// Only read while open; left stale after cancel.
    pending: Option<Place>,
    escape_behavior: EscapeBehavior,
}

impl ConfirmationFlow {
    pub fn new(escape_behavior: EscapeBehavior) -> Self {
        Self {
            state: DialogState::Closed,
            pending: None,
            escape_behavior,
        }
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == DialogState::Open
    }

    /// The place the open dialog is asking about.
    pub fn pending(&self) -> Option<&Place> {
        match self.state {
            DialogState::Open => self.pending.as_ref(),
            DialogState::Closed => None,
        }
    }

    pub fn set_escape_behavior(&mut self, behavior: EscapeBehavior) {
        self.escape_behavior = behavior;
    }

    /// Open the dialog for `place`, replacing any earlier request.
    pub fn request_removal(&mut self, place: Place) {
        tracing::debug!("Asking to remove {}", place.id);
        self.pending = Some(place);
        self.state = DialogState::Open;
    }

    pub fn cancel(&mut self) {
        self.state = DialogState::Closed;
    }

    /// Close the dialog and return the id to remove. Returns `None` unless
    /// the dialog was open, so a removal fires at most once per request.
    pub fn confirm(&mut self) -> Option<PlaceId> {
        if self.state != DialogState::Open {
            return None;
        }
        self.state = DialogState::Closed;
        self.pending.as_ref().map(|p| p.id.clone())
    }

    /// Escape key or window close.
    pub fn dismiss(&mut self) -> Option<PlaceId> {
        match self.escape_behavior {
            EscapeBehavior::Confirm => self.confirm(),
            EscapeBehavior::Cancel => {
                self.cancel();
                None
            }
        }
    }
}
