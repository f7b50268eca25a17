use crate::app::domain::errors::{
    CATALOG_LOAD_MESSAGE, ErrorKind, ErrorState, LOCATION_UNAVAILABLE_MESSAGE, ListView,
};
use crate::app::domain::{Coordinates, Place, PlaceId};
use crate::app::infrastructure::error::{LocationError, StoreError};
use crate::app::services::distance::{distance_km, sort_by_distance};

pub const LOADING_TEXT: &str = "Fetching place data...";
pub const FALLBACK_TEXT: &str = "No places available.";

#[derive(Debug, Clone, PartialEq)]
pub enum LoaderState {
    Idle,
    Loading,
    /// Catalog arrived; still waiting for a location fix before showing it.
    Locating { request: u64 },
    Ready,
    Failed(ErrorState),
}

/// Background work the loader needs the caller to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderAction {
    FetchCatalog,
    /// Ask for a location fix; report back with the same `request`.
    Locate { request: u64 },
}

/// Loads the catalog once and orders it by distance from the user.
pub struct AvailablePlacesLoader {
    state: LoaderState,
    catalog: Vec<Place>,
    available: Vec<Place>,
    origin: Option<Coordinates>,
    notice: Option<ErrorState>,
    next_request: u64,
}

impl AvailablePlacesLoader {
    pub fn new() -> Self {
        Self {
            state: LoaderState::Idle,
            catalog: Vec::new(),
            available: Vec::new(),
            origin: None,
            notice: None,
            next_request: 1,
        }
    }

    pub fn state(&self) -> &LoaderState {
        &self.state
    }

    /// Begin loading. Only the first call does anything.
    pub fn start(&mut self) -> Option<LoaderAction> {
        if self.state != LoaderState::Idle {
            return None;
        }
        self.state = LoaderState::Loading;
        Some(LoaderAction::FetchCatalog)
    }

    pub fn catalog_loaded(&mut self, result: Result<Vec<Place>, StoreError>) -> Option<LoaderAction> {
        if self.state != LoaderState::Loading {
            tracing::warn!("Catalog arrived in state {:?}, ignoring", self.state);
            return None;
        }

        match result {
            Ok(places) => {
                tracing::info!("Catalog has {} places, locating user", places.len());
                self.catalog = places;
                let request = self.next_request;
                self.next_request += 1;
                self.state = LoaderState::Locating { request };
                Some(LoaderAction::Locate { request })
            }
            Err(e) => {
                tracing::warn!("Failed to fetch catalog: {}", e);
                // The catalog error never echoes the service's text.
                self.state = LoaderState::Failed(ErrorState::new(ErrorKind::Load, None, CATALOG_LOAD_MESSAGE));
                None
            }
        }
    }

    pub fn location_resolved(&mut self, request: u64, result: Result<Coordinates, LocationError>) {
        if !self.is_waiting_for(request) {
            tracing::debug!("Ignoring location result for request {}", request);
            return;
        }

        match result {
            Ok(origin) => {
                tracing::info!("Sorting catalog from ({:.4}, {:.4})", origin.latitude, origin.longitude);
                self.available = sort_by_distance(&self.catalog, origin);
                self.origin = Some(origin);
                self.state = LoaderState::Ready;
            }
            Err(e) => self.use_catalog_order(e),
        }
    }

    pub fn location_timed_out(&mut self, request: u64) {
        if self.is_waiting_for(request) {
            self.use_catalog_order(LocationError::Timeout);
        }
    }

    fn is_waiting_for(&self, request: u64) -> bool {
        self.state == LoaderState::Locating { request }
    }

    fn use_catalog_order(&mut self, reason: LocationError) {
        tracing::warn!("{}; showing catalog order", reason);
        self.available = self.catalog.clone();
        self.notice = Some(ErrorState::new(
            ErrorKind::LocationUnavailable,
            None,
            LOCATION_UNAVAILABLE_MESSAGE,
        ));
        self.state = LoaderState::Ready;
    }

    pub fn places(&self) -> &[Place] {
        &self.available
    }

    pub fn find(&self, id: &PlaceId) -> Option<&Place> {
        self.available.iter().find(|p| p.id == *id)
    }

    /// Set when the list is shown unsorted because no location was available.
    pub fn notice(&self) -> Option<&ErrorState> {
        self.notice.as_ref()
    }

    pub fn distance_to(&self, place: &Place) -> Option<f64> {
        let origin = self.origin?;
        let coords = place.coordinates();
        coords.is_valid().then(|| distance_km(origin, coords))
    }

    pub fn view(&self) -> ListView {
        match &self.state {
            LoaderState::Idle | LoaderState::Loading | LoaderState::Locating { .. } => {
                ListView::Loading(LOADING_TEXT.to_string())
            }
            LoaderState::Failed(error) => ListView::Error(error.clone()),
            LoaderState::Ready if self.available.is_empty() => ListView::Empty(FALLBACK_TEXT.to_string()),
            LoaderState::Ready => ListView::Places(self.available.clone()),
        }
    }
}

impl Default for AvailablePlacesLoader {
    fn default() -> Self {
        Self::new()
    }
}
