//! The user's saved places ("I'd like to visit...").
//!
//! Changes are applied to the visible list immediately and persisted in the
//! background. Persists run one at a time, in the order the user made the
//! changes. Each persist sends the last list the service acknowledged with
//! that single change applied, so a failed change is dropped without losing
//! any other change queued behind it.

use std::collections::VecDeque;

use crate::app::domain::errors::{
    ADD_FALLBACK, ErrorKind, ErrorState, ListView, REMOVE_FALLBACK, USER_PLACES_LOAD_FALLBACK,
};
use crate::app::domain::{Place, PlaceId};
use crate::app::infrastructure::error::StoreError;

pub const LOADING_TEXT: &str = "Fetching your places...";
pub const FALLBACK_TEXT: &str = "Select the places you would like to visit below.";
const UNSAVED_CHANGES_MESSAGE: &str =
    "Your saved places could not be loaded, so changes can't be saved right now.";

#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Add(Place),
    Remove(PlaceId),
}

impl Mutation {
    fn apply(&self, places: &[Place]) -> Vec<Place> {
        match self {
            Mutation::Add(place) => {
                if places.iter().any(|p| p.id == place.id) {
                    places.to_vec()
                } else {
                    let mut next = Vec::with_capacity(places.len() + 1);
                    next.push(place.clone());
                    next.extend_from_slice(places);
                    next
                }
            }
            Mutation::Remove(id) => places.iter().filter(|p| p.id != *id).cloned().collect(),
        }
    }

    fn fallback_message(&self) -> &'static str {
        match self {
            Mutation::Add(_) => ADD_FALLBACK,
            Mutation::Remove(_) => REMOVE_FALLBACK,
        }
    }
}

/// A full replacement list to send to the place service.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistRequest {
    pub ticket: u64,
    pub places: Vec<Place>,
}

#[derive(Debug)]
struct QueuedMutation {
    ticket: u64,
    mutation: Mutation,
}

#[derive(Debug, Clone, PartialEq)]
enum LoadState {
    NotStarted,
    Loading,
    Loaded,
    Failed(ErrorState),
}

pub struct SelectionManager {
    /// Last list the service acknowledged (or served at startup).
    confirmed: Vec<Place>,
    /// `confirmed` with every queued mutation applied; what the user sees.
    visible: Vec<Place>,
    queue: VecDeque<QueuedMutation>,
    /// The front of `queue` has been handed out as a `PersistRequest`.
    in_flight: bool,
    next_ticket: u64,
    load: LoadState,
    mutation_error: Option<ErrorState>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self {
            confirmed: Vec::new(),
            visible: Vec::new(),
            queue: VecDeque::new(),
            in_flight: false,
            next_ticket: 1,
            load: LoadState::NotStarted,
            mutation_error: None,
        }
    }

    /// A manager whose saved list is already known.
    pub fn with_places(places: Vec<Place>) -> Self {
        let mut manager = Self::new();
        manager.confirmed = dedup_by_id(places);
        manager.visible = manager.confirmed.clone();
        manager.load = LoadState::Loaded;
        manager
    }

    pub fn begin_load(&mut self) {
        self.load = LoadState::Loading;
    }

    /// Apply the initial fetch. Changes made while it was running are sent
    /// once it succeeds; the first one is returned.
    pub fn finish_load(&mut self, result: Result<Vec<Place>, StoreError>) -> Option<PersistRequest> {
        match result {
            Ok(places) => {
                tracing::info!("Loaded {} saved places", places.len());
                self.confirmed = dedup_by_id(places);
                self.load = LoadState::Loaded;
                self.refresh_visible();
                self.dispatch_next()
            }
            Err(e) => {
                tracing::warn!("Failed to load saved places: {}", e);
                let error = ErrorState::new(ErrorKind::Load, e.user_message(), USER_PLACES_LOAD_FALLBACK);
                self.load = LoadState::Failed(error);
                if !self.queue.is_empty() {
                    self.queue.clear();
                    self.mutation_error = Some(unsaved_changes_error());
                }
                self.refresh_visible();
                None
            }
        }
    }

    /// Add a place to the front of the list. Does nothing if it's already there.
    pub fn add(&mut self, place: Place) -> Option<PersistRequest> {
        if self.visible.iter().any(|p| p.id == place.id) {
            tracing::debug!("Place {} already selected", place.id);
            return None;
        }
        self.enqueue(Mutation::Add(place))
    }

    /// Remove a place by id. An unknown id still persists the unchanged list.
    pub fn remove(&mut self, id: &PlaceId) -> Option<PersistRequest> {
        self.enqueue(Mutation::Remove(id.clone()))
    }

    fn enqueue(&mut self, mutation: Mutation) -> Option<PersistRequest> {
        if let LoadState::Failed(_) = self.load {
            tracing::warn!("Ignoring {:?}: saved places were never loaded", mutation);
            self.mutation_error = Some(unsaved_changes_error());
            return None;
        }

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.queue.push_back(QueuedMutation { ticket, mutation });
        self.refresh_visible();
        self.dispatch_next()
    }

    /// Record the outcome of the persist identified by `ticket` and hand out
    /// the next queued one, if any.
    pub fn finish_persist(&mut self, ticket: u64, result: Result<(), StoreError>) -> Option<PersistRequest> {
        let is_current = self.in_flight && self.queue.front().is_some_and(|q| q.ticket == ticket);
        if !is_current {
            tracing::warn!("Ignoring result for unknown persist ticket {}", ticket);
            return None;
        }

        self.in_flight = false;
        let done = self.queue.pop_front()?;

        match result {
            Ok(()) => {
                tracing::debug!("Persist {} succeeded", ticket);
                self.confirmed = done.mutation.apply(&self.confirmed);
            }
            Err(e) => {
                tracing::warn!("Persist {} failed, rolling back: {}", ticket, e);
                self.mutation_error = Some(ErrorState::new(
                    ErrorKind::Mutation,
                    e.user_message(),
                    done.mutation.fallback_message(),
                ));
            }
        }

        self.refresh_visible();
        self.dispatch_next()
    }

    fn dispatch_next(&mut self) -> Option<PersistRequest> {
        if self.in_flight || self.load == LoadState::Loading {
            return None;
        }
        let next = self.queue.front()?;
        self.in_flight = true;
        Some(PersistRequest {
            ticket: next.ticket,
            places: next.mutation.apply(&self.confirmed),
        })
    }

    fn refresh_visible(&mut self) {
        self.visible = self
            .queue
            .iter()
            .fold(self.confirmed.clone(), |places, q| q.mutation.apply(&places));
    }

    pub fn dismiss_error(&mut self) {
        self.mutation_error = None;
    }

    pub fn mutation_error(&self) -> Option<&ErrorState> {
        self.mutation_error.as_ref()
    }

    pub fn places(&self) -> &[Place] {
        &self.visible
    }

    pub fn find(&self, id: &PlaceId) -> Option<&Place> {
        self.visible.iter().find(|p| p.id == *id)
    }

    /// Changes not yet acknowledged by the service.
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    pub fn view(&self) -> ListView {
        match &self.load {
            LoadState::Loading => ListView::Loading(LOADING_TEXT.to_string()),
            LoadState::Failed(error) => ListView::Error(error.clone()),
            LoadState::NotStarted | LoadState::Loaded if self.visible.is_empty() => {
                ListView::Empty(FALLBACK_TEXT.to_string())
            }
            LoadState::NotStarted | LoadState::Loaded => ListView::Places(self.visible.clone()),
        }
    }
}

impl Default for SelectionManager {
    fn default() -> Self {
        Self::new()
    }
}

fn unsaved_changes_error() -> ErrorState {
    ErrorState::new(ErrorKind::Mutation, None, UNSAVED_CHANGES_MESSAGE)
}

fn dedup_by_id(places: Vec<Place>) -> Vec<Place> {
    let mut seen = std::collections::HashSet::new();
    places
        .into_iter()
        .filter(|p| seen.insert(p.id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::place::test_place;

    fn ids(places: &[Place]) -> Vec<&str> {
        places.iter().map(|p| p.id.as_str()).collect()
    }

    fn server_error() -> StoreError {
        StoreError::Status { status: 500, message: None }
    }

    #[test]
    fn test_add_prepends_and_persists_full_list() {
        let mut manager = SelectionManager::with_places(vec![test_place("1", 0.0, 0.0)]);

        let request = manager.add(test_place("2", 0.0, 0.0)).unwrap();
        assert_eq!(ids(manager.places()), vec!["2", "1"]);
        assert_eq!(ids(&request.places), vec!["2", "1"]);
        assert_eq!(manager.pending_count(), 1);
    }

    #[test]
    fn test_add_existing_is_noop() {
        let mut manager = SelectionManager::with_places(vec![
            test_place("1", 0.0, 0.0),
            test_place("2", 0.0, 0.0),
        ]);

        assert!(manager.add(test_place("1", 0.0, 0.0)).is_none());
        assert_eq!(ids(manager.places()), vec!["1", "2"]);
        assert_eq!(manager.pending_count(), 0);
        assert!(manager.mutation_error().is_none());
    }

    #[test]
    fn test_add_failure_rolls_back_exactly() {
        let initial = vec![test_place("1", 0.0, 0.0), test_place("3", 0.0, 0.0)];
        let mut manager = SelectionManager::with_places(initial.clone());

        let request = manager.add(test_place("2", 0.0, 0.0)).unwrap();
        assert!(manager.finish_persist(request.ticket, Err(server_error())).is_none());

        assert_eq!(manager.places(), initial.as_slice());
        let error = manager.mutation_error().unwrap();
        assert_eq!(error.kind, ErrorKind::Mutation);
        assert_eq!(error.message, ADD_FALLBACK);
    }

    #[test]
    fn test_failure_message_from_service_is_used() {
        let mut manager = SelectionManager::with_places(vec![]);
        let request = manager.add(test_place("1", 0.0, 0.0)).unwrap();
        let err = StoreError::Status { status: 400, message: Some("Quota exceeded".into()) };
        manager.finish_persist(request.ticket, Err(err));
        assert_eq!(manager.mutation_error().unwrap().message, "Quota exceeded");
    }

    #[test]
    fn test_remove_success() {
        let mut manager = SelectionManager::with_places(vec![
            test_place("1", 0.0, 0.0),
            test_place("2", 0.0, 0.0),
        ]);

        let request = manager.remove(&PlaceId::new("1")).unwrap();
        assert_eq!(ids(&request.places), vec!["2"]);
        assert_eq!(ids(manager.places()), vec!["2"]);

        assert!(manager.finish_persist(request.ticket, Ok(())).is_none());
        assert_eq!(ids(manager.places()), vec!["2"]);
        assert!(manager.find(&PlaceId::new("1")).is_none());
        assert!(manager.mutation_error().is_none());
        assert_eq!(manager.pending_count(), 0);
    }

    #[test]
    fn test_remove_failure_restores_place() {
        let mut manager = SelectionManager::with_places(vec![
            test_place("1", 0.0, 0.0),
            test_place("2", 0.0, 0.0),
        ]);

        let request = manager.remove(&PlaceId::new("2")).unwrap();
        manager.finish_persist(request.ticket, Err(StoreError::Transport("reset".into())));

        assert_eq!(ids(manager.places()), vec!["1", "2"]);
        assert_eq!(manager.mutation_error().unwrap().message, REMOVE_FALLBACK);
    }

    #[test]
    fn test_remove_unknown_id_still_persists() {
        let mut manager = SelectionManager::with_places(vec![test_place("1", 0.0, 0.0)]);
        let request = manager.remove(&PlaceId::new("nope")).unwrap();
        assert_eq!(ids(&request.places), vec!["1"]);
    }

    #[test]
    fn test_dismiss_error_only_clears_error() {
        let mut manager = SelectionManager::with_places(vec![test_place("1", 0.0, 0.0)]);
        let request = manager.add(test_place("2", 0.0, 0.0)).unwrap();
        manager.finish_persist(request.ticket, Err(server_error()));

        manager.dismiss_error();
        assert!(manager.mutation_error().is_none());
        assert_eq!(ids(manager.places()), vec!["1"]);
    }

    #[test]
    fn test_retry_after_failure() {
        let mut manager = SelectionManager::with_places(vec![]);
        let first = manager.add(test_place("1", 0.0, 0.0)).unwrap();
        manager.finish_persist(first.ticket, Err(server_error()));

        let second = manager.add(test_place("1", 0.0, 0.0)).unwrap();
        assert_ne!(first.ticket, second.ticket);
        manager.finish_persist(second.ticket, Ok(()));
        assert_eq!(ids(manager.places()), vec!["1"]);
    }

    #[test]
    fn test_mutations_are_serialized() {
        let mut manager = SelectionManager::with_places(vec![test_place("1", 0.0, 0.0)]);

        let add = manager.add(test_place("2", 0.0, 0.0)).unwrap();
        // A second change while the first is in flight is queued, not sent.
        assert!(manager.remove(&PlaceId::new("1")).is_none());
        assert_eq!(ids(manager.places()), vec!["2"]);

        let remove = manager.finish_persist(add.ticket, Ok(())).unwrap();
        assert_eq!(ids(&remove.places), vec!["2"]);
        assert!(manager.finish_persist(remove.ticket, Ok(())).is_none());
        assert_eq!(ids(manager.places()), vec!["2"]);
    }

    #[test]
    fn test_failed_mutation_keeps_later_queued_change() {
        let mut manager = SelectionManager::with_places(vec![test_place("1", 0.0, 0.0)]);

        let add = manager.add(test_place("2", 0.0, 0.0)).unwrap();
        assert!(manager.add(test_place("3", 0.0, 0.0)).is_none());
        assert_eq!(ids(manager.places()), vec!["3", "2", "1"]);

        // The first add fails; the second one is still shown and sent on its own.
        let next = manager.finish_persist(add.ticket, Err(server_error())).unwrap();
        assert_eq!(ids(manager.places()), vec!["3", "1"]);
        assert_eq!(ids(&next.places), vec!["3", "1"]);

        manager.finish_persist(next.ticket, Ok(()));
        assert_eq!(ids(manager.places()), vec!["3", "1"]);
        assert!(manager.mutation_error().is_some());
    }

    #[test]
    fn test_stale_ticket_ignored() {
        let mut manager = SelectionManager::with_places(vec![]);
        let request = manager.add(test_place("1", 0.0, 0.0)).unwrap();

        assert!(manager.finish_persist(request.ticket + 10, Err(server_error())).is_none());
        assert_eq!(ids(manager.places()), vec!["1"]);
        assert!(manager.mutation_error().is_none());

        manager.finish_persist(request.ticket, Ok(()));
        // Reporting the same ticket twice does nothing.
        assert!(manager.finish_persist(request.ticket, Err(server_error())).is_none());
        assert_eq!(ids(manager.places()), vec!["1"]);
    }

    #[test]
    fn test_load_success() {
        let mut manager = SelectionManager::new();
        manager.begin_load();
        assert_eq!(manager.view(), ListView::Loading(LOADING_TEXT.to_string()));

        let places = vec![test_place("1", 0.0, 0.0), test_place("1", 5.0, 5.0), test_place("2", 0.0, 0.0)];
        assert!(manager.finish_load(Ok(places)).is_none());
        assert_eq!(ids(manager.places()), vec!["1", "2"]);
        assert!(matches!(manager.view(), ListView::Places(p) if p.len() == 2));
    }

    #[test]
    fn test_load_empty_shows_fallback() {
        let mut manager = SelectionManager::new();
        manager.begin_load();
        manager.finish_load(Ok(vec![]));
        assert_eq!(manager.view(), ListView::Empty(FALLBACK_TEXT.to_string()));
    }

    #[test]
    fn test_load_failure_replaces_view() {
        let mut manager = SelectionManager::new();
        manager.begin_load();
        manager.finish_load(Err(StoreError::Transport("refused".into())));

        match manager.view() {
            ListView::Error(e) => {
                assert_eq!(e.kind, ErrorKind::Load);
                assert_eq!(e.message, USER_PLACES_LOAD_FALLBACK);
            }
            other => panic!("expected error view, got {:?}", other),
        }
        assert!(manager.mutation_error().is_none());
    }

    #[test]
    fn test_add_during_load_waits_for_saved_list() {
        let mut manager = SelectionManager::new();
        manager.begin_load();

        assert!(manager.add(test_place("new", 0.0, 0.0)).is_none());

        let request = manager
            .finish_load(Ok(vec![test_place("old", 0.0, 0.0)]))
            .unwrap();
        assert_eq!(ids(&request.places), vec!["new", "old"]);
        assert_eq!(ids(manager.places()), vec!["new", "old"]);
    }

    #[test]
    fn test_changes_refused_after_failed_load() {
        let mut manager = SelectionManager::new();
        manager.begin_load();
        manager.finish_load(Err(server_error()));

        assert!(manager.add(test_place("1", 0.0, 0.0)).is_none());
        assert_eq!(manager.pending_count(), 0);
        assert_eq!(manager.mutation_error().unwrap().message, UNSAVED_CHANGES_MESSAGE);
    }

    #[test]
    fn test_select_then_fail_end_to_end() {
        let mut manager = SelectionManager::with_places(vec![test_place("1", 0.0, 0.0)]);

        let request = manager.add(test_place("2", 0.0, 0.0)).unwrap();
        assert_eq!(ids(manager.places()), vec!["2", "1"]);

        manager.finish_persist(request.ticket, Err(server_error()));
        assert_eq!(ids(manager.places()), vec!["1"]);
        let error = manager.mutation_error().unwrap();
        assert!(!error.message.is_empty());
    }

    #[test]
    fn test_driven_against_store() {
        use crate::app::services::store::PlaceStore;
        use crate::app::services::store::tests::FakeStore;

        let mut store = FakeStore::new(vec![], vec![test_place("1", 0.0, 0.0)]);
        let mut manager = SelectionManager::new();
        manager.begin_load();
        assert!(manager.finish_load(store.fetch_user_places()).is_none());

        let mut next = manager.add(test_place("2", 0.0, 0.0));
        while let Some(request) = next {
            let result = store.update_user_places(&request.places);
            next = manager.finish_persist(request.ticket, result);
        }
        assert_eq!(ids(manager.places()), vec!["2", "1"]);

        store.fail_updates = true;
        let request = manager.remove(&PlaceId::new("1")).unwrap();
        let result = store.update_user_places(&request.places);
        assert!(manager.finish_persist(request.ticket, result).is_none());
        assert_eq!(ids(manager.places()), vec!["2", "1"]);
        assert_eq!(manager.mutation_error().unwrap().message, REMOVE_FALLBACK);

        let sent = store.updates.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(ids(&sent[0]), vec!["2", "1"]);
        assert_eq!(ids(&sent[1]), vec!["2"]);
    }
}
