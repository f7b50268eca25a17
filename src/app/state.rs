use std::sync::Arc;

use fltk::{app::Sender, dialog, prelude::*};

use super::controllers::available::{AvailablePlacesLoader, LoaderAction};
use super::controllers::confirmation::ConfirmationFlow;
use super::controllers::selection::{PersistRequest, SelectionManager};
use super::domain::{AppSettings, Message, PlaceId, ThemeMode};
use super::services::location::{LocationProvider, provider_for};
use super::services::store::{HttpPlaceStore, PlaceStore};
use crate::ui::dialogs::about::show_about_dialog;
use crate::ui::dialogs::settings_dialog::show_settings_dialog;
use crate::ui::main_window::{BANNER_HEIGHT, MainWidgets};
use crate::ui::place_list::describe_place;
use crate::ui::theme::{ThemedWidgets, apply_theme};
#[cfg(target_os = "windows")]
use crate::ui::theme::set_windows_titlebar_theme;

/// Owns the widgets and the three controllers. Every `Message` from the
/// channel lands in `handle`, which updates a controller, starts any
/// background work it asked for, then re-renders.
pub struct AppState {
    pub widgets: MainWidgets,
    pub sender: Sender<Message>,
    pub settings: AppSettings,
    pub dark_mode: bool,
    store: Arc<dyn PlaceStore>,
    locator: Arc<dyn LocationProvider>,
    selection: SelectionManager,
    available: AvailablePlacesLoader,
    confirmation: ConfirmationFlow,
}

impl AppState {
    pub fn new(widgets: MainWidgets, sender: Sender<Message>, settings: AppSettings) -> Self {
        let store: Arc<dyn PlaceStore> =
            Arc::new(HttpPlaceStore::new(&settings.server_url, settings.request_timeout_secs));
        let locator: Arc<dyn LocationProvider> =
            Arc::from(provider_for(&settings.location_source, settings.location_timeout_secs));
        Self::with_services(widgets, sender, settings, store, locator)
    }

    pub fn with_services(
        widgets: MainWidgets,
        sender: Sender<Message>,
        settings: AppSettings,
        store: Arc<dyn PlaceStore>,
        locator: Arc<dyn LocationProvider>,
    ) -> Self {
        let dark_mode = settings.is_dark();
        let confirmation = ConfirmationFlow::new(settings.escape_behavior);
        Self {
            widgets,
            sender,
            settings,
            dark_mode,
            store,
            locator,
            selection: SelectionManager::new(),
            available: AvailablePlacesLoader::new(),
            confirmation,
        }
    }

    /// Kick off the initial loads of both lists.
    pub fn start(&mut self) {
        self.selection.begin_load();
        let store = Arc::clone(&self.store);
        let s = self.sender;
        std::thread::spawn(move || {
            let result = store.fetch_user_places();
            s.send(Message::UserPlacesLoaded(result));
        });

        if let Some(action) = self.available.start() {
            self.run_loader_action(action);
        }
        self.render();
    }

    /// Returns true once the app should exit.
    pub fn handle(&mut self, msg: Message) -> bool {
        match msg {
            Message::Quit => return true,
            Message::OpenSettings => self.open_settings(),
            Message::ToggleDarkMode => self.toggle_dark_mode(),
            Message::ShowAbout => show_about_dialog(&self.settings.server_url),

            Message::UserPlacesLoaded(result) => {
                let next = self.selection.finish_load(result);
                self.dispatch(next);
            }
            Message::StartRemovePlace(id) => self.start_removal(&id),
            Message::PersistFinished { ticket, result } => {
                let next = self.selection.finish_persist(ticket, result);
                self.dispatch(next);
            }
            Message::DismissError => self.selection.dismiss_error(),

            Message::ConfirmRemoval => {
                let id = self.confirmation.confirm();
                self.finish_removal(id);
            }
            Message::CancelRemoval => self.confirmation.cancel(),
            Message::RemovalDialogClosed => {
                let id = self.confirmation.dismiss();
                self.finish_removal(id);
            }

            Message::CatalogLoaded(result) => {
                if let Some(action) = self.available.catalog_loaded(result) {
                    self.run_loader_action(action);
                }
            }
            Message::LocationResolved { request, result } => {
                self.available.location_resolved(request, result)
            }
            Message::LocationTimedOut(request) => self.available.location_timed_out(request),
            Message::SelectPlace(id) => {
                if let Some(place) = self.available.find(&id).cloned() {
                    let next = self.selection.add(place);
                    self.dispatch(next);
                }
            }
        }
        self.render();
        false
    }

    fn start_removal(&mut self, id: &PlaceId) {
        let Some(place) = self.selection.find(id).cloned() else {
            return;
        };
        self.widgets.removal_dialog.open(&place, &self.widgets.wind);
        self.confirmation.request_removal(place);
    }

    fn finish_removal(&mut self, id: Option<PlaceId>) {
        self.widgets.removal_dialog.close();
        if let Some(id) = id {
            let next = self.selection.remove(&id);
            self.dispatch(next);
        }
    }

    fn dispatch(&self, request: Option<PersistRequest>) {
        let Some(request) = request else { return };
        tracing::debug!("Persisting {} places (ticket {})", request.places.len(), request.ticket);
        let store = Arc::clone(&self.store);
        let s = self.sender;
        std::thread::spawn(move || {
            let result = store.update_user_places(&request.places);
            s.send(Message::PersistFinished { ticket: request.ticket, result });
        });
    }

    fn run_loader_action(&mut self, action: LoaderAction) {
        match action {
            LoaderAction::FetchCatalog => {
                let store = Arc::clone(&self.store);
                let s = self.sender;
                std::thread::spawn(move || {
                    let result = store.fetch_available_places();
                    s.send(Message::CatalogLoaded(result));
                });
            }
            LoaderAction::Locate { request } => {
                let locator = Arc::clone(&self.locator);
                let s = self.sender;
                std::thread::spawn(move || {
                    let result = locator.current_position();
                    s.send(Message::LocationResolved { request, result });
                });

                let s = self.sender;
                fltk::app::add_timeout3(self.settings.location_timeout_secs as f64, move |_| {
                    s.send(Message::LocationTimedOut(request));
                });
            }
        }
    }

    pub fn render(&mut self) {
        let w = &mut self.widgets;

        let selected = self.selection.view();
        w.selected_list.render(&selected, |p| describe_place(p, None));

        let available = self.available.view();
        let loader = &self.available;
        w.available_list
            .render(&available, |p| describe_place(p, loader.distance_to(p)));

        match self.available.notice() {
            Some(notice) => {
                w.notice_banner.set_label(&format!("  {}", notice.message));
                w.notice_banner.show();
                w.flex.fixed(&w.notice_banner, BANNER_HEIGHT);
            }
            None => {
                w.notice_banner.hide();
                w.flex.fixed(&w.notice_banner, 0);
            }
        }

        if !self.confirmation.is_open() && w.removal_dialog.is_shown() {
            w.removal_dialog.close();
        }
        w.error_overlay.sync(self.selection.mutation_error(), &w.wind);

        w.flex.layout();
        w.wind.redraw();
    }

    pub fn apply_theme(&mut self) {
        let w = &mut self.widgets;
        apply_theme(
            ThemedWidgets {
                window: &mut w.wind,
                menu: &mut w.menu,
                header: &mut w.header,
                tagline: &mut w.tagline,
                notice_banner: &mut w.notice_banner,
                lists: [&mut w.selected_list, &mut w.available_list],
            },
            self.dark_mode,
        );
        #[cfg(target_os = "windows")]
        set_windows_titlebar_theme(&w.wind, self.dark_mode);
    }

    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
        self.settings.theme_mode = if self.dark_mode { ThemeMode::Dark } else { ThemeMode::Light };
        if let Err(e) = self.settings.save() {
            tracing::warn!("Failed to save settings: {}", e);
        }
        self.apply_theme();
    }

    pub fn open_settings(&mut self) {
        let Some(new_settings) = show_settings_dialog(&self.settings) else {
            return;
        };
        if let Err(e) = new_settings.save() {
            dialog::alert_default(&format!("Failed to save settings: {}", e));
            return;
        }
        self.apply_settings(new_settings);
    }

    /// Theme and Escape behavior apply at once. Server and location
    /// changes affect requests started after this point.
    pub fn apply_settings(&mut self, new_settings: AppSettings) {
        self.dark_mode = new_settings.is_dark();
        self.update_menu_checkbox("View/Toggle Dark Mode", self.dark_mode);
        self.confirmation.set_escape_behavior(new_settings.escape_behavior);

        if new_settings.server_url != self.settings.server_url
            || new_settings.request_timeout_secs != self.settings.request_timeout_secs
        {
            tracing::info!("Place service now {}", new_settings.server_url);
            self.store = Arc::new(HttpPlaceStore::new(
                &new_settings.server_url,
                new_settings.request_timeout_secs,
            ));
        }
        if new_settings.location_source != self.settings.location_source
            || new_settings.location_timeout_secs != self.settings.location_timeout_secs
        {
            self.locator = Arc::from(provider_for(
                &new_settings.location_source,
                new_settings.location_timeout_secs,
            ));
        }

        self.settings = new_settings;
        self.apply_theme();
    }

    fn update_menu_checkbox(&self, path: &str, checked: bool) {
        let idx = self.widgets.menu.find_index(path);
        if idx >= 0 {
            if let Some(mut item) = self.widgets.menu.at(idx) {
                if checked {
                    item.set();
                } else {
                    item.clear();
                }
            }
        }
    }
}
