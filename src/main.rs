use fltk::{app, enums::Event, prelude::*};

use place_picker::app::domain::{AppSettings, Message};
use place_picker::app::infrastructure::logging::init_logging;
use place_picker::app::state::AppState;
use place_picker::ui::main_window::build_main_window;
use place_picker::ui::menu::build_menu;

fn main() {
    init_logging();

    let app = app::App::default();
    let settings = AppSettings::load();
    tracing::info!("Using place service at {}", settings.server_url);

    let (sender, receiver) = app::channel::<Message>();

    let mut widgets = build_main_window(&sender);
    build_menu(&mut widgets.menu, &sender, settings.is_dark());

    // Closing the main window quits; Escape alone does not.
    widgets.wind.set_callback({
        let s = sender;
        move |_| {
            if app::event() == Event::Close {
                s.send(Message::Quit);
            }
        }
    });

    let mut state = AppState::new(widgets, sender, settings);
    state.apply_theme();
    state.widgets.wind.show();
    #[cfg(target_os = "windows")]
    place_picker::ui::theme::set_windows_titlebar_theme(&state.widgets.wind, state.dark_mode);

    state.start();

    while app.wait() {
        if let Some(msg) = receiver.recv() {
            if state.handle(msg) {
                app.quit();
            }
        }
    }
}
