use fltk::{
    button::{Button, RadioRoundButton},
    dialog,
    enums::{Align, Color},
    frame::Frame,
    group::Group,
    input::{FloatInput, Input, IntInput},
    prelude::*,
    window::Window,
};
use std::cell::RefCell;
use std::rc::Rc;

use crate::app::domain::{AppSettings, EscapeBehavior, LocationSource, ThemeMode};

fn section_label(y: i32, text: &str) {
    Frame::default()
        .with_pos(15, y)
        .with_size(390, 25)
        .with_label(text)
        .with_align(Align::Left | Align::Inside);
}

fn parse_secs(input: &IntInput, fallback: u64) -> u64 {
    input.value().trim().parse().unwrap_or(fallback)
}

/// Show settings dialog and return updated settings if user clicked Save.
pub fn show_settings_dialog(current_settings: &AppSettings) -> Option<AppSettings> {
    let mut dialog = Window::default()
        .with_size(420, 560)
        .with_label("Settings")
        .center_screen();
    dialog.make_modal(true);

    // Place service
    section_label(15, "Place service URL:");
    let mut server_input = Input::default().with_pos(30, 40).with_size(370, 25);
    server_input.set_value(&current_settings.server_url);

    section_label(70, "Request timeout (seconds):");
    let mut request_timeout = IntInput::default().with_pos(30, 95).with_size(80, 25);
    request_timeout.set_value(&current_settings.request_timeout_secs.to_string());

    // Location
    section_label(130, "Location:");
    let location_group = Group::default().with_pos(30, 155).with_size(370, 50);
    let mut loc_ip = RadioRoundButton::default().with_pos(30, 155).with_size(370, 25).with_label("Look up from IP address");
    let mut loc_fixed = RadioRoundButton::default().with_pos(30, 180).with_size(370, 25).with_label("Fixed position");
    location_group.end();

    let mut lookup_url = Input::default().with_pos(130, 210).with_size(270, 25).with_label("Lookup URL ");
    let mut fixed_lat = FloatInput::default().with_pos(130, 240).with_size(100, 25).with_label("Latitude ");
    let mut fixed_lon = FloatInput::default().with_pos(300, 240).with_size(100, 25).with_label("Longitude ");

    match &current_settings.location_source {
        LocationSource::IpLookup { url } => {
            loc_ip.set_value(true);
            lookup_url.set_value(url);
        }
        LocationSource::Fixed { latitude, longitude } => {
            loc_fixed.set_value(true);
            fixed_lat.set_value(&latitude.to_string());
            fixed_lon.set_value(&longitude.to_string());
        }
    }

    section_label(275, "Give up on location after (seconds):");
    let mut location_timeout = IntInput::default().with_pos(30, 300).with_size(80, 25);
    location_timeout.set_value(&current_settings.location_timeout_secs.to_string());

    // Removal dialog
    section_label(335, "Pressing Escape on the removal dialog:");
    let escape_group = Group::default().with_pos(30, 360).with_size(370, 50);
    let mut escape_cancel = RadioRoundButton::default().with_pos(30, 360).with_size(370, 25).with_label("Keeps the place");
    let mut escape_confirm = RadioRoundButton::default().with_pos(30, 385).with_size(370, 25).with_label("Removes the place");
    escape_group.end();

    match current_settings.escape_behavior {
        EscapeBehavior::Cancel => escape_cancel.set_value(true),
        EscapeBehavior::Confirm => escape_confirm.set_value(true),
    }

    // Theme
    section_label(420, "Theme:");
    let theme_group = Group::default().with_pos(30, 445).with_size(370, 50);
    let mut theme_light = RadioRoundButton::default().with_pos(30, 445).with_size(370, 25).with_label("Light");
    let mut theme_dark = RadioRoundButton::default().with_pos(30, 470).with_size(370, 25).with_label("Dark");
    theme_group.end();

    match current_settings.theme_mode {
        ThemeMode::Light => theme_light.set_value(true),
        ThemeMode::Dark => theme_dark.set_value(true),
    }

    let mut info_frame = Frame::default().with_pos(30, 495).with_size(370, 20);
    info_frame.set_label("Service and location changes apply on next start.");
    info_frame.set_label_size(11);
    info_frame.set_label_color(Color::from_rgb(100, 100, 100));
    info_frame.set_align(Align::Left | Align::Inside);

    let mut save_btn = Button::default().with_pos(210, 520).with_size(90, 30).with_label("Save");
    let mut cancel_btn = Button::default().with_pos(310, 520).with_size(90, 30).with_label("Cancel");

    dialog.end();
    dialog.show();

    let result = Rc::new(RefCell::new(None));
    let result_save = result.clone();
    let result_cancel = result.clone();

    let dialog_save = dialog.clone();
    let current = current_settings.clone();
    save_btn.set_callback(move |_| {
        let location_source = if loc_fixed.value() {
            let lat = fixed_lat.value().trim().parse::<f64>();
            let lon = fixed_lon.value().trim().parse::<f64>();
            match (lat, lon) {
                (Ok(latitude), Ok(longitude)) => LocationSource::Fixed { latitude, longitude },
                _ => {
                    dialog::message_default("Please enter a valid latitude and longitude");
                    return;
                }
            }
        } else {
            LocationSource::IpLookup {
                url: lookup_url.value().trim().to_string(),
            }
        };

        let new_settings = AppSettings {
            server_url: server_input.value().trim().to_string(),
            request_timeout_secs: parse_secs(&request_timeout, current.request_timeout_secs),
            location_source,
            location_timeout_secs: parse_secs(&location_timeout, current.location_timeout_secs),
            escape_behavior: if escape_confirm.value() {
                EscapeBehavior::Confirm
            } else {
                EscapeBehavior::Cancel
            },
            theme_mode: if theme_dark.value() {
                ThemeMode::Dark
            } else {
                ThemeMode::Light
            },
        };

        if let Err(e) = new_settings.validate() {
            dialog::message_default(&e.to_string());
            return;
        }

        *result_save.borrow_mut() = Some(new_settings);
        dialog_save.clone().hide();
    });

    let dialog_cancel = dialog.clone();
    cancel_btn.set_callback(move |_| {
        *result_cancel.borrow_mut() = None;
        dialog_cancel.clone().hide();
    });

    let result_close = result.clone();
    dialog.set_callback(move |w| {
        *result_close.borrow_mut() = None;
        w.hide();
    });

    super::run_dialog(&dialog);

    result.borrow().clone()
}
