use std::cell::RefCell;
use std::rc::Rc;

use fltk::{
    app::Sender,
    browser::SelectBrowser,
    enums::{Align, Color, Font, FrameType},
    frame::Frame,
    group::Flex,
    prelude::*,
};

use super::theme::ERROR_TEXT_COLOR;
use crate::app::domain::{ListView, Message, Place, PlaceId};

const TITLE_HEIGHT: i32 = 32;
const STATUS_HEIGHT: i32 = 60;

/// A titled, scrollable list of places. Clicking a row sends the message
/// built by `on_click` for that place.
pub struct PlaceListView {
    pub group: Flex,
    title: Frame,
    status: Frame,
    browser: SelectBrowser,
    ids: Rc<RefCell<Vec<PlaceId>>>,
    status_is_error: bool,
}

impl PlaceListView {
    pub fn new(title: &str, sender: Sender<Message>, on_click: fn(PlaceId) -> Message) -> Self {
        let mut group = Flex::default();
        group.set_type(fltk::group::FlexType::Column);

        let mut title_frame = Frame::default().with_label(title);
        title_frame.set_label_size(18);
        title_frame.set_label_font(Font::HelveticaBold);
        title_frame.set_align(Align::Left | Align::Inside);
        group.fixed(&title_frame, TITLE_HEIGHT);

        let mut status = Frame::default();
        status.set_label_size(14);
        status.set_align(Align::Center | Align::Inside | Align::Wrap);
        status.set_frame(FrameType::FlatBox);
        group.fixed(&status, STATUS_HEIGHT);

        let mut browser = SelectBrowser::default();
        browser.set_text_size(14);
        browser.hide();

        group.end();

        let ids: Rc<RefCell<Vec<PlaceId>>> = Rc::new(RefCell::new(Vec::new()));
        let ids_click = ids.clone();
        browser.set_callback(move |b| {
            let line = b.value();
            if line < 1 {
                return;
            }
            if let Some(id) = ids_click.borrow().get((line - 1) as usize) {
                sender.send(on_click(id.clone()));
            }
        });

        Self {
            group,
            title: title_frame,
            status,
            browser,
            ids,
            status_is_error: false,
        }
    }

    /// Show `view`. `describe` turns a place into its row text.
    pub fn render<F>(&mut self, view: &ListView, describe: F)
    where
        F: Fn(&Place) -> String,
    {
        match view {
            ListView::Loading(text) | ListView::Empty(text) => {
                self.show_status(text, false);
            }
            ListView::Error(error) => {
                self.show_status(&format!("{}\n{}", error.title, error.message), true);
            }
            ListView::Places(places) => {
                self.browser.clear();
                let mut ids = self.ids.borrow_mut();
                ids.clear();
                for place in places {
                    // "@." stops FLTK from reading '@' in titles as format codes
                    self.browser.add(&format!("@.{}", describe(place)));
                    ids.push(place.id.clone());
                }
                drop(ids);

                self.status.hide();
                self.group.fixed(&self.status, 0);
                self.browser.show();
            }
        }
        self.group.redraw();
    }

    fn show_status(&mut self, text: &str, is_error: bool) {
        self.browser.hide();
        self.browser.clear();
        self.ids.borrow_mut().clear();

        self.status_is_error = is_error;
        self.status.set_label(text);
        self.status
            .set_label_color(status_color(is_error, self.title.label_color()));
        self.status.show();
        self.group.fixed(&self.status, STATUS_HEIGHT);
    }

    pub fn apply_theme(&mut self, is_dark: bool) {
        let (bg, fg, list_bg, selection) = if is_dark {
            (
                Color::from_rgb(25, 25, 25),
                Color::from_rgb(220, 220, 220),
                Color::from_rgb(35, 35, 35),
                Color::from_rgb(70, 70, 100),
            )
        } else {
            (
                Color::from_rgb(240, 240, 240),
                Color::Black,
                Color::White,
                Color::from_rgb(173, 216, 230),
            )
        };

        self.title.set_label_color(fg);
        self.status.set_color(bg);
        self.status
            .set_label_color(status_color(self.status_is_error, fg));
        self.browser.set_color(list_bg);
        self.browser.set_text_color(fg);
        self.browser.set_selection_color(selection);
        self.group.redraw();
    }
}

fn status_color(is_error: bool, fg: Color) -> Color {
    if is_error { ERROR_TEXT_COLOR } else { fg }
}

/// Row text for a place, with its distance when known.
pub fn describe_place(place: &Place, distance_km: Option<f64>) -> String {
    let mut text = place.title.clone();
    if !place.description().is_empty() {
        text.push_str(" - ");
        text.push_str(place.description());
    }
    match distance_km {
        Some(d) if d < 10.0 => text.push_str(&format!("  ({:.1} km)", d)),
        Some(d) => text.push_str(&format!("  ({:.0} km)", d)),
        None => {}
    }
    text
}
