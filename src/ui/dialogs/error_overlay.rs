use fltk::{
    app::Sender,
    button::Button,
    enums::{Align, Font},
    frame::Frame,
    group::Flex,
    prelude::*,
    window::Window,
};

use super::confirm_removal::center_on;
use crate::ui::theme::ERROR_TEXT_COLOR;
use crate::app::domain::{ErrorState, Message};

/// Modal overlay reporting a failed change to the saved places.
pub struct ErrorOverlay {
    window: Window,
    title: Frame,
    message: Frame,
}

impl ErrorOverlay {
    pub fn new(sender: Sender<Message>) -> Self {
        let mut window = Window::default().with_size(420, 180).with_label("Error");
        window.make_modal(true);

        let mut flex = Flex::new(15, 15, 390, 150, None);
        flex.set_type(fltk::group::FlexType::Column);
        flex.set_spacing(10);

        let mut title = Frame::default();
        title.set_label_size(18);
        title.set_label_font(Font::HelveticaBold);
        title.set_label_color(ERROR_TEXT_COLOR);
        flex.fixed(&title, 30);

        let mut message = Frame::default();
        message.set_label_size(14);
        message.set_align(Align::Center | Align::Inside | Align::Wrap);

        let mut button_row = Flex::default();
        button_row.set_type(fltk::group::FlexType::Row);
        Frame::default();
        let mut okay_btn = Button::default().with_label("Okay");
        button_row.fixed(&okay_btn, 90);
        button_row.end();
        flex.fixed(&button_row, 35);

        flex.end();
        window.end();

        okay_btn.set_callback(move |_| sender.send(Message::DismissError));
        window.set_callback(move |_| sender.send(Message::DismissError));

        Self { window, title, message }
    }

    /// Show `error`, or hide the overlay when there is none.
    pub fn sync(&mut self, error: Option<&ErrorState>, parent: &Window) {
        match error {
            Some(error) => {
                self.title.set_label(&error.title);
                self.message.set_label(&error.message);
                if !self.window.shown() {
                    center_on(&mut self.window, parent);
                    self.window.show();
                }
                self.window.redraw();
            }
            None => self.window.hide(),
        }
    }
}
