use fltk::{
    app::Sender,
    button::Button,
    enums::{Align, Font},
    frame::Frame,
    group::Flex,
    prelude::*,
    window::Window,
};

use crate::app::domain::{Message, Place};

/// The "are you sure?" dialog for removing a saved place.
///
/// Built once and shown/hidden by the coordinator. The buttons and the
/// window close gesture (Escape, title bar X) only send messages; the
/// coordinator decides what they mean.
pub struct RemovalDialog {
    window: Window,
    prompt: Frame,
}

impl RemovalDialog {
    pub fn new(sender: Sender<Message>) -> Self {
        let mut window = Window::default()
            .with_size(420, 170)
            .with_label("Remove Place");
        window.make_modal(true);

        let mut flex = Flex::new(15, 15, 390, 140, None);
        flex.set_type(fltk::group::FlexType::Column);
        flex.set_spacing(10);

        let mut heading = Frame::default().with_label("Are you sure?");
        heading.set_label_size(18);
        heading.set_label_font(Font::HelveticaBold);
        flex.fixed(&heading, 30);

        let mut prompt = Frame::default();
        prompt.set_label_size(14);
        prompt.set_align(Align::Center | Align::Inside | Align::Wrap);

        let mut button_row = Flex::default();
        button_row.set_type(fltk::group::FlexType::Row);
        button_row.set_spacing(10);
        Frame::default();
        let mut no_btn = Button::default().with_label("No");
        let mut yes_btn = Button::default().with_label("Yes");
        button_row.fixed(&no_btn, 90);
        button_row.fixed(&yes_btn, 90);
        button_row.end();
        flex.fixed(&button_row, 35);

        flex.end();
        window.end();

        no_btn.set_callback(move |_| sender.send(Message::CancelRemoval));
        yes_btn.set_callback(move |_| sender.send(Message::ConfirmRemoval));
        window.set_callback(move |_| sender.send(Message::RemovalDialogClosed));

        Self { window, prompt }
    }

    pub fn open(&mut self, place: &Place, parent: &Window) {
        self.prompt.set_label(&format!(
            "Do you really want to remove \"{}\" from your places?",
            place.title
        ));
        center_on(&mut self.window, parent);
        self.window.show();
    }

    pub fn close(&mut self) {
        self.window.hide();
    }

    pub fn is_shown(&self) -> bool {
        self.window.shown()
    }
}

pub(super) fn center_on(dialog: &mut Window, parent: &Window) {
    let x = parent.x() + (parent.w() - dialog.w()) / 2;
    let y = parent.y() + (parent.h() - dialog.h()) / 2;
    dialog.set_pos(x.max(0), y.max(0));
}
