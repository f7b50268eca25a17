use fltk::{
    app::Sender,
    enums::{Align, Color, Font, FrameType},
    frame::Frame,
    group::Flex,
    image::PngImage,
    menu::MenuBar,
    prelude::*,
    window::Window,
};

use super::dialogs::confirm_removal::RemovalDialog;
use super::dialogs::error_overlay::ErrorOverlay;
use super::place_list::PlaceListView;
use crate::app::domain::Message;

pub const BANNER_HEIGHT: i32 = 28;

const LOGO_PNG: &[u8] = include_bytes!("../../assets/globe.png");

/// The stylized globe logo, scaled to `size` x `size`.
pub fn globe_logo(size: i32) -> Option<PngImage> {
    match PngImage::from_data(LOGO_PNG) {
        Ok(mut logo) => {
            logo.scale(size, size, true, true);
            Some(logo)
        }
        Err(e) => {
            tracing::warn!("Failed to decode logo: {}", e);
            None
        }
    }
}

pub struct MainWidgets {
    pub wind: Window,
    pub flex: Flex,
    pub menu: MenuBar,
    pub header: Frame,
    pub tagline: Frame,
    pub notice_banner: Frame,
    pub selected_list: PlaceListView,
    pub available_list: PlaceListView,
    pub removal_dialog: RemovalDialog,
    pub error_overlay: ErrorOverlay,
}

pub fn build_main_window(sender: &Sender<Message>) -> MainWidgets {
    let mut wind = Window::new(100, 100, 720, 760, "PlacePicker");
    wind.set_xclass("PlacePicker");

    if let Some(icon) = globe_logo(32) {
        #[cfg(target_os = "linux")]
        wind.set_icon(Some(icon));
    }

    let mut flex = Flex::new(0, 0, 720, 760, None);
    flex.set_type(fltk::group::FlexType::Column);

    let menu = MenuBar::new(0, 0, 0, 30, "");
    flex.fixed(&menu, 30);

    let mut header = Frame::default().with_label("PlacePicker");
    header.set_label_size(30);
    header.set_label_font(Font::HelveticaBold);
    if let Some(logo) = globe_logo(44) {
        header.set_image(Some(logo));
        header.set_align(Align::Center | Align::ImageNextToText);
    }
    flex.fixed(&header, 50);

    let mut tagline = Frame::default().with_label(
        "Create your personal collection of places you would like to visit or you have visited.",
    );
    tagline.set_label_size(13);
    flex.fixed(&tagline, 24);

    // Location notice banner (initially hidden)
    let mut notice_banner = Frame::default().with_size(0, 0);
    notice_banner.set_frame(FrameType::FlatBox);
    notice_banner.set_color(Color::from_rgb(255, 250, 205));
    notice_banner.set_label_color(Color::Black);
    notice_banner.set_label_size(13);
    notice_banner.hide();
    flex.fixed(&notice_banner, 0);

    let selected_list = PlaceListView::new("I'd like to visit...", *sender, Message::StartRemovePlace);
    let available_list = PlaceListView::new("Available Places", *sender, Message::SelectPlace);

    flex.end();
    wind.resizable(&flex);
    wind.end();

    let removal_dialog = RemovalDialog::new(*sender);
    let error_overlay = ErrorOverlay::new(*sender);

    MainWidgets {
        wind,
        flex,
        menu,
        header,
        tagline,
        notice_banner,
        selected_list,
        available_list,
        removal_dialog,
        error_overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_logo_decodes() {
        let logo = globe_logo(32).expect("embedded logo should decode");
        assert_eq!(logo.w(), 32);
        assert_eq!(logo.h(), 32);
    }
}
