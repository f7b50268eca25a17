use fltk::{enums::Color, frame::Frame, menu::MenuBar, prelude::*, window::Window};

use super::place_list::PlaceListView;

/// Text color for failures, shared by list status lines and the error overlay.
pub const ERROR_TEXT_COLOR: Color = Color::from_rgb(190, 40, 40);

pub struct ThemedWidgets<'a> {
    pub window: &'a mut Window,
    pub menu: &'a mut MenuBar,
    pub header: &'a mut Frame,
    pub tagline: &'a mut Frame,
    pub notice_banner: &'a mut Frame,
    pub lists: [&'a mut PlaceListView; 2],
}

pub fn apply_theme(widgets: ThemedWidgets, is_dark: bool) {
    let ThemedWidgets {
        window,
        menu,
        header,
        tagline,
        notice_banner,
        lists,
    } = widgets;

    if is_dark {
        window.set_color(Color::from_rgb(25, 25, 25));
        window.set_label_color(Color::from_rgb(220, 220, 220));
        menu.set_color(Color::from_rgb(35, 35, 35));
        menu.set_text_color(Color::from_rgb(220, 220, 220));
        menu.set_selection_color(Color::from_rgb(60, 60, 60)); // Hover color
        header.set_label_color(Color::from_rgb(240, 200, 90));
        tagline.set_label_color(Color::from_rgb(170, 170, 170));
        notice_banner.set_color(Color::from_rgb(139, 128, 0)); // Darker yellow/olive
        notice_banner.set_label_color(Color::White);
    } else {
        window.set_color(Color::from_rgb(240, 240, 240));
        window.set_label_color(Color::Black);
        menu.set_color(Color::from_rgb(240, 240, 240));
        menu.set_text_color(Color::Black);
        menu.set_selection_color(Color::from_rgb(200, 200, 200)); // Hover color
        header.set_label_color(Color::from_rgb(120, 80, 0));
        tagline.set_label_color(Color::from_rgb(100, 100, 100));
        notice_banner.set_color(Color::from_rgb(255, 250, 205)); // Lemon chiffon
        notice_banner.set_label_color(Color::Black);
    }

    for list in lists {
        list.apply_theme(is_dark);
    }

    window.redraw();
    menu.redraw();
}

/// Set Windows title bar theme (Windows 10 build 1809+)
/// Must be called AFTER window.show() to have a valid HWND
#[cfg(target_os = "windows")]
pub fn set_windows_titlebar_theme(window: &Window, is_dark: bool) {
    use std::mem::size_of;
    use std::ptr::from_ref;
    use windows::Win32::Foundation::HWND;
    use windows::Win32::Graphics::Dwm::{DWMWINDOWATTRIBUTE, DwmSetWindowAttribute};

    unsafe {
        let hwnd = HWND(window.raw_handle() as *mut std::ffi::c_void);
        let on: i32 = if is_dark { 1 } else { 0 };

        // DWMWA_USE_IMMERSIVE_DARK_MODE: 20 on Windows 11 / 10 2004+, 19 before that
        for attribute in [20, 19] {
            let _ = DwmSetWindowAttribute(
                hwnd,
                DWMWINDOWATTRIBUTE(attribute),
                from_ref(&on).cast(),
                size_of::<i32>() as u32,
            );
        }
    }
}
