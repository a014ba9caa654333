pub mod dialogs;
pub mod event_picker;
pub mod icons;
pub mod map_view;
pub mod search_bar;
pub mod side_menu;
pub mod style;
pub mod widget;

pub use icons::IconCache;
pub use map_view::MapCanvas;
pub use style::{
    install_fonts, ButtonStyle, MarkerStyle, PanelStyle, PuckStyle, ScreenStyle, ScreenThemes,
    StyleExt,
};
pub use widget::MapScreenView;

use crate::screen::MapScreen;

pub trait UiMapExt {
    /// Draws `screen` through `view` into the remaining space
    fn map_screen(&mut self, view: &mut MapScreenView, screen: &mut MapScreen) -> egui::Response;
}

impl UiMapExt for egui::Ui {
    fn map_screen(&mut self, view: &mut MapScreenView, screen: &mut MapScreen) -> egui::Response {
        view.show(self, screen)
    }
}
