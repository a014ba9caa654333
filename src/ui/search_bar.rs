use crate::bootstrap::layout::LayoutDirection;
use crate::core::locale;
use crate::input::events::ScreenEvent;
use crate::search::place_search::PlaceSearch;
use crate::ui::style::PanelStyle;
use egui::{Align, Key, Layout, RichText, Ui};

/// Search field with the menu button and the results dropdown
pub struct SearchBar<'a> {
    search: &'a PlaceSearch,
    style: &'a PanelStyle,
    direction: LayoutDirection,
}

impl<'a> SearchBar<'a> {
    pub fn new(search: &'a PlaceSearch, style: &'a PanelStyle, direction: LayoutDirection) -> Self {
        Self {
            search,
            style,
            direction,
        }
    }

    pub fn show(self, ui: &mut Ui, events: &mut Vec<ScreenEvent>) {
        egui::Frame::popup(ui.style())
            .fill(self.style.background_color)
            .show(ui, |ui| {
                ui.set_width(self.style.width);
                ui.with_layout(row_layout(self.direction), |ui| {
                    if ui.button(RichText::new("☰").size(20.0)).clicked() {
                        events.push(ScreenEvent::MenuToggled);
                    }
                    self.query_field(ui, events);
                    if self.search.is_loading() {
                        ui.spinner();
                    }
                });

                if self.search.shows_dropdown() {
                    ui.separator();
                    self.dropdown(ui, events);
                }
            });
    }

    fn query_field(&self, ui: &mut Ui, events: &mut Vec<ScreenEvent>) {
        let mut text = self.search.query().to_string();
        let response = ui.add(
            egui::TextEdit::singleline(&mut text)
                .hint_text(locale::visual_order(locale::SEARCH_PLACEHOLDER))
                .text_color(self.style.text_color)
                .desired_width(f32::INFINITY),
        );

        if response.changed() {
            events.push(ScreenEvent::QueryChanged(text));
        }
        if response.gained_focus() {
            events.push(ScreenEvent::SearchFocused);
        } else if response.has_focus() && !self.search.is_keyboard_visible() {
            response.surrender_focus();
        }
        if response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
            events.push(ScreenEvent::QuerySubmitted);
        }
    }

    fn dropdown(&self, ui: &mut Ui, events: &mut Vec<ScreenEvent>) {
        if self.search.shows_empty_state() {
            ui.with_layout(row_layout(self.direction), |ui| {
                ui.label(
                    RichText::new(locale::visual_order(locale::SEARCH_NO_RESULTS))
                        .color(self.style.muted_text_color),
                );
            });
            return;
        }

        egui::ScrollArea::vertical()
            .max_height(self.style.max_dropdown_height)
            .show(ui, |ui| {
                for (index, result) in self.search.results().iter().enumerate() {
                    ui.with_layout(row_layout(self.direction), |ui| {
                        let label = RichText::new(locale::visual_order(&result.place_name))
                            .color(self.style.text_color);
                        if ui.selectable_label(false, label).clicked() {
                            events.push(ScreenEvent::ResultSelected(index));
                        }
                    });
                }
            });
    }
}

/// Horizontal row that starts from the reading edge
pub(crate) fn row_layout(direction: LayoutDirection) -> Layout {
    if direction.is_rtl() {
        Layout::right_to_left(Align::Center)
    } else {
        Layout::left_to_right(Align::Center)
    }
}
