use crate::core::config::MarkerGlyphSource;
use crate::core::locale;
use crate::data::catalog;
use crate::input::events::ScreenEvent;
use crate::screen::picker::EventPicker;
use crate::ui::{icons::IconCache, style::PanelStyle};
use egui::{Align2, RichText, Vec2};

const COLUMNS: usize = 4;
const CELL_SIZE: f32 = 72.0;

/// Category grid shown while the picker is open
pub fn show(
    ctx: &egui::Context,
    picker: &EventPicker,
    glyphs: MarkerGlyphSource,
    icons: &mut IconCache,
    style: &PanelStyle,
    events: &mut Vec<ScreenEvent>,
) {
    if !picker.is_open() {
        return;
    }
    let mut open = true;
    egui::Window::new(locale::visual_order(locale::PICKER_TITLE))
        .open(&mut open)
        .resizable(false)
        .collapsible(false)
        .anchor(Align2::CENTER_BOTTOM, [0.0, -24.0])
        .frame(egui::Frame::window(&ctx.style()).fill(style.background_color))
        .show(ctx, |ui| {
            egui::Grid::new("event_picker_grid")
                .spacing([8.0, 8.0])
                .show(ui, |ui| {
                    for (index, category) in catalog::all().iter().enumerate() {
                        let clicked = ui
                            .vertical_centered(|ui| {
                                ui.set_width(CELL_SIZE);
                                let texture = match glyphs {
                                    MarkerGlyphSource::ImageAsset => icons.texture(ctx, category),
                                    MarkerGlyphSource::TextGlyph => None,
                                };
                                let button = match texture {
                                    Some(texture) => ui.add(egui::ImageButton::new(
                                        egui::load::SizedTexture::new(texture.id(), Vec2::splat(36.0)),
                                    )),
                                    None => ui.button(RichText::new(category.glyph).size(28.0)),
                                };
                                ui.label(
                                    RichText::new(locale::visual_order(category.label))
                                        .color(style.text_color)
                                        .small(),
                                );
                                button.clicked()
                            })
                            .inner;
                        if clicked {
                            events.push(ScreenEvent::CategoryChosen(category));
                        }
                        if (index + 1) % COLUMNS == 0 {
                            ui.end_row();
                        }
                    }
                });
        });

    if !open {
        events.push(ScreenEvent::PickerDismissed);
    }
}

/// Banner telling the user to tap the map for an armed placement
pub fn show_tap_hint(ctx: &egui::Context, picker: &EventPicker, style: &PanelStyle) {
    let Some(category) = picker.armed() else {
        return;
    };
    egui::Area::new(egui::Id::new("tap_hint"))
        .anchor(Align2::CENTER_TOP, [0.0, 80.0])
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style())
                .fill(style.background_color)
                .show(ui, |ui| {
                    ui.label(
                        RichText::new(format!(
                            "{} {}",
                            category.glyph,
                            locale::visual_order(locale::PICKER_TAP_HINT)
                        ))
                        .color(style.text_color),
                    );
                });
        });
}
