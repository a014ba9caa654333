use crate::bootstrap::layout::LayoutDirection;
use crate::core::locale;
use crate::input::events::ScreenEvent;
use crate::screen::menu::MenuItem;
use crate::ui::{search_bar::row_layout, style::PanelStyle};
use egui::{Align2, RichText};

const MENU_WIDTH: f32 = 240.0;

/// Drawer anchored to the reading edge; emits a selection or a toggle
pub fn show(
    ctx: &egui::Context,
    style: &PanelStyle,
    direction: LayoutDirection,
    events: &mut Vec<ScreenEvent>,
) {
    let anchor = if direction.is_rtl() {
        Align2::RIGHT_TOP
    } else {
        Align2::LEFT_TOP
    };

    egui::Window::new("side_menu")
        .title_bar(false)
        .resizable(false)
        .collapsible(false)
        .anchor(anchor, [0.0, 0.0])
        .default_width(MENU_WIDTH)
        .frame(egui::Frame::window(&ctx.style()).fill(style.background_color))
        .show(ctx, |ui| {
            ui.with_layout(row_layout(direction), |ui| {
                if ui.button("✕").clicked() {
                    events.push(ScreenEvent::MenuToggled);
                }
            });
            ui.separator();

            for item in MenuItem::ALL {
                ui.with_layout(row_layout(direction), |ui| {
                    let text = RichText::new(locale::visual_order(item.label()))
                        .color(style.text_color)
                        .size(16.0);
                    if ui.selectable_label(false, text).clicked() {
                        log::debug!("Menu item {} selected", item.action_name());
                        events.push(ScreenEvent::MenuItemSelected(item));
                    }
                });
            }
        });
}
