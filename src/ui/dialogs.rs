//! Modal alert and confirmation windows.

use crate::core::locale;
use crate::input::events::ScreenEvent;
use crate::screen::{Alert, Confirmation};
use egui::{Align2, RichText};

fn dialog(title: &str) -> egui::Window<'static> {
    egui::Window::new(locale::visual_order(title))
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
}

pub fn show_alert(ctx: &egui::Context, alert: &Alert, events: &mut Vec<ScreenEvent>) {
    dialog(&alert.title).show(ctx, |ui| {
        ui.label(RichText::new(locale::visual_order(&alert.message)).size(15.0));
        ui.add_space(8.0);
        if ui.button(locale::visual_order(locale::OK)).clicked() {
            events.push(ScreenEvent::AlertDismissed);
        }
    });
}

pub fn show_confirmation(
    ctx: &egui::Context,
    confirmation: &Confirmation,
    events: &mut Vec<ScreenEvent>,
) {
    let (title, message) = match confirmation {
        Confirmation::RemoveMarker(_) => (locale::CONFIRM_REMOVE_TITLE, locale::CONFIRM_REMOVE_MESSAGE),
    };

    dialog(title).show(ctx, |ui| {
        ui.label(RichText::new(locale::visual_order(message)).size(15.0));
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.button(locale::visual_order(locale::CANCEL)).clicked() {
                events.push(ScreenEvent::ConfirmationResolved(false));
            }
            if ui.button(locale::visual_order(locale::CONFIRM_YES)).clicked() {
                events.push(ScreenEvent::ConfirmationResolved(true));
            }
        });
    });
}
