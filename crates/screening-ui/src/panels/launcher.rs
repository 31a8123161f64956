//! Launcher — the floating toggle button shown while the widget is closed.

use egui::{self, CornerRadius, RichText, Vec2};

use crate::theme::*;

/// Render the open-widget button. Returns true when clicked.
pub fn launcher_button(ui: &mut egui::Ui) -> bool {
    ui.add(
        egui::Button::new(RichText::new("💬").size(22.0))
            .fill(ACCENT)
            .corner_radius(CornerRadius::same(28))
            .min_size(Vec2::new(56.0, 56.0)),
    )
    .clicked()
}
