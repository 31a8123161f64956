//! Chat panel — the widget card: message list, input row, close button.

use egui::{self, Align, Layout, RichText, ScrollArea, Vec2};

use screening_types::turn::{ChatTurn, Sender};

use crate::state::UiState;
use crate::theme::*;

/// What the user did in the chat panel this frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatAction {
    /// Non-empty input was submitted.
    Submitted(String),
    /// The close button was clicked; the session should be discarded.
    Closed,
}

/// Render the chat widget card.
pub fn chat_panel(
    ui: &mut egui::Ui,
    state: &mut UiState,
    turns: &[ChatTurn],
    finished: bool,
) -> Option<ChatAction> {
    let mut action = None;

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                // Header
                ui.horizontal(|ui| {
                    ui.heading(RichText::new("Chat support").color(TEXT_PRIMARY).strong());
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.button(RichText::new("✕").color(TEXT_SECONDARY)).clicked() {
                            action = Some(ChatAction::Closed);
                        }
                        let status_color = if state.connection_lost { WARNING } else { TEXT_SECONDARY };
                        ui.label(RichText::new(&state.status_text).color(status_color).small());
                    });
                });

                ui.separator();

                // Messages area
                let available_height = ui.available_height() - 48.0;
                ScrollArea::vertical()
                    .max_height(available_height)
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for turn in turns {
                            render_turn(ui, turn);
                            ui.add_space(4.0);
                        }
                        if state.scroll_to_newest {
                            ui.scroll_to_cursor(Some(Align::BOTTOM));
                            state.scroll_to_newest = false;
                        }
                    });

                ui.add_space(8.0);

                // Input row, replaced by a notice once the server finished
                // the conversation.
                if finished {
                    ui.vertical_centered(|ui| {
                        ui.label(
                            RichText::new("The conversation has finished.")
                                .color(TEXT_SECONDARY)
                                .small(),
                        );
                    });
                } else {
                    ui.horizontal(|ui| {
                        let input = egui::TextEdit::singleline(&mut state.input_text)
                            .hint_text("Type a message...")
                            .desired_width(ui.available_width() - 70.0)
                            .font(egui::FontId::proportional(14.0));

                        let response = ui.add(input);

                        let send_enabled = !state.input_text.trim().is_empty();
                        let send_btn = ui.add_enabled(
                            send_enabled,
                            egui::Button::new(RichText::new("Send").color(TEXT_PRIMARY))
                                .fill(if send_enabled { ACCENT } else { BG_SURFACE })
                                .corner_radius(PANEL_ROUNDING)
                                .min_size(Vec2::new(60.0, 0.0)),
                        );

                        // Submit on Enter or button click
                        if (response.lost_focus()
                            && ui.input(|i| i.key_pressed(egui::Key::Enter))
                            && !state.input_text.trim().is_empty())
                            || send_btn.clicked()
                        {
                            let text = state.input_text.trim().to_string();
                            action = Some(ChatAction::Submitted(text));
                            state.input_text.clear();
                            response.request_focus();
                        }
                    });
                }
            });
        });

    action
}

fn render_turn(ui: &mut egui::Ui, turn: &ChatTurn) {
    let is_user = turn.sender == Sender::User;
    let (bubble, align) = if is_user {
        (USER_BUBBLE, Align::Max)
    } else {
        (BOT_BUBBLE, Align::Min)
    };

    ui.with_layout(Layout::top_down(align), |ui| {
        ui.set_max_width(ui.available_width() * 0.8);
        egui::Frame::default()
            .fill(bubble)
            .corner_radius(PANEL_ROUNDING)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.label(RichText::new(&turn.text).color(TEXT_PRIMARY));
            });
    });
}
