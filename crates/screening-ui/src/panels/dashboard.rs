//! Employer dashboard — search field, score-bucket selector, and a card
//! grid of the filtered candidate analyses.

use chrono::DateTime;
use egui::{self, Align, Layout, ProgressBar, RichText, ScrollArea};

use screening_core::dashboard::DashboardQuery;
use screening_types::analysis::AnalysisRecord;

use crate::state::UiState;
use crate::theme::*;

const GRID_COLUMNS: usize = 3;

/// Render the dashboard panel over the fetched (read-only) analysis list.
pub fn dashboard_panel(ui: &mut egui::Ui, state: &mut UiState, records: &[AnalysisRecord]) {
    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.heading(RichText::new("Candidates").color(TEXT_PRIMARY).strong());
            ui.label(
                RichText::new("Vacancy match analysis")
                    .color(TEXT_SECONDARY)
                    .small(),
            );
        });

        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            egui::ComboBox::from_id_salt("score_filter")
                .selected_text(state.score_filter.label())
                .show_ui(ui, |ui| {
                    for bucket in screening_types::analysis::ScoreBucket::all() {
                        ui.selectable_value(&mut state.score_filter, *bucket, bucket.label());
                    }
                });

            ui.add(
                egui::TextEdit::singleline(&mut state.search_term)
                    .hint_text("Search candidates...")
                    .desired_width(220.0),
            );
        });
    });

    ui.separator();

    let query = DashboardQuery {
        search_term: state.search_term.clone(),
        bucket: state.score_filter,
    };
    let filtered = query.filter(records);

    if filtered.is_empty() {
        ui.vertical_centered(|ui| {
            ui.add_space(24.0);
            ui.label(RichText::new("No matching candidates").color(TEXT_SECONDARY));
        });
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for row in filtered.chunks(GRID_COLUMNS) {
                ui.columns(GRID_COLUMNS, |columns| {
                    for (record, column) in row.iter().zip(columns.iter_mut()) {
                        render_card(column, record);
                    }
                });
                ui.add_space(8.0);
            }
        });
}

fn render_card(ui: &mut egui::Ui, record: &AnalysisRecord) {
    egui::Frame::default()
        .fill(BG_SECONDARY)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(12.0)
        .show(ui, |ui| {
            let color = score_color(record.final_score);

            ui.horizontal(|ui| {
                // Avatar stand-in: last two characters of the candidate id.
                let initials: String = record
                    .candidate_id
                    .chars()
                    .rev()
                    .take(2)
                    .collect::<Vec<_>>()
                    .into_iter()
                    .rev()
                    .collect();
                ui.label(
                    RichText::new(initials)
                        .color(TEXT_PRIMARY)
                        .strong()
                        .background_color(BG_SURFACE),
                );
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    ui.label(
                        RichText::new(format!("{}%", record.final_score))
                            .color(color)
                            .strong(),
                    );
                });
            });

            ui.add(
                ProgressBar::new(f32::from(record.final_score) / 100.0)
                    .fill(color)
                    .desired_height(8.0),
            );
            ui.add_space(6.0);

            ui.label(RichText::new(&record.summary).color(TEXT_SECONDARY).small());

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(format!("{} messages", record.conversation.len()))
                        .color(TEXT_SECONDARY)
                        .small(),
                );
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    ui.label(
                        RichText::new(format_date(&record.created_at))
                            .color(TEXT_SECONDARY)
                            .small(),
                    );
                });
            });
        });
}

/// Display the creation date; fall back to the raw string when it is not
/// RFC 3339.
fn format_date(created_at: &str) -> String {
    match DateTime::parse_from_rfc3339(created_at) {
        Ok(ts) => ts.format("%Y-%m-%d").to_string(),
        Err(_) => created_at.to_string(),
    }
}
