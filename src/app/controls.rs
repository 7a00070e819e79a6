//! Endpoint row, command buttons and status label

use eframe::egui;
use crate::core::{Command, DEFAULT_BINARY_LEN, DEFAULT_TEXT};
use crate::theme::{colors, status_color};
use super::ProbeApp;

impl ProbeApp {
    pub(crate) fn render_controls(&mut self, ui: &mut egui::Ui) {
        // Connection row
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Endpoint").color(colors::TEXT_MUTED));
            ui.add(
                egui::TextEdit::singleline(&mut self.endpoint)
                    .desired_width(320.0)
                    .font(egui::TextStyle::Monospace),
            );
            if ui.button("Connect").clicked() {
                self.connect();
            }
            if ui.button("Disconnect").clicked() {
                self.disconnect();
            }
            if ui.button("Clear").clicked() {
                self.clear_log();
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let status = self.console.status();
                ui.colored_label(status_color(status), egui::RichText::new(status.as_str()).monospace());
                ui.label(egui::RichText::new("Status:").color(colors::TEXT_MUTED));
            });
        });

        ui.add_space(4.0);

        // Command row
        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.text_input)
                    .hint_text(DEFAULT_TEXT)
                    .desired_width(240.0),
            );
            if ui.button("Send text").clicked() {
                self.dispatch(&Command::send_text(&self.text_input));
            }
            if ui.button("Send long").clicked() {
                self.dispatch(&Command::SendLong);
            }
            if ui.button(format!("Send {DEFAULT_BINARY_LEN}B binary")).clicked() {
                self.dispatch(&Command::SendBinary(DEFAULT_BINARY_LEN));
            }
            if ui.button("Ping").clicked() {
                self.dispatch(&Command::Ping);
            }
        });
    }
}
