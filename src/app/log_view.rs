//! Scrolling log pane, pinned to the newest line

use eframe::egui;
use crate::theme::colors;
use super::ProbeApp;

impl ProbeApp {
    pub(crate) fn render_log(&self, ui: &mut egui::Ui) {
        egui::Frame::new()
            .fill(colors::BG_ELEVATED)
            .stroke(egui::Stroke::new(1.0, colors::BORDER))
            .inner_margin(6.0)
            .show(ui, |ui| {
                egui::ScrollArea::vertical()
                    .stick_to_bottom(true)
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        ui.label(
                            egui::RichText::new(self.console.log().text())
                                .monospace()
                                .color(colors::TEXT_SECONDARY),
                        );
                    });
            });
    }
}
