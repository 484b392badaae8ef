/// UI layer: the panels around the central area and one module per view.

pub mod bars;
pub mod heatmap;
pub mod panels;
pub mod scatter;
pub mod table;
pub mod trends;

use eframe::egui::Ui;

/// Placeholder shown by every view until a dataset is available.
pub fn no_data_hint(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading("No housing data yet  (File → Reload remote data, or Open CSV…)");
    });
}
