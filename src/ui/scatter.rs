use std::collections::BTreeMap;

use eframe::egui::Ui;
use egui_plot::{Legend, Plot, Points};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Income vs rent scatter (default view)
// ---------------------------------------------------------------------------

/// One point per visible observation, coloured and grouped by city.
pub fn show(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        super::no_data_hint(ui);
        return;
    }

    // Group points per city so each city gets one legend entry.
    let mut by_city: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for row in state.visible_rows() {
        by_city
            .entry(row.city.as_str())
            .or_default()
            .push([row.income, row.rent]);
    }

    Plot::new("scatter_plot")
        .legend(Legend::default())
        .x_axis_label("Income (€/month)")
        .y_axis_label("Rent (€/month)")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (city, points) in by_city {
                let markers = Points::new(points)
                    .name(city)
                    .color(state.city_colors.color_for(city))
                    .radius(3.0)
                    .filled(true);
                plot_ui.points(markers);
            }
        });
}
