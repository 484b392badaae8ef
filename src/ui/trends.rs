use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, Points};

use crate::data::stats;
use crate::state::{AppState, MAX_TREND_CITIES};

// ---------------------------------------------------------------------------
// Cost ratio over time for the picked cities
// ---------------------------------------------------------------------------

/// One line per picked city through its yearly mean cost ratio.
pub fn show(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        super::no_data_hint(ui);
        return;
    }
    if state.trend_cities.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading(format!(
                "Pick up to {MAX_TREND_CITIES} cities in the left panel."
            ));
        });
        return;
    }

    let cells = stats::ratio_cells(state.visible_rows());

    Plot::new("trends_plot")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Housing cost ratio (%)")
        .x_axis_formatter(|mark, _range| {
            // Years are integers; hide fractional grid marks.
            if mark.value.fract() == 0.0 {
                format!("{:.0}", mark.value)
            } else {
                String::new()
            }
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for city in &state.trend_cities {
                // Keys are ordered by (city, year), so the series comes out
                // year-ascending without a sort.
                let series: Vec<[f64; 2]> = cells
                    .iter()
                    .filter(|((c, _), _)| c == city)
                    .map(|((_, year), cell)| [*year as f64, cell.mean_ratio])
                    .collect();
                if series.is_empty() {
                    continue;
                }

                let color = state.city_colors.color_for(city);
                plot_ui.line(Line::new(series.clone()).name(city).color(color).width(2.0));
                plot_ui.points(
                    Points::new(series)
                        .name(city)
                        .color(color)
                        .radius(3.0)
                        .filled(true),
                );
            }
        });
}
