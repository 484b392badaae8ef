use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::color::generate_palette;
use crate::data::stats;
use crate::state::AppState;

/// How many cities the rent ranking shows.
const RANKING_LEN: usize = 10;

// ---------------------------------------------------------------------------
// Mean rent ranking (horizontal bars)
// ---------------------------------------------------------------------------

/// The most expensive cities by mean rent, most expensive on top.
pub fn rent_ranking(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        super::no_data_hint(ui);
        return;
    }

    let ranking = stats::mean_rent_ranking(state.visible_rows(), RANKING_LEN);
    if ranking.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No rows match the current selection.");
        });
        return;
    }

    // Rank 0 gets the highest y so it lands at the top of the chart.
    let n = ranking.len();
    let mut labels = vec![String::new(); n];
    let mut bars = Vec::with_capacity(n);
    for (i, (city, rent)) in ranking.iter().enumerate() {
        let y = (n - 1 - i) as f64;
        labels[n - 1 - i] = city.clone();
        bars.push(
            Bar::new(y, *rent)
                .name(city)
                .fill(state.city_colors.color_for(city))
                .width(0.6),
        );
    }
    let chart = BarChart::new(bars).horizontal();

    Plot::new("rent_ranking")
        .x_axis_label("Mean rent (€/month)")
        .y_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() < 0.01 && idx >= 0.0 && (idx as usize) < labels.len() {
                labels[idx as usize].clone()
            } else {
                String::new()
            }
        })
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
}

// ---------------------------------------------------------------------------
// Mean dwelling size by property type and age group (grouped bars)
// ---------------------------------------------------------------------------

/// Grouped bars: one cluster per property type, one colour per age group.
pub fn size_profile(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        super::no_data_hint(ui);
        return;
    }

    let sizes = stats::mean_size_by_type_age(state.visible_rows());
    if sizes.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No dwelling size data in this selection.");
        });
        return;
    }

    let mut types: BTreeSet<&str> = BTreeSet::new();
    let mut ages: BTreeSet<&str> = BTreeSet::new();
    for (ptype, age) in sizes.keys() {
        types.insert(ptype.as_str());
        ages.insert(age.as_str());
    }
    let types: Vec<&str> = types.into_iter().collect();
    let ages: Vec<&str> = ages.into_iter().collect();

    let type_pos: BTreeMap<&str, usize> =
        types.iter().enumerate().map(|(i, t)| (*t, i)).collect();
    let bar_w = 0.8 / ages.len() as f64;
    let palette = generate_palette(ages.len());

    // One chart per age group so the legend lists age groups.
    let mut charts = Vec::with_capacity(ages.len());
    for (ai, age) in ages.iter().enumerate() {
        let offset = (ai as f64 - (ages.len() as f64 - 1.0) / 2.0) * bar_w;
        let mut group = Vec::new();
        for ((ptype, bar_age), mean) in &sizes {
            if bar_age.as_str() != *age {
                continue;
            }
            let x = type_pos[ptype.as_str()] as f64 + offset;
            group.push(Bar::new(x, *mean).width(bar_w * 0.9));
        }
        charts.push(BarChart::new(group).name(*age).color(palette[ai]));
    }

    let type_labels: Vec<String> = types.iter().map(|t| t.to_string()).collect();

    Plot::new("size_profile")
        .legend(Legend::default())
        .y_axis_label("Mean dwelling size (m²)")
        .x_axis_formatter(move |mark, _range| {
            // Property type clusters sit at integer x positions.
            let idx = mark.value.round();
            if (mark.value - idx).abs() < 0.01 && idx >= 0.0 && (idx as usize) < type_labels.len() {
                type_labels[idx as usize].clone()
            } else {
                String::new()
            }
        })
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}
