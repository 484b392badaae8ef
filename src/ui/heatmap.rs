use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::{pos2, vec2, Align2, FontId, Rect, ScrollArea, Sense, Ui};

use crate::color::ratio_color;
use crate::data::stats::{self, RatioCell};
use crate::state::AppState;

const LABEL_W: f32 = 110.0;
const HEADER_H: f32 = 20.0;
const CELL_H: f32 = 24.0;

// ---------------------------------------------------------------------------
// Housing cost ratio heatmap (city × year)
// ---------------------------------------------------------------------------

/// Mean housing cost ratio per city and year as a painted grid, pale for
/// the lowest cell in the current selection and dark for the highest.
pub fn show(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        super::no_data_hint(ui);
        return;
    }

    let cells = stats::ratio_cells(state.visible_rows());
    if cells.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No ratio data for this selection.");
        });
        return;
    }

    // Axis domains and the normalisation range.
    let mut cities: BTreeSet<&str> = BTreeSet::new();
    let mut years: BTreeSet<i64> = BTreeSet::new();
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for ((city, year), cell) in &cells {
        cities.insert(city.as_str());
        years.insert(*year);
        lo = lo.min(cell.mean_ratio);
        hi = hi.max(cell.mean_ratio);
    }
    let cities: Vec<&str> = cities.into_iter().collect();
    let years: Vec<i64> = years.into_iter().collect();
    let spread = hi - lo;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let cell_w = ((ui.available_width() - LABEL_W) / years.len() as f32).clamp(28.0, 120.0);
            let size = vec2(
                LABEL_W + cell_w * years.len() as f32,
                HEADER_H + CELL_H * cities.len() as f32,
            );
            let (response, painter) = ui.allocate_painter(size, Sense::hover());
            let origin = response.rect.min;
            let text_color = ui.visuals().text_color();

            // ---- Axis labels ----
            for (yi, year) in years.iter().enumerate() {
                painter.text(
                    pos2(
                        origin.x + LABEL_W + (yi as f32 + 0.5) * cell_w,
                        origin.y + HEADER_H * 0.5,
                    ),
                    Align2::CENTER_CENTER,
                    year.to_string(),
                    FontId::proportional(12.0),
                    text_color,
                );
            }
            for (ci, city) in cities.iter().enumerate() {
                painter.text(
                    pos2(
                        origin.x + LABEL_W - 6.0,
                        origin.y + HEADER_H + (ci as f32 + 0.5) * CELL_H,
                    ),
                    Align2::RIGHT_CENTER,
                    *city,
                    FontId::proportional(12.0),
                    text_color,
                );
            }

            // ---- Cells ----
            let city_row: BTreeMap<&str, usize> =
                cities.iter().enumerate().map(|(i, c)| (*c, i)).collect();
            let year_col: BTreeMap<i64, usize> =
                years.iter().enumerate().map(|(i, y)| (*y, i)).collect();

            let pointer = response.hover_pos();
            let mut hovered: Option<(&str, i64, &RatioCell)> = None;

            for ((city, year), cell) in &cells {
                let ci = city_row[city.as_str()];
                let yi = year_col[year];
                let rect = Rect::from_min_size(
                    pos2(
                        origin.x + LABEL_W + yi as f32 * cell_w,
                        origin.y + HEADER_H + ci as f32 * CELL_H,
                    ),
                    vec2(cell_w, CELL_H),
                );

                // A flat selection (one cell, or all cells equal) sits mid-ramp.
                let t = if spread.abs() < f64::EPSILON {
                    0.5
                } else {
                    ((cell.mean_ratio - lo) / spread) as f32
                };
                painter.rect_filled(rect.shrink(1.0), 2.0, ratio_color(t));

                if pointer.is_some_and(|p| rect.contains(p)) {
                    hovered = Some((city.as_str(), *year, cell));
                }
            }

            if let Some((city, year, cell)) = hovered {
                response.on_hover_ui(|ui: &mut Ui| {
                    ui.strong(format!("{city} – {year}"));
                    ui.label(format!("Mean cost ratio: {:.1} %", cell.mean_ratio));
                    ui.label(format!("Mean rent: {:.0} €/month", cell.mean_rent));
                    ui.label(format!("Mean income: {:.0} €/month", cell.mean_income));
                    ui.label(format!("{} observations", cell.rows));
                });
            }

            ui.add_space(6.0);
            ui.label(format!(
                "Mean cost ratio from {lo:.1} % (pale) to {hi:.1} % (dark)"
            ));
        });
}
