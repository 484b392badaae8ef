use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Raw observation table
// ---------------------------------------------------------------------------

/// Every visible row with its derived cost ratio. Rows that carry no ratio
/// (zero reported income) show `n/a` in the ratio column.
pub fn show(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        super::no_data_hint(ui);
        return;
    };
    let visible = &state.visible_indices;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(50.0))
        .column(Column::auto().at_least(80.0))
        .column(Column::auto().at_least(90.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(100.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in [
                "City",
                "Year",
                "Age group",
                "Property type",
                "Income (€/month)",
                "Rent (€/month)",
                "Cost ratio",
            ] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, visible.len(), |mut row| {
                let r = &dataset.rows[visible[row.index()]];
                row.col(|ui| {
                    ui.label(r.city.as_str());
                });
                row.col(|ui| {
                    ui.label(r.year.to_string());
                });
                row.col(|ui| {
                    ui.label(r.age_group.as_str());
                });
                row.col(|ui| {
                    ui.label(r.property_type.as_str());
                });
                row.col(|ui| {
                    ui.label(format!("{:.0}", r.income));
                });
                row.col(|ui| {
                    ui.label(format!("{:.0}", r.rent));
                });
                row.col(|ui| match r.housing_cost_ratio() {
                    Some(ratio) => {
                        ui.label(format!("{ratio:.1} %"));
                    }
                    None => {
                        ui.label("n/a");
                    }
                });
            });
        });
}
