use eframe::egui::{self, Checkbox, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::Selection;
use crate::data::loader;
use crate::state::{AppState, View, MAX_TREND_CITIES};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    // Clone the option lists so we can mutate state inside the closures.
    let years: Vec<i64> = dataset.years.iter().copied().collect();
    let age_groups: Vec<String> = dataset.age_groups.iter().cloned().collect();
    let cities: Vec<String> = dataset.cities.iter().cloned().collect();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Year ----
            ui.strong("Year");
            let year_text = match state.selections.year {
                Selection::All => "All years".to_string(),
                Selection::Only(y) => y.to_string(),
            };
            egui::ComboBox::from_id_salt("year_filter")
                .selected_text(year_text)
                .show_ui(ui, |ui: &mut Ui| {
                    let is_all = state.selections.year == Selection::All;
                    if ui.selectable_label(is_all, "All years").clicked() {
                        state.set_year(Selection::All);
                    }
                    for &year in &years {
                        let is_current = state.selections.year == Selection::Only(year);
                        if ui.selectable_label(is_current, year.to_string()).clicked() {
                            state.set_year(Selection::Only(year));
                        }
                    }
                });
            ui.add_space(8.0);

            // ---- Age group ----
            ui.strong("Age group");
            let age_text = match &state.selections.age_group {
                Selection::All => "All age groups".to_string(),
                Selection::Only(a) => a.clone(),
            };
            egui::ComboBox::from_id_salt("age_filter")
                .selected_text(age_text)
                .show_ui(ui, |ui: &mut Ui| {
                    let is_all = state.selections.age_group == Selection::All;
                    if ui.selectable_label(is_all, "All age groups").clicked() {
                        state.set_age_group(Selection::All);
                    }
                    for age in &age_groups {
                        let is_current =
                            matches!(&state.selections.age_group, Selection::Only(a) if a == age);
                        if ui.selectable_label(is_current, age).clicked() {
                            state.set_age_group(Selection::Only(age.clone()));
                        }
                    }
                });

            // ---- Trend cities (only meaningful in the trends view) ----
            if state.view == View::Trends {
                ui.add_space(8.0);
                ui.separator();
                ui.strong(format!(
                    "Cities ({}/{MAX_TREND_CITIES})",
                    state.trend_cities.len()
                ));
                let at_cap = state.trend_cities.len() >= MAX_TREND_CITIES;
                for city in &cities {
                    let mut checked = state.trend_cities.contains(city);
                    let text = RichText::new(city).color(state.city_colors.color_for(city));

                    // Unchecked boxes grey out once the cap is reached.
                    if ui
                        .add_enabled(checked || !at_cap, Checkbox::new(&mut checked, text))
                        .changed()
                    {
                        state.toggle_trend_city(city);
                    }
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open CSV…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload remote data").clicked() {
                state.begin_remote_load();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} observations loaded, {} visible",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if state.loading {
            ui.separator();
            ui.spinner();
            ui.label("Downloading survey data…");
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open housing survey data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match loader::load_file(&path).map_err(anyhow::Error::new) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} observations across {} cities from {}",
                    dataset.len(),
                    dataset.cities.len(),
                    path.display()
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                // A running download keeps its spinner; only the status changes.
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
