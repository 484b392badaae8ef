use std::time::Duration;

use eframe::egui;

use crate::state::{AppState, View};
use crate::ui::{bars, heatmap, panels, scatter, table, trends};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RentscopeApp {
    pub state: AppState,
}

impl Default for RentscopeApp {
    fn default() -> Self {
        let mut state = AppState::default();
        // Start fetching the survey immediately so the first view fills in
        // without user action.
        state.begin_remote_load();
        Self { state }
    }
}

impl eframe::App for RentscopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll_remote_load();
        if self.state.loading {
            // Keep repainting while the download runs so its result is
            // picked up without waiting for user input.
            ctx.request_repaint_after(Duration::from_millis(150));
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: view tabs + active view ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui: &mut egui::Ui| {
                for view in View::ALL {
                    if ui
                        .selectable_label(self.state.view == view, view.label())
                        .clicked()
                    {
                        self.state.view = view;
                    }
                }
            });
            ui.separator();

            match self.state.view {
                View::Scatter => scatter::show(ui, &self.state),
                View::Heatmap => heatmap::show(ui, &self.state),
                View::Trends => trends::show(ui, &self.state),
                View::Rents => bars::rent_ranking(ui, &self.state),
                View::Sizes => bars::size_profile(ui, &self.state),
                View::Table => table::show(ui, &self.state),
            }
        });
    }
}
