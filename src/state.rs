use std::collections::BTreeSet;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use crate::color::CityColors;
use crate::data::filter::{filter_indices, Selection, Selections};
use crate::data::loader;
use crate::data::model::{HousingDataset, ObservationRow};

/// Upper bound on cities plotted at once in the trends view; more than
/// this and the chart becomes unreadable.
pub const MAX_TREND_CITIES: usize = 5;

/// Cities preselected for the trends view after a dataset arrives.
const DEFAULT_TREND_CITIES: usize = 3;

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// Which chart the central panel is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Scatter,
    Heatmap,
    Trends,
    Rents,
    Sizes,
    Table,
}

impl View {
    pub const ALL: [View; 6] = [
        View::Scatter,
        View::Heatmap,
        View::Trends,
        View::Rents,
        View::Sizes,
        View::Table,
    ];

    pub fn label(self) -> &'static str {
        match self {
            View::Scatter => "Income vs rent",
            View::Heatmap => "Cost ratio heatmap",
            View::Trends => "City trends",
            View::Rents => "Rent ranking",
            View::Sizes => "Dwelling sizes",
            View::Table => "Table",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until the download or a file open completes).
    pub dataset: Option<HousingDataset>,

    /// Current year / age group selections.
    pub selections: Selections,

    /// Indices of rows passing the current selections (cached).
    pub visible_indices: Vec<usize>,

    /// Active view in the central panel.
    pub view: View,

    /// Cities plotted in the trends view, at most [`MAX_TREND_CITIES`].
    pub trend_cities: BTreeSet<String>,

    /// Stable city → colour assignment shared by all views.
    pub city_colors: CityColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a dataset download is in progress.
    pub loading: bool,

    /// Delivers the outcome of the background download, if one is running.
    load_rx: Option<Receiver<Result<HousingDataset, String>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            selections: Selections::default(),
            visible_indices: Vec::new(),
            view: View::default(),
            trend_cities: BTreeSet::new(),
            city_colors: CityColors::default(),
            status_message: None,
            loading: false,
            load_rx: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset: reset the selections, show every row,
    /// rebuild the city colours and default trend picks, and drop any
    /// download still in flight.
    pub fn set_dataset(&mut self, dataset: HousingDataset) {
        self.selections = Selections::default();
        self.visible_indices = (0..dataset.len()).collect();
        self.city_colors = CityColors::new(&dataset.cities);
        self.trend_cities = dataset
            .cities
            .iter()
            .take(DEFAULT_TREND_CITIES)
            .cloned()
            .collect();

        self.dataset = Some(dataset);
        self.status_message = None;
        self.loading = false;
        // A late download result must not replace a dataset ingested here.
        self.load_rx = None;
    }

    /// Recompute `visible_indices` after a selection change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = filter_indices(ds, &self.selections);
        }
    }

    /// Year selection handler. Refilters immediately.
    pub fn set_year(&mut self, year: Selection<i64>) {
        self.selections.year = year;
        self.refilter();
    }

    /// Age group selection handler. Refilters immediately.
    pub fn set_age_group(&mut self, age_group: Selection<String>) {
        self.selections.age_group = age_group;
        self.refilter();
    }

    /// Toggle a city in the trends view. Adding past the cap is ignored.
    pub fn toggle_trend_city(&mut self, city: &str) {
        if self.trend_cities.contains(city) {
            self.trend_cities.remove(city);
        } else if self.trend_cities.len() < MAX_TREND_CITIES {
            self.trend_cities.insert(city.to_string());
        }
    }

    /// Rows passing the current selections, in dataset order.
    pub fn visible_rows(&self) -> impl Iterator<Item = &ObservationRow> {
        let rows: &[ObservationRow] = self
            .dataset
            .as_ref()
            .map_or(&[], |ds| ds.rows.as_slice());
        self.visible_indices.iter().map(move |&i| &rows[i])
    }

    /// Kick off the dataset download on a worker thread. Does nothing if a
    /// download is already running.
    pub fn begin_remote_load(&mut self) {
        if self.loading {
            return;
        }
        self.loading = true;
        self.status_message = None;

        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let result = loader::shared_dataset().cloned().map_err(|e| {
                let message = format!("{:#}", anyhow::Error::new(e));
                log::error!("dataset download failed: {message}");
                message
            });
            let _ = tx.send(result);
        });
        self.load_rx = Some(rx);
    }

    /// Check the download channel; apply the dataset or surface the error.
    pub fn poll_remote_load(&mut self) {
        let Some(rx) = &self.load_rx else {
            return;
        };
        match rx.try_recv() {
            Ok(Ok(dataset)) => {
                self.load_rx = None;
                self.set_dataset(dataset);
            }
            Ok(Err(message)) => {
                self.load_rx = None;
                self.loading = false;
                self.status_message = Some(message);
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.load_rx = None;
                self.loading = false;
                self.status_message = Some("download worker exited without a result".to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(city: &str, year: i64, age: &str) -> ObservationRow {
        ObservationRow {
            city: city.to_string(),
            year,
            age_group: age.to_string(),
            property_type: "Flat".to_string(),
            income: 1000.0,
            rent: 400.0,
            size_m2: None,
        }
    }

    fn dataset() -> HousingDataset {
        HousingDataset::from_rows(vec![
            row("Budapest", 2022, "18-25"),
            row("Budapest", 2023, "18-25"),
            row("Vienna", 2023, "26-35"),
        ])
    }

    #[test]
    fn ingesting_a_dataset_resets_selections_and_visibility() {
        let mut state = AppState::default();
        state.selections.year = Selection::Only(1999);
        state.loading = true;
        state.status_message = Some("stale".to_string());

        state.set_dataset(dataset());

        assert_eq!(state.selections, Selections::default());
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
        assert!(!state.loading);
        assert!(state.status_message.is_none());
        assert_eq!(state.trend_cities.len(), 2, "one entry per distinct city");
    }

    #[test]
    fn selection_events_refilter_immediately() {
        let mut state = AppState::default();
        state.set_dataset(dataset());

        state.set_year(Selection::Only(2023));
        assert_eq!(state.visible_indices, vec![1, 2]);

        state.set_age_group(Selection::Only("26-35".to_string()));
        assert_eq!(state.visible_indices, vec![2]);

        state.set_year(Selection::All);
        state.set_age_group(Selection::All);
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
    }

    #[test]
    fn visible_rows_follow_the_cached_indices() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        state.set_year(Selection::Only(2022));

        let cities: Vec<&str> = state.visible_rows().map(|r| r.city.as_str()).collect();
        assert_eq!(cities, vec!["Budapest"]);
    }

    #[test]
    fn trend_city_picks_are_capped() {
        let mut state = AppState::default();
        for city in ["A", "B", "C", "D", "E", "F"] {
            state.toggle_trend_city(city);
        }
        assert_eq!(state.trend_cities.len(), MAX_TREND_CITIES);
        assert!(!state.trend_cities.contains("F"));

        state.toggle_trend_city("A");
        assert!(!state.trend_cities.contains("A"));
        assert_eq!(state.trend_cities.len(), MAX_TREND_CITIES - 1);
    }

    #[test]
    fn poll_applies_a_downloaded_dataset() {
        let mut state = AppState::default();
        let (tx, rx) = mpsc::channel();
        state.load_rx = Some(rx);
        state.loading = true;

        state.poll_remote_load();
        assert!(state.loading, "nothing has arrived yet");

        tx.send(Ok(dataset())).unwrap();
        state.poll_remote_load();

        assert!(!state.loading);
        assert!(state.load_rx.is_none());
        assert_eq!(state.dataset.as_ref().map(|ds| ds.len()), Some(3));
    }

    #[test]
    fn poll_surfaces_a_download_error() {
        let mut state = AppState::default();
        let (tx, rx) = mpsc::channel();
        state.load_rx = Some(rx);
        state.loading = true;

        tx.send(Err("no route to host".to_string())).unwrap();
        state.poll_remote_load();

        assert!(!state.loading);
        assert_eq!(state.status_message.as_deref(), Some("no route to host"));
        assert!(state.dataset.is_none());
    }

    #[test]
    fn ingesting_a_dataset_drops_a_pending_download() {
        let mut state = AppState::default();
        let (tx, rx) = mpsc::channel();
        state.load_rx = Some(rx);
        state.loading = true;

        // The user opens a file while the download is still running.
        state.set_dataset(HousingDataset::from_rows(vec![row("Local", 2020, "18-25")]));
        assert!(!state.loading);
        assert!(
            tx.send(Ok(dataset())).is_err(),
            "worker channel should be closed"
        );

        state.poll_remote_load();

        let ds = state.dataset.as_ref().unwrap();
        assert_eq!(ds.len(), 1);
        assert!(
            ds.cities.contains("Local"),
            "the opened file must survive the stale download"
        );
        assert!(state.trend_cities.contains("Local"));
    }
}
