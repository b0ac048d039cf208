use std::collections::BTreeMap;
use std::path::Path;

use crate::color::SeriesColors;
use crate::config::DashboardConfig;
use crate::data::dataset::{DashboardData, Scenario};
use crate::data::error::{ColumnNotFoundError, LoadError};
use crate::data::filter::{filter_by_range, select_columns};
use crate::data::model::{DateRange, TimeSeriesTable};
use crate::glossary::{self, ECONOMIC_GLOSSARY, MODEL_GLOSSARY};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Where the current tables came from.
    pub config: DashboardConfig,

    /// Loaded tables. Replaced wholesale on reload, never edited.
    pub data: DashboardData,

    /// Colour per column name, rebuilt with the data.
    pub colors: SeriesColors,

    /// Historic column drawn on the indicator chart.
    pub y_column: Option<String>,

    /// Selected window over the historic table (`None` if it has no rows).
    pub date_range: Option<DateRange>,

    /// Per-scenario forecast columns, in the order they were picked.
    pub forecast_selections: BTreeMap<Scenario, Vec<String>>,

    /// Show the raw tables under each chart.
    pub show_tables: bool,

    /// Terms picked in the two glossary boxes.
    pub model_term: &'static str,
    pub economic_term: &'static str,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig, data: DashboardData) -> Self {
        let mut state = Self {
            colors: SeriesColors::for_data(&data),
            config,
            data,
            y_column: None,
            date_range: None,
            forecast_selections: BTreeMap::new(),
            show_tables: true,
            model_term: glossary::first_term(MODEL_GLOSSARY),
            economic_term: glossary::first_term(ECONOMIC_GLOSSARY),
            status_message: None,
        };
        state.reset_selections();
        state
    }

    /// Ingest a newly loaded dataset and reset the view to cover it.
    ///
    /// Forecast selections survive where the new tables still have the column.
    pub fn set_data(&mut self, config: DashboardConfig, data: DashboardData) {
        self.colors = SeriesColors::for_data(&data);
        self.config = config;
        self.data = data;
        self.reset_selections();
        self.status_message = None;
    }

    fn reset_selections(&mut self) {
        let historic = &self.data.historic;
        let keep_y = self
            .y_column
            .as_deref()
            .is_some_and(|c| historic.column(c).is_some());
        if !keep_y {
            self.y_column = historic.column_names().next().map(str::to_string);
        }
        self.date_range = historic.date_bounds();

        for scenario in Scenario::FORECASTS {
            let table = self.data.table(scenario);
            let selected = self.forecast_selections.entry(scenario).or_default();
            selected.retain(|c| table.column(c).is_some());
        }
    }

    /// Reload all four tables from `dir`. On failure the current data stays.
    pub fn reload_from(&mut self, dir: &Path) -> Result<(), LoadError> {
        let config = self.config.with_data_dir(dir);
        match DashboardData::load(&config) {
            Ok(data) => {
                log::info!("Reloaded dashboard data from {}", dir.display());
                self.set_data(config, data);
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to reload data from {}: {e}", dir.display());
                self.status_message = Some(format!("Error: {e}"));
                Err(e)
            }
        }
    }

    /// Set the historic window, kept inside the table's bounds.
    pub fn set_date_range(&mut self, range: DateRange) {
        self.date_range = self
            .data
            .historic
            .date_bounds()
            .map(|bounds| range.clamp_to(bounds));
    }

    /// The historic table restricted to the selected window.
    pub fn historic_view(&self) -> TimeSeriesTable {
        match self.date_range {
            Some(range) => filter_by_range(&self.data.historic, range),
            None => self.data.historic.clone(),
        }
    }

    pub fn forecast_selection(&self, scenario: Scenario) -> &[String] {
        self.forecast_selections
            .get(&scenario)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Add `column` to the end of the scenario's selection, or remove it.
    pub fn toggle_forecast(&mut self, scenario: Scenario, column: &str) {
        let selected = self.forecast_selections.entry(scenario).or_default();
        if let Some(pos) = selected.iter().position(|c| c == column) {
            selected.remove(pos);
        } else {
            selected.push(column.to_string());
        }
    }

    /// The scenario's table projected onto its selected columns.
    pub fn forecast_view(
        &self,
        scenario: Scenario,
    ) -> Result<TimeSeriesTable, ColumnNotFoundError> {
        let result = select_columns(self.data.table(scenario), self.forecast_selection(scenario));
        if let Err(e) = &result {
            log::warn!("{scenario} chart: {e}");
        }
        result
    }
}
