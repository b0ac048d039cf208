use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::DatePickerButton;

use crate::data::dataset::Scenario;
use crate::data::filter::series_for;
use crate::glossary::{self, Glossary, ECONOMIC_GLOSSARY, MODEL_GLOSSARY};
use crate::state::AppState;
use crate::ui::{plot, table};

// ---------------------------------------------------------------------------
// Historical indicators
// ---------------------------------------------------------------------------

/// Column picker, date window, indicator chart and (optionally) the rows behind it.
pub fn historic_section(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Historical data");
    ui.label(RichText::new(Scenario::Historic.title()).strong());

    let columns: Vec<String> = state
        .data
        .historic
        .column_names()
        .map(str::to_string)
        .collect();
    if columns.is_empty() {
        ui.label("The historic table has no indicator columns.");
        return;
    }

    // ---- y-axis selector ----
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Indicator");
        let current = state.y_column.clone().unwrap_or_default();
        egui::ComboBox::from_id_salt("y_axis")
            .selected_text(&current)
            .show_ui(ui, |ui: &mut Ui| {
                for col in &columns {
                    if ui.selectable_label(current == *col, col).clicked() {
                        state.y_column = Some(col.clone());
                    }
                }
            });
    });

    // ---- date window ----
    if let Some(bounds) = state.data.historic.date_bounds() {
        let mut range = state.date_range.unwrap_or(bounds);
        ui.horizontal(|ui: &mut Ui| {
            ui.label("From");
            let mut changed = ui
                .add(DatePickerButton::new(&mut range.start).id_salt("range_start"))
                .changed();
            ui.label("to");
            changed |= ui
                .add(DatePickerButton::new(&mut range.end).id_salt("range_end"))
                .changed();
            if ui.small_button("Full range").clicked() {
                range = bounds;
                changed = true;
            }
            if changed {
                state.set_date_range(range);
            }
            ui.label(format!("(data covers {bounds})"));
        });
    }

    // ---- chart ----
    let view = state.historic_view();
    if let Some(col) = state.y_column.as_deref() {
        match series_for(&view, col) {
            Ok(series) => plot::series_chart(ui, "historic_plot", col, &[series], &state.colors),
            Err(e) => {
                ui.label(RichText::new(e.to_string()).color(Color32::RED));
            }
        }
    }

    if state.show_tables {
        ui.label(RichText::new("Economic indicators data table").strong());
        table::data_table(ui, "historic_table", &view);
    }
    ui.small("Source: RBNZ");
}

// ---------------------------------------------------------------------------
// Forecast scenarios
// ---------------------------------------------------------------------------

/// One chart per forecast scenario, each with its own column selection.
pub fn forecast_section(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Forecasts");

    for scenario in Scenario::FORECASTS {
        ui.add_space(8.0);
        ui.label(RichText::new(scenario.title()).strong());

        let columns: Vec<String> = state
            .data
            .table(scenario)
            .column_names()
            .map(str::to_string)
            .collect();

        // ---- multi-select, order of clicks = legend order ----
        ui.horizontal_wrapped(|ui: &mut Ui| {
            ui.label("Select forecasts:");
            for col in &columns {
                let on = state.forecast_selection(scenario).contains(col);
                if ui.selectable_label(on, col).clicked() {
                    state.toggle_forecast(scenario, col);
                }
            }
        });

        match state.forecast_view(scenario) {
            Ok(view) => {
                let series: Vec<_> = view
                    .column_names()
                    .filter_map(|c| series_for(&view, c).ok())
                    .collect();
                let id = format!("forecast_plot_{scenario:?}");
                plot::series_chart(ui, &id, "OCR (%)", &series, &state.colors);

                if state.show_tables && !series.is_empty() {
                    table::data_table(ui, &format!("forecast_table_{scenario:?}"), &view);
                }
            }
            Err(e) => {
                ui.label(RichText::new(e.to_string()).color(Color32::RED));
            }
        }
    }

    ui.small("Sources: RBNZ, ANZ, ASB");
}

// ---------------------------------------------------------------------------
// Glossary
// ---------------------------------------------------------------------------

pub fn glossary_section(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Glossary");

    ui.label(RichText::new("Machine Learning Models").strong());
    glossary_picker(ui, "model_glossary", MODEL_GLOSSARY, &mut state.model_term);

    ui.add_space(8.0);
    ui.label(RichText::new("Economic Terms").strong());
    glossary_picker(ui, "economic_glossary", ECONOMIC_GLOSSARY, &mut state.economic_term);
}

/// Term selector followed by the selected term's definition.
fn glossary_picker(ui: &mut Ui, id: &str, entries: Glossary, selected: &mut &'static str) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Select a term");
        egui::ComboBox::from_id_salt(id)
            .selected_text(*selected)
            .width(260.0)
            .show_ui(ui, |ui: &mut Ui| {
                for (term, _) in entries {
                    ui.selectable_value(selected, *term, *term);
                }
            });
    });

    if let Some(def) = glossary::definition(entries, selected) {
        ui.horizontal_wrapped(|ui: &mut Ui| {
            ui.label(RichText::new(format!("{selected}:")).strong());
            ui.label(def);
        });
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open data folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} historic rows, {} shown",
            state.data.historic.len(),
            state.historic_view().len()
        ));

        ui.separator();

        if ui
            .selectable_label(state.show_tables, "Show data tables")
            .clicked()
        {
            state.show_tables = !state.show_tables;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open dashboard data folder")
        .set_directory(&state.config.data_dir)
        .pick_folder();

    if let Some(dir) = folder {
        // Errors are logged and shown in the status bar by `reload_from`.
        let _ = state.reload_from(&dir);
    }
}
