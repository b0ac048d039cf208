use eframe::egui::Ui;
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::data::loader::DATE_COLUMN;
use crate::data::model::TimeSeriesTable;

// ---------------------------------------------------------------------------
// Raw data grid
// ---------------------------------------------------------------------------

fn format_cell(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.4}"),
        None => "NaN".to_string(),
    }
}

/// Render a table as a scrollable grid: the date key, then each column.
pub fn data_table(ui: &mut Ui, id: &str, table: &TimeSeriesTable) {
    if table.is_empty() {
        ui.label("No rows in the selected range.");
        return;
    }

    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .max_scroll_height(240.0)
            .column(TableColumn::auto().at_least(90.0))
            .columns(TableColumn::auto().at_least(70.0), table.columns().len())
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong(DATE_COLUMN);
                });
                for col in table.columns() {
                    header.col(|ui| {
                        ui.strong(&col.name);
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, table.len(), |mut row| {
                    let i = row.index();
                    row.col(|ui| {
                        ui.label(table.dates()[i].to_string());
                    });
                    for col in table.columns() {
                        row.col(|ui| {
                            ui.label(format_cell(col.values[i]));
                        });
                    }
                });
            });
    });
}
