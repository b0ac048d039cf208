use chrono::{Datelike, NaiveDate};
use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

use crate::color::SeriesColors;
use crate::data::model::Series;

// ---------------------------------------------------------------------------
// Date axis
// ---------------------------------------------------------------------------

/// Plot x coordinate of a date: days since 0001-01-01.
pub fn date_to_x(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

pub fn x_to_date(x: f64) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
}

/// Break a series into runs of present values. Missing values end a run,
/// so the chart shows a gap instead of bridging it.
pub fn segments(series: Series<'_>) -> Vec<Vec<[f64; 2]>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for (date, value) in series {
        match value {
            Some(v) => current.push([date_to_x(date), v]),
            None if !current.is_empty() => runs.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

// ---------------------------------------------------------------------------
// Time-series chart
// ---------------------------------------------------------------------------

/// Draw one line per series against a date x axis.
pub fn series_chart(
    ui: &mut Ui,
    id: &str,
    y_label: &str,
    series: &[Series<'_>],
    colors: &SeriesColors,
) {
    Plot::new(id)
        .legend(Legend::default())
        .height(280.0)
        .x_axis_label("Date")
        .y_axis_label(y_label)
        .x_axis_formatter(|mark, _range| {
            x_to_date(mark.value)
                .map(|d| d.to_string())
                .unwrap_or_default()
        })
        .label_formatter(|name, point| {
            let date = x_to_date(point.x)
                .map(|d| d.to_string())
                .unwrap_or_default();
            if name.is_empty() {
                format!("{date}\n{:.3}", point.y)
            } else {
                format!("{name}\n{date}\n{:.3}", point.y)
            }
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for s in series {
                let color = colors.color_for(s.name());
                for run in segments(*s) {
                    if run.len() == 1 {
                        // A lone value has no line to draw.
                        let point = Points::new(PlotPoints::from(run))
                            .name(s.name())
                            .color(color)
                            .radius(2.5);
                        plot_ui.points(point);
                    } else {
                        let line = Line::new(PlotPoints::from(run))
                            .name(s.name())
                            .color(color)
                            .width(1.5);
                        plot_ui.line(line);
                    }
                }
            }
        });
}
