use eframe::egui::{self, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct OcrDashboardApp {
    pub state: AppState,
}

impl OcrDashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for OcrDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: one scrolling page of sections ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    panels::historic_section(ui, &mut self.state);
                    ui.separator();
                    panels::forecast_section(ui, &mut self.state);
                    ui.separator();
                    panels::glossary_section(ui, &mut self.state);
                });
        });
    }
}
