use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the menu bar and toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Import Data…").clicked() {
                state.open_import();
                ui.close_menu();
            }
        });

        ui.menu_button("Analyze", |ui: &mut Ui| {
            if ui.button("Curve Fit…").clicked() {
                state.open_curve_fit();
                ui.close_menu();
            }
            if ui.button("Temperature Shift…").clicked() {
                state.open_shift();
                ui.close_menu();
            }
            if ui.button("FSR…").clicked() {
                state.open_fsr();
                ui.close_menu();
            }
        });

        ui.separator();

        if ui
            .button("Add Data")
            .on_hover_text("Add spectral data")
            .clicked()
        {
            state.open_import();
        }

        if ui
            .selectable_label(state.linearized, "Linearize")
            .on_hover_text("Linearize spectral response")
            .clicked()
        {
            state.linearize();
        }

        if ui
            .button("Clear canvas")
            .on_hover_text("Clear canvas")
            .clicked()
        {
            state.clear();
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Bottom bar
// ---------------------------------------------------------------------------

/// Render the list of imported traces.
pub fn status_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        if state.traces.is_empty() {
            ui.label("No spectral data imported.");
            return;
        }
        ui.label(format!("{} spectral response(s):", state.traces.len()));
        for (label, trace) in state.traces.iter() {
            let (first, last) = (trace.wavelength()[0], trace.wavelength()[trace.len() - 1]);
            ui.label(RichText::new(label).strong())
                .on_hover_text(format!("{} samples, {first:.3}–{last:.3} nm", trace.len()));
        }
    });
}
