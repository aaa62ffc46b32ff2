use std::ops::RangeInclusive;

use eframe::egui::{self, Color32, Ui};

use crate::state::{AppState, CurveFitForm, Dialog, FsrForm, ImportForm, ShiftForm};
use crate::ui::plot;

// ---------------------------------------------------------------------------
// Modal dialogs
// ---------------------------------------------------------------------------

enum Outcome {
    Pending,
    Accept,
    Cancel,
}

/// Render the open dialog and act on OK / Cancel.
pub fn show(ctx: &egui::Context, state: &mut AppState) {
    let Some(mut dialog) = state.dialog.take() else {
        return;
    };
    let labels: Vec<String> = state.traces.labels().map(str::to_owned).collect();
    let mut outcome = Outcome::Pending;

    egui::Window::new(dialog.title())
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui: &mut Ui| {
            match &mut dialog {
                Dialog::Import(form) => import_form(ui, form),
                Dialog::CurveFit(form) => curve_fit_form(ui, form, &labels, state),
                Dialog::Shift(form) => shift_form(ui, form, &labels, state),
                Dialog::Fsr(form) => fsr_form(ui, form, &labels, state),
            }

            ui.separator();
            ui.horizontal(|ui: &mut Ui| {
                if ui.button("OK").clicked() {
                    outcome = Outcome::Accept;
                }
                if ui.button("Cancel").clicked() {
                    outcome = Outcome::Cancel;
                }
            });
        });

    match outcome {
        Outcome::Pending => state.dialog = Some(dialog),
        Outcome::Cancel => {}
        Outcome::Accept => accept(state, dialog),
    }
}

fn accept(state: &mut AppState, dialog: Dialog) {
    match dialog {
        Dialog::Import(ImportForm { path, overlay }) => match path {
            Some(path) => state.import_file(&path, overlay),
            None => state.fail("No file selected!"),
        },
        Dialog::CurveFit(form) => state.run(form.request()),
        Dialog::Shift(form) => state.run(form.request()),
        Dialog::Fsr(form) => state.run(form.request()),
    }
}

// ---------------------------------------------------------------------------
// Forms
// ---------------------------------------------------------------------------

fn import_form(ui: &mut Ui, form: &mut ImportForm) {
    if ui.button("Select File…").clicked() {
        let file = rfd::FileDialog::new()
            .set_title("Open spectral data")
            .add_filter("Spectral data", &["csv", "txt"])
            .pick_file();
        if file.is_some() {
            form.path = file;
        }
    }

    match &form.path {
        Some(path) => ui.label(path.display().to_string()),
        None => ui.weak("No file selected"),
    };

    ui.checkbox(&mut form.overlay, "Overlay new data");
}

fn curve_fit_form(ui: &mut Ui, form: &mut CurveFitForm, labels: &[String], state: &AppState) {
    let range = state.settings.frequency_min..=state.settings.frequency_max;

    egui::Grid::new("curve_fit_form")
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("Spectral response");
            trace_combo(ui, "curve_fit_trace", &mut form.trace, labels);
            ui.end_row();

            ui.label("Starting parameter value");
            bound_input(ui, &mut form.search_start, range.clone(), 0.001);
            ui.end_row();

            ui.label("Ending parameter value");
            bound_input(ui, &mut form.search_end, range, 0.001);
            ui.end_row();
        });
}

fn shift_form(ui: &mut Ui, form: &mut ShiftForm, labels: &[String], state: &AppState) {
    let range = state.settings.wavelength_min..=state.settings.wavelength_max;

    egui::Grid::new("shift_form")
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("Spectral response 1");
            trace_combo(ui, "shift_first", &mut form.first, labels);
            ui.end_row();

            ui.label("Spectral response 2");
            trace_combo(ui, "shift_second", &mut form.second, labels);
            ui.end_row();

            ui.label("Partition starting point");
            bound_input(ui, &mut form.window_start, range.clone(), 0.01);
            ui.end_row();

            ui.label("Partition ending point");
            bound_input(ui, &mut form.window_end, range, 0.01);
            ui.end_row();
        });

    let neutral = ui.visuals().text_color();
    plot::window_preview(
        ui,
        "shift_preview",
        state,
        labels,
        false,
        &[(form.window_start, neutral), (form.window_end, neutral)],
    );
}

fn fsr_form(ui: &mut Ui, form: &mut FsrForm, labels: &[String], state: &AppState) {
    let range = state.settings.wavelength_min..=state.settings.wavelength_max;

    egui::Grid::new("fsr_form")
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("Spectral response");
            trace_combo(ui, "fsr_trace", &mut form.trace, labels);
            ui.end_row();

            ui.label("Peak 1: partition starting point");
            bound_input(ui, &mut form.peak1_start, range.clone(), 0.01);
            ui.end_row();

            ui.label("Peak 1: partition ending point");
            bound_input(ui, &mut form.peak1_end, range.clone(), 0.01);
            ui.end_row();

            ui.label("Peak 2: partition starting point");
            bound_input(ui, &mut form.peak2_start, range.clone(), 0.01);
            ui.end_row();

            ui.label("Peak 2: partition ending point");
            bound_input(ui, &mut form.peak2_end, range, 0.01);
            ui.end_row();
        });

    let neutral = ui.visuals().text_color();
    plot::window_preview(
        ui,
        "fsr_preview",
        state,
        std::slice::from_ref(&form.trace),
        true,
        &[
            (form.peak1_start, neutral),
            (form.peak1_end, neutral),
            (form.peak2_start, Color32::RED),
            (form.peak2_end, Color32::RED),
        ],
    );
}

// -- Widgets --

fn trace_combo(ui: &mut Ui, id: &str, selected: &mut String, labels: &[String]) {
    egui::ComboBox::from_id_salt(id)
        .selected_text(selected.as_str())
        .show_ui(ui, |ui: &mut Ui| {
            for label in labels {
                ui.selectable_value(selected, label.clone(), label.as_str());
            }
        });
}

fn bound_input(ui: &mut Ui, value: &mut f64, range: RangeInclusive<f64>, speed: f64) {
    ui.add(
        egui::DragValue::new(value)
            .range(range)
            .speed(speed)
            .max_decimals(4),
    );
}
