use eframe::egui::{self, Color32, RichText, Ui};
use egui_plot::{Corner, Legend, Line, LineStyle, Plot, PlotPoint, PlotPoints, PlotUi, Text, VLine};
use spectral_analysis::analysis::fit::FitResult;
use spectral_analysis::analysis::preprocess::linearize;
use spectral_analysis::{AnalysisResponse, FreeSpectralRange, ShiftDistance};

use crate::color::TraceColors;
use crate::state::AppState;

const DASHED: LineStyle = LineStyle::Dashed { length: 8.0 };

fn points(x: &[f64], y: &[f64]) -> PlotPoints<'static> {
    x.iter().zip(y).map(|(&xi, &yi)| [xi, yi]).collect()
}

fn y_label(linear: bool) -> &'static str {
    if linear {
        "Transmission (uW)"
    } else {
        "Transmission (dBm)"
    }
}

/// Draw the named traces, in dBm or µW.
fn draw_traces(plot_ui: &mut PlotUi, state: &AppState, labels: &[String], linear: bool) {
    let colors = TraceColors::new(state.traces.labels());
    for label in labels {
        let Some(trace) = state.traces.get(label) else {
            continue;
        };
        let y = if linear {
            linearize(trace.power_dbm())
        } else {
            trace.power_dbm().to_vec()
        };
        plot_ui.line(
            Line::new(points(trace.wavelength(), &y))
                .name(label)
                .color(colors.color_for(label))
                .width(1.5),
        );
    }
}

// ---------------------------------------------------------------------------
// Main canvas (central panel)
// ---------------------------------------------------------------------------

/// Render the imported traces in the central panel.
pub fn spectral_plot(ui: &mut Ui, state: &AppState) {
    if state.plotted.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Import a file to view spectra  (File → Import Data…)");
        });
        return;
    }

    Plot::new("spectral_plot")
        .legend(Legend::default().position(Corner::RightBottom))
        .x_axis_label("Wavelength (nm)")
        .y_axis_label(y_label(state.linearized))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            draw_traces(plot_ui, state, &state.plotted, state.linearized);
        });
}

/// Small plot inside a dialog with a dashed line at every window bound.
pub fn window_preview(
    ui: &mut Ui,
    id: &str,
    state: &AppState,
    labels: &[String],
    linear: bool,
    bounds: &[(f64, Color32)],
) {
    Plot::new(id)
        .height(220.0)
        .width(460.0)
        .legend(Legend::default().position(Corner::RightBottom))
        .x_axis_label("Wavelength (nm)")
        .y_axis_label(y_label(linear))
        .show(ui, |plot_ui| {
            draw_traces(plot_ui, state, labels, linear);
            for &(x, color) in bounds {
                plot_ui.vline(VLine::new(x).color(color).width(1.0).style(DASHED));
            }
        });
}

// ---------------------------------------------------------------------------
// Result window
// ---------------------------------------------------------------------------

/// Render the last analysis result in its own window until closed.
pub fn result_window(ctx: &egui::Context, state: &mut AppState) {
    let Some(response) = &state.result else {
        return;
    };

    let mut open = true;
    egui::Window::new("Analysis Result")
        .open(&mut open)
        .default_size([640.0, 440.0])
        .show(ctx, |ui: &mut Ui| {
            ui.label(RichText::new(response.summary()).strong());
            ui.separator();
            match response {
                AnalysisResponse::CurveFit { fit, .. } => fit_plot(ui, fit),
                AnalysisResponse::ShiftDistance { result, .. } => shift_plot(ui, result),
                AnalysisResponse::FreeSpectralRange { trace, result } => fsr_plot(ui, trace, result),
            }
        });

    if !open {
        state.result = None;
    }
}

fn fit_plot(ui: &mut Ui, fit: &FitResult) {
    Plot::new("fit_plot")
        .legend(Legend::default())
        .x_axis_label("Wavelength (nm)")
        .y_axis_label("Normalized transmission")
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(points(&fit.wavelength, &fit.normalized)).name("data"));
            plot_ui.line(
                Line::new(points(&fit.wavelength, &fit.fitted))
                    .name("fit")
                    .width(1.5),
            );
        });
}

fn shift_plot(ui: &mut Ui, result: &ShiftDistance) {
    let neutral = ui.visuals().text_color();
    let level = result.connector_level;

    Plot::new("shift_plot")
        .legend(Legend::default())
        .x_axis_label("Wavelength (nm)")
        .y_axis_label(y_label(false))
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(points(&result.windowed_a.wavelength, &result.windowed_a.power))
                    .name("Signal 1"),
            );
            plot_ui.line(
                Line::new(points(&result.windowed_b.wavelength, &result.windowed_b.power))
                    .name("Signal 2"),
            );
            plot_ui.line(
                Line::new(PlotPoints::new(vec![
                    [result.minimum_a.wavelength, level],
                    [result.minimum_b.wavelength, level],
                ]))
                .name("Distance Shift")
                .color(neutral)
                .style(DASHED),
            );
            plot_ui.text(Text::new(
                PlotPoint::new(result.minimum_a.wavelength, level + 1.0),
                result.label(),
            ));
        });
}

fn fsr_plot(ui: &mut Ui, trace: &str, result: &FreeSpectralRange) {
    let neutral = ui.visuals().text_color();
    let level = result.peak_2.power;

    Plot::new("fsr_plot")
        .legend(Legend::default())
        .x_axis_label("Wavelength (nm)")
        .y_axis_label(y_label(true))
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(points(&result.wavelength, &result.linear))
                    .name(trace)
                    .color(Color32::LIGHT_BLUE),
            );
            plot_ui.line(
                Line::new(PlotPoints::new(vec![
                    [result.peak_1.wavelength, level],
                    [result.peak_2.wavelength, level],
                ]))
                .name("FSR")
                .color(Color32::LIGHT_BLUE)
                .style(DASHED),
            );
            for window in [result.window_1, result.window_2] {
                for x in [window.start(), window.end()] {
                    plot_ui.vline(VLine::new(x).color(neutral).style(DASHED));
                }
            }
            plot_ui.text(Text::new(
                PlotPoint::new(result.peak_1.wavelength, result.peak_1.power + 0.5),
                result.label(),
            ));
        });
}
