use std::path::{Path, PathBuf};

use spectral_analysis::config::Settings;
use spectral_analysis::data::collection::TraceCollection;
use spectral_analysis::data::loader::load_trace;
use spectral_analysis::{AnalysisRequest, AnalysisResponse};

// ---------------------------------------------------------------------------
// Dialog forms
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct ImportForm {
    pub path: Option<PathBuf>,
    /// Keep already plotted traces on the canvas.
    pub overlay: bool,
}

#[derive(Debug, Clone)]
pub struct CurveFitForm {
    pub trace: String,
    pub search_start: f64,
    pub search_end: f64,
}

#[derive(Debug, Clone)]
pub struct ShiftForm {
    pub first: String,
    pub second: String,
    pub window_start: f64,
    pub window_end: f64,
}

#[derive(Debug, Clone)]
pub struct FsrForm {
    pub trace: String,
    pub peak1_start: f64,
    pub peak1_end: f64,
    pub peak2_start: f64,
    pub peak2_end: f64,
}

/// The modal dialog currently open, if any.
#[derive(Debug, Clone)]
pub enum Dialog {
    Import(ImportForm),
    CurveFit(CurveFitForm),
    Shift(ShiftForm),
    Fsr(FsrForm),
}

impl Dialog {
    pub fn title(&self) -> &'static str {
        match self {
            Dialog::Import(_) => "Import Spectral Data",
            Dialog::CurveFit(_) => "Fit Spectral Data",
            Dialog::Shift(_) => "Calculate Temperature Shift",
            Dialog::Fsr(_) => "Calculate FSR",
        }
    }
}

impl CurveFitForm {
    pub fn request(&self) -> AnalysisRequest {
        AnalysisRequest::CurveFit {
            trace: self.trace.clone(),
            search_start: self.search_start,
            search_end: self.search_end,
        }
    }
}

impl ShiftForm {
    pub fn request(&self) -> AnalysisRequest {
        AnalysisRequest::ShiftDistance {
            first: self.first.clone(),
            second: self.second.clone(),
            window_start: self.window_start,
            window_end: self.window_end,
        }
    }
}

impl FsrForm {
    pub fn request(&self) -> AnalysisRequest {
        AnalysisRequest::FreeSpectralRange {
            trace: self.trace.clone(),
            peak1_start: self.peak1_start,
            peak1_end: self.peak1_end,
            peak2_start: self.peak2_start,
            peak2_end: self.peak2_end,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Imported traces of this session.
    pub traces: TraceCollection,

    pub settings: Settings,

    /// Labels drawn on the main canvas, in drawing order.
    pub plotted: Vec<String>,

    /// Draw the canvas in µW instead of dBm.
    pub linearized: bool,

    pub dialog: Option<Dialog>,

    /// Last successful analysis, shown in the result window.
    pub result: Option<AnalysisResponse>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            traces: TraceCollection::new(),
            settings,
            plotted: Vec::new(),
            linearized: false,
            dialog: None,
            result: None,
            status_message: None,
        }
    }

    /// Load a trace file and draw it, replacing the canvas unless `overlay`.
    pub fn import_file(&mut self, path: &Path, overlay: bool) {
        match load_trace(path) {
            Ok(trace) => {
                let n = trace.len();
                let label = self.traces.insert(trace);
                log::info!("Imported {} as {label} ({n} samples)", path.display());

                if !overlay || self.linearized {
                    self.plotted.clear();
                }
                self.plotted.push(label);
                self.linearized = false;
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Redraw every imported trace in linear units.
    pub fn linearize(&mut self) {
        self.plotted = self.traces.labels().map(str::to_owned).collect();
        self.linearized = true;
    }

    /// Drop all traces and results.
    pub fn clear(&mut self) {
        self.traces.clear();
        self.plotted.clear();
        self.linearized = false;
        self.result = None;
        self.dialog = None;
        self.status_message = None;
        log::info!("Cleared all spectral data");
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("{message}");
        self.status_message = Some(format!("Error: {message}"));
    }

    // -- Dialog openers --

    pub fn open_import(&mut self) {
        self.dialog = Some(Dialog::Import(ImportForm::default()));
    }

    pub fn open_curve_fit(&mut self) {
        let Some(first) = self.first_label() else {
            self.fail("No data available!");
            return;
        };
        self.dialog = Some(Dialog::CurveFit(CurveFitForm {
            trace: first,
            search_start: self.settings.frequency_min,
            search_end: self.settings.frequency_min,
        }));
    }

    pub fn open_shift(&mut self) {
        if self.traces.len() < 2 {
            self.fail("Must have at least two spectral response signals!");
            return;
        }
        let labels: Vec<String> = self.traces.labels().map(str::to_owned).collect();
        self.dialog = Some(Dialog::Shift(ShiftForm {
            first: labels[0].clone(),
            second: labels[1].clone(),
            window_start: self.settings.wavelength_min,
            window_end: self.settings.wavelength_min,
        }));
    }

    pub fn open_fsr(&mut self) {
        let Some(first) = self.first_label() else {
            self.fail("No data available!");
            return;
        };
        let min = self.settings.wavelength_min;
        self.dialog = Some(Dialog::Fsr(FsrForm {
            trace: first,
            peak1_start: min,
            peak1_end: min,
            peak2_start: min,
            peak2_end: min,
        }));
    }

    fn first_label(&self) -> Option<String> {
        self.traces.labels().next().map(str::to_owned)
    }

    /// Execute a request and keep its response, or report why it failed.
    pub fn run(&mut self, request: AnalysisRequest) {
        log::debug!("running {request:?}");
        match request.execute(&self.traces, &self.settings) {
            Ok(response) => {
                log::info!("{}: {}", request.name(), response.summary());
                self.result = Some(response);
                self.status_message = None;
            }
            Err(e) => {
                self.result = None;
                self.fail(e.to_string());
            }
        }
    }
}
