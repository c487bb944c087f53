use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use anyhow::Context;
use eframe::egui;
use polyscatter::config::ViewerConfig;
use polyscatter::state::AppState;
use polyscatter::upload::UploadTicket;

use crate::color::SeriesColors;
use crate::ui::{panels, plot};

/// Outcome of a background file read: ticket, file name, raw bytes.
type ReadResult = (UploadTicket, String, anyhow::Result<Vec<u8>>);

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PolyscatterApp {
    pub state: AppState,
    pub colors: SeriesColors,
    reads: Option<Receiver<ReadResult>>,
}

impl PolyscatterApp {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            state: AppState::new(config),
            colors: SeriesColors::default(),
            reads: None,
        }
    }

    /// Read `path` on a worker thread, superseding any read in flight.
    /// Files that fail the content-type check are never read.
    pub fn start_upload(&mut self, path: PathBuf, ctx: &egui::Context) {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let Ok(ticket) = self.state.begin_file_upload(&file_name) else {
            return;
        };
        let (tx, rx) = mpsc::channel();
        let ctx = ctx.clone();

        std::thread::spawn(move || {
            let result = read_bytes(&path);
            // Receiver gone means the app moved on; nothing to report.
            let _ = tx.send((ticket, file_name, result));
            ctx.request_repaint();
        });

        // Replacing the receiver drops the result of any superseded read.
        self.reads = Some(rx);
    }

    fn poll_uploads(&mut self) {
        let Some(rx) = &self.reads else {
            return;
        };
        let Ok((ticket, file_name, result)) = rx.try_recv() else {
            return;
        };
        self.reads = None;

        match result {
            Ok(bytes) => {
                if let Some(Err(e)) = self.state.complete_upload_bytes(ticket, &file_name, bytes) {
                    log::error!("Failed to load file: {e}");
                }
            }
            Err(e) => self.state.fail_upload(ticket, format!("Error: {e:#}")),
        }
    }
}

fn read_bytes(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("reading {}", path.display()))
}

impl eframe::App for PolyscatterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_uploads();

        let snapshot = self.state.snapshot();
        if snapshot.loading {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            if let Some(path) = panels::top_bar(ui, &snapshot) {
                self.start_upload(path, ctx);
            }
        });

        // ---- Left side panel: controls ----
        egui::SidePanel::left("control_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state, &snapshot, &self.colors);
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::scatter_plot(ui, &snapshot, &self.colors);
        });
    }
}
