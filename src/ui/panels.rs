use std::path::PathBuf;

use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, Ui};
use polyscatter::geometry::controls::{self, ControlDomain};
use polyscatter::geometry::polygon::PolygonParams;
use polyscatter::geometry::region::SquareRegion;
use polyscatter::state::{AppState, Snapshot};

use crate::color::SeriesColors;

/// Rows shown in the data preview table.
const PREVIEW_ROWS: usize = 5;

// ---------------------------------------------------------------------------
// Left side panel – overlay controls
// ---------------------------------------------------------------------------

/// Render the left control panel. Slider edits are applied to `state`
/// immediately; `snapshot` is the frame's read-only view.
pub fn side_panel(ui: &mut Ui, state: &mut AppState, snapshot: &Snapshot, colors: &SeriesColors) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Polygon");
            ui.separator();
            polygon_controls(ui, state, snapshot.polygon_params);

            ui.add_space(8.0);
            ui.heading("Square region");
            ui.separator();
            region_controls(ui, state, snapshot);

            ui.add_space(8.0);
            ui.heading("Data");
            ui.separator();
            data_summary(ui, snapshot, colors);
        });
}

fn polygon_controls(ui: &mut Ui, state: &mut AppState, current: PolygonParams) {
    let mut p = current;

    let mut changed = ui
        .add(
            Slider::new(
                &mut p.num_points,
                controls::NUM_POINTS.min as usize..=controls::NUM_POINTS.max as usize,
            )
            .step_by(controls::NUM_POINTS.step)
            .text("Number of points"),
        )
        .changed();
    changed |= slider(ui, &mut p.radius, controls::RADIUS, "Radius");
    changed |= slider(ui, &mut p.center_x, controls::CENTER, "Center X");
    changed |= slider(ui, &mut p.center_y, controls::CENTER, "Center Y");
    changed |= slider(ui, &mut p.rotation_degrees, controls::ROTATION, "Rotation (°)");

    if changed {
        if let Err(e) = state.set_polygon_params(p) {
            log::warn!("Polygon slider produced invalid parameters: {e}");
        }
    }
}

fn region_controls(ui: &mut Ui, state: &mut AppState, snapshot: &Snapshot) {
    let mut r: SquareRegion = snapshot.region;
    let domains = snapshot.region_domains;

    let mut changed = slider(ui, &mut r.center_x, domains.center_x, "X position");
    changed |= slider(ui, &mut r.center_y, domains.center_y, "Y position");
    changed |= slider(
        ui,
        &mut r.half_size,
        ControlDomain::new(0.1, 5.0, controls::REGION_STEP),
        "Half size",
    );

    if changed {
        if let Err(e) = state.set_region(r) {
            log::warn!("Region slider produced invalid parameters: {e}");
        }
    }
}

/// Slider over `domain`; a changed value is snapped onto the step grid.
fn slider(ui: &mut Ui, value: &mut f64, domain: ControlDomain, label: &str) -> bool {
    let changed = ui
        .add(
            Slider::new(value, domain.min..=domain.max)
                .step_by(domain.step)
                .text(label),
        )
        .changed();
    if changed {
        *value = domain.snap(*value);
    }
    changed
}

fn data_summary(ui: &mut Ui, snapshot: &Snapshot, colors: &SeriesColors) {
    let Some(dataset) = snapshot.dataset.as_deref() else {
        ui.label("No dataset loaded.");
        return;
    };
    let classified = &snapshot.classified;

    ui.label(
        RichText::new(format!(
            "Points inside square: {} / {}",
            classified.inside.len(),
            classified.plotted()
        ))
        .color(colors.inside),
    );
    if !classified.excluded.is_empty() {
        ui.label(format!(
            "{} rows without numeric {} / {} skipped",
            classified.excluded.len(),
            snapshot.axes.x,
            snapshot.axes.y
        ));
    }

    ui.add_space(4.0);
    ui.strong(format!(
        "First {} of {} rows",
        PREVIEW_ROWS.min(dataset.len()),
        dataset.len()
    ));
    egui::Grid::new("preview_table")
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            for header in snapshot.headers() {
                ui.strong(header);
            }
            ui.end_row();
            for record in dataset.records.iter().take(PREVIEW_ROWS) {
                for header in snapshot.headers() {
                    let cell = record.get(header).map(|v| v.to_string()).unwrap_or_default();
                    ui.label(cell);
                }
                ui.end_row();
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar. Returns a file the user picked to load.
pub fn top_bar(ui: &mut Ui, snapshot: &Snapshot) -> Option<PathBuf> {
    let mut picked = None;

    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open CSV…").clicked() {
                picked = open_file_dialog();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &snapshot.dataset {
            ui.label(format!(
                "{} records, {} plotted",
                ds.len(),
                snapshot.classified.plotted()
            ));
        }
        if snapshot.loading {
            ui.spinner();
        }

        if let Some(msg) = &snapshot.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });

    picked
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open point data")
        .add_filter("CSV", &["csv", "txt"])
        .add_filter("All files", &["*"])
        .pick_file()
}
