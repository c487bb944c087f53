use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};
use polyscatter::data::model::{AxisColumns, Record};
use polyscatter::geometry::polygon::Vertex;
use polyscatter::state::Snapshot;

use crate::color::SeriesColors;

// ---------------------------------------------------------------------------
// Scatter plot (central panel)
// ---------------------------------------------------------------------------

/// Render the data points, the polygon and the square region.
pub fn scatter_plot(ui: &mut Ui, snapshot: &Snapshot, colors: &SeriesColors) {
    Plot::new("scatter_plot")
        .legend(Legend::default())
        .x_axis_label(snapshot.axes.x.as_str())
        .y_axis_label(snapshot.axes.y.as_str())
        .data_aspect(1.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            if let Some(dataset) = snapshot.dataset.as_deref() {
                let classified = &snapshot.classified;
                let outside = points_of(classified.outside_records(dataset), &snapshot.axes);
                let inside = points_of(classified.inside_records(dataset), &snapshot.axes);

                plot_ui.points(
                    Points::new(outside)
                        .name("Outside")
                        .color(colors.outside)
                        .radius(3.0),
                );
                plot_ui.points(
                    Points::new(inside)
                        .name("Inside")
                        .color(colors.inside)
                        .radius(3.0),
                );
            }

            // Polygon: vertices plus the closed outline through them.
            let polygon = &snapshot.polygon;
            if let Some(first) = polygon.vertices.first() {
                let ring: PlotPoints = polygon
                    .vertices
                    .iter()
                    .chain(std::iter::once(first))
                    .map(|v: &Vertex| [v.x, v.y])
                    .collect();
                plot_ui.line(Line::new(ring).name("Polygon").color(colors.polygon).width(2.0));

                let vertices: PlotPoints = polygon.vertices.iter().map(|v| [v.x, v.y]).collect();
                plot_ui.points(
                    Points::new(vertices)
                        .name("Polygon")
                        .color(colors.polygon)
                        .radius(4.0),
                );
            }

            for edge in snapshot.region.outline() {
                let side: PlotPoints = vec![[edge.from.x, edge.from.y], [edge.to.x, edge.to.y]].into();
                plot_ui.line(Line::new(side).name("Region").color(colors.region).width(2.0));
            }
        });
}

fn points_of<'a>(records: impl Iterator<Item = &'a Record>, axes: &AxisColumns) -> Vec<[f64; 2]> {
    records
        .filter_map(|r| axes.point_of(r))
        .map(|(x, y)| [x, y])
        .collect()
}
