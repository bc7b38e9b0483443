//! Corner Plot Viewer
//! Interactive window showing the pairwise matrix with egui_plot.

use crate::charts::{ChartError, CornerData};
use eframe::egui;
use egui::{Color32, RichText, ScrollArea};
use egui_plot::{Bar, BarChart, Plot, PlotPoints, Points};

/// Side length of one matrix cell in points.
const CELL_SIZE: f32 = 220.0;
const CELL_SPACING: f32 = 6.0;

pub const POINT_COLOR: Color32 = Color32::from_rgb(52, 73, 94);
pub const BAR_COLOR: Color32 = Color32::from_rgb(52, 152, 219);

/// Window app drawing the lower triangle of a corner plot.
pub struct CornerViewer {
    data: CornerData,
}

impl CornerViewer {
    pub fn new(data: CornerData) -> Self {
        Self { data }
    }

    /// Open the viewer and block until the window is closed.
    pub fn run(data: CornerData) -> Result<(), ChartError> {
        let n = data.labels.len() as f32;
        let side = (n * (CELL_SIZE + CELL_SPACING) + 80.0).min(1400.0);

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([side, side])
                .with_min_inner_size([400.0, 400.0])
                .with_title("Corner Plot"),
            ..Default::default()
        };

        eframe::run_native(
            "Corner Plot",
            options,
            Box::new(|_cc| Ok(Box::new(CornerViewer::new(data)))),
        )
        .map_err(|e| ChartError::Display(e.to_string()))
    }

    fn draw_histogram_cell(&self, ui: &mut egui::Ui, idx: usize) {
        let hist = &self.data.marginals[idx];
        let bars: Vec<Bar> = hist
            .edges
            .windows(2)
            .zip(&hist.counts)
            .map(|(edge, &count)| {
                Bar::new((edge[0] + edge[1]) / 2.0, count as f64).width(edge[1] - edge[0])
            })
            .collect();

        ui.label(RichText::new(&self.data.titles[idx]).size(11.0).strong());
        self.cell_plot(idx, idx).show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(BAR_COLOR));
        });
    }

    fn draw_scatter_cell(&self, ui: &mut egui::Ui, row: usize, col: usize) {
        let points: PlotPoints = self.data.columns[col]
            .iter()
            .zip(&self.data.columns[row])
            .map(|(&x, &y)| [x, y])
            .collect();

        // keeps rows aligned with the titled diagonal cells
        ui.label(RichText::new(" ").size(11.0));
        self.cell_plot(row, col).show(ui, |plot_ui| {
            plot_ui.points(Points::new(points).radius(1.5).color(POINT_COLOR));
        });
    }

    fn cell_plot(&self, row: usize, col: usize) -> Plot {
        let n = self.data.labels.len();
        let mut plot = Plot::new(format!("corner_{row}_{col}"))
            .width(CELL_SIZE)
            .height(CELL_SIZE)
            .allow_scroll(false);

        if row == n - 1 {
            plot = plot.x_axis_label(self.data.labels[col].clone());
        }
        if col == 0 && row != col {
            plot = plot.y_axis_label(self.data.labels[row].clone());
        }
        plot
    }
}

impl eframe::App for CornerViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::both().show(ui, |ui| {
                let n = self.data.labels.len();
                egui::Grid::new("corner_grid")
                    .spacing([CELL_SPACING, CELL_SPACING])
                    .show(ui, |ui| {
                        for row in 0..n {
                            for col in 0..n {
                                if col > row {
                                    ui.label("");
                                    continue;
                                }
                                ui.vertical(|ui| {
                                    if row == col {
                                        self.draw_histogram_cell(ui, row);
                                    } else {
                                        self.draw_scatter_cell(ui, row, col);
                                    }
                                });
                            }
                            ui.end_row();
                        }
                    });
            });
        });
    }
}
