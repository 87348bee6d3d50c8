use std::time::Instant;

use egui::{Layout, RichText};
use egui_extras::{Column, TableBuilder};

use lapboard::relay::ConnectionState;
use lapboard::timing::RunDisplay;

use crate::ui::{TIME_PLACEHOLDER, format_seconds};

use super::{LiveTimingApp, PALETTE_GREEN, PALETTE_ORANGE, PALETTE_RED};

const TABLE_HEADER_HEIGHT: f32 = 20.;
const TABLE_ROW_HEIGHT: f32 = 18.;

impl LiveTimingApp {
    pub(crate) fn timing_view(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        egui::TopBottomPanel::top("status").min_height(30.).show(ctx, |ui| {
            ui.with_layout(Layout::left_to_right(egui::Align::Center), |ui| {
                ui.add_space(4.);
                ui.heading("Lapboard");
                ui.with_layout(Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add_space(4.);
                    let (label, color) = match self.state.connection() {
                        ConnectionState::Connected => ("● Connected", PALETTE_GREEN),
                        ConnectionState::Disconnected => ("● Disconnected", PALETTE_RED),
                    };
                    ui.label(RichText::new(label).color(color));
                });
            });
        });

        egui::TopBottomPanel::bottom("demo-controls")
            .min_height(36.)
            .show(ctx, |ui| {
                ui.with_layout(Layout::left_to_right(egui::Align::Center), |ui| {
                    ui.add_space(4.);
                    ui.label("Demo:");
                    if ui.button("Start run").clicked() {
                        self.state.demo_start(now);
                    }
                    if ui.button("Finish run").clicked() {
                        self.state.demo_finish(now);
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            let (status, clock) = match self.state.run_display(now) {
                RunDisplay::Waiting => {
                    ("Waiting for start...".to_string(), TIME_PLACEHOLDER.to_string())
                }
                RunDisplay::Running { number, elapsed_s } => (
                    format!("Run #{} in progress...", number),
                    format_seconds(elapsed_s),
                ),
                RunDisplay::Finished { number, elapsed_s } => (
                    format!("Run #{} complete!", number),
                    format_seconds(elapsed_s),
                ),
            };
            ui.add_space(8.);
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(status).size(16.));
                ui.label(RichText::new(clock).size(40.).strong().color(PALETTE_ORANGE));
            });
            ui.add_space(8.);

            let history = self.state.history();
            ui.horizontal(|ui| {
                ui.label(format!("Total runs: {}", history.len()));
                ui.separator();
                let best = history
                    .best_time_s()
                    .map_or_else(|| TIME_PLACEHOLDER.to_string(), format_seconds);
                ui.label(format!("Best time: {}", best));
            });
            ui.separator();

            TableBuilder::new(ui)
                .striped(true)
                .column(Column::auto().at_least(50.))
                .column(Column::auto().at_least(80.))
                .column(Column::remainder())
                .header(TABLE_HEADER_HEIGHT, |mut header| {
                    header.col(|ui| {
                        ui.strong("Run");
                    });
                    header.col(|ui| {
                        ui.strong("Time");
                    });
                    header.col(|ui| {
                        ui.strong("Completed");
                    });
                })
                .body(|mut body| {
                    if history.is_empty() {
                        body.row(TABLE_ROW_HEIGHT, |mut row| {
                            row.col(|ui| {
                                ui.label(TIME_PLACEHOLDER);
                            });
                            row.col(|ui| {
                                ui.label(TIME_PLACEHOLDER);
                            });
                            row.col(|ui| {
                                ui.label("Waiting for the first run...");
                            });
                        });
                        return;
                    }
                    for (index, run) in history.iter().enumerate() {
                        // every row holding the session record gets marked,
                        // ties included; the newest row reads slightly bolder
                        let is_best = history.is_best_time(run.elapsed_s);
                        let is_newest = index == 0;
                        let cell = |text: String| {
                            let mut text = RichText::new(text);
                            if is_best {
                                text = text.color(PALETTE_GREEN);
                            }
                            if is_newest {
                                text = text.strong();
                            }
                            text
                        };
                        body.row(TABLE_ROW_HEIGHT, |mut row| {
                            row.col(|ui| {
                                ui.label(cell(format!("#{}", run.number)));
                            });
                            row.col(|ui| {
                                ui.label(cell(format_seconds(run.elapsed_s)));
                            });
                            row.col(|ui| {
                                ui.label(cell(run.completed_at.clone()));
                            });
                        });
                    }
                });
        });
    }
}
