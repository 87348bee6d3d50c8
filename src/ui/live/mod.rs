pub(crate) mod config;
pub(crate) mod timing_view;

use std::{
    sync::mpsc::Receiver,
    time::{Duration, Instant},
};

use config::AppConfig;
use egui::{Color32, Visuals, style::Widgets};
use log::error;

use lapboard::relay::DashboardEvent;
use lapboard::timing::DashboardState;

/// How often the window repaints while idle, so the live clock keeps moving
/// between channel events.
const REFRESH_RATE_MS: u64 = 50;

pub(crate) const PALETTE_BLACK: Color32 = Color32::from_rgb(12, 12, 12);
pub(crate) const PALETTE_GREEN: Color32 = Color32::from_rgb(58, 163, 80);
pub(crate) const PALETTE_RED: Color32 = Color32::from_rgb(178, 52, 42);
pub(crate) const PALETTE_ORANGE: Color32 = Color32::from_rgb(242, 97, 63);

/// The dashboard window.
///
/// Owns the receiving half of the event channel and the whole session state.
/// Every frame drains the channel, applies the events, and renders the
/// current projection, so all mutation happens here on the UI thread.
pub struct LiveTimingApp {
    event_receiver: Receiver<DashboardEvent>,
    state: DashboardState,
    app_config: AppConfig,
}

impl LiveTimingApp {
    pub fn new(
        event_receiver: Receiver<DashboardEvent>,
        app_config: AppConfig,
        cc: &eframe::CreationContext<'_>,
    ) -> Self {
        let default_visuals = Visuals {
            dark_mode: true,
            faint_bg_color: PALETTE_BLACK,
            panel_fill: PALETTE_BLACK,
            button_frame: true,
            widgets: Widgets::dark(),
            striped: true,
            ..Default::default()
        };
        cc.egui_ctx.set_visuals(default_visuals);

        Self {
            event_receiver,
            state: DashboardState::new(),
            app_config,
        }
    }
}

impl eframe::App for LiveTimingApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(e) = self.app_config.save() {
            error!("Error while saving config file: {}", e);
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // drain the channel before rendering; the collector thread never
        // touches the session state directly
        while let Ok(event) = self.event_receiver.try_recv() {
            self.state.apply_event(event, Instant::now());
        }

        // remember where the user left the window for the next session
        if let Some(outer_rect) = ctx.input(|is| is.viewport().outer_rect) {
            self.app_config.window_position = outer_rect.min.into();
        }

        self.timing_view(ctx, _frame);

        // keep the live clock ticking even when no events arrive
        ctx.request_repaint_after(Duration::from_millis(REFRESH_RATE_MS));
    }
}
