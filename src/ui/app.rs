//! Check-in screen application state and event loop.

use std::sync::Arc;
use std::time::Duration;

use eframe::egui::{self, Align, Layout, RichText};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, QR_CODE};
use tokio::sync::mpsc;

use crate::checkin::{Command, Event, Phase, ScreenState, effects};
use crate::client::GuestService;
use crate::config::AppConfig;
use crate::error::Result;
use crate::scan::CodeMatcher;

use super::components::{self, colors, primary_button_with_icon, styled_button_with_icon};
use super::{dialogs, roster_panel};

/// Main application state.
pub struct CheckInApp {
    // Runtime and remote service
    rt: tokio::runtime::Runtime,
    service: Arc<dyn GuestService>,
    ctx: egui::Context,

    // Results from background tasks
    tx: mpsc::UnboundedSender<Event>,
    rx: mpsc::UnboundedReceiver<Event>,

    pub state: ScreenState,

    // Text buffers owned by the UI
    pub scan_input: String,
    pub search: String,
}

impl CheckInApp {
    pub fn new(
        ctx: &egui::Context,
        service: Arc<dyn GuestService>,
        config: &AppConfig,
        rt: tokio::runtime::Runtime,
    ) -> Result<Self> {
        components::install_icon_font(ctx);

        let (tx, rx) = mpsc::unbounded_channel();
        let matcher = CodeMatcher::new(config.service.base())?;
        let state = ScreenState::new(matcher, Duration::from_millis(config.scan.dismiss_delay_ms));

        let mut app = Self {
            rt,
            service,
            ctx: ctx.clone(),
            tx,
            rx,
            state,
            scan_input: String::new(),
            search: String::new(),
        };

        // Load initial roster
        app.dispatch(Event::Refresh);

        Ok(app)
    }

    /// Feed an event to the state machine and start the commands it returns.
    pub fn dispatch(&mut self, event: Event) {
        if matches!(event, Event::StartScan | Event::ScanAgain) {
            self.scan_input.clear();
        }
        for command in self.state.reduce(event) {
            self.spawn(command);
        }
    }

    fn spawn(&self, command: Command) {
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        let ctx = self.ctx.clone();

        self.rt.spawn(async move {
            let event = effects::execute(service.as_ref(), command).await;
            let _ = tx.send(event);
            ctx.request_repaint();
        });
    }

    /// Drain results delivered by background tasks.
    fn poll_async_results(&mut self) {
        while let Ok(event) = self.rx.try_recv() {
            self.dispatch(event);
        }
    }

    /// Render header with title, counters and refresh control.
    fn show_header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label(RichText::new("Lista ospiti").size(26.0).strong());

                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    let refreshing = self.state.roster.is_refreshing();
                    let clicked = ui
                        .add_enabled_ui(!refreshing, |ui| styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Aggiorna"))
                        .inner
                        .clicked();
                    if clicked {
                        self.dispatch(Event::Refresh);
                    }
                    if refreshing {
                        ui.spinner();
                    }
                });
            });

            ui.horizontal(|ui| {
                let roster = self.state.roster.roster();
                ui.label(format!(
                    "Presenti: {} / {} (paganti {})",
                    roster.present().len(),
                    roster.len(),
                    roster.paid_present()
                ));
                if let Some(at) = self.state.roster.last_refresh() {
                    ui.weak(format!("aggiornato alle {}", at.format("%H:%M:%S")));
                }
            });

            if let Some(kind) = self.state.roster.error() {
                ui.colored_label(colors::ERROR, format!("Errore: {}", kind.message()));
            }
            ui.add_space(6.0);
        });
    }

    /// Render the scan button pinned to the bottom.
    fn show_scan_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("scan_bar").show(ctx, |ui| {
            ui.add_space(10.0);
            let enabled = self.state.can_start_scan();
            let clicked = ui
                .add_enabled_ui(enabled, |ui| primary_button_with_icon(ui, QR_CODE, "Scannerizza codice QR"))
                .inner
                .clicked();
            let shortcut = enabled && ui.input(|i| i.key_pressed(egui::Key::F2));
            if clicked || shortcut {
                self.dispatch(Event::StartScan);
            }
            ui.add_space(10.0);
        });
    }

    /// Render search box and roster.
    fn show_roster(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Cerca:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.search)
                        .desired_width(220.0)
                        .hint_text("Nome, classe, email..."),
                );
                if !self.search.is_empty() && ui.button("Pulisci").clicked() {
                    self.search.clear();
                }
            });
            ui.add_space(4.0);

            if let Some(event) = roster_panel::show(&self.state, &self.search, ui) {
                self.dispatch(event);
            }
        });
    }
}

impl eframe::App for CheckInApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll async results
        self.poll_async_results();

        // Keep the dismiss fade and spinners moving
        if self.state.roster.is_refreshing()
            || self.state.pending()
            || matches!(self.state.phase(), Phase::Dismissing(_))
        {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        self.show_header(ctx);
        self.show_scan_bar(ctx);

        // Modal dialogs (scanner, verdict, confirmations, errors)
        dialogs::show(self, ctx);

        self.show_roster(ctx);
    }
}
