//! Modal windows driven by the current check-in phase.

use eframe::egui::{self, Align, Align2, Color32, Layout, RichText, Ui};
use egui_phosphor::regular::{CHECK_CIRCLE, QR_CODE, WARNING, X_CIRCLE};

use super::app::CheckInApp;
use super::components::{colors, danger_button, primary_button_with_icon};
use crate::checkin::{AdmitOrigin, Event, Phase};
use crate::models::{Admission, Guest, Verdict};

/// Render the window for the current phase, if it has one.
pub fn show(app: &mut CheckInApp, ctx: &egui::Context) {
    let event = match app.state.phase().clone() {
        Phase::Idle => None,
        Phase::Scanning => show_scanner(app, ctx),
        Phase::Pending { origin, .. } => {
            let text = match origin {
                AdmitOrigin::Scan => "Verifica del codice in corso...",
                AdmitOrigin::Manual => "Registrazione ingresso in corso...",
            };
            show_busy(ctx, text);
            None
        }
        Phase::Removing(guest) => {
            show_busy(ctx, &format!("Rimozione presenza di {}...", guest.full_name()));
            None
        }
        Phase::Scanned(verdict) => show_verdict(ctx, &verdict, true),
        Phase::Dismissing(verdict) => show_verdict(ctx, &verdict, false),
        Phase::ConfirmAdmit(guest) => show_confirm_admit(ctx, &guest),
        Phase::ConfirmRemove(guest) => show_confirm_remove(ctx, &guest),
        Phase::Notice(message) => show_message(ctx, "Fatto", &message, colors::SUCCESS, "OK"),
        Phase::Error(err) => show_message(
            ctx,
            "Errore",
            &format!("Errore: {}", err.message()),
            colors::ERROR,
            "Chiudi",
        ),
    };

    if let Some(event) = event {
        app.dispatch(event);
    }
}

fn modal(title: &str) -> egui::Window<'_> {
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .min_width(320.0)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
}

/// Scanner input: the reader types the payload and presses Enter.
fn show_scanner(app: &mut CheckInApp, ctx: &egui::Context) -> Option<Event> {
    let mut event = None;

    modal("Scansione").show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(QR_CODE).size(64.0));
            ui.label("Inquadra il codice QR con il lettore");
        });
        ui.add_space(10.0);

        let response = ui.add(
            egui::TextEdit::singleline(&mut app.scan_input)
                .desired_width(f32::INFINITY)
                .hint_text("oppure incolla il link del biglietto"),
        );
        // Enter makes a single-line edit drop focus; check before grabbing it back.
        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        response.request_focus();

        if submitted && !app.scan_input.trim().is_empty() {
            event = Some(Event::CodeDetected(std::mem::take(&mut app.scan_input)));
        }

        ui.add_space(10.0);
        ui.horizontal(|ui| {
            if ui.button("Annulla").clicked() || ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                event = Some(Event::Cancel);
            }
        });
    });

    event
}

fn show_busy(ctx: &egui::Context, text: &str) {
    modal("Attendere").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(text);
        });
    });
}

fn admission_icon(admission: Admission) -> (&'static str, Color32) {
    match admission {
        Admission::AlreadyEntered => (WARNING, colors::WARNING),
        Admission::Allowed => (CHECK_CIRCLE, colors::SUCCESS),
        Admission::Denied => (X_CIRCLE, colors::ERROR),
    }
}

/// Verdict screen. `interactive` is false while the closed verdict fades out.
fn show_verdict(ctx: &egui::Context, verdict: &Verdict, interactive: bool) -> Option<Event> {
    let mut event = None;
    let admission = verdict.admission();
    let (icon, color) = admission_icon(admission);

    modal("Esito").show(ctx, |ui| {
        if !interactive {
            ui.disable();
            ui.set_opacity(0.5);
        }

        ui.vertical_centered(|ui| {
            ui.label(RichText::new(&verdict.name).size(30.0).strong());
            ui.label(RichText::new(verdict.age_label()).size(20.0));
            ui.label(RichText::new(icon).size(120.0).color(color));
            ui.label(RichText::new(admission.label()).size(25.0).strong());
        });

        ui.add_space(15.0);
        if primary_button_with_icon(ui, QR_CODE, "Scannerizza un nuovo codice").clicked() {
            event = Some(Event::ScanAgain);
        }
        ui.add_space(6.0);
        ui.vertical_centered(|ui| {
            if ui.button("Chiudi").clicked() {
                event = Some(Event::Close);
            }
        });
    });

    event
}

fn guest_summary(ui: &mut Ui, guest: &Guest) {
    egui::Grid::new("guest_summary_grid")
        .num_columns(2)
        .spacing([20.0, 6.0])
        .show(ui, |ui| {
            ui.label("Età:");
            ui.label(guest.age_label());
            ui.end_row();

            ui.label("Classe:");
            ui.label(if guest.class_label.is_empty() { "-" } else { guest.class_label.as_str() });
            ui.end_row();

            ui.label("Pagamento:");
            if guest.paid {
                ui.colored_label(colors::SUCCESS, "Pagato");
            } else {
                ui.colored_label(colors::ERROR, "Non pagato");
            }
            ui.end_row();
        });
}

fn confirm_buttons(ui: &mut Ui, confirm_text: &str) -> Option<Event> {
    let mut event = None;
    ui.horizontal(|ui| {
        if ui.button("Annulla").clicked() {
            event = Some(Event::Cancel);
        }
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if danger_button(ui, confirm_text).clicked() {
                event = Some(Event::Confirm);
            }
        });
    });
    event
}

fn show_confirm_admit(ctx: &egui::Context, guest: &Guest) -> Option<Event> {
    let mut event = None;
    modal("Conferma ingresso").show(ctx, |ui| {
        ui.label(RichText::new(format!("Segnare {} come presente?", guest.full_name())).size(18.0));
        ui.add_space(8.0);
        guest_summary(ui, guest);
        ui.add_space(12.0);
        event = confirm_buttons(ui, "Conferma ingresso");
    });
    event
}

fn show_confirm_remove(ctx: &egui::Context, guest: &Guest) -> Option<Event> {
    let mut event = None;
    modal("Rimuovi presenza").show(ctx, |ui| {
        ui.label(RichText::new(format!("Rimuovere la presenza di {}?", guest.full_name())).size(18.0));
        ui.add_space(12.0);
        event = confirm_buttons(ui, "Rimuovi");
    });
    event
}

fn show_message(ctx: &egui::Context, title: &str, message: &str, color: Color32, button: &str) -> Option<Event> {
    let mut event = None;
    modal(title).show(ctx, |ui| {
        ui.colored_label(color, RichText::new(message).size(18.0));
        ui.add_space(10.0);
        if ui.button(button).clicked() {
            event = Some(Event::Acknowledge);
        }
    });
    event
}
