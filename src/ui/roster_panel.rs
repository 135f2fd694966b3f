//! Sectioned guest list.

use eframe::egui::{ScrollArea, Ui};

use super::components::{guest_row, section_header};
use crate::checkin::{Event, ScreenState};

/// Show both roster sections, filtered by `search`.
///
/// Returns `Some(Event::SelectGuest)` when a row was clicked.
pub fn show(state: &ScreenState, search: &str, ui: &mut Ui) -> Option<Event> {
    let roster = state.roster.roster();
    let mut selected = None;

    if roster.is_empty() {
        ui.add_space(20.0);
        ui.vertical_centered(|ui| {
            if state.roster.is_refreshing() {
                ui.spinner();
                ui.label("Caricamento lista...");
            } else {
                ui.weak("Nessun ospite in lista");
            }
        });
        return None;
    }

    ScrollArea::vertical().id_salt("roster_scroll").show(ui, |ui| {
        for (title, guests) in roster.sections() {
            let visible: Vec<_> = guests.iter().filter(|g| g.matches(search)).collect();
            section_header(ui, title, visible.len());

            if visible.is_empty() {
                ui.weak("Nessuno");
            }
            for guest in visible {
                if guest_row(ui, guest).clicked() {
                    selected = Some(Event::SelectGuest(guest.clone()));
                }
            }
        }
        ui.add_space(20.0);
    });

    selected
}
