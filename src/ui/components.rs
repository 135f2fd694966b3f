//! Shared UI components.

use eframe::egui::{self, Align, Color32, Layout, Response, RichText, Sense, StrokeKind, Ui};

use crate::models::Guest;

/// Status indicator colors.
pub mod colors {
    use super::Color32;

    pub const SUCCESS: Color32 = Color32::from_rgb(60, 170, 80);
    pub const ERROR: Color32 = Color32::from_rgb(220, 70, 70);
    pub const WARNING: Color32 = Color32::from_rgb(230, 190, 40);
    /// Action buttons.
    pub const ACCENT: Color32 = Color32::from_rgb(255, 144, 0);
}

/// Install the Phosphor icon font next to the default fonts.
pub fn install_icon_font(ctx: &egui::Context) {
    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
    ctx.set_fonts(fonts);
}

/// Large orange action button spanning the available width.
pub fn primary_button_with_icon(ui: &mut Ui, icon: &str, text: &str) -> Response {
    let label = RichText::new(format!("{icon}  {text}")).size(20.0).color(Color32::WHITE);
    ui.add_sized(
        [ui.available_width(), 56.0],
        egui::Button::new(label)
            .fill(colors::ACCENT)
            .corner_radius(egui::CornerRadius::same(10)),
    )
}

/// Regular button with a leading icon.
pub fn styled_button_with_icon(ui: &mut Ui, icon: &str, text: &str) -> Response {
    ui.button(RichText::new(format!("{icon} {text}")).size(14.0))
}

/// Red confirm button for actions that change server state.
pub fn danger_button(ui: &mut Ui, text: &str) -> Response {
    ui.add(egui::Button::new(RichText::new(text).color(Color32::WHITE).strong()).fill(colors::ERROR))
}

/// Bold section title, as used for the roster sections.
pub fn section_header(ui: &mut Ui, title: &str, count: usize) {
    ui.add_space(8.0);
    ui.horizontal(|ui| {
        ui.label(RichText::new(title).size(28.0).strong());
        ui.label(RichText::new(format!("({count})")).size(18.0).weak());
    });
    ui.separator();
}

/// Widget id of a guest's roster row.
pub fn guest_row_id(guest: &Guest) -> egui::Id {
    egui::Id::new(("guest_row", &guest.id))
}

/// Clickable roster row: name, age label and class on the left, payment on the right.
pub fn guest_row(ui: &mut Ui, guest: &Guest) -> Response {
    let response = egui::Frame::new()
        .inner_margin(egui::Margin::symmetric(10, 6))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new(guest.full_name()).size(18.0));
                    let detail = if guest.class_label.is_empty() {
                        guest.age_label().to_string()
                    } else {
                        format!("{} · {}", guest.age_label(), guest.class_label)
                    };
                    ui.label(RichText::new(detail).weak());
                });
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    let (color, text) = if guest.paid {
                        (colors::SUCCESS, "Pagato")
                    } else {
                        (colors::ERROR, "Non pagato")
                    };
                    ui.colored_label(color, text);
                });
            });
        })
        .response;
    let response = ui
        .interact(response.rect, guest_row_id(guest), Sense::click())
        .on_hover_cursor(egui::CursorIcon::PointingHand);

    if response.hovered() {
        ui.painter().rect_stroke(
            response.rect,
            4.0,
            ui.visuals().widgets.hovered.bg_stroke,
            StrokeKind::Inside,
        );
    }

    response
}
