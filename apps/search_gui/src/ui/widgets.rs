//! Result cards, tag pills and loading placeholders.

use eframe::egui;
use shared::domain::{ResultGroup, SearchResult};

pub const SKELETON_CARDS: usize = 5;

const CARD_RADIUS: u8 = 10;

fn card_frame(ui: &egui::Ui) -> egui::Frame {
    egui::Frame::NONE
        .fill(ui.visuals().faint_bg_color)
        .corner_radius(egui::CornerRadius::same(CARD_RADIUS))
        .stroke(egui::Stroke::new(
            1.0,
            ui.visuals().widgets.noninteractive.bg_stroke.color,
        ))
        .inner_margin(egui::Margin::symmetric(14, 12))
}

pub fn skeleton_card(ui: &mut egui::Ui) {
    let fill = ui.visuals().widgets.inactive.bg_fill.gamma_multiply(0.6);
    card_frame(ui).show(ui, |ui| {
        let width = ui.available_width();
        for (fraction, height) in [(0.45, 18.0), (0.9, 12.0), (0.75, 12.0)] {
            let (rect, _) =
                ui.allocate_exact_size(egui::vec2(width * fraction, height), egui::Sense::hover());
            ui.painter()
                .rect_filled(rect, egui::CornerRadius::same(4), fill);
            ui.add_space(4.0);
        }
    });
}

pub fn tag_pill(ui: &mut egui::Ui, tag: &str) {
    egui::Frame::NONE
        .fill(ui.visuals().selection.bg_fill.gamma_multiply(0.35))
        .corner_radius(egui::CornerRadius::same(8))
        .inner_margin(egui::Margin::symmetric(6, 2))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(tag).small());
        });
}

pub fn result_card(ui: &mut egui::Ui, group: &ResultGroup) {
    card_frame(ui).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(egui::RichText::new(&group.title).strong().size(18.0));
        for (index, item) in group.items.iter().enumerate() {
            if index > 0 {
                ui.separator();
            }
            result_item(ui, item);
        }
    });
}

fn result_item(ui: &mut egui::Ui, item: &SearchResult) {
    if let Some(score) = item.score {
        ui.weak(format!("Score: {score}"));
    }
    if let Some(plot) = item.plot.as_deref().filter(|p| !p.is_empty()) {
        ui.label(format!("Plot: {plot}"));
    }
    if let Some(snippet) = item.snippet.as_deref().filter(|s| !s.is_empty()) {
        ui.label(snippet);
    }
    if !item.tag_slice().is_empty() {
        ui.horizontal_wrapped(|ui| {
            for tag in item.tag_slice() {
                tag_pill(ui, tag);
            }
        });
    }
    if let Some(source) = item.source.as_deref().filter(|s| !s.is_empty()) {
        ui.weak(format!("Source: {source}"));
    }
}
