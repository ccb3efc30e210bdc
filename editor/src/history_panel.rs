use classicyou_core::abstract_editor::{ActionLogKind, ActionManager};

use crate::actions::EditorContext;

/// Displays the undo/redo history around the cursor.
pub fn show_history(ui: &mut egui::Ui, actions: &ActionManager<EditorContext>) {
    let cursor = actions.cursor();
    let redo_count = actions.history_len() - cursor;

    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new(format!("Undo: {cursor}"))
                .monospace()
                .color(if actions.can_undo() {
                    crate::theme::SUCCESS
                } else {
                    crate::theme::TEXT_MUTED
                }),
        );
        ui.separator();
        ui.label(
            egui::RichText::new(format!("Redo: {redo_count}"))
                .monospace()
                .color(if actions.can_redo() {
                    crate::theme::INFO
                } else {
                    crate::theme::TEXT_MUTED
                }),
        );
    });

    ui.separator();

    let descriptions: Vec<_> = actions.descriptions().collect();
    let (applied, undone) = descriptions.split_at(cursor);

    egui::ScrollArea::vertical()
        .id_salt("history")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            // Furthest redo first so the next one sits right above the cursor
            for desc in undone.iter().rev() {
                history_row(ui, "REDO", crate::theme::INFO, &desc.title);
            }

            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new("▸ current")
                        .monospace()
                        .color(crate::theme::WARNING),
                );
            });

            for desc in applied.iter().rev() {
                history_row(ui, "UNDO", crate::theme::SUCCESS, &desc.title)
                    .on_hover_text(desc.body.as_str());
            }
        });
}

/// Displays the append-only log of pushes, undos and redos, newest last.
pub fn show_action_log(ui: &mut egui::Ui, actions: &ActionManager<EditorContext>) {
    egui::ScrollArea::vertical()
        .id_salt("action_log")
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            for entry in actions.log() {
                let colour = match entry.kind {
                    ActionLogKind::Push => crate::theme::TEXT_SECONDARY,
                    ActionLogKind::Undo => crate::theme::SUCCESS,
                    ActionLogKind::Redo => crate::theme::INFO,
                };
                history_row(ui, entry.kind.label(), colour, &entry.title);
                for line in entry.body.lines() {
                    ui.label(
                        egui::RichText::new(line)
                            .monospace()
                            .color(crate::theme::TEXT_MUTED),
                    );
                }
            }
        });
}

fn history_row(
    ui: &mut egui::Ui,
    tag: &str,
    colour: egui::Color32,
    title: &str,
) -> egui::Response {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 4.0;
        ui.label(egui::RichText::new(tag).monospace().color(colour));
        ui.label(egui::RichText::new(title).monospace());
    })
    .response
}
