use std::sync::Arc;

use eframe::egui::{self, Align2, Color32, RichText, ScrollArea, TextEdit, Ui};
use tracing::error;

use crate::confirm::DeleteGate;
use crate::filter::{DateWindow, ExerciseFilter, ExerciseStats, MuscleFilter};
use crate::form::{FormController, SubmitOutcome};
use crate::models::{ExerciseDraft, ExerciseRecord, MuscleGroup, RecordId};
use crate::storage::SharedStore;
use crate::store::{Clock, RecordStore};
use crate::ui::style::{badge, group_thousands, muscle_colors};

enum RowAction {
    Edit(ExerciseRecord),
    Delete(RecordId),
}

pub struct WorkoutsPanel {
    store: RecordStore<ExerciseRecord>,
    form: FormController<ExerciseDraft>,
    delete: DeleteGate,
    filter: ExerciseFilter,
    save_error: Option<String>,
}

impl WorkoutsPanel {
    pub fn new(slot: SharedStore, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: RecordStore::load(slot, clock),
            form: FormController::new(),
            delete: DeleteGate::new(),
            filter: ExerciseFilter::default(),
            save_error: None,
        }
    }

    pub fn show(&mut self, ctx: &egui::Context, ui: &mut Ui) {
        let today = self.store.today();
        let visible: Vec<ExerciseRecord> = self
            .filter
            .apply(self.store.list(), today)
            .into_iter()
            .cloned()
            .collect();

        self.show_stats(ui, &visible);
        ui.add_space(20.0);

        if let Some(message) = &self.save_error {
            ui.colored_label(Color32::LIGHT_RED, message.as_str());
        }

        ui.columns(if self.form.is_open() { 2 } else { 1 }, |columns| {
            if self.form.is_open() {
                self.show_form(&mut columns[0]);
                self.show_list(&mut columns[1], &visible);
            } else {
                self.show_list(&mut columns[0], &visible);
            }
        });

        self.show_delete_confirm(ctx);
    }

    fn show_stats(&self, ui: &mut Ui, visible: &[ExerciseRecord]) {
        let stats = ExerciseStats::collect(visible);
        ui.horizontal(|ui| {
            stat_card(ui, "Total Exercises", stats.count.to_string(), None);
            stat_card(ui, "Total Volume", stats.total_volume.to_string(), None);
            stat_card(ui, "Total Weight", group_thousands(stats.total_weight), Some("lbs"));
        });
    }

    fn show_form(&mut self, ui: &mut Ui) {
        let editing = self.form.target().is_some();
        let mut submit = false;
        let mut cancel = false;

        let Some(draft) = self.form.draft_mut() else {
            return;
        };

        ui.horizontal(|ui| {
            ui.heading(if editing { "Edit Exercise" } else { "Add Exercise" });
            if ui.button("Cancel").clicked() {
                cancel = true;
            }
        });
        ui.add_space(10.0);

        ui.label(RichText::new("Exercise Name *").strong());
        ui.add(TextEdit::singleline(&mut draft.name).hint_text("e.g., Bench Press"));

        ui.label(RichText::new("Muscle Group").strong());
        egui::ComboBox::from_id_salt("exercise_form_muscle_group")
            .selected_text(draft.muscle_group.label().to_string())
            .show_ui(ui, |ui| {
                for group in MuscleGroup::all() {
                    let label = group.label().to_string();
                    ui.selectable_value(&mut draft.muscle_group, group, label);
                }
            });

        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label(RichText::new("Sets").strong());
                ui.add(TextEdit::singleline(&mut draft.sets).hint_text("3").desired_width(60.0));
            });
            ui.vertical(|ui| {
                ui.label(RichText::new("Reps").strong());
                ui.add(TextEdit::singleline(&mut draft.reps).hint_text("10").desired_width(60.0));
            });
        });

        ui.label(RichText::new("Weight (lbs)").strong());
        ui.add(TextEdit::singleline(&mut draft.weight).hint_text("0"));

        ui.label(RichText::new("Notes").strong());
        ui.add(
            TextEdit::multiline(&mut draft.notes)
                .hint_text("e.g., Felt strong, good form")
                .desired_rows(3),
        );

        ui.add_space(10.0);
        let submit_label = if editing { "Update Exercise" } else { "Add Exercise" };
        if ui.button(RichText::new(submit_label).strong()).clicked() {
            submit = true;
        }

        if cancel {
            self.form.cancel();
            return;
        }
        if submit {
            match self.form.submit(&mut self.store) {
                Ok(SubmitOutcome::Invalid | SubmitOutcome::Closed) => {}
                Ok(_) => self.save_error = None,
                Err(e) => {
                    error!(error = %e, "could not save exercise");
                    self.save_error = Some(format!("Could not save exercise: {e}"));
                }
            }
        }
    }

    fn show_list(&mut self, ui: &mut Ui, visible: &[ExerciseRecord]) {
        ui.horizontal(|ui| {
            ui.heading("Your Workouts");
            if !self.form.is_open() && ui.button("+ Add Exercise").clicked() {
                self.form.open_create();
            }
        });

        ui.horizontal(|ui| {
            egui::ComboBox::from_label("Muscle Group")
                .selected_text(self.filter.muscle.label().to_string())
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut self.filter.muscle, MuscleFilter::All, "All");
                    for group in MuscleGroup::all() {
                        let label = group.label().to_string();
                        ui.selectable_value(&mut self.filter.muscle, MuscleFilter::Only(group), label);
                    }
                });
            egui::ComboBox::from_label("Time Period")
                .selected_text(self.filter.window.to_string())
                .show_ui(ui, |ui| {
                    for window in DateWindow::ALL {
                        ui.selectable_value(&mut self.filter.window, window, window.to_string());
                    }
                });
        });
        ui.add_space(10.0);

        if visible.is_empty() {
            ui.label(RichText::new("No exercises found").size(20.0).strong());
            ui.label(if self.store.is_empty() {
                "Add your first exercise to get started!"
            } else {
                "Try a different filter"
            });
            return;
        }

        let mut action = None;
        ScrollArea::vertical().auto_shrink([false, true]).show(ui, |ui| {
            for exercise in visible {
                ui.group(|ui| {
                    ui.set_width(ui.available_width());
                    if let Some(a) = exercise_row(ui, exercise) {
                        action = Some(a);
                    }
                });
                ui.add_space(6.0);
            }
        });

        match action {
            Some(RowAction::Edit(record)) => self.form.open_edit(&record),
            Some(RowAction::Delete(id)) => self.delete.request(id),
            None => {}
        }
    }

    fn show_delete_confirm(&mut self, ctx: &egui::Context) {
        if self.delete.pending().is_none() {
            return;
        }

        let mut confirm = false;
        let mut cancel = false;
        egui::Window::new("Confirm Delete")
            .id(egui::Id::new("exercise_delete_confirm"))
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("Are you sure you want to delete this exercise? This action cannot be undone.");
                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    cancel = ui.button("Cancel").clicked();
                    confirm = ui.button(RichText::new("Delete").color(Color32::LIGHT_RED)).clicked();
                });
            });

        if cancel {
            self.delete.cancel();
        } else if confirm {
            if let Err(e) = self.delete.confirm(&mut self.store) {
                error!(error = %e, "could not delete exercise");
                self.save_error = Some(format!("Could not delete exercise: {e}"));
                self.delete.cancel();
            }
        }
    }
}

fn stat_card(ui: &mut Ui, title: &str, value: String, unit: Option<&str>) {
    ui.group(|ui| {
        ui.set_min_width(180.0);
        ui.vertical(|ui| {
            ui.label(RichText::new(title).size(14.0));
            ui.label(RichText::new(value).size(28.0).strong());
            if let Some(unit) = unit {
                ui.label(RichText::new(unit).size(12.0));
            }
        });
    });
}

fn exercise_row(ui: &mut Ui, exercise: &ExerciseRecord) -> Option<RowAction> {
    let mut action = None;
    ui.horizontal(|ui| {
        ui.label(RichText::new(&exercise.name).size(18.0).strong());
        ui.label(badge(exercise.muscle_group.label(), muscle_colors(&exercise.muscle_group)));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Delete").clicked() {
                action = Some(RowAction::Delete(exercise.id));
            }
            if ui.button("Edit").clicked() {
                action = Some(RowAction::Edit(exercise.clone()));
            }
        });
    });

    ui.horizontal(|ui| {
        ui.label(format!("Sets: {}", exercise.sets));
        ui.separator();
        ui.label(format!("Reps: {}", exercise.reps));
        ui.separator();
        ui.label(format!("Weight: {} lbs", exercise.weight));
        ui.separator();
        ui.label(format!("Volume: {}", exercise.volume()));
    });

    if !exercise.notes.is_empty() {
        ui.label(RichText::new(&exercise.notes).italics());
    }
    ui.label(RichText::new(exercise.date.format("%b %-d, %Y").to_string()).size(12.0));
    action
}
