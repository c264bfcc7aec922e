use std::sync::Arc;

use eframe::egui::{self, Align2, Color32, RichText, TextEdit, Ui};
use egui_extras::{Column, TableBuilder};
use tracing::error;

use crate::confirm::DeleteGate;
use crate::filter::JobSearch;
use crate::form::{FormController, SubmitOutcome};
use crate::models::{JobDraft, JobRecord, JobSchedule, JobStatus, RecordId};
use crate::storage::SharedStore;
use crate::store::{Clock, RecordStore};
use crate::ui::style::{badge, schedule_colors, status_colors};

enum RowAction {
    Edit(JobRecord),
    Delete(RecordId),
}

pub struct JobsPanel {
    store: RecordStore<JobRecord>,
    form: FormController<JobDraft>,
    delete: DeleteGate,
    search: JobSearch,
    save_error: Option<String>,
}

impl JobsPanel {
    pub fn new(slot: SharedStore, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: RecordStore::load(slot, clock),
            form: FormController::new(),
            delete: DeleteGate::new(),
            search: JobSearch::default(),
            save_error: None,
        }
    }

    pub fn show(&mut self, ctx: &egui::Context, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.heading("Job Applications");
            if !self.form.is_open() && ui.button("+ Add Job").clicked() {
                self.form.open_create();
            }
        });
        ui.label(format!("{} applications tracked", self.store.len()));
        ui.add_space(10.0);

        if let Some(message) = &self.save_error {
            ui.colored_label(Color32::LIGHT_RED, message.as_str());
        }

        if self.form.is_open() {
            ui.group(|ui| self.show_form(ui));
            ui.add_space(10.0);
        }

        ui.horizontal(|ui| {
            ui.label("Search");
            ui.add(
                TextEdit::singleline(&mut self.search.query)
                    .hint_text("Company, position or location"),
            );
        });
        ui.add_space(10.0);

        let visible: Vec<JobRecord> = self
            .search
            .apply(self.store.list())
            .into_iter()
            .cloned()
            .collect();

        if visible.is_empty() {
            ui.label(RichText::new("No jobs found").size(20.0).strong());
            ui.label(if self.store.is_empty() {
                "Add your first job application to get started!"
            } else {
                "Try a different search term"
            });
        } else {
            match jobs_table(ui, &visible) {
                Some(RowAction::Edit(job)) => self.form.open_edit(&job),
                Some(RowAction::Delete(id)) => self.delete.request(id),
                None => {}
            }
        }

        self.show_delete_confirm(ctx);
    }

    fn show_form(&mut self, ui: &mut Ui) {
        let editing = self.form.target().is_some();
        let mut submit = false;
        let mut cancel = false;

        let Some(draft) = self.form.draft_mut() else {
            return;
        };

        ui.heading(if editing { "Edit Job" } else { "Add New Job" });
        egui::Grid::new("job_form_grid")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                text_row(ui, "Company *", &mut draft.company, "e.g., Google");
                text_row(ui, "Position *", &mut draft.position, "e.g., Software Engineer");
                text_row(ui, "Source *", &mut draft.source, "e.g., LinkedIn");
                text_row(ui, "Salary *", &mut draft.salary, "e.g., $120,000");
                text_row(ui, "Location *", &mut draft.location, "e.g., San Francisco, CA");

                ui.label("Schedule");
                egui::ComboBox::from_id_salt("job_form_schedule")
                    .selected_text(draft.schedule.label().to_string())
                    .show_ui(ui, |ui| {
                        for option in JobSchedule::all() {
                            let label = option.label().to_string();
                            ui.selectable_value(&mut draft.schedule, option, label);
                        }
                    });
                ui.end_row();

                ui.label("Status");
                egui::ComboBox::from_id_salt("job_form_status")
                    .selected_text(draft.status.label().to_string())
                    .show_ui(ui, |ui| {
                        for option in JobStatus::all() {
                            let label = option.label().to_string();
                            ui.selectable_value(&mut draft.status, option, label);
                        }
                    });
                ui.end_row();
            });

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            let label = if editing { "Update Job" } else { "Add Job" };
            submit = ui.button(RichText::new(label).strong()).clicked();
            cancel = ui.button("Cancel").clicked();
        });

        if cancel {
            self.form.cancel();
            return;
        }
        if submit {
            match self.form.submit(&mut self.store) {
                Ok(SubmitOutcome::Invalid | SubmitOutcome::Closed) => {}
                Ok(_) => self.save_error = None,
                Err(e) => {
                    error!(error = %e, "could not save job");
                    self.save_error = Some(format!("Could not save job: {e}"));
                }
            }
        }
    }

    fn show_delete_confirm(&mut self, ctx: &egui::Context) {
        if self.delete.pending().is_none() {
            return;
        }

        let mut confirm = false;
        let mut cancel = false;
        egui::Window::new("Confirm Delete")
            .id(egui::Id::new("job_delete_confirm"))
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("Are you sure you want to delete this job application? This action cannot be undone.");
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
                error!(error = %e, "could not delete job");
                self.save_error = Some(format!("Could not delete job: {e}"));
                self.delete.cancel();
            }
        }
    }
}

fn text_row(ui: &mut Ui, label: &str, value: &mut String, hint: &str) {
    ui.label(label);
    ui.add(TextEdit::singleline(value).hint_text(hint));
    ui.end_row();
}

fn jobs_table(ui: &mut Ui, jobs: &[JobRecord]) -> Option<RowAction> {
    let mut action = None;

    TableBuilder::new(ui)
        .striped(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(140.0))
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::remainder())
        .header(24.0, |mut header| {
            for title in [
                "Company", "Position", "Source", "Salary", "Location", "Schedule", "Status", "Actions",
            ] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for job in jobs {
                body.row(28.0, |mut row| {
                    row.col(|ui| {
                        ui.label(RichText::new(&job.company).strong());
                    });
                    row.col(|ui| {
                        ui.label(job.position.as_str());
                    });
                    row.col(|ui| {
                        ui.label(job.source.as_str());
                    });
                    row.col(|ui| {
                        ui.label(job.salary.as_str());
                    });
                    row.col(|ui| {
                        ui.label(job.location.as_str());
                    });
                    row.col(|ui| {
                        ui.label(badge(job.schedule.label(), schedule_colors(&job.schedule)));
                    });
                    row.col(|ui| {
                        ui.label(badge(job.status.label(), status_colors(&job.status)));
                    });
                    row.col(|ui| {
                        if ui.button("Edit").clicked() {
                            action = Some(RowAction::Edit(job.clone()));
                        }
                        if ui.button("Delete").clicked() {
                            action = Some(RowAction::Delete(job.id));
                        }
                    });
                });
            }
        });

    action
}
