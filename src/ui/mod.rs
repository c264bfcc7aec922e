//! egui presentation layer.
//!
//! The app asks the session gate which route to show on every frame, so
//! clearing the token anywhere sends the user back to the login screen.

mod jobs;
mod login;
mod style;
mod workouts;

use std::sync::Arc;
use std::time::Duration;

use eframe::{egui, App, CreationContext, Frame};
use egui::{Align, Layout, RichText};
use tracing::{error, info};

use crate::session::{IdentityClient, Route, SessionGate, SignInFlow};
use crate::storage::SharedStore;
use crate::store::Clock;

pub use jobs::JobsPanel;
pub use login::LoginView;
pub use workouts::WorkoutsPanel;

#[derive(PartialEq, Clone, Copy, Debug)]
enum DisplayMode {
    Workouts,
    Jobs,
}

pub struct TrackerApp {
    gate: SessionGate,
    client: Arc<dyn IdentityClient>,
    sign_in: SignInFlow,
    login: LoginView,
    display_mode: DisplayMode,
    workouts: WorkoutsPanel,
    jobs: JobsPanel,
}

impl TrackerApp {
    pub fn new(
        cc: &CreationContext,
        slot: SharedStore,
        clock: Arc<dyn Clock>,
        client: Arc<dyn IdentityClient>,
        access_token: Option<String>,
    ) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        let mut style = (*cc.egui_ctx.style()).clone();
        style.text_styles.insert(
            egui::TextStyle::Body,
            egui::FontId::new(16.0, egui::FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Heading,
            egui::FontId::new(24.0, egui::FontFamily::Proportional),
        );
        cc.egui_ctx.set_style(style);

        TrackerApp {
            gate: SessionGate::new(slot.clone()),
            client,
            sign_in: SignInFlow::default(),
            login: LoginView::new(access_token),
            display_mode: DisplayMode::Workouts,
            workouts: WorkoutsPanel::new(slot.clone(), clock.clone()),
            jobs: JobsPanel::new(slot, clock),
        }
    }

    fn show_header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui
                .selectable_label(self.display_mode == DisplayMode::Workouts, "Workouts")
                .clicked()
            {
                self.display_mode = DisplayMode::Workouts;
            }
            if ui
                .selectable_label(self.display_mode == DisplayMode::Jobs, "Jobs")
                .clicked()
            {
                self.display_mode = DisplayMode::Jobs;
            }

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.button("Logout").clicked() {
                    if let Err(e) = self.gate.logout() {
                        error!(error = %e, "failed to clear session");
                    }
                }
                if let Some(name) = self.gate.display_name() {
                    ui.label(RichText::new(format!("Hi, {name}")).strong());
                }
            });
        });
    }
}

impl App for TrackerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        if self.sign_in.poll(&self.gate) == Some(Route::Dashboard) {
            info!("entering dashboard");
            self.display_mode = DisplayMode::Workouts;
        }
        if self.sign_in.is_loading() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        match self.gate.route() {
            Route::Login => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    self.login.show(ui, &mut self.sign_in, &self.client);
                });
            }
            Route::Dashboard => {
                egui::TopBottomPanel::top("header").show(ctx, |ui| {
                    ui.add_space(6.0);
                    self.show_header(ui);
                    ui.add_space(6.0);
                });
                egui::CentralPanel::default().show(ctx, |ui| match self.display_mode {
                    DisplayMode::Workouts => {
                        ui.label(RichText::new("Gym Workout Tracker").heading().size(32.0).strong());
                        ui.label("Track your exercises and monitor your progress");
                        ui.add_space(16.0);
                        self.workouts.show(ctx, ui);
                    }
                    DisplayMode::Jobs => self.jobs.show(ctx, ui),
                });
            }
        }
    }
}
