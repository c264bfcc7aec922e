use std::sync::Arc;

use eframe::egui::{self, Button, Color32, RichText, TextEdit, Ui};

use crate::session::{IdentityClient, SignInFlow};

/// Sign-in screen. The provider access token is pasted in or prefilled
/// from configuration.
pub struct LoginView {
    access_token: String,
}

impl LoginView {
    pub fn new(access_token: Option<String>) -> Self {
        Self {
            access_token: access_token.unwrap_or_default(),
        }
    }

    pub fn show(&mut self, ui: &mut Ui, flow: &mut SignInFlow, client: &Arc<dyn IdentityClient>) {
        ui.vertical_centered(|ui| {
            ui.add_space(120.0);
            ui.label(RichText::new("Gym Workout Tracker").heading().size(36.0).strong());
            ui.add_space(10.0);
            ui.label("Sign in with your Google account to continue");
            ui.add_space(30.0);

            ui.add(
                TextEdit::singleline(&mut self.access_token)
                    .password(true)
                    .hint_text("Google access token")
                    .desired_width(320.0),
            );
            ui.add_space(10.0);

            let loading = flow.is_loading();
            let label = if loading { "Signing in..." } else { "Sign in with Google" };
            let button = Button::new(RichText::new(label).size(18.0)).min_size(egui::vec2(320.0, 36.0));
            if ui.add_enabled(!loading, button).clicked() {
                flow.start(Arc::clone(client), self.access_token.clone());
            }

            if let Some(message) = flow.error() {
                ui.add_space(10.0);
                ui.colored_label(Color32::LIGHT_RED, message);
            }
        });
    }
}
