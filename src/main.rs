use std::sync::Arc;

use eframe::egui;
use tracing::info;

use gym_tracker::config::AppConfig;
use gym_tracker::logging::init_logging;
use gym_tracker::session::HttpIdentityClient;
use gym_tracker::storage::{FileStore, SharedStore};
use gym_tracker::store::SystemClock;
use gym_tracker::ui::TrackerApp;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::load();
    init_logging(&config.log)?;

    let data_file = config.data_file();
    info!(path = %data_file.display(), backend = %config.backend_url, "starting");

    let slot: SharedStore = Arc::new(FileStore::open(data_file));
    let client = Arc::new(HttpIdentityClient::new(
        config.userinfo_url.clone(),
        config.backend_url.clone(),
    ));
    let access_token = config.access_token.clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Gym Workout Tracker",
        options,
        Box::new(move |cc| {
            Ok(Box::new(TrackerApp::new(
                cc,
                slot,
                Arc::new(SystemClock),
                client,
                access_token,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("ui exited with error: {e}"))
}
