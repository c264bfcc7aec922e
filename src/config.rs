//! Runtime configuration.
//!
//! Values come from command-line flags, then environment variables, then a
//! `.env` file in the working directory, then built-in defaults.

use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "gym_tracker", version, about = "Track gym workouts and job applications")]
pub struct AppConfig {
    /// Base URL of the backend that issues session tokens
    #[arg(long, env = "GYM_TRACKER_BACKEND_URL", default_value = DEFAULT_BACKEND_URL)]
    pub backend_url: String,

    /// Identity provider profile endpoint
    #[arg(long, env = "GYM_TRACKER_USERINFO_URL", default_value = DEFAULT_USERINFO_URL)]
    pub userinfo_url: String,

    /// File holding all locally stored data
    #[arg(long, env = "GYM_TRACKER_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Log filter, e.g. "info" or "gym_tracker=debug"
    #[arg(long, env = "GYM_TRACKER_LOG", default_value = "info")]
    pub log: String,

    /// Provider access token used to prefill the sign-in form
    #[arg(long, env = "GYM_TRACKER_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,
}

impl AppConfig {
    /// Reads `.env` (if present) and parses the process arguments.
    pub fn load() -> Self {
        let _ = dotenvy::dotenv();
        Self::parse()
    }

    pub fn data_file(&self) -> PathBuf {
        self.data_file.clone().unwrap_or_else(default_data_file)
    }
}

fn default_data_file() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gym_tracker")
        .join("storage.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let config = AppConfig::try_parse_from([
            "gym_tracker",
            "--backend-url",
            "https://api.example.test",
            "--data-file",
            "/tmp/gym.json",
        ])
        .unwrap();

        assert_eq!(config.backend_url, "https://api.example.test");
        assert_eq!(config.data_file(), PathBuf::from("/tmp/gym.json"));
    }

    #[test]
    fn default_data_file_is_namespaced() {
        let path = default_data_file();
        assert!(path.ends_with("gym_tracker/storage.json"));
    }
}
