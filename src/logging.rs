//! tracing-subscriber bootstrap.
//!
//! `RUST_LOG` wins over the configured filter. Calling `init_logging` more
//! than once is harmless; only the first call installs a subscriber.

use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

static INITIALIZED: OnceLock<()> = OnceLock::new();

/// Crates that are chatty at `info` and below.
const NOISY: &[(&str, &str)] = &[
    ("eframe", "warn"),
    ("egui_glow", "warn"),
    ("egui_winit", "warn"),
    ("winit", "warn"),
    ("wgpu", "warn"),
    ("reqwest", "warn"),
    ("hyper_util", "warn"),
];

fn build_env_filter(level: &str) -> anyhow::Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let mut directives = vec![level.to_string()];
    for (target, lvl) in NOISY {
        directives.push(format!("{target}={lvl}"));
    }
    Ok(EnvFilter::try_new(directives.join(","))?)
}

pub fn init_logging(level: &str) -> anyhow::Result<()> {
    if INITIALIZED.get().is_some() {
        return Ok(());
    }

    let filter = build_env_filter(level)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))?;

    let _ = INITIALIZED.set(());
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_accepts_level_with_overrides() {
        assert!(build_env_filter("debug").is_ok());
    }

    #[test]
    fn init_twice_is_ok() {
        // Another test binary may already own the global subscriber.
        let first = init_logging("info");
        if first.is_ok() {
            assert!(init_logging("info").is_ok());
        }
    }
}
