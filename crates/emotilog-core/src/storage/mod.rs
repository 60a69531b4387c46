mod config;

pub use config::{CategoryOverride, Config, DisplayConfig, ZoneSetting};

use std::path::PathBuf;

/// Returns the Emotilog data directory, creating it if needed.
///
/// `EMOTILOG_HOME` wins when set. Otherwise `~/.config/emotilog`, or
/// `~/.config/emotilog-dev` with `EMOTILOG_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("EMOTILOG_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("EMOTILOG_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("emotilog-dev")
            } else {
                base_dir.join("emotilog")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
