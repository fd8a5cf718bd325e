use crate::models::{AppTheme, Scale, ViewerSettings};
use directories::ProjectDirs;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const SETTINGS_FILE: &str = "settings.json";

pub fn get_config_dir() -> PathBuf {
    ProjectDirs::from("", "", "docview")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

fn atomic_write(path: &Path, data: &str) -> io::Result<()> {
    let tmp_path = path.with_extension("tmp");

    {
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(data.as_bytes())?;
        file.sync_all()?;
    }

    fs::rename(&tmp_path, path)?;

    Ok(())
}

pub fn load_settings() -> ViewerSettings {
    load_settings_from(&get_config_dir().join(SETTINGS_FILE))
}

/// Reads settings, salvaging what it can from a file that no longer matches
/// the current schema.
pub fn load_settings_from(path: &Path) -> ViewerSettings {
    let Ok(data) = fs::read_to_string(path) else {
        return ViewerSettings::default();
    };

    match serde_json::from_str::<ViewerSettings>(&data) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(path = %path.display(), "corrupted settings, using defaults: {}", e);
            let mut settings = ViewerSettings::default();
            if let Ok(value) = serde_json::from_str::<serde_json::Value>(&data)
                && let Some(obj) = value.as_object()
            {
                if let Some(theme) = obj.get("theme").and_then(|v| v.as_str()) {
                    settings.theme = AppTheme::from(theme);
                }
                if let Some(v) = obj.get("default_scale").and_then(serde_json::Value::as_f64) {
                    settings.default_scale = Scale::nearest(v as f32);
                }
                if let Some(v) = obj.get("page_width").and_then(serde_json::Value::as_u64) {
                    settings.page_width = u32::try_from(v).unwrap_or(settings.page_width);
                }
            }
            settings
        }
    }
}

pub fn save_settings_to(dir: &Path, settings: &ViewerSettings) {
    if let Err(e) = fs::create_dir_all(dir) {
        tracing::error!(dir = %dir.display(), "failed to create config directory: {}", e);
        return;
    }
    let path = dir.join(SETTINGS_FILE);
    match serde_json::to_string_pretty(settings) {
        Ok(data) => {
            if let Err(e) = atomic_write(&path, &data) {
                tracing::error!(path = %path.display(), "failed to save settings: {}", e);
            }
        }
        Err(e) => tracing::error!("failed to serialize settings: {}", e),
    }
}
