use egui::Pos2;
use log::warn;
use serde::{Deserialize, Serialize};

use lapboard::LapboardError;
use lapboard::relay::DEFAULT_RELAY_URL;

const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub(crate) struct WindowPosition {
    pub(crate) x: f32,
    pub(crate) y: f32,
}

impl Default for WindowPosition {
    fn default() -> Self {
        Self { x: 0., y: 0. }
    }
}

impl From<WindowPosition> for Pos2 {
    fn from(value: WindowPosition) -> Self {
        Pos2::new(value.x, value.y)
    }
}

impl From<Pos2> for WindowPosition {
    fn from(value: Pos2) -> Self {
        Self {
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(default)]
pub(crate) struct AppConfig {
    /// Relay endpoint to connect to; the `--url` flag takes precedence.
    pub(crate) relay_url: String,
    /// Where the window sat when the last session ended.
    pub(crate) window_position: WindowPosition,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            relay_url: DEFAULT_RELAY_URL.to_string(),
            window_position: WindowPosition::default(),
        }
    }
}

impl AppConfig {
    /// Load the saved config, or `None` when there is nothing usable on
    /// disk. An unreadable file is reported and treated as absent rather
    /// than blocking startup.
    pub(crate) fn from_local_file() -> Option<Self> {
        let config_path = dirs::config_dir()?.join("lapboard").join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return None;
        }
        let file = match std::fs::File::open(&config_path) {
            Ok(file) => file,
            Err(e) => {
                warn!("could not open config file, using defaults: {}", e);
                return None;
            }
        };
        match serde_json::from_reader(file) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("could not parse config file, using defaults: {}", e);
                None
            }
        }
    }

    pub(crate) fn save(&self) -> Result<(), LapboardError> {
        let config_path = dirs::config_dir()
            .ok_or(LapboardError::NoConfigDir)?
            .join("lapboard")
            .join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            std::fs::create_dir_all(config_path.parent().ok_or(LapboardError::NoConfigDir)?)
                .map_err(|e| LapboardError::ConfigIOError { source: e })?;
        }

        let file = std::fs::File::create(config_path)
            .map_err(|e| LapboardError::ConfigIOError { source: e })?;
        serde_json::to_writer(file, self)
            .map_err(|e| LapboardError::ConfigSerializeError { source: e })
    }
}
