use serde::{Deserialize, Serialize};

/// User-editable configuration (ReadOnly by App after load)
/// stored in `config.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    /// How long one detection may run before it counts as an engine failure
    #[serde(default = "default_detection_timeout_ms")]
    pub detection_timeout_ms: u64,
    #[serde(default = "default_seek_step_secs")]
    pub seek_step_secs: f64,
    #[serde(default = "default_toast_ms")]
    pub toast_ms: u64,
    /// Program + leading args of the expression engine. Empty = none.
    #[serde(default)]
    pub engine_command: Vec<String>,
    /// Still image used for detection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    /// TOML file replacing the built-in track list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<String>,
    #[serde(default)]
    pub keys: crate::app::keys::KeyConfig,
}

fn default_detection_timeout_ms() -> u64 {
    5000
}

fn default_seek_step_secs() -> f64 {
    5.0
}

fn default_toast_ms() -> u64 {
    2000
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            detection_timeout_ms: default_detection_timeout_ms(),
            seek_step_secs: default_seek_step_secs(),
            toast_ms: default_toast_ms(),
            engine_command: Vec::new(),
            image_path: None,
            catalog_path: None,
            keys: crate::app::keys::KeyConfig::default(),
        }
    }
}
