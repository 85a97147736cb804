use std::fs;
use std::path::{Path, PathBuf};

pub mod user;

pub use user::UserConfig;

pub struct AppConfig;

impl AppConfig {
    pub fn get_config_dir() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let xdg_dir = home.join(".config").join("moodsync");

        // Ensure it exists
        if !xdg_dir.exists() {
            let _ = fs::create_dir_all(&xdg_dir);
        }

        xdg_dir
    }

    pub fn get_config_path() -> PathBuf {
        Self::get_config_dir().join("config.toml")
    }

    /// Load `config.toml`, writing the defaults on first run
    pub fn load() -> UserConfig {
        Self::load_from(&Self::get_config_path())
    }

    pub fn load_from(path: &Path) -> UserConfig {
        if !path.exists() {
            let config = UserConfig::default();
            if let Ok(content) = toml::to_string_pretty(&config) {
                if let Err(e) = fs::write(path, content) {
                    tracing::warn!("Could not write default config to {}: {}", path.display(), e);
                }
            }
            return config;
        }

        match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Invalid {}, using defaults: {}", path.display(), e);
                UserConfig::default()
            }),
            Err(e) => {
                tracing::warn!("Could not read {}: {}", path.display(), e);
                UserConfig::default()
            }
        }
    }

    /// Default `config.toml` contents, for `--generate-config`
    pub fn generate_default() -> String {
        toml::to_string_pretty(&UserConfig::default()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_run_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = AppConfig::load_from(&path);
        assert_eq!(config.detection_timeout_ms, 5000);
        assert!(path.exists());

        let reloaded = AppConfig::load_from(&path);
        assert_eq!(reloaded.toast_ms, 2000);
        assert_eq!(reloaded.keys.detect, "d");
        assert!(reloaded.engine_command.is_empty());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "engine_command = [\"python3\", \"detect.py\"]\nimage_path = \"/tmp/me.jpg\"\n\n[keys]\nquit = \"Q\"\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&path);
        assert_eq!(config.engine_command, vec!["python3", "detect.py"]);
        assert_eq!(config.image_path.as_deref(), Some("/tmp/me.jpg"));
        assert_eq!(config.keys.quit, "Q");
        assert_eq!(config.keys.play_pause, "Space");
        assert_eq!(config.seek_step_secs, 5.0);
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "detection_timeout_ms = \"soon\"").unwrap();
        assert_eq!(AppConfig::load_from(&path).detection_timeout_ms, 5000);
    }

    #[test]
    fn test_generated_default_parses() {
        let text = AppConfig::generate_default();
        let config: UserConfig = toml::from_str(&text).unwrap();
        assert_eq!(config.detection_timeout_ms, 5000);
    }
}
