use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_public_root")]
    pub public_root: PathBuf,
    #[serde(default = "default_bind_address")]
    pub bind_address: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
    #[serde(default = "default_error_color")]
    pub error_color: String,
    #[serde(default)]
    pub word_list: Option<PathBuf>,
    #[serde(default = "default_sound_enabled")]
    pub sound_enabled: bool,
    #[serde(default = "default_speech_enabled")]
    pub speech_enabled: bool,
    #[serde(default = "default_speech_command")]
    pub speech_command: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_public_root() -> PathBuf {
    PathBuf::from("public")
}
fn default_bind_address() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}
fn default_port() -> u16 {
    3000
}
fn default_palette() -> Vec<String> {
    [
        "#FF9AA2", "#FFB7B2", "#FFDAC1", "#E2F0CB", "#B5EAD7", "#C7CEEA", "#E8E8E4", "#F2D5F8",
    ]
    .iter()
    .map(|c| c.to_string())
    .collect()
}
fn default_error_color() -> String {
    "#FFCDD2".to_string()
}
fn default_sound_enabled() -> bool {
    true
}
fn default_speech_enabled() -> bool {
    true
}
fn default_speech_command() -> String {
    "espeak".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            public_root: default_public_root(),
            bind_address: default_bind_address(),
            port: default_port(),
            palette: default_palette(),
            error_color: default_error_color(),
            word_list: None,
            sound_enabled: default_sound_enabled(),
            speech_enabled: default_speech_enabled(),
            speech_command: default_speech_command(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// A missing file is not an error; it yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path();
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("kidkeys")
            .join("config.toml")
    }

    pub fn log_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("kidkeys")
    }

    pub fn audio_dir(&self) -> PathBuf {
        self.public_root.join("audio")
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }

    /// Drops palette entries that are not `#rrggbb`, restoring the default
    /// palette if nothing usable is left.
    pub fn normalize_palette(&mut self) {
        self.palette.retain(|c| crate::ui::theme::parse_hex(c).is_some());
        if self.palette.is_empty() {
            self.palette = default_palette();
        }
        if crate::ui::theme::parse_hex(&self.error_color).is_none() {
            self.error_color = default_error_color();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.public_root, PathBuf::from("public"));
        assert_eq!(config.palette.len(), 8);
        assert!(config.word_list.is_none());
        assert!(config.sound_enabled);
        assert_eq!(config.speech_command, "espeak");
    }

    #[test]
    fn test_config_partial_file() {
        let toml_str = r#"
port = 8080
public_root = "/srv/kidkeys"
word_list = "/home/kid/words.json"
speech_enabled = false
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.audio_dir(), PathBuf::from("/srv/kidkeys/audio"));
        assert_eq!(config.word_list, Some(PathBuf::from("/home/kid/words.json")));
        assert!(!config.speech_enabled);
        assert_eq!(config.error_color, "#FFCDD2");
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.palette, deserialized.palette);
        assert_eq!(config.socket_addr(), deserialized.socket_addr());
    }

    #[test]
    fn test_normalize_palette_drops_bad_entries() {
        let mut config = Config::default();
        config.palette = vec!["#000000".to_string(), "pink".to_string()];
        config.error_color = "red".to_string();
        config.normalize_palette();
        assert_eq!(config.palette, vec!["#000000".to_string()]);
        assert_eq!(config.error_color, "#FFCDD2");
    }

    #[test]
    fn test_normalize_palette_empty_resets() {
        let mut config = Config::default();
        config.palette = vec!["nope".to_string()];
        config.normalize_palette();
        assert_eq!(config.palette.len(), 8);
    }

    #[test]
    fn test_save_then_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        assert_eq!(Config::load_from(&path).unwrap().port, 3000);

        let mut config = Config::default();
        config.port = 8123;
        config.public_root = PathBuf::from("/srv/toy");
        config.word_list = Some(PathBuf::from("words.json"));
        config.speech_command = "say -v Samantha".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.port, 8123);
        assert_eq!(loaded.public_root, PathBuf::from("/srv/toy"));
        assert_eq!(loaded.word_list, Some(PathBuf::from("words.json")));
        assert_eq!(loaded.speech_command, "say -v Samantha");
    }

    #[test]
    fn test_load_from_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "port = \"not a number\"").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
