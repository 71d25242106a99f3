use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use internals_logging::LogSettings;
use serde::Deserialize;

/// Configuration file read when no path is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "offline_internals.ron";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Runs the page as an off-the-record session.
    pub incognito: bool,
    /// JSON file with the host's initial pages, requests and logs.
    pub seed_path: Option<PathBuf>,
    /// Directory that saved dumps are written to.
    pub dump_dir: PathBuf,
    pub logging: LogSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            incognito: false,
            seed_path: None,
            dump_dir: PathBuf::from("dumps"),
            logging: LogSettings::default(),
        }
    }
}

/// Reads the configuration at `path`. A missing file yields the defaults.
pub fn load_config(path: &Path) -> anyhow::Result<AppConfig> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read config {}", path.display()))
        }
    };
    ron::from_str(&content).with_context(|| format!("failed to parse config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use internals_logging::LogDestination;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config(&temp.path().join("absent.ron")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.ron");
        fs::write(
            &path,
            r#"(incognito: true, seed_path: Some("seed.json"), logging: (destination: Both, verbose: true))"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert!(config.incognito);
        assert_eq!(config.seed_path, Some(PathBuf::from("seed.json")));
        assert_eq!(config.dump_dir, PathBuf::from("dumps"));
        assert_eq!(config.logging.destination, LogDestination::Both);
        assert!(config.logging.verbose);
        assert_eq!(config.logging.file, LogSettings::default().file);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.ron");
        fs::write(&path, "(incognito: maybe)").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("config.ron"));
    }
}
