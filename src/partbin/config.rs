use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

const CONFIG_FILENAME: &str = "config.json";

/// Configuration for partbin, stored in `<data-dir>/config.json`.
///
/// Every field has a default, so a missing file means a usable setup with
/// no serial device. Creating the file is left to the operator.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PartbinConfig {
    #[serde(default)]
    pub files: FilesConfig,

    #[serde(default)]
    pub serial: SerialConfig,

    #[serde(default)]
    pub strip: StripConfig,

    #[serde(default)]
    pub backup: BackupConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilesConfig {
    /// Catalogue file, relative to the data directory unless absolute.
    #[serde(default = "default_catalogue_file")]
    pub catalogue: PathBuf,

    #[serde(default = "default_changelog_file")]
    pub changelog: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SerialConfig {
    /// Device node of the LED controller (e.g. `/dev/ttyUSB0`). `None`
    /// runs the system with the highlight layer degraded to no-ops.
    #[serde(default)]
    pub port: Option<PathBuf>,

    #[serde(default = "default_baud")]
    pub baud: u32,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StripConfig {
    /// Physical LEDs on the strip; commands outside this range are dropped.
    #[serde(default = "default_num_slots")]
    pub num_slots: usize,

    /// Allocatable bin slots. May exceed `num_slots`: bins past the end of
    /// the strip are real storage, just without a light.
    #[serde(default = "default_max_bins")]
    pub max_bins: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackupConfig {
    #[serde(default = "default_backup_interval")]
    pub interval_secs: u64,

    /// Backups pause while the catalogue has been idle this long.
    #[serde(default = "default_idle_cutoff")]
    pub idle_cutoff_secs: u64,
}

fn default_catalogue_file() -> PathBuf {
    PathBuf::from("component_catalogue.json")
}

fn default_changelog_file() -> PathBuf {
    PathBuf::from("changelog.txt")
}

fn default_baud() -> u32 {
    9600
}

fn default_timeout_ms() -> u64 {
    1000
}

fn default_num_slots() -> usize {
    104
}

fn default_max_bins() -> usize {
    300
}

fn default_backup_interval() -> u64 {
    600
}

fn default_idle_cutoff() -> u64 {
    1800
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            catalogue: default_catalogue_file(),
            changelog: default_changelog_file(),
        }
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: None,
            baud: default_baud(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            num_slots: default_num_slots(),
            max_bins: default_max_bins(),
        }
    }
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_backup_interval(),
            idle_cutoff_secs: default_idle_cutoff(),
        }
    }
}

impl PartbinConfig {
    /// Load config from the given directory, or return defaults if not found.
    pub fn load<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let config_path = data_dir.as_ref().join(CONFIG_FILENAME);
        if !config_path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&config_path)?;
        let config: PartbinConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Resolve a configured file path against the data directory.
    pub fn resolve(&self, data_dir: &Path, file: &Path) -> PathBuf {
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            data_dir.join(file)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = PartbinConfig::load(dir.path()).unwrap();
        assert_eq!(config, PartbinConfig::default());
        assert_eq!(config.strip.num_slots, 104);
        assert_eq!(config.strip.max_bins, 300);
        assert!(config.serial.port.is_none());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            r#"{"serial": {"port": "/dev/ttyUSB0"}, "strip": {"num_slots": 52}}"#,
        )
        .unwrap();

        let config = PartbinConfig::load(dir.path()).unwrap();
        assert_eq!(config.serial.port.as_deref(), Some(Path::new("/dev/ttyUSB0")));
        assert_eq!(config.serial.baud, 9600);
        assert_eq!(config.strip.num_slots, 52);
        assert_eq!(config.backup.interval_secs, 600);
    }

    #[test]
    fn resolves_relative_paths_against_data_dir() {
        let config = PartbinConfig::default();
        let resolved = config.resolve(Path::new("/data"), Path::new("catalogue.json"));
        assert_eq!(resolved, Path::new("/data/catalogue.json"));
        let absolute = config.resolve(Path::new("/data"), Path::new("/tmp/c.json"));
        assert_eq!(absolute, Path::new("/tmp/c.json"));
    }
}
