// src/config.rs

use clap::ValueEnum;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
  Text,
  Json,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
  #[serde(default = "default_iterations")]
  pub iterations: usize,
  #[serde(default = "default_scale")]
  pub scale: usize,
  #[serde(default = "default_format")]
  pub format: OutputFormat,
  /// Decimals printed for seconds/iteration in text output.
  #[serde(default = "default_precision")]
  pub precision: usize,
}

fn default_iterations() -> usize {
  1000
}

fn default_scale() -> usize {
  50
}

fn default_format() -> OutputFormat {
  OutputFormat::Text
}

fn default_precision() -> usize {
  6
}

impl Default for Config {
  fn default() -> Self {
    Self {
      iterations: default_iterations(),
      scale: default_scale(),
      format: default_format(),
      precision: default_precision(),
    }
  }
}

/// What happened while looking for a settings file.
#[derive(Debug)]
pub enum LoadOutcome {
  Loaded(PathBuf),
  Missing(PathBuf),
  Invalid(String),
}

impl Config {
  /// Loads config from `path`, or from the standard OS location
  /// (e.g. ~/.config/matbench/settings.json). Falls back to defaults.
  pub fn load(path: Option<&Path>) -> (Self, LoadOutcome) {
    let path = path.map(Path::to_path_buf).unwrap_or_else(Self::default_path);
    if !path.exists() {
      return (Self::default(), LoadOutcome::Missing(path));
    }

    match File::open(&path) {
      Ok(file) => {
        let reader = BufReader::new(file);
        match serde_json::from_reader(reader) {
          Ok(cfg) => (cfg, LoadOutcome::Loaded(path)),
          Err(e) => (
            Self::default(),
            LoadOutcome::Invalid(format!("Error parsing config {:?}: {}", path, e)),
          ),
        }
      }
      Err(e) => (
        Self::default(),
        LoadOutcome::Invalid(format!("Error opening config {:?}: {}", path, e)),
      ),
    }
  }

  /// Writes the config as pretty JSON, creating parent directories.
  pub fn save(&self, path: Option<&Path>) -> io::Result<PathBuf> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(Self::default_path);
    if let Some(parent) = path.parent() {
      if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent)?;
      }
    }

    let writer = BufWriter::new(File::create(&path)?);
    serde_json::to_writer_pretty(writer, self)?;
    Ok(path)
  }

  pub fn default_path() -> PathBuf {
    if let Some(proj) = ProjectDirs::from("org", "matbench", "matbench") {
      proj.config_dir().join("settings.json")
    } else {
      PathBuf::from("settings.json")
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn scratch(name: &str) -> PathBuf {
    std::env::temp_dir()
      .join(format!("matbench-config-{}-{}", std::process::id(), name))
      .join("settings.json")
  }

  #[test]
  fn test_missing_file_gives_defaults() {
    let path = scratch("missing");
    let (cfg, outcome) = Config::load(Some(&path));

    assert_eq!(cfg, Config::default());
    assert!(matches!(outcome, LoadOutcome::Missing(_)));
  }

  #[test]
  fn test_save_then_load() {
    let path = scratch("roundtrip");
    let cfg = Config {
      iterations: 10,
      scale: 3,
      format: OutputFormat::Json,
      precision: 9,
    };

    cfg.save(Some(&path)).unwrap();
    let (loaded, outcome) = Config::load(Some(&path));

    assert_eq!(loaded, cfg);
    assert!(matches!(outcome, LoadOutcome::Loaded(_)));
    let _ = fs::remove_dir_all(path.parent().unwrap());
  }

  #[test]
  fn test_partial_file_fills_defaults() {
    let path = scratch("partial");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, r#"{ "scale": 7, "format": "json" }"#).unwrap();

    let (cfg, _) = Config::load(Some(&path));

    assert_eq!(cfg.scale, 7);
    assert_eq!(cfg.format, OutputFormat::Json);
    assert_eq!(cfg.iterations, 1000);
    assert_eq!(cfg.precision, 6);
    let _ = fs::remove_dir_all(path.parent().unwrap());
  }

  #[test]
  fn test_invalid_file_falls_back() {
    let path = scratch("invalid");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "not json").unwrap();

    let (cfg, outcome) = Config::load(Some(&path));

    assert_eq!(cfg, Config::default());
    assert!(matches!(outcome, LoadOutcome::Invalid(_)));
    let _ = fs::remove_dir_all(path.parent().unwrap());
  }
}
