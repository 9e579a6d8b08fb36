use crate::app_dirs::AppDirs;
use crate::dataset::{EXPECTED_MEAN_BITS, NOMINAL_MEASUREMENTS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FigureConfig {
    /// File name stem shared by the PDF and PNG outputs.
    pub output_stem: String,
    pub pdf_dpi: u32,
    pub png_dpi: u32,
    pub width_in: f64,
    pub height_in: f64,
    /// Displayed x-axis window; data outside it still counts toward the statistics.
    pub x_window: (f64, f64),
    pub expected_mean: f64,
    /// Measurement count quoted in the title.
    pub nominal_measurements: u64,
    /// Largest |mean - expected| still reported as a clean avalanche.
    pub avalanche_tolerance: f64,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            output_stem: "stat_histogram".to_string(),
            pdf_dpi: 300,
            png_dpi: 150,
            width_in: 10.0,
            height_in: 6.0,
            x_window: (30.0, 95.0),
            expected_mean: EXPECTED_MEAN_BITS,
            nominal_measurements: NOMINAL_MEASUREMENTS,
            avalanche_tolerance: 0.5,
        }
    }
}

impl FigureConfig {
    /// Backend size in device units at `dpi`.
    pub fn pixel_size(&self, dpi: u32) -> (u32, u32) {
        let dpi = dpi as f64;
        (
            (self.width_in * dpi).round() as u32,
            (self.height_in * dpi).round() as u32,
        )
    }
}

pub trait ConfigStore {
    fn load(&self) -> FigureConfig;
    fn save(&self, cfg: &FigureConfig) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = AppDirs::config_path().unwrap_or_else(|| PathBuf::from("avalanche_plot.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> FigureConfig {
        match fs::read(&self.path) {
            Ok(bytes) => match serde_json::from_slice::<FigureConfig>(&bytes) {
                Ok(cfg) => {
                    log::debug!("loaded config from {}", self.path.display());
                    return cfg;
                }
                Err(e) => log::warn!(
                    "ignoring unreadable config {}: {}",
                    self.path.display(),
                    e
                ),
            },
            Err(_) => log::debug!("no config at {}, using defaults", self.path.display()),
        }
        FigureConfig::default()
    }

    fn save(&self, cfg: &FigureConfig) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = FigureConfig::default();
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("nope.json"));
        assert_eq!(store.load(), FigureConfig::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "png_dpi": 72, "output_stem": "fig" }"#).unwrap();
        let cfg = FileConfigStore::with_path(&path).load();
        assert_eq!(cfg.png_dpi, 72);
        assert_eq!(cfg.output_stem, "fig");
        assert_eq!(cfg.pdf_dpi, 300);
        assert_eq!(cfg.x_window, (30.0, 95.0));
    }

    #[test]
    fn garbage_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        assert_eq!(FileConfigStore::with_path(&path).load(), FigureConfig::default());
    }

    #[test]
    fn pixel_size_follows_dpi() {
        let cfg = FigureConfig::default();
        assert_eq!(cfg.pixel_size(150), (1500, 900));
        assert_eq!(cfg.pixel_size(300), (3000, 1800));
        assert_eq!(cfg.pixel_size(72), (720, 432));
    }
}
