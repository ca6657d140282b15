use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{SeeMouseError, SeeMouseResult};

pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const CONFIG_ENV_VAR: &str = "SEEMOUSE_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub detection: DetectionConfig,
    #[serde(default)]
    pub color: ColorConfig,
    #[serde(default)]
    pub ocr: OcrConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub pacing: PacingConfig,
}

/// Edge-based button detector. The size window encodes a "horizontal UI
/// button" prior: inclusive on both ends, and width must exceed height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    pub canny_low: f32,
    pub canny_high: f32,
    pub dilate_iterations: u8,
    pub min_width: u32,
    pub max_width: u32,
    pub min_height: u32,
    pub max_height: u32,
    /// Confidence assigned to elements found without OCR (0–100 scale).
    pub synthetic_confidence: f32,
    /// Run the whole-frame OCR pass on its own thread while regions are detected.
    pub parallel: bool,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            canny_low: 50.0,
            canny_high: 150.0,
            dilate_iterations: 2,
            min_width: 40,
            max_width: 400,
            min_height: 20,
            max_height: 100,
            synthetic_confidence: 70.0,
            parallel: true,
        }
    }
}

/// Hue-range detector. Hue is on the 0–179 half-degree scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub enabled: bool,
    pub hue: i32,
    pub tolerance: i32,
    pub min_side: u32,
    pub min_saturation: u8,
    pub min_value: u8,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            hue: 0,
            tolerance: 30,
            min_side: 20,
            min_saturation: 100,
            min_value: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Tesseract executable, looked up on PATH unless absolute.
    pub binary: String,
    pub language: String,
    /// Page segmentation mode for the whole-frame word pass.
    pub page_psm: u8,
    /// Page segmentation mode when reading a single detected region.
    pub region_psm: u8,
    /// Try to read a label for every detected region.
    pub label_regions: bool,
    /// Region crops shorter than this are upscaled before OCR. 0 disables.
    pub region_min_height: u32,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            binary: "tesseract".to_string(),
            language: "eng".to_string(),
            page_psm: 6,
            region_psm: 6,
            label_regions: true,
            region_min_height: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    pub button_boost: f32,
    /// Best score must be strictly above this to count as a match.
    pub min_score: f32,
    pub containment_score: f32,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            button_boost: 1.2,
            min_score: 0.3,
            containment_score: 0.9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    pub settle_ms: u64,
    pub press_ms: u64,
    pub double_click_gap_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            settle_ms: 100,
            press_ms: 50,
            double_click_gap_ms: 100,
        }
    }
}

impl PacingConfig {
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn press(&self) -> Duration {
        Duration::from_millis(self.press_ms)
    }

    pub fn double_click_gap(&self) -> Duration {
        Duration::from_millis(self.double_click_gap_ms)
    }
}

fn resolve_config_path() -> SeeMouseResult<Option<PathBuf>> {
    if let Ok(from_env) = std::env::var(CONFIG_ENV_VAR) {
        let candidate = PathBuf::from(from_env);
        if candidate.exists() {
            tracing::debug!(path = %candidate.display(), "config found via {}", CONFIG_ENV_VAR);
            return Ok(Some(candidate));
        }
        return Err(SeeMouseError::Config(format!(
            "{} points to {}, which does not exist",
            CONFIG_ENV_VAR,
            candidate.display()
        )));
    }

    if let Ok(exe) = std::env::current_exe() {
        if let Some(parent) = exe.parent() {
            let candidate = parent.join(CONFIG_FILE_NAME);
            if candidate.exists() {
                tracing::debug!(path = %candidate.display(), "config found next to executable");
                return Ok(Some(candidate));
            }
        }
    }

    let cwd = std::env::current_dir()?;
    let candidate = cwd.join(CONFIG_FILE_NAME);
    if candidate.exists() {
        tracing::debug!(path = %candidate.display(), "config found in working directory");
        return Ok(Some(candidate));
    }

    if let Some(dir) = dirs::config_dir() {
        let candidate = dir.join("seemouse").join(CONFIG_FILE_NAME);
        if candidate.exists() {
            tracing::debug!(path = %candidate.display(), "config found in user config dir");
            return Ok(Some(candidate));
        }
    }

    Ok(None)
}

pub fn parse_config(content: &str) -> SeeMouseResult<AppConfig> {
    Ok(toml::from_str(content)?)
}

pub fn load_config_from(path: &Path) -> SeeMouseResult<AppConfig> {
    if !path.exists() {
        return Err(SeeMouseError::Config(format!(
            "config file {} not found",
            path.display()
        )));
    }
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    tracing::info!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Load the explicit path if given, otherwise the first config found on the
/// search path. Falls back to built-in defaults when nothing is found.
pub fn load_config(explicit: Option<&Path>) -> SeeMouseResult<AppConfig> {
    if let Some(path) = explicit {
        return load_config_from(path);
    }
    match resolve_config_path()? {
        Some(path) => load_config_from(&path),
        None => {
            tracing::debug!("no config.toml found; using defaults");
            Ok(AppConfig::default())
        }
    }
}

pub fn save_config(config: &AppConfig, path: &Path) -> SeeMouseResult<()> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_policy_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.detection.min_width, 40);
        assert_eq!(cfg.detection.synthetic_confidence, 70.0);
        assert_eq!(cfg.matching.min_score, 0.3);
        assert_eq!(cfg.pacing.double_click_gap(), Duration::from_millis(100));
        assert_eq!(cfg.ocr.page_psm, 6);
        assert_eq!(cfg.ocr.region_psm, 6);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let cfg = parse_config(
            r#"
            [color]
            enabled = true
            hue = 110

            [pacing]
            press_ms = 0
            "#,
        )
        .unwrap();
        assert!(cfg.color.enabled);
        assert_eq!(cfg.color.hue, 110);
        assert_eq!(cfg.color.tolerance, 30);
        assert_eq!(cfg.pacing.press_ms, 0);
        assert_eq!(cfg.pacing.settle_ms, 100);
        assert_eq!(cfg.ocr.binary, "tesseract");
    }

    #[test]
    fn saved_config_parses_back() {
        let mut cfg = AppConfig::default();
        cfg.ocr.language = "deu".into();
        cfg.detection.parallel = false;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        save_config(&cfg, &path).unwrap();
        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = load_config(Some(Path::new("/nonexistent/seemouse.toml"))).unwrap_err();
        assert!(matches!(err, SeeMouseError::Config(_)));
    }
}
