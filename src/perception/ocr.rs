//! Tesseract command-line backend for [`TextRecognizer`].
//!
//! The word pass asks for TSV output, which carries a box and a 0–100
//! confidence per word. Region reads use plain text output.

use std::process::Command;

use image::RgbImage;

use crate::config::OcrConfig;
use crate::errors::{SeeMouseError, SeeMouseResult};
use crate::perception::traits::{OcrWord, TextRecognizer};
use crate::perception::types::Rect;

/// TSV `level` value for word rows.
const WORD_LEVEL: &str = "5";

pub struct TesseractCli {
    binary: String,
    language: String,
    page_psm: u8,
    region_psm: u8,
}

impl TesseractCli {
    /// Probe the binary once. Failing here is an environment failure.
    pub fn new(cfg: &OcrConfig) -> SeeMouseResult<Self> {
        let probe = Command::new(&cfg.binary).arg("--version").output().map_err(|e| {
            SeeMouseError::OcrUnavailable(format!(
                "cannot run `{}` ({e}). Install with: apt install tesseract-ocr",
                cfg.binary
            ))
        })?;
        if !probe.status.success() {
            return Err(SeeMouseError::OcrUnavailable(format!(
                "`{} --version` exited with {}",
                cfg.binary, probe.status
            )));
        }
        let version = String::from_utf8_lossy(&probe.stdout);
        let version = version.lines().next().unwrap_or("").trim();
        tracing::info!(binary = %cfg.binary, version = %version, language = %cfg.language, "tesseract ready");

        Ok(Self {
            binary: cfg.binary.clone(),
            language: cfg.language.clone(),
            page_psm: cfg.page_psm,
            region_psm: cfg.region_psm,
        })
    }

    fn run(&self, image: &RgbImage, psm: u8, tsv: bool) -> SeeMouseResult<String> {
        // Removed when `scratch` drops, after tesseract has exited.
        let scratch = tempfile::Builder::new()
            .prefix("seemouse_ocr_")
            .suffix(".png")
            .tempfile()?;
        image.save(scratch.path())?;

        let mut cmd = Command::new(&self.binary);
        cmd.arg(scratch.path())
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .arg("--psm")
            .arg(psm.to_string());
        if tsv {
            cmd.arg("tsv");
        }

        let output = cmd
            .output()
            .map_err(|e| SeeMouseError::Ocr(format!("spawn {}: {e}", self.binary)))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SeeMouseError::Ocr(stderr.trim().to_string()));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl TextRecognizer for TesseractCli {
    fn words(&self, image: &RgbImage) -> SeeMouseResult<Vec<OcrWord>> {
        let tsv = self.run(image, self.page_psm, true)?;
        Ok(parse_tsv(&tsv))
    }

    fn region_text(&self, image: &RgbImage) -> SeeMouseResult<String> {
        self.run(image, self.region_psm, false)
    }
}

/// Word rows of Tesseract TSV output, in emission order. Rows that are not
/// words, or whose box is degenerate, are dropped; empty text is kept so the
/// caller decides what to skip.
pub fn parse_tsv(tsv: &str) -> Vec<OcrWord> {
    let mut words = Vec::new();
    for line in tsv.lines() {
        let cols: Vec<&str> = line.splitn(12, '\t').collect();
        if cols.len() < 11 || cols[0] != WORD_LEVEL {
            continue;
        }
        let nums: Option<Vec<i64>> = cols[6..10].iter().map(|c| c.trim().parse().ok()).collect();
        let Some(nums) = nums else {
            continue;
        };
        let (Ok(width), Ok(height)) = (u32::try_from(nums[2]), u32::try_from(nums[3])) else {
            continue;
        };
        let Some(bounds) = Rect::new(nums[0] as i32, nums[1] as i32, width, height) else {
            continue;
        };
        let confidence = match cols[10].trim().parse::<f32>() {
            Ok(c) if c.is_finite() => c.clamp(0.0, 100.0),
            _ => 0.0,
        };
        let text = cols.get(11).map(|t| t.trim().to_string()).unwrap_or_default();
        words.push(OcrWord {
            text,
            confidence,
            bounds,
        });
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext
1\t1\t0\t0\t0\t0\t0\t0\t1920\t1080\t-1\t
2\t1\t1\t0\t0\t0\t100\t200\t300\t40\t-1\t
5\t1\t1\t1\t1\t1\t100\t200\t80\t30\t96.52\tSubmit
5\t1\t1\t1\t1\t2\t190\t200\t90\t30\t91\tCancel
5\t1\t1\t1\t1\t3\t300\t200\t10\t30\t12.5\t
5\t1\t1\t1\t1\t4\t320\t200\t0\t30\t80\tghost
";

    #[test]
    fn parses_word_rows_in_order() {
        let words = parse_tsv(SAMPLE);
        assert_eq!(words.len(), 3);
        assert_eq!(words[0].text, "Submit");
        assert_eq!(words[0].bounds, Rect::new(100, 200, 80, 30).unwrap());
        assert!((words[0].confidence - 96.52).abs() < 1e-4);
        assert_eq!(words[1].text, "Cancel");
        assert_eq!(words[1].confidence, 91.0);
    }

    #[test]
    fn blank_words_survive_parsing_with_empty_text() {
        let words = parse_tsv(SAMPLE);
        assert_eq!(words[2].text, "");
    }

    #[test]
    fn garbage_and_header_are_ignored() {
        assert!(parse_tsv("").is_empty());
        assert!(parse_tsv("not\ta\ttsv").is_empty());
        assert!(parse_tsv("5\t1\t1\t1\t1\t1\tx\t0\t10\t10\t90\tword").is_empty());
    }

    #[test]
    fn non_finite_confidence_reads_as_zero() {
        let words = parse_tsv(
            "5\t1\t1\t1\t1\t1\t10\t10\t40\t20\tnan\tOK\n5\t1\t1\t1\t1\t2\t60\t10\t40\t20\tinf\tGo\n",
        );
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].confidence, 0.0);
        assert_eq!(words[1].confidence, 0.0);
    }

    #[test]
    fn missing_binary_is_an_environment_failure() {
        let cfg = OcrConfig {
            binary: "/nonexistent/tesseract-for-tests".into(),
            ..OcrConfig::default()
        };
        let err = TesseractCli::new(&cfg).err().unwrap();
        assert!(matches!(err, SeeMouseError::OcrUnavailable(_)));
        assert!(err.is_environment());
    }
}
