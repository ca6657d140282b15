/// Frame sources: the primary monitor via `xcap`, or a still image on disk.
use std::path::{Path, PathBuf};

use image::RgbImage;

use crate::errors::{SeeMouseError, SeeMouseResult};
use crate::perception::traits::FrameSource;

/// Captures the primary monitor on every call.
pub struct ScreenSource {
    monitor: xcap::Monitor,
}

impl ScreenSource {
    /// Fails when no display or no primary monitor can be found.
    pub fn primary() -> SeeMouseResult<Self> {
        let monitors = xcap::Monitor::all()
            .map_err(|e| SeeMouseError::Capture(format!("failed to enumerate monitors: {e}")))?;

        let mut fallback = None;
        for monitor in monitors {
            let is_primary = monitor.is_primary().map_err(|e| {
                SeeMouseError::Capture(format!("failed to get monitor primary flag: {e}"))
            })?;
            if is_primary {
                log_monitor(&monitor);
                return Ok(Self { monitor });
            }
            fallback.get_or_insert(monitor);
        }

        match fallback {
            Some(monitor) => {
                tracing::warn!("no monitor reports itself primary; using the first one");
                log_monitor(&monitor);
                Ok(Self { monitor })
            }
            None => Err(SeeMouseError::Capture("no monitors found".into())),
        }
    }
}

fn log_monitor(monitor: &xcap::Monitor) {
    let name = monitor.name().unwrap_or_default();
    let width = monitor.width().unwrap_or_default();
    let height = monitor.height().unwrap_or_default();
    tracing::info!(monitor = %name, width, height, "capturing monitor");
}

impl FrameSource for ScreenSource {
    fn capture(&mut self) -> SeeMouseResult<RgbImage> {
        let rgba = self
            .monitor
            .capture_image()
            .map_err(|e| SeeMouseError::Capture(format!("failed to capture monitor: {e}")))?;
        let frame = image::DynamicImage::ImageRgba8(rgba).to_rgb8();
        tracing::debug!(width = frame.width(), height = frame.height(), "screen captured");
        Ok(frame)
    }
}

/// Re-reads an image file on every capture so edits between refreshes show up.
pub struct ImageFileSource {
    path: PathBuf,
}

impl ImageFileSource {
    pub fn open(path: &Path) -> SeeMouseResult<Self> {
        if !path.is_file() {
            return Err(SeeMouseError::Capture(format!(
                "image {} does not exist",
                path.display()
            )));
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }
}

impl FrameSource for ImageFileSource {
    fn capture(&mut self) -> SeeMouseResult<RgbImage> {
        let frame = image::open(&self.path)?.to_rgb8();
        tracing::debug!(path = %self.path.display(), width = frame.width(), height = frame.height(), "image loaded");
        Ok(frame)
    }
}
