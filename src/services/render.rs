// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Hand-off of the summary payload to whatever draws the image.
//!
//! The payload is always written as `const STRAVA_DATA = {...};` so the HTML
//! summary template can load it. If a render command is configured it is then
//! run once with the data file and the target image path. Failures are
//! reported and never retried.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{AppError, Result};
use crate::models::SummaryPayload;
use crate::store::write_atomic;

/// Consumes a payload and produces an artifact under `output_dir`.
pub trait Renderer {
    /// Returns the path of the produced artifact.
    fn render(&self, payload: &SummaryPayload, output_dir: &Path) -> Result<PathBuf>;
}

/// Writes the payload as a JavaScript data file.
#[derive(Debug, Default, Clone)]
pub struct DataScriptRenderer;

impl DataScriptRenderer {
    pub fn file_name(year: i32) -> String {
        format!("yearly_summary_{}.js", year)
    }
}

impl Renderer for DataScriptRenderer {
    fn render(&self, payload: &SummaryPayload, output_dir: &Path) -> Result<PathBuf> {
        let json = serde_json::to_string(payload)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("encode payload: {}", e)))?;
        let path = output_dir.join(Self::file_name(payload.year));

        write_atomic(&path, format!("const STRAVA_DATA = {};", json).as_bytes())?;
        tracing::info!(path = %path.display(), "Wrote summary data");
        Ok(path)
    }
}

/// Writes the data file, then runs an external program to rasterize it.
#[derive(Debug, Clone)]
pub struct CommandRenderer {
    program: String,
    data: DataScriptRenderer,
}

impl CommandRenderer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            data: DataScriptRenderer,
        }
    }

    pub fn image_name(year: i32) -> String {
        format!("yearly_summary_{}.png", year)
    }
}

impl Renderer for CommandRenderer {
    fn render(&self, payload: &SummaryPayload, output_dir: &Path) -> Result<PathBuf> {
        let data_path = self.data.render(payload, output_dir)?;
        let image_path = output_dir.join(Self::image_name(payload.year));

        tracing::info!(program = %self.program, "Generating summary image");
        let output = Command::new(&self.program)
            .arg(&data_path)
            .arg(&image_path)
            .output()
            .map_err(|e| AppError::RenderFailed(format!("{}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::RenderFailed(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        tracing::info!(path = %image_path.display(), "Saved summary image");
        Ok(image_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BoundingBox, FormattedStats};

    fn payload() -> SummaryPayload {
        SummaryPayload {
            year: 2025,
            runs: vec![],
            main_area_runs: vec![],
            stats: FormattedStats {
                total_runs: "0".to_string(),
                total_distance: "0.0 km".to_string(),
                max_distance: "0.0 km".to_string(),
                avg_distance: "0.0 km".to_string(),
                runs_per_week: "0.0".to_string(),
                avg_pace: "0:00 /km".to_string(),
            },
            bounding_box: BoundingBox::default(),
        }
    }

    #[test]
    fn test_data_script_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = DataScriptRenderer.render(&payload(), dir.path()).unwrap();

        assert_eq!(path, dir.path().join("yearly_summary_2025.js"));
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("const STRAVA_DATA = {"));
        assert!(contents.ends_with("};"));

        let json = &contents["const STRAVA_DATA = ".len()..contents.len() - 1];
        let value: serde_json::Value = serde_json::from_str(json).unwrap();
        assert_eq!(value["year"], 2025);
    }

    #[test]
    fn test_missing_render_program_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = CommandRenderer::new("/nonexistent/strava-year-renderer");

        let err = renderer.render(&payload(), dir.path()).unwrap_err();
        assert!(matches!(err, AppError::RenderFailed(_)));
        // Data file is still written before the program runs.
        assert!(dir.path().join("yearly_summary_2025.js").exists());
    }
}
