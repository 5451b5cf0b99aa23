//! Generator settings persisted as JSON.
//!
//! Key names match the `config.json` files already in use by existing
//! corpora, so those files load unchanged. Unknown keys are ignored.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use poem_pages::PoemParseOptions;
use poem_pages_render::{BorderStyle, LayoutConfig};

use crate::error::GenerateError;

/// Inclusive poem length filter, in chars of content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LengthRange {
    pub min: usize,
    pub max: usize,
}

impl Default for LengthRange {
    fn default() -> Self {
        Self { min: 5, max: 1000 }
    }
}

/// All settings consumed by the batch generator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    #[serde(rename = "page_lines")]
    pub lines_per_page: usize,
    #[serde(rename = "page_columns")]
    pub columns_per_page: usize,
    #[serde(rename = "poem_length_range")]
    pub length_range: LengthRange,
    #[serde(rename = "input_directory")]
    pub input_dir: PathBuf,
    #[serde(rename = "output_directory")]
    pub output_dir: PathBuf,
    pub enable_decoration: bool,
    pub border_style: BorderStyle,
    pub enable_catalog: bool,
    pub title_separator: String,
    pub poems_per_file: usize,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            lines_per_page: 20,
            columns_per_page: 30,
            length_range: LengthRange::default(),
            input_dir: PathBuf::from("../../"),
            output_dir: PathBuf::from("../data/output"),
            enable_decoration: true,
            border_style: BorderStyle::Double,
            enable_catalog: true,
            title_separator: "・".to_string(),
            poems_per_file: 1,
        }
    }
}

impl GeneratorSettings {
    /// Read settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self, GenerateError> {
        let bytes = fs::read(path).map_err(GenerateError::io(path))?;
        serde_json::from_slice(&bytes).map_err(|err| GenerateError::Settings {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    /// Read settings, falling back to defaults when the file is missing or bad.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::info!("settings file {} not found, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(settings) => {
                log::info!(
                    "loaded settings: {} lines x {} columns",
                    settings.lines_per_page,
                    settings.columns_per_page
                );
                settings
            }
            Err(err) => {
                log::warn!("{}; using defaults", err);
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<(), GenerateError> {
        let body = serde_json::to_string_pretty(self).map_err(|err| GenerateError::Settings {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(GenerateError::io(parent))?;
        }
        fs::write(path, body).map_err(GenerateError::io(path))
    }

    /// Resolve relative input/output directories against `base`.
    pub fn resolve_relative_to(mut self, base: &Path) -> Self {
        if self.input_dir.is_relative() {
            self.input_dir = base.join(&self.input_dir);
        }
        if self.output_dir.is_relative() {
            self.output_dir = base.join(&self.output_dir);
        }
        self
    }

    /// Poems written per output file; zero is treated as one.
    pub fn poems_per_file(&self) -> usize {
        self.poems_per_file.max(1)
    }

    /// Page geometry for the formatter.
    pub fn layout_config(&self) -> LayoutConfig {
        LayoutConfig {
            columns_per_page: self.columns_per_page,
            lines_per_page: self.lines_per_page,
            decoration_enabled: self.enable_decoration,
            border_style: self.border_style,
        }
    }

    /// Loader options for the poem corpus.
    pub fn parse_options(&self) -> PoemParseOptions {
        PoemParseOptions {
            title_separator: self.title_separator.clone(),
            min_length: self.length_range.min,
            max_length: self.length_range.max,
        }
    }
}
