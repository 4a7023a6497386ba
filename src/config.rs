// Optional TOML settings. Every key has a default, so an empty file (or no file
// at all) gives the stock 900x600 canvas with a black 5px brush.
//
//   title = "Sketch"
//   tool = "brush"          # brush | eraser | rectangle | circle | line | fill
//   palette = ["#000000", "#ffffff", "#e53935"]
//
//   [canvas]
//   width = 900
//   height = 600
//
//   [style]
//   color = "#000000"
//   thickness = 5.0         # 1..=100
//   opacity = 1.0
//   thickness_step = 1.0
//   opacity_step = 0.1
//   color_step = 17         # R/G/B -/+ buttons

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::style::{Color, MAX_THICKNESS, MIN_THICKNESS};
use crate::surface::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::tool::Tool;

/// Looked up in the working directory when no path is given.
pub const FILENAME: &str = "layer-sketch.toml";

/// Biggest canvas edge we accept; one layer at this size is 16 MiB.
const MAX_EDGE: u32 = 2048;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub title: String,
    /// Tool selected at startup.
    pub tool: Tool,
    pub canvas: CanvasConfig,
    pub style: StyleConfig,
    /// Swatches shown in the color picker.
    pub palette: Vec<Color>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    pub color: Color,
    pub thickness: f32,
    pub opacity: f32,
    pub thickness_step: f32,
    pub opacity_step: f32,
    /// How far one R/G/B button press moves its channel.
    pub color_step: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Layer Sketch".to_owned(),
            tool: Tool::default(),
            canvas: CanvasConfig::default(),
            style: StyleConfig::default(),
            palette: vec![
                Color::rgb(0x00, 0x00, 0x00),
                Color::rgb(0xFF, 0xFF, 0xFF),
                Color::rgb(0x9E, 0x9E, 0x9E),
                Color::rgb(0xE5, 0x39, 0x35),
                Color::rgb(0xFB, 0x8C, 0x00),
                Color::rgb(0xFD, 0xD8, 0x35),
                Color::rgb(0x43, 0xA0, 0x47),
                Color::rgb(0x1E, 0x88, 0xE5),
                Color::rgb(0x00, 0x00, 0xFF),
                Color::rgb(0x8E, 0x24, 0xAA),
                Color::rgb(0x6D, 0x4C, 0x41),
                Color::rgb(0xFF, 0x00, 0x00),
            ],
        }
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self { width: DEFAULT_WIDTH, height: DEFAULT_HEIGHT }
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            thickness: 5.0,
            opacity: 1.0,
            thickness_step: 1.0,
            opacity_step: 0.1,
            color_step: 17,
        }
    }
}

impl Config {
    /// Parse and validate the file at `path`.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| Error::ConfigRead { path: path.to_owned(), source })?;
        let config: Config =
            toml::from_str(&text).map_err(|source| Error::ConfigParse { path: path.to_owned(), source })?;
        config.validate()?;
        Ok(config)
    }

    /// An explicit path must load. Without one, `FILENAME` in the working
    /// directory is used if it exists, else the defaults.
    pub fn resolve(explicit: Option<PathBuf>) -> Result<Self, Error> {
        if let Some(path) = explicit {
            log::info!("Loading config from {}", path.display());
            return Self::load(&path);
        }
        let fallback = Path::new(FILENAME);
        if fallback.is_file() {
            log::info!("Loading config from {FILENAME}");
            Self::load(fallback)
        } else {
            log::debug!("No {FILENAME} found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        let bad = |msg: String| Err(Error::InvalidConfig(msg));
        let CanvasConfig { width, height } = self.canvas;
        if width == 0 || height == 0 || width > MAX_EDGE || height > MAX_EDGE {
            return bad(format!("canvas size {width}x{height} must be within 1..={MAX_EDGE}"));
        }
        if self.palette.is_empty() {
            return bad("palette must hold at least one color".into());
        }
        let s = &self.style;
        if !(MIN_THICKNESS..=MAX_THICKNESS).contains(&s.thickness) {
            return bad(format!(
                "style.thickness {} must be within {MIN_THICKNESS}..={MAX_THICKNESS}",
                s.thickness
            ));
        }
        if !(0.0..=1.0).contains(&s.opacity) {
            return bad(format!("style.opacity {} must be within 0..=1", s.opacity));
        }
        if !(s.thickness_step.is_finite() && s.thickness_step > 0.0) {
            return bad(format!("style.thickness_step {} must be positive", s.thickness_step));
        }
        if !(s.opacity_step.is_finite() && s.opacity_step > 0.0 && s.opacity_step <= 1.0) {
            return bad(format!("style.opacity_step {} must be within (0, 1]", s.opacity_step));
        }
        if s.color_step == 0 {
            return bad("style.color_step must be at least 1".into());
        }
        Ok(())
    }
}
