use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

pub const DEFAULT_PROMPT: &str = "illustrative child portrait, flat colors, cute large eyes, soft shading, clean cartoon style, children's book illustration, vibrant colors, friendly expression";
pub const DEFAULT_NEGATIVE_PROMPT: &str = "photorealistic, realistic, photo, photograph, blurry, distorted, ugly, bad anatomy";

/// Main configuration for the personalization pipeline
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Face detection post-processing
    pub detection: DetectionConfig,

    /// Stylization backend and prompts
    pub stylization: StylizationConfig,

    /// Optional face restoration
    pub restoration: RestorationConfig,

    /// Template compositing settings
    pub compositing: CompositingConfig,

    /// Output encoding
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content)
            .map_err(|_| ConfigError::ParseFailed { path: path.display().to_string() })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidValue {
                key: "config".to_string(),
                value: e.to_string()
            })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.detection.validate()?;
        self.stylization.validate()?;
        self.restoration.validate()?;
        self.compositing.validate()?;
        self.output.validate()?;
        Ok(())
    }
}

fn invalid(key: &str, value: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

/// Face detection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Side length of the square face crop handed to the stylizer
    pub crop_size: u32,

    /// Detections below this confidence are ignored (0.0-1.0)
    pub min_confidence: f32,

    /// Extra context kept around the detected box, as a fraction of its size
    pub margin: f32,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            crop_size: 768,
            min_confidence: 0.9,
            margin: 0.2,
        }
    }
}

impl DetectionConfig {
    fn validate(&self) -> Result<()> {
        if self.crop_size == 0 {
            return Err(invalid("detection.crop_size", self.crop_size).into());
        }

        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(invalid("detection.min_confidence", self.min_confidence).into());
        }

        if !(0.0..1.0).contains(&self.margin) {
            return Err(invalid("detection.margin", self.margin).into());
        }

        Ok(())
    }
}

/// Stylization configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StylizationConfig {
    /// Registered stylizer backend name (see `StylizerRegistry`)
    pub backend: String,

    /// Style prompt passed to the backend
    pub prompt: String,

    /// Negative prompt passed to the backend
    pub negative_prompt: String,
}

impl Default for StylizationConfig {
    fn default() -> Self {
        Self {
            backend: "basic".to_string(),
            prompt: DEFAULT_PROMPT.to_string(),
            negative_prompt: DEFAULT_NEGATIVE_PROMPT.to_string(),
        }
    }
}

impl StylizationConfig {
    fn validate(&self) -> Result<()> {
        if self.backend.trim().is_empty() {
            return Err(invalid("stylization.backend", &self.backend).into());
        }
        Ok(())
    }
}

/// Face restoration configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RestorationConfig {
    /// Run the restorer after stylization
    pub enabled: bool,

    /// Blur sigma used by the unsharp mask
    pub sigma: f32,

    /// Minimum brightness difference before sharpening kicks in
    pub threshold: i32,
}

impl Default for RestorationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sigma: 1.0,
            threshold: 2,
        }
    }
}

impl RestorationConfig {
    fn validate(&self) -> Result<()> {
        if self.sigma <= 0.0 {
            return Err(invalid("restoration.sigma", self.sigma).into());
        }

        if self.threshold < 0 {
            return Err(invalid("restoration.threshold", self.threshold).into());
        }

        Ok(())
    }
}

/// Template compositing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositingConfig {
    /// Directory holding template artwork
    pub template_dir: PathBuf,

    /// File name of the template used when none is requested
    pub default_template: String,

    /// Width of the feathered mask border band (pixels)
    pub feather_size: u32,

    /// Flat multiplicative brightness applied after blending
    pub brightness_factor: f32,
}

impl Default for CompositingConfig {
    fn default() -> Self {
        Self {
            template_dir: PathBuf::from("templates"),
            default_template: "template1.png".to_string(),
            feather_size: 20,
            brightness_factor: 0.98,
        }
    }
}

impl CompositingConfig {
    /// Full path of the default template
    pub fn template_path(&self) -> PathBuf {
        self.template_dir.join(&self.default_template)
    }

    fn validate(&self) -> Result<()> {
        if self.default_template.trim().is_empty() {
            return Err(invalid("compositing.default_template", &self.default_template).into());
        }

        if !(self.brightness_factor > 0.0) {
            return Err(invalid("compositing.brightness_factor", self.brightness_factor).into());
        }

        Ok(())
    }
}

/// Encoded output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Png,
    Jpeg,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
        }
    }
}

/// Output encoding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,

    /// JPEG quality (1-100); ignored for PNG
    pub quality: u8,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Png,
            quality: 95,
        }
    }
}

impl OutputConfig {
    fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.quality) {
            return Err(invalid("output.quality", self.quality).into());
        }
        Ok(())
    }
}
