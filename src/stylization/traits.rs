use image::DynamicImage;

use crate::{
    config::{StylizationConfig, DEFAULT_NEGATIVE_PROMPT, DEFAULT_PROMPT},
    error::Result,
};

/// Core trait that all stylization backends must implement
pub trait Stylizer: Send + Sync {
    /// Returns the unique name of this backend
    fn name(&self) -> &str;

    /// Returns a human-readable description of this backend
    fn description(&self) -> &str;

    /// Turn a cropped face into a stylized illustration
    ///
    /// # Arguments
    ///
    /// * `face` - The aligned face crop from detection
    /// * `prompt` - Text guidance for generative backends; local backends may ignore it
    ///
    /// # Returns
    ///
    /// The stylized face. Its size may differ from the input; the compositor
    /// fits whatever it receives.
    fn stylize(&self, face: &DynamicImage, prompt: &StylePrompt) -> Result<DynamicImage>;
}

/// Text guidance handed to a stylizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StylePrompt {
    pub prompt: String,
    pub negative_prompt: String,
}

impl StylePrompt {
    pub fn new<P: Into<String>, N: Into<String>>(prompt: P, negative_prompt: N) -> Self {
        Self {
            prompt: prompt.into(),
            negative_prompt: negative_prompt.into(),
        }
    }

    pub fn from_config(config: &StylizationConfig) -> Self {
        Self::new(config.prompt.clone(), config.negative_prompt.clone())
    }
}

impl Default for StylePrompt {
    fn default() -> Self {
        Self::new(DEFAULT_PROMPT, DEFAULT_NEGATIVE_PROMPT)
    }
}
