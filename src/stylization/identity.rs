use image::DynamicImage;

use crate::{
    error::Result,
    stylization::{StylePrompt, Stylizer},
};

/// Hands the face back untouched
pub struct IdentityStylizer;

impl IdentityStylizer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for IdentityStylizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Stylizer for IdentityStylizer {
    fn name(&self) -> &str {
        "identity"
    }

    fn description(&self) -> &str {
        "No stylization; the detected face is composited as-is"
    }

    fn stylize(&self, face: &DynamicImage, _prompt: &StylePrompt) -> Result<DynamicImage> {
        Ok(face.clone())
    }
}
