//! # Portrait-Compositor
//!
//! Turn a photo into a stylized portrait placed inside decorative template
//! artwork.
//!
//! The heart of the crate is the [`compositing`] engine, which fits an
//! arbitrary face image into a template and blends it in through a feathered
//! mask. Face detection, stylization and restoration are pluggable
//! collaborators around it.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use portrait_compositor::{config::Config, pipeline::PersonalizationEngine};
//!
//! # fn main() -> anyhow::Result<()> {
//! let engine = PersonalizationEngine::from_config(Config::default())?;
//!
//! let face = image::open("face.png")?;
//! let result = engine.personalize_face(&face, None)?;
//! std::fs::write("personalized.png", &result.bytes)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`compositing`] - Region estimation, aspect fitting, feathered blending
//! - [`detection`] - Face detector seam and crop post-processing
//! - [`stylization`] - Stylizer backends and their registry
//! - [`restoration`] - Optional detail restoration
//! - [`pipeline`] - The end-to-end personalization engine
//! - [`config`] - Configuration management
//!
//! ## Plugging in a Face Detector
//!
//! Detection models live outside this crate. Wrap yours in the
//! [`FaceDetector`](detection::FaceDetector) trait:
//!
//! ```rust,no_run
//! use portrait_compositor::detection::{Detection, FaceDetector};
//! use portrait_compositor::Result;
//! use image::DynamicImage;
//!
//! struct MyDetector;
//!
//! impl FaceDetector for MyDetector {
//!     fn name(&self) -> &str {
//!         "my_detector"
//!     }
//!
//!     fn detect(&self, photo: &DynamicImage) -> Result<Vec<Detection>> {
//!         // Run your model here
//!         Ok(vec![])
//!     }
//! }
//! ```

pub mod compositing;
pub mod config;
pub mod detection;
pub mod error;
pub mod pipeline;
pub mod restoration;
pub mod stylization;

// Re-export commonly used types for convenience
pub use crate::{
    compositing::TemplateCompositor,
    config::Config,
    error::{PersonalizeError, Result},
    pipeline::PersonalizationEngine,
    stylization::{Stylizer, StylizerRegistry},
};
