//! # Personalization Pipeline
//!
//! The engine runs a photo through detection, stylization, optional
//! restoration and template compositing, then encodes the result.

pub mod engine;

pub use engine::{encode_image, PersonalizationEngine, PersonalizedImage};
