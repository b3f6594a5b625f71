//! # Stylization Backends
//!
//! Turns the cropped face into an illustration. Generative services sit
//! behind the [`Stylizer`] trait; the crate ships local backends only.
//!
//! ## Built-in Backends
//!
//! - **basic**: Saturation and contrast boost, the fallback when no model is configured
//! - **identity**: Returns the face unchanged
//!
//! ## Usage
//!
//! ```rust,no_run
//! use portrait_compositor::stylization::{StylePrompt, StylizerRegistry};
//!
//! # fn main() -> anyhow::Result<()> {
//! let registry = StylizerRegistry::new();
//! let stylizer = registry.create("basic")?;
//!
//! let face = image::open("face.png")?;
//! let stylized = stylizer.stylize(&face, &StylePrompt::default())?;
//! # Ok(())
//! # }
//! ```

pub mod registry;
pub mod traits;

mod basic;
mod identity;

pub use registry::StylizerRegistry;
pub use traits::{StylePrompt, Stylizer};

pub use basic::BasicEnhancement;
pub use identity::IdentityStylizer;
