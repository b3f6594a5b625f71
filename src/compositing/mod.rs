//! # Template Compositing
//!
//! Places a stylized face into template artwork: estimate where the face
//! goes, aspect-fit the face into that region, blend it through a feathered
//! mask and apply a flat brightness correction.
//!
//! ```rust,no_run
//! use portrait_compositor::compositing::TemplateCompositor;
//!
//! # fn main() -> anyhow::Result<()> {
//! let compositor = TemplateCompositor::new("templates/template1.png");
//! let face = image::open("stylized_face.png")?;
//! let result = compositor.composite(&face, None, None)?;
//! result.save("personalized.png")?;
//! # Ok(())
//! # }
//! ```

pub mod compositor;
pub mod fallback;
pub mod fit;
pub mod mask;
pub mod region;

pub use compositor::{adjust_brightness, alpha_blend, TemplateCompositor};
pub use fallback::{synthesize_template, FALLBACK_SIZE};
pub use fit::aspect_fit;
pub use mask::{feather_ramp, feathered_mask};
pub use region::{estimate_face_region, FaceRegion};
