use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, GenericImageView, ImageOutputFormat, RgbImage};
use tracing::{debug, info};

use crate::{
    compositing::TemplateCompositor,
    config::{Config, OutputConfig, OutputFormat},
    detection::{detect_and_align, BoundingBox, FaceDetector},
    error::{DetectionError, Result},
    restoration::{restorer_from_config, Restorer},
    stylization::{StylePrompt, Stylizer, StylizerRegistry},
};

/// Encoded result of one personalization request
#[derive(Debug, Clone)]
pub struct PersonalizedImage {
    pub bytes: Vec<u8>,
    pub format: OutputFormat,
    pub width: u32,
    pub height: u32,
}

/// Main engine that orchestrates one personalization request
///
/// The engine follows a fixed pipeline:
/// 1. Face Detection - Find the most confident face and crop it square
/// 2. Stylization - Turn the crop into an illustration
/// 3. Restoration - Recover detail the stylizer lost (may be a passthrough)
/// 4. Compositing - Place the face into the template
/// 5. Encoding - PNG or JPEG bytes
///
/// Everything it holds is immutable, so one engine can serve concurrent
/// requests from behind an `Arc`.
pub struct PersonalizationEngine {
    config: Config,
    detector: Option<Box<dyn FaceDetector>>,
    stylizer: Box<dyn Stylizer>,
    restorer: Box<dyn Restorer>,
    compositor: TemplateCompositor,
    prompt: StylePrompt,
}

impl PersonalizationEngine {
    /// Create an engine from explicit components. No detector is attached;
    /// see [`with_detector`](Self::with_detector).
    pub fn new(config: Config, stylizer: Box<dyn Stylizer>, restorer: Box<dyn Restorer>) -> Self {
        let compositor = TemplateCompositor::from_config(&config.compositing);
        let prompt = StylePrompt::from_config(&config.stylization);

        Self {
            config,
            detector: None,
            stylizer,
            restorer,
            compositor,
            prompt,
        }
    }

    /// Validate the configuration and build the stylizer and restorer it names
    pub fn from_config(config: Config) -> Result<Self> {
        config.validate()?;

        let stylizer = StylizerRegistry::new().create(&config.stylization.backend)?;
        let restorer = restorer_from_config(&config.restoration);

        info!(
            "Engine ready: stylizer={}, restorer={}, template={:?}",
            stylizer.name(),
            restorer.name(),
            config.compositing.template_path()
        );

        Ok(Self::new(config, stylizer, restorer))
    }

    pub fn with_detector(mut self, detector: Box<dyn FaceDetector>) -> Self {
        self.detector = Some(detector);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn compositor(&self) -> &TemplateCompositor {
        &self.compositor
    }

    /// Full pipeline for an uploaded photo in any format `image` can decode
    pub fn personalize(&self, photo_bytes: &[u8]) -> Result<PersonalizedImage> {
        let photo = DynamicImage::ImageRgb8(image::load_from_memory(photo_bytes)?.to_rgb8());
        let (width, height) = photo.dimensions();
        info!("Processing photo: {}x{}", width, height);

        let detector = self.detector.as_deref().ok_or_else(|| DetectionError::DetectorFailed {
            detector: "none".to_string(),
            reason: "no face detector configured".to_string(),
        })?;

        // Step 1: Face detection
        info!("🔍 Step 1: Detecting face with {}...", detector.name());
        let detected = detect_and_align(detector, &photo, &self.config.detection)?;

        self.personalize_face(&detected.face, Some(detected.bbox))
    }

    /// Pipeline from an already cropped face onward
    pub fn personalize_face(
        &self,
        face: &DynamicImage,
        original_bbox: Option<BoundingBox>,
    ) -> Result<PersonalizedImage> {
        self.personalize_face_with_template(face, original_bbox, None)
    }

    /// Like [`personalize_face`](Self::personalize_face) with a one-off template
    pub fn personalize_face_with_template(
        &self,
        face: &DynamicImage,
        original_bbox: Option<BoundingBox>,
        template_path: Option<&Path>,
    ) -> Result<PersonalizedImage> {
        let composited = self.render_face(face, original_bbox, template_path)?;

        // Step 5: Encoding
        let personalized = encode_image(composited, &self.config.output)?;
        info!(
            "✅ Personalization complete: {}x{} {:?}, {} bytes",
            personalized.width,
            personalized.height,
            personalized.format,
            personalized.bytes.len()
        );

        Ok(personalized)
    }

    /// Stylize, restore and composite without encoding
    pub fn render_face(
        &self,
        face: &DynamicImage,
        original_bbox: Option<BoundingBox>,
        template_path: Option<&Path>,
    ) -> Result<RgbImage> {
        // Step 2: Stylization
        info!("🎨 Step 2: Stylizing face with {}...", self.stylizer.name());
        let stylized = self.stylizer.stylize(face, &self.prompt)?;
        debug!("Stylized face is {}x{}", stylized.width(), stylized.height());

        // Step 3: Restoration
        info!("🩹 Step 3: Restoring face with {}...", self.restorer.name());
        let restored = self.restorer.restore(&stylized)?;

        // Step 4: Compositing
        info!("🖼️  Step 4: Compositing into template...");
        self.compositor.composite(&restored, original_bbox, template_path)
    }
}

/// Encode a composited image per the output settings
pub fn encode_image(image: RgbImage, output: &OutputConfig) -> Result<PersonalizedImage> {
    let (width, height) = image.dimensions();

    let format = match output.format {
        OutputFormat::Png => ImageOutputFormat::Png,
        OutputFormat::Jpeg => ImageOutputFormat::Jpeg(output.quality),
    };

    let mut cursor = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(image).write_to(&mut cursor, format)?;

    Ok(PersonalizedImage {
        bytes: cursor.into_inner(),
        format: output.format,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        detection::Detection,
        restoration::PassthroughRestorer,
        stylization::IdentityStylizer,
        PersonalizeError,
    };
    use image::{ImageFormat, Rgb};
    use tempfile::{tempdir, TempDir};

    struct CentreDetector;

    impl FaceDetector for CentreDetector {
        fn name(&self) -> &str {
            "centre"
        }

        fn detect(&self, photo: &DynamicImage) -> Result<Vec<Detection>> {
            let (w, h) = (photo.width() as f32, photo.height() as f32);
            Ok(vec![Detection {
                bbox: [w * 0.25, h * 0.25, w * 0.75, h * 0.75],
                confidence: 0.99,
                landmarks: vec![],
            }])
        }
    }

    struct BlindDetector;

    impl FaceDetector for BlindDetector {
        fn name(&self) -> &str {
            "blind"
        }

        fn detect(&self, _photo: &DynamicImage) -> Result<Vec<Detection>> {
            Ok(vec![])
        }
    }

    fn test_config(dir: &TempDir) -> Config {
        let mut config = Config::default();
        config.detection.crop_size = 64;
        config.compositing.template_dir = dir.path().to_path_buf();
        config.compositing.default_template = "template.png".to_string();
        config
    }

    fn write_template(dir: &TempDir) {
        RgbImage::from_pixel(400, 300, Rgb([30, 60, 90]))
            .save(dir.path().join("template.png"))
            .unwrap();
    }

    fn photo_png() -> Vec<u8> {
        let photo = RgbImage::from_fn(120, 90, |x, y| Rgb([x as u8, y as u8, 128]));
        encode_image(photo, &OutputConfig::default()).unwrap().bytes
    }

    #[test]
    fn test_full_pipeline_produces_template_sized_png() {
        let dir = tempdir().unwrap();
        write_template(&dir);

        let engine = PersonalizationEngine::from_config(test_config(&dir))
            .unwrap()
            .with_detector(Box::new(CentreDetector));

        let result = engine.personalize(&photo_png()).unwrap();
        assert_eq!((result.width, result.height), (400, 300));
        assert_eq!(result.format, OutputFormat::Png);

        let decoded = image::load_from_memory_with_format(&result.bytes, ImageFormat::Png).unwrap();
        assert_eq!(decoded.dimensions(), (400, 300));
    }

    #[test]
    fn test_jpeg_output() {
        let dir = tempdir().unwrap();
        write_template(&dir);
        let mut config = test_config(&dir);
        config.output.format = OutputFormat::Jpeg;
        config.output.quality = 80;

        let engine = PersonalizationEngine::new(
            config,
            Box::new(IdentityStylizer::new()),
            Box::new(PassthroughRestorer),
        );
        let face = DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 64, Rgb([200, 180, 160])));

        let result = engine.personalize_face(&face, None).unwrap();
        let decoded = image::load_from_memory_with_format(&result.bytes, ImageFormat::Jpeg).unwrap();
        assert_eq!(decoded.dimensions(), (400, 300));
    }

    #[test]
    fn test_missing_template_uses_fallback_canvas() {
        let dir = tempdir().unwrap();
        let engine = PersonalizationEngine::from_config(test_config(&dir)).unwrap();
        let face = DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 64, Rgb([200, 180, 160])));

        let result = engine.personalize_face(&face, None).unwrap();
        assert_eq!((result.width, result.height), (1024, 1024));
    }

    #[test]
    fn test_no_face_is_client_error() {
        let dir = tempdir().unwrap();
        let engine = PersonalizationEngine::from_config(test_config(&dir))
            .unwrap()
            .with_detector(Box::new(BlindDetector));

        let err = engine.personalize(&photo_png()).unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn test_missing_detector_is_server_error() {
        let dir = tempdir().unwrap();
        let engine = PersonalizationEngine::from_config(test_config(&dir)).unwrap();

        let err = engine.personalize(&photo_png()).unwrap_err();
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_undecodable_upload() {
        let dir = tempdir().unwrap();
        let engine = PersonalizationEngine::from_config(test_config(&dir))
            .unwrap()
            .with_detector(Box::new(CentreDetector));

        let err = engine.personalize(b"not an image").unwrap_err();
        assert!(matches!(err, PersonalizeError::Image(_)));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_unknown_stylizer_rejected() {
        let dir = tempdir().unwrap();
        let mut config = test_config(&dir);
        config.stylization.backend = "replicate".to_string();

        assert!(PersonalizationEngine::from_config(config).is_err());
    }

    #[test]
    fn test_engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PersonalizationEngine>();
    }
}
