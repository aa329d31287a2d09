//! Pixel classification.
//!
//! Resolves the background and glue colours for one image and answers
//! whether a given pixel is transparent. The resolved `PixelClassifier` is
//! computed once per run and shared by extraction and export.

mod spec;

pub use spec::ColourSpec;

use crate::error::{Result, SplitError};
use crate::raster::Raster;
use crate::types::Colour;

/// Resolved transparency rules for a single image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelClassifier {
    background: Option<Colour>,
    glue: Option<Colour>,
    has_alpha: bool,
}

impl PixelClassifier {
    /// Resolve the colour specs against `raster`.
    ///
    /// Fails with a configuration error when there is no background colour
    /// and the image has no alpha channel, since no pixel could ever be
    /// classified as transparent.
    pub fn new(
        raster: &Raster,
        background: Option<&ColourSpec>,
        glue: Option<&ColourSpec>,
    ) -> Result<Self> {
        let background = resolve_background(background, raster)?;
        let glue = resolve_glue(glue, raster)?;
        let has_alpha = has_alpha_channel(raster);

        if background.is_none() && !has_alpha {
            return Err(SplitError::Configuration {
                message: "Unable to identify which pixels are transparent".to_string(),
                help: Some(
                    "The image has no alpha channel; pass --background with a colour or @x,y location"
                        .to_string(),
                ),
            });
        }

        Ok(Self {
            background,
            glue,
            has_alpha,
        })
    }

    /// The resolved background colour, if any.
    pub fn background(&self) -> Option<Colour> {
        self.background
    }

    /// The resolved glue colour, if any.
    pub fn glue(&self) -> Option<Colour> {
        self.glue
    }

    pub fn has_alpha_channel(&self) -> bool {
        self.has_alpha
    }

    /// Whether `pixel` counts as empty space.
    ///
    /// Background equality wins first; otherwise an image with alpha treats
    /// fully transparent pixels as empty. Glue is never transparent.
    pub fn is_transparent(&self, pixel: Colour) -> Result<bool> {
        if self.background.is_some_and(|bg| bg.matches(pixel)) {
            return Ok(true);
        }

        if self.has_alpha {
            return match pixel.a {
                Some(a) => Ok(a == 0),
                None => Err(SplitError::MissingAlphaChannel { colour: pixel }),
            };
        }

        Ok(false)
    }

    /// Whether `pixel` should be erased to the fill colour on export.
    ///
    /// Unlike transparency, erasure needs full channel equality: an RGB glue
    /// colour never erases a pixel from an RGBA sheet.
    pub fn is_erased(&self, pixel: Colour) -> bool {
        self.background == Some(pixel) || self.glue == Some(pixel)
    }
}

/// Resolve the background spec, if one is configured.
pub fn resolve_background(spec: Option<&ColourSpec>, raster: &Raster) -> Result<Option<Colour>> {
    spec.map(|s| s.resolve(raster)).transpose()
}

/// Resolve the glue spec, if one is configured.
pub fn resolve_glue(spec: Option<&ColourSpec>, raster: &Raster) -> Result<Option<Colour>> {
    spec.map(|s| s.resolve(raster)).transpose()
}

/// Whether the image's pixel format carries per-pixel transparency.
pub fn has_alpha_channel(raster: &Raster) -> bool {
    raster.has_alpha()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    fn rgb_raster() -> Raster {
        let mut img = RgbImage::from_pixel(3, 3, Rgb([1, 1, 1]));
        img.put_pixel(1, 1, Rgb([9, 9, 9]));
        Raster::from_rgb(img)
    }

    #[test]
    fn test_background_match_is_transparent() {
        let raster = rgb_raster();
        let bg = ColourSpec::Fixed(Colour::rgb(1, 1, 1));
        let classifier = PixelClassifier::new(&raster, Some(&bg), None).unwrap();

        assert!(classifier.is_transparent(Colour::rgb(1, 1, 1)).unwrap());
        assert!(!classifier.is_transparent(Colour::rgb(9, 9, 9)).unwrap());
    }

    #[test]
    fn test_location_background_samples_image() {
        let raster = rgb_raster();
        let bg = ColourSpec::Location { x: 0, y: 0 };
        let classifier = PixelClassifier::new(&raster, Some(&bg), None).unwrap();

        assert_eq!(classifier.background(), Some(Colour::rgb(1, 1, 1)));
    }

    #[test]
    fn test_no_background_no_alpha_is_configuration_error() {
        let raster = rgb_raster();
        let err = PixelClassifier::new(&raster, None, None).unwrap_err();
        assert!(matches!(err, SplitError::Configuration { .. }));
    }

    #[test]
    fn test_alpha_only_classification() {
        let mut img = RgbaImage::from_pixel(2, 1, Rgba([10, 20, 30, 0]));
        img.put_pixel(1, 0, Rgba([10, 20, 30, 1]));
        let raster = Raster::from_rgba(img);
        let classifier = PixelClassifier::new(&raster, None, None).unwrap();

        assert!(classifier.has_alpha_channel());
        assert!(classifier.is_transparent(Colour::rgba(10, 20, 30, 0)).unwrap());
        assert!(!classifier.is_transparent(Colour::rgba(10, 20, 30, 1)).unwrap());
    }

    #[test]
    fn test_rgb_background_ignores_alpha_of_rgba_pixels() {
        let raster = Raster::from_rgba(RgbaImage::new(1, 1));
        let bg = ColourSpec::Fixed(Colour::rgb(88, 94, 181));
        let classifier = PixelClassifier::new(&raster, Some(&bg), None).unwrap();

        assert!(classifier.is_transparent(Colour::rgba(88, 94, 181, 255)).unwrap());
    }

    #[test]
    fn test_missing_alpha_on_alpha_image_is_error() {
        let raster = Raster::from_rgba(RgbaImage::new(1, 1));
        let classifier = PixelClassifier::new(&raster, None, None).unwrap();

        let err = classifier.is_transparent(Colour::rgb(1, 2, 3)).unwrap_err();
        assert!(matches!(err, SplitError::MissingAlphaChannel { .. }));
    }

    #[test]
    fn test_glue_is_opaque_but_erased() {
        let raster = rgb_raster();
        let bg = ColourSpec::Fixed(Colour::rgb(1, 1, 1));
        let glue = ColourSpec::Fixed(Colour::rgb(70, 70, 70));
        let classifier = PixelClassifier::new(&raster, Some(&bg), Some(&glue)).unwrap();

        let glue_pixel = Colour::rgb(70, 70, 70);
        assert!(!classifier.is_transparent(glue_pixel).unwrap());
        assert!(classifier.is_erased(glue_pixel));
        assert!(classifier.is_erased(Colour::rgb(1, 1, 1)));
        assert!(!classifier.is_erased(Colour::rgb(9, 9, 9)));
    }

    #[test]
    fn test_erasure_requires_matching_alpha() {
        let raster = Raster::from_rgba(RgbaImage::new(1, 1));
        let glue = ColourSpec::Fixed(Colour::rgb(70, 70, 70));
        let classifier = PixelClassifier::new(&raster, None, Some(&glue)).unwrap();

        assert!(!classifier.is_erased(Colour::rgba(70, 70, 70, 128)));
        assert!(!classifier.is_erased(Colour::rgba(70, 70, 70, 255)));

        let glue = ColourSpec::Fixed(Colour::rgba(70, 70, 70, 128));
        let classifier = PixelClassifier::new(&raster, None, Some(&glue)).unwrap();
        assert!(classifier.is_erased(Colour::rgba(70, 70, 70, 128)));
        assert!(!classifier.is_erased(Colour::rgba(70, 70, 70, 255)));
    }

    #[test]
    fn test_pixel_matching_background_and_glue_is_erased() {
        let raster = rgb_raster();
        let same = ColourSpec::Fixed(Colour::rgb(1, 1, 1));
        let classifier = PixelClassifier::new(&raster, Some(&same), Some(&same)).unwrap();

        assert!(classifier.is_erased(Colour::rgb(1, 1, 1)));
    }
}
