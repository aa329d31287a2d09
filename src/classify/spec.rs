//! Colour specifications.
//!
//! A colour is either given directly or sampled from the loaded image.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SplitError};
use crate::raster::Raster;
use crate::types::Colour;

/// How to find a colour for a run: a fixed value, or a pixel to sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ColourSpec {
    /// A colour known ahead of time, e.g. `#585EB5FF`.
    Fixed(Colour),
    /// The colour of the pixel at image coordinates `(x, y)`, e.g. `@0,0`.
    Location { x: u32, y: u32 },
}

impl ColourSpec {
    /// Resolve to a concrete colour against `raster`.
    pub fn resolve(&self, raster: &Raster) -> Result<Colour> {
        match *self {
            ColourSpec::Fixed(colour) => Ok(colour),
            ColourSpec::Location { x, y } => {
                raster
                    .pixel_xy(x, y)
                    .ok_or_else(|| SplitError::Configuration {
                        message: format!(
                            "Colour location ({}, {}) is outside the {}x{} image",
                            x,
                            y,
                            raster.width(),
                            raster.height()
                        ),
                        help: Some("Locations are given as @x,y in image coordinates".to_string()),
                    })
            }
        }
    }

    /// Parse `#hex` or `@x,y`.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let Some(loc) = s.strip_prefix('@') else {
            return Colour::from_hex(s).map(ColourSpec::Fixed);
        };

        let invalid = || SplitError::Parse {
            message: format!("Invalid pixel location '{}'", s),
            help: Some("Use the format @x,y, for example: @0,0".to_string()),
        };

        let (x, y) = loc.split_once(',').ok_or_else(invalid)?;
        let x = x.trim().parse().map_err(|_| invalid())?;
        let y = y.trim().parse().map_err(|_| invalid())?;
        Ok(ColourSpec::Location { x, y })
    }
}

impl FromStr for ColourSpec {
    type Err = SplitError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ColourSpec {
    type Error = SplitError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<ColourSpec> for String {
    fn from(spec: ColourSpec) -> Self {
        spec.to_string()
    }
}

impl fmt::Display for ColourSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColourSpec::Fixed(colour) => write!(f, "{}", colour),
            ColourSpec::Location { x, y } => write!(f, "@{},{}", x, y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_parse_fixed() {
        assert_eq!(
            ColourSpec::parse("#585EB5FF").unwrap(),
            ColourSpec::Fixed(Colour::rgba(88, 94, 181, 255))
        );
    }

    #[test]
    fn test_parse_location() {
        assert_eq!(
            ColourSpec::parse("@3, 7").unwrap(),
            ColourSpec::Location { x: 3, y: 7 }
        );
    }

    #[test]
    fn test_parse_invalid_location() {
        assert!(ColourSpec::parse("@3").is_err());
        assert!(ColourSpec::parse("@a,b").is_err());
        assert!(ColourSpec::parse("@-1,0").is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for text in ["#464646FF", "@12,4"] {
            assert_eq!(ColourSpec::parse(text).unwrap().to_string(), text);
        }
    }

    #[test]
    fn test_resolve_fixed_ignores_image() {
        let raster = Raster::from_rgb(RgbImage::new(1, 1));
        let spec = ColourSpec::Fixed(Colour::rgb(1, 2, 3));
        assert_eq!(spec.resolve(&raster).unwrap(), Colour::rgb(1, 2, 3));
    }

    #[test]
    fn test_resolve_location_samples_xy() {
        let mut img = RgbImage::from_pixel(3, 2, Rgb([0, 0, 0]));
        img.put_pixel(2, 1, Rgb([4, 5, 6]));
        let raster = Raster::from_rgb(img);

        let spec = ColourSpec::Location { x: 2, y: 1 };
        assert_eq!(spec.resolve(&raster).unwrap(), Colour::rgb(4, 5, 6));
    }

    #[test]
    fn test_resolve_location_out_of_bounds() {
        let raster = Raster::from_rgb(RgbImage::new(2, 2));
        let err = ColourSpec::Location { x: 5, y: 0 }.resolve(&raster).unwrap_err();
        assert!(matches!(err, SplitError::Configuration { .. }));
    }

    #[test]
    fn test_deserialize_from_yaml_string() {
        let spec: ColourSpec = serde_yaml::from_str("'@0,0'").unwrap();
        assert_eq!(spec, ColourSpec::Location { x: 0, y: 0 });
    }
}
