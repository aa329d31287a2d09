//! Decoded source images.
//!
//! A `Raster` is the read-only pixel grid the classifier and extractor work
//! on. Pixels are stored flat with either 3 or 4 channels depending on
//! whether the decoded image carries alpha.

use std::path::Path;

use image::{DynamicImage, RgbImage, RgbaImage};

use crate::error::{Result, SplitError};
use crate::types::{Colour, Point};

/// An immutable RGB or RGBA pixel grid.
#[derive(Debug, Clone)]
pub struct Raster {
    width: u32,
    height: u32,
    has_alpha: bool,
    data: Vec<u8>,
}

impl Raster {
    /// Decode an image file.
    ///
    /// Indexed PNGs with a transparent palette entry are expanded to RGBA by
    /// the decoder, so they report an alpha channel here.
    pub fn open(path: &Path) -> Result<Self> {
        let img = image::open(path).map_err(|e| SplitError::Image {
            path: path.to_path_buf(),
            message: format!("Failed to load image: {}", e),
        })?;
        Ok(Self::from_dynamic(img))
    }

    /// Wrap an already decoded image, keeping alpha only if its format has it.
    pub fn from_dynamic(img: DynamicImage) -> Self {
        if img.color().has_alpha() {
            Self::from_rgba(img.to_rgba8())
        } else {
            Self::from_rgb(img.to_rgb8())
        }
    }

    pub fn from_rgb(img: RgbImage) -> Self {
        Self {
            width: img.width(),
            height: img.height(),
            has_alpha: false,
            data: img.into_raw(),
        }
    }

    pub fn from_rgba(img: RgbaImage) -> Self {
        Self {
            width: img.width(),
            height: img.height(),
            has_alpha: true,
            data: img.into_raw(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of pixels.
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the pixel format carries a per-pixel alpha channel.
    pub fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    /// Number of channels per pixel (3 or 4).
    pub fn channels(&self) -> usize {
        if self.has_alpha {
            4
        } else {
            3
        }
    }

    /// Whether `point` lies inside the grid.
    pub fn contains(&self, point: Point) -> bool {
        point.row < self.height && point.col < self.width
    }

    /// Flat index of `point`, for dense per-pixel bookkeeping.
    pub fn index_of(&self, point: Point) -> usize {
        point.row as usize * self.width as usize + point.col as usize
    }

    /// Sample the pixel at `point`, or `None` outside the grid.
    pub fn pixel(&self, point: Point) -> Option<Colour> {
        if !self.contains(point) {
            return None;
        }
        let channels = self.channels();
        let start = self.index_of(point) * channels;
        Colour::from_channels(&self.data[start..start + channels])
    }

    /// Sample the pixel at image coordinates `(x, y)`.
    pub fn pixel_xy(&self, x: u32, y: u32) -> Option<Colour> {
        self.pixel(Point::new(y, x))
    }
}
