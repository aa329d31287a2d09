//! Square padding for exported sprites.
//!
//! Centres every non-square PNG under a directory on a square canvas filled
//! with the background colour, overwriting the file in place.

use std::path::{Path, PathBuf};

use image::{imageops, Rgb, RgbImage};
use walkdir::WalkDir;

use crate::error::{Result, SplitError};
use crate::export::save_rgb;
use crate::types::Colour;

/// Counts from a squaring pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SquareSummary {
    pub already_square: usize,
    /// Files that were padded, with their original `(width, height)`.
    pub fixed: Vec<(PathBuf, u32, u32)>,
}

impl SquareSummary {
    pub fn total(&self) -> usize {
        self.already_square + self.fixed.len()
    }
}

/// Centre `img` on a `max(w, h)` square canvas of `background`.
pub fn pad_to_square(img: &RgbImage, background: Colour) -> RgbImage {
    let (w, h) = img.dimensions();
    let size = w.max(h);
    let mut canvas = RgbImage::from_pixel(size, size, Rgb(background.to_rgb()));
    let x = (size - w) / 2;
    let y = (size - h) / 2;
    imageops::replace(&mut canvas, img, i64::from(x), i64::from(y));
    canvas
}

/// Square every `.png` under `dir`, recursively, in sorted order.
pub fn square_directory(dir: &Path, background: Colour) -> Result<SquareSummary> {
    if !dir.is_dir() {
        return Err(SplitError::Io {
            path: dir.to_path_buf(),
            message: "Not a directory".to_string(),
        });
    }

    let mut summary = SquareSummary::default();

    let walker = WalkDir::new(dir).sort_by_file_name().into_iter();
    for entry in walker.filter_map(|e| e.ok()) {
        let path = entry.path();
        if !entry.file_type().is_file() || !is_png(path) {
            continue;
        }

        let img = image::open(path)
            .map_err(|e| SplitError::Image {
                path: path.to_path_buf(),
                message: format!("Failed to load image: {}", e),
            })?
            .to_rgb8();

        let (w, h) = img.dimensions();
        if w == h {
            summary.already_square += 1;
            continue;
        }

        save_rgb(&pad_to_square(&img, background), path)?;
        summary.fixed.push((path.to_path_buf(), w, h));
    }

    Ok(summary)
}

fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"))
}
