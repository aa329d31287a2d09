//! Connected-component extraction.
//!
//! Scans a raster in row-major order and grows a component from every
//! unassigned non-transparent pixel with a breadth-first flood fill.

mod component;

pub use component::{BoundingBox, Component};

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::classify::PixelClassifier;
use crate::error::Result;
use crate::raster::Raster;
use crate::types::Point;

/// Axis-aligned neighbour offsets as `(d_row, d_col)`.
static AXIS_NEIGHBOURS: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// Diagonal neighbour offsets as `(d_row, d_col)`.
static DIAGONAL_NEIGHBOURS: [(i32, i32); 4] = [(1, -1), (1, 1), (-1, 1), (-1, -1)];

/// Which pixels count as adjacent when growing a component.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum Connectivity {
    /// Only the four axis-aligned neighbours.
    #[value(name = "4")]
    Four,
    /// Axis-aligned and diagonal neighbours.
    #[default]
    #[value(name = "8")]
    Eight,
}

impl Connectivity {
    /// Neighbour offsets for this adjacency relation.
    pub fn offsets(self) -> impl Iterator<Item = (i32, i32)> {
        let diagonals: &[(i32, i32)] = match self {
            Connectivity::Four => &[],
            Connectivity::Eight => &DIAGONAL_NEIGHBOURS,
        };
        AXIS_NEIGHBOURS.iter().chain(diagonals).copied()
    }
}

impl TryFrom<u8> for Connectivity {
    type Error = String;

    fn try_from(n: u8) -> std::result::Result<Self, Self::Error> {
        match n {
            4 => Ok(Connectivity::Four),
            8 => Ok(Connectivity::Eight),
            other => Err(format!("connectivity must be 4 or 8, got {}", other)),
        }
    }
}

impl From<Connectivity> for u8 {
    fn from(c: Connectivity) -> Self {
        match c {
            Connectivity::Four => 4,
            Connectivity::Eight => 8,
        }
    }
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

/// Partition the non-transparent pixels of `raster` into components.
///
/// Components come back in the order the row-major scan meets their seed
/// pixel. Within a component the seed is first and the rest follow in
/// breadth-first discovery order. Each pixel is assigned at most once, so
/// the scan is linear in the pixel count.
pub fn extract(
    raster: &Raster,
    classifier: &PixelClassifier,
    connectivity: Connectivity,
) -> Result<Vec<Component>> {
    let mut assigned = vec![false; raster.len()];
    let mut queue = VecDeque::new();
    let mut components = Vec::new();

    for row in 0..raster.height() {
        for col in 0..raster.width() {
            let seed = Point::new(row, col);
            let seed_idx = raster.index_of(seed);
            if assigned[seed_idx] || !is_solid(raster, classifier, seed)? {
                continue;
            }

            assigned[seed_idx] = true;
            queue.push_back(seed);
            let mut points = vec![seed];

            while let Some(point) = queue.pop_front() {
                for (d_row, d_col) in connectivity.offsets() {
                    // Off-grid neighbours simply don't exist.
                    let Some(next) = point.offset(d_row, d_col) else {
                        continue;
                    };
                    if !raster.contains(next) {
                        continue;
                    }

                    let idx = raster.index_of(next);
                    if assigned[idx] || !is_solid(raster, classifier, next)? {
                        continue;
                    }

                    assigned[idx] = true;
                    points.push(next);
                    queue.push_back(next);
                }
            }

            components.push(Component::new(points));
        }
    }

    Ok(components)
}

/// Whether the in-bounds pixel at `point` belongs to some component.
fn is_solid(raster: &Raster, classifier: &PixelClassifier, point: Point) -> Result<bool> {
    match raster.pixel(point) {
        Some(pixel) => Ok(!classifier.is_transparent(pixel)?),
        None => Ok(false),
    }
}
