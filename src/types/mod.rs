//! Core domain types for shapesplit.
//!
//! - `Colour` - RGB or RGBA pixel values
//! - `Point` - row/column grid coordinates

mod colour;
mod point;

pub use colour::Colour;
pub use point::Point;
