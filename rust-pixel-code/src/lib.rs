#![warn(missing_docs)]

//! Reversible text encoding of small square images: every pixel becomes a pixel code such as
//! `32H11_FF0000` (grid size, row label, column, color), and an image becomes a JSON document
//! mapping row labels to their codes.
/// Pixel code encoding and decoding
pub mod code;
/// RGBA colors and the color token resolver
pub mod color;
mod error;
pub mod extract;
/// Rows of pixel codes and the JSON container document
pub mod grid;
/// The row label alphabet
pub mod label;
/// Square RGBA bitmaps
pub mod raster;

pub use code::{decode, encode, PixelCode};
pub use color::{resolve, Rgba};
pub use error::{Error, Result};
pub use grid::{DecodeOptions, DecodePolicy, PixelGrid};
pub use label::{index_for, label_for, RowLabel};
pub use raster::Raster;
