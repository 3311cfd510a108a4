//! Parametric bucket filters and the palette/raster pipeline behind the
//! terminal sandbox.
//!
//! A filter maps each pixel of a fixed 350x350 raster to a bucket coordinate;
//! the palette maps buckets to colors, allocating a random color the first
//! time a bucket is seen. [`raster::build_raster`] ties the two together.

pub mod app;
pub mod color;
pub mod config;
pub mod filters;
pub mod palette;
pub mod raster;
pub mod render;
pub mod session;
pub mod terminal;
