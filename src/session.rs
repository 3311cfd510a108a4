use crate::color::Color;
use crate::filters::{Filter, FilterError, FilterOptions};
use crate::palette::{bucket_of, Palette};
use crate::raster::{build_raster, Raster};

/// One palette lineage plus the filter settings that draw with it.
///
/// The session is the only place a palette lives between frames; every build
/// takes it out, extends it, and puts the result back.
pub struct Session {
    filter: &'static Filter,
    options: FilterOptions,
    interpolate: bool,
    palette: Palette,
    rng: fastrand::Rng,
    raster: Option<Raster>,
}

impl Session {
    pub fn new(filter: &'static Filter, options: FilterOptions, interpolate: bool, rng: fastrand::Rng) -> Self {
        Self {
            filter,
            options,
            interpolate,
            palette: Palette::new(),
            rng,
            raster: None,
        }
    }

    pub fn filter(&self) -> &'static Filter {
        self.filter
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut FilterOptions {
        &mut self.options
    }

    pub fn interpolate(&self) -> bool {
        self.interpolate
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn rng_mut(&mut self) -> &mut fastrand::Rng {
        &mut self.rng
    }

    pub fn set_filter(&mut self, filter: &'static Filter) {
        self.filter = filter;
    }

    pub fn set_options(&mut self, options: FilterOptions) {
        self.options = options;
    }

    pub fn set_interpolate(&mut self, on: bool) {
        self.interpolate = on;
    }

    pub fn reset_palette(&mut self) {
        self.palette = Palette::new();
    }

    /// Build a fresh frame with the current settings.
    pub fn render(&mut self) -> &Raster {
        let palette = std::mem::take(&mut self.palette);
        let (raster, palette) = build_raster(
            self.filter,
            &self.options,
            palette,
            self.interpolate,
            &mut self.rng,
        );
        self.palette = palette;
        self.raster.insert(raster)
    }

    /// Last frame built by [`Session::render`], if any.
    pub fn last_raster(&self) -> Option<&Raster> {
        self.raster.as_ref()
    }

    /// Give the bucket under pixel `(x, y)` a fixed color. Returns the bucket.
    pub fn paint_bucket_at(&mut self, x: u32, y: u32, color: Color) -> Result<u32, FilterError> {
        let index = self.filter.eval(x, y, &self.options)?;
        let bucket = bucket_of(index);
        let palette = std::mem::take(&mut self.palette);
        self.palette = palette.assign(bucket, color);
        log::debug!("{}: bucket {} <- {}", self.filter.name(), bucket, color);
        Ok(bucket)
    }
}
