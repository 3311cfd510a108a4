mod geometry;
mod library;
mod options;

pub use geometry::{diagonal, distance, polar_angle, wave, Point, HEIGHT, WIDTH};
pub use options::{
    Bands, Constraints, FilterOptions, FilterParams, LineParams, OptionKey, OptionsError,
    RingParams, SectorParams, WavyRingParams,
};

use std::collections::HashSet;
use std::fmt;

pub type FilterFn = fn(x: f64, y: f64, opts: &FilterOptions) -> f64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParamShape {
    Ring,
    WavyRing,
    Sector,
    Line,
}

/// A named bucket-index function plus what it needs to know about options.
pub struct Filter {
    name: &'static str,
    func: FilterFn,
    shape: ParamShape,
    default_number: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    OutOfBounds { x: u32, y: u32 },
    UnknownFilter(String),
    InvalidRegistry(String),
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { x, y } => {
                write!(f, "pixel ({x},{y}) outside {WIDTH}x{HEIGHT} raster")
            }
            Self::UnknownFilter(name) => write!(f, "unknown filter '{name}'"),
            Self::InvalidRegistry(msg) => write!(f, "invalid filter registry: {msg}"),
        }
    }
}

impl std::error::Error for FilterError {}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter").field("name", &self.name).finish()
    }
}

impl PartialEq for Filter {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

const fn entry(name: &'static str, func: FilterFn, shape: ParamShape, default_number: u32) -> Filter {
    Filter {
        name,
        func,
        shape,
        default_number,
    }
}

static FILTERS: [Filter; 14] = [
    entry("circles", library::circles, ParamShape::Ring, 8),
    entry("wavyCircles", library::wavy_circles, ParamShape::WavyRing, 8),
    entry("beams", library::beams, ParamShape::Sector, 16),
    entry("wavyBeams", library::wavy_beams, ParamShape::Sector, 16),
    entry("diagonalsBT", library::diagonals_bt, ParamShape::Line, 16),
    entry("wavyDiagonalsBT", library::wavy_diagonals_bt, ParamShape::Line, 16),
    entry("diagonalsTB", library::diagonals_tb, ParamShape::Line, 16),
    entry("wavyDiagonalsTB", library::wavy_diagonals_tb, ParamShape::Line, 16),
    entry("horizontals", library::horizontals, ParamShape::Line, 16),
    entry("wavyHorizontals", library::wavy_horizontals, ParamShape::Line, 16),
    entry("verticals", library::verticals, ParamShape::Line, 16),
    entry("wavyVerticals", library::wavy_verticals, ParamShape::Line, 16),
    entry("spiral", library::spiral, ParamShape::Sector, 16),
    entry("circlyBeams", library::circly_beams, ParamShape::Ring, 16),
];

/// Every filter, in display order.
pub fn list_filters() -> &'static [Filter] {
    &FILTERS
}

/// Look a filter up by exact name, then case-insensitively, then by a
/// case-insensitive substring that matches exactly one filter.
pub fn find_filter(query: &str) -> Result<&'static Filter, FilterError> {
    let q = query.trim();
    if let Some(f) = FILTERS.iter().find(|f| f.name == q) {
        return Ok(f);
    }
    let q_l = q.to_lowercase();
    if let Some(f) = FILTERS.iter().find(|f| f.name.to_lowercase() == q_l) {
        return Ok(f);
    }
    let mut hits = FILTERS
        .iter()
        .filter(|f| !q_l.is_empty() && f.name.to_lowercase().contains(&q_l));
    match (hits.next(), hits.next()) {
        (Some(f), None) => Ok(f),
        _ => Err(FilterError::UnknownFilter(q.to_string())),
    }
}

/// A uniformly chosen filter with the fixed sampling option set.
pub fn random_filter(rng: &mut fastrand::Rng) -> (&'static Filter, FilterOptions) {
    let f = &FILTERS[rng.usize(..FILTERS.len())];
    (f, FilterOptions::default().with_thickness(15.0))
}

/// Startup check of the registry. A failure here is a programming error.
pub fn validate_registry() -> Result<(), FilterError> {
    let mut seen = HashSet::new();
    for f in &FILTERS {
        if f.name.trim().is_empty() {
            return Err(FilterError::InvalidRegistry("empty filter name".to_string()));
        }
        if !seen.insert(f.name) {
            return Err(FilterError::InvalidRegistry(format!("duplicate filter '{}'", f.name)));
        }
        if f.default_number == 0 {
            return Err(FilterError::InvalidRegistry(format!(
                "filter '{}' has zero default bucket count",
                f.name
            )));
        }
    }
    Ok(())
}

impl Filter {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn index(&self) -> usize {
        FILTERS
            .iter()
            .position(|f| f.name == self.name)
            .unwrap_or(0)
    }

    pub fn by_index(idx: usize) -> Option<&'static Filter> {
        FILTERS.get(idx)
    }

    pub fn next(&self) -> &'static Filter {
        &FILTERS[(self.index() + 1) % FILTERS.len()]
    }

    pub fn prev(&self) -> &'static Filter {
        &FILTERS[(self.index() + FILTERS.len() - 1) % FILTERS.len()]
    }

    pub fn default_number(&self) -> u32 {
        self.default_number
    }

    /// Option keys this filter reads.
    pub fn accepts(&self) -> &'static [OptionKey] {
        use OptionKey::*;
        match self.shape {
            ParamShape::Ring => &[Number, Thickness, OriginX, OriginY],
            ParamShape::WavyRing => &[Number, Thickness, Frequency, Amplitude, Phase, OriginX, OriginY],
            ParamShape::Sector => &[Number, Thickness, Phase, OriginX, OriginY],
            ParamShape::Line => &[Number, Thickness],
        }
    }

    pub fn accepts_key(&self, key: OptionKey) -> bool {
        self.accepts().contains(&key)
    }

    /// The filter's own defaults for every key it accepts (thickness stays unset).
    pub fn defaults(&self) -> FilterOptions {
        let mut o = FilterOptions::default().with_number(self.default_number as i64);
        match self.shape {
            ParamShape::Ring => o = o.with_origin(Point::center()),
            ParamShape::WavyRing => {
                o = o
                    .with_frequency(WavyRingParams::DEFAULT_FREQUENCY)
                    .with_amplitude(WavyRingParams::DEFAULT_AMPLITUDE)
                    .with_phase(0.0)
                    .with_origin(Point::center());
            }
            ParamShape::Sector => o = o.with_phase(0.0).with_origin(Point::center()),
            ParamShape::Line => {}
        }
        o
    }

    /// Default for a single key, used when the front-end nudges an unset field.
    pub fn default_for(&self, key: OptionKey) -> f64 {
        self.defaults().get(key).unwrap_or(key.constraints().min)
    }

    pub fn params(&self, opts: &FilterOptions) -> FilterParams {
        let n = self.default_number;
        match self.shape {
            ParamShape::Ring => FilterParams::Ring(RingParams::from_options(opts, n)),
            ParamShape::WavyRing => FilterParams::WavyRing(WavyRingParams::from_options(opts, n)),
            ParamShape::Sector => FilterParams::Sector(SectorParams::from_options(opts, n)),
            ParamShape::Line => FilterParams::Line(LineParams::from_options(opts, n)),
        }
    }

    /// Bucket coordinate for a pixel inside the raster.
    pub fn eval(&self, x: u32, y: u32, opts: &FilterOptions) -> Result<f64, FilterError> {
        if x >= WIDTH || y >= HEIGHT {
            return Err(FilterError::OutOfBounds { x, y });
        }
        Ok(self.eval_unchecked(x as f64, y as f64, opts))
    }

    /// Same as [`Filter::eval`] without the bounds check; the raster loop
    /// only ever passes in-range coordinates.
    #[inline]
    pub fn eval_unchecked(&self, x: f64, y: f64, opts: &FilterOptions) -> f64 {
        (self.func)(x, y, opts)
    }
}
