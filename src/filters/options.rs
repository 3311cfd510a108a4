use super::geometry::{HEIGHT, Point, WIDTH};
use std::fmt;

/// Parameters as the front-end edits them: every field optional.
///
/// Filters never read this directly; each one resolves it into its own
/// parameter struct (see [`RingParams`] and friends) with its own defaults.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FilterOptions {
    pub number: Option<i64>,
    pub thickness: Option<f64>,
    pub frequency: Option<f64>,
    pub amplitude: Option<f64>,
    pub phase: Option<f64>,
    pub origin: Option<Point>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKey {
    Number,
    Thickness,
    Frequency,
    Amplitude,
    Phase,
    OriginX,
    OriginY,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraints {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OptionsError {
    InvalidBucketCount(i64),
    NotFinite(&'static str),
    OutOfRange { key: &'static str, value: f64 },
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBucketCount(n) => write!(f, "number must be a positive integer, got {n}"),
            Self::NotFinite(key) => write!(f, "{key} must be a finite number"),
            Self::OutOfRange { key, value } => write!(f, "{key} out of range: {value}"),
        }
    }
}

impl std::error::Error for OptionsError {}

impl OptionKey {
    pub const fn all() -> [Self; 7] {
        [
            Self::Number,
            Self::Thickness,
            Self::Frequency,
            Self::Amplitude,
            Self::Phase,
            Self::OriginX,
            Self::OriginY,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Thickness => "thickness",
            Self::Frequency => "frequency",
            Self::Amplitude => "amplitude",
            Self::Phase => "phase",
            Self::OriginX => "origin.x",
            Self::OriginY => "origin.y",
        }
    }

    /// Slider limits for the sandbox controls.
    pub fn constraints(self) -> Constraints {
        match self {
            Self::Number => Constraints { min: 1.0, max: 100.0, step: 1.0 },
            Self::Phase => Constraints { min: 0.0, max: 360.0, step: 1.0 },
            Self::OriginX => Constraints { min: 0.0, max: WIDTH as f64, step: 5.0 },
            Self::OriginY => Constraints { min: 0.0, max: HEIGHT as f64, step: 5.0 },
            _ => Constraints { min: 0.0, max: 30.0, step: 1.0 },
        }
    }
}

impl FilterOptions {
    pub fn with_number(mut self, n: i64) -> Self {
        self.number = Some(n);
        self
    }

    pub fn with_thickness(mut self, t: f64) -> Self {
        self.thickness = Some(t);
        self
    }

    pub fn with_frequency(mut self, v: f64) -> Self {
        self.frequency = Some(v);
        self
    }

    pub fn with_amplitude(mut self, v: f64) -> Self {
        self.amplitude = Some(v);
        self
    }

    pub fn with_phase(mut self, deg: f64) -> Self {
        self.phase = Some(deg);
        self
    }

    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Strict check for values coming from the outside world.
    ///
    /// Evaluation itself never fails on bad options (it falls back to
    /// defaults); this is for rejecting input at the edge.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if let Some(n) = self.number {
            if n <= 0 {
                return Err(OptionsError::InvalidBucketCount(n));
            }
        }
        for (key, v) in [
            ("thickness", self.thickness),
            ("frequency", self.frequency),
            ("amplitude", self.amplitude),
            ("phase", self.phase),
        ] {
            if let Some(v) = v {
                if !v.is_finite() {
                    return Err(OptionsError::NotFinite(key));
                }
            }
        }
        if let Some(t) = self.thickness {
            if t <= 0.0 {
                return Err(OptionsError::OutOfRange { key: "thickness", value: t });
            }
        }
        if let Some(o) = self.origin {
            if !o.is_finite() {
                return Err(OptionsError::NotFinite("origin"));
            }
        }
        Ok(())
    }

    pub fn get(&self, key: OptionKey) -> Option<f64> {
        match key {
            OptionKey::Number => self.number.map(|n| n as f64),
            OptionKey::Thickness => self.thickness,
            OptionKey::Frequency => self.frequency,
            OptionKey::Amplitude => self.amplitude,
            OptionKey::Phase => self.phase,
            OptionKey::OriginX => self.origin.map(|o| o.x),
            OptionKey::OriginY => self.origin.map(|o| o.y),
        }
    }

    /// Set a field; `None` clears it back to the filter default.
    pub fn set(&mut self, key: OptionKey, value: Option<f64>) {
        match key {
            OptionKey::Number => self.number = value.map(|v| v.round() as i64),
            OptionKey::Thickness => self.thickness = value,
            OptionKey::Frequency => self.frequency = value,
            OptionKey::Amplitude => self.amplitude = value,
            OptionKey::Phase => self.phase = value,
            OptionKey::OriginX | OptionKey::OriginY => {
                let Some(v) = value else {
                    self.origin = None;
                    return;
                };
                let mut o = self.origin.unwrap_or_default();
                if key == OptionKey::OriginX {
                    o.x = v;
                } else {
                    o.y = v;
                }
                self.origin = Some(o);
            }
        }
    }

    /// Move a field by `steps` slider steps, clamped to its constraints.
    /// An unset field starts from `fallback` (the filter's default).
    pub fn nudge(&mut self, key: OptionKey, steps: i32, fallback: f64) {
        let c = key.constraints();
        let cur = self.get(key).unwrap_or(fallback);
        let next = (cur + c.step * steps as f64).clamp(c.min, c.max);
        self.set(key, Some(next));
    }
}

/// How a filter carves its axis into buckets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bands {
    /// A fixed number of buckets across the axis.
    Count(u32),
    /// Buckets of a fixed width (pixels, or degrees for angular filters).
    Thickness(f64),
}

impl Bands {
    /// Resolve `number`/`thickness`; a usable thickness wins over `number`,
    /// and a non-positive `number` falls back to `default_number`.
    pub fn resolve(opts: &FilterOptions, default_number: u32) -> Self {
        if let Some(t) = opts.thickness.filter(|t| t.is_finite() && *t > 0.0) {
            return Self::Thickness(t);
        }
        let n = match opts.number {
            Some(n) if n > 0 => u32::try_from(n).unwrap_or(u32::MAX),
            _ => default_number.max(1),
        };
        Self::Count(n)
    }

    /// Width of one band along an axis of length `extent`.
    pub fn span(self, extent: f64) -> f64 {
        match self {
            Self::Count(n) => extent / n as f64,
            Self::Thickness(t) => t,
        }
    }

    /// Band count over a full turn, used as the wrap modulus for angles.
    pub fn modulus(self) -> f64 {
        match self {
            Self::Count(n) => n as f64,
            Self::Thickness(t) => 360.0 / t,
        }
    }
}

fn finite_or(v: Option<f64>, default: f64) -> f64 {
    v.filter(|v| v.is_finite()).unwrap_or(default)
}

fn origin_or_center(opts: &FilterOptions) -> Point {
    opts.origin.filter(|o| o.is_finite()).unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingParams {
    pub bands: Bands,
    pub origin: Point,
}

impl RingParams {
    pub fn from_options(opts: &FilterOptions, default_number: u32) -> Self {
        Self {
            bands: Bands::resolve(opts, default_number),
            origin: origin_or_center(opts),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WavyRingParams {
    pub bands: Bands,
    pub origin: Point,
    pub frequency: f64,
    pub amplitude: f64,
    pub phase: f64,
}

impl WavyRingParams {
    pub const DEFAULT_FREQUENCY: f64 = 10.0;
    pub const DEFAULT_AMPLITUDE: f64 = 1.0;

    pub fn from_options(opts: &FilterOptions, default_number: u32) -> Self {
        Self {
            bands: Bands::resolve(opts, default_number),
            origin: origin_or_center(opts),
            frequency: finite_or(opts.frequency, Self::DEFAULT_FREQUENCY),
            amplitude: finite_or(opts.amplitude, Self::DEFAULT_AMPLITUDE),
            phase: finite_or(opts.phase, 0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectorParams {
    pub bands: Bands,
    pub origin: Point,
    pub phase: f64,
}

impl SectorParams {
    pub fn from_options(opts: &FilterOptions, default_number: u32) -> Self {
        Self {
            bands: Bands::resolve(opts, default_number),
            origin: origin_or_center(opts),
            phase: finite_or(opts.phase, 0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineParams {
    pub bands: Bands,
}

impl LineParams {
    pub fn from_options(opts: &FilterOptions, default_number: u32) -> Self {
        Self {
            bands: Bands::resolve(opts, default_number),
        }
    }
}

/// Resolved parameters of any filter, for display and inspection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterParams {
    Ring(RingParams),
    WavyRing(WavyRingParams),
    Sector(SectorParams),
    Line(LineParams),
}

impl FilterParams {
    pub fn bands(&self) -> Bands {
        match self {
            Self::Ring(p) => p.bands,
            Self::WavyRing(p) => p.bands,
            Self::Sector(p) => p.bands,
            Self::Line(p) => p.bands,
        }
    }

    pub fn summary(&self) -> String {
        let bands = match self.bands() {
            Bands::Count(n) => format!("n={n}"),
            Bands::Thickness(t) => format!("thick={t:.0}"),
        };
        match self {
            Self::Ring(p) => format!("{bands} o=({:.0},{:.0})", p.origin.x, p.origin.y),
            Self::WavyRing(p) => format!(
                "{bands} f={:.0} a={:.0} ph={:.0} o=({:.0},{:.0})",
                p.frequency, p.amplitude, p.phase, p.origin.x, p.origin.y
            ),
            Self::Sector(p) => format!(
                "{bands} ph={:.0} o=({:.0},{:.0})",
                p.phase, p.origin.x, p.origin.y
            ),
            Self::Line(_) => bands,
        }
    }
}
