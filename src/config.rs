use crate::color::Color;
use crate::filters::{FilterOptions, OptionsError, Point};
use clap::{Parser, ValueEnum};

#[derive(Parser, Debug, Clone)]
#[command(name = "wavy-sandbox", version, about = "Parametric bucket-filter art sandbox for true-color terminals")]
pub struct Config {
    #[arg(long, value_enum, default_value_t = Mode::Sandbox)]
    pub mode: Mode,

    /// Filter name (or unique part of it) or registry index.
    #[arg(long, default_value = "wavyCircles")]
    pub filter: String,

    #[arg(long, default_value_t = 16, allow_negative_numbers = true)]
    pub number: i64,

    #[arg(long)]
    pub thickness: Option<f64>,

    #[arg(long, default_value_t = 5.0)]
    pub frequency: f64,

    #[arg(long, default_value_t = 1.0)]
    pub amplitude: f64,

    #[arg(long, default_value_t = 0.0)]
    pub phase: f64,

    /// Center for radial filters, as X,Y in raster pixels.
    #[arg(long, value_parser = parse_point)]
    pub origin: Option<Point>,

    #[arg(long, default_value_t = false)]
    pub lerp: bool,

    #[arg(long, default_value_t = 24)]
    pub fps: u32,

    /// Seed for palette colors; random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Color painted onto clicked buckets.
    #[arg(long, default_value = "#000000", value_parser = parse_color)]
    pub pen: Color,

    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub sync_updates: bool,

    #[arg(long, default_value_t = false)]
    pub list_filters: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Sandbox,
    Gallery,
}

impl Mode {
    pub fn toggle(self) -> Self {
        match self {
            Self::Sandbox => Self::Gallery,
            Self::Gallery => Self::Sandbox,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Sandbox => "sandbox",
            Self::Gallery => "gallery",
        }
    }
}

impl Config {
    /// Sandbox starting options, mirroring the CLI flags.
    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            number: Some(self.number),
            thickness: self.thickness,
            frequency: Some(self.frequency),
            amplitude: Some(self.amplitude),
            phase: Some(self.phase),
            origin: Some(self.origin.unwrap_or_default()),
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.fps == 0 {
            anyhow::bail!("--fps must be >= 1");
        }
        self.filter_options()
            .validate()
            .map_err(|e: OptionsError| anyhow::anyhow!("invalid filter options: {e}"))
    }

    pub fn rng(&self) -> fastrand::Rng {
        match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        }
    }
}

pub fn parse_point(raw: &str) -> Result<Point, String> {
    let (x, y) = raw
        .split_once(',')
        .ok_or_else(|| "expected X,Y".to_string())?;
    let x = x
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("invalid x coordinate '{}'", x.trim()))?;
    let y = y
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("invalid y coordinate '{}'", y.trim()))?;
    let p = Point::new(x, y);
    if !p.is_finite() {
        return Err("origin must be finite".to_string());
    }
    Ok(p)
}

pub fn parse_color(raw: &str) -> Result<Color, String> {
    Color::parse_hex(raw).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_sandbox_start() {
        let cfg = Config::parse_from(["wavy-sandbox"]);
        let o = cfg.filter_options();
        assert_eq!(o.number, Some(16));
        assert_eq!(o.frequency, Some(5.0));
        assert_eq!(o.amplitude, Some(1.0));
        assert_eq!(o.phase, Some(0.0));
        assert_eq!(o.origin, Some(Point::center()));
        assert_eq!(cfg.pen, Color::BLACK);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_number_is_rejected() {
        let cfg = Config::parse_from(["wavy-sandbox", "--number", "0"]);
        assert!(cfg.validate().is_err());
        let cfg = Config::parse_from(["wavy-sandbox", "--number", "-4"]);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn origin_and_pen_parse() {
        let cfg = Config::parse_from(["wavy-sandbox", "--origin", "10, 20.5", "--pen", "#FF0080"]);
        assert_eq!(cfg.origin, Some(Point::new(10.0, 20.5)));
        assert_eq!(cfg.pen, Color::rgb(255, 0, 128));
        assert!(Config::try_parse_from(["wavy-sandbox", "--pen", "red"]).is_err());
        assert!(Config::try_parse_from(["wavy-sandbox", "--origin", "10"]).is_err());
    }
}
