use std::fmt;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    MissingHash,
    BadLength(usize),
    BadDigit { channel: &'static str },
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingHash => write!(f, "color must start with '#'"),
            Self::BadLength(len) => write!(f, "expected #rrggbb (7 chars), got {len} chars"),
            Self::BadDigit { channel } => write!(f, "invalid hex digits in {channel} channel"),
        }
    }
}

impl std::error::Error for ColorParseError {}

/// Anything that can hand out fresh colors for unseen palette buckets.
pub trait ColorSource {
    fn next_color(&mut self) -> Color;
}

impl ColorSource for fastrand::Rng {
    fn next_color(&mut self) -> Color {
        Color::random_with(self)
    }
}

/// Hands out a fixed list of colors in order, then repeats it.
#[derive(Debug, Clone)]
pub struct CycleSource {
    colors: Vec<Color>,
    next: usize,
}

impl CycleSource {
    pub fn new(colors: Vec<Color>) -> Self {
        Self { colors, next: 0 }
    }
}

impl ColorSource for CycleSource {
    fn next_color(&mut self) -> Color {
        if self.colors.is_empty() {
            return Color::BLACK;
        }
        let c = self.colors[self.next % self.colors.len()];
        self.next = self.next.wrapping_add(1);
        c
    }
}

const CHANNELS: [&str; 3] = ["red", "green", "blue"];

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Uniform random color from the thread-local generator.
    pub fn random() -> Self {
        Self::rgb(fastrand::u8(..), fastrand::u8(..), fastrand::u8(..))
    }

    pub fn random_with(rng: &mut fastrand::Rng) -> Self {
        Self::rgb(rng.u8(..), rng.u8(..), rng.u8(..))
    }

    /// `#rrggbb`, lowercase, zero padded.
    pub fn to_hex_string(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Lenient decode used on the render path: any channel that is missing or
    /// does not parse as two hex digits decodes to 0.
    pub fn from_hex_string(s: &str) -> Self {
        let body = s.strip_prefix('#').unwrap_or(s);
        let channel = |i: usize| -> u8 {
            body.get(i * 2..i * 2 + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .unwrap_or(0)
        };
        Self::rgb(channel(0), channel(1), channel(2))
    }

    /// Strict decode; rejects anything that is not exactly `#rrggbb`.
    pub fn parse_hex(s: &str) -> Result<Self, ColorParseError> {
        let s = s.trim();
        let body = s.strip_prefix('#').ok_or(ColorParseError::MissingHash)?;
        if body.len() != 6 || !body.is_ascii() {
            return Err(ColorParseError::BadLength(s.chars().count()));
        }
        let mut out = [0u8; 3];
        for (i, slot) in out.iter_mut().enumerate() {
            let pair = &body[i * 2..i * 2 + 2];
            // from_str_radix accepts a leading '+', which is not a hex digit here.
            if !pair.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(ColorParseError::BadDigit {
                    channel: CHANNELS[i],
                });
            }
            *slot = u8::from_str_radix(pair, 16).map_err(|_| ColorParseError::BadDigit {
                channel: CHANNELS[i],
            })?;
        }
        Ok(Self::rgb(out[0], out[1], out[2]))
    }

    /// Channel-wise linear blend from `self` (t=0) to `other` (t=1), rounded to nearest.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let mix = |a: u8, b: u8| -> u8 {
            let a = a as f64;
            let b = b as f64;
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        };
        Self::rgb(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    /// Rec. 709 luma in 0..=255, used to pick readable text over a swatch.
    pub fn luma(self) -> u8 {
        let l = 0.2126 * self.r as f32 + 0.7152 * self.g as f32 + 0.0722 * self.b as f32;
        l.round().clamp(0.0, 255.0) as u8
    }

    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Color {
        Color::rgb(
            self.r.saturating_add(rhs.r),
            self.g.saturating_add(rhs.g),
            self.b.saturating_add(rhs.b),
        )
    }
}

impl Sub for Color {
    type Output = Color;

    fn sub(self, rhs: Color) -> Color {
        Color::rgb(
            self.r.saturating_sub(rhs.r),
            self.g.saturating_sub(rhs.g),
            self.b.saturating_sub(rhs.b),
        )
    }
}

impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, k: f64) -> Color {
        let k = if k.is_finite() { k.max(0.0) } else { 0.0 };
        let scale = |c: u8| (c as f64 * k).round().clamp(0.0, 255.0) as u8;
        Color::rgb(scale(self.r), scale(self.g), scale(self.b))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_string())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_decode_zeroes_bad_channels() {
        assert_eq!(Color::from_hex_string("#zz10ff"), Color::rgb(0, 0x10, 0xff));
        assert_eq!(Color::from_hex_string("#ab"), Color::rgb(0xab, 0, 0));
        assert_eq!(Color::from_hex_string(""), Color::BLACK);
        assert_eq!(Color::from_hex_string("#ééé"), Color::BLACK);
    }

    #[test]
    fn strict_decode_rejects_plus_sign() {
        assert!(matches!(
            Color::parse_hex("#+1ffff"),
            Err(ColorParseError::BadDigit { channel: "red" })
        ));
    }

    #[test]
    fn lerp_endpoints_are_exact() {
        let a = Color::rgb(10, 200, 33);
        let b = Color::rgb(250, 0, 34);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, f64::NAN), a);
    }
}
