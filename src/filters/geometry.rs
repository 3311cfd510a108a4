use std::f64::consts::PI;

pub const WIDTH: u32 = 350;
pub const HEIGHT: u32 = 350;

/// Length used to size diagonal bands: `sqrt(2 * (W^2 + H^2))`.
pub fn diagonal() -> f64 {
    let w = WIDTH as f64;
    let h = HEIGHT as f64;
    (2.0 * (w * w + h * h)).sqrt()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn center() -> Self {
        Self::new(WIDTH as f64 / 2.0, HEIGHT as f64 / 2.0)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::center()
    }
}

pub fn distance(x: f64, y: f64, origin: Point) -> f64 {
    let dx = x - origin.x;
    let dy = y - origin.y;
    (dx * dx + dy * dy).sqrt()
}

/// Polar angle of the pixel around `origin`, in radians.
///
/// The arguments are `atan2(dx, dy)`: angle 0 points along +y,
/// which fixes the orientation of every angular pattern.
pub fn polar_angle(x: f64, y: f64, origin: Point) -> f64 {
    (x - origin.x).atan2(y - origin.y)
}

pub fn to_degrees(rad: f64) -> f64 {
    rad / (PI * 2.0) * 360.0
}

pub fn to_radians(deg: f64) -> f64 {
    deg / 360.0 * PI * 2.0
}

/// Offset `val` by a non-negative sine ripple keyed on `reference`.
pub fn wave(val: f64, reference: f64, amp: f64, freq: f64, phase: f64) -> f64 {
    val + ((freq * reference + phase).sin() + 1.0) * amp
}

/// Euclidean remainder that tolerates a degenerate modulus.
pub fn wrap(v: f64, modulus: f64) -> f64 {
    if !(modulus.is_finite() && modulus > 0.0) {
        return 0.0;
    }
    let r = v.rem_euclid(modulus);
    // rem_euclid can round up to exactly `modulus` for tiny negative inputs.
    if r >= modulus { 0.0 } else { r }
}
