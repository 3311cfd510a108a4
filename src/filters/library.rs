//! The filter functions themselves.
//!
//! Every function maps a pixel to a non-negative bucket coordinate. Angular
//! filters wrap their result into `[0, modulus)`; the rest are bounded by the
//! fixed raster size.

use super::geometry::{diagonal, distance, polar_angle, to_degrees, to_radians, wave, wrap, HEIGHT, WIDTH};
use super::options::{Bands, FilterOptions, LineParams, RingParams, SectorParams, WavyRingParams};
use std::f64::consts::PI;

const W: f64 = WIDTH as f64;
const H: f64 = HEIGHT as f64;

// Ripple shapes shared by the wavy line families.
const LINE_WAVE_AMP: f64 = 5.0;
const LINE_WAVE_FREQ: f64 = 0.2;
const BEAM_WAVE_AMP: f64 = 3.0;
const BEAM_WAVE_FREQ: f64 = 0.2;
const CIRCLY_WAVE_AMP: f64 = 10.0;

fn radial_unit(bands: Bands) -> f64 {
    // Ring bands are sized as radii: half a span across the full width.
    bands.span(W) / 2.0
}

/// Integer bucket shift that lifts `x - y` (down to `-(H - 1)`) above zero
/// without moving band edges or fractional parts.
fn tb_shift(span: f64) -> f64 {
    (H / span).ceil()
}

pub(super) fn circles(x: f64, y: f64, opts: &FilterOptions) -> f64 {
    let p = RingParams::from_options(opts, 8);
    distance(x, y, p.origin) / radial_unit(p.bands)
}

pub(super) fn wavy_circles(x: f64, y: f64, opts: &FilterOptions) -> f64 {
    let p = WavyRingParams::from_options(opts, 8);
    let phi = polar_angle(x, y, p.origin) + to_radians(p.phase);
    let dist = distance(x, y, p.origin) / radial_unit(p.bands);
    dist + ((phi * p.frequency).sin() + 1.0) * dist / 10.0 * p.amplitude
}

pub(super) fn beams(x: f64, y: f64, opts: &FilterOptions) -> f64 {
    let p = SectorParams::from_options(opts, 16);
    let phi = polar_angle(x, y, p.origin) + PI;
    let deg = to_degrees(phi) + p.phase;
    wrap(deg / p.bands.span(360.0), p.bands.modulus())
}

pub(super) fn wavy_beams(x: f64, y: f64, opts: &FilterOptions) -> f64 {
    let p = SectorParams::from_options(opts, 16);
    let dist = distance(x, y, p.origin);
    // A full turn is a whole number of sectors, so folding into [0, 360)
    // before the ripple leaves the final bucket unchanged.
    let deg = wrap(to_degrees(polar_angle(x, y, p.origin)), 360.0) + p.phase;
    let wavy = wave(deg, dist, BEAM_WAVE_AMP, BEAM_WAVE_FREQ, 0.0) / p.bands.span(360.0);
    wrap(wavy, p.bands.modulus())
}

pub(super) fn diagonals_bt(x: f64, y: f64, opts: &FilterOptions) -> f64 {
    let p = LineParams::from_options(opts, 16);
    (x + y) / p.bands.span(diagonal())
}

pub(super) fn wavy_diagonals_bt(x: f64, y: f64, opts: &FilterOptions) -> f64 {
    let p = LineParams::from_options(opts, 16);
    wave(x + y, x - y, LINE_WAVE_AMP, LINE_WAVE_FREQ, 0.0) / p.bands.span(diagonal())
}

pub(super) fn diagonals_tb(x: f64, y: f64, opts: &FilterOptions) -> f64 {
    let p = LineParams::from_options(opts, 16);
    let span = p.bands.span(diagonal());
    (x - y) / span + tb_shift(span)
}

pub(super) fn wavy_diagonals_tb(x: f64, y: f64, opts: &FilterOptions) -> f64 {
    let p = LineParams::from_options(opts, 16);
    let span = p.bands.span(diagonal());
    wave(x - y, x + y, LINE_WAVE_AMP, LINE_WAVE_FREQ, 0.0) / span + tb_shift(span)
}

pub(super) fn horizontals(_x: f64, y: f64, opts: &FilterOptions) -> f64 {
    let p = LineParams::from_options(opts, 16);
    y / p.bands.span(H)
}

pub(super) fn wavy_horizontals(x: f64, y: f64, opts: &FilterOptions) -> f64 {
    let p = LineParams::from_options(opts, 16);
    wave(y, x, LINE_WAVE_AMP, LINE_WAVE_FREQ, 0.0) / p.bands.span(H)
}

pub(super) fn verticals(x: f64, _y: f64, opts: &FilterOptions) -> f64 {
    let p = LineParams::from_options(opts, 16);
    x / p.bands.span(W)
}

pub(super) fn wavy_verticals(x: f64, y: f64, opts: &FilterOptions) -> f64 {
    let p = LineParams::from_options(opts, 16);
    wave(x, y, LINE_WAVE_AMP, LINE_WAVE_FREQ, 0.0) / p.bands.span(W)
}

pub(super) fn spiral(x: f64, y: f64, opts: &FilterOptions) -> f64 {
    let p = SectorParams::from_options(opts, 16);
    let dist = distance(x, y, p.origin);
    let phi = polar_angle(x, y, p.origin) + PI + to_radians(p.phase);
    let beam = to_degrees(phi);
    let m = p.bands.modulus();
    wrap(m * (beam + dist) / 360.0, m)
}

pub(super) fn circly_beams(x: f64, y: f64, opts: &FilterOptions) -> f64 {
    let p = RingParams::from_options(opts, 16);
    let dist = distance(x, y, p.origin);
    let deg = to_degrees(polar_angle(x, y, p.origin) + PI);
    let m = p.bands.modulus();
    let wavy = match p.bands {
        Bands::Count(n) => {
            wave(deg + n as f64, dist * dist, CIRCLY_WAVE_AMP, BEAM_WAVE_FREQ, 0.0) / (360.0 / n as f64)
        }
        Bands::Thickness(t) => {
            wave(deg + m, dist * dist, BEAM_WAVE_AMP, BEAM_WAVE_FREQ, 0.0) / t
        }
    };
    wrap(wavy, m)
}
