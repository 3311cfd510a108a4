use crate::color::{Color, ColorSource};
use crate::filters::{Filter, FilterOptions, HEIGHT, WIDTH};
use crate::palette::{bucket_of, resolve_color, resolve_lerp_color, Palette};

const W: usize = WIDTH as usize;
const H: usize = HEIGHT as usize;

/// Raw bucket coordinates for every pixel, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexField {
    values: Vec<f64>,
}

impl IndexField {
    pub fn compute(filter: &Filter, opts: &FilterOptions) -> Self {
        let mut values = Vec::with_capacity(W * H);
        for y in 0..H {
            for x in 0..W {
                values.push(filter.eval_unchecked(x as f64, y as f64, opts));
            }
        }
        Self { values }
    }

    pub fn get(&self, x: u32, y: u32) -> Option<f64> {
        if x >= WIDTH || y >= HEIGHT {
            return None;
        }
        self.values.get(y as usize * W + x as usize).copied()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Distinct floored buckets, ascending.
    pub fn buckets(&self) -> Vec<u32> {
        let mut b: Vec<u32> = self.values.iter().map(|v| bucket_of(*v)).collect();
        b.sort_unstable();
        b.dedup();
        b
    }
}

/// One rendered frame: WIDTH x HEIGHT colors, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    pixels: Vec<Color>,
}

impl Raster {
    pub fn filled(c: Color) -> Self {
        Self {
            pixels: vec![c; W * H],
        }
    }

    pub fn width(&self) -> usize {
        W
    }

    pub fn height(&self) -> usize {
        H
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        if x >= WIDTH || y >= HEIGHT {
            return None;
        }
        self.pixels.get(y as usize * W + x as usize).copied()
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Copy into a 4-byte-per-pixel RGBA buffer; alpha is always 255.
    /// Does nothing if `out` is too small.
    pub fn write_rgba(&self, out: &mut [u8]) {
        if out.len() < self.pixels.len() * 4 {
            return;
        }
        for (px, c) in out.chunks_exact_mut(4).zip(&self.pixels) {
            px.copy_from_slice(&c.to_rgba());
        }
    }

    pub fn to_rgba(&self) -> Vec<u8> {
        let mut out = vec![0u8; self.pixels.len() * 4];
        self.write_rgba(&mut out);
        out
    }
}

/// Render one frame of `filter`, threading `palette` through every pixel.
///
/// A bucket first met at one pixel keeps its color for every later pixel of
/// the same build (and of later builds fed the returned palette).
pub fn build_raster(
    filter: &Filter,
    opts: &FilterOptions,
    palette: Palette,
    interpolate: bool,
    source: &mut dyn ColorSource,
) -> (Raster, Palette) {
    let field = IndexField::compute(filter, opts);
    build_from_field(&field, palette, interpolate, source)
}

/// Color an already computed index field.
pub fn build_from_field(
    field: &IndexField,
    mut palette: Palette,
    interpolate: bool,
    source: &mut dyn ColorSource,
) -> (Raster, Palette) {
    let before = palette.len();
    let mut pixels = Vec::with_capacity(field.values.len());
    for &index in &field.values {
        let (c, next) = if interpolate {
            resolve_lerp_color(index, palette, source)
        } else {
            resolve_color(index, palette, source)
        };
        palette = next;
        pixels.push(c);
    }
    if palette.len() != before {
        log::debug!(
            "palette grew {} -> {} buckets (interpolate={})",
            before,
            palette.len(),
            interpolate
        );
    }
    (Raster { pixels }, palette)
}
