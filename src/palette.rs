use crate::color::{Color, ColorSource};
use std::collections::BTreeMap;

/// Sparse bucket -> color map, populated lazily.
///
/// A palette is a value: builds take it by value and hand back the extended
/// palette, so one lineage can only ever be extended by one build at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    entries: BTreeMap<u32, Color>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, bucket: u32) -> Option<Color> {
        self.entries.get(&bucket).copied()
    }

    /// Overwrite a bucket, e.g. when the user picks a color for it.
    pub fn assign(mut self, bucket: u32, color: Color) -> Self {
        self.entries.insert(bucket, color);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, Color)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, *v))
    }
}

impl FromIterator<(u32, Color)> for Palette {
    fn from_iter<I: IntoIterator<Item = (u32, Color)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Floor a bucket coordinate to a palette key.
///
/// Non-finite and negative coordinates land in bucket 0 so that a bad option
/// value can never poison the palette with an unbounded key.
pub fn bucket_of(index: f64) -> u32 {
    if !index.is_finite() || index <= 0.0 {
        return 0;
    }
    let f = index.floor();
    if f >= u32::MAX as f64 { u32::MAX } else { f as u32 }
}

/// Look up the color for `index`, allocating one from `source` on first sight.
pub fn resolve_color(
    index: f64,
    palette: Palette,
    source: &mut dyn ColorSource,
) -> (Color, Palette) {
    let bucket = bucket_of(index);
    if let Some(c) = palette.get(bucket) {
        return (c, palette);
    }
    let c = source.next_color();
    (c, palette.assign(bucket, c))
}

/// Blend the colors of the buckets on either side of `index`.
///
/// The fractional part of `index` is the weight toward the upper bucket, so a
/// whole-number index resolves to exactly one bucket's color.
pub fn resolve_lerp_color(
    index: f64,
    palette: Palette,
    source: &mut dyn ColorSource,
) -> (Color, Palette) {
    if !index.is_finite() || index <= 0.0 {
        return resolve_color(index, palette, source);
    }
    let lo = index.floor();
    let hi = index.ceil();
    let t = index - lo;
    let (lo_color, palette) = resolve_color(lo, palette, source);
    if hi == lo {
        return (lo_color, palette);
    }
    let (hi_color, palette) = resolve_color(hi, palette, source);
    (lo_color.lerp(hi_color, t), palette)
}
