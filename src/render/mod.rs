mod halfblock;

pub use halfblock::HalfBlockRenderer;

use std::io::Write;

pub struct Frame<'a> {
    pub term_cols: u16,
    pub term_rows: u16,
    pub visual_rows: u16,
    pub pixel_width: usize,
    pub pixel_height: usize,
    pub pixels_rgba: &'a [u8],
    pub hud: &'a str,
    pub hud_rows: u16,
    pub overlay: Option<&'a str>,
    pub sync_updates: bool,
}

pub trait Renderer {
    fn name(&self) -> &'static str;
    fn render(&mut self, frame: &Frame<'_>, out: &mut dyn Write) -> anyhow::Result<()>;
}

/// Placement of a square image inside a larger pixel canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: usize,
    pub y: usize,
    pub size: usize,
}

impl Viewport {
    /// Largest centered square that fits in `w` x `h`.
    pub fn fit_square(w: usize, h: usize) -> Self {
        let size = w.min(h);
        Self {
            x: (w - size) / 2,
            y: (h - size) / 2,
            size,
        }
    }

    /// Map a canvas pixel back to source coordinates of a `src` x `src` image.
    pub fn to_source(&self, cx: usize, cy: usize, src: usize) -> Option<(usize, usize)> {
        if self.size == 0 || cx < self.x || cy < self.y {
            return None;
        }
        let lx = cx - self.x;
        let ly = cy - self.y;
        if lx >= self.size || ly >= self.size {
            return None;
        }
        Some((lx * src / self.size, ly * src / self.size))
    }
}

/// Nearest-neighbour copy of a square RGBA image (`src_side` pixels a side)
/// into `view` of a `dst_w`-wide RGBA canvas.
pub fn blit_scaled(src: &[u8], src_side: usize, dst: &mut [u8], dst_w: usize, view: Viewport) {
    if src_side == 0 || view.size == 0 || src.len() < src_side * src_side * 4 {
        return;
    }
    for ly in 0..view.size {
        let dy = view.y + ly;
        let sy = ly * src_side / view.size;
        for lx in 0..view.size {
            let dx = view.x + lx;
            if dx >= dst_w {
                break;
            }
            let di = (dy * dst_w + dx) * 4;
            if di + 4 > dst.len() {
                return;
            }
            let sx = lx * src_side / view.size;
            let si = (sy * src_side + sx) * 4;
            dst[di..di + 4].copy_from_slice(&src[si..si + 4]);
        }
    }
}

pub fn draw_overlay_popup(
    out: &mut dyn Write,
    term_cols: u16,
    term_rows: u16,
    text: &str,
) -> anyhow::Result<()> {
    if text.trim().is_empty() {
        return Ok(());
    }

    let cols = term_cols as usize;
    let rows = term_rows as usize;
    if cols < 8 || rows < 4 {
        return Ok(());
    }

    let max_inner_w = cols.saturating_sub(6).max(1);
    let mut lines: Vec<String> = Vec::new();
    for raw in text.lines() {
        if raw.is_empty() {
            lines.push(String::new());
            continue;
        }
        let chars: Vec<char> = raw.chars().collect();
        for chunk in chars.chunks(max_inner_w) {
            lines.push(chunk.iter().collect());
        }
    }
    if lines.is_empty() {
        return Ok(());
    }

    let inner_w = lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(1, max_inner_w);
    let box_w = (inner_w + 4).min(cols.saturating_sub(2)).max(4);
    let inner_w = box_w.saturating_sub(4);
    let body_h = lines.len().min(rows.saturating_sub(3).max(1));
    let box_h = (body_h + 2).min(rows.saturating_sub(1)).max(3);

    let start_col = (cols.saturating_sub(box_w)) / 2 + 1;
    let start_row = (rows.saturating_sub(box_h)) / 2 + 1;

    let horiz = "-".repeat(box_w.saturating_sub(2));
    let blank = " ".repeat(inner_w);

    out.write_all(b"\x1b[0m\x1b[38;2;236;242;255m\x1b[48;2;10;14;24m")?;
    write!(out, "\x1b[{};{}H+{}+", start_row, start_col, horiz)?;
    for (i, line) in lines.iter().take(body_h).enumerate() {
        let row = start_row + 1 + i;
        write!(out, "\x1b[{};{}H| {} |", row, start_col, blank)?;
        if i == 0 {
            // Title line.
            write!(
                out,
                "\x1b[{};{}H\x1b[1m\x1b[38;2;255;236;160m{}\x1b[22m\x1b[38;2;236;242;255m",
                row,
                start_col + 2,
                line
            )?;
        } else {
            write!(out, "\x1b[{};{}H{}", row, start_col + 2, line)?;
        }
    }
    write!(out, "\x1b[{};{}H+{}+", start_row + box_h - 1, start_col, horiz)?;
    out.write_all(b"\x1b[0m")?;
    Ok(())
}
