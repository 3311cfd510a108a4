use crate::color::Color;
use crate::config::{Config, Mode};
use crate::filters::{
    find_filter, list_filters, random_filter, validate_registry, Filter, FilterOptions, OptionKey,
    Point, HEIGHT, WIDTH,
};
use crate::palette::Palette;
use crate::raster::build_raster;
use crate::render::{blit_scaled, Frame, HalfBlockRenderer, Renderer, Viewport};
use crate::session::Session;
use crate::terminal::TerminalGuard;
use anyhow::Context;
use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use std::io::BufWriter;
use std::time::{Duration, Instant};

const SIDE: usize = WIDTH as usize;
const GALLERY_NUMBER: i64 = 16;

pub fn run(cfg: Config) -> anyhow::Result<()> {
    validate_registry().context("filter registry")?;
    cfg.validate()?;
    let filter = select_filter(&cfg.filter)?;

    let mut app = App::new(&cfg, filter);
    log::info!(
        "starting in {} mode with '{}' at {} fps",
        cfg.mode.label(),
        filter.name(),
        cfg.fps
    );

    let _term = TerminalGuard::new()?;
    let mut out = BufWriter::new(TerminalGuard::stdout());
    let mut renderer = HalfBlockRenderer::new();

    let mut last_size = crossterm::terminal::size().context("get terminal size")?;
    if last_size.1 < 2 || last_size.0 < 4 {
        return Err(anyhow::anyhow!(
            "terminal too small (need at least 4x2, got {}x{})",
            last_size.0,
            last_size.1
        ));
    }

    let mut fps = FpsCounter::new();
    let tick = Duration::from_secs_f32(1.0 / cfg.fps.max(1) as f32);

    loop {
        let now = Instant::now();

        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(k) if k.kind != KeyEventKind::Release => {
                    if handle_key(k.code, k.modifiers, &mut app) {
                        log::info!("quit requested");
                        return Ok(());
                    }
                }
                Event::Mouse(m) => handle_mouse(m, &mut app),
                Event::Resize(c, r) => last_size = (c, r),
                _ => {}
            }
        }

        let sz = crossterm::terminal::size()?;
        if sz != last_size {
            last_size = sz;
        }
        let (term_cols, term_rows) = last_size;
        let hud_rows = hud_rows_for_size(last_size, app.show_hud);
        let visual_rows = term_rows.saturating_sub(hud_rows).max(1);
        let w = term_cols as usize;
        let h = visual_rows as usize * 2;

        let mut canvas = vec![0u8; w * h * 4];
        app.paint(&mut canvas, w, h);

        let hud = if app.show_hud {
            app.hud(fps.fps())
        } else {
            String::new()
        };
        let overlay = app.show_help.then(help_popup_text);

        let frame = Frame {
            term_cols,
            term_rows,
            visual_rows,
            pixel_width: w,
            pixel_height: h,
            pixels_rgba: &canvas,
            hud: &hud,
            hud_rows,
            overlay,
            sync_updates: cfg.sync_updates,
        };
        renderer.render(&frame, &mut out)?;
        fps.tick();

        let elapsed = now.elapsed();
        if elapsed < tick {
            std::thread::sleep(tick - elapsed);
        }
    }
}

fn select_filter(query: &str) -> anyhow::Result<&'static Filter> {
    if let Ok(i) = query.trim().parse::<usize>() {
        return Filter::by_index(i)
            .with_context(|| format!("filter index {i} out of range (0..{})", list_filters().len()));
    }
    Ok(find_filter(query)?)
}

struct Gallery {
    palette: Palette,
    rng: fastrand::Rng,
    // One RGBA image per tile: every filter plain, then every filter lerped.
    tiles: Vec<Vec<u8>>,
}

impl Gallery {
    fn new(rng: fastrand::Rng) -> Self {
        Self {
            palette: Palette::new(),
            rng,
            tiles: Vec::new(),
        }
    }

    fn tile_count() -> usize {
        list_filters().len() * 2
    }

    fn tile_filter(i: usize) -> Option<(&'static Filter, bool)> {
        let n = list_filters().len();
        Filter::by_index(i % n.max(1)).map(|f| (f, i >= n))
    }

    /// Build every tile once; the gallery is static until the palette resets.
    fn ensure_built(&mut self) {
        if !self.tiles.is_empty() {
            return;
        }
        let opts = FilterOptions::default().with_number(GALLERY_NUMBER);
        let started = Instant::now();
        for i in 0..Self::tile_count() {
            let Some((filter, lerp)) = Self::tile_filter(i) else {
                continue;
            };
            let palette = std::mem::take(&mut self.palette);
            let (raster, palette) = build_raster(filter, &opts, palette, lerp, &mut self.rng);
            self.palette = palette;
            self.tiles.push(raster.to_rgba());
        }
        log::debug!(
            "gallery built: {} tiles, {} buckets, {:.1} ms",
            self.tiles.len(),
            self.palette.len(),
            started.elapsed().as_secs_f64() * 1000.0
        );
    }

    fn reset(&mut self) {
        self.palette = Palette::new();
        self.tiles.clear();
    }
}

/// Column count and tile side that fit `n` square tiles into `w` x `h` best.
fn gallery_layout(w: usize, h: usize, n: usize) -> (usize, usize) {
    let mut best = (n.max(1), 0usize);
    for cols in 1..=n.max(1) {
        let rows = n.div_ceil(cols).max(1);
        let side = (w / cols).min(h / rows);
        if side > best.1 {
            best = (cols, side);
        }
    }
    best
}

fn gallery_tile_at(cx: usize, cy: usize, w: usize, h: usize) -> Option<usize> {
    let n = Gallery::tile_count();
    let (cols, side) = gallery_layout(w, h, n);
    if side == 0 {
        return None;
    }
    let (col, row) = (cx / side, cy / side);
    let i = row * cols + col;
    (col < cols && i < n).then_some(i)
}

struct App {
    mode: Mode,
    sandbox: Session,
    gallery: Gallery,
    focus: usize,
    pen: Color,
    show_hud: bool,
    show_help: bool,
    canvas_w: usize,
    canvas_h: usize,
}

impl App {
    fn new(cfg: &Config, filter: &'static Filter) -> Self {
        let mut rng = cfg.rng();
        let gallery_rng = rng.fork();
        Self {
            mode: cfg.mode,
            sandbox: Session::new(filter, cfg.filter_options(), cfg.lerp, rng),
            gallery: Gallery::new(gallery_rng),
            focus: 0,
            pen: cfg.pen,
            show_hud: true,
            show_help: false,
            canvas_w: 0,
            canvas_h: 0,
        }
    }

    fn focused_key(&self) -> OptionKey {
        let keys = self.sandbox.filter().accepts();
        keys[self.focus % keys.len()]
    }

    fn set_filter(&mut self, filter: &'static Filter) {
        self.sandbox.set_filter(filter);
        self.focus %= filter.accepts().len();
    }

    fn nudge(&mut self, steps: i32) {
        let key = self.focused_key();
        let fallback = self.sandbox.filter().default_for(key);
        self.sandbox.options_mut().nudge(key, steps, fallback);
    }

    fn paint(&mut self, canvas: &mut [u8], w: usize, h: usize) {
        self.canvas_w = w;
        self.canvas_h = h;
        match self.mode {
            Mode::Sandbox => {
                let view = Viewport::fit_square(w, h);
                let rgba = self.sandbox.render().to_rgba();
                blit_scaled(&rgba, SIDE, canvas, w, view);
                let key = self.focused_key();
                if matches!(key, OptionKey::OriginX | OptionKey::OriginY) {
                    let origin = self.sandbox.options().origin.unwrap_or_default();
                    mark_origin(canvas, w, view, origin);
                }
            }
            Mode::Gallery => {
                self.gallery.ensure_built();
                let (cols, side) = gallery_layout(w, h, self.gallery.tiles.len());
                for (i, tile) in self.gallery.tiles.iter().enumerate() {
                    let view = Viewport {
                        x: (i % cols) * side,
                        y: (i / cols) * side,
                        size: side,
                    };
                    blit_scaled(tile, SIDE, canvas, w, view);
                }
            }
        }
    }

    fn hud(&self, fps: f32) -> String {
        match self.mode {
            Mode::Sandbox => {
                let s = &self.sandbox;
                let f = s.filter();
                let key = self.focused_key();
                let c = key.constraints();
                let value = s
                    .options()
                    .get(key)
                    .map(|v| format!("{v:.0}"))
                    .unwrap_or_else(|| "default".to_string());
                format!(
                    "{} [{}/{}] | {} | lerp {} | pen {} | palette {} | {:.0} fps\n\
                     > {}={} ({:.0}..{:.0}) | [ ] filter  tab field  +/- adjust  click paint  ? help",
                    f.name(),
                    f.index() + 1,
                    list_filters().len(),
                    f.params(s.options()).summary(),
                    if s.interpolate() { "on" } else { "off" },
                    self.pen,
                    s.palette().len(),
                    fps,
                    key.label(),
                    value,
                    c.min,
                    c.max,
                )
            }
            Mode::Gallery => format!(
                "gallery | {} filters, plain then lerp | number={} | palette {} | {:.0} fps\n\
                 click a tile to open it  x new colors  g sandbox  ? help",
                list_filters().len(),
                GALLERY_NUMBER,
                self.gallery.palette.len(),
                fps,
            ),
        }
    }
}

fn mark_origin(canvas: &mut [u8], w: usize, view: Viewport, origin: Point) {
    if view.size == 0 {
        return;
    }
    let cx = view.x as f64 + origin.x / WIDTH as f64 * view.size as f64;
    let cy = view.y as f64 + origin.y / HEIGHT as f64 * view.size as f64;
    if !(cx.is_finite() && cy.is_finite()) {
        return;
    }
    let (cx, cy) = (cx.round() as i64, cy.round() as i64);
    let arms = (-2i64..=2)
        .map(|d| (cx + d, cy))
        .chain((-2i64..=2).filter(|d| *d != 0).map(|d| (cx, cy + d)));
    for (x, y) in arms {
        if x < 0 || y < 0 || x as usize >= w {
            continue;
        }
        let i = (y as usize * w + x as usize) * 4;
        if i + 3 > canvas.len() {
            continue;
        }
        let c = Color::rgb(canvas[i], canvas[i + 1], canvas[i + 2]);
        let inv = Color::WHITE - c;
        canvas[i..i + 3].copy_from_slice(&[inv.r, inv.g, inv.b]);
    }
}

fn handle_key(code: KeyCode, mods: KeyModifiers, app: &mut App) -> bool {
    if mods.contains(KeyModifiers::CONTROL) && matches!(code, KeyCode::Char('c')) {
        return true;
    }

    match code {
        KeyCode::Esc if app.show_help => {
            app.show_help = false;
            false
        }
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::F(1) => {
            app.show_help = !app.show_help;
            false
        }
        KeyCode::Char('i') | KeyCode::Char('I') => {
            app.show_hud = !app.show_hud;
            false
        }
        KeyCode::Char('g') | KeyCode::Char('G') => {
            app.mode = app.mode.toggle();
            false
        }
        KeyCode::Char('x') | KeyCode::Char('X') => {
            match app.mode {
                Mode::Sandbox => app.sandbox.reset_palette(),
                Mode::Gallery => app.gallery.reset(),
            }
            false
        }
        KeyCode::Char('p') | KeyCode::Char('P') => {
            app.pen = Color::random_with(app.sandbox.rng_mut());
            false
        }
        _ if app.mode == Mode::Gallery => false,
        KeyCode::Right | KeyCode::Char(']') => {
            let next = app.sandbox.filter().next();
            app.set_filter(next);
            false
        }
        KeyCode::Left | KeyCode::Char('[') => {
            let prev = app.sandbox.filter().prev();
            app.set_filter(prev);
            false
        }
        KeyCode::Tab | KeyCode::Down => {
            app.focus = (app.focus + 1) % app.sandbox.filter().accepts().len();
            false
        }
        KeyCode::BackTab | KeyCode::Up => {
            let n = app.sandbox.filter().accepts().len();
            app.focus = (app.focus + n - 1) % n;
            false
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            app.nudge(1);
            false
        }
        KeyCode::Char('-') | KeyCode::Char('_') => {
            app.nudge(-1);
            false
        }
        KeyCode::Char('>') => {
            app.nudge(10);
            false
        }
        KeyCode::Char('<') => {
            app.nudge(-10);
            false
        }
        KeyCode::Backspace | KeyCode::Delete => {
            let key = app.focused_key();
            app.sandbox.options_mut().set(key, None);
            false
        }
        KeyCode::Char('l') | KeyCode::Char('L') => {
            let on = !app.sandbox.interpolate();
            app.sandbox.set_interpolate(on);
            false
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            let (filter, sample) = random_filter(app.sandbox.rng_mut());
            app.set_filter(filter);
            app.sandbox.options_mut().thickness = sample.thickness;
            false
        }
        _ => false,
    }
}

fn handle_mouse(m: MouseEvent, app: &mut App) {
    if !matches!(m.kind, MouseEventKind::Down(MouseButton::Left)) {
        return;
    }
    // Each cell holds two canvas pixels; aim at the upper one.
    let cx = m.column as usize;
    let cy = m.row as usize * 2;
    if cy >= app.canvas_h || cx >= app.canvas_w {
        return;
    }
    match app.mode {
        Mode::Sandbox => {
            let view = Viewport::fit_square(app.canvas_w, app.canvas_h);
            let Some((x, y)) = view.to_source(cx, cy, SIDE) else {
                return;
            };
            if let Err(err) = app.sandbox.paint_bucket_at(x as u32, y as u32, app.pen) {
                log::warn!("paint at ({x},{y}) failed: {err}");
            }
        }
        Mode::Gallery => {
            if let Some((filter, lerp)) =
                gallery_tile_at(cx, cy, app.canvas_w, app.canvas_h).and_then(Gallery::tile_filter)
            {
                app.set_filter(filter);
                app.sandbox.set_interpolate(lerp);
                app.mode = Mode::Sandbox;
            }
        }
    }
}

fn hud_rows_for_size(size: (u16, u16), show_hud: bool) -> u16 {
    if !show_hud || size.1 <= 3 {
        return 0;
    }
    2
}

fn help_popup_text() -> &'static str {
    "Wavy Sandbox Hotkeys\n\
←/→ or [ ]  previous/next filter\n\
tab/down, shift-tab/up  select option field\n\
+ / -  adjust field (> / < for ten steps)\n\
backspace  reset field to the filter default\n\
l  toggle lerp between buckets\n\
r  random filter with thickness 15\n\
mouse click  paint the clicked bucket with the pen\n\
p  new random pen color\n\
x  forget all colors (new palette)\n\
g  switch sandbox/gallery\n\
i  show/hide HUD\n\
? or h or F1  toggle this help\n\
q or esc  quit"
}

struct FpsCounter {
    last: Instant,
    frames: u32,
    fps: f32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            last: Instant::now(),
            frames: 0,
            fps: 0.0,
        }
    }

    fn tick(&mut self) {
        self.frames += 1;
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        if dt >= 0.5 {
            self.fps = self.frames as f32 / dt;
            self.frames = 0;
            self.last = now;
        }
    }

    fn fps(&self) -> f32 {
        self.fps
    }
}
