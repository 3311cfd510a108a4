use wavy_sandbox::color::{Color, CycleSource};
use wavy_sandbox::filters::{find_filter, FilterOptions, Point, HEIGHT, WIDTH};
use wavy_sandbox::palette::{bucket_of, Palette};
use wavy_sandbox::raster::{build_from_field, build_raster, IndexField, Raster};
use wavy_sandbox::session::Session;

fn wavy_circles_opts() -> FilterOptions {
    FilterOptions::default()
        .with_number(8)
        .with_frequency(10.0)
        .with_phase(0.0)
        .with_amplitude(1.0)
}

#[test]
fn wavy_circles_frame_is_complete_and_opaque() {
    let f = find_filter("wavyCircles").unwrap();
    let opts = wavy_circles_opts();
    let mut rng = fastrand::Rng::with_seed(1);
    let (raster, palette) = build_raster(f, &opts, Palette::new(), false, &mut rng);

    assert_eq!(raster.width(), WIDTH as usize);
    assert_eq!(raster.height(), HEIGHT as usize);
    assert_eq!(raster.pixels().len(), (WIDTH * HEIGHT) as usize);

    let rgba = raster.to_rgba();
    assert_eq!(rgba.len(), (WIDTH * HEIGHT * 4) as usize);
    assert!(rgba.chunks_exact(4).all(|px| px[3] == 255));

    // The origin sits in bucket 0.
    assert_eq!(raster.get(175, 175), palette.get(0));

    let field = IndexField::compute(f, &opts);
    assert_eq!(palette.len(), field.buckets().len());
    for (bucket, _) in palette.iter() {
        assert!(field.buckets().contains(&bucket));
    }
}

#[test]
fn every_pixel_takes_its_bucket_color() {
    let f = find_filter("spiral").unwrap();
    let opts = f.defaults();
    let mut rng = fastrand::Rng::with_seed(2);
    let (raster, palette) = build_raster(f, &opts, Palette::new(), false, &mut rng);
    let field = IndexField::compute(f, &opts);
    for y in (0..HEIGHT).step_by(7) {
        for x in (0..WIDTH).step_by(7) {
            let bucket = bucket_of(field.get(x, y).unwrap());
            assert_eq!(raster.get(x, y), palette.get(bucket), "({x},{y})");
        }
    }
}

#[test]
fn lerp_channels_sit_between_neighbour_buckets() {
    let f = find_filter("wavyBeams").unwrap();
    let opts = FilterOptions::default().with_number(16);
    let mut rng = fastrand::Rng::with_seed(3);
    let (raster, palette) = build_raster(f, &opts, Palette::new(), true, &mut rng);
    let field = IndexField::compute(f, &opts);

    for y in (0..HEIGHT).step_by(5) {
        for x in (0..WIDTH).step_by(5) {
            let v = field.get(x, y).unwrap();
            let lo = palette.get(v.floor() as u32).unwrap();
            let hi = palette.get(v.ceil() as u32).unwrap();
            let c = raster.get(x, y).unwrap();
            for (got, a, b) in [(c.r, lo.r, hi.r), (c.g, lo.g, hi.g), (c.b, lo.b, hi.b)] {
                assert!(got >= a.min(b) && got <= a.max(b), "({x},{y}) v={v}");
            }
        }
    }
}

#[test]
fn fresh_palettes_share_the_same_field() {
    let f = find_filter("wavyCircles").unwrap();
    let opts = wavy_circles_opts();
    let a = IndexField::compute(f, &opts);
    let b = IndexField::compute(f, &opts);
    assert_eq!(a, b);

    let (_, p1) = build_from_field(&a, Palette::new(), false, &mut fastrand::Rng::with_seed(10));
    let (_, p2) = build_from_field(&b, Palette::new(), false, &mut fastrand::Rng::with_seed(11));
    let k1: Vec<u32> = p1.iter().map(|(k, _)| k).collect();
    let k2: Vec<u32> = p2.iter().map(|(k, _)| k).collect();
    assert_eq!(k1, k2);
}

#[test]
fn rebuilding_with_the_returned_palette_is_stable() {
    let f = find_filter("diagonalsTB").unwrap();
    let opts = f.defaults();
    let mut rng = fastrand::Rng::with_seed(4);
    let (first, palette) = build_raster(f, &opts, Palette::new(), true, &mut rng);
    let (second, again) = build_raster(f, &opts, palette.clone(), true, &mut rng);
    assert_eq!(first, second);
    assert_eq!(palette, again);
}

#[test]
fn shared_palette_keeps_colors_across_filters() {
    let mut src = CycleSource::new(vec![Color::rgb(1, 2, 3), Color::rgb(4, 5, 6)]);
    let h = find_filter("horizontals").unwrap();
    let v = find_filter("verticals").unwrap();
    let opts = FilterOptions::default().with_number(2);

    let (rh, palette) = build_raster(h, &opts, Palette::new(), false, &mut src);
    let (rv, palette) = build_raster(v, &opts, palette, false, &mut src);
    assert_eq!(palette.len(), 2);
    // Bucket 0 is the top half for horizontals and the left half for verticals.
    assert_eq!(rh.get(300, 0), rv.get(0, 300));
    assert_eq!(rh.get(0, 349), rv.get(349, 0));
}

#[test]
fn write_rgba_ignores_short_buffers() {
    let raster = Raster::filled(Color::rgb(9, 8, 7));
    let mut short = vec![0u8; 16];
    raster.write_rgba(&mut short);
    assert!(short.iter().all(|b| *b == 0));
    assert_eq!(&raster.to_rgba()[..4], &[9, 8, 7, 255]);
}

#[test]
fn session_paint_recolors_a_bucket() {
    let f = find_filter("circles").unwrap();
    let mut session = Session::new(f, f.defaults(), false, fastrand::Rng::with_seed(5));
    session.render();
    let before = session.palette().len();

    let bucket = session.paint_bucket_at(175, 175, Color::WHITE).unwrap();
    assert_eq!(bucket, 0);
    let raster = session.render();
    assert_eq!(raster.get(175, 175), Some(Color::WHITE));
    assert_eq!(session.palette().len(), before);

    assert!(session.paint_bucket_at(WIDTH, 0, Color::BLACK).is_err());
}

#[test]
fn session_palette_survives_option_changes() {
    let f = find_filter("circles").unwrap();
    let mut session = Session::new(f, f.defaults(), false, fastrand::Rng::with_seed(6));
    let c0 = session.render().get(175, 175);

    session.set_options(f.defaults().with_origin(Point::new(0.0, 0.0)));
    let c1 = session.render().get(0, 0);
    assert_eq!(c0, c1, "bucket 0 keeps its color");

    session.reset_palette();
    assert!(session.palette().is_empty());
    assert!(session.last_raster().is_some());
}
