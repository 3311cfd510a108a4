use wavy_sandbox::filters::{
    find_filter, list_filters, random_filter, validate_registry, Bands, Filter, FilterError,
    FilterOptions, OptionKey, OptionsError, Point, HEIGHT, WIDTH,
};

const NAMES: [&str; 14] = [
    "circles",
    "wavyCircles",
    "beams",
    "wavyBeams",
    "diagonalsBT",
    "wavyDiagonalsBT",
    "diagonalsTB",
    "wavyDiagonalsTB",
    "horizontals",
    "wavyHorizontals",
    "verticals",
    "wavyVerticals",
    "spiral",
    "circlyBeams",
];

/// A coarse grid plus the raster corners and center.
fn sample_points() -> Vec<(u32, u32)> {
    let mut pts = Vec::new();
    for y in (0..HEIGHT).step_by(23) {
        for x in (0..WIDTH).step_by(29) {
            pts.push((x, y));
        }
    }
    pts.extend([(0, 0), (WIDTH - 1, 0), (0, HEIGHT - 1), (WIDTH - 1, HEIGHT - 1), (175, 175)]);
    pts
}

#[test]
fn registry_order_and_names() {
    let names: Vec<&str> = list_filters().iter().map(Filter::name).collect();
    assert_eq!(names, NAMES);
    assert!(validate_registry().is_ok());
    for (i, f) in list_filters().iter().enumerate() {
        assert_eq!(f.index(), i);
        assert_eq!(Filter::by_index(i), Some(f));
    }
    assert!(Filter::by_index(NAMES.len()).is_none());
}

#[test]
fn next_and_prev_wrap_around() {
    let first = &list_filters()[0];
    let last = &list_filters()[NAMES.len() - 1];
    assert_eq!(last.next(), first);
    assert_eq!(first.prev(), last);
    assert_eq!(first.next().name(), "wavyCircles");
}

#[test]
fn find_filter_resolves_names() {
    assert_eq!(find_filter("circles").unwrap().name(), "circles");
    assert_eq!(find_filter("CIRCLES").unwrap().name(), "circles");
    assert_eq!(find_filter(" spiral ").unwrap().name(), "spiral");
    assert_eq!(find_filter("wavyc").unwrap().name(), "wavyCircles");
    assert!(matches!(find_filter("diag"), Err(FilterError::UnknownFilter(_))));
    assert!(matches!(find_filter(""), Err(FilterError::UnknownFilter(_))));
    assert!(matches!(find_filter("mandelbrot"), Err(FilterError::UnknownFilter(_))));
}

#[test]
fn every_filter_is_deterministic() {
    for f in list_filters() {
        let opts = f.defaults();
        for (x, y) in sample_points() {
            let a = f.eval(x, y, &opts).unwrap();
            let b = f.eval(x, y, &opts).unwrap();
            assert_eq!(a.to_bits(), b.to_bits(), "{} at ({x},{y})", f.name());
        }
    }
}

#[test]
fn every_filter_stays_finite_and_non_negative() {
    for f in list_filters() {
        for opts in [
            FilterOptions::default(),
            FilterOptions::default().with_number(1),
            FilterOptions::default().with_number(100),
            FilterOptions::default().with_thickness(15.0),
            f.defaults(),
        ] {
            for (x, y) in sample_points() {
                let v = f.eval(x, y, &opts).unwrap();
                assert!(v.is_finite() && v >= 0.0, "{} at ({x},{y}) {opts:?}: {v}", f.name());
            }
        }
    }
}

#[test]
fn non_positive_number_falls_back_to_default() {
    for f in list_filters() {
        let base = FilterOptions::default();
        for n in [0, -3] {
            let bad = FilterOptions::default().with_number(n);
            for (x, y) in sample_points() {
                assert_eq!(
                    f.eval(x, y, &bad).unwrap().to_bits(),
                    f.eval(x, y, &base).unwrap().to_bits(),
                    "{} n={n}",
                    f.name()
                );
            }
        }
    }
    assert_eq!(
        FilterOptions::default().with_number(0).validate(),
        Err(OptionsError::InvalidBucketCount(0))
    );
}

#[test]
fn eval_rejects_pixels_outside_the_raster() {
    let f = find_filter("circles").unwrap();
    let opts = f.defaults();
    assert_eq!(
        f.eval(WIDTH, 0, &opts),
        Err(FilterError::OutOfBounds { x: WIDTH, y: 0 })
    );
    assert_eq!(
        f.eval(0, HEIGHT, &opts),
        Err(FilterError::OutOfBounds { x: 0, y: HEIGHT })
    );
    assert!(f.eval(WIDTH - 1, HEIGHT - 1, &opts).is_ok());
}

#[test]
fn wavy_circles_center_is_bucket_zero() {
    let f = find_filter("wavyCircles").unwrap();
    let opts = FilterOptions::default()
        .with_number(8)
        .with_frequency(10.0)
        .with_phase(0.0)
        .with_amplitude(1.0);
    assert_eq!(f.eval(175, 175, &opts).unwrap(), 0.0);
    // Bands grow outward from the origin.
    let near = f.eval(180, 175, &opts).unwrap();
    let far = f.eval(340, 175, &opts).unwrap();
    assert!(near < far);
}

#[test]
fn angular_filters_wrap_into_band_count() {
    for name in ["beams", "wavyBeams", "spiral", "circlyBeams"] {
        let f = find_filter(name).unwrap();
        let opts = FilterOptions::default().with_number(16);
        for (x, y) in sample_points() {
            let v = f.eval(x, y, &opts).unwrap();
            assert!((0.0..16.0).contains(&v), "{name} at ({x},{y}): {v}");
        }
    }
}

#[test]
fn thickness_overrides_number() {
    let f = find_filter("horizontals").unwrap();
    let opts = FilterOptions::default().with_number(2).with_thickness(35.0);
    assert_eq!(f.eval(0, 70, &opts).unwrap(), 2.0);
    assert_eq!(f.params(&opts).bands(), Bands::Thickness(35.0));
}

#[test]
fn moving_the_origin_moves_the_rings() {
    let f = find_filter("circles").unwrap();
    let opts = FilterOptions::default().with_origin(Point::new(10.0, 20.0));
    assert_eq!(f.eval(10, 20, &opts).unwrap(), 0.0);
    assert!(f.eval(175, 175, &opts).unwrap() > 0.0);
}

#[test]
fn defaults_follow_each_filter() {
    let circles = find_filter("circles").unwrap();
    assert_eq!(circles.default_number(), 8);
    assert_eq!(circles.defaults().number, Some(8));
    assert_eq!(circles.defaults().origin, Some(Point::center()));

    let wavy = find_filter("wavyCircles").unwrap();
    assert_eq!(wavy.default_for(OptionKey::Frequency), 10.0);
    assert_eq!(wavy.default_for(OptionKey::Amplitude), 1.0);

    let lines = find_filter("verticals").unwrap();
    assert_eq!(lines.default_number(), 16);
    assert!(!lines.accepts_key(OptionKey::Phase));
    assert!(lines.accepts_key(OptionKey::Thickness));
}

#[test]
fn random_filter_uses_fixed_thickness() {
    let mut rng = fastrand::Rng::with_seed(7);
    for _ in 0..32 {
        let (f, opts) = random_filter(&mut rng);
        assert!(NAMES.contains(&f.name()));
        assert_eq!(opts.thickness, Some(15.0));
        assert!(opts.validate().is_ok());
    }
}

#[test]
fn params_summary_names_the_resolved_values() {
    let wavy = find_filter("wavyCircles").unwrap();
    assert_eq!(
        wavy.params(&wavy.defaults()).summary(),
        "n=8 f=10 a=1 ph=0 o=(175,175)"
    );
    let lines = find_filter("horizontals").unwrap();
    let opts = FilterOptions::default().with_thickness(15.0);
    assert_eq!(lines.params(&opts).summary(), "thick=15");
}
