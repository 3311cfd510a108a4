use wavy_sandbox::color::{Color, ColorParseError, ColorSource, CycleSource};

#[test]
fn hex_round_trips_every_channel_value() {
    for v in 0..=255u8 {
        for c in [Color::rgb(v, 0, 0), Color::rgb(0, v, 0), Color::rgb(0, 0, v)] {
            let s = c.to_hex_string();
            assert_eq!(s.len(), 7);
            assert!(s.starts_with('#'));
            assert_eq!(Color::from_hex_string(&s), c, "{s}");
            assert_eq!(Color::parse_hex(&s), Ok(c), "{s}");
        }
    }
}

#[test]
fn hex_is_lowercase_and_zero_padded() {
    assert_eq!(Color::rgb(0x0a, 0xbc, 0x01).to_hex_string(), "#0abc01");
    assert_eq!(Color::BLACK.to_string(), "#000000");
    assert_eq!(Color::WHITE.to_string(), "#ffffff");
}

#[test]
fn decode_accepts_uppercase() {
    assert_eq!(Color::from_hex_string("#FFA07A"), Color::rgb(255, 160, 122));
    assert_eq!("#FFA07A".parse::<Color>(), Ok(Color::rgb(255, 160, 122)));
}

#[test]
fn strict_decode_reports_what_is_wrong() {
    assert_eq!(Color::parse_hex("ffffff"), Err(ColorParseError::MissingHash));
    assert_eq!(Color::parse_hex("#fff"), Err(ColorParseError::BadLength(4)));
    assert_eq!(
        Color::parse_hex("#00gg00"),
        Err(ColorParseError::BadDigit { channel: "green" })
    );
    assert!(Color::parse_hex("#ffffff").is_ok());
}

#[test]
fn arithmetic_saturates() {
    let a = Color::rgb(200, 10, 128);
    let b = Color::rgb(100, 20, 128);
    assert_eq!(a + b, Color::rgb(255, 30, 255));
    assert_eq!(a - b, Color::rgb(100, 0, 0));
    assert_eq!(a * 2.0, Color::rgb(255, 20, 255));
    assert_eq!(a * 0.5, Color::rgb(100, 5, 64));
    assert_eq!(a * -1.0, Color::BLACK);
}

#[test]
fn lerp_midpoint_rounds() {
    let a = Color::rgb(0, 0, 0);
    let b = Color::rgb(255, 100, 1);
    assert_eq!(a.lerp(b, 0.5), Color::rgb(128, 50, 1));
    assert_eq!(a.lerp(b, 2.0), b);
}

#[test]
fn seeded_rng_is_a_reproducible_source() {
    let mut r1 = fastrand::Rng::with_seed(42);
    let mut r2 = fastrand::Rng::with_seed(42);
    let a: Vec<Color> = (0..16).map(|_| r1.next_color()).collect();
    let b: Vec<Color> = (0..16).map(|_| r2.next_color()).collect();
    assert_eq!(a, b);
}

#[test]
fn cycle_source_repeats_in_order() {
    let red = Color::rgb(255, 0, 0);
    let green = Color::rgb(0, 255, 0);
    let mut src = CycleSource::new(vec![red, green]);
    assert_eq!(src.next_color(), red);
    assert_eq!(src.next_color(), green);
    assert_eq!(src.next_color(), red);

    let mut empty = CycleSource::new(Vec::new());
    assert_eq!(empty.next_color(), Color::BLACK);
}
