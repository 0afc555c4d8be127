use super::*;
use serde_json::json;

#[test]
fn parses_computed_style_forms() {
    assert_eq!(
        Rgba8::parse_css("rgb(10, 20, 30)").unwrap(),
        Rgba8::rgb(10, 20, 30)
    );
    assert_eq!(
        Rgba8::parse_css("rgba(0, 0, 0, 0)").unwrap(),
        Rgba8::TRANSPARENT
    );
    assert_eq!(
        Rgba8::parse_css("rgba(255, 255, 255, 0.5)").unwrap(),
        Rgba8::new(255, 255, 255, 128)
    );
    assert_eq!(
        Rgba8::parse_css("rgb(1 2 3 / 50%)").unwrap(),
        Rgba8::new(1, 2, 3, 128)
    );
    assert!(Rgba8::parse_css("transparent").unwrap().is_transparent());
}

#[test]
fn parses_hex_forms() {
    assert_eq!(Rgba8::parse_css("#FF6100").unwrap(), Rgba8::rgb(255, 97, 0));
    assert_eq!(Rgba8::parse_css("#fff").unwrap(), Rgba8::WHITE);
    assert_eq!(
        Rgba8::parse_css("#0000ff80").unwrap(),
        Rgba8::new(0, 0, 255, 128)
    );
    assert!(Rgba8::parse_css("#12345").is_err());
    assert!(Rgba8::parse_css("#gg0000").is_err());
}

#[test]
fn rejects_garbage() {
    assert!(Rgba8::parse_css("hsl(0, 100%, 50%)").is_err());
    assert!(Rgba8::parse_css("rgb(1, 2)").is_err());
    assert!(Rgba8::parse_css("rgb(a, b, c)").is_err());
}

#[test]
fn serde_accepts_strings_and_arrays() {
    let c: Rgba8 = serde_json::from_value(json!("rgb(250, 250, 250)")).unwrap();
    assert_eq!(c, Rgba8::rgb(250, 250, 250));
    let c: Rgba8 = serde_json::from_value(json!([1, 2, 3, 0])).unwrap();
    assert!(c.is_transparent());
    assert!(serde_json::from_value::<Rgba8>(json!([1, 2])).is_err());

    let s = serde_json::to_value(Rgba8::rgb(1, 2, 3)).unwrap();
    assert_eq!(s, json!("rgb(1, 2, 3)"));
}

#[test]
fn inverse_flips_channels() {
    assert_eq!(Rgba8::rgb(10, 200, 255).inverse(), Rgba8::rgb(245, 55, 0));
}

#[test]
fn complementary_rotates_hue() {
    assert_eq!(Rgba8::rgb(255, 0, 0).complementary(), Rgba8::rgb(0, 255, 255));
    assert_eq!(Rgba8::rgb(0, 0, 255).complementary(), Rgba8::rgb(255, 255, 0));
    // Greys have no hue and map to themselves.
    assert_eq!(
        Rgba8::rgb(128, 128, 128).complementary(),
        Rgba8::rgb(128, 128, 128)
    );
}

#[test]
fn hsl_of_pure_green() {
    let hsl = Hsl::from_rgb(Rgba8::rgb(0, 255, 0));
    assert!((hsl.h - 120.0).abs() < 1e-9);
    assert!((hsl.s - 1.0).abs() < 1e-9);
    assert!((hsl.l - 0.5).abs() < 1e-9);
    assert_eq!(hsl.to_rgb(), Rgba8::rgb(0, 255, 0));
}
