use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::*;

#[test]
fn parse_hex_rgb_reads_long_form() {
    assert_eq!(parse_hex_rgb("#81dde9"), Some(Rgb { r: 129, g: 221, b: 233 }));
}

#[test]
fn parse_hex_rgb_hash_is_optional_and_case_insensitive() {
    assert_eq!(parse_hex_rgb("81DDE9"), Some(Rgb { r: 129, g: 221, b: 233 }));
    assert_eq!(parse_hex_rgb("#A1b2C3"), Some(Rgb { r: 161, g: 178, b: 195 }));
}

#[test]
fn parse_hex_rgb_rejects_invalid_inputs() {
    assert_eq!(parse_hex_rgb("notacolor"), None);
    assert_eq!(parse_hex_rgb("#abc"), None);
    assert_eq!(parse_hex_rgb("#12GG34"), None);
    assert_eq!(parse_hex_rgb("##81dde9"), None);
    assert_eq!(parse_hex_rgb("#81dde9 "), None);
    assert_eq!(parse_hex_rgb(""), None);
    assert_eq!(parse_hex_rgb("#ééé"), None);
}

#[test]
fn hex_color_display_is_canonical_lowercase() {
    let color = HexColor::parse("E98181").unwrap();
    assert_eq!(color.to_string(), "#e98181");
}

#[test]
fn hex_color_rejects_garbage_instead_of_black() {
    assert!(HexColor::parse("notacolor").is_none());
}

#[test]
fn palette_wraps_around() {
    assert_eq!(HexColor::palette(0), HexColor::palette(NOTE_PALETTE.len()));
    assert_eq!(HexColor::palette(6).to_string(), "#e9be81");
}

#[test]
fn random_always_picks_from_palette() {
    let mut rng = SmallRng::seed_from_u64(42);
    for _ in 0..200 {
        let color = HexColor::random(&mut rng).to_string();
        assert!(NOTE_PALETTE.contains(&color.as_str()), "{color} not in palette");
    }
}

#[test]
fn note_style_uses_ten_percent_background() {
    let style = NoteStyle::for_color(HexColor::parse("#81dde9").unwrap());
    assert_eq!(style.border_color, "#81dde9");
    assert_eq!(style.background_color, "rgba(129, 221, 233, 0.1)");
}

#[test]
fn serde_uses_plain_string() {
    let color = HexColor::parse("#7EDD9A").unwrap();
    assert_eq!(serde_json::to_string(&color).unwrap(), "\"#7edd9a\"");
    let back: HexColor = serde_json::from_str("\"#7edd9a\"").unwrap();
    assert_eq!(back, color);
}

#[test]
fn deserialize_invalid_falls_back_to_default() {
    let color: HexColor = serde_json::from_str("\"blue\"").unwrap();
    assert_eq!(color, HexColor::default());
}

#[test]
fn note_style_serializes_camel_case() {
    let style = NoteStyle::for_color(HexColor::parse("#81dde9").unwrap());
    let value = serde_json::to_value(&style).unwrap();
    assert_eq!(value["borderColor"], "#81dde9");
    assert_eq!(value["backgroundColor"], "rgba(129, 221, 233, 0.1)");
}
