//! # Color Module
//!
//! Parses textual color notations into float RGBA.
//!
//! Resolution order, first match wins: named color, `rgb()`/`rgba()`, hex
//! (`#rgb`, `#rrggbb`, `#rrggbbaa`), `hsl()`/`hsla()`. Anything else is
//! unparseable and reported as `None`; callers pick their own fallback.

use crate::types::Color;

/// Named colors always map to hex, so resolving one takes a single indirection.
const NAMED_COLORS: &[(&str, &str)] = &[
    ("white", "#ffffff"),
    ("black", "#000000"),
    ("red", "#ff0000"),
    ("blue", "#0000ff"),
    ("green", "#008000"),
    ("yellow", "#ffff00"),
    ("transparent", "#00000000"),
];

/// Parses a color string. Empty or unrecognized input yields `None`.
pub fn parse_color(input: &str) -> Option<Color> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Some(hex) = named_color(input) {
        return parse_hex_color(hex);
    }

    parse_rgb_function(input)
        .or_else(|| parse_hex_color(input))
        .or_else(|| parse_hsl_function(input))
}

/// Same as [`parse_color`] but accepts an absent value.
pub fn parse_optional_color(input: Option<&str>) -> Option<Color> {
    input.and_then(parse_color)
}

fn named_color(name: &str) -> Option<&'static str> {
    NAMED_COLORS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(name))
        .map(|(_, hex)| *hex)
}

/// Helper to parse hex strings like "#RGB", "#RRGGBB" or "#RRGGBBAA"
pub fn parse_hex_color(input: &str) -> Option<Color> {
    let hex = input.strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let byte = |s: &str| u8::from_str_radix(s, 16).ok().map(|v| v as f32 / 255.0);

    match hex.len() {
        3 => {
            let nibble = |i: usize| {
                let digit = &hex[i..i + 1];
                byte(&format!("{digit}{digit}"))
            };
            Some(Color::new(nibble(0)?, nibble(1)?, nibble(2)?, 1.0))
        }
        6 | 8 => {
            let r = byte(&hex[0..2])?;
            let g = byte(&hex[2..4])?;
            let b = byte(&hex[4..6])?;
            let a = if hex.len() == 8 { byte(&hex[6..8])? } else { 1.0 };
            Some(Color::new(r, g, b, a))
        }
        _ => None,
    }
}

/// `rgb(r, g, b)` / `rgba(r, g, b, a)` with integer channels in 0..=255.
fn parse_rgb_function(input: &str) -> Option<Color> {
    let args = function_args(input, &["rgb", "rgba"])?;
    if args.len() != 3 && args.len() != 4 {
        return None;
    }

    let r = parse_channel(args[0])?;
    let g = parse_channel(args[1])?;
    let b = parse_channel(args[2])?;
    let a = match args.get(3) {
        Some(alpha) => parse_number(alpha)?,
        None => 1.0,
    };
    Some(Color::new(r, g, b, a))
}

/// `hsl(h, s%, l%)` / `hsla(h, s%, l%, a)`.
fn parse_hsl_function(input: &str) -> Option<Color> {
    let args = function_args(input, &["hsl", "hsla"])?;
    if args.len() != 3 && args.len() != 4 {
        return None;
    }

    let h = parse_number(args[0])? / 360.0;
    let s = parse_number(args[1].strip_suffix('%')?)? / 100.0;
    let l = parse_number(args[2].strip_suffix('%')?)? / 100.0;
    let a = match args.get(3) {
        Some(alpha) => parse_number(alpha)?,
        None => 1.0,
    };

    let (r, g, b) = hsl_to_rgb(h, s, l);
    Some(Color::new(r, g, b, a))
}

/// Splits `name(a, b, c)` into trimmed arguments when `name` is one of `names`.
fn function_args<'a>(input: &'a str, names: &[&str]) -> Option<Vec<&'a str>> {
    let open = input.find('(')?;
    let name = input[..open].trim_end();
    if !names.contains(&name) {
        return None;
    }
    let inner = input[open + 1..].strip_suffix(')')?;
    Some(inner.split(',').map(str::trim).collect())
}

/// A plain unsigned decimal: digits and dots only.
fn parse_number(token: &str) -> Option<f32> {
    if token.is_empty() || !token.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    token.parse().ok()
}

/// Integer channel value scaled to 0..=1. A fractional part is truncated.
fn parse_channel(token: &str) -> Option<f32> {
    let value = parse_number(token)?;
    Some(value.trunc() / 255.0)
}

/// Standard HSL to RGB conversion; all inputs in 0..=1.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (f32, f32, f32) {
    if s == 0.0 {
        return (l, l, l);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    (
        hue_to_rgb(p, q, h + 1.0 / 3.0),
        hue_to_rgb(p, q, h),
        hue_to_rgb(p, q, h - 1.0 / 3.0),
    )
}

fn hue_to_rgb(p: f32, q: f32, t: f32) -> f32 {
    let mut t = t;
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_hex_six_digits() {
        let c = parse_color("#ff0000").unwrap();
        assert_eq!(c, Color::new(1.0, 0.0, 0.0, 1.0));

        let c = parse_color("#336699").unwrap();
        assert!(close(c.r, 0x33 as f32 / 255.0));
        assert!(close(c.g, 0x66 as f32 / 255.0));
        assert!(close(c.b, 0x99 as f32 / 255.0));
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn test_hex_eight_digits_carries_alpha() {
        let c = parse_color("#ff000080").unwrap();
        assert!(close(c.r, 1.0));
        assert!(close(c.a, 0.502));
    }

    #[test]
    fn test_hex_three_digits_expands() {
        let c = parse_color("#fff").unwrap();
        assert!(close(c.r, 1.0) && close(c.g, 1.0) && close(c.b, 1.0));

        let c = parse_color("#A0F").unwrap();
        assert!(close(c.r, 0.6667));
        assert_eq!(c.g, 0.0);
        assert!(close(c.b, 1.0));
    }

    #[test]
    fn test_hex_bad_lengths() {
        assert_eq!(parse_color("#ffff"), None);
        assert_eq!(parse_color("#fffff"), None);
        assert_eq!(parse_color("#fffffff"), None);
        assert_eq!(parse_color("#ggg"), None);
        assert_eq!(parse_color("fff"), None);
    }

    #[test]
    fn test_rgba() {
        let c = parse_color("rgba(255, 128, 0, 0.5)").unwrap();
        assert!(close(c.r, 1.0));
        assert!(close(c.g, 0.502));
        assert_eq!(c.b, 0.0);
        assert_eq!(c.a, 0.5);
    }

    #[test]
    fn test_rgb_defaults_alpha() {
        let c = parse_color("rgb(0,0,255)").unwrap();
        assert_eq!(c.r, 0.0);
        assert!(close(c.b, 1.0));
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn test_rgb_wrong_arity() {
        assert_eq!(parse_color("rgb(1, 2)"), None);
        assert_eq!(parse_color("rgba(1, 2, 3, 4, 5)"), None);
        assert_eq!(parse_color("rgb(a, b, c)"), None);
    }

    #[test]
    fn test_hsl_green() {
        let c = parse_color("hsl(120, 100%, 50%)").unwrap();
        assert!(close(c.g, 1.0));
        assert!(close(c.r, 0.0));
        assert!(close(c.b, 0.0));
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn test_hsla_achromatic() {
        let c = parse_color("hsla(200, 0%, 40%, 0.25)").unwrap();
        assert!(close(c.r, 0.4) && close(c.g, 0.4) && close(c.b, 0.4));
        assert_eq!(c.a, 0.25);
    }

    #[test]
    fn test_hsl_requires_percentages() {
        assert_eq!(parse_color("hsl(120, 100, 50)"), None);
    }

    #[test]
    fn test_named_colors() {
        assert_eq!(parse_color("white"), Some(Color::new(1.0, 1.0, 1.0, 1.0)));
        assert_eq!(parse_color("WHITE"), Some(Color::new(1.0, 1.0, 1.0, 1.0)));
        assert_eq!(parse_color("transparent").map(|c| c.a), Some(0.0));
        let green = parse_color("green").unwrap();
        assert!(close(green.g, 128.0 / 255.0));
    }

    #[test]
    fn test_unparseable() {
        assert_eq!(parse_color(""), None);
        assert_eq!(parse_color("   "), None);
        assert_eq!(parse_color("chartreuse"), None);
        assert_eq!(parse_color("var(--brand)"), None);
        assert_eq!(parse_optional_color(None), None);
    }

    #[test]
    fn test_alpha_is_not_clamped() {
        let c = parse_color("rgba(300, 0, 0, 1.5)").unwrap();
        assert!(c.r > 1.0);
        assert_eq!(c.a, 1.5);
    }
}
