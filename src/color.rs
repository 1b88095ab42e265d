use std::collections::HashMap;

use image::{Rgb, RgbImage};

use crate::error::RenderError;

pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Gradient seeds used when no logo is supplied: near-white to light gray.
pub const DEFAULT_GRADIENT: [Rgb<u8>; 2] = [Rgb([255, 255, 255]), Rgb([200, 200, 200])];

/// Parse a color given as `#rgb`, `#rrggbb`, or a common CSS color name.
pub fn parse_color(value: &str) -> Result<Rgb<u8>, RenderError> {
    let trimmed = value.trim();
    let parsed = match trimmed.strip_prefix('#') {
        Some(hex) => parse_hex(hex),
        None => named_color(&trimmed.to_ascii_lowercase()),
    };
    parsed.ok_or_else(|| RenderError::InvalidColor(value.to_string()))
}

fn parse_hex(hex: &str) -> Option<Rgb<u8>> {
    match hex.len() {
        3 => {
            let mut out = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                out[i] = c.to_digit(16)? as u8 * 17;
            }
            Some(Rgb(out))
        }
        6 => {
            let mut out = [0u8; 3];
            for (i, chunk) in out.iter_mut().enumerate() {
                *chunk = u8::from_str_radix(hex.get(2 * i..2 * i + 2)?, 16).ok()?;
            }
            Some(Rgb(out))
        }
        _ => None,
    }
}

fn named_color(name: &str) -> Option<Rgb<u8>> {
    let rgb = match name {
        "black" => [0, 0, 0],
        "white" => [255, 255, 255],
        "gray" | "grey" => [128, 128, 128],
        "silver" => [192, 192, 192],
        "red" => [255, 0, 0],
        "maroon" => [128, 0, 0],
        "orange" => [255, 165, 0],
        "yellow" => [255, 255, 0],
        "olive" => [128, 128, 0],
        "lime" => [0, 255, 0],
        "green" => [0, 128, 0],
        "teal" => [0, 128, 128],
        "cyan" | "aqua" => [0, 255, 255],
        "blue" => [0, 0, 255],
        "navy" => [0, 0, 128],
        "purple" => [128, 0, 128],
        "magenta" | "fuchsia" => [255, 0, 255],
        "pink" => [255, 192, 203],
        "brown" => [165, 42, 42],
        _ => return None,
    };
    Some(Rgb(rgb))
}

/// The two most frequent exact colors in the image, ties broken by first
/// appearance. A single-color image yields that color twice; an empty image
/// yields the default gradient seeds.
pub fn dominant_colors(img: &RgbImage) -> [Rgb<u8>; 2] {
    let mut counts: HashMap<[u8; 3], (usize, usize)> = HashMap::new();
    for (order, pixel) in img.pixels().enumerate() {
        let entry = counts.entry(pixel.0).or_insert((0, order));
        entry.0 += 1;
    }

    let mut ranked: Vec<([u8; 3], (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));

    match ranked.as_slice() {
        [] => DEFAULT_GRADIENT,
        [(color, _)] => [Rgb(*color), Rgb(*color)],
        [(first, _), (second, _), ..] => [Rgb(*first), Rgb(*second)],
    }
}
