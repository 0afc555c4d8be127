use crate::foundation::error::{FxError, FxResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Straight-alpha RGBA8 color as resolved by a host style system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel, `0` is fully transparent.
    pub a: u8,
}

impl Rgba8 {
    /// Fully transparent black, the resolved value of `transparent`.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Construct from all four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Construct an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// `true` when the color contributes nothing visually.
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Parse a CSS color string (`transparent`, hex, `rgb()` / `rgba()`).
    pub fn parse_css(s: &str) -> FxResult<Self> {
        parse_css(s).map_err(FxError::validation)
    }

    /// Premultiplied channels for raster backends.
    pub fn to_premul(self) -> [u8; 4] {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }
        [
            premul(self.r, self.a),
            premul(self.g, self.a),
            premul(self.b, self.a),
            self.a,
        ]
    }

    /// Channel-wise inverse (`255 - c`), alpha preserved.
    pub fn inverse(self) -> Self {
        Self::new(255 - self.r, 255 - self.g, 255 - self.b, self.a)
    }

    /// Color opposite on the hue wheel (hue rotated by 180°), same saturation and lightness.
    pub fn complementary(self) -> Self {
        let hsl = Hsl::from_rgb(self);
        let rotated = Hsl {
            h: (hsl.h + 180.0) % 360.0,
            ..hsl
        };
        let mut out = rotated.to_rgb();
        out.a = self.a;
        out
    }
}

impl fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            let a = f64::from(self.a) / 255.0;
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, round3(a))
        }
    }
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

impl FromStr for Rgba8 {
    type Err = FxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_css(s)
    }
}

impl Serialize for Rgba8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Css(String),
            Arr(Vec<u8>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Css(s) => parse_css(&s).map_err(serde::de::Error::custom),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Self::rgb(*r, *g, *b)),
                [r, g, b, a] => Ok(Self::new(*r, *g, *b, *a)),
                _ => Err(serde::de::Error::custom(
                    "color array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

/// Hue/saturation/lightness triple; `h` in degrees `[0, 360)`, `s` and `l` in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    /// Hue in degrees.
    pub h: f64,
    /// Saturation.
    pub s: f64,
    /// Lightness.
    pub l: f64,
}

impl Hsl {
    /// Convert from the RGB channels of `c` (alpha ignored).
    pub fn from_rgb(c: Rgba8) -> Self {
        let r = f64::from(c.r) / 255.0;
        let g = f64::from(c.g) / 255.0;
        let b = f64::from(c.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        if max == min {
            return Self { h: 0.0, s: 0.0, l };
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        Self { h: h * 60.0, s, l }
    }

    /// Convert back to an opaque RGB color, rounding each channel.
    pub fn to_rgb(self) -> Rgba8 {
        let h = self.h.rem_euclid(360.0);
        let s = self.s.clamp(0.0, 1.0);
        let l = self.l.clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match (h / 60.0) as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        fn to_u8(v: f64) -> u8 {
            (v * 255.0).round().clamp(0.0, 255.0) as u8
        }
        Rgba8::rgb(to_u8(r + m), to_u8(g + m), to_u8(b + m))
    }
}

fn parse_css(s: &str) -> Result<Rgba8, String> {
    let s = s.trim();
    let lower = s.to_ascii_lowercase();
    match lower.as_str() {
        "transparent" => return Ok(Rgba8::TRANSPARENT),
        "black" => return Ok(Rgba8::BLACK),
        "white" => return Ok(Rgba8::WHITE),
        _ => {}
    }

    if let Some(hex) = lower.strip_prefix('#') {
        return parse_hex(hex);
    }

    let args = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| format!("unsupported color \"{s}\""))?;
    parse_rgb_args(args).map_err(|e| format!("invalid color \"{s}\": {e}"))
}

fn parse_hex(hex: &str) -> Result<Rgba8, String> {
    fn nibble(c: u8) -> Result<u8, String> {
        (c as char)
            .to_digit(16)
            .map(|d| d as u8)
            .ok_or_else(|| format!("invalid hex digit '{}'", c as char))
    }

    let b = hex.as_bytes();
    let mut ch = Vec::with_capacity(4);
    match b.len() {
        3 | 4 => {
            for &c in b {
                let n = nibble(c)?;
                ch.push(n * 17);
            }
        }
        6 | 8 => {
            for pair in b.chunks(2) {
                ch.push(nibble(pair[0])? * 16 + nibble(pair[1])?);
            }
        }
        _ => {
            return Err("hex color must be #RGB, #RGBA, #RRGGBB or #RRGGBBAA".to_owned());
        }
    }
    let a = ch.get(3).copied().unwrap_or(255);
    Ok(Rgba8::new(ch[0], ch[1], ch[2], a))
}

fn parse_rgb_args(args: &str) -> Result<Rgba8, String> {
    // Accepts both `r, g, b[, a]` and `r g b[ / a]`.
    let (channels, alpha) = match args.split_once('/') {
        Some((c, a)) => (c, Some(a.trim())),
        None => (args, None),
    };
    let mut parts: Vec<&str> = channels
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();

    let alpha = match (alpha, parts.len()) {
        (Some(a), 3) => Some(a),
        (None, 4) => parts.pop(),
        (None, 3) => None,
        _ => return Err(format!("expected 3 or 4 components, got {}", parts.len())),
    };

    let mut rgb = [0u8; 3];
    for (slot, p) in rgb.iter_mut().zip(&parts) {
        let v: f64 = p
            .parse()
            .map_err(|_| format!("channel \"{p}\" is not a number"))?;
        if !v.is_finite() {
            return Err(format!("channel \"{p}\" is not finite"));
        }
        *slot = v.round().clamp(0.0, 255.0) as u8;
    }

    let a = match alpha {
        None => 255,
        Some(a) => {
            let v = match a.strip_suffix('%') {
                Some(pct) => pct.parse::<f64>().map(|p| p / 100.0),
                None => a.parse::<f64>(),
            }
            .map_err(|_| format!("alpha \"{a}\" is not a number"))?;
            if !v.is_finite() {
                return Err(format!("alpha \"{a}\" is not finite"));
            }
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        }
    };

    Ok(Rgba8::new(rgb[0], rgb[1], rgb[2], a))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
