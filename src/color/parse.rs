use std::{fmt, str::FromStr};

use crate::foundation::error::{BannerError, BannerResult};

/// A parsed color string, tagged by the notation it was written in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorNotation {
    /// `#RRGGBB` or `RRGGBB`.
    Hex { r: u8, g: u8, b: u8 },
    /// `rgb(r,g,b)` or bare `r,g,b`, channels in 0..=255.
    Rgb { r: u8, g: u8, b: u8 },
    /// `cmyk(c,m,y,k)` or bare `c,m,y,k`, channels in 0..=100.
    Cmyk { c: u8, m: u8, y: u8, k: u8 },
}

impl ColorNotation {
    /// Collapse any notation into the canonical RGB color.
    pub fn normalize(self) -> Color {
        match self {
            Self::Hex { r, g, b } | Self::Rgb { r, g, b } => Color::rgb(r, g, b),
            Self::Cmyk { c, m, y, k } => {
                let [r, g, b] = cmyk_to_rgb(c, m, y, k);
                Color::rgb(r, g, b)
            }
        }
    }
}

/// Canonical color: an opaque sRGB triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse any supported notation and normalize it.
    pub fn parse(input: &str) -> BannerResult<Self> {
        parse_notation(input).map(ColorNotation::normalize)
    }

    pub fn to_rgb(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Opaque premultiplied pixel (identical to straight for alpha 255).
    pub fn to_premul(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }

    /// CMYK percentages. Lossy: channels are rounded to whole percent.
    pub fn to_cmyk(self) -> [u8; 4] {
        let max = self.r.max(self.g).max(self.b);
        if max == 0 {
            return [0, 0, 0, 100];
        }
        let max = f64::from(max);
        let k = 1.0 - max / 255.0;
        let channel = |v: u8| ((max - f64::from(v)) / max * 100.0).round() as u8;
        [
            channel(self.r),
            channel(self.g),
            channel(self.b),
            (k * 100.0).round() as u8,
        ]
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = BannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        Color::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// CMYK percentages to RGB: `255 * (1 - x/100) * (1 - k/100)`, rounded half up.
pub fn cmyk_to_rgb(c: u8, m: u8, y: u8, k: u8) -> [u8; 3] {
    fn channel(x: u8, k: u8) -> u8 {
        let x = 100u32.saturating_sub(u32::from(x));
        let k = 100u32.saturating_sub(u32::from(k));
        ((255 * x * k + 5_000) / 10_000).min(255) as u8
    }
    [channel(c, k), channel(m, k), channel(y, k)]
}

/// Recognize one of the HEX/RGB/CMYK grammars. Case is ignored. Whitespace is trimmed around
/// tokens; inside a number or hex code it is an error.
pub fn parse_notation(input: &str) -> BannerResult<ColorNotation> {
    let s = input.trim().to_ascii_lowercase();
    if s.is_empty() {
        return Err(BannerError::invalid_color("empty color string"));
    }

    if let Some(body) = wrapped(&s, "rgb") {
        return parse_rgb(body, input);
    }
    if let Some(body) = wrapped(&s, "cmyk") {
        return parse_cmyk(body, input);
    }
    if s.contains(',') {
        return match s.split(',').count() {
            3 => parse_rgb(&s, input),
            4 => parse_cmyk(&s, input),
            n => Err(BannerError::invalid_color(format!(
                "\"{input}\" has {n} components; expected 3 (r,g,b) or 4 (c,m,y,k)"
            ))),
        };
    }
    parse_hex(&s, input)
}

fn wrapped<'a>(s: &'a str, keyword: &str) -> Option<&'a str> {
    s.strip_prefix(keyword)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

fn parse_hex(s: &str, input: &str) -> BannerResult<ColorNotation> {
    let digits = s.strip_prefix('#').unwrap_or(s);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(BannerError::invalid_color(format!(
            "\"{input}\" is not #RRGGBB, rgb(r,g,b) or cmyk(c,m,y,k)"
        )));
    }
    let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16);
    match (byte(0), byte(2), byte(4)) {
        (Ok(r), Ok(g), Ok(b)) => Ok(ColorNotation::Hex { r, g, b }),
        _ => Err(BannerError::invalid_color(format!(
            "\"{input}\" has invalid hex digits"
        ))),
    }
}

fn parse_rgb(body: &str, input: &str) -> BannerResult<ColorNotation> {
    let [r, g, b] = parse_channels::<3>(body, 255, input)?;
    Ok(ColorNotation::Rgb { r, g, b })
}

fn parse_cmyk(body: &str, input: &str) -> BannerResult<ColorNotation> {
    let [c, m, y, k] = parse_channels::<4>(body, 100, input)?;
    Ok(ColorNotation::Cmyk { c, m, y, k })
}

fn parse_channels<const N: usize>(body: &str, max: u8, input: &str) -> BannerResult<[u8; N]> {
    let parts: Vec<&str> = body.split(',').collect();
    if parts.len() != N {
        return Err(BannerError::invalid_color(format!(
            "\"{input}\" needs exactly {N} channels, got {}",
            parts.len()
        )));
    }

    let mut out = [0u8; N];
    for (slot, part) in out.iter_mut().zip(parts) {
        let part = part.trim();
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(BannerError::invalid_color(format!(
                "\"{input}\": channel \"{part}\" is not a non-negative integer"
            )));
        }
        let value = part.parse::<u32>().ok().filter(|v| *v <= u32::from(max));
        *slot = match value {
            Some(v) => v as u8,
            None => {
                return Err(BannerError::invalid_color(format!(
                    "\"{input}\": channel {part} is outside 0..={max}"
                )));
            }
        };
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/color/parse.rs"]
mod tests;
