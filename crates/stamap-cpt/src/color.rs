//! RGB colours as they appear in CPT files.

use std::fmt;

/// An RGB colour with 0-255 channels.
///
/// Channels keep the exact values written in the file, fractions included;
/// they are rounded to 8 bits only when rendered.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
}

impl Rgb {
    /// Black, the GMT default background colour.
    pub const BLACK: Rgb = Rgb::from_channels(0.0, 0.0, 0.0);
    /// White, the GMT default foreground colour.
    pub const WHITE: Rgb = Rgb::from_channels(255.0, 255.0, 255.0);
    /// Mid grey, the GMT default NaN colour.
    pub const NAN_GRAY: Rgb = Rgb::from_channels(128.0, 128.0, 128.0);

    /// Create a colour from 8-bit channels.
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self::from_channels(r.into(), g.into(), b.into())
    }

    /// Create a colour from channel values as written in a CPT file.
    pub const fn from_channels(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// A grey level.
    pub fn gray(level: u8) -> Self {
        Self::new(level, level, level)
    }

    /// Linear blend between `self` (t = 0) and `other` (t = 1).
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Rgb::from_channels(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    /// Channels rounded to 8 bits, in the order the `image` crate expects.
    pub fn to_array(self) -> [u8; 3] {
        let quantize = |c: f64| c.round().clamp(0.0, 255.0) as u8;
        [quantize(self.r), quantize(self.g), quantize(self.b)]
    }

    /// Parse a single colour token: `R/G/B`, a grey level, or `#rrggbb`.
    ///
    /// Returns a human readable reason on failure.
    pub fn parse_token(token: &str) -> Result<Rgb, String> {
        if let Some(hex) = token.strip_prefix('#') {
            if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(format!("invalid hex colour '{}'", token));
            }
            let channel = |i: usize| {
                u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| e.to_string())
            };
            return Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?));
        }

        let parts: Vec<&str> = token.split('/').collect();
        match parts.as_slice() {
            [gray] => {
                let level = parse_channel(gray)?;
                Ok(Rgb::from_channels(level, level, level))
            }
            [r, g, b] => Ok(Rgb::from_channels(
                parse_channel(r)?,
                parse_channel(g)?,
                parse_channel(b)?,
            )),
            _ => Err(format!("invalid colour '{}'", token)),
        }
    }
}

/// Parse one 0-255 colour channel. Fractional values are kept as written.
pub(crate) fn parse_channel(text: &str) -> Result<f64, String> {
    let value: f64 = text
        .parse()
        .map_err(|_| format!("'{}' is not a number", text))?;
    if !(0.0..=255.0).contains(&value) {
        return Err(format!("colour channel {} outside 0-255", text));
    }
    Ok(value)
}

impl fmt::Display for Rgb {
    /// Formats in GMT's `R/G/B` notation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.r, self.g, self.b)
    }
}
