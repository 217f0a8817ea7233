//! Palette model, CPT text parsing and serialisation.

use crate::color::Rgb;
use crate::{CptError, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Which end of a segment GMT should annotate on a colourbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Annotation {
    /// Annotate the lower boundary.
    Lower,
    /// Annotate the upper boundary.
    Upper,
    /// Annotate both boundaries.
    Both,
}

impl Annotation {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "L" => Some(Annotation::Lower),
            "U" => Some(Annotation::Upper),
            "B" => Some(Annotation::Both),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Annotation::Lower => "L",
            Annotation::Upper => "U",
            Annotation::Both => "B",
        }
    }
}

/// One linear colour segment: `z0 R0 G0 B0 z1 R1 G1 B1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Lower boundary value.
    pub z0: f64,
    /// Colour at the lower boundary.
    pub c0: Rgb,
    /// Upper boundary value.
    pub z1: f64,
    /// Colour at the upper boundary.
    pub c1: Rgb,
    /// Optional colourbar annotation flag.
    pub annotation: Option<Annotation>,
    /// Optional `;label` text.
    pub label: Option<String>,
}

impl Segment {
    /// Create a segment without annotation or label.
    pub fn new(z0: f64, c0: Rgb, z1: f64, c1: Rgb) -> Self {
        Self {
            z0,
            c0,
            z1,
            c1,
            annotation: None,
            label: None,
        }
    }

    /// Check whether `z` falls inside this segment. Like GMT, the lower
    /// boundary is inclusive and the upper one exclusive.
    pub fn contains(&self, z: f64) -> bool {
        z >= self.z0 && z < self.z1
    }

    /// Interpolated colour at `z`. Values outside the segment are clamped.
    pub fn color_at(&self, z: f64) -> Rgb {
        let span = self.z1 - self.z0;
        if span <= 0.0 {
            return self.c0;
        }
        self.c0.lerp(self.c1, (z - self.z0) / span)
    }

    /// The eight numeric fields in file order.
    pub fn fields(&self) -> [f64; 8] {
        [
            self.z0,
            self.c0.r,
            self.c0.g,
            self.c0.b,
            self.z1,
            self.c1.r,
            self.c1.g,
            self.c1.b,
        ]
    }
}

/// A parsed colour palette table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Palette {
    /// Colour segments in file order.
    pub segments: Vec<Segment>,
    /// Colour for values below the palette range (`B` line).
    pub background: Option<Rgb>,
    /// Colour for values above the palette range (`F` line).
    pub foreground: Option<Rgb>,
    /// Colour for NaN values (`N` line).
    pub nan: Option<Rgb>,
    /// Comment lines (without the leading `#`), kept for re-serialisation.
    pub comments: Vec<String>,
}

impl Palette {
    /// Read and parse a CPT file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(CptError::NotFound(path.to_path_buf()));
        }
        let text = fs::read_to_string(path)?;
        text.parse().map_err(|e| match e {
            CptError::Parse { .. } | CptError::UnsupportedColorModel(_) | CptError::Empty => {
                CptError::InFile {
                    path: path.to_path_buf(),
                    source: Box::new(e),
                }
            }
            other => other,
        })
    }

    /// Background colour, falling back to the GMT default.
    pub fn background_or_default(&self) -> Rgb {
        self.background.unwrap_or(Rgb::BLACK)
    }

    /// Foreground colour, falling back to the GMT default.
    pub fn foreground_or_default(&self) -> Rgb {
        self.foreground.unwrap_or(Rgb::WHITE)
    }

    /// NaN colour, falling back to the GMT default.
    pub fn nan_or_default(&self) -> Rgb {
        self.nan.unwrap_or(Rgb::NAN_GRAY)
    }

    /// Lowest and highest boundary values across all segments.
    pub fn z_range(&self) -> Option<(f64, f64)> {
        self.segments.iter().fold(None, |acc, seg| match acc {
            None => Some((seg.z0, seg.z1)),
            Some((lo, hi)) => Some((lo.min(seg.z0), hi.max(seg.z1))),
        })
    }

    /// Colour for an elevation value.
    ///
    /// Below the palette range yields the background colour, above it the
    /// foreground colour. NaN and values falling into a gap between segments
    /// yield the NaN colour.
    pub fn color_at(&self, z: f64) -> Rgb {
        if z.is_nan() {
            return self.nan_or_default();
        }
        let seg = self
            .segments
            .iter()
            .find(|s| s.contains(z))
            .or_else(|| self.segments.iter().rev().find(|s| s.z1 == z));
        if let Some(seg) = seg {
            return seg.color_at(z);
        }
        match self.z_range() {
            Some((lo, _)) if z < lo => self.background_or_default(),
            Some((_, hi)) if z > hi => self.foreground_or_default(),
            _ => self.nan_or_default(),
        }
    }

    /// Serialise to CPT text using the eight-field segment form.
    pub fn to_cpt_string(&self) -> String {
        let mut out = String::new();
        for comment in &self.comments {
            let _ = writeln!(out, "#{}", comment);
        }
        for seg in &self.segments {
            let _ = write!(
                out,
                "{}\t{} {} {}\t{}\t{} {} {}",
                seg.z0, seg.c0.r, seg.c0.g, seg.c0.b, seg.z1, seg.c1.r, seg.c1.g, seg.c1.b
            );
            if let Some(annotation) = seg.annotation {
                let _ = write!(out, "\t{}", annotation.as_str());
            }
            if let Some(label) = &seg.label {
                let _ = write!(out, " ;{}", label);
            }
            out.push('\n');
        }
        for (key, color) in [("B", self.background), ("F", self.foreground), ("N", self.nan)] {
            if let Some(c) = color {
                let _ = writeln!(out, "{}\t{} {} {}", key, c.r, c.g, c.b);
            }
        }
        out
    }
}

impl FromStr for Palette {
    type Err = CptError;

    fn from_str(text: &str) -> Result<Self> {
        let mut palette = Palette::default();
        let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }

            if let Some(comment) = trimmed.strip_prefix('#') {
                check_color_model(comment)?;
                palette.comments.push(comment.to_string());
                continue;
            }

            let (body, label) = match trimmed.split_once(';') {
                Some((body, label)) => (body.trim(), Some(label.trim().to_string())),
                None => (trimmed, None),
            };
            let tokens: Vec<&str> = body.split_whitespace().collect();

            match tokens.first().copied() {
                Some(key @ ("B" | "F" | "N")) => {
                    let color = parse_special(&tokens[1..])
                        .map_err(|msg| CptError::parse(line_no, raw, msg))?;
                    match key {
                        "B" => palette.background = color,
                        "F" => palette.foreground = color,
                        _ => palette.nan = color,
                    }
                }
                _ => {
                    let mut seg = parse_segment(&tokens)
                        .map_err(|msg| CptError::parse(line_no, raw, msg))?;
                    seg.label = label.filter(|l| !l.is_empty());
                    palette.segments.push(seg);
                }
            }
        }

        if palette.segments.is_empty() {
            return Err(CptError::Empty);
        }
        Ok(palette)
    }
}

fn check_color_model(comment: &str) -> Result<()> {
    let comment = comment.trim();
    if let Some(rest) = comment.strip_prefix("COLOR_MODEL") {
        let model = rest.trim_start_matches(|c: char| c == '=' || c.is_whitespace());
        let model = model.trim_start_matches('+');
        if !model.eq_ignore_ascii_case("RGB") {
            return Err(CptError::UnsupportedColorModel(model.to_string()));
        }
    }
    Ok(())
}

/// Colour of a `B`/`F`/`N` line. `-` means the colour is skipped.
fn parse_special(tokens: &[&str]) -> std::result::Result<Option<Rgb>, String> {
    match tokens {
        ["-"] => Ok(None),
        [color] => Rgb::parse_token(color).map(Some),
        [r, g, b] => Rgb::parse_token(&format!("{}/{}/{}", r, g, b)).map(Some),
        _ => Err(format!(
            "expected one colour after the B/F/N key, found {} fields",
            tokens.len()
        )),
    }
}

fn parse_segment(tokens: &[&str]) -> std::result::Result<Segment, String> {
    let (fields, annotation) = match tokens.split_last() {
        Some((last, rest)) if matches!(rest.len(), 4 | 8) => match Annotation::from_token(last) {
            Some(a) => (rest, Some(a)),
            None => (tokens, None),
        },
        _ => (tokens, None),
    };

    let mut seg = match fields {
        [z0, r0, g0, b0, z1, r1, g1, b1] => Segment::new(
            parse_z(z0)?,
            rgb_from_fields(r0, g0, b0)?,
            parse_z(z1)?,
            rgb_from_fields(r1, g1, b1)?,
        ),
        [z0, c0, z1, c1] => Segment::new(
            parse_z(z0)?,
            Rgb::parse_token(c0)?,
            parse_z(z1)?,
            Rgb::parse_token(c1)?,
        ),
        _ => {
            return Err(format!(
                "expected 8 numeric fields (or 4 in short form), found {}",
                fields.len()
            ))
        }
    };

    if seg.z0 > seg.z1 {
        return Err(format!("segment boundaries decrease ({} > {})", seg.z0, seg.z1));
    }
    seg.annotation = annotation;
    Ok(seg)
}

fn rgb_from_fields(r: &str, g: &str, b: &str) -> std::result::Result<Rgb, String> {
    use crate::color::parse_channel;
    Ok(Rgb::from_channels(parse_channel(r)?, parse_channel(g)?, parse_channel(b)?))
}

fn parse_z(text: &str) -> std::result::Result<f64, String> {
    let z: f64 = text
        .parse()
        .map_err(|_| format!("'{}' is not a number", text))?;
    if !z.is_finite() {
        return Err(format!("boundary value '{}' is not finite", text));
    }
    Ok(z)
}
