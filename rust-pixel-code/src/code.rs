use core::fmt;
use core::str::FromStr;

use crate::{
    color::{resolve, Rgba},
    error::{Error, Result},
    label::{label_for, RowLabel, MAX_ROWS},
};

/// Separator written between the column and the color.
pub const SEPARATOR: char = '_';

/// One decoded pixel: `<size><row><col>_<color>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelCode {
    /// Width and height of the grid the pixel belongs to
    pub size: usize,
    /// Row of the pixel
    pub row: RowLabel,
    /// Column of the pixel
    pub col: usize,
    /// Color of the pixel
    pub color: Rgba,
}

/// The fields of a pixel code before its color token is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeParts<'a> {
    /// Leading number
    pub size: usize,
    /// Row label
    pub row: RowLabel,
    /// Column number
    pub col: usize,
    /// Everything after the column, without the separator
    pub color: &'a str,
}

/// Fields of a pixel code whose row label may lie outside the alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawParts<'a> {
    /// Leading number
    pub size: usize,
    /// Row label as written, any ASCII letter
    pub label: char,
    /// Column number
    pub col: usize,
    /// Everything after the column, without the separator
    pub color: &'a str,
}

impl PixelCode {
    /// Creates a pixel code, checking the position against the grid size.
    pub fn new(size: usize, row_index: usize, col: usize, color: Rgba) -> Result<Self> {
        if size == 0 || size > MAX_ROWS {
            return Err(Error::Range {
                what: "size",
                value: size,
                max: MAX_ROWS + 1,
            });
        }
        if row_index >= size {
            return Err(Error::Range {
                what: "row",
                value: row_index,
                max: size,
            });
        }
        if col >= size {
            return Err(Error::Range {
                what: "column",
                value: col,
                max: size,
            });
        }
        Ok(Self {
            size,
            row: label_for(row_index)?,
            col,
            color,
        })
    }
}

impl fmt::Display for PixelCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}",
            self.size,
            self.row,
            self.col,
            SEPARATOR,
            self.color.to_hex()
        )
    }
}

impl FromStr for PixelCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        decode(s)
    }
}

/// Encodes one pixel of a `size`x`size` grid.
pub fn encode(size: usize, row_index: usize, col: usize, color: Rgba) -> Result<String> {
    Ok(PixelCode::new(size, row_index, col, color)?.to_string())
}

/// Decodes a pixel code, resolving its color token.
///
/// Unrecognized colors do not fail; they resolve to [`Rgba::FALLBACK`].
pub fn decode(code: &str) -> Result<PixelCode> {
    let parts = split(code)?;
    Ok(PixelCode {
        size: parts.size,
        row: parts.row,
        col: parts.col,
        color: resolve(parts.color),
    })
}

/// Splits a pixel code into its fields without interpreting the color.
pub fn split(code: &str) -> Result<CodeParts<'_>> {
    let raw = split_raw(code)?;
    Ok(CodeParts {
        size: raw.size,
        row: RowLabel::from_char(raw.label).ok_or(Error::UnknownLabel(raw.label))?,
        col: raw.col,
        color: raw.color,
    })
}

/// Like [`split`], but any ASCII letter is accepted as the row label.
pub fn split_raw(code: &str) -> Result<RawParts<'_>> {
    let trimmed = code.trim();

    let (size, rest) = take_digits(trimmed);
    if size.is_empty() {
        return Err(Error::format(code, "missing size digits"));
    }

    let mut chars = rest.chars();
    let label = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => c,
        _ => return Err(Error::format(code, "missing row label")),
    };

    let (col, color) = take_digits(chars.as_str());
    if col.is_empty() {
        return Err(Error::format(code, "missing column digits"));
    }

    Ok(RawParts {
        size: parse_number(code, size)?,
        label,
        col: parse_number(code, col)?,
        color: color.strip_prefix(SEPARATOR).unwrap_or(color),
    })
}

/// Splits off the leading run of ASCII digits.
fn take_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

fn parse_number(code: &str, digits: &str) -> Result<usize> {
    digits
        .parse()
        .map_err(|_| Error::format(code, "number does not fit in an integer"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = Rgba::opaque(255, 0, 0);

    #[test]
    fn encode_opaque_and_translucent() {
        assert_eq!(encode(32, 7, 11, RED).unwrap(), "32H11_FF0000");
        assert_eq!(
            encode(32, 26, 0, Rgba::new(0, 255, 0, 128)).unwrap(),
            "32a0_00FF0080"
        );
        assert_eq!(encode(2, 1, 1, Rgba::TRANSPARENT).unwrap(), "2B1_00000000");
    }

    #[test]
    fn encode_checks_ranges() {
        assert!(matches!(encode(0, 0, 0, RED), Err(Error::Range { what: "size", .. })));
        assert!(matches!(encode(33, 0, 0, RED), Err(Error::Range { what: "size", .. })));
        assert!(matches!(encode(8, 8, 0, RED), Err(Error::Range { what: "row", .. })));
        assert!(matches!(encode(8, 0, 8, RED), Err(Error::Range { what: "column", .. })));
    }

    #[test]
    fn decode_with_and_without_separator() {
        let expected = PixelCode {
            size: 32,
            row: RowLabel::H,
            col: 11,
            color: RED,
        };
        assert_eq!(decode("32H11_FF0000").unwrap(), expected);
        assert_eq!(decode("32H11FF0000").unwrap(), expected);
        assert_eq!(decode("32H11red").unwrap(), expected);
        assert_eq!(decode("  32H11_#f00\n").unwrap(), expected);
    }

    #[test]
    fn only_one_separator_is_stripped() {
        let parts = split("8A3__FFF").unwrap();
        assert_eq!(parts.color, "_FFF");
        // leftover underscores are punctuation to the resolver
        assert_eq!(decode("8A3__FFF").unwrap().color, Rgba::opaque(255, 255, 255));
    }

    #[test]
    fn unknown_color_is_not_an_error() {
        let code = decode("4b2_notacolor").unwrap();
        assert_eq!(code.row, RowLabel::b);
        assert_eq!(code.color, Rgba::FALLBACK);
        assert_eq!(decode("4b2").unwrap().color, Rgba::FALLBACK);
    }

    #[test]
    fn grammar_violations() {
        for code in ["A10red", "", "32", "32_1FFF", "32A", "32A_FFF"] {
            let err = decode(code).unwrap_err();
            assert!(matches!(err, Error::Format { .. }), "{code:?}: {err}");
        }
        assert!(matches!(decode("32g1_FFF"), Err(Error::UnknownLabel('g'))));
        assert!(decode("99999999999999999999999A1_FFF").unwrap_err().is_format());
    }

    #[test]
    fn raw_split_accepts_any_letter() {
        let raw = split_raw("4x0_FFF").unwrap();
        assert_eq!((raw.size, raw.label, raw.col, raw.color), (4, 'x', 0, "FFF"));
        assert!(matches!(split("4x0_FFF"), Err(Error::UnknownLabel('x'))));
        assert!(split_raw("4_0_FFF").unwrap_err().is_format());
    }

    #[test]
    fn display_matches_encode() {
        let code: PixelCode = "24X3_0A0B0C".parse().unwrap();
        assert_eq!(code.to_string(), "24X3_0A0B0C");
    }
}
