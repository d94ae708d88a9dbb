use core::fmt;

use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive, ToPrimitive};

use crate::error::{Error, Result};

/// Number of rows addressable by a label.
pub const MAX_ROWS: usize = 32;

/// Label characters, ordered by row index.
///
/// Previously written documents depend on this exact order.
pub const ALPHABET: &[u8; MAX_ROWS] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdef";

/// Single character identifier of a row index.
#[allow(non_camel_case_types, missing_docs)]
#[rustfmt::skip]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, FromPrimitive, ToPrimitive, Debug, Clone, Copy)]
pub enum RowLabel {
    A = 0, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    a, b, c, d, e, f,
}

impl RowLabel {
    /// Returns the label for a row index.
    pub fn from_index(index: usize) -> Option<RowLabel> {
        FromPrimitive::from_usize(index)
    }

    /// Returns the label written as `c`, if `c` belongs to the alphabet.
    pub fn from_char(c: char) -> Option<RowLabel> {
        ALPHABET
            .iter()
            .position(|&symbol| symbol as char == c)
            .and_then(RowLabel::from_index)
    }

    /// Row index of this label.
    pub fn index(self) -> usize {
        // Every variant has a discriminant in 0..32
        self.to_usize().unwrap_or_default()
    }

    /// Character written for this label.
    pub fn as_char(self) -> char {
        ALPHABET[self.index()] as char
    }

    /// All labels in row order.
    pub fn all() -> impl Iterator<Item = RowLabel> {
        (0..MAX_ROWS).filter_map(RowLabel::from_index)
    }
}

impl fmt::Display for RowLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Label for row `index`. Fails for indices of 32 and above.
pub fn label_for(index: usize) -> Result<RowLabel> {
    RowLabel::from_index(index).ok_or(Error::Range {
        what: "row index",
        value: index,
        max: MAX_ROWS,
    })
}

/// Row index written as `label`.
pub fn index_for(label: char) -> Result<usize> {
    RowLabel::from_char(label)
        .map(RowLabel::index)
        .ok_or(Error::UnknownLabel(label))
}
