//! Flat views of a [`PixelGrid`], for tools that want codes without the row structure.
use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    code::split_raw,
    grid::{single_label, PixelGrid},
    label::{RowLabel, MAX_ROWS},
};

/// Key holding every code of a grid in [`row_keys`].
pub const REVEAL_ALL: &str = "REVEAL_ALL";

/// Fields of one code, with the color token kept as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeFields {
    /// Leading size number
    pub size: usize,
    /// Row label
    pub row: String,
    /// Column number
    pub col: usize,
    /// Color token, without the separator
    pub color: String,
}

/// Every code of a document in one list, plus what each of them parses to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extracted {
    /// Name of the document the codes came from
    pub source: String,
    /// Number of codes
    pub count: usize,
    /// Codes, row by row
    pub codes: Vec<String>,
    /// Parsed fields of each code, `null` for codes that do not parse
    pub map: BTreeMap<String, Option<CodeFields>>,
}

/// Flattens `grid`. Rows come in alphabet order, followed by any rows with other keys
/// in document order.
///
/// Codes are parsed with [`split_raw`], so a row letter outside the alphabet still gets its fields.
pub fn extract(grid: &PixelGrid, source: &str) -> Extracted {
    let labelled = RowLabel::all().filter_map(|label| grid.row(label));
    let others = grid
        .rows()
        .filter(|(key, _)| single_label(key).is_none())
        .map(|(_, codes)| codes);
    let codes: Vec<String> = labelled.chain(others).flatten().cloned().collect();

    let map = codes
        .iter()
        .map(|code| {
            let fields = split_raw(code).ok().map(|parts| CodeFields {
                size: parts.size,
                row: parts.label.to_string(),
                col: parts.col,
                color: parts.color.to_string(),
            });
            (code.clone(), fields)
        })
        .collect();

    Extracted {
        source: source.to_string(),
        count: codes.len(),
        codes,
        map,
    }
}

/// One `ROW_<label>` key per row for the first 31 rows, plus [`REVEAL_ALL`] with the
/// codes of every row in order. Rows missing from the grid get an empty list.
pub fn row_keys(grid: &PixelGrid) -> BTreeMap<String, Vec<String>> {
    let mut keys = BTreeMap::new();
    let mut all = Vec::new();

    for (i, label) in RowLabel::all().enumerate() {
        let codes = grid.row(label).unwrap_or_default();
        if i < MAX_ROWS - 1 {
            keys.insert(format!("ROW_{}", label), codes.to_vec());
        }
        all.extend_from_slice(codes);
    }
    keys.insert(REVEAL_ALL.to_string(), all);
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattens_in_row_order() {
        let grid = PixelGrid::from_json(
            r#"{"rows": {"zz": ["oops"], "B": ["2B0_red"], "A": ["2A0_FFF", "2A1FFF"]}}"#,
        )
        .unwrap();
        let out = extract(&grid, "pixels.json");

        assert_eq!(out.count, 4);
        assert_eq!(out.codes, ["2A0_FFF", "2A1FFF", "2B0_red", "oops"]);
        assert_eq!(out.map["oops"], None);
        assert_eq!(
            out.map["2A1FFF"],
            Some(CodeFields {
                size: 2,
                row: "A".to_string(),
                col: 1,
                color: "FFF".to_string(),
            })
        );

        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["source"], "pixels.json");
        assert_eq!(json["map"]["2B0_red"]["color"], "red");
        assert!(json["map"]["oops"].is_null());
    }

    #[test]
    fn letters_outside_the_alphabet_still_parse() {
        let grid = PixelGrid::from_json(
            r#"{"rows": {"x": ["4x0_FFF"], "q": ["4q1_red"], "A": ["4A0_000"]}}"#,
        )
        .unwrap();
        let out = extract(&grid, "odd.json");

        assert_eq!(out.codes, ["4A0_000", "4x0_FFF", "4q1_red"]);
        let fields = out.map["4x0_FFF"].as_ref().unwrap();
        assert_eq!((fields.row.as_str(), fields.col), ("x", 0));
        assert_eq!(out.map["4q1_red"].as_ref().unwrap().color, "red");
    }

    #[test]
    fn row_keys_per_label() {
        let grid = PixelGrid::from_json(
            r#"{"rows": {"A": ["32A0_FFF"], "a": ["32a0_000"], "f": ["32f0_000"]}}"#,
        )
        .unwrap();
        let keys = row_keys(&grid);

        assert_eq!(keys.len(), 32);
        assert_eq!(keys["ROW_A"], ["32A0_FFF"]);
        assert_eq!(keys["ROW_a"], ["32a0_000"]);
        assert!(keys["ROW_Z"].is_empty());
        assert!(!keys.contains_key("ROW_f"));
        assert_eq!(keys[REVEAL_ALL], ["32A0_FFF", "32a0_000", "32f0_000"]);
    }
}
