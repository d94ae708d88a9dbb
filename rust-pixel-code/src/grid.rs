use std::io::{Read, Write};

use log::{debug, trace, warn};
use serde::{ser::SerializeStruct, Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::{
    code::{decode, encode},
    error::{Error, Result},
    label::{label_for, RowLabel, MAX_ROWS},
    raster::Raster,
};

/// What to do with codes that cannot be placed while decoding a grid.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DecodePolicy {
    /// Log and skip the offending code.
    #[default]
    Permissive,
    /// Stop at the first offending code and return its error.
    Strict,
}

/// Options for turning a [`PixelGrid`] back into a [`Raster`].
#[derive(Debug, Default, Clone, Copy)]
pub struct DecodeOptions {
    policy: DecodePolicy,
}

impl DecodeOptions {
    /// Options with the strict policy
    pub fn strict() -> Self {
        Self {
            policy: DecodePolicy::Strict,
        }
    }
    /// Sets how offending codes are treated
    pub fn set_policy(mut self, policy: DecodePolicy) -> Self {
        self.policy = policy;
        self
    }
    /// Returns how offending codes are treated
    pub const fn get_policy(&self) -> DecodePolicy {
        self.policy
    }
}

/// Pixel codes grouped by row label, each row ordered by column.
///
/// Serializes to the container document `{"rows": {"A": ["2A0_FF0000", ...], ...}}`.
/// Rows keep the order they were read or encoded in.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    rows: Vec<(String, Vec<String>)>,
}

#[derive(Deserialize)]
struct Container {
    rows: Option<Map<String, Value>>,
}

struct Rows<'a>(&'a [(String, Vec<String>)]);

impl<'a> Serialize for Rows<'a> {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.0.iter().map(|(key, codes)| (key, codes)))
    }
}

impl Serialize for PixelGrid {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("PixelGrid", 1)?;
        state.serialize_field("rows", &Rows(&self.rows))?;
        state.end()
    }
}

impl PixelGrid {
    /// Wraps rows read from elsewhere, keeping their order. Row keys are not checked until decoding.
    pub fn from_rows<I>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        let rows: Vec<_> = rows.into_iter().collect();
        if rows.iter().all(|(_, codes)| codes.is_empty()) {
            return Err(Error::Document("no pixel codes found"));
        }
        Ok(Self { rows })
    }

    /// Encodes every pixel of `raster`.
    pub fn from_raster(raster: &Raster) -> Result<Self> {
        let size = raster.size;
        if size == 0 || size > MAX_ROWS {
            return Err(Error::Range {
                what: "size",
                value: size,
                max: MAX_ROWS + 1,
            });
        }
        let mut rows = Vec::with_capacity(size);
        for y in 0..size {
            let label = label_for(y)?;
            let codes = (0..size)
                .map(|x| {
                    let color = raster.pixel(x, y).ok_or(Error::Range {
                        what: "raster length",
                        value: raster.data.len(),
                        max: raster.data.len() + 1,
                    })?;
                    encode(size, y, x, color)
                })
                .collect::<Result<Vec<_>>>()?;
            rows.push((label.to_string(), codes));
        }
        debug!("Encoded {}x{} raster", size, size);
        Ok(Self { rows })
    }

    /// Parses a container document.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_container(serde_json::from_str(json)?)
    }

    /// Reads a container document.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_container(serde_json::from_reader(reader)?)
    }

    fn from_container(container: Container) -> Result<Self> {
        let rows = container
            .rows
            .ok_or(Error::Document("missing field `rows`"))?
            .into_iter()
            .map(|(key, codes)| Ok((key, serde_json::from_value::<Vec<String>>(codes)?)))
            .collect::<Result<Vec<_>>>()?;
        Self::from_rows(rows)
    }

    /// Pretty printed container document.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the pretty printed container document.
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        Ok(serde_json::to_writer_pretty(writer, self)?)
    }

    /// Row keys with their codes, in document order.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.rows
            .iter()
            .map(|(key, codes)| (key.as_str(), codes.as_slice()))
    }

    /// Codes of one row.
    pub fn row(&self, label: RowLabel) -> Option<&[String]> {
        self.rows()
            .find(|(key, _)| single_label(key) == Some(label))
            .map(|(_, codes)| codes)
    }

    /// Total number of codes.
    pub fn len(&self) -> usize {
        self.rows.iter().map(|(_, codes)| codes.len()).sum()
    }

    /// True if the grid holds no codes
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Size written in the first code that decodes, in document order.
    pub fn size(&self) -> Option<usize> {
        self.rows
            .iter()
            .flat_map(|(_, codes)| codes)
            .find_map(|code| decode(code).ok())
            .map(|code| code.size)
    }

    /// Paints every code onto a fresh transparent raster.
    ///
    /// Rows whose key is not a row label are ignored. Codes whose own label differs from
    /// their row are never moved to another row: they are skipped, or reported under
    /// [`DecodePolicy::Strict`].
    pub fn to_raster(&self, options: &DecodeOptions) -> Result<Raster> {
        let size = self
            .size()
            .ok_or(Error::Document("no decodable pixel codes"))?;
        debug!("Detected grid size {}", size);

        let mut raster = Raster::new(size)?;
        for (key, codes) in self.rows() {
            let row = match single_label(key) {
                Some(row) => row,
                None => {
                    warn!("Ignoring row {:?}, not a row label", key);
                    continue;
                }
            };
            trace!("Decoding row {} ({} codes)", row, codes.len());

            for code in codes {
                if let Err(e) = paint(&mut raster, row, code, options) {
                    match options.get_policy() {
                        DecodePolicy::Strict => return Err(e),
                        DecodePolicy::Permissive => warn!("Skipping {:?}: {}", code, e),
                    }
                }
            }
        }
        Ok(raster)
    }
}

pub(crate) fn single_label(key: &str) -> Option<RowLabel> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => RowLabel::from_char(c),
        _ => None,
    }
}

fn paint(raster: &mut Raster, row: RowLabel, code: &str, options: &DecodeOptions) -> Result<()> {
    let strict = options.get_policy() == DecodePolicy::Strict;
    let pixel = decode(code)?;

    if pixel.row != row {
        return Err(Error::Integrity {
            code: code.to_string(),
            reason: "row label does not match the row it is listed under",
        });
    }
    if strict && pixel.size != raster.size {
        return Err(Error::Integrity {
            code: code.to_string(),
            reason: "size differs from the rest of the grid",
        });
    }
    if raster.set_pixel(pixel.col, row.index(), pixel.color) || !strict {
        return Ok(());
    }
    let (what, value) = if row.index() >= raster.size {
        ("row", row.index())
    } else {
        ("column", pixel.col)
    };
    Err(Error::Range {
        what,
        value,
        max: raster.size,
    })
}
