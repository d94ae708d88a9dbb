use byteorder::{BigEndian, ByteOrder};
use log::trace;

/// An 8-bit per channel RGBA color.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel. 255 is opaque
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black, the background of decoded rasters.
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    /// Returned for color tokens nothing can make sense of.
    pub const FALLBACK: Rgba = Rgba::new(255, 0, 255, 255);

    /// Creates a color from its four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Channels in RGBA order.
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Packs the channels with red in the most significant byte.
    pub fn to_u32(self) -> u32 {
        BigEndian::read_u32(&self.to_array())
    }

    /// Inverse of [`Rgba::to_u32`].
    pub fn from_u32(packed: u32) -> Self {
        let mut buf = [0; 4];
        BigEndian::write_u32(&mut buf, packed);
        Self::from(buf)
    }

    /// Uppercase hex form, `RRGGBB` when opaque and `RRGGBBAA` otherwise.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("{:06X}", self.to_u32() >> 8)
        } else {
            format!("{:08X}", self.to_u32())
        }
    }
}

impl From<[u8; 4]> for Rgba {
    fn from(c: [u8; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

/// One way of reading a textual color.
pub trait ColorStrategy: Sync {
    /// Short name, used in logs
    fn name(&self) -> &'static str;
    /// Returns the color `token` denotes, or `None` if this notation does not apply.
    fn attempt(&self, token: &str) -> Option<Rgba>;
}

/// Hex notation: 3, 4, 6 or 8 digits with an optional `#` and stray punctuation.
///
/// Short forms have every nibble doubled. With more than 6 digits the first 6 are the color
/// and digits 7-8, if present, the alpha. Tokens containing letters that are not hex digits
/// (`red`, `transparent`) are left to the other strategies.
#[derive(Debug, Clone, Copy)]
pub struct HexStrategy;

impl ColorStrategy for HexStrategy {
    fn name(&self) -> &'static str {
        "hex"
    }

    fn attempt(&self, token: &str) -> Option<Rgba> {
        let mut digits = Vec::with_capacity(token.len());
        for c in token.chars() {
            if let Some(d) = c.to_digit(16) {
                digits.push(d as u8);
            } else if c.is_alphabetic() {
                return None;
            }
        }

        let pair = |i: usize| (digits[i] << 4) | digits[i + 1];
        match digits.len() {
            3 => Some(Rgba::opaque(
                digits[0] * 17,
                digits[1] * 17,
                digits[2] * 17,
            )),
            4 => Some(Rgba::new(
                digits[0] * 17,
                digits[1] * 17,
                digits[2] * 17,
                digits[3] * 17,
            )),
            6 | 7 => Some(Rgba::opaque(pair(0), pair(2), pair(4))),
            n if n >= 8 => Some(Rgba::new(pair(0), pair(2), pair(4), pair(6))),
            _ => None,
        }
    }
}

/// Basic color names, matched case-insensitively.
pub static PALETTE: [(&str, Rgba); 10] = [
    ("black", Rgba::opaque(0, 0, 0)),
    ("white", Rgba::opaque(255, 255, 255)),
    ("red", Rgba::opaque(255, 0, 0)),
    ("green", Rgba::opaque(0, 255, 0)),
    ("blue", Rgba::opaque(0, 0, 255)),
    ("yellow", Rgba::opaque(255, 255, 0)),
    ("magenta", Rgba::opaque(255, 0, 255)),
    ("cyan", Rgba::opaque(0, 255, 255)),
    ("gray", Rgba::opaque(128, 128, 128)),
    ("transparent", Rgba::TRANSPARENT),
];

/// Lookup in [`PALETTE`].
#[derive(Debug, Clone, Copy)]
pub struct NamedStrategy;

impl ColorStrategy for NamedStrategy {
    fn name(&self) -> &'static str {
        "named"
    }

    fn attempt(&self, token: &str) -> Option<Rgba> {
        let token = token.trim();
        PALETTE
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(token))
            .map(|&(_, color)| color)
    }
}

/// Strategies tried by [`resolve`], highest priority first.
pub static STRATEGIES: &[&dyn ColorStrategy] = &[&HexStrategy, &NamedStrategy];

/// Resolves a color token. Never fails: unrecognized tokens become [`Rgba::FALLBACK`].
pub fn resolve(token: &str) -> Rgba {
    resolve_with(STRATEGIES, token)
}

/// Like [`resolve`] with a caller supplied strategy list.
pub fn resolve_with(strategies: &[&dyn ColorStrategy], token: &str) -> Rgba {
    for strategy in strategies {
        if let Some(color) = strategy.attempt(token) {
            trace!("Color {:?} resolved by {} strategy", token, strategy.name());
            return color;
        }
    }
    trace!("Color {:?} not recognized, using fallback", token);
    Rgba::FALLBACK
}
