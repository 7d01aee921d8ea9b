//! sRGB colors as used by canvas backgrounds and gradient stops.
//!
//! The only accepted textual form is the strict six-digit `#RRGGBB` used by
//! the snapshot format; shorthand and named colors are rejected so that
//! every color in a serialized scene round-trips byte-for-byte.

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("expected a six-digit #rrggbb color")]
    Malformed,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Self = Self::new(0xff, 0xff, 0xff);
    pub const BLACK: Self = Self::new(0x00, 0x00, 0x00);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
    /// Build from a packed `0xRRGGBB` literal. Handy for preset tables.
    #[must_use]
    pub const fn from_rgb24(value: u32) -> Self {
        Self::new(
            ((value >> 16) & 0xff) as u8,
            ((value >> 8) & 0xff) as u8,
            (value & 0xff) as u8,
        )
    }
    /// Strict `#RRGGBB` parse, case-insensitive.
    pub fn parse(text: &str) -> Result<Self, ColorParseError> {
        let hex = text.strip_prefix('#').ok_or(ColorParseError::Malformed)?;
        if hex.len() != 6 || !hex.bytes().all(|byte| byte.is_ascii_hexdigit()) {
            return Err(ColorParseError::Malformed);
        }
        let channel = |range: std::ops::Range<usize>| {
            // Unwrap OK - every byte was checked to be a hex digit.
            u8::from_str_radix(&hex[range], 16).unwrap()
        };
        Ok(Self::new(channel(0..2), channel(2..4), channel(4..6)))
    }
    /// Parse, substituting `fallback` for anything malformed.
    #[must_use]
    pub fn parse_or(text: &str, fallback: Self) -> Self {
        Self::parse(text).unwrap_or(fallback)
    }
    /// Per-channel linear interpolation toward `other`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let channel = |a: u8, b: u8| {
            crate::util::clamp(crate::util::lerp(f32::from(a), f32::from(b), t).round(), 0.0, 255.0)
                as u8
        };
        Self::new(
            channel(self.r, other.r),
            channel(self.g, other.g),
            channel(self.b, other.b),
        )
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
impl std::str::FromStr for Rgb {
    type Err = ColorParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// Serialize as the hex string the snapshot format expects.
impl serde::Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
impl<'de> serde::Deserialize<'de> for Rgb {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = <std::borrow::Cow<'_, str>>::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
