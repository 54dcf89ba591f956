use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// An opaque 24-bit RGB color, written as `#rrggbb`.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid color '{0}', expected six hex digits like '#316559'")]
pub struct InvalidColor(pub String);

impl HexColor {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        HexColor { red, green, blue }
    }

    pub fn to_rgb(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }
}

impl FromStr for HexColor {
    type Err = InvalidColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        // from_str_radix would also accept a leading '+'
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(InvalidColor(s.to_owned()));
        }
        let component = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| InvalidColor(s.to_owned()))
        };
        Ok(HexColor {
            red: component(0)?,
            green: component(2)?,
            blue: component(4)?,
        })
    }
}

impl TryFrom<String> for HexColor {
    type Error = InvalidColor;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

impl From<HexColor> for image::Rgb<u8> {
    fn from(color: HexColor) -> Self {
        image::Rgb(color.to_rgb())
    }
}
