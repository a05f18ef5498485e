use serde::{Deserialize, Serialize};

/// Color representation.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("invalid color: {value}"))
    }
}

impl From<Color> for String {
    fn from(val: Color) -> Self {
        val.to_hex()
    }
}

impl Color {
    /// Transparent color: `#00000000`
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    /// Red color: `#FF0000FF`
    pub const RED: Color = Color::rgba(255, 0, 0, 255);
    /// White color: `#FFFFFFFF`
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    /// Black color: `#000000FF`
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);

    /// Constructs color from its RGBA channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Converts the color into HEX8 string: `#RRGGBBAA`.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }

    /// Parses a color from a hex string or one of the few CSS names used by map styles (`red`,
    /// `black`, `white`, `transparent`).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "red" => Some(Self::RED),
            "black" => Some(Self::BLACK),
            "white" => Some(Self::WHITE),
            "transparent" => Some(Self::TRANSPARENT),
            other => Self::try_from_hex(other),
        }
    }

    /// Parses a color from the hex string. Hex string can be either HEX6 (`#RRGGBB`) or HEX8 (`#RRGGBBAA`).
    pub fn try_from_hex(hex_string: &str) -> Option<Self> {
        if (hex_string.len() != 7 && hex_string.len() != 9) || !hex_string.starts_with('#') {
            return None;
        }

        let r = u8::from_str_radix(hex_string.get(1..3)?, 16).ok()?;
        let g = u8::from_str_radix(hex_string.get(3..5)?, 16).ok()?;
        let b = u8::from_str_radix(hex_string.get(5..7)?, 16).ok()?;
        let a = if hex_string.len() == 9 {
            u8::from_str_radix(hex_string.get(7..9)?, 16).ok()?
        } else {
            255
        };

        Some(Self { r, g, b, a })
    }

    /// Creates a color from a hex string in const context.
    ///
    /// # Panics
    ///
    /// Panics if the string is not a valid HEX6 or HEX8 color.
    pub const fn from_hex(hex_string: &'static str) -> Self {
        let bytes = hex_string.as_bytes();
        assert!(bytes.len() == 7 || bytes.len() == 9, "invalid hex color length");

        let r = decode_byte(bytes[1], bytes[2]);
        let g = decode_byte(bytes[3], bytes[4]);
        let b = decode_byte(bytes[5], bytes[6]);
        let a = if bytes.len() == 9 {
            decode_byte(bytes[7], bytes[8])
        } else {
            255
        };

        Self { r, g, b, a }
    }

    /// Returns a new color instance, copied from the base one but with the given alpha channel.
    pub fn with_alpha(&self, a: u8) -> Self {
        Self { a, ..*self }
    }

    /// Red component of the color in RGBA space.
    pub fn r(&self) -> u8 {
        self.r
    }

    /// Green component of the color in RGBA space.
    pub fn g(&self) -> u8 {
        self.g
    }

    /// Blue component of the color in RGBA space.
    pub fn b(&self) -> u8 {
        self.b
    }

    /// Opacity component of the color.
    pub fn a(&self) -> u8 {
        self.a
    }
}

const fn decode_byte(high: u8, low: u8) -> u8 {
    decode_char(high) * 16 + decode_char(low)
}

const fn decode_char(byte: u8) -> u8 {
    match byte {
        b'0'..=b'9' => byte - b'0',
        b'a'..=b'f' => byte - b'a' + 10,
        b'A'..=b'F' => byte - b'A' + 10,
        _ => panic!("Invalid hex character"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_serialization() {
        let hex = "#00C35EFF";
        let color = Color::try_from_hex(hex).expect("valid color");
        assert_eq!(&color.to_hex(), hex);

        assert_eq!(Color::from_hex("#00C35E"), color);
    }

    #[test]
    fn css_names_and_invalid_values() {
        assert_eq!(Color::parse("red"), Some(Color::RED));
        assert_eq!(Color::parse(" Black "), Some(Color::BLACK));
        assert_eq!(Color::parse("#30302e"), Some(Color::rgba(0x30, 0x30, 0x2e, 255)));
        assert_eq!(Color::parse("orange"), None);
        assert_eq!(Color::parse("#12345"), None);
        assert_eq!(Color::parse("#GG0000"), None);
    }

    #[test]
    fn deserializes_from_json_string() {
        let color: Color = serde_json::from_str("\"#FFA500\"").expect("valid color");
        assert_eq!(color, Color::rgba(255, 165, 0, 255));
        assert!(serde_json::from_str::<Color>("\"nope\"").is_err());
    }
}
