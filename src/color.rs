use std::fmt;

use bytemuck::{Pod, Zeroable};
use parsing::ReadBytes;
use rgb::RGB8;
use serde::Serialize;

use crate::error::Result;

/// One palette entry, stored on disk as three bytes in r, g, b order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable, Serialize)]
#[repr(C)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const SIZE: usize = 3;

    /// Reads `count` consecutive colors.
    pub(crate) fn read_palette<'a>(input: &mut impl ReadBytes<'a>, count: usize) -> Result<Vec<Color>> {
        let bytes = input.read_bytes(count * Self::SIZE)?;
        Ok(bytemuck::cast_slice(bytes).to_vec())
    }
}

impl From<Color> for RGB8 {
    fn from(c: Color) -> Self {
        RGB8::new(c.r, c.g, c.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_keeps_file_order() {
        let bytes = [1_u8, 2, 3, 0xFF, 0x80, 0x00, 9];
        let mut b = bytes.as_slice();
        let colors = Color::read_palette(&mut b, 2).unwrap();
        assert_eq!(colors, vec![Color { r: 1, g: 2, b: 3 }, Color { r: 0xFF, g: 0x80, b: 0 }]);
        assert_eq!(b, &[9]);
        assert_eq!(colors[1].to_string(), "ff8000");
        assert_eq!(RGB8::from(colors[0]), RGB8::new(1, 2, 3));
    }

    #[test]
    fn short_palette_fails() {
        let bytes = [1_u8, 2, 3, 4];
        let mut b = bytes.as_slice();
        assert!(Color::read_palette(&mut b, 2).is_err());
    }
}
