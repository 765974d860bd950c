use parsing::ReadBytes;
use serde::Serialize;

use crate::bits::reverse_plane_bits;
use crate::error::Result;
use crate::options::MaskBitOrder;

/// Marker byte tagging a frame's transparency mask (`m`).
pub const MASK_MARKER: u8 = 0x6D;

/// One bit-plane of a frame, MSB first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Plane {
    pub marker: u8,
    pub data: Vec<u8>,
}

/// A decoded plane entry: either pixel data or the frame mask.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum PlaneEntry {
    Plane(Plane),
    Mask(Vec<u8>),
}

impl PlaneEntry {
    /// Reads the `plane_size` bytes following an already consumed `marker`.
    pub(crate) fn decode<'a>(
        input: &mut impl ReadBytes<'a>,
        marker: u8,
        plane_size: usize,
        mask_bits: MaskBitOrder,
    ) -> Result<Self> {
        let raw = input.read_bytes(plane_size)?;
        if marker == MASK_MARKER {
            let mask = match mask_bits {
                MaskBitOrder::Normalized => reverse_plane_bits(raw),
                MaskBitOrder::Raw => raw.to_vec(),
            };
            Ok(Self::Mask(mask))
        } else {
            Ok(Self::Plane(Plane {
                marker,
                data: reverse_plane_bits(raw),
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plane_bits_are_reversed() {
        let bytes = [0x01_u8, 0x0F, 0xAA];
        let mut b = bytes.as_slice();
        let entry = PlaneEntry::decode(&mut b, 0, 2, MaskBitOrder::Normalized).unwrap();
        assert_eq!(
            entry,
            PlaneEntry::Plane(Plane {
                marker: 0,
                data: vec![0x80, 0xF0]
            })
        );
        assert_eq!(b, &[0xAA]);
    }

    #[test]
    fn mask_bit_order_is_configurable() {
        let bytes = [0x01_u8, 0x03];
        let mut b = bytes.as_slice();
        let entry = PlaneEntry::decode(&mut b, MASK_MARKER, 2, MaskBitOrder::Raw).unwrap();
        assert_eq!(entry, PlaneEntry::Mask(vec![0x01, 0x03]));

        let mut b = bytes.as_slice();
        let entry = PlaneEntry::decode(&mut b, MASK_MARKER, 2, MaskBitOrder::Normalized).unwrap();
        assert_eq!(entry, PlaneEntry::Mask(vec![0x80, 0xC0]));
    }

    #[test]
    fn truncated_plane() {
        let bytes = [0x01_u8];
        let mut b = bytes.as_slice();
        assert!(PlaneEntry::decode(&mut b, 1, 4, MaskBitOrder::Normalized).is_err());
    }
}
