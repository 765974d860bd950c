use parsing::{Parse, ReadBytes};
use serde::Serialize;

use crate::error::{byte_len, DecodeError, Result};
use crate::options::DecodeOptions;
use crate::plane::{Plane, PlaneEntry};
use crate::version::Version;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Parse)]
struct FrameTiming {
    plane_size: i16,
    delay: u16,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Frame {
    /// Byte length of one plane (and of the mask).
    pub plane_size: i16,
    /// Display time in milliseconds.
    pub delay: u16,
    pub hash: Option<u32>,
    pub mask: Option<Vec<u8>>,
    pub planes: Vec<Plane>,
}

impl Frame {
    pub(crate) fn decode<'a>(
        input: &mut impl ReadBytes<'a>,
        version: Version,
        options: &DecodeOptions,
    ) -> Result<Self> {
        let timing: FrameTiming = input.read_type_be()?;
        let mut frame = Frame {
            plane_size: timing.plane_size,
            delay: timing.delay,
            hash: None,
            mask: None,
            planes: Vec::new(),
        };
        if !version.has_planes() {
            return Ok(frame);
        }

        frame.hash = Some(input.read_type_be::<u32>()?);
        let bit_length = input.read_type_be::<u8>()?;
        let compressed = input.read_type_be::<u8>()? != 0;
        if compressed {
            return Err(DecodeError::UnsupportedFeature("compressed planes"));
        }

        for _ in 0..bit_length {
            let plane_size = byte_len(frame.plane_size, "plane")?;
            let marker = input.read_type_be::<u8>()?;
            match PlaneEntry::decode(input, marker, plane_size, options.mask_bits)? {
                PlaneEntry::Mask(mask) => {
                    tracing::trace!(bytes = mask.len(), "mask");
                    frame.mask = Some(mask);
                }
                PlaneEntry::Plane(plane) => {
                    tracing::trace!(marker = plane.marker, "plane");
                    frame.planes.push(plane);
                }
            }
        }
        Ok(frame)
    }

    /// Number of bit-planes, i.e. the color depth of the frame.
    pub fn bit_depth(&self) -> usize {
        self.planes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(bytes: &[u8], version: i16) -> Result<Frame> {
        let mut b = bytes;
        Frame::decode(&mut b, Version(version), &DecodeOptions::default())
    }

    #[test]
    fn old_frames_only_carry_timing() {
        let bytes = [0x02_u8, 0x00, 0x00, 0x64, 0xAA, 0xBB];
        let mut b = bytes.as_slice();
        let frame = Frame::decode(&mut b, Version(3), &DecodeOptions::default()).unwrap();
        assert_eq!(frame.plane_size, 512);
        assert_eq!(frame.delay, 100);
        assert_eq!(frame.hash, None);
        assert!(frame.planes.is_empty());
        assert!(frame.mask.is_none());
        assert_eq!(b, &[0xAA, 0xBB]);
    }

    #[test]
    fn planes_and_mask() {
        #[rustfmt::skip]
        let bytes = [
            0x00, 0x02, 0xFF, 0xFF,     // plane size 2, delay 65535
            0x12, 0x34, 0x56, 0x78,     // hash
            0x03, 0x00,                 // 3 entries, uncompressed
            0x00, 0x01, 0x00,
            b'm', 0x01, 0x01,
            0x01, 0x00, 0x80,
        ];
        let frame = decode(&bytes, 4).unwrap();
        assert_eq!(frame.delay, u16::MAX);
        assert_eq!(frame.hash, Some(0x1234_5678));
        assert_eq!(frame.bit_depth(), 2);
        assert_eq!(frame.planes[0], Plane { marker: 0, data: vec![0x80, 0x00] });
        assert_eq!(frame.planes[1], Plane { marker: 1, data: vec![0x00, 0x01] });
        assert_eq!(frame.mask, Some(vec![0x80, 0x80]));
    }

    #[test]
    fn compressed_frames_are_rejected() {
        let bytes = [0x00_u8, 0x02, 0x00, 0x10, 0, 0, 0, 0, 0x02, 0x01];
        assert!(matches!(
            decode(&bytes, 5),
            Err(DecodeError::UnsupportedFeature("compressed planes"))
        ));
    }

    #[test]
    fn truncated_frame() {
        let bytes = [0x00_u8, 0x04, 0x00, 0x10, 0, 0, 0, 0, 0x01, 0x00, 0x00, 0xFF];
        assert!(matches!(
            decode(&bytes, 4),
            Err(DecodeError::UnexpectedEndOfInput { wanted: 4, remaining: 1 })
        ));
    }

    #[test]
    fn negative_plane_size() {
        let bytes = [0xFF_u8, 0xFF, 0x00, 0x10, 0, 0, 0, 0, 0x01, 0x00];
        assert!(matches!(decode(&bytes, 4), Err(DecodeError::InvalidFormat(_))));
    }
}
