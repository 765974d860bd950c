//! Bit order helpers for plane buffers.
//!
//! Planes are stored LSB first (leftmost pixel in bit 0). Decoded planes
//! are MSB first.

pub fn reverse_bits_in_byte(b: u8) -> u8 {
    b.reverse_bits()
}

/// Returns a copy of `plane` with the bits of every byte reversed.
pub fn reverse_plane_bits(plane: &[u8]) -> Vec<u8> {
    plane.iter().copied().map(reverse_bits_in_byte).collect()
}
