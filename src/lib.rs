//! Decoder for VNI files, the colorization and animation format used by
//! pinball dot-matrix display colorizers.
//!
//! A file is a `VPIN` header followed by animations, each with its own
//! palette and a list of frames made of bit-planes. Fields present in a
//! record depend on the file [`Version`].
//!
//! ```no_run
//! let vni = vni::decode_file("pin2dmd.vni")?;
//! for animation in &vni.animations {
//!     println!("{animation}: {} frames", animation.frames.len());
//! }
//! # Ok::<(), vni::DecodeError>(())
//! ```

mod animation;
pub mod bits;
mod color;
mod error;
mod file;
mod frame;
mod options;
mod plane;
mod version;

use std::path::Path;

pub use animation::{Animation, LinkedAnimation, Playback, UNNAMED_ANIMATION};
pub use color::Color;
pub use error::{DecodeError, Result};
pub use file::VniFile;
pub use frame::Frame;
pub use options::{DecodeOptions, DurationMode, MaskBitOrder};
pub use plane::{Plane, MASK_MARKER};
pub use version::{Version, LATEST_VERSION};

/// Decodes an in-memory VNI image with default options.
///
/// Only a bad header is an error. Animations are read until the data runs
/// out or one of them cannot be decoded; the ones before it are returned.
pub fn decode(data: &[u8]) -> Result<VniFile> {
    VniFile::decode(data, &DecodeOptions::default())
}

pub fn decode_with(data: &[u8], options: &DecodeOptions) -> Result<VniFile> {
    VniFile::decode(data, options)
}

pub fn decode_file(path: impl AsRef<Path>) -> Result<VniFile> {
    VniFile::read(path, &DecodeOptions::default())
}

pub fn decode_file_with(path: impl AsRef<Path>, options: &DecodeOptions) -> Result<VniFile> {
    VniFile::read(path, options)
}
