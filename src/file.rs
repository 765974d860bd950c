use std::fmt;
use std::path::Path;

use parsing::{ByteCursor, Parse, ReadBytes};
use serde::Serialize;

use crate::animation::Animation;
use crate::error::{DecodeError, Result};
use crate::options::DecodeOptions;
use crate::version::Version;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Parse)]
struct FileHeader {
    #[allow(dead_code)]
    #[parse(magic = *b"VPIN")]
    magic: [u8; 4],
    version: i16,
    animation_count: i16,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VniFile {
    pub version: Version,
    /// Count written in the header. Advisory only, never checked against
    /// the animations actually found.
    pub declared_animation_count: i16,
    pub animations: Vec<Animation>,
}

impl VniFile {
    pub fn decode(data: &[u8], options: &DecodeOptions) -> Result<Self> {
        let mut input = ByteCursor::new(data);
        let header: FileHeader = input.read_type_be()?;
        let version = Version(header.version);
        tracing::debug!(
            %version,
            animations = header.animation_count,
            "read header"
        );
        if !version.is_known() {
            tracing::warn!(%version, "unknown revision, decoding with the latest known layout");
        }

        if version.has_index_table() {
            // offsets are never used, animations are read sequentially.
            // A short table or a negative count swallows the rest of the input.
            let index_len = usize::try_from(header.animation_count)
                .map_or(usize::MAX, |count| count * 4)
                .min(input.remaining());
            tracing::debug!(bytes = index_len, "skipping animation index");
            input.skip(index_len)?;
        }

        let (animations, stop) = decode_animations(&mut input, version, options);
        match stop {
            Some(err) => tracing::debug!(
                count = animations.len(),
                position = input.position(),
                error = %err,
                "stopped reading animations"
            ),
            None => tracing::debug!(count = animations.len(), "end of animations"),
        }

        Ok(Self {
            version,
            declared_animation_count: header.animation_count,
            animations,
        })
    }

    pub fn read(path: impl AsRef<Path>, options: &DecodeOptions) -> Result<Self> {
        let path = path.as_ref();
        let _span = tracing::debug_span!("vni", path = %path.display()).entered();
        let data = std::fs::read(path).map_err(|source| DecodeError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::decode(&data, options)
    }

    pub fn animation(&self, name: &str) -> Option<&Animation> {
        self.animations.iter().find(|a| a.name == name)
    }
}

impl fmt::Display for VniFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VNI {} with {} animations", self.version, self.declared_animation_count)
    }
}

/// Reads animations until one fails to decode.
///
/// Returns everything decoded before the failure together with the error
/// that ended the list, `None` when the input ended cleanly between two
/// animations.
fn decode_animations<'a>(
    input: &mut ByteCursor<'a>,
    version: Version,
    options: &DecodeOptions,
) -> (Vec<Animation>, Option<DecodeError>) {
    let mut animations = Vec::new();
    while !input.is_empty() {
        match Animation::decode(input, version, options) {
            Ok(animation) => animations.push(animation),
            Err(err) => return (animations, Some(err)),
        }
    }
    (animations, None)
}
