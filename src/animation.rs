use std::fmt;

use parsing::{Parse, ReadBytes};
use rgb::RGB8;
use serde::Serialize;

use crate::color::Color;
use crate::error::{byte_len, count, Result};
use crate::frame::Frame;
use crate::options::{DecodeOptions, DurationMode};
use crate::version::Version;

/// Name given to animations stored without one.
pub const UNNAMED_ANIMATION: &str = "<undefined>";

/// Fixed block following the animation name, present in every revision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Parse, Serialize)]
pub struct Playback {
    pub cycles: i16,
    pub hold: i16,
    pub clock_from: i16,
    pub clock_small: u8,
    pub clock_in_front: u8,
    pub clock_offset_x: i16,
    pub clock_offset_y: i16,
    pub refresh_delay: i16,
    pub kind: u8,
    pub fsk: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LinkedAnimation {
    pub linked: u8,
    pub name: String,
    pub start_frame: u32,
}

impl LinkedAnimation {
    fn decode<'a>(input: &mut impl ReadBytes<'a>) -> Result<Self> {
        let linked = input.read_type_be::<u8>()?;
        let len = byte_len(input.read_type_be::<i16>()?, "linked animation name")?;
        let name = input.read_utf8(len)?.to_owned();
        let start_frame = input.read_type_be::<u32>()?;
        Ok(Self {
            linked,
            name,
            start_frame,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Animation {
    pub name: String,
    pub playback: Playback,
    pub palette_index: Option<i16>,
    pub colors: Vec<Color>,
    pub edit_mode: u8,
    pub width: Option<i16>,
    pub height: Option<i16>,
    /// Animation level masks, kept as stored.
    pub masks: Vec<Vec<u8>>,
    pub linked: Option<LinkedAnimation>,
    pub frames: Vec<Frame>,
    /// Sum of frame delays in milliseconds, see [`DurationMode`].
    pub total_duration: u32,
    /// Index of the first frame carrying a mask, zero if none does.
    pub transition_frame_index: usize,
}

impl Animation {
    pub(crate) fn decode<'a>(
        input: &mut impl ReadBytes<'a>,
        version: Version,
        options: &DecodeOptions,
    ) -> Result<Self> {
        let name_len = input.read_type_be::<i16>()?;
        let name = if name_len > 0 {
            input.read_utf8(name_len as usize)?.to_owned()
        } else {
            UNNAMED_ANIMATION.to_owned()
        };
        let _span = tracing::debug_span!("animation", name = %name).entered();

        let playback: Playback = input.read_type_be()?;

        // stored signed, counts up to 65535
        let num_frames = input.read_type_be::<i16>()? as u16;
        tracing::debug!(frames = num_frames, "reading animation");

        let mut palette_index = None;
        let mut colors = Vec::new();
        if version.has_palette() {
            palette_index = Some(input.read_type_be::<i16>()?);
            let num_colors = count(input.read_type_be::<i16>()?);
            colors = Color::read_palette(input, num_colors)?;
            tracing::debug!(colors = colors.len(), "palette");
        }

        let edit_mode = if version.has_edit_mode() {
            input.read_type_be::<u8>()?
        } else {
            0
        };

        let (mut width, mut height) = (None, None);
        if version.has_dimensions() {
            width = Some(input.read_type_be::<i16>()?);
            height = Some(input.read_type_be::<i16>()?);
            tracing::debug!(?width, ?height, "dimensions");
        }

        let mut masks = Vec::new();
        if version.has_masks() {
            let num_masks = count(input.read_type_be::<i16>()?);
            for _ in 0..num_masks {
                let _locked = input.read_type_be::<u8>()?;
                let size = byte_len(input.read_type_be::<i16>()?, "mask")?;
                masks.push(input.read_bytes(size)?.to_vec());
            }
            tracing::debug!(masks = masks.len(), "masks");
        }

        let linked = if version.has_linked_animation() {
            Some(LinkedAnimation::decode(input)?)
        } else {
            None
        };

        let mut frames = Vec::with_capacity(num_frames.into());
        for index in 0..num_frames {
            let _frame = tracing::trace_span!("frame", index).entered();
            frames.push(Frame::decode(input, version, options)?);
        }

        let transition_frame_index = frames.iter().position(|f| f.mask.is_some()).unwrap_or(0);
        let counted = match options.duration {
            DurationMode::FromTransition => &frames[transition_frame_index..],
            DurationMode::AllFrames => &frames[..],
        };
        let total_duration = counted.iter().map(|f| u32::from(f.delay)).sum();

        Ok(Self {
            name,
            playback,
            palette_index,
            colors,
            edit_mode,
            width,
            height,
            masks,
            linked,
            frames,
            total_duration,
            transition_frame_index,
        })
    }

    /// Palette as `rgb` pixels.
    pub fn palette(&self) -> impl Iterator<Item = RGB8> + '_ {
        self.colors.iter().copied().map(RGB8::from)
    }
}

impl fmt::Display for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
