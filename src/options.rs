use serde::{Deserialize, Serialize};

/// How `Animation::total_duration` is accumulated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DurationMode {
    /// Only frames from the transition frame onward count.
    #[default]
    FromTransition,
    /// Every frame counts.
    AllFrames,
}

/// Bit order applied to per-frame masks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaskBitOrder {
    /// Reversed like plane data, MSB first.
    #[default]
    Normalized,
    /// Stored exactly as on disk (LSB first).
    Raw,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DecodeOptions {
    pub duration: DurationMode,
    pub mask_bits: MaskBitOrder,
}
