use std::fmt;

use serde::Serialize;

/// Highest file revision whose layout is known.
pub const LATEST_VERSION: i16 = 6;

/// File revision, read once from the header.
///
/// Every optional record field is gated on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Version(pub i16);

impl Version {
    /// Per-animation offset table after the header.
    pub fn has_index_table(self) -> bool {
        self.0 >= 2
    }

    pub fn has_palette(self) -> bool {
        self.0 >= 2
    }

    pub fn has_edit_mode(self) -> bool {
        self.0 >= 3
    }

    pub fn has_dimensions(self) -> bool {
        self.0 >= 4
    }

    /// Frames carry a hash and plane data. Older frames only carry timing.
    pub fn has_planes(self) -> bool {
        self.0 >= 4
    }

    pub fn has_masks(self) -> bool {
        self.0 >= 5
    }

    pub fn has_linked_animation(self) -> bool {
        self.0 >= 6
    }

    pub fn is_known(self) -> bool {
        self.0 <= LATEST_VERSION
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}
