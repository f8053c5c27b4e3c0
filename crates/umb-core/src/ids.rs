//! Strongly typed, zero-cost identifier wrappers.
//!
//! The inner integer is `pub` so ids index straight into per-building and
//! per-kind `Vec`s via `.index()`.  The widths are deliberate bounds: a run
//! may have at most `u32::MAX` buildings and `u16::MAX` agent kinds, which
//! keeps `Agent` records small.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Largest number of distinct ids this type can address.
            pub const CAPACITY: usize = <$inner>::MAX as usize;

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Stable index of a building, `0..B`.
    pub struct BuildingId(u32);
}

typed_id! {
    /// Index of an agent kind, `0..K`.
    pub struct KindId(u16);
}
