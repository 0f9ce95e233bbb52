//! Newtype ids for seats and behavior sequences.
//!
//! `SeatIndex` is the stable registration-order position of a seat; it is the
//! ordering key for adjacency and separation.  `SequenceHandle` names one
//! started behavior sequence so observers can tell a superseded sequence from
//! its replacement.

use std::fmt;

/// Declare a `Copy` newtype id over an unsigned integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[derive(serde::Serialize, serde::Deserialize)]
        $vis struct $name(pub $inner);

        impl $name {
            /// The id as a slice position.
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
    /// Registration-order index of a seat.  Stable for the registry lifetime.
    pub struct SeatIndex(u16);
}

typed_id! {
    /// Monotonic id of a started behavior sequence.
    pub struct SequenceHandle(u64);
}

impl SeatIndex {
    /// Absolute index distance `|self - other|`.
    #[inline]
    pub fn distance(self, other: SeatIndex) -> u16 {
        self.0.abs_diff(other.0)
    }

    /// `true` when the two seats are direct neighbours.  Symmetric.
    #[inline]
    pub fn is_adjacent(self, other: SeatIndex) -> bool {
        self.distance(other) == 1
    }
}

impl SequenceHandle {
    /// The handle following `self`.
    #[inline]
    pub fn next(self) -> SequenceHandle {
        SequenceHandle(self.0 + 1)
    }
}
