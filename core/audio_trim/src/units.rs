use std::{fmt, ops};

/// A count of "wide" samples: one unit per sample period across all channels.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Frames(pub u64);

/// A count of single-channel values, as laid out in an interleaved buffer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Scalars(pub u64);

impl Frames {
    pub const ZERO: Self = Self(0);

    pub const fn get(self) -> u64 {
        self.0
    }

    pub const fn to_scalars(self, channels: usize) -> Scalars {
        Scalars(self.0 * channels as u64)
    }

    /// `None` when the stream's sample count doesn't fit in a `u64`.
    pub fn checked_to_scalars(self, channels: usize) -> Option<Scalars> {
        self.0.checked_mul(channels as u64).map(Scalars)
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Frames remaining from `self` up to `end`, zero if `end` is behind.
    pub const fn until(self, end: Self) -> Self {
        Self(end.0.saturating_sub(self.0))
    }
}

impl Scalars {
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Whole frames only; a trailing partial frame is dropped.
    pub const fn to_frames(self, channels: usize) -> Frames {
        Frames(self.0 / channels as u64)
    }
}

impl ops::AddAssign for Frames {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl fmt::Display for Frames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} frames", self.0)
    }
}

impl fmt::Display for Scalars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} samples", self.0)
    }
}
