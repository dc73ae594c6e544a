use crate::units::{Frames, Scalars};

/// Stream metadata supplied by the host before configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalInfo {
    /// interleaved channels per frame
    pub channels: usize,
    /// frames per second
    pub rate: f64,
    /// total length, `None` for live or otherwise unknown input
    pub length: Option<Frames>,
}

impl SignalInfo {
    pub const fn new(channels: usize, rate: f64, length: Option<Frames>) -> Self {
        Self {
            channels,
            rate,
            length,
        }
    }

    /// Same signal with its length hidden, as a live source would report it.
    pub const fn without_length(self) -> Self {
        Self {
            length: None,
            ..self
        }
    }

    pub fn length_in_scalars(&self) -> Option<Scalars> {
        self.length.map(|frames| frames.to_scalars(self.channels))
    }
}
