use timecode::Timecode;

use crate::error::BoxError;

pub mod marker;
pub mod resolve;

pub use marker::{Anchor, Marker, TrimConfig};
pub use resolve::{Resolution, output_length, resolve};

/// Turns the body of a position argument into a frame offset at `rate`.
///
/// Called twice per position: once with a placeholder rate of `0.0` to check
/// the syntax while arguments are parsed, and once with the real rate when
/// the stream starts.
pub trait PositionParser {
    fn parse(&self, rate: f64, text: &str) -> Result<u64, BoxError>;
}

impl PositionParser for Timecode {
    fn parse(&self, rate: f64, text: &str) -> Result<u64, BoxError> {
        Ok(self.parse_position(rate, text)?)
    }
}
