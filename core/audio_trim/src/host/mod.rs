use thiserror::Error;

use crate::{
    error::{BoxError, TrimError},
    signal::SignalInfo,
    units::Frames,
};

pub mod memory;
pub mod pipeline;
pub mod wav;

/// Produces interleaved `i32` samples for the pipeline to pull.
pub trait SampleSource {
    fn signal(&self) -> SignalInfo;

    /// Fills the front of `buffer`; returns the number of samples written,
    /// `0` once the input is exhausted.
    fn read(&mut self, buffer: &mut [i32]) -> Result<usize, BoxError>;

    /// Skips the first `frames` frames without decoding them. Only called
    /// before the first [`SampleSource::read`]; returns `false` if the
    /// source can't seek.
    fn skip_start(&mut self, _frames: Frames) -> Result<bool, BoxError> {
        Ok(false)
    }
}

/// Receives the samples the pipeline keeps.
pub trait SampleSink {
    fn write(&mut self, samples: &[i32]) -> Result<(), BoxError>;
}

impl SampleSink for Vec<i32> {
    fn write(&mut self, samples: &[i32]) -> Result<(), BoxError> {
        self.extend_from_slice(samples);
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Trim(#[from] TrimError),
    #[error("failed to read input: {0}")]
    Source(#[source] BoxError),
    #[error("failed to write output: {0}")]
    Sink(#[source] BoxError),
    #[error("buffer must hold at least one frame")]
    ZeroBuffer,
}
