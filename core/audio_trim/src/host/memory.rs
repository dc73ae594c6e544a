use crate::{
    error::BoxError,
    host::SampleSource,
    signal::SignalInfo,
    units::Frames,
};

/// An in-memory interleaved stream.
#[derive(Debug, Clone)]
pub struct MemorySource {
    samples: Vec<i32>,
    /// next sample to read
    position: usize,
    signal: SignalInfo,
    seekable: bool,
}

impl MemorySource {
    pub fn new(samples: Vec<i32>, channels: usize, rate: f64) -> Self {
        let length = (samples.len() as u64)
            .checked_div(channels as u64)
            .map(Frames);
        Self {
            samples,
            position: 0,
            signal: SignalInfo::new(channels, rate, length),
            seekable: false,
        }
    }

    /// Hides the stream length, as live input would.
    pub fn live(mut self) -> Self {
        self.signal = self.signal.without_length();
        self
    }

    /// Lets the pipeline skip leading frames without reading them.
    pub fn seekable(mut self) -> Self {
        self.seekable = true;
        self
    }

    /// Samples handed out or skipped so far.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl SampleSource for MemorySource {
    fn signal(&self) -> SignalInfo {
        self.signal
    }

    fn read(&mut self, buffer: &mut [i32]) -> Result<usize, BoxError> {
        let rest = &self.samples[self.position..];
        let len = rest.len().min(buffer.len());
        buffer[..len].copy_from_slice(&rest[..len]);
        self.position += len;
        Ok(len)
    }

    fn skip_start(&mut self, frames: Frames) -> Result<bool, BoxError> {
        if !self.seekable {
            return Ok(false);
        }
        let skip = usize::try_from(frames.to_scalars(self.signal.channels).get())?;
        self.position = skip.min(self.samples.len());
        Ok(true)
    }
}
