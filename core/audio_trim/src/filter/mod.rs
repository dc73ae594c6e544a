use log::{info, warn};

use crate::{
    error::TrimError,
    position::{PositionParser, Resolution, TrimConfig, output_length, resolve},
    signal::SignalInfo,
    units::{Frames, Scalars},
};

pub mod mode;

pub use mode::Mode;

/// Result of starting a trim on a stream.
#[derive(Debug)]
pub enum Start {
    /// Every frame would be kept; the host should bypass the filter.
    PassThrough,
    Trim(TrimFilter),
}

/// Whether the filter wants more input after a [`TrimFilter::flow`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStatus {
    Continue,
    /// Past the last kept span; any further input would be discarded.
    Exhausted,
}

/// How much of each buffer one [`TrimFilter::flow`] call used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flow {
    /// samples taken from the front of the input buffer
    pub consumed: Scalars,
    /// samples written to the front of the output buffer
    pub produced: Scalars,
    pub status: FlowStatus,
}

/// End-of-stream report from [`TrimFilter::drain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Drained {
    /// positions the input ended before reaching
    pub unreached: usize,
}

impl Drained {
    pub const fn is_complete(self) -> bool {
        self.unreached == 0
    }
}

/// Streaming copy/discard state for one stream.
///
/// Input frames are counted as they pass; each resolved position flips the
/// filter between dropping and copying, starting with dropping.
#[derive(Debug)]
pub struct TrimFilter {
    positions: Vec<Frames>,
    channels: usize,
    /// index of the next position not yet crossed
    cursor: usize,
    frames_read: Frames,
    mode: Mode,
    output_length: Option<Frames>,
}

impl TrimFilter {
    /// Resolves `config` against the stream and prepares the filter.
    pub fn start<P>(
        config: &TrimConfig,
        signal: &SignalInfo,
        parser: &P,
    ) -> Result<Start, TrimError>
    where
        P: PositionParser + ?Sized,
    {
        match resolve(config, signal, parser)? {
            Resolution::PassThrough => {
                info!("single position at start of audio, nothing to trim");
                Ok(Start::PassThrough)
            }
            Resolution::Positions(positions) => Ok(Start::Trim(Self::new(positions, signal))),
        }
    }

    fn new(positions: Vec<Frames>, signal: &SignalInfo) -> Self {
        let output_length = output_length(&positions, signal.length);
        Self {
            positions,
            channels: signal.channels,
            cursor: 0,
            frames_read: Frames::ZERO,
            mode: Mode::default(),
            output_length,
        }
    }

    pub fn positions(&self) -> &[Frames] {
        &self.positions
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn frames_read(&self) -> Frames {
        self.frames_read
    }

    pub fn is_copying(&self) -> bool {
        self.mode.is_keeping()
    }

    /// Samples the filter will emit, `None` if the input length is unknown and
    /// the last kept span runs to the end.
    pub fn output_length(&self) -> Option<Scalars> {
        self.output_length
            .map(|frames| frames.to_scalars(self.channels))
    }

    /// Copies the kept part of `input` to `output`.
    ///
    /// Both buffers hold interleaved samples; only whole frames that fit in
    /// both are looked at. Returns [`FlowStatus::Exhausted`] once the last
    /// kept span has been passed, in which case the rest of `input` was not
    /// consumed and never needs to be.
    pub fn flow<T: Copy>(&mut self, input: &[T], output: &mut [T]) -> Flow {
        let channels = self.channels;
        let mut remaining = input.len().min(output.len()) / channels;
        let mut read = 0;
        let mut written = 0;

        let status = loop {
            self.cross_positions();
            if self.is_finished() {
                break FlowStatus::Exhausted;
            }
            if remaining == 0 {
                break FlowStatus::Continue;
            }

            let chunk = self.positions.get(self.cursor).map_or(remaining, |&next| {
                usize::try_from(self.frames_read.until(next).get())
                    .map_or(remaining, |until| until.min(remaining))
            });

            if self.mode.is_keeping() {
                let from = read * channels..(read + chunk) * channels;
                let to = written * channels..(written + chunk) * channels;
                output[to].copy_from_slice(&input[from]);
                written += chunk;
            }

            read += chunk;
            remaining -= chunk;
            self.frames_read += Frames(chunk as u64);
        };

        Flow {
            consumed: Frames(read as u64).to_scalars(channels),
            produced: Frames(written as u64).to_scalars(channels),
            status,
        }
    }

    /// Ends the stream. Already emitted output stays valid even when the
    /// input ran out before every position was reached.
    pub fn drain(&mut self) -> Drained {
        self.cross_positions();
        let unreached = self.positions.len() - self.cursor;
        if unreached > 0 {
            warn!("audio shorter than expected; last {unreached} positions not reached");
        }
        Drained { unreached }
    }

    /// Samples before the first position, which are always discarded.
    ///
    /// A host that can seek its input may skip these itself and then call
    /// [`TrimFilter::acknowledge_start_skip`].
    pub fn start_skip(&self) -> Scalars {
        self.positions
            .first()
            .map_or(Scalars(0), |first| first.to_scalars(self.channels))
    }

    /// Records that the host already skipped [`TrimFilter::start_skip`]
    /// samples. Only valid before the first [`TrimFilter::flow`] call.
    pub fn acknowledge_start_skip(&mut self) {
        self.frames_read = self.positions.first().copied().unwrap_or(Frames::ZERO);
        info!("input skipped to frame {}", self.frames_read.get());
    }

    fn cross_positions(&mut self) {
        while self
            .positions
            .get(self.cursor)
            .is_some_and(|&position| position <= self.frames_read)
        {
            self.mode = self.mode.toggled();
            self.cursor += 1;
        }
    }

    fn is_finished(&self) -> bool {
        self.cursor >= self.positions.len() && !self.mode.is_keeping()
    }
}
