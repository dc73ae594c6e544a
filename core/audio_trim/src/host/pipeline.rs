use log::{debug, info};

use crate::{
    filter::{FlowStatus, Start, TrimFilter},
    host::{PipelineError, SampleSink, SampleSource},
    position::{PositionParser, TrimConfig},
    units::{Frames, Scalars},
};

pub const DEFAULT_BUFFER_FRAMES: usize = 8192;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    /// frames per buffer pushed through the filter
    pub buffer_frames: usize,
    /// let the source seek past audio before the first position
    pub allow_seek: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            buffer_frames: DEFAULT_BUFFER_FRAMES,
            allow_seek: true,
        }
    }
}

/// What happened to a stream during [`run`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// frames taken in by the filter, not counting skipped ones
    pub frames_read: Frames,
    pub frames_written: Frames,
    /// samples the filter announced it would emit, if known
    pub declared_output: Option<Scalars>,
    /// positions the input ended before reaching
    pub unreached: usize,
    /// the filter was a no-op and was left out
    pub bypassed: bool,
    /// leading frames the source skipped by seeking
    pub skipped: Frames,
}

/// Trims `source` into `sink`, one buffer at a time.
pub fn run<S, K, P>(
    config: &TrimConfig,
    parser: &P,
    source: &mut S,
    sink: &mut K,
    options: &PipelineOptions,
) -> Result<RunSummary, PipelineError>
where
    S: SampleSource + ?Sized,
    K: SampleSink + ?Sized,
    P: PositionParser + ?Sized,
{
    if options.buffer_frames == 0 {
        return Err(PipelineError::ZeroBuffer);
    }

    let signal = source.signal();
    let start = TrimFilter::start(config, &signal, parser)?;
    let channels = signal.channels;
    let mut input = vec![0; options.buffer_frames * channels];

    let mut filter = match start {
        Start::PassThrough => {
            let mut summary = copy_all(source, sink, &mut input, channels)?;
            summary.declared_output = signal.length_in_scalars();
            return Ok(summary);
        }
        Start::Trim(filter) => filter,
    };

    let mut summary = RunSummary {
        declared_output: filter.output_length(),
        ..RunSummary::default()
    };

    let skip = filter.start_skip().to_frames(channels);
    if options.allow_seek
        && skip > Frames::ZERO
        && source.skip_start(skip).map_err(PipelineError::Source)?
    {
        filter.acknowledge_start_skip();
        summary.skipped = skip;
    }

    let mut output = vec![0; options.buffer_frames * channels];

    let mut carry = 0;
    'stream: loop {
        let read = source
            .read(&mut input[carry..])
            .map_err(PipelineError::Source)?;
        if read == 0 {
            // a partial frame left at the end of input is dropped
            break;
        }
        let len = carry + read;

        let mut offset = 0;
        while offset < len {
            let flow = filter.flow(&input[offset..len], &mut output);
            let produced = flow.produced.get() as usize;
            if produced > 0 {
                sink.write(&output[..produced])
                    .map_err(PipelineError::Sink)?;
                summary.frames_written += flow.produced.to_frames(channels);
            }
            summary.frames_read += flow.consumed.to_frames(channels);
            offset += flow.consumed.get() as usize;

            if flow.status == FlowStatus::Exhausted {
                debug!("last kept span done after {} frames", filter.frames_read().get());
                break 'stream;
            }
            if flow.consumed == Scalars(0) {
                break;
            }
        }

        // keep the samples of an incomplete frame for the next read
        input.copy_within(offset..len, 0);
        carry = len - offset;
    }

    summary.unreached = filter.drain().unreached;
    Ok(summary)
}

fn copy_all<S, K>(
    source: &mut S,
    sink: &mut K,
    buffer: &mut [i32],
    channels: usize,
) -> Result<RunSummary, PipelineError>
where
    S: SampleSource + ?Sized,
    K: SampleSink + ?Sized,
{
    info!("bypassing trim");
    let mut copied = Scalars(0);
    loop {
        let len = source.read(buffer).map_err(PipelineError::Source)?;
        if len == 0 {
            break;
        }
        sink.write(&buffer[..len]).map_err(PipelineError::Sink)?;
        copied = Scalars(copied.get() + len as u64);
    }

    let frames = copied.to_frames(channels);
    Ok(RunSummary {
        frames_read: frames,
        frames_written: frames,
        bypassed: true,
        ..RunSummary::default()
    })
}
