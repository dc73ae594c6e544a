use std::path::PathBuf;

use anyhow::Context;
use audio_trim::{
    host::{
        pipeline::{self, DEFAULT_BUFFER_FRAMES, PipelineOptions, RunSummary},
        wav::{WavSink, WavSource},
    },
    position::TrimConfig,
};
use clap::Parser;
use log::info;
use timecode::{DefaultUnit, Timecode};

/// Cut portions out of a WAV file.
///
/// Audio before the first position is dropped; after that, kept and dropped
/// spans alternate at each position. With an odd number of positions the
/// last kept span runs to the end of the input.
#[derive(Debug, Parser)]
#[command(name = "audio-trim", version, about)]
pub struct Args {
    /// Integer PCM WAV file to read
    pub input: PathBuf,

    /// WAV file to write the kept audio to
    pub output: PathBuf,

    /// `=POS` counts from the start, `-POS` back from the end and a bare
    /// `POS` from the previous position. POS is `[[hh:]mm:]ss[.frac]` or a
    /// sample count with an `s` suffix.
    #[arg(allow_hyphen_values = true, trailing_var_arg = true)]
    pub positions: Vec<String>,

    /// Frames pushed through the filter per buffer
    #[arg(long, default_value_t = DEFAULT_BUFFER_FRAMES)]
    pub buffer_frames: usize,

    /// Read bare numbers as sample counts instead of seconds
    #[arg(long)]
    pub samples: bool,

    /// Treat the input as live audio of unknown length
    #[arg(long)]
    pub unknown_length: bool,

    /// Read through leading audio instead of seeking past it
    #[arg(long)]
    pub no_seek: bool,

    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn timecode(&self) -> Timecode {
        if self.samples {
            Timecode::new(DefaultUnit::Samples)
        } else {
            Timecode::new(DefaultUnit::Seconds)
        }
    }

    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            buffer_frames: self.buffer_frames,
            allow_seek: !self.no_seek,
        }
    }
}

pub fn run(args: &Args) -> anyhow::Result<RunSummary> {
    let parser = args.timecode();
    let config = TrimConfig::parse(&args.positions, &parser).context("invalid trim position")?;

    let mut source = WavSource::from_file(&args.input)
        .with_context(|| format!("failed to open '{}'", args.input.display()))?;
    if args.unknown_length {
        source = source.live();
    }

    let mut sink = WavSink::create(&args.output, source.spec())
        .with_context(|| format!("failed to create '{}'", args.output.display()))?;

    let summary = pipeline::run(
        &config,
        &parser,
        &mut source,
        &mut sink,
        &args.pipeline_options(),
    )
    .with_context(|| format!("failed to trim '{}'", args.input.display()))?;

    sink.finalize()
        .with_context(|| format!("failed to finish '{}'", args.output.display()))?;

    info!(
        "wrote {} frames to '{}'",
        summary.frames_written.get(),
        args.output.display()
    );
    Ok(summary)
}

#[cfg(test)]
mod cli_tests {
    use std::path::Path;

    use audio_trim::{error::TrimError, host::PipelineError, units::Frames};
    use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

    use super::*;

    fn write_mono_wav(path: &Path, rate: u32, samples: &[i16]) {
        let spec = WavSpec {
            channels: 1,
            sample_rate: rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(path, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }

    fn read_samples(path: &Path) -> Vec<i16> {
        WavReader::open(path)
            .unwrap()
            .into_samples()
            .map(Result::unwrap)
            .collect()
    }

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["audio-trim"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_positions_may_start_with_hyphen() {
        let args = args(&["in.wav", "out.wav", "=1.5", "-0:30", "2"]);
        assert_eq!(args.positions, ["=1.5", "-0:30", "2"]);
        assert_eq!(args.buffer_frames, DEFAULT_BUFFER_FRAMES);
        assert!(args.pipeline_options().allow_seek);
    }

    #[test]
    fn test_flags() {
        let args = args(&[
            "--samples",
            "--no-seek",
            "--buffer-frames",
            "64",
            "in.wav",
            "out.wav",
            "10",
        ]);
        assert!(args.samples);
        assert_eq!(args.timecode().unit(), DefaultUnit::Samples);
        assert_eq!(args.pipeline_options().buffer_frames, 64);
        assert!(!args.pipeline_options().allow_seek);
    }

    #[test]
    fn test_trims_file_by_seconds() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.wav");
        let output = dir.path().join("out.wav");
        // 4 seconds at 10 Hz
        write_mono_wav(&input, 10, &(0..40).collect::<Vec<_>>());

        let args = args(&[
            input.to_str().unwrap(),
            output.to_str().unwrap(),
            "1",
            "0.5",
            "=3",
        ]);
        let summary = run(&args).unwrap();

        let expected: Vec<i16> = (10..15).chain(30..40).collect();
        assert_eq!(read_samples(&output), expected);
        assert_eq!(summary.frames_written, Frames(15));
        assert_eq!(summary.unreached, 0);
    }

    #[test]
    fn test_end_position_on_unknown_length_fails() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.wav");
        let output = dir.path().join("out.wav");
        write_mono_wav(&input, 10, &[0; 20]);

        let args = args(&[
            "--unknown-length",
            input.to_str().unwrap(),
            output.to_str().unwrap(),
            "-1",
        ]);
        let err = run(&args).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::Trim(TrimError::LengthRequired))
        ));
    }

    #[test]
    fn test_bad_position_fails_before_opening_input() {
        let args = args(&["missing.wav", "out.wav", "1:xx"]);
        let err = run(&args).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TrimError>(),
            Some(TrimError::InvalidSyntax { position: 1, .. })
        ));
    }
}
