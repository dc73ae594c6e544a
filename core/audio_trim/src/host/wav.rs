use std::{
    fmt,
    fs::File,
    io::{BufReader, BufWriter, Read, Seek, Write},
    path::Path,
};

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use thiserror::Error;

use crate::{
    error::BoxError,
    host::{SampleSink, SampleSource},
    signal::SignalInfo,
    units::Frames,
};

#[derive(Debug, Error)]
pub enum WavError {
    #[error(transparent)]
    Hound(#[from] hound::Error),
    #[error("floating point WAV is not supported, samples are copied as integers")]
    FloatSamples,
}

/// Integer PCM samples read from a `.wav` stream.
///
/// Any channel count and bit depth up to 32 is accepted; samples are passed
/// on as `i32` without scaling.
///
/// # Example
/// ```no_run
/// use audio_trim::host::wav::WavSource;
///
/// let source = WavSource::from_file("assets/wav/speech.wav").unwrap();
/// ```
pub struct WavSource<R: Read> {
    reader: WavReader<R>,
    signal: SignalInfo,
}

impl WavSource<BufReader<File>> {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, WavError> {
        Self::from_reader(WavReader::open(path)?)
    }
}

impl<R: Read> WavSource<R> {
    pub fn from_stream(stream: R) -> Result<Self, WavError> {
        Self::from_reader(WavReader::new(stream)?)
    }

    fn from_reader(reader: WavReader<R>) -> Result<Self, WavError> {
        let spec = reader.spec();
        if spec.sample_format == SampleFormat::Float {
            return Err(WavError::FloatSamples);
        }

        let signal = SignalInfo::new(
            usize::from(spec.channels),
            f64::from(spec.sample_rate),
            Some(Frames(u64::from(reader.duration()))),
        );
        Ok(Self { reader, signal })
    }

    /// Hides the file length from the filter, as if the input were live.
    pub fn live(mut self) -> Self {
        self.signal = self.signal.without_length();
        self
    }

    pub fn spec(&self) -> WavSpec {
        self.reader.spec()
    }
}

impl<R: Read + Seek> SampleSource for WavSource<R> {
    fn signal(&self) -> SignalInfo {
        self.signal
    }

    fn read(&mut self, buffer: &mut [i32]) -> Result<usize, BoxError> {
        let mut count = 0;
        for (slot, sample) in buffer.iter_mut().zip(self.reader.samples::<i32>()) {
            *slot = sample?;
            count += 1;
        }
        Ok(count)
    }

    fn skip_start(&mut self, frames: Frames) -> Result<bool, BoxError> {
        let Ok(frames) = u32::try_from(frames.get()) else {
            return Ok(false);
        };
        self.reader.seek(frames)?;
        Ok(true)
    }
}

impl<R: Read> fmt::Debug for WavSource<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WavSource")
            .field("spec", &self.reader.spec())
            .field("signal", &self.signal)
            .finish_non_exhaustive()
    }
}

/// Writes kept samples to a `.wav` stream with the input's format.
pub struct WavSink<W: Write + Seek> {
    writer: WavWriter<W>,
}

impl WavSink<BufWriter<File>> {
    pub fn create<P: AsRef<Path>>(path: P, spec: WavSpec) -> Result<Self, WavError> {
        Ok(Self {
            writer: WavWriter::create(path, spec)?,
        })
    }
}

impl<W: Write + Seek> WavSink<W> {
    pub fn new(stream: W, spec: WavSpec) -> Result<Self, WavError> {
        Ok(Self {
            writer: WavWriter::new(stream, spec)?,
        })
    }

    /// Patches the header with the final length.
    pub fn finalize(self) -> Result<(), WavError> {
        Ok(self.writer.finalize()?)
    }
}

impl<W: Write + Seek> SampleSink for WavSink<W> {
    fn write(&mut self, samples: &[i32]) -> Result<(), BoxError> {
        for &sample in samples {
            self.writer.write_sample(sample)?;
        }
        Ok(())
    }
}

impl<W: Write + Seek> fmt::Debug for WavSink<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WavSink")
            .field("spec", &self.writer.spec())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod wav_tests {
    use std::io::Cursor;

    use timecode::Timecode;

    use super::*;
    use crate::{
        host::pipeline::{PipelineOptions, run},
        position::TrimConfig,
    };

    fn stereo_spec() -> WavSpec {
        WavSpec {
            channels: 2,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        }
    }

    fn create_wav_buffer(spec: WavSpec, samples: &[i16]) -> Cursor<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        let mut writer = WavWriter::new(&mut buffer, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
        buffer.set_position(0);
        buffer
    }

    fn stereo_ramp(frames: i16) -> Vec<i16> {
        (0..frames * 2).collect()
    }

    #[test]
    fn test_signal_from_header() {
        let source = WavSource::from_stream(create_wav_buffer(stereo_spec(), &stereo_ramp(10)))
            .unwrap();

        let signal = source.signal();
        assert_eq!(signal.channels, 2);
        assert_eq!(signal.rate, 8000.0);
        assert_eq!(signal.length, Some(Frames(10)));
        assert_eq!(source.live().signal().length, None);
    }

    #[test]
    fn test_float_input_rejected() {
        let spec = WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut buffer = Cursor::new(Vec::new());
        let mut writer = WavWriter::new(&mut buffer, spec).unwrap();
        writer.write_sample(0.5f32).unwrap();
        writer.finalize().unwrap();
        buffer.set_position(0);

        let result = WavSource::from_stream(buffer);
        assert!(matches!(result, Err(WavError::FloatSamples)));
    }

    #[test]
    fn test_seek_skips_leading_frames() {
        let mut source =
            WavSource::from_stream(create_wav_buffer(stereo_spec(), &stereo_ramp(10))).unwrap();

        assert!(source.skip_start(Frames(4)).unwrap());

        let mut buffer = [0; 4];
        assert_eq!(source.read(&mut buffer).unwrap(), 4);
        assert_eq!(buffer, [8, 9, 10, 11]);
    }

    #[test]
    fn test_trim_wav_to_wav() {
        let input = create_wav_buffer(stereo_spec(), &stereo_ramp(100));
        let mut source = WavSource::from_stream(input).unwrap();
        let config = TrimConfig::parse(["=10", "5"], &Timecode::samples()).unwrap();

        let mut output = Cursor::new(Vec::new());
        let mut sink = WavSink::new(&mut output, source.spec()).unwrap();
        let summary = run(
            &config,
            &Timecode::samples(),
            &mut source,
            &mut sink,
            &PipelineOptions {
                buffer_frames: 6,
                ..PipelineOptions::default()
            },
        )
        .unwrap();
        sink.finalize().unwrap();

        assert_eq!(summary.frames_written, Frames(5));
        assert_eq!(summary.skipped, Frames(10));

        output.set_position(0);
        let reader = WavReader::new(output).unwrap();
        assert_eq!(reader.spec(), stereo_spec());
        let samples: Vec<i16> = reader.into_samples().map(Result::unwrap).collect();
        assert_eq!(samples, (20..30).collect::<Vec<i16>>());
    }
}
