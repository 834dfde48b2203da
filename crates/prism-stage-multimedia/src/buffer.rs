//! Shared sample buffers and region playback sources.
//!
//! An audio sprite decodes its source once into a [`SampleBuffer`]
//! (interleaved `f32` samples behind an `Arc`), and every playback instance
//! reads from that shared, immutable buffer through its own
//! [`RegionSource`]. A `RegionSource` plays exactly one `[start, end)`
//! slice of the buffer and, when looping, wraps back to the slice start so
//! playback never spills into adjacent regions.

use std::fmt;
use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use rodio::{Decoder, Source};

use crate::error::{AudioError, Result};
use crate::sound_sprite::Region;

/// A decoded audio buffer shared by all playback instances of a sprite.
///
/// Cloning a `SampleBuffer` is cheap: the sample data is reference-counted
/// and immutable.
#[derive(Clone)]
pub struct SampleBuffer {
    channels: u16,
    sample_rate: u32,
    samples: Arc<[f32]>,
}

impl SampleBuffer {
    /// Decode an audio file held in memory.
    ///
    /// The format is auto-detected from the data. Supported formats are
    /// whatever the rodio decoder supports (WAV, MP3, OGG Vorbis, FLAC).
    pub fn decode(data: Vec<u8>) -> Result<Self> {
        let decoder = Decoder::new(Cursor::new(data))?;
        let channels = decoder.channels();
        let sample_rate = decoder.sample_rate();
        let samples: Vec<f32> = decoder.convert_samples().collect();
        if samples.is_empty() {
            return Err(AudioError::Decode(
                "decoded stream contained no samples".to_string(),
            ));
        }
        Ok(Self {
            channels,
            sample_rate,
            samples: samples.into(),
        })
    }

    /// Build a buffer directly from interleaved samples.
    pub fn from_samples(channels: u16, sample_rate: u32, samples: Vec<f32>) -> Self {
        Self {
            channels: channels.max(1),
            sample_rate: sample_rate.max(1),
            samples: samples.into(),
        }
    }

    /// Number of interleaved channels.
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of frames (samples per channel).
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    /// Total duration of the buffer in seconds.
    pub fn duration(&self) -> f64 {
        self.frames() as f64 / self.sample_rate as f64
    }

    /// Interleaved sample index for a time offset, clamped to the buffer.
    fn index_at(&self, seconds: f64) -> usize {
        let frame = (seconds.max(0.0) * f64::from(self.sample_rate)).round() as usize;
        frame.min(self.frames()) * self.channels as usize
    }
}

impl fmt::Debug for SampleBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SampleBuffer")
            .field("channels", &self.channels)
            .field("sample_rate", &self.sample_rate)
            .field("frames", &self.frames())
            .finish()
    }
}

/// A playback source for one region of a shared [`SampleBuffer`].
///
/// Yields the interleaved samples of `[region.start, region.end)`. For a
/// looping region the cursor wraps back to the region start when it reaches
/// the region end; for a one-shot region the source simply runs dry.
pub struct RegionSource {
    buffer: SampleBuffer,
    begin: usize,
    end: usize,
    cursor: usize,
    looping: bool,
}

impl RegionSource {
    /// Create a source for `region`, starting `offset` seconds into it.
    ///
    /// Offsets are clamped into the region so a stale resume position can
    /// never escape the slice.
    pub fn new(buffer: SampleBuffer, region: Region, offset: f64) -> Self {
        let begin = buffer.index_at(region.start);
        let end = buffer.index_at(region.end).max(begin);
        let cursor = buffer.index_at(region.start + offset.max(0.0)).clamp(begin, end);
        Self {
            buffer,
            begin,
            end,
            cursor,
            looping: region.looping,
        }
    }

    /// Samples remaining until the region end (ignoring looping).
    pub fn remaining(&self) -> usize {
        self.end - self.cursor
    }
}

impl Iterator for RegionSource {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.cursor >= self.end {
            // Loop bounds stay confined to the region slice.
            if self.looping && self.end > self.begin {
                self.cursor = self.begin;
            } else {
                return None;
            }
        }
        let sample = self.buffer.samples[self.cursor];
        self.cursor += 1;
        Some(sample)
    }
}

impl Source for RegionSource {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        self.buffer.channels
    }

    fn sample_rate(&self) -> u32 {
        self.buffer.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        if self.looping {
            None
        } else {
            let frames = (self.end - self.begin) / self.buffer.channels as usize;
            Some(Duration::from_secs_f64(
                frames as f64 / f64::from(self.buffer.sample_rate),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_buffer() -> SampleBuffer {
        // 100 frames, mono, 100 Hz: sample value == frame index, so one
        // second spans the whole buffer and offsets are easy to read.
        SampleBuffer::from_samples(1, 100, (0..100).map(|i| i as f32).collect())
    }

    fn region(start: f64, end: f64, looping: bool) -> Region {
        Region::new(start, end, looping).unwrap()
    }

    #[test]
    fn one_shot_region_yields_exact_slice() {
        let source = RegionSource::new(ramp_buffer(), region(0.2, 0.5, false), 0.0);
        let samples: Vec<f32> = source.collect();
        assert_eq!(samples.len(), 30);
        assert_eq!(samples[0], 20.0);
        assert_eq!(*samples.last().unwrap(), 49.0);
    }

    #[test]
    fn looping_region_wraps_within_bounds() {
        let source = RegionSource::new(ramp_buffer(), region(0.1, 0.2, true), 0.0);
        let samples: Vec<f32> = source.take(25).collect();
        assert_eq!(samples.len(), 25);
        for sample in samples {
            assert!((10.0..20.0).contains(&sample), "sample {sample} escaped region");
        }
    }

    #[test]
    fn offset_skips_into_region() {
        let source = RegionSource::new(ramp_buffer(), region(0.2, 0.5, false), 0.1);
        let samples: Vec<f32> = source.collect();
        assert_eq!(samples.len(), 20);
        assert_eq!(samples[0], 30.0);
    }

    #[test]
    fn offset_clamps_to_region_end() {
        let source = RegionSource::new(ramp_buffer(), region(0.2, 0.5, false), 9.0);
        assert_eq!(source.remaining(), 0);
        assert_eq!(source.count(), 0);
    }

    #[test]
    fn empty_region_never_loops_forever() {
        let mut source = RegionSource::new(ramp_buffer(), region(0.3, 0.3000001, true), 0.0);
        // start and end round to the same frame
        assert_eq!(source.next(), None);
    }

    #[test]
    fn total_duration_covers_the_region() {
        let source = RegionSource::new(ramp_buffer(), region(0.0, 0.5, false), 0.0);
        assert_eq!(source.total_duration(), Some(Duration::from_millis(500)));

        let looping = RegionSource::new(ramp_buffer(), region(0.0, 0.5, true), 0.0);
        assert_eq!(looping.total_duration(), None);
    }

    #[test]
    fn buffer_metadata() {
        let buffer = SampleBuffer::from_samples(2, 48_000, vec![0.0; 96_000]);
        assert_eq!(buffer.channels(), 2);
        assert_eq!(buffer.frames(), 48_000);
        assert!((buffer.duration() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn decode_reads_pcm_wav() {
        let buffer = SampleBuffer::decode(crate::test_support::pcm_wav(0.25, 8_000)).unwrap();
        assert_eq!(buffer.channels(), 1);
        assert_eq!(buffer.sample_rate(), 8_000);
        assert_eq!(buffer.frames(), 2_000);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(SampleBuffer::decode(vec![0u8; 64]).is_err());
    }
}
