//! Minimal RIFF/WAVE reader for the short letter samples.
//!
//! Handles integer PCM (8, 16, 24 and 32 bit) and 32-bit IEEE float, with
//! `WAVE_FORMAT_EXTENSIBLE` headers unwrapped to their sub-format. Samples
//! are normalized to `f32` in `-1.0..=1.0` and kept interleaved.

use std::ops::RangeInclusive;

use crate::audio::{AudioError, Sample};

const FORMAT_PCM: u16 = 1;
const FORMAT_FLOAT: u16 = 3;
const FORMAT_EXTENSIBLE: u16 = 0xFFFE;

/// Sample rates outside this range are treated as a corrupt header.
pub const SAMPLE_RATES: RangeInclusive<u32> = 1_000..=384_000;

struct FormatChunk {
    format: u16,
    channels: u16,
    sample_rate: u32,
    bits_per_sample: u16,
}

fn read_u16(bytes: &[u8], at: usize) -> Option<u16> {
    bytes.get(at..at + 2).map(|b| u16::from_le_bytes([b[0], b[1]]))
}

fn read_u32(bytes: &[u8], at: usize) -> Option<u32> {
    bytes
        .get(at..at + 4)
        .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}

fn parse_format(body: &[u8]) -> Result<FormatChunk, AudioError> {
    let malformed = || AudioError::Malformed("fmt chunk too short".to_string());
    let mut format = read_u16(body, 0).ok_or_else(malformed)?;
    let channels = read_u16(body, 2).ok_or_else(malformed)?;
    let sample_rate = read_u32(body, 4).ok_or_else(malformed)?;
    let bits_per_sample = read_u16(body, 14).ok_or_else(malformed)?;

    if format == FORMAT_EXTENSIBLE {
        // Sub-format GUID starts at offset 24; its first two bytes carry the tag.
        format = read_u16(body, 24).ok_or_else(malformed)?;
    }

    Ok(FormatChunk {
        format,
        channels,
        sample_rate,
        bits_per_sample,
    })
}

fn convert(fmt: &FormatChunk, data: &[u8]) -> Result<Vec<f32>, AudioError> {
    let samples = match (fmt.format, fmt.bits_per_sample) {
        (FORMAT_PCM, 8) => data.iter().map(|&b| (b as f32 - 128.0) / 128.0).collect(),
        (FORMAT_PCM, 16) => data
            .chunks_exact(2)
            .map(|b| i16::from_le_bytes([b[0], b[1]]) as f32 / 32_768.0)
            .collect(),
        (FORMAT_PCM, 24) => data
            .chunks_exact(3)
            .map(|b| {
                let v = i32::from_le_bytes([0, b[0], b[1], b[2]]) >> 8;
                v as f32 / 8_388_608.0
            })
            .collect(),
        (FORMAT_PCM, 32) => data
            .chunks_exact(4)
            .map(|b| i32::from_le_bytes([b[0], b[1], b[2], b[3]]) as f32 / 2_147_483_648.0)
            .collect(),
        (FORMAT_FLOAT, 32) => data
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]).clamp(-1.0, 1.0))
            .collect(),
        (format, bits) => return Err(AudioError::Unsupported { format, bits }),
    };
    Ok(samples)
}

pub fn decode(bytes: &[u8]) -> Result<Sample, AudioError> {
    if bytes.len() < 12 || &bytes[0..4] != b"RIFF" || &bytes[8..12] != b"WAVE" {
        return Err(AudioError::Malformed("missing RIFF/WAVE header".to_string()));
    }

    let mut fmt: Option<FormatChunk> = None;
    let mut data: Option<&[u8]> = None;
    let mut pos = 12;

    while pos + 8 <= bytes.len() {
        let id = &bytes[pos..pos + 4];
        let len = read_u32(bytes, pos + 4).unwrap_or(0) as usize;
        let start = pos + 8;
        // Truncated trailing chunks are common in hand-edited files; clamp.
        let end = start.saturating_add(len).min(bytes.len());
        let body = &bytes[start..end];

        match id {
            b"fmt " => fmt = Some(parse_format(body)?),
            b"data" => data = Some(body),
            _ => {}
        }

        // Chunks are word aligned.
        pos = end + (len & 1);
    }

    let fmt = fmt.ok_or_else(|| AudioError::Malformed("no fmt chunk".to_string()))?;
    let data = data.ok_or_else(|| AudioError::Malformed("no data chunk".to_string()))?;

    if fmt.channels == 0 {
        return Err(AudioError::Malformed("zero channels".to_string()));
    }
    if !SAMPLE_RATES.contains(&fmt.sample_rate) {
        return Err(AudioError::Malformed(format!(
            "sample rate {} Hz out of range",
            fmt.sample_rate
        )));
    }

    Ok(Sample {
        sample_rate: fmt.sample_rate,
        channels: fmt.channels,
        frames: convert(&fmt, data)?,
    })
}

#[cfg(test)]
pub(crate) fn encode_pcm16(sample_rate: u32, channels: u16, samples: &[i16]) -> Vec<u8> {
    let data_len = (samples.len() * 2) as u32;
    let mut out = Vec::new();
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&FORMAT_PCM.to_le_bytes());
    out.extend_from_slice(&channels.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    let block_align = channels * 2;
    out.extend_from_slice(&sample_rate.wrapping_mul(block_align as u32).to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&16u16.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    for s in samples {
        out.extend_from_slice(&s.to_le_bytes());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_pcm16_mono() {
        let bytes = encode_pcm16(22_050, 1, &[0, 16_384, -32_768]);
        let sample = decode(&bytes).unwrap();
        assert_eq!(sample.sample_rate, 22_050);
        assert_eq!(sample.channels, 1);
        assert_eq!(sample.frames, vec![0.0, 0.5, -1.0]);
    }

    #[test]
    fn skips_unknown_chunks() {
        let mut bytes = encode_pcm16(8_000, 2, &[1, 2]);
        // Splice a LIST chunk between the header and fmt.
        let list = [b"LIST".as_slice(), 3u32.to_le_bytes().as_slice(), b"abc\0".as_slice()].concat();
        bytes.splice(12..12, list);
        let sample = decode(&bytes).unwrap();
        assert_eq!(sample.channels, 2);
        assert_eq!(sample.frames.len(), 2);
    }

    #[test]
    fn rejects_non_wave() {
        assert!(matches!(
            decode(b"ID3\x03not a wave file"),
            Err(AudioError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_missing_data() {
        let bytes = encode_pcm16(8_000, 1, &[]);
        let truncated = &bytes[..36];
        assert!(matches!(decode(truncated), Err(AudioError::Malformed(_))));
    }

    #[test]
    fn rejects_implausible_sample_rates() {
        for rate in [1, 999, 384_001, u32::MAX] {
            let bytes = encode_pcm16(rate, 1, &[0; 64]);
            assert!(
                matches!(decode(&bytes), Err(AudioError::Malformed(_))),
                "rate {rate}"
            );
        }
        assert!(decode(&encode_pcm16(1_000, 1, &[0])).is_ok());
        assert!(decode(&encode_pcm16(384_000, 1, &[0])).is_ok());
    }

    #[test]
    fn rejects_unsupported_format() {
        let mut bytes = encode_pcm16(8_000, 1, &[0, 0]);
        // Patch the format tag to A-law (6).
        bytes[20..22].copy_from_slice(&6u16.to_le_bytes());
        assert!(matches!(
            decode(&bytes),
            Err(AudioError::Unsupported { format: 6, bits: 16 })
        ));
    }
}
