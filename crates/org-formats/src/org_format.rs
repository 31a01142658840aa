//! Organya (`.org`) song parser.
//!
//! Layout, all little-endian:
//! - 6-byte version header (not validated)
//! - u16 wait (ms per beat), u16 time signature (ignored)
//! - i32 loop start beat, i32 loop end beat
//! - 16 channel headers: i16 voice, u8 instrument, u8 pi, u16 note count
//! - per channel, five columns of `note count` entries:
//!   i32 start beat, u8 pitch, u8 length, u8 volume, u8 pan
//!
//! In the four byte columns `0xFF` repeats the previous note's value.

use std::sync::Arc;

use arrayvec::ArrayVec;
use log::{debug, warn};
use org_ir::curves::{
    beat_to_sample, drum_advance, frequency, pan_gains, pi_length, samples_per_beat,
    table_frequency, volume_scale,
};
use org_ir::{Channel, ChannelKind, InstrumentBank, Note, Song, CHANNEL_COUNT};

use crate::stream::ByteStream;
use crate::FormatError;

const HEADER_LEN: usize = 6;
const CARRY: u8 = 0xFF;

const DEFAULT_PITCH: u8 = 95;
const DEFAULT_LENGTH: u8 = 1;
const DEFAULT_VOLUME: u8 = 254;
const DEFAULT_PAN: u8 = 6;

/// How melodic note frequencies are derived.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PitchMode {
    /// `2^((pitch + bend + 155.376) / 12)`
    #[default]
    Algorithmic,
    /// Semitone frequency table scaled by an octave period
    Table,
}

/// Parser options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub pitch_mode: PitchMode,
}

#[derive(Clone, Copy, Debug)]
struct ChannelHeader {
    voice: i16,
    instrument: u8,
    pi: bool,
    note_count: u16,
}

/// Load an `.org` song from bytes with default options.
pub fn load_org(data: &[u8], bank: Arc<InstrumentBank>, sample_rate: u32) -> Result<Song, FormatError> {
    load_org_with(data, bank, sample_rate, &ParseOptions::default())
}

/// Load an `.org` song from bytes.
///
/// All note timing and gain curves are computed here; the resulting
/// [`Song`] needs no further validation before playback.
pub fn load_org_with(
    data: &[u8],
    bank: Arc<InstrumentBank>,
    sample_rate: u32,
    options: &ParseOptions,
) -> Result<Song, FormatError> {
    let mut stream = ByteStream::new(data);
    stream.skip(HEADER_LEN)?;

    let wait = stream.read_u16_le()?;
    stream.skip(2)?; // time signature

    let start_sample = beat_to_sample(stream.read_i32_le()? as i64, wait, sample_rate);
    let end_sample = beat_to_sample(stream.read_i32_le()? as i64, wait, sample_rate);

    let mut headers = ArrayVec::<ChannelHeader, CHANNEL_COUNT>::new();
    for _ in 0..CHANNEL_COUNT {
        headers.push(ChannelHeader {
            voice: stream.read_i16_le()?,
            instrument: stream.read_u8()?,
            pi: stream.read_u8()? != 0,
            note_count: stream.read_u16_le()?,
        });
    }

    let mut song = Song::empty(bank, sample_rate);
    song.wait = wait;
    song.beat_length_samples = samples_per_beat(wait, sample_rate);
    song.start_sample = start_sample;
    song.end_sample = end_sample;

    for (index, header) in headers.iter().enumerate() {
        let notes = parse_notes(&mut stream, index, header, &song, options)?;
        let loop_note = loop_note(&notes, start_sample);

        if !notes.is_empty() && song.bank.waveform(ChannelKind::of(index), header.instrument).is_none() {
            warn!(
                "channel {} uses instrument {} which is not in the bank; it will be silent",
                index, header.instrument
            );
        }

        song.channels[index] = Channel {
            voice: header.voice,
            instrument: header.instrument,
            pi: header.pi,
            notes,
            loop_note,
        };
    }

    debug!(
        "parsed org: wait {} ms, loop {}..{} samples, notes per channel {:?}",
        wait,
        start_sample,
        end_sample,
        song.channels.iter().map(|c| c.notes.len()).collect::<Vec<_>>()
    );

    Ok(song)
}

/// Read one channel's five note columns and derive playback parameters.
fn parse_notes(
    stream: &mut ByteStream<'_>,
    index: usize,
    header: &ChannelHeader,
    song: &Song,
    options: &ParseOptions,
) -> Result<Vec<Note>, FormatError> {
    let count = header.note_count as usize;
    let (wait, sample_rate) = (song.wait, song.sample_rate);

    let mut starts = Vec::with_capacity(count);
    for _ in 0..count {
        starts.push(beat_to_sample(stream.read_i32_le()? as i64, wait, sample_rate));
    }
    let pitches = read_carried(stream, count, DEFAULT_PITCH)?;
    let lengths = read_carried(stream, count, DEFAULT_LENGTH)?;
    let volumes = read_carried(stream, count, DEFAULT_VOLUME)?;
    let pans = read_carried(stream, count, DEFAULT_PAN)?;

    let kind = ChannelKind::of(index);
    let drum_len = song.bank.drum_len(header.instrument);

    let mut notes = Vec::with_capacity(count);
    let columns = starts.iter().zip(&pitches).zip(&lengths).zip(&volumes).zip(&pans);
    for (n, ((((&start, &pitch), &length), &volume_raw), &pan)) in columns.enumerate() {

        let freq = match options.pitch_mode {
            PitchMode::Algorithmic => frequency(pitch, header.voice),
            PitchMode::Table => table_frequency(pitch, header.voice),
        };
        let (pan_left, pan_right) = pan_gains(pan);
        let volume = volume_scale(volume_raw);

        let mut note = Note {
            start,
            end: start + beat_to_sample(length as i64, wait, sample_rate),
            length,
            pitch,
            volume: volume_raw,
            pan,
            sample_advance: freq / sample_rate as f64,
            left_gain: pan_left * volume,
            right_gain: pan_right * volume,
        };

        if kind.is_drum() {
            note.sample_advance = drum_advance(pitch, sample_rate);
            note.end = clip_drum_end(
                &note,
                drum_len,
                song.beat_length_samples,
                starts.get(n + 1).copied(),
            );
        }

        if header.pi {
            note.end = start + pi_length(pitch);
        }

        notes.push(note);
    }

    notes.sort_by_key(|n| n.start);
    Ok(notes)
}

/// Read a byte column where `0xFF` repeats the previous value.
fn read_carried(stream: &mut ByteStream<'_>, count: usize, initial: u8) -> Result<Vec<u8>, FormatError> {
    let mut last = initial;
    let mut column = Vec::with_capacity(count);
    for _ in 0..count {
        let value = stream.read_u8()?;
        if value != CARRY {
            last = value;
        }
        column.push(last);
    }
    Ok(column)
}

/// End of a drum hit: the shorter of the sample running out and the note's
/// beat length (both scaled by the playback rate), cut one sample before the
/// next hit on the channel. Never before the note's own start.
fn clip_drum_end(note: &Note, drum_len: usize, beat_length: i64, next_start: Option<i64>) -> i64 {
    let advance = note.sample_advance;
    let by_sample = drum_len as f64 / advance;
    let by_length = (beat_length * note.length as i64) as f64 / advance;
    let mut end = (note.start as f64 + by_sample.min(by_length)).floor() as i64;
    if let Some(next) = next_start {
        end = end.min(next - 1);
    }
    end.max(note.start)
}

/// First note still sounding at `start_sample`, or 0 if every note ends before it.
fn loop_note(notes: &[Note], start_sample: i64) -> usize {
    notes.iter().position(|n| n.end > start_sample).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(start: i64, end: i64) -> Note {
        Note { start, end, ..Default::default() }
    }

    #[test]
    fn carry_forward_repeats_previous() {
        let mut s = ByteStream::new(&[0x05, 0xFF, 0xFF]);
        assert_eq!(read_carried(&mut s, 3, DEFAULT_PITCH).unwrap(), vec![5, 5, 5]);
    }

    #[test]
    fn carry_forward_before_first_note_uses_default() {
        let mut s = ByteStream::new(&[0xFF, 0x02, 0xFF]);
        assert_eq!(read_carried(&mut s, 3, DEFAULT_PAN).unwrap(), vec![6, 2, 2]);
    }

    #[test]
    fn carried_column_truncated() {
        let mut s = ByteStream::new(&[0x01]);
        assert!(matches!(
            read_carried(&mut s, 2, DEFAULT_VOLUME),
            Err(FormatError::TruncatedInput { .. })
        ));
    }

    #[test]
    fn loop_note_is_first_note_sounding_at_loop_start() {
        let notes = [note(0, 10), note(10, 30), note(30, 50)];
        assert_eq!(loop_note(&notes, 25), 1);
        assert_eq!(loop_note(&notes, 5), 0);
        assert_eq!(loop_note(&notes, 30), 2);
    }

    #[test]
    fn loop_note_past_every_note_wraps_to_zero() {
        let notes = [note(0, 10), note(10, 30), note(30, 50)];
        assert_eq!(loop_note(&notes, 60), 0);
        assert_eq!(loop_note(&[], 60), 0);
    }

    #[test]
    fn drum_end_limited_by_sample_length() {
        let n = Note { start: 100, length: 10, sample_advance: 2.0, ..Default::default() };
        // sample runs out after 500 / 2 = 250 output samples; length allows 10 * 352 / 2
        assert_eq!(clip_drum_end(&n, 500, 352, None), 350);
    }

    #[test]
    fn drum_end_limited_by_beat_length() {
        let n = Note { start: 0, length: 1, sample_advance: 0.5, ..Default::default() };
        assert_eq!(clip_drum_end(&n, 10_000, 100, None), 200);
    }

    #[test]
    fn drum_end_cut_before_next_hit() {
        let n = Note { start: 0, length: 4, sample_advance: 0.25, ..Default::default() };
        assert_eq!(clip_drum_end(&n, 10_000, 352, Some(300)), 299);
    }

    #[test]
    fn drum_end_never_before_start() {
        let n = Note { start: 300, length: 4, sample_advance: 0.25, ..Default::default() };
        assert_eq!(clip_drum_end(&n, 10_000, 352, Some(300)), 300);
        assert_eq!(clip_drum_end(&n, 0, 352, None), 300);
    }
}
