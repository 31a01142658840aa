//! Song, channel and note types.

use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::bank::{InstrumentBank, Waveform};

/// Number of channels in every song.
pub const CHANNEL_COUNT: usize = 16;

/// Channels below this index are melodic, the rest are drums.
pub const MELODIC_CHANNELS: usize = 8;

/// Which half of the channel list a channel sits in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelKind {
    /// Channels 0-7, reading the wavetable bank.
    Melodic,
    /// Channels 8-15, reading drum samples.
    Drum,
}

impl ChannelKind {
    /// Kind of the channel at `index`.
    pub const fn of(index: usize) -> Self {
        if index < MELODIC_CHANNELS {
            ChannelKind::Melodic
        } else {
            ChannelKind::Drum
        }
    }

    pub const fn is_drum(self) -> bool {
        matches!(self, ChannelKind::Drum)
    }
}

/// A single note with its playback parameters already derived.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Note {
    /// First sample of the note (absolute output samples)
    pub start: i64,
    /// Sample at which the note is finished
    pub end: i64,
    /// Raw length in beats
    pub length: u8,
    /// Raw pitch (0-95)
    pub pitch: u8,
    /// Raw volume (0-254)
    pub volume: u8,
    /// Raw pan (0-12, 6 = center)
    pub pan: u8,
    /// Phase increment per output sample
    pub sample_advance: f64,
    /// Left gain, volume included
    pub left_gain: f64,
    /// Right gain, volume included
    pub right_gain: f64,
}

impl Note {
    /// Length of the note in output samples.
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }
}

/// One of the 16 song channels.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Channel {
    /// Raw pitch-bend value
    pub voice: i16,
    /// Wavetable entry (melodic) or drum sample (drum) index
    pub instrument: u8,
    /// Pizzicato: fixed octave-derived note lengths
    pub pi: bool,
    /// Notes, sorted by `start`
    pub notes: Vec<Note>,
    /// Note index to resume at after the song loops
    pub loop_note: usize,
}

impl Channel {
    /// Note at `index`, or `None` once the channel has run out of notes.
    pub fn note(&self, index: usize) -> Option<&Note> {
        self.notes.get(index)
    }
}

/// A parsed song, ready for playback.
#[derive(Clone, Debug)]
pub struct Song {
    /// Output sample rate the timings were computed for
    pub sample_rate: u32,
    /// Milliseconds per beat
    pub wait: u16,
    /// `sample_time(1)`: output samples per beat
    pub beat_length_samples: i64,
    /// Loop start (absolute output samples)
    pub start_sample: i64,
    /// Loop end (absolute output samples)
    pub end_sample: i64,
    /// All 16 channels; 0-7 melodic, 8-15 drums
    pub channels: [Channel; CHANNEL_COUNT],
    /// Shared, read-only instrument data
    pub bank: Arc<InstrumentBank>,
}

impl Song {
    /// Create a song with no notes on any channel.
    pub fn empty(bank: Arc<InstrumentBank>, sample_rate: u32) -> Self {
        Self {
            sample_rate,
            wait: 0,
            beat_length_samples: 0,
            start_sample: 0,
            end_sample: 0,
            channels: Default::default(),
            bank,
        }
    }

    /// Source buffer played by channel `index`, if its instrument exists.
    pub fn waveform(&self, index: usize) -> Option<Waveform<'_>> {
        let channel = self.channels.get(index)?;
        self.bank.waveform(ChannelKind::of(index), channel.instrument)
    }

    /// Total number of notes across all channels.
    pub fn note_count(&self) -> usize {
        self.channels.iter().map(|c| c.notes.len()).sum()
    }
}
