//! Decoded instrument data: the melodic wavetable and the drum samples.

use alloc::vec;
use alloc::vec::Vec;

use crate::song::ChannelKind;

/// Samples per wavetable entry.
pub const WAVETABLE_ENTRY_SIZE: usize = 256;

/// Number of melodic wavetable entries.
pub const WAVETABLE_COUNT: usize = 100;

/// Number of drum samples.
pub const DRUM_COUNT: usize = 12;

/// Normalized instrument data shared by every song built from it.
#[derive(Clone, Debug, PartialEq)]
pub struct InstrumentBank {
    wavetable: Vec<[f64; WAVETABLE_ENTRY_SIZE]>,
    drums: Vec<Vec<f64>>,
}

impl InstrumentBank {
    /// Assemble a bank from already decoded buffers.
    ///
    /// Callers are expected to have rejected empty drum buffers; the
    /// `org-formats` decoders do so.
    pub fn new(wavetable: Vec<[f64; WAVETABLE_ENTRY_SIZE]>, drums: Vec<Vec<f64>>) -> Self {
        Self { wavetable, drums }
    }

    /// A bank of all-zero instruments.
    pub fn silent() -> Self {
        Self {
            wavetable: vec![[0.0; WAVETABLE_ENTRY_SIZE]; WAVETABLE_COUNT],
            drums: vec![vec![0.0]; DRUM_COUNT],
        }
    }

    pub fn wavetable(&self) -> &[[f64; WAVETABLE_ENTRY_SIZE]] {
        &self.wavetable
    }

    pub fn drums(&self) -> &[Vec<f64>] {
        &self.drums
    }

    /// Length of drum sample `index`, 0 if there is no such drum.
    pub fn drum_len(&self, index: u8) -> usize {
        self.drums.get(index as usize).map_or(0, Vec::len)
    }

    /// Look up the buffer a channel of the given kind plays for `instrument`.
    pub fn waveform(&self, kind: ChannelKind, instrument: u8) -> Option<Waveform<'_>> {
        match kind {
            ChannelKind::Melodic => self.wavetable.get(instrument as usize).map(Waveform::Melodic),
            ChannelKind::Drum => self
                .drums
                .get(instrument as usize)
                .map(|d| Waveform::Drum(d.as_slice())),
        }
    }
}

/// A source buffer for one channel.
#[derive(Clone, Copy, Debug)]
pub enum Waveform<'a> {
    /// Fixed-size single-cycle wave, looped for the whole note
    Melodic(&'a [f64; WAVETABLE_ENTRY_SIZE]),
    /// One-shot drum sample
    Drum(&'a [f64]),
}

impl<'a> Waveform<'a> {
    pub fn samples(&self) -> &'a [f64] {
        match *self {
            Waveform::Melodic(w) => w,
            Waveform::Drum(d) => d,
        }
    }

    /// Interpolated read at `offset`; see [`get_sample`].
    #[inline]
    pub fn sample(&self, offset: f64) -> f64 {
        get_sample(self.samples(), offset)
    }
}

/// Linearly interpolated read from `buffer` at a fractional `offset`.
///
/// Both neighbours wrap modulo the buffer length, so reads past either end
/// loop around. An empty buffer reads as silence.
#[inline]
pub fn get_sample(buffer: &[f64], offset: f64) -> f64 {
    let len = buffer.len() as i64;
    if len == 0 {
        return 0.0;
    }
    let lo = libm::floor(offset);
    let hi = libm::ceil(offset);
    let v0 = buffer[(lo as i64).rem_euclid(len) as usize];
    let v1 = buffer[(hi as i64).rem_euclid(len) as usize];
    v0 + (offset - lo) * (v1 - v0)
}
