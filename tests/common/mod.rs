//! Synthetic `.org` files and instrument banks for tests.

#![allow(dead_code)]

use std::sync::Arc;

use org_ir::InstrumentBank;

/// One note as it appears in the file's columns. Byte fields are raw, so
/// `0xFF` means "same as the previous note".
#[derive(Clone, Copy, Debug)]
pub struct RawNote {
    pub beat: i32,
    pub pitch: u8,
    pub length: u8,
    pub volume: u8,
    pub pan: u8,
}

impl RawNote {
    pub fn new(beat: i32, pitch: u8, length: u8) -> Self {
        Self { beat, pitch, length, volume: 254, pan: 6 }
    }
}

#[derive(Clone, Debug, Default)]
pub struct RawChannel {
    pub voice: i16,
    pub instrument: u8,
    pub pi: bool,
    pub notes: Vec<RawNote>,
}

#[derive(Clone, Debug)]
pub struct OrgFile {
    pub wait: u16,
    pub loop_start: i32,
    pub loop_end: i32,
    pub channels: [RawChannel; 16],
}

impl OrgFile {
    pub fn new(wait: u16, loop_start: i32, loop_end: i32) -> Self {
        Self {
            wait,
            loop_start,
            loop_end,
            channels: Default::default(),
        }
    }

    pub fn with_notes(mut self, channel: usize, notes: &[RawNote]) -> Self {
        self.channels[channel].notes = notes.to_vec();
        self
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(b"Org-02");
        out.extend_from_slice(&self.wait.to_le_bytes());
        out.extend_from_slice(&[4, 8]);
        out.extend_from_slice(&self.loop_start.to_le_bytes());
        out.extend_from_slice(&self.loop_end.to_le_bytes());
        for ch in &self.channels {
            out.extend_from_slice(&ch.voice.to_le_bytes());
            out.push(ch.instrument);
            out.push(ch.pi as u8);
            out.extend_from_slice(&(ch.notes.len() as u16).to_le_bytes());
        }
        for ch in &self.channels {
            for n in &ch.notes {
                out.extend_from_slice(&n.beat.to_le_bytes());
            }
            out.extend(ch.notes.iter().map(|n| n.pitch));
            out.extend(ch.notes.iter().map(|n| n.length));
            out.extend(ch.notes.iter().map(|n| n.volume));
            out.extend(ch.notes.iter().map(|n| n.pan));
        }
        out
    }
}

/// Wavetable bytes where every entry is a full-scale sawtooth.
pub fn saw_wavetable() -> Vec<u8> {
    (0..100 * 256).map(|i| ((i % 256) as i32 - 128) as i8 as u8).collect()
}

/// Twelve drum samples of `len` samples each, big-endian square waves.
pub fn square_drums(len: usize) -> Vec<Vec<u8>> {
    (0..12)
        .map(|_| {
            (0..len)
                .flat_map(|i| {
                    let v: i16 = if (i / 8) % 2 == 0 { 16000 } else { -16000 };
                    v.to_be_bytes()
                })
                .collect()
        })
        .collect()
}

pub fn audible_bank() -> Arc<InstrumentBank> {
    Arc::new(org_formats::load_bank(&saw_wavetable(), &square_drums(2000)).unwrap())
}
