//! Format parsers for the Organya player.
//!
//! Decodes `.org` songs and the instrument bank they play into the IR.

mod bank_format;
mod org_format;
mod stream;

pub use bank_format::{decode_drum, decode_wavetable, load_bank};
pub use org_format::{load_org, load_org_with, ParseOptions, PitchMode};
pub use stream::ByteStream;

use thiserror::Error;

/// Error type for format parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// A read would run past the end of the buffer
    #[error("truncated input: wanted {wanted} byte(s) at offset {offset}, buffer is {len} bytes")]
    TruncatedInput {
        offset: usize,
        wanted: usize,
        len: usize,
    },
    /// Instrument bank bytes have the wrong shape
    #[error("invalid instrument bank: {0}")]
    InvalidInstrumentBank(#[from] BankError),
}

/// Why instrument bank bytes were rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BankError {
    #[error("wavetable is {0} bytes, expected {expected}", expected = org_ir::WAVETABLE_COUNT * org_ir::WAVETABLE_ENTRY_SIZE)]
    WavetableLength(usize),
    #[error("drum sample is {0} bytes, not a whole number of 16-bit samples")]
    OddDrumLength(usize),
    #[error("drum sample is empty")]
    EmptyDrum,
    #[error("expected {expected} drum samples, got {0}", expected = org_ir::DRUM_COUNT)]
    DrumCount(usize),
}
