//! Organya (`.org`) decoder and real-time synthesizer.
//!
//! Ties the parser and the playback engine together so callers only need
//! this crate:
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), organya::FormatError> {
//! let wave100: Vec<u8> = unimplemented!();
//! let drums: Vec<Vec<u8>> = unimplemented!();
//! let song: Vec<u8> = unimplemented!();
//!
//! let bank = Arc::new(organya::load_bank(&wave100, &drums)?);
//! let mut engine = organya::load(&song, bank, 44100)?;
//!
//! let (mut left, mut right) = ([0.0f32; 512], [0.0f32; 512]);
//! engine.run(512, &mut left, &mut right);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

// Re-export common types so callers don't need the member crates directly.
pub use org_engine::{Cursor, Engine, EngineConfig, Frame};
pub use org_formats::{
    decode_drum, decode_wavetable, load_bank, load_org, load_org_with, BankError, ByteStream,
    FormatError, ParseOptions, PitchMode,
};
pub use org_ir::{curves, Channel, ChannelKind, InstrumentBank, Note, Song, Waveform, CHANNEL_COUNT};

/// Parse a song and wrap it in an engine with the default configuration.
pub fn load(data: &[u8], bank: Arc<InstrumentBank>, sample_rate: u32) -> Result<Engine, FormatError> {
    Ok(Engine::new(load_org(data, bank, sample_rate)?))
}

/// Parse a song with explicit parser options and engine configuration.
pub fn load_with(
    data: &[u8],
    bank: Arc<InstrumentBank>,
    sample_rate: u32,
    options: &ParseOptions,
    config: EngineConfig,
) -> Result<Engine, FormatError> {
    let song = load_org_with(data, bank, sample_rate, options)?;
    Ok(Engine::with_config(song, config))
}
