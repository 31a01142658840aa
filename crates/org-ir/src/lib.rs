//! Core song model for the Organya player.
//!
//! The format parser builds a [`Song`] once, with every note's timing and
//! gain curves precomputed; the playback engine only reads it.
//!
//! Designed to be `no_std` compatible with the `alloc` crate.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod bank;
pub mod curves;
mod song;

pub use bank::{
    get_sample, InstrumentBank, Waveform, DRUM_COUNT, WAVETABLE_COUNT, WAVETABLE_ENTRY_SIZE,
};
pub use song::{Channel, ChannelKind, Note, Song, CHANNEL_COUNT, MELODIC_CHANNELS};
