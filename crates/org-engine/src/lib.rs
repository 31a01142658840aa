//! Playback engine for the Organya player.
//!
//! Walks a parsed [`org_ir::Song`] one output sample at a time, mixing all
//! 16 channels into a stereo stream. Nothing on the render path allocates.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod config;
mod frame;
mod mixer;

pub use config::EngineConfig;
pub use frame::Frame;
pub use mixer::{Cursor, Engine};
