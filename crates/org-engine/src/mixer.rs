//! Main playback engine.

use alloc::vec::Vec;
use org_ir::curves::{attack_ramp, clamp_unit, fade_in, release_ramp};
use org_ir::{ChannelKind, Song, CHANNEL_COUNT};

use crate::config::EngineConfig;
use crate::frame::Frame;

/// Per-channel playback position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cursor {
    /// Index of the active note in the channel's note list
    pub note_index: usize,
    /// Fractional read position into the instrument buffer
    pub phase_offset: f64,
    /// Audible samples rendered since the active note started
    pub samples_played: u32,
}

impl Cursor {
    fn at(note_index: usize) -> Self {
        Self {
            note_index,
            ..Default::default()
        }
    }
}

/// The main playback engine.
///
/// Single owner, pull based: call [`Engine::step`] or [`Engine::run`] from
/// the audio callback. Neither allocates nor blocks.
pub struct Engine {
    /// The song being played
    song: Song,
    config: EngineConfig,
    /// One cursor per channel
    cursors: [Cursor; CHANNEL_COUNT],
    /// Output of each channel on the last step, before prescale and fade
    channel_frames: [Frame; CHANNEL_COUNT],
    /// Absolute output-sample position; negative during the pre-roll
    position: i64,
}

impl Engine {
    /// Create an engine with the default configuration.
    pub fn new(song: Song) -> Self {
        Self::with_config(song, EngineConfig::default())
    }

    pub fn with_config(song: Song, config: EngineConfig) -> Self {
        Self {
            song,
            config,
            cursors: [Cursor::default(); CHANNEL_COUNT],
            channel_frames: [Frame::silence(); CHANNEL_COUNT],
            position: -(config.pre_roll as i64),
        }
    }

    pub fn song(&self) -> &Song {
        &self.song
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current absolute output-sample position.
    pub fn position(&self) -> i64 {
        self.position
    }

    pub fn cursor(&self, channel: usize) -> Option<&Cursor> {
        self.cursors.get(channel)
    }

    /// Per-channel output of the most recent [`Engine::step`].
    pub fn channel_frames(&self) -> &[Frame; CHANNEL_COUNT] {
        &self.channel_frames
    }

    /// Rewind to the beginning, pre-roll included.
    pub fn reset(&mut self) {
        self.cursors = [Cursor::default(); CHANNEL_COUNT];
        self.channel_frames = [Frame::silence(); CHANNEL_COUNT];
        self.position = -(self.config.pre_roll as i64);
    }

    /// Generate one stereo frame.
    pub fn step(&mut self) -> Frame {
        let prescale = self.config.channel_prescale;
        let (mut left, mut right) = (0.0, 0.0);

        for index in 0..CHANNEL_COUNT {
            let (l, r) = self.step_channel(index);
            self.channel_frames[index] = Frame {
                left: l as f32,
                right: r as f32,
            };
            left += l * prescale;
            right += r * prescale;
        }

        self.position += 1;
        if self.position >= self.song.end_sample {
            self.wrap();
        }

        let fade = fade_in(self.position, self.config.fade_in);
        Frame {
            left: clamp_unit(left * fade) as f32,
            right: clamp_unit(right * fade) as f32,
        }
    }

    /// Jump back to the loop start, resuming each channel at its loop note.
    fn wrap(&mut self) {
        for (cursor, channel) in self.cursors.iter_mut().zip(self.song.channels.iter()) {
            *cursor = Cursor::at(channel.loop_note);
        }
        self.position = self.song.start_sample;
    }

    fn step_channel(&mut self, index: usize) -> (f64, f64) {
        let channel = &self.song.channels[index];
        let cursor = &mut self.cursors[index];
        let Some(note) = channel.note(cursor.note_index) else {
            return (0.0, 0.0);
        };

        let mut out = (0.0, 0.0);
        if self.position > note.start {
            let capped = channel.pi && cursor.samples_played >= self.config.pi_cap;
            if !capped {
                let read_pos = cursor.phase_offset + note.sample_advance;
                let value = self.song.waveform(index).map_or(0.0, |w| w.sample(read_pos));

                cursor.phase_offset = read_pos;
                cursor.samples_played += 1;

                let envelope = if self.config.envelope {
                    let cutoff = self.config.cutoff(ChannelKind::of(index).is_drum());
                    let played = cursor.samples_played as i64;
                    attack_ramp(played, cutoff) * release_ramp(played, note.duration(), cutoff)
                } else {
                    1.0
                };

                out = (
                    value * note.left_gain * envelope,
                    value * note.right_gain * envelope,
                );
            }
        }

        // Takes effect on the next step
        if self.position >= note.end {
            *cursor = Cursor::at(cursor.note_index + 1);
        }

        out
    }

    /// Render `count` frames into `left` and `right`.
    ///
    /// Stops early if either buffer is shorter than `count`; returns the
    /// number of frames written.
    pub fn run(&mut self, count: usize, left: &mut [f32], right: &mut [f32]) -> usize {
        #[cfg(feature = "alloc_check")]
        {
            assert_no_alloc::assert_no_alloc(|| self.run_inner(count, left, right))
        }
        #[cfg(not(feature = "alloc_check"))]
        {
            self.run_inner(count, left, right)
        }
    }

    fn run_inner(&mut self, count: usize, left: &mut [f32], right: &mut [f32]) -> usize {
        let mut written = 0;
        for (l, r) in left.iter_mut().zip(right.iter_mut()).take(count) {
            let frame = self.step();
            *l = frame.left;
            *r = frame.right;
            written += 1;
        }
        written
    }

    /// Render `count` frames into a new buffer. Allocates; not for the
    /// real-time path.
    pub fn render_frames(&mut self, count: usize) -> Vec<Frame> {
        (0..count).map(|_| self.step()).collect()
    }
}
