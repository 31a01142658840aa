//! Pure curve math shared by the parser and the playback engine.
//!
//! Pitch, volume and pan curves follow the reference Organya player
//! (see rnhart.net/orgmaker and NXEngine-evo); the ramps are short linear
//! gain envelopes used to suppress clicks.

/// Divisor applied to a channel's raw `voice` to get a pitch bend in semitones.
pub const PITCH_BEND_NORMALIZATION: f64 = 1000.0;

/// Pan position to curve value, indexed by raw pan (0-12).
pub const PAN_TABLE: [i32; 13] = [0, 43, 86, 129, 172, 215, 256, 297, 340, 383, 426, 469, 512];

/// Wave length per octave, used for pizzicato note lengths.
pub const WAVE_LENGTH_BY_OCTAVE: [i64; 8] = [256, 256, 128, 128, 64, 32, 16, 8];

/// Base frequencies (Hz) of the twelve semitones, for the table pitch mode.
pub const FREQUENCIES_BY_NOTE: [i32; 12] = [262, 277, 294, 311, 330, 349, 370, 392, 415, 440, 466, 494];

/// Per-octave multiplier for the table pitch mode.
pub const OCTAVE_PERIOD: [i32; 8] = [32, 64, 64, 128, 128, 128, 128, 128];

/// Gain a decayed note falls to.
pub const DECAY_TO: f64 = 0.5;

const LAST_OCTAVE: u8 = 7;

/// Output samples per beat: `floor(sample_rate / 1000) * wait`.
///
/// The integer truncation of the sample rate is part of the format's
/// timing and must not be replaced with an exact ratio.
pub fn samples_per_beat(wait: u16, sample_rate: u32) -> i64 {
    (sample_rate / 1000) as i64 * wait as i64
}

/// Convert a beat count to an absolute output-sample offset.
pub fn beat_to_sample(beat: i64, wait: u16, sample_rate: u32) -> i64 {
    beat * samples_per_beat(wait, sample_rate)
}

/// Octave of a raw pitch, clamped to the last octave the tables cover.
pub fn octave(pitch: u8) -> usize {
    (pitch / 12).min(LAST_OCTAVE) as usize
}

/// Melodic note frequency in Hz, with the channel's pitch bend applied.
pub fn frequency(pitch: u8, voice: i16) -> f64 {
    let bend = voice as f64 / PITCH_BEND_NORMALIZATION;
    libm::pow(2.0, (pitch as f64 + bend + 155.376) / 12.0)
}

/// Melodic note frequency from the semitone and octave tables.
pub fn table_frequency(pitch: u8, voice: i16) -> f64 {
    let note = (pitch % 12) as usize;
    (FREQUENCIES_BY_NOTE[note] * OCTAVE_PERIOD[octave(pitch)] + (voice as i32 - 1000)) as f64
}

/// Drum phase increment per output sample.
pub fn drum_advance(pitch: u8, sample_rate: u32) -> f64 {
    (pitch as f64 * 800.0 + 100.0) / sample_rate as f64
}

/// Fixed note length (output samples) on pizzicato channels.
pub fn pi_length(pitch: u8) -> i64 {
    let octave = octave(pitch);
    (octave as i64 + 1) * 4 * WAVE_LENGTH_BY_OCTAVE[octave]
}

/// Linear gain for a raw volume (254 is just under unity).
pub fn volume_scale(volume: u8) -> f64 {
    libm::pow(10.0, ((volume as f64 - 255.0) * 8.0) / 2000.0)
}

/// `(left, right)` gains for a raw pan value.
///
/// Only the side being panned away from is attenuated. The left branch
/// tests the raw `pan` rather than the curve value, so centre (6) lands in
/// it with a curve value of 0 and still yields unity gains.
pub fn pan_gains(pan: u8) -> (f64, f64) {
    let index = (pan as usize).min(PAN_TABLE.len() - 1);
    let value = (PAN_TABLE[index] - 256) * 10;
    if value < 0 {
        (1.0, libm::pow(10.0, value as f64 / 2000.0))
    } else if pan > 0 {
        (libm::pow(10.0, -value as f64 / 2000.0), 1.0)
    } else {
        (1.0, 1.0)
    }
}

/// Linear fade-in over `length` samples from the song's logical start.
///
/// Negative positions (the pre-roll) are silent.
pub fn fade_in(absolute: i64, length: u32) -> f64 {
    if length == 0 || absolute > length as i64 {
        1.0
    } else if absolute <= 0 {
        0.0
    } else {
        absolute as f64 / length as f64
    }
}

/// Attack ramp: rises linearly from 0 to 1 over `cutoff` samples.
pub fn attack_ramp(samples: i64, cutoff: u32) -> f64 {
    if samples > cutoff as i64 {
        1.0
    } else if samples <= 0 {
        0.0
    } else {
        samples as f64 / cutoff as f64
    }
}

/// Release ramp: the attack ramp mirrored onto the end of a note `length` long.
pub fn release_ramp(samples: i64, length: i64, cutoff: u32) -> f64 {
    attack_ramp(length - samples, cutoff)
}

/// Step decay: unity until `fadeoff_over` samples have played, then [`DECAY_TO`].
pub fn decay_ramp(fadeoff_over: i64, samples_played: i64) -> f64 {
    if samples_played > fadeoff_over {
        DECAY_TO
    } else {
        1.0
    }
}

/// Clamp to `[-1, 1]`.
#[inline]
pub fn clamp_unit(v: f64) -> f64 {
    v.clamp(-1.0, 1.0)
}
