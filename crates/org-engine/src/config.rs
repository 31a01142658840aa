//! Engine tuning constants.

/// Tunables for [`Engine`](crate::Engine). None of these come from the song
/// file; the defaults match the reference player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineConfig {
    /// Samples of silence rendered before the song's first sample
    pub pre_roll: u32,
    /// Gain applied to each channel before mixing, so 16 channels don't clip
    pub channel_prescale: f64,
    /// Length of the global fade-in, repeated after every loop
    pub fade_in: u32,
    /// Apply the attack/release click-suppression envelope
    pub envelope: bool,
    /// Envelope ramp length on melodic channels
    pub melodic_cutoff: u32,
    /// Envelope ramp length on drum channels
    pub drum_cutoff: u32,
    /// Audible samples per note on pizzicato channels
    pub pi_cap: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pre_roll: 4000,
            channel_prescale: 1.0 / 3.0,
            fade_in: 1000,
            envelope: true,
            melodic_cutoff: 50,
            drum_cutoff: 15,
            pi_cap: 1024,
        }
    }
}

impl EngineConfig {
    /// Start the song immediately, with no lead-in.
    pub fn without_pre_roll(self) -> Self {
        Self { pre_roll: 0, ..self }
    }

    /// Envelope cutoff for a melodic or drum channel.
    pub fn cutoff(&self, drum: bool) -> u32 {
        if drum {
            self.drum_cutoff
        } else {
            self.melodic_cutoff
        }
    }
}
