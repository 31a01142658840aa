//! Audio frame type.

/// A stereo audio frame, each side in `[-1, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Frame {
    pub left: f32,
    pub right: f32,
}

impl Frame {
    /// Create a silent frame.
    pub const fn silence() -> Self {
        Self { left: 0.0, right: 0.0 }
    }

    pub fn is_silent(&self) -> bool {
        self.left == 0.0 && self.right == 0.0
    }

    /// Larger of the two sides' magnitudes.
    pub fn peak(&self) -> f32 {
        libm::fabsf(self.left).max(libm::fabsf(self.right))
    }
}
