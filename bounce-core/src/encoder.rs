//! Quadrature encoder state tracking with software debounce.
//!
//! A mechanical rotary encoder produces two phase-offset signals. On every
//! edge of either line the owning context re-samples its line and feeds the
//! settled level into [`EncoderState::edge`], which rejects bounce artifacts,
//! records the new level, and steps the saturating position counter:
//!
//! - Line A newly high while B is low: A led B, clockwise, position += 3
//! - Line B newly high while A is low: B led A, counter-clockwise, position -= 3
//!
//! Debounce uses a single shared `settling` flag rather than one flag per
//! line. The frame loop re-arms it every frame; whichever line fires first
//! waits out the settle delay and clears it, so a near-simultaneous edge on
//! the other line skips its own wait. The flag is not a mutual-exclusion
//! guarantee between the two lines and must not be treated as one; a
//! low-speed mechanical encoder never produces edges fast enough for the gap
//! to matter.

/// Position change per genuine detent edge.
pub const CLICK_STEP: u8 = 3;

/// Rest value of the counter; the ball is stationary here.
pub const POSITION_CENTER: u8 = 128;

/// Which encoder line an edge arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Line {
    A,
    B,
}

/// Debounced levels of both encoder lines plus the saturating position.
#[derive(Clone)]
#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct EncoderState {
    a_level: bool,
    b_level: bool,
    position: u8,
    settling: bool,
}

impl EncoderState {
    /// Both lines idle high (pull-ups), position at center, settle armed.
    pub const fn new() -> Self {
        Self {
            a_level: true,
            b_level: true,
            position: POSITION_CENTER,
            settling: true,
        }
    }

    /// Whether the next edge should wait out the settle delay before
    /// re-sampling its line.
    pub fn needs_settle(&self) -> bool {
        self.settling
    }

    /// Re-arm the settle gate. Called once per animation frame.
    pub fn arm_debounce(&mut self) {
        self.settling = true;
    }

    /// Apply a debounced edge. `level` is the line's re-sampled logic level.
    ///
    /// Returns the position after the event, or `None` for a bounce artifact
    /// (the re-sampled level matches the recorded one). A bounce leaves all
    /// state untouched, including the settle flag.
    pub fn edge(&mut self, line: Line, level: bool) -> Option<u8> {
        match line {
            Line::A => {
                if level == self.a_level {
                    return None;
                }
                self.a_level = level;
                if self.a_level && !self.b_level {
                    self.position = self.position.saturating_add(CLICK_STEP);
                }
            }
            Line::B => {
                if level == self.b_level {
                    return None;
                }
                self.b_level = level;
                if self.b_level && !self.a_level {
                    self.position = self.position.saturating_sub(CLICK_STEP);
                }
            }
        }
        self.settling = false;
        Some(self.position)
    }

    /// Current saturating position in [0, 255].
    pub fn position(&self) -> u8 {
        self.position
    }
}

impl Default for EncoderState {
    fn default() -> Self {
        Self::new()
    }
}
