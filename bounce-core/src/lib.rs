//! Hardware-free logic for the encoder-driven bouncing-ball demo.
//!
//! Everything stateful lives here so it can be exercised on the host:
//!
//! - [`encoder`]: debounced quadrature decoding into a saturating position
//! - [`ball`]: per-frame kinematics and wall reflection
//! - [`melody`]: the boot tune's note table and timing rules
//!
//! The firmware crate binds these to EXTI pins, an SSD1306 panel, and a PWM
//! buzzer on the STM32F103.

#![no_std]

pub mod ball;
pub mod encoder;
pub mod melody;

pub use ball::{Ball, BALL_RADIUS};
pub use encoder::{EncoderState, Line, POSITION_CENTER};
pub use melody::{Note, Pitch, BIRTHDAY, TEMPO_UNIT_MS};
