//! Bouncing-ball kinematics for a 128x64 panel.
//!
//! Speed comes from the encoder position: full clockwise deflection (255)
//! gives +14 px per frame, full counter-clockwise (0) gives -14, center (128)
//! is stationary. The same signed speed feeds both axes, so the ball always
//! travels diagonally with its pace proportional to the deflection. A
//! negative speed moves the ball against its current direction signs.

use crate::encoder::POSITION_CENTER;

/// Radius of the drawn ball, also used for the wall collision box.
pub const BALL_RADIUS: i32 = 4;

/// Panel-edge margins the ball reflects inside.
pub const LEFT_LIMIT: i32 = 4;
pub const RIGHT_LIMIT: i32 = 124;
pub const TOP_LIMIT: i32 = 4;
pub const BOTTOM_LIMIT: i32 = 59;

/// Pixels per frame at full encoder deflection.
const MAX_SPEED: f32 = 14.0;

/// Widest deviation the position counter can reach from its center.
const ENCODER_SWING: f32 = 128.0;

/// Signed speed in pixels per frame for an encoder position.
pub fn speed_for(position: u8) -> f32 {
    (position as f32 - POSITION_CENTER as f32) * (MAX_SPEED / ENCODER_SWING)
}

/// Ball position and travel direction, advanced once per frame.
#[derive(Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Ball {
    pub x: i32,
    pub y: i32,
    pub x_dir: i32,
    pub y_dir: i32,
}

impl Ball {
    /// Ball at the panel center, heading down-right.
    pub const fn new() -> Self {
        Self {
            x: 64,
            y: 32,
            x_dir: 1,
            y_dir: 1,
        }
    }

    /// Advance one frame: move by the speed derived from `position`, then
    /// flip direction on any axis whose bounding box crossed a panel edge.
    pub fn step(&mut self, position: u8) {
        let speed = speed_for(position) as i32;
        self.x += speed * self.x_dir;
        self.y += speed * self.y_dir;

        if self.x + BALL_RADIUS > RIGHT_LIMIT || self.x - BALL_RADIUS < LEFT_LIMIT {
            self.x_dir = -self.x_dir;
        }
        if self.y + BALL_RADIUS > BOTTOM_LIMIT || self.y - BALL_RADIUS < TOP_LIMIT {
            self.y_dir = -self.y_dir;
        }
    }
}

impl Default for Ball {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_position_leaves_ball_unmoved() {
        assert_eq!(speed_for(POSITION_CENTER), 0.0);

        let mut ball = Ball::new();
        let before = ball.clone();
        ball.step(POSITION_CENTER);
        assert_eq!(ball, before);
    }

    #[test]
    fn speed_scales_linearly_with_deflection() {
        assert_eq!(speed_for(255) as i32, 13);
        assert_eq!(speed_for(0) as i32, -14);
        assert_eq!(speed_for(POSITION_CENTER + 64) as i32, 7);
        assert_eq!(speed_for(POSITION_CENTER - 64) as i32, -7);
    }

    #[test]
    fn full_deflection_moves_diagonally() {
        let mut ball = Ball::new();
        ball.step(255);
        assert_eq!((ball.x, ball.y), (64 + 13, 32 + 13));
    }

    #[test]
    fn sub_center_position_moves_against_direction() {
        let mut ball = Ball::new();
        ball.step(POSITION_CENTER - 64);
        assert_eq!((ball.x, ball.y), (64 - 7, 32 - 7));
        assert_eq!((ball.x_dir, ball.y_dir), (1, 1));
    }

    #[test]
    fn right_wall_flips_x_direction_only() {
        let mut ball = Ball {
            x: RIGHT_LIMIT - BALL_RADIUS + 1,
            y: 32,
            x_dir: 1,
            y_dir: 1,
        };
        ball.step(POSITION_CENTER);
        assert_eq!(ball.x_dir, -1);
        assert_eq!(ball.y_dir, 1);
    }

    #[test]
    fn left_wall_flips_x_direction_only() {
        let mut ball = Ball {
            x: LEFT_LIMIT + BALL_RADIUS - 1,
            y: 32,
            x_dir: -1,
            y_dir: 1,
        };
        ball.step(POSITION_CENTER);
        assert_eq!(ball.x_dir, 1);
        assert_eq!(ball.y_dir, 1);
    }

    #[test]
    fn bottom_wall_flips_y_direction_only() {
        let mut ball = Ball {
            x: 64,
            y: BOTTOM_LIMIT - BALL_RADIUS + 1,
            x_dir: 1,
            y_dir: 1,
        };
        ball.step(POSITION_CENTER);
        assert_eq!(ball.x_dir, 1);
        assert_eq!(ball.y_dir, -1);
    }

    #[test]
    fn top_wall_flips_y_direction_only() {
        let mut ball = Ball {
            x: 64,
            y: TOP_LIMIT + BALL_RADIUS - 1,
            x_dir: 1,
            y_dir: -1,
        };
        ball.step(POSITION_CENTER);
        assert_eq!(ball.x_dir, 1);
        assert_eq!(ball.y_dir, 1);
    }

    #[test]
    fn ball_keeps_bouncing_between_walls() {
        let mut ball = Ball::new();
        // Run at full speed for a while; the ball must stay near the panel
        // (one overshoot step past a limit is possible before the flip).
        for _ in 0..500 {
            ball.step(255);
            assert!(ball.x > LEFT_LIMIT - 2 * BALL_RADIUS - 14);
            assert!(ball.x < RIGHT_LIMIT + 2 * BALL_RADIUS + 14);
            assert!(ball.y > TOP_LIMIT - 2 * BALL_RADIUS - 14);
            assert!(ball.y < BOTTOM_LIMIT + 2 * BALL_RADIUS + 14);
        }
    }
}
