//! The flap demo: a bird holding position while the background scrolls.

use crate::compute::background_offset;
use crate::geometry::Vec2;

/// Background scroll per frame, in playfield pixels.
pub const SCROLL_STEP: u64 = 5;
/// Animation frames in the wing-beat cycle.
pub const BIRD_FRAMES: usize = 6;
pub const FLAP_FPS: u32 = 30;
pub const FLAP_WIDTH: f32 = 800.0;
pub const FLAP_HEIGHT: f32 = 600.0;
/// Width of one background tile; tiles alternate plain and mirrored.
pub const TILE_WIDTH: f32 = 1600.0;
pub const BIRD_POSITION: Vec2 = Vec2 { x: 300.0, y: 200.0 };

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlapState {
    pub tick: u64,
}

impl FlapState {
    pub fn advance(&self) -> FlapState {
        FlapState {
            tick: self.tick + 1,
        }
    }

    pub fn bird_frame(&self) -> usize {
        (self.tick % BIRD_FRAMES as u64) as usize
    }

    pub fn scroll_offset(&self) -> f32 {
        background_offset(self.tick, SCROLL_STEP)
    }
}
