//! Ground band: the floor boundary plus its two scrolling tiles

use serde::{Deserialize, Serialize};

use crate::config::Config;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundBand {
    /// A body's lower edge must stay above this line
    pub y: i32,
    /// Left edges of the two leap-frogging tiles (rendering only)
    pub x1: f32,
    pub x2: f32,
    pub tile_width: f32,
    pub speed: f32,
}

impl GroundBand {
    pub fn new(config: &Config) -> Self {
        let tile_width = config.ground_tile_width as f32;
        Self {
            y: config.ground_y,
            x1: 0.0,
            x2: tile_width,
            tile_width,
            speed: config.ground_speed,
        }
    }

    /// Scroll both tiles; a tile that leaves on the left re-enters after the other
    pub fn advance(&mut self) {
        self.x1 -= self.speed;
        self.x2 -= self.speed;

        if self.x1 + self.tile_width < 0.0 {
            self.x1 = self.x2 + self.tile_width;
        }
        if self.x2 + self.tile_width < 0.0 {
            self.x2 = self.x1 + self.tile_width;
        }
    }

    /// Has an edge at `bottom` crossed below the ground line?
    #[inline]
    pub fn is_below(&self, bottom: f32) -> bool {
        bottom > self.y as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiles_leap_frog() {
        let mut ground = GroundBand::new(&Config::default());
        assert_eq!((ground.x1, ground.x2), (0.0, 672.0));

        // 672 / 5 = 134.4, so the first tile wraps on tick 135
        for _ in 0..135 {
            ground.advance();
        }
        assert_eq!(ground.x2, -3.0);
        assert_eq!(ground.x1, ground.x2 + 672.0);
    }

    #[test]
    fn test_tiles_always_cover_the_world() {
        let config = Config::default();
        let mut ground = GroundBand::new(&config);
        for _ in 0..2000 {
            ground.advance();
            let left = ground.x1.min(ground.x2);
            let right = ground.x1.max(ground.x2) + ground.tile_width;
            assert!(left <= 0.0);
            assert!(right >= config.world_width as f32);
        }
    }

    #[test]
    fn test_boundary() {
        let ground = GroundBand::new(&Config::default());
        assert!(!ground.is_below(730.0));
        assert!(ground.is_below(730.5));
    }
}
