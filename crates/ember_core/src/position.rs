//! Integer block positions

use crate::bounds::Aabb;
use core::fmt;
use serde::{Deserialize, Serialize};

/// An integer block coordinate in the world grid
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    /// Create a new block position
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// World-space center of the block's cell
    #[inline]
    pub fn center(&self) -> [f32; 3] {
        [
            self.x as f32 + 0.5,
            self.y as f32 + 0.5,
            self.z as f32 + 0.5,
        ]
    }

    /// The occupancy region of the block's cell
    ///
    /// A fixed 0.5 x 1 x 0.5 box centered on the block; an entity whose
    /// position falls inside it counts as standing on the block.
    #[inline]
    pub fn occupancy_box(&self) -> Aabb {
        Aabb::from_center_half_extents(self.center(), [0.25, 0.5, 0.25])
    }

    /// The position directly above
    #[inline]
    pub const fn above(&self) -> Self {
        Self::new(self.x, self.y + 1, self.z)
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl From<(i32, i32, i32)> for BlockPos {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}
