mod tree_node;

use super::*;

pub(super) const WORD_BITS: usize = u64::BITS as usize;

/// Leaf cell storing its voxels as a fixed array of 64-bit masks. A missing
/// word stands for 64 absent voxels, either never populated or reclaimed.
#[derive(Debug)]
pub struct Brick<const BRANCHING: usize, const SIZE: usize, const WORD_COUNT: usize> {
    id: u64,
    active: bool,
    subdivided: bool,
    words: [Option<u64>; WORD_COUNT],
}

impl<const BRANCHING: usize, const SIZE: usize, const WORD_COUNT: usize>
    Brick<BRANCHING, SIZE, WORD_COUNT>
{
    pub(super) const PARALLEL: bool = WORD_COUNT >= 64;

    /// All voxels of one word present; masks the tail of bricks smaller than
    /// one word
    const FULL_WORD: u64 = if SIZE >= WORD_BITS {
        u64::MAX
    } else {
        (1 << SIZE) - 1
    };

    pub(super) fn reset(&mut self) {
        self.words = [None; WORD_COUNT];
        self.active = true;
        self.subdivided = false;
    }

    #[inline]
    fn voxel_center_gl(voxel_key: u64, half_root_edge: u32) -> Vec3f {
        let coord = morton::decode(voxel_key);
        let half = half_root_edge as f32;

        Vec3f::new(
            (coord.x as f32 + 0.5) / half - 1.0,
            (coord.y as f32 + 0.5) / half - 1.0,
            (coord.z as f32 + 0.5) / half - 1.0,
        )
    }

    #[inline]
    fn voxel_edge_gl(half_root_edge: u32) -> f32 {
        1.0 / half_root_edge as f32
    }
}
