use super::*;
use rayon::prelude::*;

impl<const BRANCHING: usize, const SIZE: usize, const WORD_COUNT: usize> TreeNode
    for Brick<BRANCHING, SIZE, WORD_COUNT>
{
    const BRANCHING: usize = BRANCHING;
    const BRANCHING_TOTAL: usize = BRANCHING;
    const SIZE: usize = SIZE;

    #[inline]
    fn new(id: u64) -> Box<Self> {
        Box::new(Self {
            id,
            active: true,
            subdivided: false,
            words: [None; WORD_COUNT],
        })
    }

    #[inline]
    fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    fn subdivide(&mut self) {
        self.subdivided = true;
        self.words = [Some(Self::FULL_WORD); WORD_COUNT];
    }

    fn initialize(&mut self, world: &Box3<f32>, half_root_edge: u32) {
        self.reset();
        let bbox = self.bbox_gl(half_root_edge);

        if world.contains_box3(&bbox) {
            // Compact solid cell, no words allocated
            return;
        }

        if !world.intersects_box3(&bbox) {
            self.active = false;
            return;
        }

        self.subdivide();
        let id = self.id;

        let clip = |(index, slot): (usize, &mut Option<u64>)| {
            if let Some(word) = slot {
                for bit in 0..WORD_BITS {
                    if *word & (1u64 << bit) != 0 {
                        let voxel_key = compose_child_id(id, BRANCHING, index * WORD_BITS + bit);
                        let center = Self::voxel_center_gl(voxel_key, half_root_edge);

                        if !world.contains_point(&center) {
                            *word &= !(1u64 << bit);
                        }
                    }
                }
            }
        };

        if Self::PARALLEL {
            self.words.par_iter_mut().enumerate().for_each(clip);
        } else {
            self.words.iter_mut().enumerate().for_each(clip);
        }
    }

    fn subtract<TBounds, TInside>(
        &mut self,
        tool_bounds: &TBounds,
        is_inside: &TInside,
        half_root_edge: u32,
    ) where
        TBounds: BoundingVolume3 + HasScalarType<ScalarType = f32> + Sync,
        TInside: Fn(&Vec3f) -> bool + Sync,
    {
        if !tool_bounds.intersects_box3(&self.bbox_gl(half_root_edge)) {
            return;
        }

        if !self.subdivided {
            self.subdivide();
        }

        let id = self.id;

        let carve = |(index, slot): (usize, &mut Option<u64>)| {
            match slot {
                None => {}
                Some(0) => *slot = None,
                Some(word) => {
                    for bit in 0..WORD_BITS {
                        if *word & (1u64 << bit) != 0 {
                            let voxel_key =
                                compose_child_id(id, BRANCHING, index * WORD_BITS + bit);

                            if is_inside(&Self::voxel_center_gl(voxel_key, half_root_edge)) {
                                *word &= !(1u64 << bit);
                            }
                        }
                    }
                }
            }
        };

        if Self::PARALLEL {
            self.words.par_iter_mut().enumerate().for_each(carve);
        } else {
            self.words.iter_mut().enumerate().for_each(carve);
        }
    }

    fn harvest(&mut self, coords: &mut Vec<Vec3f>, sizes: &mut Vec<f32>, half_root_edge: u32) {
        if !self.subdivided {
            coords.push(self.center_gl(half_root_edge));
            sizes.push(Self::edge_length_gl(half_root_edge));
            return;
        }

        for (index, slot) in self.words.iter_mut().enumerate() {
            match slot {
                None => {}
                Some(0) => *slot = None,
                Some(word) => {
                    for bit in 0..WORD_BITS {
                        if *word & (1u64 << bit) != 0 {
                            let voxel_key =
                                compose_child_id(self.id, BRANCHING, index * WORD_BITS + bit);

                            coords.push(Self::voxel_center_gl(voxel_key, half_root_edge));
                            sizes.push(Self::voxel_edge_gl(half_root_edge));
                        }
                    }
                }
            }
        }
    }

    fn collect_stats(&self, stats: &mut TopologyStats) {
        if !self.subdivided {
            stats.solid_cells += 1;
            stats.material_voxels += SIZE as u64;
            return;
        }

        stats.bricks += 1;

        for word in self.words.iter().flatten() {
            stats.allocated_words += 1;
            stats.material_voxels += word.count_ones() as u64;
        }
    }
}
