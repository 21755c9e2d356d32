use super::*;
use rayon::prelude::*;

impl<TChild, const BRANCHING: usize, const BRANCHING_TOTAL: usize, const SIZE: usize> TreeNode
    for InternalNode<TChild, BRANCHING, BRANCHING_TOTAL, SIZE>
where
    TChild: TreeNode,
{
    const BRANCHING: usize = BRANCHING;
    const BRANCHING_TOTAL: usize = BRANCHING_TOTAL;
    const SIZE: usize = SIZE;

    #[inline]
    fn new(id: u64) -> Box<Self> {
        Box::new(Self {
            id,
            active: true,
            subdivided: false,
            children: std::array::from_fn(|_| None),
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

    fn subdivide(&mut self) {
        self.subdivided = true;
        let id = self.id;

        let populate = |(index, slot): (usize, &mut Option<Box<TChild>>)| {
            *slot = Some(TChild::new(compose_child_id(id, BRANCHING, index)));
        };

        if Self::PARALLEL {
            self.children.par_iter_mut().enumerate().for_each(populate);
        } else {
            self.children.iter_mut().enumerate().for_each(populate);
        }
    }

    fn initialize(&mut self, world: &Box3<f32>, half_root_edge: u32) {
        self.reset();
        let bbox = self.bbox_gl(half_root_edge);

        if world.contains_box3(&bbox) {
            // Compact solid cell, children stay unallocated
            return;
        }

        if !world.intersects_box3(&bbox) {
            self.active = false;
            return;
        }

        self.subdivide();
        self.initialize_children(world, half_root_edge);
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

        // Checked before subdividing, a fully consumed subtree is dropped whole
        if self.all_vertices_inside(is_inside, half_root_edge) {
            self.active = false;
            self.release_children();
            return;
        }

        if !self.subdivided {
            self.subdivide();
        }

        let visit = |slot: &mut Option<Box<TChild>>| {
            if let Some(child) = slot {
                if child.is_active() {
                    child.subtract(tool_bounds, is_inside, half_root_edge);
                }
            }
        };

        if Self::PARALLEL {
            self.children.par_iter_mut().for_each(visit);
        } else {
            self.children.iter_mut().for_each(visit);
        }
    }

    fn harvest(&mut self, coords: &mut Vec<Vec3f>, sizes: &mut Vec<f32>, half_root_edge: u32) {
        if !self.subdivided {
            coords.push(self.center_gl(half_root_edge));
            sizes.push(Self::edge_length_gl(half_root_edge));
            return;
        }

        for slot in self.children.iter_mut() {
            if let Some(child) = slot {
                if child.is_active() {
                    child.harvest(coords, sizes, half_root_edge);
                } else {
                    *slot = None;
                }
            }
        }
    }

    fn collect_stats(&self, stats: &mut TopologyStats) {
        if !self.subdivided {
            stats.solid_cells += 1;
            stats.material_voxels += 1u64 << (3 * BRANCHING_TOTAL);
            return;
        }

        stats.internal_nodes += 1;

        for child in self.children.iter().flatten() {
            if child.is_active() {
                child.collect_stats(stats);
            }
        }
    }
}
