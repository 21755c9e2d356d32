mod tree_node;

use super::*;
use rayon::prelude::*;

/// Non-leaf cell owning up to `2^(3 * BRANCHING)` children addressed by the
/// low bits of their morton keys. An empty slot is a child that was never
/// populated or has been reclaimed.
#[derive(Debug)]
pub struct InternalNode<
    TChild: TreeNode,
    const BRANCHING: usize,
    const BRANCHING_TOTAL: usize,
    const SIZE: usize,
> {
    id: u64,
    active: bool,
    subdivided: bool,
    children: [Option<Box<TChild>>; SIZE],
}

impl<TChild, const BRANCHING: usize, const BRANCHING_TOTAL: usize, const SIZE: usize>
    InternalNode<TChild, BRANCHING, BRANCHING_TOTAL, SIZE>
where
    TChild: TreeNode,
{
    pub(super) const PARALLEL: bool = SIZE >= 64;

    pub(super) fn reset(&mut self) {
        self.release_children();
        self.active = true;
    }

    pub(super) fn release_children(&mut self) {
        for slot in self.children.iter_mut() {
            *slot = None;
        }

        self.subdivided = false;
    }

    pub(super) fn initialize_children(&mut self, world: &Box3<f32>, half_root_edge: u32) {
        let visit = |slot: &mut Option<Box<TChild>>| {
            if let Some(child) = slot {
                child.initialize(world, half_root_edge);
            }
        };

        if Self::PARALLEL {
            self.children.par_iter_mut().for_each(visit);
        } else {
            self.children.iter_mut().for_each(visit);
        }
    }
}
