pub mod morton;

mod brick;
mod internal_node;
mod root_node;
mod stats;
mod topology;

#[cfg(test)]
mod tests;

pub use brick::*;
pub use internal_node::*;
pub use root_node::*;
pub use stats::*;
pub use topology::*;

use crate::{
    geometry::{
        primitives::Box3,
        traits::{BoundingVolume3, HasScalarType},
    },
    helpers::aliases::{Vec3f, Vec3u},
};

/// A cell of the carving tree. Cell geometry is derived from the morton `id`
/// and the per-level constants; coordinates live on the voxel lattice of the
/// root and are reported in the normalized `[-1, 1]` frame.
pub trait TreeNode: Send {
    /// log2 of the per-axis fanout on this level
    const BRANCHING: usize;
    /// log2 of the node edge length in voxels
    const BRANCHING_TOTAL: usize;
    /// Number of child slots
    const SIZE: usize;

    fn new(id: u64) -> Box<Self>;
    fn id(&self) -> u64;
    fn is_active(&self) -> bool;

    /// Expands the cell into fully populated children
    fn subdivide(&mut self);

    /// Restricts the cell to the part of the world box it overlaps
    fn initialize(&mut self, world: &Box3<f32>, half_root_edge: u32);

    /// Removes the tool interior from the cell
    fn subtract<TBounds, TInside>(
        &mut self,
        tool_bounds: &TBounds,
        is_inside: &TInside,
        half_root_edge: u32,
    ) where
        TBounds: BoundingVolume3 + HasScalarType<ScalarType = f32> + Sync,
        TInside: Fn(&Vec3f) -> bool + Sync;

    /// Flattens surviving cells into (center, edge length) pairs, releasing
    /// empty subtrees along the way
    fn harvest(&mut self, coords: &mut Vec<Vec3f>, sizes: &mut Vec<f32>, half_root_edge: u32);

    fn collect_stats(&self, stats: &mut TopologyStats);

    #[inline]
    fn edge_length() -> u32 {
        1 << Self::BRANCHING_TOTAL
    }

    #[inline]
    fn half_edge_length() -> u32 {
        Self::edge_length() >> 1
    }

    #[inline]
    fn edge_length_gl(half_root_edge: u32) -> f32 {
        Self::edge_length() as f32 / half_root_edge as f32
    }

    #[inline]
    fn child_id(&self, index: usize) -> u64 {
        compose_child_id(self.id(), Self::BRANCHING, index)
    }

    /// Cell center on the voxel lattice of the root
    #[inline]
    fn center(&self) -> Vec3u {
        morton::decode(self.id() << (3 * Self::BRANCHING_TOTAL))
            .add_scalar(Self::half_edge_length())
    }

    #[inline]
    fn center_gl(&self, half_root_edge: u32) -> Vec3f {
        let center = self.center();
        let half = half_root_edge as f32;

        Vec3f::new(
            center.x as f32 / half - 1.0,
            center.y as f32 / half - 1.0,
            center.z as f32 / half - 1.0,
        )
    }

    #[inline]
    fn bbox_gl(&self, half_root_edge: u32) -> Box3<f32> {
        Box3::from_center_and_half_size(
            self.center_gl(half_root_edge),
            Self::edge_length_gl(half_root_edge) / 2.0,
        )
    }

    fn all_vertices_inside<TInside>(&self, is_inside: &TInside, half_root_edge: u32) -> bool
    where
        TInside: Fn(&Vec3f) -> bool,
    {
        let bbox = self.bbox_gl(half_root_edge);
        (0..8u8).all(|i| is_inside(&bbox.vertex(i)))
    }
}

/// Child keys concatenate the local index onto the parent key
#[inline]
pub const fn compose_child_id(parent_id: u64, branching: usize, index: usize) -> u64 {
    (parent_id << (3 * branching)) | index as u64
}

pub const fn brick_size(branching: usize) -> usize {
    1 << (3 * branching)
}

pub const fn brick_word_count(branching: usize) -> usize {
    let words = brick_size(branching) / u64::BITS as usize;

    if words == 0 {
        1
    } else {
        words
    }
}

pub const fn internal_node_size(branching: usize) -> usize {
    1 << (3 * branching)
}

pub const fn internal_node_branching<TChild: TreeNode>(branching: usize) -> usize {
    let total = branching + TChild::BRANCHING_TOTAL;
    assert!(3 * total < 64, "voxel tree deeper than the morton key range");
    total
}

#[macro_export]
macro_rules! brick_type {
    ($branching:expr) => {
        $crate::topology::Brick<
            $branching,
            { $crate::topology::brick_size($branching) },
            { $crate::topology::brick_word_count($branching) },
        >
    };
}

/// Assembles a tree type from per-level branching factors, root level first:
/// `voxel_tree!(2, 3, 4)` is a root with 64 children, each an internal node
/// with 512 brick children of 4096 voxels.
#[macro_export]
macro_rules! voxel_tree {
    (@node $branching:expr) => { $crate::brick_type!($branching) };

    (@node $branching:expr, $($rest:expr),+) => {
        $crate::topology::InternalNode<
            $crate::voxel_tree!(@node $($rest),+),
            $branching,
            { $crate::topology::internal_node_branching::<$crate::voxel_tree!(@node $($rest),+)>($branching) },
            { $crate::topology::internal_node_size($branching) },
        >
    };

    ($branching:expr, $($rest:expr),+ $(,)?) => {
        $crate::topology::RootNode<
            $crate::voxel_tree!(@node $($rest),+),
            $branching,
            { $crate::topology::internal_node_branching::<$crate::voxel_tree!(@node $($rest),+)>($branching) },
            { $crate::topology::internal_node_size($branching) },
        >
    };
}
