use super::*;

/// Fixed-origin top of the tree, always subdivided so the world is never
/// reported as a single cell.
#[derive(Debug)]
pub struct RootNode<
    TChild: TreeNode,
    const BRANCHING: usize,
    const BRANCHING_TOTAL: usize,
    const SIZE: usize,
> {
    node: Box<InternalNode<TChild, BRANCHING, BRANCHING_TOTAL, SIZE>>,
}

impl<TChild, const BRANCHING: usize, const BRANCHING_TOTAL: usize, const SIZE: usize>
    RootNode<TChild, BRANCHING, BRANCHING_TOTAL, SIZE>
where
    TChild: TreeNode,
{
    pub fn new() -> Self {
        let mut node = InternalNode::new(0);
        node.subdivide();

        Self { node }
    }

    #[inline]
    pub const fn edge_length() -> u32 {
        1 << BRANCHING_TOTAL
    }

    #[inline]
    pub const fn half_edge_length() -> u32 {
        Self::edge_length() >> 1
    }

    /// Pre-sizing hint for harvest output buffers
    #[inline]
    pub const fn harvest_capacity_hint() -> usize {
        1 << (BRANCHING + TChild::BRANCHING)
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.node.is_active()
    }

    pub fn initialize(&mut self, world: &Box3<f32>) {
        self.node.reset();
        self.node.subdivide();
        self.node
            .initialize_children(world, Self::half_edge_length());
    }

    pub fn subtract<TBounds, TInside>(&mut self, tool_bounds: &TBounds, is_inside: &TInside)
    where
        TBounds: BoundingVolume3 + HasScalarType<ScalarType = f32> + Sync,
        TInside: Fn(&Vec3f) -> bool + Sync,
    {
        if !self.node.is_active() {
            // Everything is already carved away
            return;
        }

        self.node
            .subtract(tool_bounds, is_inside, Self::half_edge_length());
    }

    pub fn harvest(&mut self, coords: &mut Vec<Vec3f>, sizes: &mut Vec<f32>) {
        if !self.node.is_active() {
            return;
        }

        self.node.harvest(coords, sizes, Self::half_edge_length());
    }

    pub fn collect_stats(&self, stats: &mut TopologyStats) {
        if self.node.is_active() {
            self.node.collect_stats(stats);
        }
    }
}

impl<TChild, const BRANCHING: usize, const BRANCHING_TOTAL: usize, const SIZE: usize> Default
    for RootNode<TChild, BRANCHING, BRANCHING_TOTAL, SIZE>
where
    TChild: TreeNode,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
