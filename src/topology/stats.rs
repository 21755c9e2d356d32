use std::fmt::Display;

use tabled::{Table, Tabled};

/// Occupancy snapshot of a carving tree. Undivided cells count their full
/// voxel capacity, so `material_voxels` is the exact amount of remaining
/// material and never grows under subtraction.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Tabled)]
pub struct TopologyStats {
    pub internal_nodes: u64,
    pub bricks: u64,
    pub allocated_words: u64,
    pub solid_cells: u64,
    pub material_voxels: u64,
}

impl Display for TopologyStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Table::new(std::iter::once(*self)))
    }
}
