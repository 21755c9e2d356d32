use std::time::{Duration, Instant};

use log::{debug, trace};

use super::TopologyStats;
use crate::{
    geometry::{
        primitives::Box3,
        traits::{BoundingVolume3, HasScalarType},
    },
    helpers::aliases::Vec3f,
    voxel_tree,
};

type Tree = voxel_tree!(2, 3, 4);

/// Carvable stock volume over a cuboid world. World coordinates are
/// normalized so the longest edge spans `[-1, 1]`; harvest output and the
/// cell lattice live in that frame.
pub struct Topology {
    root: Tree,
    length: f32,
    width: f32,
    height: f32,
    metrics_sink: Option<Box<dyn Fn(Duration) + Send + Sync>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopologyError {
    InvalidDimensions,
}

impl Topology {
    pub fn new(length: f32) -> Result<Self, TopologyError> {
        Self::with_dimensions(length, length, length)
    }

    pub fn with_dimensions(length: f32, width: f32, height: f32) -> Result<Self, TopologyError> {
        if !(length > 0.0 && width > 0.0 && height > 0.0) {
            return Err(TopologyError::InvalidDimensions);
        }

        let mut topology = Self {
            root: Tree::new(),
            length,
            width,
            height,
            metrics_sink: None,
        };
        topology.initialize();

        Ok(topology)
    }

    /// Rebuilds the tree so that exactly the cells inside the world box hold
    /// material
    pub fn initialize(&mut self) {
        let world = self.world_gl();
        self.root.initialize(&world);
        debug!(
            "initialized {}x{}x{} topology",
            self.length, self.width, self.height
        );
    }

    /// Removes the interior of a tool from the stock. `tool_bounds` encloses
    /// the tool in world coordinates and `is_inside` is its exact containment
    /// test; it is called from worker threads and must be pure.
    pub fn subtract<TBounds, TInside>(&mut self, tool_bounds: &TBounds, is_inside: TInside)
    where
        TBounds: BoundingVolume3 + HasScalarType<ScalarType = f32> + Sync,
        TInside: Fn(&Vec3f) -> bool + Sync,
    {
        let start = Instant::now();

        let scale = self.half_max_edge();
        let bounds_gl = tool_bounds.scaled(1.0 / scale);
        let is_inside_gl = |coord: &Vec3f| is_inside(&(coord * scale));

        self.root.subtract(&bounds_gl, &is_inside_gl);

        let elapsed = start.elapsed();
        debug!("subtract took {:?}", elapsed);

        if let Some(sink) = &self.metrics_sink {
            sink(elapsed);
        }
    }

    /// Flattens the surviving cells into parallel (center, edge length)
    /// buffers in the normalized frame
    pub fn harvest(&mut self, coords: &mut Vec<Vec3f>, sizes: &mut Vec<f32>) {
        coords.clear();
        sizes.clear();
        coords.reserve(Tree::harvest_capacity_hint());
        sizes.reserve(Tree::harvest_capacity_hint());

        self.root.harvest(coords, sizes);
        trace!("harvested {} cells", coords.len());
    }

    pub fn stats(&self) -> TopologyStats {
        let mut stats = TopologyStats::default();
        self.root.collect_stats(&mut stats);
        stats
    }

    /// Receives the duration of every subtract call
    pub fn set_metrics_sink<TSink>(&mut self, sink: TSink)
    where
        TSink: Fn(Duration) + Send + Sync + 'static,
    {
        self.metrics_sink = Some(Box::new(sink));
    }

    #[inline]
    pub fn to_gl(&self, coord: &Vec3f) -> Vec3f {
        coord / self.half_max_edge()
    }

    #[inline]
    pub fn from_gl(&self, coord: &Vec3f) -> Vec3f {
        coord * self.half_max_edge()
    }

    #[inline]
    fn half_max_edge(&self) -> f32 {
        self.length.max(self.width).max(self.height) / 2.0
    }

    fn world_gl(&self) -> Box3<f32> {
        let half_extents =
            Vec3f::new(self.length, self.width, self.height) / 2.0 / self.half_max_edge();

        Box3::new(-half_extents, half_extents)
    }
}
