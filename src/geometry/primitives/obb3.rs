use num_traits::{cast, Float};

use super::box3::Box3;
use crate::{
    geometry::traits::{BoundingVolume3, HasBBox3, HasScalarType, RealNumber},
    helpers::aliases::Vec3,
};

/// 3D oriented bounding box described by its center and three mutually
/// orthogonal half-extent axes (axis direction times half-size).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obb3<TScalar: RealNumber> {
    center: Vec3<TScalar>,
    axes: [Vec3<TScalar>; 3],
}

impl<TScalar: RealNumber> Obb3<TScalar> {
    #[inline]
    pub fn new(
        center: Vec3<TScalar>,
        axis_x: Vec3<TScalar>,
        axis_y: Vec3<TScalar>,
        axis_z: Vec3<TScalar>,
    ) -> Self {
        Self {
            center,
            axes: [axis_x, axis_y, axis_z],
        }
    }

    #[inline]
    pub fn center(&self) -> &Vec3<TScalar> {
        &self.center
    }

    #[inline]
    pub fn axis(&self, i: usize) -> &Vec3<TScalar> {
        &self.axes[i]
    }

    fn unit_axes_and_extents(&self) -> ([Vec3<TScalar>; 3], [TScalar; 3]) {
        let extents = [self.axes[0].norm(), self.axes[1].norm(), self.axes[2].norm()];
        let units = [
            self.axes[0] / extents[0],
            self.axes[1] / extents[1],
            self.axes[2] / extents[2],
        ];

        (units, extents)
    }
}

impl<TScalar: RealNumber> HasScalarType for Obb3<TScalar> {
    type ScalarType = TScalar;
}

impl<TScalar: RealNumber> HasBBox3 for Obb3<TScalar> {
    fn bbox(&self) -> Box3<TScalar> {
        let half_size = Vec3::new(
            Float::abs(self.axes[0].x) + Float::abs(self.axes[1].x) + Float::abs(self.axes[2].x),
            Float::abs(self.axes[0].y) + Float::abs(self.axes[1].y) + Float::abs(self.axes[2].y),
            Float::abs(self.axes[0].z) + Float::abs(self.axes[1].z) + Float::abs(self.axes[2].z),
        );

        Box3::new(self.center - half_size, self.center + half_size)
    }
}

impl<TScalar: RealNumber> BoundingVolume3 for Obb3<TScalar> {
    fn contains_point(&self, point: &Vec3<TScalar>) -> bool {
        let d = point - self.center;

        for axis in &self.axes {
            let extent = axis.norm();

            if Float::abs(d.dot(axis)) > extent * extent {
                return false;
            }
        }

        true
    }

    /// Separating axis test over the 15 candidate axes of an OBB/AABB pair.
    fn intersects_box3(&self, bbox: &Box3<TScalar>) -> bool {
        let (units, extents) = self.unit_axes_and_extents();
        let box_half = bbox.half_size();
        let d = self.center - bbox.center();

        let world_axes = [
            Vec3::new(TScalar::one(), TScalar::zero(), TScalar::zero()),
            Vec3::new(TScalar::zero(), TScalar::one(), TScalar::zero()),
            Vec3::new(TScalar::zero(), TScalar::zero(), TScalar::one()),
        ];

        let mut candidates = [Vec3::zeros(); 15];
        candidates[..3].copy_from_slice(&world_axes);
        candidates[3..6].copy_from_slice(&units);

        for i in 0..3 {
            for j in 0..3 {
                candidates[6 + i * 3 + j] = world_axes[i].cross(&units[j]);
            }
        }

        let epsilon: TScalar = cast(1e-6).unwrap();

        for axis in &candidates {
            if axis.norm_squared() < epsilon {
                // Cross product of near-parallel axes, covered by the parent axes
                continue;
            }

            let box_radius = box_half.x * Float::abs(axis.x)
                + box_half.y * Float::abs(axis.y)
                + box_half.z * Float::abs(axis.z);
            let obb_radius = extents[0] * Float::abs(axis.dot(&units[0]))
                + extents[1] * Float::abs(axis.dot(&units[1]))
                + extents[2] * Float::abs(axis.dot(&units[2]));

            if Float::abs(d.dot(axis)) > box_radius + obb_radius {
                return false;
            }
        }

        true
    }

    #[inline]
    fn scaled(&self, factor: TScalar) -> Self {
        Self {
            center: self.center * factor,
            axes: [
                self.axes[0] * factor,
                self.axes[1] * factor,
                self.axes[2] * factor,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::aliases::Vec3f;

    fn axis_aligned_obb(center: Vec3f, half: f32) -> Obb3<f32> {
        Obb3::new(
            center,
            Vec3f::new(half, 0.0, 0.0),
            Vec3f::new(0.0, half, 0.0),
            Vec3f::new(0.0, 0.0, half),
        )
    }

    fn rotated_obb(center: Vec3f, half: f32) -> Obb3<f32> {
        // Rotated 45 degrees around z
        let s = std::f32::consts::FRAC_1_SQRT_2 * half;
        Obb3::new(
            center,
            Vec3f::new(s, s, 0.0),
            Vec3f::new(-s, s, 0.0),
            Vec3f::new(0.0, 0.0, half),
        )
    }

    #[test]
    fn test_contains_point() {
        let obb = rotated_obb(Vec3f::zeros(), 1.0);

        assert!(obb.contains_point(&Vec3f::zeros()));
        assert!(obb.contains_point(&Vec3f::new(0.0, std::f32::consts::SQRT_2 - 0.01, 0.0)));
        assert!(!obb.contains_point(&Vec3f::new(1.0, 1.0, 0.0)));
        assert!(!obb.contains_point(&Vec3f::new(0.0, 0.0, 1.1)));
    }

    #[test]
    fn test_intersects_box3_axis_aligned() {
        let obb = axis_aligned_obb(Vec3f::new(2.0, 0.0, 0.0), 1.0);
        let near = Box3::new(Vec3f::new(0.5, -0.5, -0.5), Vec3f::new(1.5, 0.5, 0.5));
        let far = Box3::new(Vec3f::new(-1.0, -1.0, -1.0), Vec3f::new(0.5, 1.0, 1.0));

        assert!(obb.intersects_box3(&near));
        assert!(!obb.intersects_box3(&far));
    }

    #[test]
    fn test_intersects_box3_rotated_corner_gap() {
        // The rotated box misses the AABB corner even though their
        // axis-aligned extents overlap
        let obb = rotated_obb(Vec3f::new(2.0, 2.0, 0.0), 1.0);
        let bbox = Box3::new(Vec3f::new(-1.0, -1.0, -1.0), Vec3f::new(1.0, 1.0, 1.0));

        assert!(!obb.intersects_box3(&bbox));

        let touching = rotated_obb(Vec3f::new(1.5, 1.5, 0.0), 1.0);
        assert!(touching.intersects_box3(&bbox));
    }

    #[test]
    fn test_bbox_encloses_vertices() {
        let obb = rotated_obb(Vec3f::new(1.0, -1.0, 0.5), 1.0);
        let bbox = obb.bbox();
        let s = std::f32::consts::SQRT_2 * 0.999;

        assert!(bbox.contains_point(&(obb.center() + Vec3f::new(s, 0.0, 0.999))));
        assert!(bbox.contains_point(&(obb.center() - Vec3f::new(0.0, s, 0.999))));
        assert!(!bbox.contains_point(&(obb.center() + Vec3f::new(2.0, 0.0, 0.0))));
    }
}
