pub mod box3;
pub mod line_segment3;
pub mod obb3;

pub use box3::Box3;
pub use line_segment3::LineSegment3;
pub use obb3::Obb3;

use super::traits::{BoundingVolume3, HasBBox3, HasScalarType, RealNumber};
use crate::helpers::aliases::Vec3;

/// Bounding volume of a tool sweep, either axis-aligned or oriented
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bounds3<TScalar: RealNumber> {
    Aabb(Box3<TScalar>),
    Obb(Obb3<TScalar>),
}

impl<TScalar: RealNumber> HasScalarType for Bounds3<TScalar> {
    type ScalarType = TScalar;
}

impl<TScalar: RealNumber> HasBBox3 for Bounds3<TScalar> {
    #[inline]
    fn bbox(&self) -> Box3<TScalar> {
        match self {
            Self::Aabb(aabb) => aabb.bbox(),
            Self::Obb(obb) => obb.bbox(),
        }
    }
}

impl<TScalar: RealNumber> BoundingVolume3 for Bounds3<TScalar> {
    #[inline]
    fn contains_point(&self, point: &Vec3<TScalar>) -> bool {
        match self {
            Self::Aabb(aabb) => aabb.contains_point(point),
            Self::Obb(obb) => obb.contains_point(point),
        }
    }

    #[inline]
    fn intersects_box3(&self, bbox: &Box3<TScalar>) -> bool {
        match self {
            Self::Aabb(aabb) => aabb.intersects_box3(bbox),
            Self::Obb(obb) => obb.intersects_box3(bbox),
        }
    }

    #[inline]
    fn scaled(&self, factor: TScalar) -> Self {
        match self {
            Self::Aabb(aabb) => Self::Aabb(aabb.scaled(factor)),
            Self::Obb(obb) => Self::Obb(obb.scaled(factor)),
        }
    }
}

impl<TScalar: RealNumber> From<Box3<TScalar>> for Bounds3<TScalar> {
    #[inline]
    fn from(aabb: Box3<TScalar>) -> Self {
        Self::Aabb(aabb)
    }
}

impl<TScalar: RealNumber> From<Obb3<TScalar>> for Bounds3<TScalar> {
    #[inline]
    fn from(obb: Obb3<TScalar>) -> Self {
        Self::Obb(obb)
    }
}
