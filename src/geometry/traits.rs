use crate::helpers::aliases::Vec3;
use num_traits::{Float, NumCast};
use simba::scalar::RealField;

use super::primitives::box3::Box3;

pub trait Number: nalgebra_glm::Number + NumCast + PartialOrd {}

impl<T> Number for T where T: nalgebra_glm::Number + NumCast + PartialOrd {}

pub trait RealNumber: Number + Float + RealField {}

impl<T> RealNumber for T where T: Number + Float + RealField {}

pub trait HasScalarType {
    type ScalarType: Number;
}

/// 3D bounding box
pub trait HasBBox3: HasScalarType {
    fn bbox(&self) -> Box3<Self::ScalarType>;
}

pub trait ClosestPoint3: HasScalarType {
    /// Returns closest point on the shape to the given point
    fn closest_point(&self, point: &Vec3<Self::ScalarType>) -> Vec3<Self::ScalarType>;
}

/// Convex volume usable as a carving tool boundary. `scaled` is a uniform
/// scale about the origin, used to map world shapes into the normalized frame.
pub trait BoundingVolume3: HasBBox3 {
    fn contains_point(&self, point: &Vec3<Self::ScalarType>) -> bool;
    fn intersects_box3(&self, bbox: &Box3<Self::ScalarType>) -> bool;
    fn scaled(&self, factor: Self::ScalarType) -> Self;
}
