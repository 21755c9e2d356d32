use nalgebra_glm::{max2, min2};
use num_traits::cast;

use crate::{
    geometry::traits::{BoundingVolume3, ClosestPoint3, HasBBox3, HasScalarType, Number, RealNumber},
    helpers::aliases::Vec3,
};

/// 3D axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Box3<TScalar: Number> {
    min: Vec3<TScalar>,
    max: Vec3<TScalar>,
}

impl<TScalar: Number> Box3<TScalar> {
    #[inline]
    pub fn new(min: Vec3<TScalar>, max: Vec3<TScalar>) -> Self {
        debug_assert!(min <= max, "inverted box");
        Self { min, max }
    }

    #[inline]
    pub fn min(&self) -> &Vec3<TScalar> {
        &self.min
    }

    #[inline]
    pub fn max(&self) -> &Vec3<TScalar> {
        &self.max
    }

    #[inline]
    pub fn size_x(&self) -> TScalar {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn size_y(&self) -> TScalar {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn size_z(&self) -> TScalar {
        self.max.z - self.min.z
    }

    #[inline]
    pub fn volume(&self) -> TScalar {
        self.size_x() * self.size_y() * self.size_z()
    }

    /// Returns the ith box vertex in order: (x,y,z),(X,y,z),(x,Y,z),(X,Y,z),(x,y,Z),(X,y,Z),(x,Y,Z),(X,Y,Z)
    #[inline]
    pub fn vertex(&self, i: u8) -> Vec3<TScalar> {
        Vec3::new(
            self.min.x + cast::<_, TScalar>(i % 2).unwrap() * self.size_x(),
            self.min.y + cast::<_, TScalar>((i / 2) % 2).unwrap() * self.size_y(),
            self.min.z + cast::<_, TScalar>(if i > 3 { 1 } else { 0 }).unwrap() * self.size_z(),
        )
    }

    /// Inclusive at boundaries
    #[inline]
    pub fn contains_box3(&self, other: &Self) -> bool {
        self.min <= other.min && other.max <= self.max
    }

    pub fn squared_distance(&self, point: &Vec3<TScalar>) -> TScalar {
        let mut sq_distance = TScalar::zero();

        for i in 0..3 {
            let v = point[i];

            if v < self.min[i] {
                sq_distance += (self.min[i] - v) * (self.min[i] - v);
            }

            if v > self.max[i] {
                sq_distance += (v - self.max[i]) * (v - self.max[i]);
            }
        }

        sq_distance
    }
}

impl<TScalar: RealNumber> Box3<TScalar> {
    #[inline]
    pub fn from_center_and_half_size(center: Vec3<TScalar>, half_size: TScalar) -> Self {
        Self {
            min: center.add_scalar(-half_size),
            max: center.add_scalar(half_size),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec3<TScalar> {
        (self.min + self.max) * cast::<_, TScalar>(0.5).unwrap()
    }

    #[inline]
    pub fn half_size(&self) -> Vec3<TScalar> {
        (self.max - self.min) * cast::<_, TScalar>(0.5).unwrap()
    }
}

impl<TScalar: Number> HasScalarType for Box3<TScalar> {
    type ScalarType = TScalar;
}

impl<TScalar: RealNumber> HasBBox3 for Box3<TScalar> {
    #[inline]
    fn bbox(&self) -> Box3<TScalar> {
        *self
    }
}

impl<TScalar: RealNumber> BoundingVolume3 for Box3<TScalar> {
    #[inline]
    fn contains_point(&self, point: &Vec3<TScalar>) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Inclusive at boundaries
    #[inline]
    fn intersects_box3(&self, other: &Box3<TScalar>) -> bool {
        if self.max[0] < other.min[0] || self.min[0] > other.max[0] {
            return false;
        }

        if self.max[1] < other.min[1] || self.min[1] > other.max[1] {
            return false;
        }

        if self.max[2] < other.min[2] || self.min[2] > other.max[2] {
            return false;
        }

        true
    }

    #[inline]
    fn scaled(&self, factor: TScalar) -> Self {
        Self {
            min: self.min * factor,
            max: self.max * factor,
        }
    }
}

impl<TScalar: RealNumber> ClosestPoint3 for Box3<TScalar> {
    #[inline]
    fn closest_point(&self, point: &Vec3<TScalar>) -> Vec3<TScalar> {
        min2(&max2(&self.min, point), &self.max)
    }
}
