use crate::{
    geometry::traits::{ClosestPoint3, HasScalarType, RealNumber},
    helpers::aliases::Vec3,
};

/// 3D line segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment3<TScalar: RealNumber> {
    start: Vec3<TScalar>,
    end: Vec3<TScalar>,
}

impl<TScalar: RealNumber> LineSegment3<TScalar> {
    #[inline]
    pub fn new(start: Vec3<TScalar>, end: Vec3<TScalar>) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn start(&self) -> &Vec3<TScalar> {
        &self.start
    }

    #[inline]
    pub fn end(&self) -> &Vec3<TScalar> {
        &self.end
    }

    #[inline]
    pub fn length(&self) -> TScalar {
        (self.end - self.start).norm()
    }
}

impl<TScalar: RealNumber> HasScalarType for LineSegment3<TScalar> {
    type ScalarType = TScalar;
}

impl<TScalar: RealNumber> ClosestPoint3 for LineSegment3<TScalar> {
    /// Clamped projection onto the segment
    fn closest_point(&self, point: &Vec3<TScalar>) -> Vec3<TScalar> {
        let dir = self.end - self.start;
        let sq_length = dir.norm_squared();

        if sq_length == TScalar::zero() {
            return self.start;
        }

        let t = (point - self.start).dot(&dir) / sq_length;
        let t = nalgebra::clamp(t, TScalar::zero(), TScalar::one());

        self.start + dir * t
    }
}
