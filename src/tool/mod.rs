use nalgebra::{Rotation3, Unit};

use crate::{
    geometry::{
        primitives::{LineSegment3, Obb3},
        traits::ClosestPoint3,
    },
    helpers::aliases::Vec3f,
};

/// Tool pose at an instant: tip position and spindle direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Posture {
    pub center: Vec3f,
    pub direction: Vec3f,
}

impl Posture {
    #[inline]
    pub fn new(center: Vec3f, direction: Vec3f) -> Self {
        Self { center, direction }
    }
}

/// Ball-nose milling tool swept along lists of postures. The cutter is a
/// flat-topped capsule: a cylinder of `height - radius` along the spindle
/// with a hemispherical cap at the tip.
pub struct Tool {
    radius: f32,
    height: f32,
    center_step: f32,
    direction_step: f32,
    paths: Vec<Vec<Posture>>,
    current: Posture,
    path_index: usize,
    posture_index: usize,
}

impl Tool {
    pub fn new(radius: f32, height: f32) -> Self {
        Self {
            radius,
            height,
            center_step: 5.0,
            direction_step: 0.5f32.to_radians(),
            paths: Vec::new(),
            current: Posture::new(Vec3f::zeros(), Vec3f::z()),
            path_index: 0,
            posture_index: 0,
        }
    }

    #[inline]
    pub fn with_center_step(mut self, step: f32) -> Self {
        self.center_step = step;
        self
    }

    #[inline]
    pub fn with_direction_step(mut self, step: f32) -> Self {
        self.direction_step = step;
        self
    }

    /// Appends a list of waypoints; `advance` walks the lists in order
    pub fn push_path(&mut self, path: Vec<Posture>) {
        if self.paths.is_empty() {
            if let Some(first) = path.first() {
                self.current = *first;
            }
        }

        self.paths.push(path);
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[inline]
    pub fn posture(&self) -> &Posture {
        &self.current
    }

    pub fn reset(&mut self) {
        self.path_index = 0;
        self.posture_index = 0;

        if let Some(first) = self.paths.first().and_then(|path| path.first()) {
            self.current = *first;
        }
    }

    /// Oriented box enclosing the cutter at its current posture, in world
    /// coordinates
    pub fn bounding_box(&self) -> Obb3<f32> {
        let axis = self.current.direction.normalize();
        let center = self.current.center + axis * (self.height / 2.0 - self.radius);

        let axis_z = axis * (self.height / 2.0);
        let reference = if axis.z.abs() < 0.9 {
            Vec3f::z()
        } else {
            Vec3f::x()
        };
        let axis_x = axis.cross(&reference).normalize() * self.radius;
        let axis_y = axis_z.cross(&axis_x).normalize() * self.radius;

        Obb3::new(center, axis_x, axis_y, axis_z)
    }

    /// Exact containment test for the cutter interior at its current posture.
    /// Pure, callable from many threads at once.
    pub fn is_inside(&self, point: &Vec3f) -> bool {
        let axis = self.current.direction.normalize();
        let axial = (point - self.current.center).dot(&axis);

        if axial > self.height - self.radius {
            return false;
        }

        let spine = LineSegment3::new(
            self.current.center,
            self.current.center + axis * (self.height - self.radius),
        );

        (point - spine.closest_point(point)).norm() <= self.radius
    }

    /// Steps toward the next waypoint, translating by `center_step` and
    /// rotating by `direction_step` per call. Returns `false` once every path
    /// has been walked.
    pub fn advance(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }

        let target = self.paths[self.path_index][self.posture_index];
        let distance = (target.center - self.current.center).norm();
        let angle = angle_to_line(&self.current.direction, &target.direction);
        let far_from_center = distance > self.center_step;
        let far_from_direction = angle > self.direction_step;

        if far_from_center && far_from_direction {
            // Couple the rotation to the remaining travel so both land together
            let coupled_step = self.center_step * angle / distance;
            self.step_center(&target.center);
            self.step_direction(&target.direction, coupled_step);
        } else if far_from_center {
            self.step_center(&target.center);
        } else if far_from_direction {
            self.step_direction(&target.direction, self.direction_step);
        } else {
            self.snap_to_waypoint();
        }

        true
    }

    #[inline]
    fn is_finished(&self) -> bool {
        self.path_index >= self.paths.len()
    }

    fn step_center(&mut self, target: &Vec3f) {
        let towards = (target - self.current.center).normalize();
        self.current.center += towards * self.center_step;
    }

    fn step_direction(&mut self, target: &Vec3f, step: f32) {
        let pivot = self.current.direction.cross(target);

        if pivot.norm_squared() < f32::EPSILON {
            // Parallel or opposite directions leave no rotation plane
            self.current.direction = *target;
            return;
        }

        let rotation = Rotation3::from_axis_angle(&Unit::new_normalize(pivot), step);
        self.current.direction = rotation * self.current.direction;
    }

    fn snap_to_waypoint(&mut self) {
        self.current = self.paths[self.path_index][self.posture_index];
        self.posture_index += 1;

        if self.posture_index >= self.paths[self.path_index].len() {
            self.path_index += 1;
            self.posture_index = 0;

            if !self.is_finished() {
                self.current = self.paths[self.path_index][self.posture_index];
            }
        }
    }
}

#[inline]
fn angle_to_line(a: &Vec3f, b: &Vec3f) -> f32 {
    (a.dot(b) / (a.norm() * b.norm())).clamp(-1.0, 1.0).acos()
}
