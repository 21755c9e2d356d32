use nalgebra::Vector3;

pub type Vec3<T> = Vector3<T>;
pub type Vec3f = Vector3<f32>;
pub type Vec3u = Vector3<u32>;
