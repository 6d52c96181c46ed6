//! Geometry types shared by the command log, bounds code and sinks.
//!
//! Conventions:
//! - model space, `f32` components
//! - row-vector transforms (`p' = p · M`), translation in the last row
//! - `Aabb` / `Sphere` are generic over [`Point`] so 2D and 3D share one bounds path

mod aabb;
mod affine2;
mod mat4;
mod point;
mod sphere;
mod vec2;
mod vec3;

pub use aabb::Aabb;
pub use affine2::Affine2;
pub use mat4::Mat4;
pub use point::Point;
pub use sphere::Sphere;
pub use vec2::Vec2;
pub use vec3::Vec3;
