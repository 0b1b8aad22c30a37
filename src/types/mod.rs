//! Value types shared by entities, tables and the renderer interface

pub mod bounds;
pub mod color;
pub mod handle;
pub mod line_type;
pub mod line_weight;
pub mod transform;
pub mod transparency;
pub mod vector;

pub use bounds::{BoundingBox2D, BoundingBox3D};
pub use color::Color;
pub use handle::{Handle, HandleSeed};
pub use line_type::LineTypeRef;
pub use line_weight::LineWeight;
pub use transform::{is_zero_angle, Matrix3, Transform};
pub use transparency::Transparency;
pub use vector::{Vector2, Vector3};
