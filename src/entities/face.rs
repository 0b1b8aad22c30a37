//! 3D face entity

use super::{impl_entity, EntityCommon, Extents, GripPointSource, Renderable, Transformable};
use crate::database::DrawingContext;
use crate::error::{EntityError, Result};
use crate::properties::{float_property, EntityProperties, Property, PropertySource, PropertyType, PropertyValue};
use crate::render::{RenderedObject, Renderer};
use crate::types::{BoundingBox3D, Transform, Vector3};
use bitflags::bitflags;

bitflags! {
    /// Invisible edge flags (DXF group 70)
    ///
    /// Bit `i` hides the edge from vertex `i` to vertex `(i + 1) % 4`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct InvisibleEdgeFlags: u8 {
        const FIRST = 1;
        const SECOND = 2;
        const THIRD = 4;
        const FOURTH = 8;
    }
}

const EDGE_COUNT: usize = 4;

fn edge_bit(index: usize) -> Result<InvisibleEdgeFlags> {
    if index >= EDGE_COUNT {
        return Err(EntityError::InvalidIndex { index, len: EDGE_COUNT });
    }
    Ok(InvisibleEdgeFlags::from_bits_truncate(1 << index))
}

/// 3DFACE: a planar or non-planar quadrilateral
#[derive(Debug, Clone)]
pub struct Face {
    pub common: EntityCommon,
    pub corners: [Vector3; 4],
    pub invisible_edges: InvisibleEdgeFlags,
}

impl Face {
    pub const TYPE_NAME: &'static str = "3DFACE";

    pub fn new() -> Self {
        Face {
            common: EntityCommon::new(),
            corners: [Vector3::ZERO; 4],
            invisible_edges: InvisibleEdgeFlags::empty(),
        }
    }

    pub fn from_corners(corners: [Vector3; 4]) -> Self {
        Face {
            corners,
            ..Self::new()
        }
    }

    /// Triangle; the fourth corner repeats the third
    pub fn triangle(first: Vector3, second: Vector3, third: Vector3) -> Self {
        Self::from_corners([first, second, third, third])
    }

    pub fn vertex_at(&self, index: usize) -> Result<Vector3> {
        self.corners
            .get(index)
            .copied()
            .ok_or(EntityError::InvalidIndex { index, len: 4 })
    }

    pub fn set_vertex_at(&mut self, index: usize, point: Vector3) -> Result<()> {
        let slot = self
            .corners
            .get_mut(index)
            .ok_or(EntityError::InvalidIndex { index, len: 4 })?;
        *slot = point;
        Ok(())
    }

    /// Fails for indices above 3
    pub fn is_edge_visible_at(&self, index: usize) -> Result<bool> {
        Ok(!self.invisible_edges.contains(edge_bit(index)?))
    }

    /// Fails for indices above 3
    pub fn make_edge_invisible_at(&mut self, index: usize) -> Result<()> {
        self.invisible_edges.insert(edge_bit(index)?);
        Ok(())
    }

    pub fn make_edge_visible_at(&mut self, index: usize) -> Result<()> {
        self.invisible_edges.remove(edge_bit(index)?);
        Ok(())
    }

    fn visible_edge_indices(&self) -> Vec<u32> {
        (0..EDGE_COUNT)
            .filter(|&i| !self.invisible_edges.contains(InvisibleEdgeFlags::from_bits_truncate(1 << i)))
            .flat_map(|i| [i as u32, ((i + 1) % EDGE_COUNT) as u32])
            .collect()
    }
}

impl Default for Face {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Face);

impl Extents for Face {
    fn geometric_extents(&self) -> BoundingBox3D {
        BoundingBox3D::from_points(&self.corners).unwrap_or_default()
    }
}

impl Renderable for Face {
    /// Emits only the visible edges as indexed segments
    fn world_draw(&self, renderer: &mut dyn Renderer, _ctx: &dyn DrawingContext, _delay: bool) -> Option<RenderedObject> {
        let buffer: Vec<f64> = self.corners.iter().flat_map(|p| [p.x, p.y, p.z]).collect();
        Some(renderer.line_segments(&buffer, 3, &self.visible_edge_indices()))
    }
}

impl GripPointSource for Face {
    fn grip_points(&self) -> Vec<Vector3> {
        self.corners.to_vec()
    }
}

impl Transformable for Face {
    fn apply_transform(&mut self, transform: &Transform) {
        for corner in &mut self.corners {
            *corner = transform.apply(*corner);
        }
    }
}

macro_rules! corner_property {
    ($name:literal, $index:literal, $axis:ident) => {
        float_property!($name, Face, |e| e.corners[$index].$axis, |e, v| e.corners[$index].$axis = v)
    };
}

macro_rules! edge_property {
    ($name:literal, $index:literal) => {
        Property::editable(
            $name,
            PropertyType::Boolean,
            |e: &Face| PropertyValue::Boolean(!e.invisible_edges.contains(InvisibleEdgeFlags::from_bits_truncate(1 << $index))),
            |e: &mut Face, v| {
                if v.into_bool($name)? {
                    e.make_edge_visible_at($index)
                } else {
                    e.make_edge_invisible_at($index)
                }
            },
        )
    };
}

impl PropertySource for Face {
    fn properties(&self) -> EntityProperties<Self> {
        let mut props = EntityProperties::new(Self::TYPE_NAME);
        props
            .add("geometry", corner_property!("vertex1X", 0, x))
            .add("geometry", corner_property!("vertex1Y", 0, y))
            .add("geometry", corner_property!("vertex1Z", 0, z))
            .add("geometry", corner_property!("vertex2X", 1, x))
            .add("geometry", corner_property!("vertex2Y", 1, y))
            .add("geometry", corner_property!("vertex2Z", 1, z))
            .add("geometry", corner_property!("vertex3X", 2, x))
            .add("geometry", corner_property!("vertex3Y", 2, y))
            .add("geometry", corner_property!("vertex3Z", 2, z))
            .add("geometry", corner_property!("vertex4X", 3, x))
            .add("geometry", corner_property!("vertex4Y", 3, y))
            .add("geometry", corner_property!("vertex4Z", 3, z))
            .add("geometry", edge_property!("edge1Visible", 0))
            .add("geometry", edge_property!("edge2Visible", 1))
            .add("geometry", edge_property!("edge3Visible", 2))
            .add("geometry", edge_property!("edge4Visible", 3));
        props
    }
}
