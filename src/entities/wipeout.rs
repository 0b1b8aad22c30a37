//! Wipeout entity

use super::raster_image::ImageFrame;
use super::{impl_entity, EntityCommon, Extents, Renderable, Transformable};
use crate::database::DrawingContext;
use crate::geometry::{Area2d, Polyline2d};
use crate::properties::{float_property, EntityProperties, Property, PropertySource, PropertyType, PropertyValue};
use crate::render::{FillType, RenderedObject, Renderer};
use crate::types::{BoundingBox3D, Transform, Vector2, Vector3};

/// Opaque mask covering the objects behind it
///
/// Shares the image placement and clipping rules of
/// [`RasterImage`](super::RasterImage) but carries no image definition.
#[derive(Debug, Clone)]
pub struct Wipeout {
    pub common: EntityCommon,
    pub frame: ImageFrame,
}

impl Wipeout {
    pub const TYPE_NAME: &'static str = "WIPEOUT";

    pub fn new() -> Self {
        Wipeout {
            common: EntityCommon::new(),
            frame: ImageFrame::default(),
        }
    }

    pub fn from_rectangle(position: Vector3, width: f64, height: f64) -> Self {
        Wipeout {
            common: EntityCommon::new(),
            frame: ImageFrame::new(position, width, height),
        }
    }

    /// Set the normalized mask polygon and turn clipping on
    pub fn set_clip_boundary(&mut self, boundary: Vec<Vector2>) {
        self.frame.clip_boundary = boundary;
        self.frame.is_clipped = true;
    }

    pub fn boundary_path(&self) -> Vec<Vector3> {
        self.frame.boundary_path()
    }

    /// Boundary as a single closed fill loop
    fn mask_area(&self) -> Area2d {
        let mut points: Vec<Vector2> = self.boundary_path().iter().map(|p| p.to_vec2()).collect();
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        let mut area = Area2d::new();
        area.add_loop(Polyline2d::from_points(&points, true));
        area
    }
}

impl Default for Wipeout {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Wipeout);

impl Extents for Wipeout {
    fn geometric_extents(&self) -> BoundingBox3D {
        self.frame.extents()
    }
}

impl Renderable for Wipeout {
    fn world_draw(&self, renderer: &mut dyn Renderer, _ctx: &dyn DrawingContext, _delay: bool) -> Option<RenderedObject> {
        Some(renderer.area(&self.mask_area()))
    }

    fn fill_type(&self) -> FillType {
        FillType {
            solid_fill: true,
            ..FillType::default()
        }
    }
}

impl Transformable for Wipeout {
    fn apply_transform(&mut self, transform: &Transform) {
        self.frame.transform(transform);
    }
}

impl PropertySource for Wipeout {
    fn properties(&self) -> EntityProperties<Self> {
        let mut props = EntityProperties::new(Self::TYPE_NAME);
        props
            .add("geometry", float_property!("positionX", Wipeout, |e| e.frame.position.x, |e, v| e.frame.position.x = v))
            .add("geometry", float_property!("positionY", Wipeout, |e| e.frame.position.y, |e, v| e.frame.position.y = v))
            .add("geometry", float_property!("positionZ", Wipeout, |e| e.frame.position.z, |e, v| e.frame.position.z = v))
            .add("geometry", float_property!("width", Wipeout, |e| e.frame.width, |e, v| e.frame.width = v))
            .add("geometry", float_property!("height", Wipeout, |e| e.frame.height, |e, v| e.frame.height = v))
            .add(
                "geometry",
                Property::editable(
                    "clipped",
                    PropertyType::Boolean,
                    |e: &Wipeout| PropertyValue::Boolean(e.frame.is_clipped),
                    |e: &mut Wipeout, v| {
                        e.frame.is_clipped = v.into_bool("clipped")?;
                        Ok(())
                    },
                ),
            );
        props
    }
}
