//! Paper space viewport entity

use super::{impl_entity, EntityCommon, Extents, GripPointSource, Renderable};
use crate::database::DrawingContext;
use crate::properties::{float_property, EntityProperties, Property, PropertySource, PropertyType, PropertyValue};
use crate::render::{RenderedObject, Renderer};
use crate::types::{BoundingBox3D, Vector3};
use tracing::debug;

/// Window into model space placed on a layout
///
/// Viewport 1 of each layout is the layout's own overall view and is
/// never drawn as a frame.
#[derive(Debug, Clone)]
pub struct Viewport {
    pub common: EntityCommon,
    /// Center in paper space
    pub center: Vector3,
    /// Width in paper space units
    pub width: f64,
    /// Height in paper space units
    pub height: f64,
    /// Viewport number (1 = overall layout view)
    pub id: i16,
    /// View center in model space (DCS)
    pub view_center: Vector3,
    /// Model space height shown in the viewport
    pub view_height: f64,
    /// Twist angle in radians
    pub twist_angle: f64,
}

impl Viewport {
    pub const TYPE_NAME: &'static str = "VIEWPORT";

    pub fn new() -> Self {
        Viewport {
            common: EntityCommon::new(),
            center: Vector3::ZERO,
            width: 0.0,
            height: 0.0,
            id: 1,
            view_center: Vector3::ZERO,
            view_height: 1.0,
            twist_angle: 0.0,
        }
    }

    pub fn with_frame(id: i16, center: Vector3, width: f64, height: f64) -> Self {
        Viewport {
            center,
            width,
            height,
            id,
            view_height: height,
            ..Self::new()
        }
    }

    /// Frame corners, counter-clockwise from lower left
    pub fn corners(&self) -> [Vector3; 4] {
        let hw = self.width / 2.0;
        let hh = self.height / 2.0;
        let c = self.center;
        [
            Vector3::new(c.x - hw, c.y - hh, c.z),
            Vector3::new(c.x + hw, c.y - hh, c.z),
            Vector3::new(c.x + hw, c.y + hh, c.z),
            Vector3::new(c.x - hw, c.y + hh, c.z),
        ]
    }

    /// Model space units per paper space unit
    pub fn scale(&self) -> f64 {
        if self.view_height.abs() < f64::EPSILON {
            1.0
        } else {
            self.height / self.view_height
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Viewport);

impl Extents for Viewport {
    fn geometric_extents(&self) -> BoundingBox3D {
        BoundingBox3D::from_points(&self.corners()).unwrap_or_default()
    }
}

impl Renderable for Viewport {
    /// Frame of a layout viewport; nothing for model space or the overall
    /// layout view
    fn world_draw(&self, renderer: &mut dyn Renderer, ctx: &dyn DrawingContext, _delay: bool) -> Option<RenderedObject> {
        if self.common.owner_id == ctx.model_space_id() || self.id <= 1 {
            debug!(id = self.id, owner = %self.common.owner_id, "viewport frame not drawn");
            return None;
        }
        let [a, b, c, d] = self.corners();
        Some(renderer.lines(&[a, b, c, d, a]))
    }
}

impl GripPointSource for Viewport {
    fn grip_points(&self) -> Vec<Vector3> {
        vec![self.center]
    }
}

impl PropertySource for Viewport {
    fn properties(&self) -> EntityProperties<Self> {
        let mut props = EntityProperties::new(Self::TYPE_NAME);
        props
            .add("geometry", float_property!("centerX", Viewport, |e| e.center.x, |e, v| e.center.x = v))
            .add("geometry", float_property!("centerY", Viewport, |e| e.center.y, |e, v| e.center.y = v))
            .add("geometry", float_property!("centerZ", Viewport, |e| e.center.z, |e, v| e.center.z = v))
            .add("geometry", float_property!("width", Viewport, |e| e.width, |e, v| e.width = v))
            .add("geometry", float_property!("height", Viewport, |e| e.height, |e, v| e.height = v))
            .add("view", float_property!("viewHeight", Viewport, |e| e.view_height, |e, v| e.view_height = v))
            .add("view", float_property!("twistAngle", Viewport, |e| e.twist_angle, |e, v| e.twist_angle = v))
            .add(
                "view",
                Property::read_only("number", PropertyType::Int, |e: &Viewport| PropertyValue::Int(e.id as i64)),
            );
        props
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;
    use crate::entities::Entity;
    use crate::render::{PrimitiveKind, RecordingRenderer};
    use crate::types::Handle;

    #[test]
    fn test_layout_viewport_draws_frame() {
        let db = Database::new();
        let mut viewport = Viewport::with_frame(2, Vector3::new(5.0, 5.0, 0.0), 4.0, 2.0);
        viewport.common.owner_id = db.paper_space_id();
        let mut renderer = RecordingRenderer::new();
        let rendered = viewport.draw(&mut renderer, &db, false).unwrap();
        assert_eq!(rendered.kind(), PrimitiveKind::Lines);
    }

    #[test]
    fn test_overall_viewport_not_drawn() {
        let db = Database::new();
        let mut viewport = Viewport::with_frame(1, Vector3::ZERO, 4.0, 2.0);
        viewport.common.owner_id = Handle::new(0xFFFF);
        let mut renderer = RecordingRenderer::new();
        assert!(viewport.draw(&mut renderer, &db, false).is_none());
        assert!(renderer.calls().is_empty());
    }

    #[test]
    fn test_model_space_viewport_not_drawn() {
        let db = Database::new();
        let mut viewport = Viewport::with_frame(3, Vector3::ZERO, 4.0, 2.0);
        viewport.common.owner_id = db.model_space_id();
        let mut renderer = RecordingRenderer::new();
        assert!(viewport.draw(&mut renderer, &db, false).is_none());
    }

    #[test]
    fn test_viewport_extents_and_grips() {
        let viewport = Viewport::with_frame(2, Vector3::new(1.0, 1.0, 0.0), 2.0, 4.0);
        let bbox = viewport.geometric_extents();
        assert_eq!(bbox.min, Vector3::new(0.0, -1.0, 0.0));
        assert_eq!(bbox.max, Vector3::new(2.0, 3.0, 0.0));
        assert_eq!(viewport.grip_points(), vec![Vector3::new(1.0, 1.0, 0.0)]);
    }
}
